use actix_web::{get, web, HttpResponse};
use datamarket_catalog::{DataSourceFilter, DataSourceQuery};
use datamarket_common::MarketError;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{DataResponse, ListResponse};

/// List data sources
///
/// A free-text search that matches nothing returns fuzzy name suggestions.
#[get("/data-sources")]
pub async fn list_data_sources(
    query: web::Query<DataSourceQuery>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let filter = DataSourceFilter::try_from(query.into_inner())?;

    let catalog = state.catalog.read().await;
    let data_sources = catalog.data_sources(&filter);

    let mut response = ListResponse::new(data_sources);
    if response.count == 0 {
        if let Some(text) = filter.search_text() {
            let suggestions = catalog.data_source_suggestions(text);
            debug!("No data source matched '{}', {} suggestions", text, suggestions.len());
            response = response.with_suggestions(suggestions);
        }
    }

    Ok(HttpResponse::Ok().json(response))
}

/// Get a data source and count the view
#[get("/data-sources/{id}")]
pub async fn get_data_source(
    path: web::Path<String>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();

    let data_source = state
        .catalog
        .read()
        .await
        .data_source(&id)
        .cloned()
        .ok_or_else(|| MarketError::not_found(format!("Data source {}", id)))?;

    state.record_view(id);

    Ok(HttpResponse::Ok().json(DataResponse::new(data_source)))
}
