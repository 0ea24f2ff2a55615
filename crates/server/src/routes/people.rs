use actix_web::{get, web, HttpResponse};
use datamarket_catalog::{PeopleFilter, PeopleQuery};
use datamarket_common::MarketError;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{DataResponse, ListResponse};

/// List people
///
/// A free-text search that matches nothing returns fuzzy name suggestions.
#[get("/people")]
pub async fn list_people(
    query: web::Query<PeopleQuery>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let filter = PeopleFilter::try_from(query.into_inner())?;

    let catalog = state.catalog.read().await;
    let people = catalog.people(&filter);

    let mut response = ListResponse::new(people);
    if response.count == 0 {
        if let Some(text) = filter.search_text() {
            let suggestions = catalog.person_suggestions(text);
            debug!("No person matched '{}', {} suggestions", text, suggestions.len());
            response = response.with_suggestions(suggestions);
        }
    }

    Ok(HttpResponse::Ok().json(response))
}

#[get("/people/{id}")]
pub async fn get_person(
    path: web::Path<String>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();

    let person = state
        .catalog
        .read()
        .await
        .person(&id)
        .cloned()
        .ok_or_else(|| MarketError::not_found(format!("Person {}", id)))?;

    Ok(HttpResponse::Ok().json(DataResponse::new(person)))
}
