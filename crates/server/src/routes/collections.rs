use actix_web::{get, post, web, HttpResponse};
use datamarket_catalog::NewCollection;
use datamarket_common::MarketError;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{DataResponse, ListResponse};

#[get("/collections")]
pub async fn list_collections(
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let collections = state.catalog.read().await.collections().to_vec();
    Ok(HttpResponse::Ok().json(ListResponse::new(collections)))
}

/// Get a collection with its data sources resolved
#[get("/collections/{id}")]
pub async fn get_collection(
    path: web::Path<String>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();

    let detail = state
        .catalog
        .read()
        .await
        .collection_detail(&id)
        .ok_or_else(|| MarketError::not_found(format!("Collection {}", id)))?;

    Ok(HttpResponse::Ok().json(DataResponse::new(detail)))
}

#[post("/collections")]
pub async fn create_collection(
    req: web::Json<NewCollection>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let collection = state
        .catalog
        .write()
        .await
        .create_collection(req.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(DataResponse::new(collection)))
}
