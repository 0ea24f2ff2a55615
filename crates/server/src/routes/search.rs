use actix_web::{get, post, web, HttpResponse};
use datamarket_vector::SearchOptions;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{DataResponse, SearchRequest, SearchResponse};

/// Semantic search over stored embeddings
#[post("/search")]
pub async fn search(
    req: web::Json<SearchRequest>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let req = req.into_inner();
    let options = SearchOptions {
        limit: req.limit.unwrap_or(state.config.default_limit),
        threshold: req.threshold.unwrap_or(state.config.default_threshold),
        content_types: req.content_types,
    };

    let outcome = state.search.search(&req.query, &options).await?;

    Ok(HttpResponse::Ok().json(SearchResponse {
        success: true,
        outcome,
    }))
}

/// Embedding table statistics
#[get("/search/stats")]
pub async fn search_stats(
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let stats = state.search.stats().await?;
    Ok(HttpResponse::Ok().json(DataResponse::new(stats)))
}
