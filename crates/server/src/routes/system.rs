use actix_web::{get, web, HttpResponse};

use crate::state::AppState;
use crate::types::HealthResponse;

/// Liveness probe
#[get("/health")]
pub async fn health(state: web::Data<std::sync::Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        embedding_model: state.search.embedding_model().to_string(),
        chat_model: state.config.chat_model.clone(),
    })
}
