//! Teams, insights, policies and tools

use actix_web::{get, web, HttpResponse};
use datamarket_catalog::{
    InsightFilter, InsightQuery, PolicyFilter, PolicyQuery, ToolFilter, ToolQuery,
};
use datamarket_common::MarketError;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{DataResponse, ListResponse};

#[get("/teams")]
pub async fn list_teams(state: web::Data<std::sync::Arc<AppState>>) -> ApiResult<HttpResponse> {
    let teams = state.catalog.read().await.teams().to_vec();
    Ok(HttpResponse::Ok().json(ListResponse::new(teams)))
}

/// Team with members and owned data sources
#[get("/teams/{id}")]
pub async fn get_team(
    path: web::Path<String>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();

    let detail = state
        .catalog
        .read()
        .await
        .team_detail(&id)
        .ok_or_else(|| MarketError::not_found(format!("Team {}", id)))?;

    Ok(HttpResponse::Ok().json(DataResponse::new(detail)))
}

#[get("/insights")]
pub async fn list_insights(
    query: web::Query<InsightQuery>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let filter = InsightFilter::try_from(query.into_inner())?;
    let insights = state.catalog.read().await.insights(&filter);
    Ok(HttpResponse::Ok().json(ListResponse::new(insights)))
}

#[get("/policies")]
pub async fn list_policies(
    query: web::Query<PolicyQuery>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let filter = PolicyFilter::try_from(query.into_inner())?;
    let policies = state.catalog.read().await.policies(&filter);
    Ok(HttpResponse::Ok().json(ListResponse::new(policies)))
}

#[get("/tools")]
pub async fn list_tools(
    query: web::Query<ToolQuery>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let filter = ToolFilter::try_from(query.into_inner())?;
    let tools = state.catalog.read().await.tools(&filter);
    Ok(HttpResponse::Ok().json(ListResponse::new(tools)))
}
