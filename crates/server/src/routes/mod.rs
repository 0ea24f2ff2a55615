pub mod catalog;
pub mod chat;
pub mod collections;
pub mod data_sources;
pub mod people;
pub mod search;
pub mod system;

use actix_web::web;
use datamarket_common::MarketError;

use crate::error::ApiError;

/// Register every API route under `/api`
///
/// Malformed JSON bodies and query strings are answered with the standard
/// error envelope instead of actix's plain-text defaults.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        ApiError(MarketError::invalid_input(format!("Invalid request body: {}", err))).into()
    });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        ApiError(MarketError::invalid_input(format!("Invalid query string: {}", err))).into()
    });

    cfg.service(
        web::scope("/api")
            .app_data(json_config)
            .app_data(query_config)
            // Search
            .service(search::search)
            .service(search::search_stats)
            // Data sources
            .service(data_sources::list_data_sources)
            .service(data_sources::get_data_source)
            // Teams
            .service(catalog::list_teams)
            .service(catalog::get_team)
            // People
            .service(people::list_people)
            .service(people::get_person)
            // Collections
            .service(collections::list_collections)
            .service(collections::get_collection)
            .service(collections::create_collection)
            // Insights, policies, tools
            .service(catalog::list_insights)
            .service(catalog::list_policies)
            .service(catalog::list_tools)
            // Chat
            .service(chat::chat)
            // System
            .service(system::health),
    );
}
