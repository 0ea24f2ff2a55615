//! Datamarket catalog
//!
//! Catalog entities, typed list filters, JSON-backed store and fuzzy name
//! suggestions

pub mod filter;
pub mod fuzzy;
mod store;
mod types;

pub use filter::{
    DataSourceFilter, DataSourceQuery, InsightFilter, InsightQuery, PeopleFilter, PeopleQuery,
    PolicyFilter, PolicyQuery, ToolFilter, ToolQuery,
};
pub use fuzzy::{levenshtein, name_similarity, suggest, Suggestion};
pub use store::CatalogStore;
pub use types::{
    Catalog, Collection, CollectionDetail, DataSource, Insight, NewCollection, Person, Policy,
    Team, TeamDetail, Tool,
};
