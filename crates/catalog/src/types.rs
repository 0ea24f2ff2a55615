use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dataset, API or dashboard listed in the marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSource {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// e.g. "warehouse_table", "api", "dashboard"
    pub source_type: String,

    pub owner_team_id: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub view_count: u64,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub lead_person_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub bio: String,

    #[serde(default)]
    pub email: String,

    pub team_id: Option<String>,

    /// e.g. "data_steward", "analyst", "engineer"
    #[serde(default)]
    pub role: String,
}

/// Curated set of data sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub data_source_ids: Vec<String>,

    pub created_by: Option<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Finding published about a data source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub content: String,

    pub data_source_id: Option<String>,
    pub author_id: Option<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Usage or governance rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// e.g. "privacy", "retention", "access"
    pub category: String,

    /// e.g. "active", "draft", "retired"
    pub status: String,

    pub data_source_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub category: String,
    pub team_id: Option<String>,
}

/// Whole catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub data_sources: Vec<DataSource>,
    pub teams: Vec<Team>,
    pub people: Vec<Person>,
    pub collections: Vec<Collection>,
    pub insights: Vec<Insight>,
    pub policies: Vec<Policy>,
    pub tools: Vec<Tool>,
}

/// Team with the people and data sources attached to it
#[derive(Debug, Clone, Serialize)]
pub struct TeamDetail {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<Person>,
    pub data_sources: Vec<DataSource>,
}

/// Collection with its data sources resolved
#[derive(Debug, Clone, Serialize)]
pub struct CollectionDetail {
    #[serde(flatten)]
    pub collection: Collection,
    pub data_sources: Vec<DataSource>,
}

/// Create-collection payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewCollection {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub data_source_ids: Vec<String>,

    pub created_by: Option<String>,
}
