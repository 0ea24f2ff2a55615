use chrono::Utc;
use datamarket_common::{MarketError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::filter::{DataSourceFilter, InsightFilter, PeopleFilter, PolicyFilter, ToolFilter};
use crate::fuzzy::{suggest, Suggestion};
use crate::types::{
    Catalog, Collection, CollectionDetail, DataSource, Insight, NewCollection, Person, Policy,
    Team, TeamDetail, Tool,
};

/// Catalog persisted as a single JSON document
pub struct CatalogStore {
    catalog: Catalog,
    file_path: PathBuf,
}

impl CatalogStore {
    /// Load the catalog; a missing file is an empty catalog
    pub fn load(path: &Path) -> Result<Self> {
        let catalog = if path.exists() {
            let data = fs::read_to_string(path)?;
            serde_json::from_str(&data).map_err(|e| {
                MarketError::catalog(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            Catalog::default()
        };

        info!(
            "Catalog loaded - {} data sources, {} teams, {} people",
            catalog.data_sources.len(),
            catalog.teams.len(),
            catalog.people.len()
        );

        Ok(Self {
            catalog,
            file_path: path.to_path_buf(),
        })
    }

    /// In-memory store that saves to `path` on mutation
    pub fn with_catalog(catalog: Catalog, path: &Path) -> Self {
        Self {
            catalog,
            file_path: path.to_path_buf(),
        }
    }

    pub fn data_sources(&self, filter: &DataSourceFilter) -> Vec<DataSource> {
        self.catalog
            .data_sources
            .iter()
            .filter(|ds| filter.matches(ds))
            .cloned()
            .collect()
    }

    pub fn data_source(&self, id: &str) -> Option<&DataSource> {
        self.catalog.data_sources.iter().find(|ds| ds.id == id)
    }

    /// Fuzzy matches on data source names
    pub fn data_source_suggestions(&self, query: &str) -> Vec<Suggestion> {
        suggest(
            query,
            self.catalog
                .data_sources
                .iter()
                .map(|ds| (ds.id.as_str(), ds.name.as_str())),
        )
    }

    pub fn teams(&self) -> &[Team] {
        &self.catalog.teams
    }

    pub fn team_detail(&self, id: &str) -> Option<TeamDetail> {
        let team = self.catalog.teams.iter().find(|t| t.id == id)?.clone();

        let members = self.people(&PeopleFilter::Team(id.to_string()));
        let data_sources = self.data_sources(&DataSourceFilter::Team(id.to_string()));

        Some(TeamDetail {
            team,
            members,
            data_sources,
        })
    }

    pub fn people(&self, filter: &PeopleFilter) -> Vec<Person> {
        self.catalog
            .people
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.catalog.people.iter().find(|p| p.id == id)
    }

    /// Fuzzy matches on people names
    pub fn person_suggestions(&self, query: &str) -> Vec<Suggestion> {
        suggest(
            query,
            self.catalog
                .people
                .iter()
                .map(|p| (p.id.as_str(), p.name.as_str())),
        )
    }

    pub fn collections(&self) -> &[Collection] {
        &self.catalog.collections
    }

    pub fn collection_detail(&self, id: &str) -> Option<CollectionDetail> {
        let collection = self.catalog.collections.iter().find(|c| c.id == id)?.clone();

        // Dangling references are dropped rather than reported
        let data_sources = collection
            .data_source_ids
            .iter()
            .filter_map(|ds_id| self.data_source(ds_id).cloned())
            .collect();

        Some(CollectionDetail {
            collection,
            data_sources,
        })
    }

    /// Validate and persist a new collection
    ///
    /// On a failed save the in-memory catalog is left unchanged.
    pub async fn create_collection(&mut self, new: NewCollection) -> Result<Collection> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(MarketError::invalid_input("Collection name cannot be empty"));
        }

        if let Some(missing) = new
            .data_source_ids
            .iter()
            .find(|id| self.data_source(id).is_none())
        {
            return Err(MarketError::invalid_input(format!(
                "Unknown data source: {}",
                missing
            )));
        }

        let mut data_source_ids = Vec::with_capacity(new.data_source_ids.len());
        for id in new.data_source_ids {
            if !data_source_ids.contains(&id) {
                data_source_ids.push(id);
            }
        }

        let collection = Collection {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: new.description,
            data_source_ids,
            created_by: new.created_by,
            created_at: Utc::now(),
        };

        self.catalog.collections.push(collection.clone());
        if let Err(e) = self.save().await {
            self.catalog.collections.pop();
            return Err(e);
        }

        info!("Collection created: {} ({})", collection.name, collection.id);
        Ok(collection)
    }

    pub fn insights(&self, filter: &InsightFilter) -> Vec<Insight> {
        self.catalog
            .insights
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect()
    }

    pub fn policies(&self, filter: &PolicyFilter) -> Vec<Policy> {
        self.catalog
            .policies
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub fn tools(&self, filter: &ToolFilter) -> Vec<Tool> {
        self.catalog
            .tools
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    /// Bump a data source's view counter and persist
    ///
    /// The counter is rolled back when the save fails.
    pub async fn increment_view_count(&mut self, id: &str) -> Result<u64> {
        let index = self
            .catalog
            .data_sources
            .iter()
            .position(|ds| ds.id == id)
            .ok_or_else(|| MarketError::not_found(format!("Data source {}", id)))?;

        self.catalog.data_sources[index].view_count += 1;
        let count = self.catalog.data_sources[index].view_count;
        if let Err(e) = self.save().await {
            self.catalog.data_sources[index].view_count -= 1;
            return Err(e);
        }

        debug!("View count for {} is now {}", id, count);
        Ok(count)
    }

    /// Write to a sibling temp file, then rename over the original
    async fn save(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.catalog)?;
        let tmp_path = self.file_path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, data).await?;
        tokio::fs::rename(&tmp_path, &self.file_path).await?;
        Ok(())
    }
}
