//! Typed list filters
//!
//! Each list endpoint accepts a fixed set of query parameter combinations.
//! Query strings are parsed into one variant per supported combination;
//! anything else is rejected.

use datamarket_common::{MarketError, Result};
use serde::Deserialize;

use crate::types::{DataSource, Insight, Person, Policy, Tool};

/// Trimmed, non-empty parameter value
fn param(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn unsupported(endpoint: &str, supported: &str) -> MarketError {
    MarketError::invalid_input(format!(
        "Unsupported filter combination for {}. Supported: {}",
        endpoint, supported
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct DataSourceQuery {
    pub q: Option<String>,
    pub source_type: Option<String>,
    pub team_id: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataSourceFilter {
    All,
    /// Case-insensitive substring of name or description
    Search(String),
    SourceType(String),
    Team(String),
    Tag(String),
}

impl TryFrom<DataSourceQuery> for DataSourceFilter {
    type Error = MarketError;

    fn try_from(query: DataSourceQuery) -> Result<Self> {
        match (
            param(query.q),
            param(query.source_type),
            param(query.team_id),
            param(query.tag),
        ) {
            (None, None, None, None) => Ok(Self::All),
            (Some(q), None, None, None) => Ok(Self::Search(q.to_lowercase())),
            (None, Some(t), None, None) => Ok(Self::SourceType(t)),
            (None, None, Some(team), None) => Ok(Self::Team(team)),
            (None, None, None, Some(tag)) => Ok(Self::Tag(tag)),
            _ => Err(unsupported(
                "data sources",
                "none, q, source_type, team_id or tag (one at a time)",
            )),
        }
    }
}

impl DataSourceFilter {
    pub fn matches(&self, source: &DataSource) -> bool {
        match self {
            Self::All => true,
            Self::Search(q) => contains_ci(&source.name, q) || contains_ci(&source.description, q),
            Self::SourceType(t) => source.source_type.eq_ignore_ascii_case(t),
            Self::Team(team) => source.owner_team_id.as_deref() == Some(team.as_str()),
            Self::Tag(tag) => source.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)),
        }
    }

    /// Search text, when this is a free-text search
    pub fn search_text(&self) -> Option<&str> {
        match self {
            Self::Search(q) => Some(q),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PeopleQuery {
    pub q: Option<String>,
    pub team_id: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PeopleFilter {
    All,
    /// Case-insensitive substring of name, title or bio
    Search(String),
    Team(String),
    Role(String),
    TeamAndRole { team_id: String, role: String },
}

impl TryFrom<PeopleQuery> for PeopleFilter {
    type Error = MarketError;

    fn try_from(query: PeopleQuery) -> Result<Self> {
        match (param(query.q), param(query.team_id), param(query.role)) {
            (None, None, None) => Ok(Self::All),
            (Some(q), None, None) => Ok(Self::Search(q.to_lowercase())),
            (None, Some(team_id), None) => Ok(Self::Team(team_id)),
            (None, None, Some(role)) => Ok(Self::Role(role)),
            (None, Some(team_id), Some(role)) => Ok(Self::TeamAndRole { team_id, role }),
            _ => Err(unsupported("people", "none, q, team_id, role, or team_id with role")),
        }
    }
}

impl PeopleFilter {
    pub fn matches(&self, person: &Person) -> bool {
        let in_team = |team_id: &str| person.team_id.as_deref() == Some(team_id);
        match self {
            Self::All => true,
            Self::Search(q) => {
                contains_ci(&person.name, q)
                    || contains_ci(&person.title, q)
                    || contains_ci(&person.bio, q)
            }
            Self::Team(team_id) => in_team(team_id),
            Self::Role(role) => person.role.eq_ignore_ascii_case(role),
            Self::TeamAndRole { team_id, role } => {
                in_team(team_id) && person.role.eq_ignore_ascii_case(role)
            }
        }
    }

    pub fn search_text(&self) -> Option<&str> {
        match self {
            Self::Search(q) => Some(q),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct InsightQuery {
    pub data_source_id: Option<String>,
    pub author_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsightFilter {
    All,
    DataSource(String),
    Author(String),
}

impl TryFrom<InsightQuery> for InsightFilter {
    type Error = MarketError;

    fn try_from(query: InsightQuery) -> Result<Self> {
        match (param(query.data_source_id), param(query.author_id)) {
            (None, None) => Ok(Self::All),
            (Some(id), None) => Ok(Self::DataSource(id)),
            (None, Some(id)) => Ok(Self::Author(id)),
            _ => Err(unsupported("insights", "none, data_source_id or author_id")),
        }
    }
}

impl InsightFilter {
    pub fn matches(&self, insight: &Insight) -> bool {
        match self {
            Self::All => true,
            Self::DataSource(id) => insight.data_source_id.as_deref() == Some(id.as_str()),
            Self::Author(id) => insight.author_id.as_deref() == Some(id.as_str()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PolicyQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub data_source_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PolicyFilter {
    All,
    Category(String),
    Status(String),
    CategoryAndStatus { category: String, status: String },
    DataSource(String),
}

impl TryFrom<PolicyQuery> for PolicyFilter {
    type Error = MarketError;

    fn try_from(query: PolicyQuery) -> Result<Self> {
        match (param(query.category), param(query.status), param(query.data_source_id)) {
            (None, None, None) => Ok(Self::All),
            (Some(category), None, None) => Ok(Self::Category(category)),
            (None, Some(status), None) => Ok(Self::Status(status)),
            (Some(category), Some(status), None) => Ok(Self::CategoryAndStatus { category, status }),
            (None, None, Some(id)) => Ok(Self::DataSource(id)),
            _ => Err(unsupported(
                "policies",
                "none, category, status, category with status, or data_source_id",
            )),
        }
    }
}

impl PolicyFilter {
    pub fn matches(&self, policy: &Policy) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => policy.category.eq_ignore_ascii_case(c),
            Self::Status(s) => policy.status.eq_ignore_ascii_case(s),
            Self::CategoryAndStatus { category, status } => {
                policy.category.eq_ignore_ascii_case(category)
                    && policy.status.eq_ignore_ascii_case(status)
            }
            Self::DataSource(id) => policy.data_source_id.as_deref() == Some(id.as_str()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolQuery {
    pub category: Option<String>,
    pub team_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolFilter {
    All,
    Category(String),
    Team(String),
}

impl TryFrom<ToolQuery> for ToolFilter {
    type Error = MarketError;

    fn try_from(query: ToolQuery) -> Result<Self> {
        match (param(query.category), param(query.team_id)) {
            (None, None) => Ok(Self::All),
            (Some(category), None) => Ok(Self::Category(category)),
            (None, Some(team_id)) => Ok(Self::Team(team_id)),
            _ => Err(unsupported("tools", "none, category or team_id")),
        }
    }
}

impl ToolFilter {
    pub fn matches(&self, tool: &Tool) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => tool.category.eq_ignore_ascii_case(c),
            Self::Team(team_id) => tool.team_id.as_deref() == Some(team_id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, team: Option<&str>, role: &str) -> Person {
        Person {
            id: name.to_lowercase(),
            name: name.to_string(),
            title: "Analyst".to_string(),
            bio: "Works on revenue reporting".to_string(),
            email: String::new(),
            team_id: team.map(str::to_string),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_people_filter_combinations() {
        let filter = PeopleFilter::try_from(PeopleQuery::default()).unwrap();
        assert_eq!(filter, PeopleFilter::All);

        let filter = PeopleFilter::try_from(PeopleQuery {
            team_id: Some("t1".to_string()),
            role: Some("analyst".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            filter,
            PeopleFilter::TeamAndRole {
                team_id: "t1".to_string(),
                role: "analyst".to_string()
            }
        );

        let err = PeopleFilter::try_from(PeopleQuery {
            q: Some("ana".to_string()),
            role: Some("analyst".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, MarketError::InvalidInput(_)));
    }

    #[test]
    fn test_blank_params_ignored() {
        let filter = PeopleFilter::try_from(PeopleQuery {
            q: Some("   ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter, PeopleFilter::All);
    }

    #[test]
    fn test_people_search_fields() {
        let filter = PeopleFilter::Search("REVENUE".to_lowercase());
        assert!(filter.matches(&person("Ana Ruiz", None, "analyst")));

        let filter = PeopleFilter::try_from(PeopleQuery {
            q: Some("RUIZ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(filter.matches(&person("Ana Ruiz", None, "analyst")));
        assert!(!filter.matches(&person("Ben Ode", None, "analyst")));
    }

    #[test]
    fn test_team_and_role_match() {
        let filter = PeopleFilter::TeamAndRole {
            team_id: "t1".to_string(),
            role: "Analyst".to_string(),
        };
        assert!(filter.matches(&person("A", Some("t1"), "analyst")));
        assert!(!filter.matches(&person("B", Some("t2"), "analyst")));
        assert!(!filter.matches(&person("C", Some("t1"), "engineer")));
    }

    #[test]
    fn test_data_source_single_param_only() {
        let err = DataSourceFilter::try_from(DataSourceQuery {
            source_type: Some("api".to_string()),
            tag: Some("pii".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, MarketError::InvalidInput(_)));

        let filter = DataSourceFilter::try_from(DataSourceQuery {
            q: Some("Orders".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.search_text(), Some("orders"));
    }

    #[test]
    fn test_policy_filter() {
        let policy = Policy {
            id: "p1".to_string(),
            title: "PII retention".to_string(),
            description: String::new(),
            category: "Privacy".to_string(),
            status: "active".to_string(),
            data_source_id: Some("ds1".to_string()),
        };

        let filter = PolicyFilter::try_from(PolicyQuery {
            category: Some("privacy".to_string()),
            status: Some("ACTIVE".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(filter.matches(&policy));

        assert!(PolicyFilter::DataSource("ds1".to_string()).matches(&policy));
        assert!(!PolicyFilter::Status("draft".to_string()).matches(&policy));

        assert!(PolicyFilter::try_from(PolicyQuery {
            status: Some("active".to_string()),
            data_source_id: Some("ds1".to_string()),
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_insight_and_tool_filters() {
        assert!(InsightFilter::try_from(InsightQuery {
            data_source_id: Some("ds1".to_string()),
            author_id: Some("p1".to_string()),
        })
        .is_err());

        assert_eq!(
            ToolFilter::try_from(ToolQuery {
                category: Some("bi".to_string()),
                team_id: None,
            })
            .unwrap(),
            ToolFilter::Category("bi".to_string())
        );
    }
}
