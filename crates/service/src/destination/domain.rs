use serde::{Deserialize, Serialize};

use crate::pagination::SortField;

/// Stored destination (business view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: i64,
    pub name: String,
    pub country: String,
    /// Ids of the trips owned by this destination, ascending.
    pub trip_ids: Vec<i64>,
}

/// Create/update input; whole-record semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationCandidate {
    pub name: String,
    pub country: String,
}

impl DestinationCandidate {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self { name: name.into(), country: country.into() }
    }
}

/// Names compare equal ignoring case.
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DestinationSort {
    Id,
    #[default]
    Name,
    Country,
}

impl SortField for DestinationSort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "country" => Some(Self::Country),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Country => "country",
        }
    }

    fn allowed() -> &'static [&'static str] { &["id", "name", "country"] }
}
