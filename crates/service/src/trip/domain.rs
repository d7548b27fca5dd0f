use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::pagination::SortField;

/// Stored trip joined with its destination's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub destination_id: i64,
    pub destination_name: String,
}

/// Create/update input before date checks. Dates stay optional so the
/// service can report missing ones with the same message either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripCandidate {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub price: f64,
    pub destination_id: i64,
}

/// Fully validated row handed to repositories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewTrip {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: f64,
    pub destination_id: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TripSort {
    Id,
    #[default]
    StartDate,
    EndDate,
    Price,
}

impl SortField for TripSort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "id" => Some(Self::Id),
            "start_date" | "startdate" => Some(Self::StartDate),
            "end_date" | "enddate" => Some(Self::EndDate),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Price => "price",
        }
    }

    fn allowed() -> &'static [&'static str] { &["id", "start_date", "end_date", "price"] }
}
