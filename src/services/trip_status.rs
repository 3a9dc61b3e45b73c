use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived lifecycle state of a trip relative to some instant. Every endpoint
/// that surfaces a status derives it through [`TripStatus::classify`] so the
/// same trip classifies identically across endpoints at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl TripStatus {
    /// A missing end date means a single-day trip ending when it starts.
    /// Boundary instants (`now == start`, `now == end`) are ongoing.
    pub fn classify(
        now: DateTime<Utc>,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> TripStatus {
        let end = end.unwrap_or(start);
        if now < start {
            TripStatus::Upcoming
        } else if now > end {
            TripStatus::Completed
        } else {
            TripStatus::Ongoing
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TripStatus::Upcoming => "upcoming",
            TripStatus::Ongoing => "ongoing",
            TripStatus::Completed => "completed",
        }
    }

    /// Filter values from query strings; anything unrecognized means
    /// "no filter" to the caller.
    pub fn parse(value: &str) -> Option<TripStatus> {
        match value {
            "upcoming" => Some(TripStatus::Upcoming),
            "ongoing" => Some(TripStatus::Ongoing),
            "completed" => Some(TripStatus::Completed),
            _ => None,
        }
    }
}
