use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::activity::Activity;
use crate::models::stop::Stop;

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(default)]
    pub title: Option<String>,
    pub destination: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// End of the trip, falling back to the start date for single-day trips
    /// that never had an end date set.
    pub fn effective_end_date(&self) -> DateTime<Utc> {
        self.end_date.unwrap_or(self.start_date)
    }
}

/// A trip with its stops (sequence ascending) and each stop's activities
/// (start time ascending), as served by the detail and itinerary endpoints.
#[derive(Debug, Serialize, Clone)]
pub struct TripDetails {
    #[serde(flatten)]
    pub trip: Trip,
    pub stops: Vec<StopDetails>,
}

#[derive(Debug, Serialize, Clone)]
pub struct StopDetails {
    #[serde(flatten)]
    pub stop: Stop,
    pub activities: Vec<Activity>,
}
