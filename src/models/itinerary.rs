use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::Serialize;

/// Day-wise itinerary view of a single trip.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DaywiseItinerary {
    pub trip_id: Option<ObjectId>,
    pub title: Option<String>,
    pub days: Vec<DayBucket>,
}

/// One calendar day's worth of itinerary content: stops starting that day,
/// activities occurring that day, and their accumulated cost.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date: NaiveDate,
    pub day_number: u32,
    pub stops: Vec<DayStop>,
    pub activities: Vec<DayActivity>,
    pub total_cost: f64,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DayStop {
    pub id: Option<ObjectId>,
    pub city_name: String,
    pub budget: Option<f64>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DayActivity {
    pub id: Option<ObjectId>,
    pub name: String,
    /// Start time of the activity rendered as 24-hour `HH:MM` (UTC).
    pub time: String,
    pub cost: f64,
    #[serde(rename = "type")]
    pub activity_type: String,
}
