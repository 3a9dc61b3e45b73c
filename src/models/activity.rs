use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub stop_id: ObjectId,
    pub name: String,
    /// Free-text category tag ("sightseeing", "food", ...); the budget
    /// aggregator buckets costs by substring-matching this field.
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub duration_hours: Option<f64>,
    pub start_datetime: DateTime<Utc>,
}
