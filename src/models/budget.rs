use mongodb::bson::oid::ObjectId;
use serde::Serialize;

/// Structured budget report for one trip.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    pub trip_id: Option<ObjectId>,
    pub trip_title: Option<String>,
    pub currency: String,
    pub breakdown: CostBreakdown,
    pub stop_budgets: Vec<StopBudget>,
    pub summary: BudgetSummary,
    pub alerts: Vec<BudgetAlert>,
}

/// Activity costs split across the five fixed categories.
#[derive(Debug, Serialize, Clone, Default)]
pub struct CostBreakdown {
    pub transport: f64,
    pub stay: f64,
    pub activities: f64,
    pub meals: f64,
    pub other: f64,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StopBudget {
    pub stop_id: Option<ObjectId>,
    pub city_name: String,
    pub allocated_budget: f64,
    pub actual_cost: f64,
    /// Allocated minus actual; negative means over budget.
    pub variance: f64,
    pub is_over_budget: bool,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_budget_allocated: f64,
    pub total_cost: f64,
    pub variance: f64,
    pub is_over_budget: bool,
    pub duration_days: i64,
    pub daily_average: f64,
    pub daily_budget: f64,
}

#[derive(Debug, Serialize, Clone)]
pub struct BudgetAlert {
    #[serde(rename = "type")]
    pub level: AlertLevel,
    pub message: String,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Danger,
    Warning,
}
