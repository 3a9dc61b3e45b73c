use chrono::{DateTime, Utc};

use crate::models::budget::{
    AlertLevel, BudgetAlert, BudgetReport, BudgetSummary, CostBreakdown, StopBudget,
};
use crate::models::trip::{StopDetails, Trip};

/// The five cost buckets every activity cost lands in, exactly one each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostCategory {
    Transport,
    Stay,
    Meals,
    Activities,
    Other,
}

pub struct BudgetService;

impl BudgetService {
    /// Categorize a free-text activity type by case-insensitive substring
    /// match. Rules are tested in a fixed priority order and the first match
    /// wins, so a type like "food tour" lands in meals, not activities. The
    /// order is a published contract; do not reorder.
    pub fn categorize(activity_type: &str) -> CostCategory {
        let t = activity_type.to_lowercase();
        if t.contains("transport") || t.contains("travel") {
            CostCategory::Transport
        } else if t.contains("hotel") || t.contains("stay") || t.contains("accommodation") {
            CostCategory::Stay
        } else if t.contains("food") || t.contains("restaurant") || t.contains("meal") {
            CostCategory::Meals
        } else if t.contains("activity")
            || t.contains("tour")
            || t.contains("sightseeing")
            || t.contains("culture")
            || t.contains("entertainment")
            || t.contains("nature")
        {
            CostCategory::Activities
        } else {
            CostCategory::Other
        }
    }

    /// Inclusive day count of a date range: ceil of the elapsed time in days,
    /// plus one. A same-instant range counts as one day.
    pub fn inclusive_day_span(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
        let elapsed = (end - start).num_seconds() as f64 / 86_400.0;
        elapsed.ceil() as i64 + 1
    }

    /// Compute the budget report for one trip over an already-fetched
    /// snapshot of its stops and activities. Missing costs and budgets count
    /// as zero; the aggregator never fails on incomplete data.
    pub fn compute(trip: &Trip, stops: &[StopDetails]) -> BudgetReport {
        let mut breakdown = CostBreakdown::default();
        let mut stop_budgets = Vec::with_capacity(stops.len());
        let mut total_cost = 0.0;

        for detail in stops {
            let mut stop_cost = 0.0;

            for activity in &detail.activities {
                let cost = activity.cost.unwrap_or(0.0);
                total_cost += cost;
                stop_cost += cost;

                match Self::categorize(&activity.activity_type) {
                    CostCategory::Transport => breakdown.transport += cost,
                    CostCategory::Stay => breakdown.stay += cost,
                    CostCategory::Meals => breakdown.meals += cost,
                    CostCategory::Activities => breakdown.activities += cost,
                    CostCategory::Other => breakdown.other += cost,
                }
            }

            let allocated = detail.stop.budget.unwrap_or(0.0);
            stop_budgets.push(StopBudget {
                stop_id: detail.stop.id,
                city_name: detail.stop.city_name.clone(),
                allocated_budget: allocated,
                actual_cost: stop_cost,
                variance: allocated - stop_cost,
                is_over_budget: stop_cost > allocated,
            });
        }

        let total_budget_allocated = trip.budget.unwrap_or(0.0);
        let variance = total_budget_allocated - total_cost;
        let duration_days =
            Self::inclusive_day_span(trip.start_date, trip.effective_end_date());
        let daily_average = total_cost / duration_days as f64;
        let daily_budget = total_budget_allocated / duration_days as f64;

        let mut alerts = Vec::new();
        if total_cost > total_budget_allocated {
            alerts.push(BudgetAlert {
                level: AlertLevel::Danger,
                message: format!(
                    "Total cost exceeds budget by {:.2} {}",
                    variance.abs(),
                    trip.currency
                ),
            });
        }
        if daily_average > daily_budget {
            alerts.push(BudgetAlert {
                level: AlertLevel::Warning,
                message: format!(
                    "Daily average ({:.2}) exceeds daily budget ({:.2})",
                    daily_average, daily_budget
                ),
            });
        }
        for stop in &stop_budgets {
            if stop.is_over_budget {
                alerts.push(BudgetAlert {
                    level: AlertLevel::Warning,
                    message: format!(
                        "{} exceeded budget by {:.2}",
                        stop.city_name,
                        stop.variance.abs()
                    ),
                });
            }
        }

        BudgetReport {
            trip_id: trip.id,
            trip_title: trip.title.clone(),
            currency: trip.currency.clone(),
            breakdown,
            stop_budgets,
            summary: BudgetSummary {
                total_budget_allocated,
                total_cost,
                variance,
                is_over_budget: total_cost > total_budget_allocated,
                duration_days,
                daily_average,
                daily_budget,
            },
            alerts,
        }
    }
}
