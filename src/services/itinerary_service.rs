use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::itinerary::{DayActivity, DayBucket, DayStop, DaywiseItinerary};
use crate::models::trip::{StopDetails, Trip};

/// Hard cap on enumerated days. Bounds the response size against malformed
/// date ranges; days beyond the cap are silently dropped, which downstream
/// consumers rely on.
pub const MAX_ITINERARY_DAYS: usize = 60;

pub struct ItineraryService;

impl ItineraryService {
    /// Transform a trip and its ordered stops/activities into day buckets
    /// spanning the trip's date range.
    ///
    /// Stops are attached to the bucket of their start date only; they are
    /// not replicated across the days they span. Activities land in the
    /// bucket matching the calendar day (UTC) of their start timestamp and
    /// accumulate into that bucket's `totalCost`. Anything dated outside the
    /// enumerated range is dropped without error. A trip whose end date
    /// precedes its start date yields zero days.
    pub fn group_by_day(trip: &Trip, stops: &[StopDetails]) -> DaywiseItinerary {
        let mut days: Vec<DayBucket> = Vec::new();
        let mut index: HashMap<NaiveDate, usize> = HashMap::new();

        let mut current = trip.start_date.date_naive();
        let end = trip.effective_end_date().date_naive();

        while current <= end && days.len() < MAX_ITINERARY_DAYS {
            index.insert(current, days.len());
            days.push(DayBucket {
                date: current,
                day_number: days.len() as u32 + 1,
                stops: Vec::new(),
                activities: Vec::new(),
                total_cost: 0.0,
            });
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }

        for detail in stops {
            if let Some(&slot) = index.get(&detail.stop.start_date.date_naive()) {
                days[slot].stops.push(DayStop {
                    id: detail.stop.id,
                    city_name: detail.stop.city_name.clone(),
                    budget: detail.stop.budget,
                });
            }

            for activity in &detail.activities {
                if let Some(&slot) = index.get(&activity.start_datetime.date_naive()) {
                    let cost = activity.cost.unwrap_or(0.0);
                    days[slot].activities.push(DayActivity {
                        id: activity.id,
                        name: activity.name.clone(),
                        time: activity.start_datetime.format("%H:%M").to_string(),
                        cost,
                        activity_type: activity.activity_type.clone(),
                    });
                    days[slot].total_cost += cost;
                }
            }
        }

        DaywiseItinerary {
            trip_id: trip.id,
            title: trip.title.clone(),
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use mongodb::bson::oid::ObjectId;

    use crate::models::activity::Activity;
    use crate::models::stop::Stop;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, d, 0, 0, 0).unwrap()
    }

    fn trip(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Trip {
        Trip {
            id: Some(ObjectId::new()),
            user_id: ObjectId::new(),
            title: Some("Test trip".to_string()),
            destination: "Testland".to_string(),
            description: None,
            start_date: start,
            end_date: end,
            budget: None,
            currency: "USD".to_string(),
            created_at: None,
        }
    }

    fn stop_with_activities(start: DateTime<Utc>, costs: &[(f64, u32)]) -> StopDetails {
        let stop_id = ObjectId::new();
        let activities = costs
            .iter()
            .map(|&(cost, d)| Activity {
                id: Some(ObjectId::new()),
                stop_id,
                name: "Thing".to_string(),
                activity_type: "sightseeing".to_string(),
                cost: Some(cost),
                duration_hours: None,
                start_datetime: Utc.with_ymd_and_hms(2026, 5, d, 9, 30, 0).unwrap(),
            })
            .collect();
        StopDetails {
            stop: Stop {
                id: Some(stop_id),
                trip_id: ObjectId::new(),
                city_name: "Lisbon".to_string(),
                sequence: 1,
                start_date: start,
                end_date: start,
                budget: Some(50.0),
            },
            activities,
        }
    }

    #[test]
    fn test_buckets_span_range_with_sequential_day_numbers() {
        let itinerary = ItineraryService::group_by_day(&trip(day(1), Some(day(4))), &[]);
        assert_eq!(itinerary.days.len(), 4);
        for (i, bucket) in itinerary.days.iter().enumerate() {
            assert_eq!(bucket.day_number as usize, i + 1);
            assert!(bucket.stops.is_empty());
            assert!(bucket.activities.is_empty());
            assert_eq!(bucket.total_cost, 0.0);
        }
    }

    #[test]
    fn test_missing_end_date_yields_single_day() {
        let itinerary = ItineraryService::group_by_day(&trip(day(1), None), &[]);
        assert_eq!(itinerary.days.len(), 1);
    }

    #[test]
    fn test_end_before_start_collapses_to_empty() {
        let itinerary = ItineraryService::group_by_day(&trip(day(5), Some(day(1))), &[]);
        assert!(itinerary.days.is_empty());
    }

    #[test]
    fn test_stop_attached_to_start_day_only() {
        let mut detail = stop_with_activities(day(1), &[]);
        detail.stop.end_date = day(3);
        let itinerary =
            ItineraryService::group_by_day(&trip(day(1), Some(day(3))), &[detail]);
        assert_eq!(itinerary.days[0].stops.len(), 1);
        assert!(itinerary.days[1].stops.is_empty());
        assert!(itinerary.days[2].stops.is_empty());
    }

    #[test]
    fn test_activities_bucketed_by_start_day_with_costs() {
        let detail = stop_with_activities(day(1), &[(25.0, 1), (17.0, 2)]);
        let itinerary =
            ItineraryService::group_by_day(&trip(day(1), Some(day(2))), &[detail]);
        assert_eq!(itinerary.days.len(), 2);
        assert_eq!(itinerary.days[0].total_cost, 25.0);
        assert_eq!(itinerary.days[1].total_cost, 17.0);
        assert_eq!(itinerary.days[0].activities[0].time, "09:30");
    }

    #[test]
    fn test_out_of_range_items_are_dropped() {
        // Stop starts before the trip, one activity lands after it.
        let detail = stop_with_activities(day(1), &[(10.0, 3), (99.0, 20)]);
        let itinerary =
            ItineraryService::group_by_day(&trip(day(2), Some(day(4))), &[detail]);
        assert!(itinerary.days.iter().all(|d| d.stops.is_empty()));
        let total: f64 = itinerary.days.iter().map(|d| d.total_cost).sum();
        assert_eq!(total, 10.0);
    }

    #[test]
    fn test_day_enumeration_caps_at_sixty() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 31, 0, 0, 0).unwrap();
        let itinerary = ItineraryService::group_by_day(&trip(start, Some(end)), &[]);
        assert_eq!(itinerary.days.len(), MAX_ITINERARY_DAYS);
        assert_eq!(itinerary.days[59].day_number, 60);
    }
}
