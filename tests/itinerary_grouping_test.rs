use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson::oid::ObjectId;

use wayfarer_api::models::activity::Activity;
use wayfarer_api::models::stop::Stop;
use wayfarer_api::models::trip::{StopDetails, Trip};
use wayfarer_api::services::itinerary_service::ItineraryService;

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn trip(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Trip {
    Trip {
        id: Some(ObjectId::new()),
        user_id: ObjectId::new(),
        title: Some("Iberia loop".to_string()),
        destination: "Portugal".to_string(),
        description: None,
        start_date: start,
        end_date: end,
        budget: Some(500.0),
        currency: "USD".to_string(),
        created_at: None,
    }
}

fn stop(city: &str, start: DateTime<Utc>) -> Stop {
    Stop {
        id: Some(ObjectId::new()),
        trip_id: ObjectId::new(),
        city_name: city.to_string(),
        sequence: 1,
        start_date: start,
        end_date: start,
        budget: Some(100.0),
    }
}

fn activity(stop_id: ObjectId, cost: Option<f64>, at: DateTime<Utc>) -> Activity {
    Activity {
        id: Some(ObjectId::new()),
        stop_id,
        name: "Old town walk".to_string(),
        activity_type: "sightseeing".to_string(),
        cost,
        duration_hours: Some(2.0),
        start_datetime: at,
    }
}

#[test]
fn test_two_day_trip_buckets_stop_and_costs() {
    // One stop on day one with activities on both days: the stop shows up in
    // day one only, costs land where the activities start.
    let trip = trip(date(2026, 5, 1), Some(date(2026, 5, 2)));
    let stop = stop("Porto", date(2026, 5, 1));
    let stop_id = stop.id.unwrap();
    let details = vec![StopDetails {
        stop,
        activities: vec![
            activity(
                stop_id,
                Some(25.0),
                Utc.with_ymd_and_hms(2026, 5, 1, 10, 0, 0).unwrap(),
            ),
            activity(
                stop_id,
                Some(17.0),
                Utc.with_ymd_and_hms(2026, 5, 2, 14, 0, 0).unwrap(),
            ),
        ],
    }];

    let itinerary = ItineraryService::group_by_day(&trip, &details);

    assert_eq!(itinerary.days.len(), 2);
    assert_eq!(itinerary.days[0].day_number, 1);
    assert_eq!(itinerary.days[0].total_cost, 25.0);
    assert_eq!(itinerary.days[0].stops.len(), 1);
    assert_eq!(itinerary.days[0].stops[0].city_name, "Porto");
    assert_eq!(itinerary.days[1].day_number, 2);
    assert_eq!(itinerary.days[1].total_cost, 17.0);
    assert!(itinerary.days[1].stops.is_empty());
}

#[test]
fn test_cost_conservation_for_in_range_activities() {
    // Every activity falls inside the trip range, so the bucketed costs must
    // add up to exactly the sum of all activity costs.
    let trip = trip(date(2026, 5, 1), Some(date(2026, 5, 5)));
    let first = stop("Lisbon", date(2026, 5, 1));
    let second = stop("Faro", date(2026, 5, 3));
    let first_id = first.id.unwrap();
    let second_id = second.id.unwrap();
    let details = vec![
        StopDetails {
            stop: first,
            activities: vec![
                activity(first_id, Some(12.5), date(2026, 5, 1)),
                activity(first_id, Some(30.0), date(2026, 5, 2)),
            ],
        },
        StopDetails {
            stop: second,
            activities: vec![
                activity(second_id, Some(8.0), date(2026, 5, 3)),
                activity(second_id, None, date(2026, 5, 4)),
            ],
        },
    ];

    let itinerary = ItineraryService::group_by_day(&trip, &details);
    let bucketed: f64 = itinerary.days.iter().map(|d| d.total_cost).sum();
    assert_eq!(bucketed, 50.5);
}

#[test]
fn test_reversed_range_yields_no_days() {
    let trip = trip(date(2026, 5, 10), Some(date(2026, 5, 1)));
    let itinerary = ItineraryService::group_by_day(&trip, &[]);
    assert!(itinerary.days.is_empty());
}

#[test]
fn test_grouping_is_idempotent() {
    let trip = trip(date(2026, 5, 1), Some(date(2026, 5, 3)));
    let stop = stop("Porto", date(2026, 5, 2));
    let stop_id = stop.id.unwrap();
    let details = vec![StopDetails {
        stop,
        activities: vec![activity(
            stop_id,
            Some(40.0),
            Utc.with_ymd_and_hms(2026, 5, 2, 9, 15, 0).unwrap(),
        )],
    }];

    let first = serde_json::to_value(ItineraryService::group_by_day(&trip, &details)).unwrap();
    let second = serde_json::to_value(ItineraryService::group_by_day(&trip, &details)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_zero_stops_yield_day_skeleton() {
    let trip = trip(date(2026, 5, 1), Some(date(2026, 5, 3)));
    let itinerary = ItineraryService::group_by_day(&trip, &[]);

    assert_eq!(itinerary.days.len(), 3);
    for bucket in &itinerary.days {
        assert!(bucket.stops.is_empty());
        assert!(bucket.activities.is_empty());
        assert_eq!(bucket.total_cost, 0.0);
    }
}
