use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::place::Place;
use crate::models::stop::Stop;
use crate::models::trip::{StopDetails, Trip, TripDetails};
use crate::services::budget_service::BudgetService;
use crate::services::itinerary_service::ItineraryService;
use crate::services::trip_status::TripStatus;

/// Fetch a trip with its stops (sequence ascending) and their activities
/// (start time ascending). The ordering here is the precondition the
/// itinerary and budget services rely on.
pub(crate) async fn load_trip_details(
    client: &Client,
    trip_id: ObjectId,
) -> Result<Option<TripDetails>, mongodb::error::Error> {
    let trips: mongodb::Collection<Trip> =
        client.database("TravelPlanner").collection("Trips");
    let stops: mongodb::Collection<Stop> =
        client.database("TravelPlanner").collection("Stops");
    let activities: mongodb::Collection<crate::models::activity::Activity> =
        client.database("TravelPlanner").collection("Activities");

    let trip = match trips.find_one(doc! { "_id": trip_id }).await? {
        Some(trip) => trip,
        None => return Ok(None),
    };

    let trip_stops: Vec<Stop> = stops
        .find(doc! { "tripId": trip_id })
        .sort(doc! { "sequence": 1 })
        .await?
        .try_collect()
        .await?;

    let mut details = Vec::with_capacity(trip_stops.len());
    for stop in trip_stops {
        let stop_activities = match stop.id {
            Some(stop_id) => {
                activities
                    .find(doc! { "stopId": stop_id })
                    .sort(doc! { "startDatetime": 1 })
                    .await?
                    .try_collect()
                    .await?
            }
            None => Vec::new(),
        };
        details.push(StopDetails {
            stop,
            activities: stop_activities,
        });
    }

    Ok(Some(TripDetails {
        trip,
        stops: details,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub user_id: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
}

/*
    POST /api/trips
*/
pub async fn create_trip(
    data: web::Data<Arc<Client>>,
    input: web::Json<CreateTripRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Trip> =
        client.database("TravelPlanner").collection("Trips");

    let input = input.into_inner();
    let user_id = match ObjectId::parse_str(&input.user_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };
    let start_date = match super::parse_datetime(&input.start_date) {
        Some(date) => date,
        None => return HttpResponse::BadRequest().body("Invalid startDate"),
    };
    let end_date = match &input.end_date {
        Some(raw) => match super::parse_datetime(raw) {
            Some(date) => Some(date),
            None => return HttpResponse::BadRequest().body("Invalid endDate"),
        },
        None => None,
    };

    let mut trip = Trip {
        id: None,
        user_id,
        title: input.title,
        destination: input.destination,
        description: input.description,
        start_date,
        end_date,
        budget: input.budget,
        currency: input.currency.unwrap_or_else(|| "USD".to_string()),
        created_at: Some(Utc::now()),
    };

    match collection.insert_one(&trip).await {
        Ok(result) => {
            trip.id = result.inserted_id.as_object_id();
            HttpResponse::Created().json(trip)
        }
        Err(err) => {
            eprintln!("Failed to insert trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create trip")
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripListParams {
    user_id: Option<String>,
    status: Option<String>,
    page: Option<i64>,
    limit: Option<i64>,
}

#[derive(Debug, Serialize)]
struct TripListEntry {
    #[serde(flatten)]
    trip: Trip,
    status: TripStatus,
    stops: Vec<Stop>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    page: i64,
    limit: i64,
    total: i64,
    total_pages: i64,
}

#[derive(Debug, Serialize)]
struct TripListResponse {
    trips: Vec<TripListEntry>,
    pagination: Pagination,
}

/*
    GET /api/trips?userId=&status=&page=&limit=
*/
pub async fn get_user_trips(
    data: web::Data<Arc<Client>>,
    params: web::Query<TripListParams>,
) -> impl Responder {
    let client = data.into_inner();
    let trips: mongodb::Collection<Trip> =
        client.database("TravelPlanner").collection("Trips");
    let stops: mongodb::Collection<Stop> =
        client.database("TravelPlanner").collection("Stops");

    let user_id = match params.user_id.as_deref().map(ObjectId::parse_str) {
        Some(Ok(id)) => id,
        Some(Err(_)) => return HttpResponse::BadRequest().body("Invalid user ID"),
        None => return HttpResponse::BadRequest().body("userId is required"),
    };

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(10).max(1);
    // Unknown status values mean "no filter", matching the allow-list check
    // clients already depend on.
    let status_filter = params.status.as_deref().and_then(TripStatus::parse);

    let all_trips: Vec<Trip> = match trips
        .find(doc! { "userId": user_id })
        .sort(doc! { "startDate": -1 })
        .await
    {
        Ok(cursor) => match cursor.try_collect().await {
            Ok(trips) => trips,
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                return HttpResponse::InternalServerError().body("Failed to fetch trips");
            }
        },
        Err(err) => {
            eprintln!("Failed to find trips: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch trips");
        }
    };

    // One classification instant for the whole listing.
    let now = Utc::now();
    let mut entries = Vec::with_capacity(all_trips.len());
    for trip in all_trips {
        let status = TripStatus::classify(now, trip.start_date, trip.end_date);
        if let Some(wanted) = status_filter {
            if status != wanted {
                continue;
            }
        }

        let trip_stops: Vec<Stop> = match trip.id {
            Some(trip_id) => {
                match stops
                    .find(doc! { "tripId": trip_id })
                    .sort(doc! { "sequence": 1 })
                    .await
                {
                    Ok(cursor) => cursor.try_collect().await.unwrap_or_default(),
                    Err(err) => {
                        eprintln!("Failed to find stops: {:?}", err);
                        return HttpResponse::InternalServerError().body("Failed to fetch trips");
                    }
                }
            }
            None => Vec::new(),
        };

        entries.push(TripListEntry {
            trip,
            status,
            stops: trip_stops,
        });
    }

    let total = entries.len() as i64;
    let skip = ((page - 1) * limit) as usize;
    let paginated: Vec<TripListEntry> = entries
        .into_iter()
        .skip(skip)
        .take(limit as usize)
        .collect();

    HttpResponse::Ok().json(TripListResponse {
        trips: paginated,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: (total + limit - 1) / limit,
        },
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryParams {
    user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetStats {
    total_allocated: f64,
    trip_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TripSummaryResponse {
    recent_trips: Vec<Trip>,
    recommended_places: Vec<Place>,
    budget_stats: BudgetStats,
}

/*
    GET /api/trips/summary?userId=
*/
pub async fn trip_summary(
    data: web::Data<Arc<Client>>,
    params: web::Query<SummaryParams>,
) -> impl Responder {
    let client = data.into_inner();
    let trips: mongodb::Collection<Trip> =
        client.database("TravelPlanner").collection("Trips");
    let places: mongodb::Collection<Place> =
        client.database("TravelPlanner").collection("Places");

    let user_id = match params.user_id.as_deref().map(ObjectId::parse_str) {
        Some(Ok(id)) => id,
        Some(Err(_)) => return HttpResponse::BadRequest().body("Invalid user ID"),
        None => return HttpResponse::BadRequest().body("userId is required"),
    };

    let recent_trips: Vec<Trip> = match trips
        .find(doc! { "userId": user_id })
        .sort(doc! { "createdAt": -1 })
        .limit(3)
        .await
    {
        Ok(cursor) => cursor.try_collect().await.unwrap_or_default(),
        Err(err) => {
            eprintln!("Failed to find recent trips: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch trip summary");
        }
    };

    let recommended_places: Vec<Place> = match places
        .find(doc! {})
        .sort(doc! { "rating": -1 })
        .limit(5)
        .await
    {
        Ok(cursor) => cursor.try_collect().await.unwrap_or_default(),
        Err(err) => {
            eprintln!("Failed to find recommended places: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch trip summary");
        }
    };

    let total_allocated = recent_trips.iter().filter_map(|t| t.budget).sum();

    HttpResponse::Ok().json(TripSummaryResponse {
        budget_stats: BudgetStats {
            total_allocated,
            trip_count: recent_trips.len(),
        },
        recent_trips,
        recommended_places,
    })
}

/*
    GET /api/trips/{trip_id}
*/
pub async fn get_trip_details(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let trip_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid trip ID"),
    };

    match load_trip_details(&client, trip_id).await {
        Ok(Some(details)) => HttpResponse::Ok().json(details),
        Ok(None) => HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch trip details")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ItineraryParams {
    view: Option<String>,
}

/*
    GET /api/trips/{trip_id}/itinerary?view=daywise
*/
pub async fn get_itinerary(
    path: web::Path<String>,
    params: web::Query<ItineraryParams>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let trip_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid trip ID"),
    };

    let details = match load_trip_details(&client, trip_id).await {
        Ok(Some(details)) => details,
        Ok(None) => return HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch itinerary");
        }
    };

    if params.view.as_deref() == Some("daywise") {
        let itinerary = ItineraryService::group_by_day(&details.trip, &details.stops);
        return HttpResponse::Ok().json(itinerary);
    }

    // Default: the raw trip with nested stops and activities.
    HttpResponse::Ok().json(details)
}

/*
    GET /api/trips/{trip_id}/budget
*/
pub async fn get_budget(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let trip_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid trip ID"),
    };

    match load_trip_details(&client, trip_id).await {
        Ok(Some(details)) => {
            let report = BudgetService::compute(&details.trip, &details.stops);
            HttpResponse::Ok().json(report)
        }
        Ok(None) => HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch trip budget")
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TripTotals {
    total_budget: f64,
    total_activity_cost: f64,
    total_days: i64,
    stop_count: usize,
}

/*
    GET /api/trips/{trip_id}/totals
*/
pub async fn get_trip_totals(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let trip_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid trip ID"),
    };

    match load_trip_details(&client, trip_id).await {
        Ok(Some(details)) => {
            let total_budget = details
                .stops
                .iter()
                .filter_map(|s| s.stop.budget)
                .sum();
            let total_activity_cost = details
                .stops
                .iter()
                .flat_map(|s| &s.activities)
                .filter_map(|a| a.cost)
                .sum();
            let total_days = details
                .stops
                .iter()
                .map(|s| BudgetService::inclusive_day_span(s.stop.start_date, s.stop.end_date))
                .sum();

            HttpResponse::Ok().json(TripTotals {
                total_budget,
                total_activity_cost,
                total_days,
                stop_count: details.stops.len(),
            })
        }
        Ok(None) => HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch trip totals")
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderStopsRequest {
    stop_ids: Vec<String>,
}

/*
    PATCH /api/trips/{trip_id}/reorder-stops
*/
pub async fn reorder_stops(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<ReorderStopsRequest>,
) -> impl Responder {
    let client = data.into_inner();
    if ObjectId::parse_str(path.into_inner().as_str()).is_err() {
        return HttpResponse::BadRequest().body("Invalid trip ID");
    }

    let mut stop_ids = Vec::with_capacity(input.stop_ids.len());
    for raw in &input.stop_ids {
        match ObjectId::parse_str(raw) {
            Ok(id) => stop_ids.push(id),
            Err(_) => return HttpResponse::BadRequest().body("Invalid stop ID"),
        }
    }

    let collection: mongodb::Collection<Stop> =
        client.database("TravelPlanner").collection("Stops");

    // Sequences are rewritten wholesale to index + 1; gaps and duplicates in
    // the old values do not matter.
    for (index, stop_id) in stop_ids.iter().enumerate() {
        let update = doc! { "$set": { "sequence": index as i32 + 1 } };
        if let Err(err) = collection.update_one(doc! { "_id": *stop_id }, update).await {
            eprintln!("Failed to update stop sequence: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to reorder stops");
        }
    }

    HttpResponse::Ok().json(serde_json::json!({ "message": "Stops reordered successfully" }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStopRequest {
    pub city_name: String,
    pub sequence: Option<i32>,
    pub start_date: String,
    pub end_date: String,
    pub budget: Option<f64>,
}

/*
    POST /api/trips/{trip_id}/stops
*/
pub async fn add_stop(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<AddStopRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let trip_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid trip ID"),
    };

    let input = input.into_inner();
    let start_date = match super::parse_datetime(&input.start_date) {
        Some(date) => date,
        None => return HttpResponse::BadRequest().body("Invalid startDate"),
    };
    let end_date = match super::parse_datetime(&input.end_date) {
        Some(date) => date,
        None => return HttpResponse::BadRequest().body("Invalid endDate"),
    };

    let mut stop = Stop {
        id: None,
        trip_id,
        city_name: input.city_name,
        sequence: input.sequence.unwrap_or(1),
        start_date,
        end_date,
        budget: input.budget,
    };

    let collection: mongodb::Collection<Stop> =
        client.database("TravelPlanner").collection("Stops");
    match collection.insert_one(&stop).await {
        Ok(result) => {
            stop.id = result.inserted_id.as_object_id();
            HttpResponse::Created().json(stop)
        }
        Err(err) => {
            eprintln!("Failed to insert stop: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to add stop")
        }
    }
}
