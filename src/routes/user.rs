use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::trip::Trip;
use crate::models::user::User;

/*
    GET /api/users/{id}
*/
pub async fn get_profile(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let user_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    let collection: mongodb::Collection<User> =
        client.database("TravelPlanner").collection("Users");
    match collection.find_one(doc! { "_id": user_id }).await {
        // The password hash is skipped during serialization.
        Ok(Some(user)) => HttpResponse::Ok().json(user),
        Ok(None) => HttpResponse::NotFound().body("User not found"),
        Err(err) => {
            eprintln!("Failed to fetch user: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch user profile")
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/*
    PATCH /api/users/{id}
*/
pub async fn update_profile(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let user_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    // Only the fields present in the request are rewritten.
    let input = input.into_inner();
    let mut fields = Document::new();
    if let Some(first_name) = input.first_name {
        fields.insert("firstName", first_name);
    }
    if let Some(last_name) = input.last_name {
        fields.insert("lastName", last_name);
    }
    if let Some(phone) = input.phone {
        fields.insert("phone", phone);
    }
    if let Some(city) = input.city {
        fields.insert("city", city);
    }
    if let Some(country) = input.country {
        fields.insert("country", country);
    }
    if fields.is_empty() {
        return HttpResponse::BadRequest().body("No fields to update");
    }

    let collection: mongodb::Collection<User> =
        client.database("TravelPlanner").collection("Users");
    match collection
        .update_one(doc! { "_id": user_id }, doc! { "$set": fields })
        .await
    {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().body("User not found")
        }
        Ok(_) => match collection.find_one(doc! { "_id": user_id }).await {
            Ok(Some(user)) => HttpResponse::Ok().json(user),
            Ok(None) => HttpResponse::NotFound().body("User not found"),
            Err(err) => {
                eprintln!("Failed to fetch updated user: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to update user profile")
            }
        },
        Err(err) => {
            eprintln!("Failed to update user profile: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update user profile")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalendarResource {
    destination: String,
    budget: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalendarEvent {
    id: Option<ObjectId>,
    title: String,
    start: chrono::DateTime<chrono::Utc>,
    end: chrono::DateTime<chrono::Utc>,
    all_day: bool,
    resource: CalendarResource,
}

/*
    GET /api/users/{id}/calendar?from=&to=
*/
pub async fn get_calendar(
    path: web::Path<String>,
    params: web::Query<CalendarParams>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let user_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid user ID"),
    };

    let mut date_filter = Document::new();
    if let Some(raw) = &params.from {
        match super::parse_datetime(raw).map(|dt| mongodb::bson::to_bson(&dt)) {
            Some(Ok(value)) => {
                date_filter.insert("$gte", value);
            }
            _ => return HttpResponse::BadRequest().body("Invalid from date"),
        }
    }
    if let Some(raw) = &params.to {
        match super::parse_datetime(raw).map(|dt| mongodb::bson::to_bson(&dt)) {
            Some(Ok(value)) => {
                date_filter.insert("$lte", value);
            }
            _ => return HttpResponse::BadRequest().body("Invalid to date"),
        }
    }

    let mut filter = doc! { "userId": user_id };
    if !date_filter.is_empty() {
        filter.insert("startDate", Bson::Document(date_filter));
    }

    let collection: mongodb::Collection<Trip> =
        client.database("TravelPlanner").collection("Trips");
    let trips: Vec<Trip> = match collection.find(filter).await {
        Ok(cursor) => match cursor.try_collect().await {
            Ok(trips) => trips,
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                return HttpResponse::InternalServerError().body("Failed to fetch user calendar");
            }
        },
        Err(err) => {
            eprintln!("Failed to find trips: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch user calendar");
        }
    };

    let events: Vec<CalendarEvent> = trips
        .into_iter()
        .map(|trip| CalendarEvent {
            id: trip.id,
            title: trip
                .title
                .clone()
                .unwrap_or_else(|| format!("Trip to {}", trip.destination)),
            start: trip.start_date,
            end: trip.effective_end_date(),
            all_day: true,
            resource: CalendarResource {
                destination: trip.destination,
                budget: trip.budget,
            },
        })
        .collect();

    HttpResponse::Ok().json(events)
}
