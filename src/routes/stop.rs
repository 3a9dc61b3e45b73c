use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson};
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::activity::Activity;
use crate::models::stop::Stop;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddActivityRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub cost: Option<f64>,
    pub duration_hours: Option<f64>,
    pub start_datetime: Option<String>,
}

/*
    POST /api/stops/{stop_id}/activities
*/
pub async fn add_activity(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<AddActivityRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let stop_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid stop ID"),
    };

    let stops: mongodb::Collection<Stop> =
        client.database("TravelPlanner").collection("Stops");
    let stop = match stops.find_one(doc! { "_id": stop_id }).await {
        Ok(Some(stop)) => stop,
        Ok(None) => return HttpResponse::NotFound().body("Stop not found"),
        Err(err) => {
            eprintln!("Failed to fetch stop: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to add activity");
        }
    };

    let input = input.into_inner();
    // An activity without an explicit start time begins when its stop does.
    let start_datetime = match &input.start_datetime {
        Some(raw) => match super::parse_datetime(raw) {
            Some(datetime) => datetime,
            None => return HttpResponse::BadRequest().body("Invalid startDatetime"),
        },
        None => stop.start_date,
    };

    let mut activity = Activity {
        id: None,
        stop_id,
        name: input.name,
        activity_type: input.activity_type.unwrap_or_else(|| "general".to_string()),
        cost: input.cost,
        duration_hours: input.duration_hours,
        start_datetime,
    };

    let activities: mongodb::Collection<Activity> =
        client.database("TravelPlanner").collection("Activities");
    match activities.insert_one(&activity).await {
        Ok(result) => {
            activity.id = result.inserted_id.as_object_id();
            HttpResponse::Created().json(activity)
        }
        Err(err) => {
            eprintln!("Failed to insert activity: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to add activity")
        }
    }
}

/*
    GET /api/stops/{stop_id}/activities
*/
pub async fn get_stop_activities(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let stop_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid stop ID"),
    };

    let collection: mongodb::Collection<Activity> =
        client.database("TravelPlanner").collection("Activities");
    match collection
        .find(doc! { "stopId": stop_id })
        .sort(doc! { "startDatetime": 1 })
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<Activity>>().await {
            Ok(activities) => HttpResponse::Ok().json(activities),
            Err(err) => {
                eprintln!("Failed to collect activities: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to fetch activities")
            }
        },
        Err(err) => {
            eprintln!("Failed to find activities: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch activities")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStopBudgetRequest {
    pub budget: Option<f64>,
}

/*
    PATCH /api/stops/{stop_id}/budget
*/
pub async fn update_stop_budget(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<UpdateStopBudgetRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let stop_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid stop ID"),
    };

    let collection: mongodb::Collection<Stop> =
        client.database("TravelPlanner").collection("Stops");

    let budget = match input.budget {
        Some(amount) => Bson::Double(amount),
        None => Bson::Null,
    };
    let update = doc! { "$set": { "budget": budget } };

    match collection.update_one(doc! { "_id": stop_id }, update).await {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().body("Stop not found")
        }
        Ok(_) => match collection.find_one(doc! { "_id": stop_id }).await {
            Ok(Some(stop)) => HttpResponse::Ok().json(stop),
            Ok(None) => HttpResponse::NotFound().body("Stop not found"),
            Err(err) => {
                eprintln!("Failed to fetch updated stop: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to update stop budget")
            }
        },
        Err(err) => {
            eprintln!("Failed to update stop budget: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update stop budget")
        }
    }
}
