use actix_web::{web, HttpRequest, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::models::place::Place;
use crate::services::cache::ResponseCache;

const TOP_REGIONS_TTL: Duration = Duration::from_secs(12 * 60 * 60);
const FALLBACK_IMAGE: &str = "https://via.placeholder.com/300?text=Region";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegionSummary {
    name: String,
    place_count: i64,
    image_url: String,
}

/*
    GET /api/places/top-regions
*/
pub async fn top_regions(
    req: HttpRequest,
    data: web::Data<Arc<Client>>,
    cache: web::Data<ResponseCache>,
) -> impl Responder {
    let cache_key = req.path().to_string();
    if let Some(cached) = cache.get(&cache_key) {
        return HttpResponse::Ok().json(cached);
    }

    let client = data.into_inner();
    let collection: mongodb::Collection<Place> =
        client.database("TravelPlanner").collection("Places");

    let pipeline = vec![
        doc! { "$group": { "_id": "$region", "count": { "$sum": 1 } } },
        doc! { "$sort": { "count": -1 } },
        doc! { "$limit": 9 },
    ];

    let groups: Vec<Document> = match collection.aggregate(pipeline).await {
        Ok(cursor) => match cursor.try_collect().await {
            Ok(groups) => groups,
            Err(err) => {
                eprintln!("Failed to collect region groups: {:?}", err);
                return HttpResponse::InternalServerError().body("Failed to fetch top regions");
            }
        },
        Err(err) => {
            eprintln!("Failed to aggregate regions: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to fetch top regions");
        }
    };

    let mut regions = Vec::with_capacity(groups.len());
    for group in groups {
        let name = group.get_str("_id").unwrap_or_default().to_string();
        let place_count = group
            .get_i32("count")
            .map(i64::from)
            .or_else(|_| group.get_i64("count"))
            .unwrap_or(0);

        // One representative image per region.
        let image_url = match collection.find_one(doc! { "region": &name }).await {
            Ok(sample) => sample
                .and_then(|place| place.image_url)
                .unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
            Err(err) => {
                eprintln!("Failed to fetch sample place: {:?}", err);
                FALLBACK_IMAGE.to_string()
            }
        };

        regions.push(RegionSummary {
            name,
            place_count,
            image_url,
        });
    }

    match serde_json::to_value(&regions) {
        Ok(value) => {
            cache.set(cache_key, value.clone(), TOP_REGIONS_TTL);
            HttpResponse::Ok().json(value)
        }
        Err(err) => {
            eprintln!("Failed to serialize top regions: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch top regions")
        }
    }
}
