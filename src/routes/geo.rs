use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::services::cache::ResponseCache;
use crate::services::geo_service::{normalize_geocode, normalize_poi, GeoService};

const GEOCODE_TTL: Duration = Duration::from_secs(5 * 60);
const REVERSE_TTL: Duration = Duration::from_secs(10 * 60);
const PLACES_TTL: Duration = Duration::from_secs(10 * 60);
const PLACE_DETAILS_TTL: Duration = Duration::from_secs(60 * 60);

const MAX_RESULT_LIMIT: u32 = 50;

fn cache_key(req: &HttpRequest) -> String {
    req.uri().to_string()
}

#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    q: Option<String>,
    limit: Option<u32>,
}

/*
    GET /api/geo/geocode?q=&limit=
*/
pub async fn geocode(
    req: HttpRequest,
    params: web::Query<GeocodeParams>,
    geo: web::Data<GeoService>,
    cache: web::Data<ResponseCache>,
) -> impl Responder {
    let query = match params.q.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => return HttpResponse::BadRequest().body("q is required"),
    };

    let key = cache_key(&req);
    if let Some(cached) = cache.get(&key) {
        return HttpResponse::Ok().json(cached);
    }

    let limit = params.limit.unwrap_or(5).min(MAX_RESULT_LIMIT);
    match geo.geocode(query, limit).await {
        Ok(data) => {
            let results: Vec<Value> = data["features"]
                .as_array()
                .map(|features| features.iter().map(normalize_geocode).collect())
                .unwrap_or_default();
            let body = Value::Array(results);
            cache.set(key, body.clone(), GEOCODE_TTL);
            HttpResponse::Ok().json(body)
        }
        Err(err) => {
            eprintln!("Geocoding request failed: {:?}", err);
            HttpResponse::BadGateway().body("Geocoding service unavailable")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReverseParams {
    lat: Option<f64>,
    lon: Option<f64>,
}

/*
    GET /api/geo/reverse?lat=&lon=
*/
pub async fn reverse(
    req: HttpRequest,
    params: web::Query<ReverseParams>,
    geo: web::Data<GeoService>,
    cache: web::Data<ResponseCache>,
) -> impl Responder {
    let (lat, lon) = match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return HttpResponse::BadRequest().body("lat, lon required"),
    };

    let key = cache_key(&req);
    if let Some(cached) = cache.get(&key) {
        return HttpResponse::Ok().json(cached);
    }

    match geo.reverse(lat, lon).await {
        Ok(data) => {
            let body = data["features"]
                .as_array()
                .and_then(|features| features.first())
                .map(normalize_geocode)
                .unwrap_or(Value::Null);
            cache.set(key, body.clone(), REVERSE_TTL);
            HttpResponse::Ok().json(body)
        }
        Err(err) => {
            eprintln!("Reverse geocoding request failed: {:?}", err);
            HttpResponse::BadGateway().body("Geocoding service unavailable")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlacesParams {
    q: Option<String>,
    categories: Option<String>,
    bias: Option<String>,
    limit: Option<u32>,
}

/*
    GET /api/geo/places?q=&categories=&bias=&limit=
*/
pub async fn places(
    req: HttpRequest,
    params: web::Query<PlacesParams>,
    geo: web::Data<GeoService>,
    cache: web::Data<ResponseCache>,
) -> impl Responder {
    let key = cache_key(&req);
    if let Some(cached) = cache.get(&key) {
        return HttpResponse::Ok().json(cached);
    }

    let limit = params.limit.unwrap_or(10).min(MAX_RESULT_LIMIT);
    let mut query = Vec::new();
    if let Some(q) = &params.q {
        query.push(("text", q.clone()));
    }
    if let Some(categories) = &params.categories {
        query.push(("categories", categories.clone()));
    }
    if let Some(bias) = &params.bias {
        query.push(("bias", bias.clone()));
    }
    query.push(("limit", limit.to_string()));

    match geo.places(&query).await {
        Ok(data) => {
            let results: Vec<Value> = data["features"]
                .as_array()
                .map(|features| features.iter().map(normalize_poi).collect())
                .unwrap_or_default();
            let body = Value::Array(results);
            cache.set(key, body.clone(), PLACES_TTL);
            HttpResponse::Ok().json(body)
        }
        Err(err) => {
            eprintln!("Places request failed: {:?}", err);
            HttpResponse::BadGateway().body("Places service unavailable")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaceDetailsParams {
    place_id: Option<String>,
}

/*
    GET /api/geo/place-details?place_id=
*/
pub async fn place_details(
    req: HttpRequest,
    params: web::Query<PlaceDetailsParams>,
    geo: web::Data<GeoService>,
    cache: web::Data<ResponseCache>,
) -> impl Responder {
    let place_id = match params.place_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return HttpResponse::BadRequest().body("place_id required"),
    };

    let key = cache_key(&req);
    if let Some(cached) = cache.get(&key) {
        return HttpResponse::Ok().json(cached);
    }

    match geo.places(&[("id", place_id.to_string())]).await {
        Ok(data) => {
            let body = data["features"]
                .as_array()
                .and_then(|features| features.first())
                .cloned()
                .unwrap_or(Value::Null);
            cache.set(key, body.clone(), PLACE_DETAILS_TTL);
            HttpResponse::Ok().json(body)
        }
        Err(err) => {
            eprintln!("Place details request failed: {:?}", err);
            HttpResponse::BadGateway().body("Places service unavailable")
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteParams {
    src_lat: Option<f64>,
    src_lon: Option<f64>,
    dst_lat: Option<f64>,
    dst_lon: Option<f64>,
    profile: Option<String>,
}

/*
    GET /api/geo/route?srcLat=&srcLon=&dstLat=&dstLon=&profile=
*/
pub async fn route(
    params: web::Query<RouteParams>,
    geo: web::Data<GeoService>,
) -> impl Responder {
    let (src_lat, src_lon, dst_lat, dst_lon) = match (
        params.src_lat,
        params.src_lon,
        params.dst_lat,
        params.dst_lon,
    ) {
        (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
        _ => return HttpResponse::BadRequest().body("Invalid coordinates"),
    };

    let profile = params.profile.as_deref().unwrap_or("car");
    let waypoints = format!("{},{}|{},{}", src_lat, src_lon, dst_lat, dst_lon);

    match geo.route(&waypoints, profile).await {
        Ok(data) => {
            let feature = &data["features"][0];
            HttpResponse::Ok().json(serde_json::json!({
                "distance": feature["properties"]["distance"],
                "time": feature["properties"]["time"],
                "polyline": feature["geometry"],
            }))
        }
        Err(err) => {
            eprintln!("Routing request failed: {:?}", err);
            HttpResponse::BadGateway().body("Routing service unavailable")
        }
    }
}
