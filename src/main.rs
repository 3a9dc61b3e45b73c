use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use wayfarer_api::db;
use wayfarer_api::routes;
use wayfarer_api::services::cache::ResponseCache;
use wayfarer_api::services::geo_service::GeoService;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

// Capacity of the shared response cache (geo proxy + top regions).
const RESPONSE_CACHE_CAPACITY: usize = 500;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    let geo = web::Data::new(GeoService::new().expect("GEOAPIFY_API_KEY must be set"));
    let cache = web::Data::new(ResponseCache::new(RESPONSE_CACHE_CAPACITY));

    println!("Attempting to bind to {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/health", web::get().to(|| async { "OK" }))
            .app_data(web::Data::new(client.clone()))
            .app_data(geo.clone())
            .app_data(cache.clone())
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/trips")
                            .route("/summary", web::get().to(routes::trip::trip_summary))
                            .route("", web::get().to(routes::trip::get_user_trips))
                            .route("", web::post().to(routes::trip::create_trip))
                            .route("/{trip_id}", web::get().to(routes::trip::get_trip_details))
                            .route("/{trip_id}/stops", web::post().to(routes::trip::add_stop))
                            .route(
                                "/{trip_id}/itinerary",
                                web::get().to(routes::trip::get_itinerary),
                            )
                            .route("/{trip_id}/budget", web::get().to(routes::trip::get_budget))
                            .route(
                                "/{trip_id}/totals",
                                web::get().to(routes::trip::get_trip_totals),
                            )
                            .route(
                                "/{trip_id}/reorder-stops",
                                web::patch().to(routes::trip::reorder_stops),
                            ),
                    )
                    .service(
                        web::scope("/stops")
                            .route(
                                "/{stop_id}/activities",
                                web::post().to(routes::stop::add_activity),
                            )
                            .route(
                                "/{stop_id}/activities",
                                web::get().to(routes::stop::get_stop_activities),
                            )
                            .route(
                                "/{stop_id}/budget",
                                web::patch().to(routes::stop::update_stop_budget),
                            ),
                    )
                    .service(
                        web::scope("/activities")
                            .route("/search", web::get().to(routes::activity::search_activities)),
                    )
                    .service(
                        web::scope("/places")
                            .route("/top-regions", web::get().to(routes::place::top_regions)),
                    )
                    .service(
                        web::scope("/users")
                            .route("/{id}", web::get().to(routes::user::get_profile))
                            .route("/{id}", web::patch().to(routes::user::update_profile))
                            .route("/{id}/calendar", web::get().to(routes::user::get_calendar)),
                    )
                    .service(
                        web::scope("/geo")
                            .route("/geocode", web::get().to(routes::geo::geocode))
                            .route("/reverse", web::get().to(routes::geo::reverse))
                            .route("/places", web::get().to(routes::geo::places))
                            .route("/place-details", web::get().to(routes::geo::place_details))
                            .route("/route", web::get().to(routes::geo::route)),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
