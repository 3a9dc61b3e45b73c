use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use std::sync::Arc;

use wayfarer_api::routes;
use wayfarer_api::services::cache::ResponseCache;
use wayfarer_api::services::geo_service::GeoService;

pub struct TestApp {
    pub client: Arc<mongodb::Client>,
    geo: web::Data<GeoService>,
    cache: web::Data<ResponseCache>,
}

impl TestApp {
    pub async fn new() -> Self {
        std::env::set_var("GEOAPIFY_API_KEY", "test-api-key");

        // The client connects lazily; request-level tests that fail before
        // touching storage never need a live server behind this URI.
        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("failed to build mongo client");

        Self {
            client: Arc::new(client),
            geo: web::Data::new(GeoService::new().expect("geo service init failed")),
            cache: web::Data::new(ResponseCache::new(64)),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
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
            .app_data(web::Data::new(self.client.clone()))
            .app_data(self.geo.clone())
            .app_data(self.cache.clone())
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
                        web::scope("/activities").route(
                            "/search",
                            web::get().to(routes::activity::search_activities),
                        ),
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
    }
}
