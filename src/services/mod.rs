pub mod budget_service;
pub mod cache;
pub mod geo_service;
pub mod itinerary_service;
pub mod trip_status;
