pub mod activity;
pub mod budget;
pub mod itinerary;
pub mod place;
pub mod stop;
pub mod trip;
pub mod user;
