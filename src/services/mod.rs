pub mod destination_service;
pub mod picture_service;
pub mod trip_service;
pub mod upstream;
pub mod weather_service;
