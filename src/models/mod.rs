pub mod api;
pub mod destination;
pub mod picture;
pub mod trip;
pub mod weather;
