pub mod trip_store;
