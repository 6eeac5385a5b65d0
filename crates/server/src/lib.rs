pub mod api;
pub mod config;
pub mod error;
pub mod serve;
pub mod store_factory;
pub mod telemetry;
