pub mod admin;
pub mod api;
pub mod config;
pub mod contributions;
pub mod dashboard;
pub mod error;
pub mod fmt;
pub mod load;
pub mod report;
pub mod schema;
pub mod telemetry;
