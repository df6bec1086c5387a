pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod observability;
pub mod pricing;
pub mod state;
pub mod store;
