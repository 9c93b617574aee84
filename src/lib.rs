#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, in-memory stores, services, authentication"]
#![doc = "mechanisms, routing configuration, and error handling for the TaskDesk API."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the application."]

pub mod app_state;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod store;

pub use crate::app_state::AppState;
pub use crate::config::Config;
pub use crate::error::AppError;
