#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "A multi-tenant task API: users sign up, log in for a signed token, and"]
#![doc = "manage tasks that only they can see. Every task query is filtered by the"]
#![doc = "owner identity taken from the verified token."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

pub use crate::error::AppError;
pub use crate::state::AppState;
