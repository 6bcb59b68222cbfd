//! Health Manthan admin dashboard.
//!
//! The library half (`client`, `services`, `wizard`, `listing`) talks to the
//! upstream Health Manthan API; the server half (`routes`, `sessions`) serves
//! the dashboard UI on top of it.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod listing;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod sessions;
pub mod wizard;

pub use models::AppState;

pub fn build_router(state: AppState) -> axum::Router {
    routes::router(state)
}
