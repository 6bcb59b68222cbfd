use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::auth_context::AuthContext;
use crate::models::AppState;

#[derive(Serialize)]
pub struct HomeResponse {
    pub data: HomeData,
}

#[derive(Serialize)]
pub struct HomeData {
    pub view: String,
    pub username: String,
    pub navigation: Vec<NavItem>,
}

/// One sidebar entry.
#[derive(Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

const NAVIGATION: &[(&str, &str)] = &[
    ("Dashboard", "/"),
    ("Hospitals", "/hospitals"),
    ("Add Hospital", "/hospitals/new"),
    ("Doctors", "/doctors"),
    ("Surgeries", "/surgeries"),
    ("Categories", "/categories"),
    ("Insurance Companies", "/insurance-companies"),
    ("Cashless Insurance", "/cashless-insurance-companies"),
    ("Government Panels", "/panels"),
    ("Contacts", "/contacts"),
    ("Appointments", "/appointments"),
];

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/home", get(home))
        .route("/health", get(health))
}

pub async fn home(auth: AuthContext) -> Result<Json<HomeResponse>, ApiError> {
    Ok(Json(HomeResponse {
        data: HomeData {
            view: "admin".to_string(),
            username: auth.session.username.clone(),
            navigation: NAVIGATION
                .iter()
                .map(|&(label, path)| NavItem { label, path })
                .collect(),
        },
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
