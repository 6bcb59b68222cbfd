use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::models::AppState;

/// Any 401 on an authenticated request drops the caller's dashboard session,
/// wizard draft included. The browser then follows the login redirect.
pub async fn teardown_on_unauthorized(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|authz| authz.token().to_string());

    let resp = next.run(req).await;

    if resp.status() == StatusCode::UNAUTHORIZED {
        if let Some(token) = token {
            if state.sessions.remove(&token).await {
                tracing::info!("dashboard session torn down after 401");
            }
        }
    }
    resp
}
