use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    client::{ApiClient, ClientError, Session},
    error::ApiError,
    middleware::auth_context::AuthContext,
    models::*,
    services,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/logout", post(logout))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "VALIDATION_ERROR",
            "username and password are required".into(),
        ));
    }

    // Fresh upstream session per login; nothing is shared between admins.
    let session = Session::new();
    let client = ApiClient::with_http(
        state.http.clone(),
        &state.config.api_base_url,
        session.clone(),
    );

    let upstream_req = services::auth::LoginRequest {
        username: username.to_string(),
        password: req.password.clone(),
    };
    let data = services::auth::login(&client, &upstream_req)
        .await
        .map_err(|e| match e {
            ClientError::SessionExpired | ClientError::Rejected(_) => {
                ApiError::invalid_credentials()
            }
            ClientError::Status { status, .. } if (400..500).contains(&status) => {
                ApiError::invalid_credentials()
            }
            other => other.into(),
        })?;
    session.set_token(data.token);

    let (access_token, dashboard) = state
        .sessions
        .create(username, client, state.config.session_ttl_hours)
        .await;
    tracing::info!(username, "admin signed in");

    Ok(Json(LoginResponse {
        data: LoginResponseData {
            access_token,
            expires_at: dashboard.expires_at,
            username: dashboard.username.clone(),
        },
    }))
}

async fn me(auth: AuthContext) -> Result<Json<MeResponse>, ApiError> {
    Ok(Json(MeResponse {
        data: MeResponseData {
            username: auth.session.username.clone(),
            created_at: auth.session.created_at,
            expires_at: auth.session.expires_at,
        },
    }))
}

async fn logout(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<DataResponse<OkData>>, ApiError> {
    state.sessions.remove(&auth.token).await;
    auth.client().session().clear();
    tracing::info!(username = %auth.session.username, "admin signed out");

    Ok(Json(DataResponse::new(OkData {
        ok: true,
        message: None,
    })))
}
