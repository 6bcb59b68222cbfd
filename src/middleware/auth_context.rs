use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::AppState;
use crate::sessions::DashboardSession;

#[derive(Clone)]
pub struct AuthContext {
    pub token: String,
    pub session: Arc<DashboardSession>,
}

impl AuthContext {
    pub fn client(&self) -> &ApiClient {
        &self.session.client
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            // Extract Authorization: Bearer <token>
            let TypedHeader(authz): TypedHeader<Authorization<Bearer>> =
                TypedHeader::from_request_parts(parts, state)
                    .await
                    .map_err(|_| ApiError::SessionExpired)?;

            let token = authz.token().to_string();
            let session = state
                .sessions
                .lookup(&token)
                .await
                .ok_or(ApiError::SessionExpired)?;

            Ok(AuthContext { token, session })
        }
    }
}
