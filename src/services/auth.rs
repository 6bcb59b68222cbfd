// src/services/auth.rs

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, ClientError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    #[serde(alias = "accessToken")]
    pub token: String,
}

/// POST /admin/login. Does not touch the session; the caller stores the token.
pub async fn login(client: &ApiClient, req: &LoginRequest) -> Result<LoginData, ClientError> {
    client
        .post::<_, LoginData>("/admin/login", req)
        .await?
        .into_data()
}
