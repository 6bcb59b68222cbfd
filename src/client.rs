// src/client.rs
//
// HTTP client for the upstream Health Manthan API.

use std::sync::{Arc, RwLock};

use reqwest::{Method, RequestBuilder, StatusCode, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Upstream answered 401. The session has already been cleared.
    #[error("session expired")]
    SessionExpired,
    /// Upstream answered with `success: false`.
    #[error("{0}")]
    Rejected(String),
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
    /// Refused before sending: not a plain upstream record id.
    #[error("invalid record id: {0}")]
    InvalidId(String),
}

impl ClientError {
    /// Message suitable for a user-facing notice.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ClientError::Rejected(msg) if !msg.trim().is_empty() => Some(msg),
            ClientError::Status { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Upstream bearer token, shared between the client and whoever owns the login flow.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn is_active(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

/// `{ success, data, message? }` with `success` already checked.
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T: DeserializeOwned> Envelope<T> {
    fn from_body(mut body: Value) -> Result<Self, ClientError> {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        let data = match body.get_mut("data").map(Value::take) {
            None | Some(Value::Null) => None,
            Some(raw) => Some(
                serde_json::from_value(raw).map_err(|e| ClientError::Decode(e.to_string()))?,
            ),
        };
        Ok(Self { data, message })
    }

    pub fn into_data(self) -> Result<T, ClientError> {
        self.data
            .ok_or_else(|| ClientError::Decode("response carried no data".into()))
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, session)
    }

    /// Reuses an existing connection pool.
    pub fn with_http(http: reqwest::Client, base_url: &str, session: Session) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, format!("{}{}", self.base_url, path));
        // Token is re-read on every request; login/logout may have changed it.
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn execute(&self, req: RequestBuilder) -> Result<Value, ClientError> {
        let resp = req.send().await?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("upstream rejected credentials, tearing down session");
            self.session.clear();
            return Err(ClientError::SessionExpired);
        }

        let bytes = resp.bytes().await?;
        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(v) => v,
                Err(e) if status.is_success() => return Err(ClientError::Decode(e.to_string())),
                Err(_) => Value::Null,
            }
        };

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                }),
            });
        }

        if body.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(ClientError::Rejected(message.unwrap_or_default()));
        }

        Ok(body)
    }

    /// GET and return the envelope's `data`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let body = self.execute(self.request(Method::GET, path)).await?;
        Envelope::from_body(body)?.into_data()
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<Envelope<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        Envelope::from_body(body)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<Envelope<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .execute(self.request(Method::PUT, path).json(body))
            .await?;
        Envelope::from_body(body)
    }

    pub async fn delete(&self, path: &str) -> Result<Envelope<Value>, ClientError> {
        let body = self.execute(self.request(Method::DELETE, path)).await?;
        Envelope::from_body(body)
    }

    /// POST a multipart form and return the raw body.
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Value, ClientError> {
        self.execute(self.request(Method::POST, path).multipart(form))
            .await
    }
}
