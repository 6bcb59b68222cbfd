use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::client::ClientError;
use crate::wizard::WizardError;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorObject,
}

#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(&'static str, String),
    /// Session torn down; the browser must go back to the login page.
    SessionExpired,
    BadRequest(&'static str, String),
    /// Client-side form checks failed.
    Validation(BTreeMap<String, String>),
    NotFound(&'static str, String),
    Conflict(&'static str, String),
    Upstream(String),
}

impl ApiError {
    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized("INVALID_CREDENTIALS", "Username or password is incorrect".into())
    }

    pub fn validation<K: ToString>(errors: impl IntoIterator<Item = (K, String)>) -> Self {
        ApiError::Validation(
            errors
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    fn to_error_response(code: &str, message: &str) -> Json<ErrorResponse> {
        Json(ErrorResponse {
            error: ErrorObject {
                code: code.to_string(),
                message: message.to_string(),
                redirect: None,
                fields: BTreeMap::new(),
            },
        })
    }
}

impl From<ClientError> for ApiError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::SessionExpired => ApiError::SessionExpired,
            ClientError::Rejected(msg) => ApiError::BadRequest(
                "UPSTREAM_REJECTED",
                if msg.trim().is_empty() { "Request was rejected".into() } else { msg },
            ),
            ClientError::Status { status: 404, message } => ApiError::NotFound("NOT_FOUND", message),
            ClientError::InvalidId(id) => {
                ApiError::BadRequest("INVALID_ID", format!("invalid record id: {id}"))
            }
            other => {
                tracing::error!(error = %other, "upstream call failed");
                ApiError::Upstream(other.to_string())
            }
        }
    }
}

impl From<WizardError> for ApiError {
    fn from(e: WizardError) -> Self {
        match e {
            WizardError::SessionExpired => ApiError::SessionExpired,
            WizardError::WrongStep { .. } => ApiError::Conflict("WRONG_STEP", e.to_string()),
            WizardError::InvalidValue(msg) => ApiError::BadRequest("VALIDATION_ERROR", msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(code, msg) => {
                (StatusCode::UNAUTHORIZED, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::SessionExpired => {
                let mut body = ApiError::to_error_response("SESSION_EXPIRED", "Session expired");
                body.error.redirect = Some(LOGIN_PATH.to_string());
                (StatusCode::UNAUTHORIZED, body).into_response()
            }
            ApiError::BadRequest(code, msg) => {
                (StatusCode::BAD_REQUEST, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::Validation(fields) => {
                let mut body =
                    ApiError::to_error_response("VALIDATION_ERROR", "Please fix the highlighted fields");
                body.error.fields = fields;
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::NotFound(code, msg) => {
                (StatusCode::NOT_FOUND, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::Conflict(code, msg) => {
                (StatusCode::CONFLICT, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                ApiError::to_error_response("UPSTREAM_ERROR", &msg),
            )
                .into_response(),
        }
    }
}
