use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::login::LoginBody;
use crate::domain::login::LoginResult;
use crate::domain::login::ProviderError;

pub mod login;

/// Sends a provider's status and body as they are.
///
/// Text bodies go out as `text/plain`, mappings as JSON, and a missing body
/// as an empty response.
impl IntoResponse for LoginResult {
    fn into_response(self) -> Response {
        match self.body {
            None => self.status.into_response(),
            Some(LoginBody::Text(text)) => (self.status, text).into_response(),
            Some(LoginBody::Json(map)) => (self.status, Json(map)).into_response(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        tracing::error!(error = %err, "Login provider failed");
        ApiError::InternalServerError("Internal server error".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
