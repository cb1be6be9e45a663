use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::ApiError;
use crate::domain::login::LoginRequest;
use crate::domain::login::LoginResult;
use crate::inbound::http::router::AppState;

/// `POST /api/auth/login`: hand the JSON body to the login dispatcher.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<LoginResult, ApiError> {
    let request = LoginRequest::new(body);

    Ok(state.dispatcher.dispatch(&request).await?)
}
