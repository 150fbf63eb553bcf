//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for registration and
//! login, parse request data, and delegate to the `auth::service` for the
//! core business logic.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::extract::AppJson;
use crate::auth::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::errors::ApiError;
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user = state.auth.register(&state.db, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { user_id: user.id }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response = state
        .auth
        .login(&state.db, &request.email, &request.password)
        .await?;
    Ok(Json(response))
}
