//! Middleware for protecting authenticated routes.
//!
//! Guarded handlers take [`Claims`] as an extractor argument. Extraction
//! validates the bearer token and rejects every failure mode, whether a
//! missing header, a bad signature, or an expired token, with the same
//! uniform 401 so callers cannot probe which check tripped.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::auth::models::Claims;
use crate::errors::ApiError;
use crate::AppState;

impl FromRequestParts<AppState> for Claims {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            tracing::debug!("request carried no bearer token");
            ApiError::Unauthorized
        })?;
        state.auth.verify_token(token).map_err(|err| {
            tracing::debug!(error = %err, "bearer token rejected");
            ApiError::Unauthorized
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
