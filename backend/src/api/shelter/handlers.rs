//! Handler functions for the shelter directory endpoints.
//!
//! Reads are public. Creating a shelter is reserved for super admins;
//! updates are allowed for super admins and for admins of the shelter
//! itself. Updates apply merge-patch semantics, so absent fields stay
//! untouched while explicit nulls clear the contact columns.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extract::{AppJson, AppPath};
use crate::auth::models::{Claims, Role};
use crate::database::models::Shelter;
use crate::database::queries;
use crate::errors::ApiError;
use crate::utils::{deserialize_patch, require_text};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShelter {
    pub name: String,
    pub location: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShelter {
    pub name: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub contact_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub contact_phone: Option<Option<String>>,
}

pub async fn list_shelters(
    State(state): State<AppState>,
) -> Result<Json<Vec<Shelter>>, ApiError> {
    let shelters = queries::list_shelters(state.db.pool().await?).await?;
    Ok(Json(shelters))
}

pub async fn get_shelter(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Shelter>, ApiError> {
    let shelter = queries::shelter_by_id(state.db.pool().await?, id)
        .await?
        .ok_or(ApiError::NotFound("shelter"))?;
    Ok(Json(shelter))
}

pub async fn create_shelter(
    State(state): State<AppState>,
    claims: Claims,
    AppJson(request): AppJson<CreateShelter>,
) -> Result<(StatusCode, Json<Shelter>), ApiError> {
    if claims.role != Role::SuperAdmin {
        return Err(ApiError::Forbidden);
    }
    let name = require_text("name", &request.name)?;
    let location = require_text("location", &request.location)?;

    let shelter = Shelter::new(name, location, request.contact_email, request.contact_phone);
    queries::insert_shelter(state.db.pool().await?, &shelter).await?;

    tracing::info!(shelter_id = %shelter.id, "shelter created");
    Ok((StatusCode::CREATED, Json(shelter)))
}

pub async fn update_shelter(
    State(state): State<AppState>,
    claims: Claims,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateShelter>,
) -> Result<Json<Shelter>, ApiError> {
    let mut tx = state.db.pool().await?.begin().await?;
    let mut shelter = queries::shelter_by_id(&mut *tx, id)
        .await?
        .ok_or(ApiError::NotFound("shelter"))?;
    if !claims.may_manage(Some(shelter.id)) {
        return Err(ApiError::Forbidden);
    }

    if let Some(name) = &request.name {
        shelter.name = require_text("name", name)?;
    }
    if let Some(location) = &request.location {
        shelter.location = require_text("location", location)?;
    }
    if let Some(contact_email) = request.contact_email {
        shelter.contact_email = contact_email;
    }
    if let Some(contact_phone) = request.contact_phone {
        shelter.contact_phone = contact_phone;
    }
    shelter.updated_at = Utc::now();

    queries::update_shelter(&mut *tx, &shelter).await?;
    tx.commit().await?;
    Ok(Json(shelter))
}
