//! Handler functions for the adoption application endpoints.
//!
//! Every application route requires authentication. Shelter admins see
//! and manage only applications for pets of their own shelter; super
//! admins see everything, including applications whose pet has since been
//! deleted. Reads resolve the referenced pet at read time.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::api::extract::{AppJson, AppPath};
use crate::auth::models::{Claims, Role};
use crate::database::models::{Application, ApplicationStatus, NewApplication, Pet};
use crate::database::queries;
use crate::errors::ApiError;
use crate::services::references;
use crate::utils::{deserialize_patch, require_text};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplication {
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    pub message: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub pet_id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplication {
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    pub applicant_phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub message: Option<Option<String>>,
    pub status: Option<ApplicationStatus>,
}

/// An application with its pet reference resolved at read time. The embed
/// is `null` when the pet has since been deleted.
#[derive(Debug, Serialize)]
pub struct ApplicationWithPet {
    #[serde(flatten)]
    pub application: Application,
    pub pet: Option<Pet>,
}

pub async fn create_application(
    State(state): State<AppState>,
    claims: Claims,
    AppJson(request): AppJson<CreateApplication>,
) -> Result<(StatusCode, Json<Application>), ApiError> {
    let applicant_name = require_text("applicantName", &request.applicant_name)?;
    let applicant_email = validate_email(&request.applicant_email)?;
    let applicant_phone = require_text("applicantPhone", &request.applicant_phone)?;

    let mut tx = state.db.pool().await?.begin().await?;
    let pet = queries::pet_by_id(&mut *tx, request.pet_id)
        .await?
        .ok_or(ApiError::DanglingReference {
            entity: "pet",
            id: request.pet_id,
        })?;
    if !scope_allows(&claims, Some(&pet)) {
        return Err(ApiError::Forbidden);
    }

    let application = Application::new(NewApplication {
        applicant_name,
        applicant_email,
        applicant_phone,
        message: request.message.filter(|message| !message.trim().is_empty()),
        status: request.status.unwrap_or_default(),
        pet_id: pet.id,
    });
    queries::insert_application(&mut *tx, &application).await?;
    tx.commit().await?;

    tracing::info!(
        application_id = %application.id,
        pet_id = %pet.id,
        "application submitted"
    );
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn list_applications(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<Vec<ApplicationWithPet>>, ApiError> {
    let scope = match claims.role {
        Role::SuperAdmin => None,
        Role::ShelterAdmin => Some(claims.shelter_id.ok_or(ApiError::Forbidden)?),
    };
    let pool = state.db.pool().await?;
    let applications = queries::list_applications(pool, scope).await?;
    let pets = references::pets_for_applications(pool, &applications).await?;

    let page = applications
        .into_iter()
        .map(|application| {
            let pet = pets.get(&application.pet_id).cloned();
            ApplicationWithPet { application, pet }
        })
        .collect();
    Ok(Json(page))
}

pub async fn get_application(
    State(state): State<AppState>,
    claims: Claims,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<ApplicationWithPet>, ApiError> {
    let pool = state.db.pool().await?;
    let application = queries::application_by_id(pool, id)
        .await?
        .ok_or(ApiError::NotFound("application"))?;
    let pet = references::pet_snapshot(pool, application.pet_id).await?;
    if !scope_allows(&claims, pet.as_ref()) {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(ApplicationWithPet { application, pet }))
}

pub async fn update_application(
    State(state): State<AppState>,
    claims: Claims,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateApplication>,
) -> Result<Json<Application>, ApiError> {
    let mut tx = state.db.pool().await?.begin().await?;
    let mut application = queries::application_by_id(&mut *tx, id)
        .await?
        .ok_or(ApiError::NotFound("application"))?;
    let pet = references::pet_snapshot(&mut *tx, application.pet_id).await?;
    if !scope_allows(&claims, pet.as_ref()) {
        return Err(ApiError::Forbidden);
    }

    if let Some(applicant_name) = &request.applicant_name {
        application.applicant_name = require_text("applicantName", applicant_name)?;
    }
    if let Some(applicant_email) = &request.applicant_email {
        application.applicant_email = validate_email(applicant_email)?;
    }
    if let Some(applicant_phone) = &request.applicant_phone {
        application.applicant_phone = require_text("applicantPhone", applicant_phone)?;
    }
    if let Some(message) = request.message {
        application.message = message.filter(|message| !message.trim().is_empty());
    }
    if let Some(status) = request.status {
        application.status = status;
    }
    application.updated_at = Utc::now();

    queries::update_application(&mut *tx, &application).await?;
    tx.commit().await?;
    Ok(Json(application))
}

pub async fn delete_application(
    State(state): State<AppState>,
    claims: Claims,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut tx = state.db.pool().await?.begin().await?;
    let application = queries::application_by_id(&mut *tx, id)
        .await?
        .ok_or(ApiError::NotFound("application"))?;
    let pet = references::pet_snapshot(&mut *tx, application.pet_id).await?;
    if !scope_allows(&claims, pet.as_ref()) {
        return Err(ApiError::Forbidden);
    }
    queries::delete_application(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(application_id = %id, "application deleted");
    Ok(Json(json!({ "message": "Application deleted successfully." })))
}

// Whether the caller may see or mutate an application, given the pet it
// points at. A deleted pet leaves the application reachable only by
// super admins.
fn scope_allows(claims: &Claims, pet: Option<&Pet>) -> bool {
    match claims.role {
        Role::SuperAdmin => true,
        Role::ShelterAdmin => pet.is_some_and(|pet| claims.may_manage(pet.shelter_id)),
    }
}

fn validate_email(value: &str) -> Result<String, ApiError> {
    let email = require_text("applicantEmail", value)?;
    if !email.contains('@') {
        return Err(ApiError::Validation(
            "applicantEmail must be a valid email".into(),
        ));
    }
    Ok(email)
}
