//! Integrity helpers for cross-entity id references.
//!
//! Entities point at each other through plain ids with no database-level
//! foreign keys. Writers call [`ensure_shelter`] inside their transaction
//! before persisting a reference; readers use the snapshot helpers to
//! embed the current referent, which may have been deleted since the
//! reference was written, in which case the embed is simply `None`.

use std::collections::HashMap;

use sqlx::SqliteExecutor;
use uuid::Uuid;

use crate::database::models::{Application, Pet, Shelter};
use crate::database::queries;
use crate::errors::ApiError;

/// Fails with a dangling-reference error unless the shelter exists.
pub async fn ensure_shelter(exec: impl SqliteExecutor<'_>, id: Uuid) -> Result<(), ApiError> {
    if queries::shelter_exists(exec, id).await? {
        Ok(())
    } else {
        Err(ApiError::DanglingReference {
            entity: "shelter",
            id,
        })
    }
}

pub async fn shelter_snapshot(
    exec: impl SqliteExecutor<'_>,
    shelter_id: Option<Uuid>,
) -> Result<Option<Shelter>, sqlx::Error> {
    match shelter_id {
        Some(id) => queries::shelter_by_id(exec, id).await,
        None => Ok(None),
    }
}

pub async fn pet_snapshot(
    exec: impl SqliteExecutor<'_>,
    pet_id: Uuid,
) -> Result<Option<Pet>, sqlx::Error> {
    queries::pet_by_id(exec, pet_id).await
}

/// Batch-fetches the shelters referenced by a page of pets, keyed by id.
pub async fn shelters_for_pets(
    exec: impl SqliteExecutor<'_>,
    pets: &[Pet],
) -> Result<HashMap<Uuid, Shelter>, sqlx::Error> {
    let mut ids: Vec<Uuid> = pets.iter().filter_map(|pet| pet.shelter_id).collect();
    ids.sort_unstable();
    ids.dedup();
    let shelters = queries::shelters_by_ids(exec, &ids).await?;
    Ok(shelters
        .into_iter()
        .map(|shelter| (shelter.id, shelter))
        .collect())
}

/// Batch-fetches the pets referenced by a page of applications, keyed by id.
pub async fn pets_for_applications(
    exec: impl SqliteExecutor<'_>,
    applications: &[Application],
) -> Result<HashMap<Uuid, Pet>, sqlx::Error> {
    let mut ids: Vec<Uuid> = applications
        .iter()
        .map(|application| application.pet_id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    let pets = queries::pets_by_ids(exec, &ids).await?;
    Ok(pets.into_iter().map(|pet| (pet.id, pet)).collect())
}
