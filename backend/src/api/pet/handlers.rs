//! Handler functions for the pet listing endpoints.
//!
//! Reads are public and resolve the owning shelter at read time. Creation
//! arrives as multipart form data carrying exactly one image; updates are
//! JSON merge-patches. Every mutation is guarded and scoped to the
//! caller's shelter unless the caller is a super admin.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use homeward_uploads::NewImage;

use crate::api::extract::{AppJson, AppMultipart, AppPath, AppQuery};
use crate::auth::models::{Claims, Role};
use crate::database::models::{Gender, NewPet, Pet, PetFilter, PetStatus, Shelter, Size};
use crate::database::queries;
use crate::errors::ApiError;
use crate::services::references;
use crate::utils::{deserialize_patch, require_text};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PetQuery {
    pub species: Option<String>,
    pub size: Option<String>,
    pub status: Option<String>,
}

/// A pet with its shelter reference resolved at read time. The embed is
/// `null` when the pet is unowned or the shelter has since been deleted.
#[derive(Debug, Serialize)]
pub struct PetWithShelter {
    #[serde(flatten)]
    pub pet: Pet,
    pub shelter: Option<Shelter>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePet {
    pub name: Option<String>,
    pub species: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub breed: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub age: Option<Option<i64>>,
    pub gender: Option<Gender>,
    pub size: Option<Size>,
    pub description: Option<String>,
    pub status: Option<PetStatus>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub shelter_id: Option<Option<Uuid>>,
}

pub async fn list_pets(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PetQuery>,
) -> Result<Json<Vec<PetWithShelter>>, ApiError> {
    let filter = PetFilter::new(query.species, query.size, query.status);
    let pool = state.db.pool().await?;
    let pets = queries::list_pets(pool, &filter).await?;
    let shelters = references::shelters_for_pets(pool, &pets).await?;

    let page = pets
        .into_iter()
        .map(|pet| {
            let shelter = pet.shelter_id.and_then(|id| shelters.get(&id).cloned());
            PetWithShelter { pet, shelter }
        })
        .collect();
    Ok(Json(page))
}

pub async fn get_pet(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<PetWithShelter>, ApiError> {
    let pool = state.db.pool().await?;
    let pet = queries::pet_by_id(pool, id)
        .await?
        .ok_or(ApiError::NotFound("pet"))?;
    let shelter = references::shelter_snapshot(pool, pet.shelter_id).await?;
    Ok(Json(PetWithShelter { pet, shelter }))
}

pub async fn create_pet(
    State(state): State<AppState>,
    claims: Claims,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<(StatusCode, Json<Pet>), ApiError> {
    let form = read_pet_form(&mut multipart).await?;

    let name = required_field("name", form.name)?;
    let species = required_field("species", form.species)?;
    let description = required_field("description", form.description)?;
    let breed = optional_text(form.breed);
    let age = match optional_text(form.age) {
        Some(raw) => Some(parse_age(&raw)?),
        None => None,
    };
    let gender = match optional_text(form.gender) {
        Some(raw) => parse_enum("gender", &raw)?,
        None => Gender::default(),
    };
    let size = match optional_text(form.size) {
        Some(raw) => parse_enum("size", &raw)?,
        None => Size::default(),
    };
    let status = match optional_text(form.status) {
        Some(raw) => parse_enum("status", &raw)?,
        None => PetStatus::default(),
    };
    let requested_shelter = match optional_text(form.shelter_id) {
        Some(raw) => Some(parse_uuid("shelterId", &raw)?),
        None => None,
    };

    // Shelter admins list pets under their own shelter only; leaving the
    // field out means exactly that. Super admins may place a pet anywhere
    // or leave it unowned.
    let shelter_id = match claims.role {
        Role::SuperAdmin => requested_shelter,
        Role::ShelterAdmin => {
            let own = claims.shelter_id.ok_or(ApiError::Forbidden)?;
            match requested_shelter {
                None => Some(own),
                Some(requested) if requested == own => Some(own),
                Some(_) => return Err(ApiError::Forbidden),
            }
        }
    };

    let image = form
        .image
        .ok_or_else(|| ApiError::Validation("Image upload is required.".into()))?;
    let stored = state
        .images
        .store(NewImage {
            file_name: image.file_name.as_deref(),
            content_type: &image.content_type,
            bytes: &image.bytes,
        })
        .await?;

    let pet = Pet::new(NewPet {
        name,
        species,
        breed,
        age,
        gender,
        size,
        description,
        image_url: stored.locator,
        status,
        shelter_id,
    });

    let mut tx = state.db.pool().await?.begin().await?;
    if let Some(shelter) = pet.shelter_id {
        references::ensure_shelter(&mut *tx, shelter).await?;
    }
    queries::insert_pet(&mut *tx, &pet).await?;
    tx.commit().await?;

    tracing::info!(pet_id = %pet.id, image = %pet.image_url, "pet listed");
    Ok((StatusCode::CREATED, Json(pet)))
}

pub async fn update_pet(
    State(state): State<AppState>,
    claims: Claims,
    AppPath(id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdatePet>,
) -> Result<Json<Pet>, ApiError> {
    let mut tx = state.db.pool().await?.begin().await?;
    let mut pet = queries::pet_by_id(&mut *tx, id)
        .await?
        .ok_or(ApiError::NotFound("pet"))?;
    if !claims.may_manage(pet.shelter_id) {
        return Err(ApiError::Forbidden);
    }

    if let Some(name) = &request.name {
        pet.name = require_text("name", name)?;
    }
    if let Some(species) = &request.species {
        pet.species = require_text("species", species)?;
    }
    if let Some(description) = &request.description {
        pet.description = require_text("description", description)?;
    }
    if let Some(breed) = request.breed {
        pet.breed = breed.and_then(|value| optional_text(Some(value)));
    }
    if let Some(age) = request.age {
        if matches!(age, Some(age) if age < 0) {
            return Err(ApiError::Validation(
                "age must be a non-negative integer".into(),
            ));
        }
        pet.age = age;
    }
    if let Some(gender) = request.gender {
        pet.gender = gender;
    }
    if let Some(size) = request.size {
        pet.size = size;
    }
    if let Some(status) = request.status {
        pet.status = status;
    }
    if let Some(target) = request.shelter_id {
        match claims.role {
            // Moving or detaching a pet is a super-admin operation;
            // shelter admins may only restate their own shelter.
            Role::ShelterAdmin => {
                if target != pet.shelter_id {
                    return Err(ApiError::Forbidden);
                }
            }
            Role::SuperAdmin => {
                if let Some(shelter) = target {
                    references::ensure_shelter(&mut *tx, shelter).await?;
                }
                pet.shelter_id = target;
            }
        }
    }
    pet.updated_at = Utc::now();

    queries::update_pet(&mut *tx, &pet).await?;
    tx.commit().await?;
    Ok(Json(pet))
}

pub async fn delete_pet(
    State(state): State<AppState>,
    claims: Claims,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut tx = state.db.pool().await?.begin().await?;
    let pet = queries::pet_by_id(&mut *tx, id)
        .await?
        .ok_or(ApiError::NotFound("pet"))?;
    if !claims.may_manage(pet.shelter_id) {
        return Err(ApiError::Forbidden);
    }
    queries::delete_pet(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(pet_id = %id, "pet deleted");
    Ok(Json(json!({ "message": "Pet deleted successfully." })))
}

#[derive(Debug, Default)]
struct PetForm {
    name: Option<String>,
    species: Option<String>,
    breed: Option<String>,
    age: Option<String>,
    gender: Option<String>,
    size: Option<String>,
    description: Option<String>,
    status: Option<String>,
    shelter_id: Option<String>,
    image: Option<ImagePart>,
}

#[derive(Debug)]
struct ImagePart {
    file_name: Option<String>,
    content_type: String,
    bytes: Vec<u8>,
}

async fn read_pet_form(multipart: &mut Multipart) -> Result<PetForm, ApiError> {
    let mut form = PetForm::default();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if name == "image" {
            if form.image.is_some() {
                return Err(ApiError::Validation(
                    "exactly one image file is accepted".into(),
                ));
            }
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_owned();
            let bytes = field.bytes().await?.to_vec();
            form.image = Some(ImagePart {
                file_name,
                content_type,
                bytes,
            });
            continue;
        }
        let value = field.text().await?;
        match name.as_str() {
            "name" => form.name = Some(value),
            "species" => form.species = Some(value),
            "breed" => form.breed = Some(value),
            "age" => form.age = Some(value),
            "gender" => form.gender = Some(value),
            "size" => form.size = Some(value),
            "description" => form.description = Some(value),
            "status" => form.status = Some(value),
            "shelterId" => form.shelter_id = Some(value),
            other => {
                tracing::debug!(field = other, "ignoring unknown form field");
            }
        }
    }
    Ok(form)
}

fn required_field(field: &'static str, value: Option<String>) -> Result<String, ApiError> {
    let value = value.ok_or_else(|| ApiError::Validation(format!("{field} is required")))?;
    require_text(field, &value)
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_enum<T: DeserializeOwned>(field: &str, value: &str) -> Result<T, ApiError> {
    serde_json::from_value(serde_json::Value::String(value.to_owned()))
        .map_err(|_| ApiError::Validation(format!("{field} has an unrecognized value: {value}")))
}

fn parse_age(value: &str) -> Result<i64, ApiError> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|age| *age >= 0)
        .ok_or_else(|| ApiError::Validation("age must be a non-negative integer".into()))
}

fn parse_uuid(field: &str, value: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| ApiError::Validation(format!("{field} must be a valid id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_enums_accept_wire_spellings_only() {
        assert_eq!(parse_enum::<Gender>("gender", "Female").unwrap(), Gender::Female);
        assert_eq!(parse_enum::<Size>("size", "Large").unwrap(), Size::Large);
        assert_eq!(
            parse_enum::<PetStatus>("status", "Adopted").unwrap(),
            PetStatus::Adopted
        );
        assert!(parse_enum::<Gender>("gender", "female").is_err());
        assert!(parse_enum::<Size>("size", "Gigantic").is_err());
    }

    #[test]
    fn age_must_be_a_non_negative_integer() {
        assert_eq!(parse_age("4").unwrap(), 4);
        assert_eq!(parse_age(" 0 ").unwrap(), 0);
        assert!(parse_age("-1").is_err());
        assert!(parse_age("four").is_err());
        assert!(parse_age("4.5").is_err());
    }

    #[test]
    fn optional_text_drops_blank_values() {
        assert_eq!(optional_text(Some(" corgi ".into())), Some("corgi".into()));
        assert_eq!(optional_text(Some("   ".into())), None);
        assert_eq!(optional_text(None), None);
    }
}
