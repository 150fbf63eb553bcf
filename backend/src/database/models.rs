//! Rust structs that represent database table mappings.
//!
//! These models define the structure of each entity as stored in and
//! retrieved from SQLite. Apart from `User` they double as the JSON
//! representations served by the API (camelCase field names); API request
//! models live with their handlers. `User` is never serialized and can only
//! be built from an already-computed password hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::models::{PasswordHash, Role};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Shelter {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shelter {
    pub fn new(
        name: String,
        location: String,
        contact_email: Option<String>,
        contact_phone: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name,
            location,
            contact_email,
            contact_phone,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Staff account row. Deliberately not serializable, and only constructible
/// from a hash computed up front.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub shelter_ref: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: String,
        password_hash: PasswordHash,
        role: Role,
        shelter_ref: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email,
            password_hash,
            role,
            shelter_ref,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
pub enum PetStatus {
    #[default]
    Available,
    Pending,
    Adopted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    #[serde(rename = "In-Review")]
    #[sqlx(rename = "In-Review")]
    InReview,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age: Option<i64>,
    pub gender: Gender,
    pub size: Size,
    pub description: String,
    pub image_url: String,
    pub status: PetStatus,
    pub shelter_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for a new pet listing, assembled by the create handler once the
/// image has a locator.
#[derive(Debug, Clone)]
pub struct NewPet {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age: Option<i64>,
    pub gender: Gender,
    pub size: Size,
    pub description: String,
    pub image_url: String,
    pub status: PetStatus,
    pub shelter_id: Option<Uuid>,
}

impl Pet {
    pub fn new(listing: NewPet) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: listing.name,
            species: listing.species,
            breed: listing.breed,
            age: listing.age,
            gender: listing.gender,
            size: listing.size,
            description: listing.description,
            image_url: listing.image_url,
            status: listing.status,
            shelter_id: listing.shelter_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Equality filter for pet listings; empty values constrain nothing.
#[derive(Debug, Clone, Default)]
pub struct PetFilter {
    pub species: Option<String>,
    pub size: Option<String>,
    pub status: Option<String>,
}

impl PetFilter {
    pub fn new(species: Option<String>, size: Option<String>, status: Option<String>) -> Self {
        Self {
            species: species.filter(|v| !v.is_empty()),
            size: size.filter(|v| !v.is_empty()),
            status: status.filter(|v| !v.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_none() && self.size.is_none() && self.status.is_none()
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub pet_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for a new adoption application.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    pub message: Option<String>,
    pub status: ApplicationStatus,
    pub pet_id: Uuid,
}

impl Application {
    pub fn new(application: NewApplication) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            applicant_name: application.applicant_name,
            applicant_email: application.applicant_email,
            applicant_phone: application.applicant_phone,
            message: application.message,
            status: application.status,
            pet_id: application.pet_id,
            created_at: now,
            updated_at: now,
        }
    }
}
