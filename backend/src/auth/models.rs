//! Data structures for authentication-related entities.
//!
//! This module defines the account roles, the bcrypt hash wrapper, JWT
//! claims, and the request/response payloads used by the authentication
//! endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access level attached to an account and carried inside its tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum Role {
    #[default]
    ShelterAdmin,
    SuperAdmin,
}

/// A bcrypt digest. Plaintext passwords never leave the auth service, and
/// this wrapper keeps them out of logs too.
#[derive(Clone, PartialEq, Eq, sqlx::Type)]
#[sqlx(transparent)]
pub struct PasswordHash(pub(crate) String);

impl PasswordHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Payload signed into every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id of the bearer.
    pub sub: Uuid,
    pub role: Role,
    #[serde(rename = "shelterId", default, skip_serializing_if = "Option::is_none")]
    pub shelter_id: Option<Uuid>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Whether the bearer may mutate resources owned by the given shelter.
    /// Super admins manage everything; shelter admins only their own
    /// shelter, which in particular excludes unowned resources.
    pub fn may_manage(&self, shelter: Option<Uuid>) -> bool {
        match self.role {
            Role::SuperAdmin => true,
            Role::ShelterAdmin => self.shelter_id.is_some() && self.shelter_id == shelter,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    pub shelter_ref: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_kebab_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&Role::ShelterAdmin).unwrap(),
            "\"shelter-admin\""
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"super-admin\"").unwrap(),
            Role::SuperAdmin
        );
    }

    #[test]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash("$2b$12$secret-digest".into());
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }

    #[test]
    fn shelter_admins_manage_only_their_own_shelter() {
        let shelter = Uuid::now_v7();
        let other = Uuid::now_v7();
        let claims = Claims {
            sub: Uuid::now_v7(),
            role: Role::ShelterAdmin,
            shelter_id: Some(shelter),
            iat: 0,
            exp: 0,
        };
        assert!(claims.may_manage(Some(shelter)));
        assert!(!claims.may_manage(Some(other)));
        assert!(!claims.may_manage(None));

        let detached = Claims {
            shelter_id: None,
            ..claims.clone()
        };
        assert!(!detached.may_manage(Some(shelter)));
        assert!(!detached.may_manage(None));
    }

    #[test]
    fn super_admins_manage_everything() {
        let claims = Claims {
            sub: Uuid::now_v7(),
            role: Role::SuperAdmin,
            shelter_id: None,
            iat: 0,
            exp: 0,
        };
        assert!(claims.may_manage(Some(Uuid::now_v7())));
        assert!(claims.may_manage(None));
    }

    #[test]
    fn claims_omit_the_shelter_when_absent() {
        let claims = Claims {
            sub: Uuid::now_v7(),
            role: Role::SuperAdmin,
            shelter_id: None,
            iat: 10,
            exp: 20,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert!(value.get("shelterId").is_none());

        let round_trip: Claims = serde_json::from_value(value).unwrap();
        assert_eq!(round_trip.shelter_id, None);
        assert_eq!(round_trip.exp, 20);
    }
}
