//! Core business logic for the authentication system.
//!
//! This service handles account creation, password hashing and
//! verification, and token issuance and validation. It orchestrates
//! interactions between handlers and the database.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::errors::AuthError;
use crate::auth::models::{Claims, LoginResponse, PasswordHash, RegisterRequest, Role};
use crate::database::models::User;
use crate::database::{is_unique_violation, queries, Database};

const TOKEN_TTL_HOURS: i64 = 24;
const MIN_PASSWORD_LEN: usize = 8;

/// Issues and validates access tokens and manages account credentials.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(secret: &str, bcrypt_cost: u32) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            bcrypt_cost,
        }
    }

    /// Creates a new account. The referenced shelter is checked inside the
    /// same transaction as the insert so it cannot vanish in between.
    pub async fn register(
        &self,
        db: &Database,
        request: RegisterRequest,
    ) -> Result<User, AuthError> {
        let email = validate_registration(&request)?;
        let RegisterRequest {
            password,
            role,
            shelter_ref,
            ..
        } = request;
        let password_hash = self.hash_password(password).await?;

        let mut tx = db.pool().await?.begin().await?;
        if let Some(shelter) = shelter_ref {
            if !queries::shelter_exists(&mut *tx, shelter).await? {
                return Err(AuthError::UnknownShelter(shelter));
            }
        }
        let user = User::new(email, password_hash, role, shelter_ref);
        queries::insert_user(&mut *tx, &user).await.map_err(|err| {
            if is_unique_violation(&err) {
                AuthError::DuplicateEmail
            } else {
                AuthError::Database(err)
            }
        })?;
        tx.commit().await?;

        tracing::info!(user_id = %user.id, role = ?user.role, "account registered");
        Ok(user)
    }

    /// Authenticates by email and password and returns a fresh token.
    pub async fn login(
        &self,
        db: &Database,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, AuthError> {
        let user = queries::user_by_email(db.pool().await?, email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let verified = self
            .verify_password(password.to_owned(), user.password_hash.clone())
            .await?;
        if !verified {
            tracing::debug!(email, "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        Ok(LoginResponse {
            token,
            role: user.role,
        })
    }

    // bcrypt is deliberately slow, so both hashing paths run on the
    // blocking pool instead of stalling the async runtime.
    async fn hash_password(&self, password: String) -> Result<PasswordHash, AuthError> {
        let cost = self.bcrypt_cost;
        let digest = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|_| AuthError::HashingAborted)??;
        Ok(PasswordHash(digest))
    }

    async fn verify_password(
        &self,
        password: String,
        hash: PasswordHash,
    ) -> Result<bool, AuthError> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, hash.as_str()))
            .await
            .map_err(|_| AuthError::HashingAborted)?
            .map_err(AuthError::from)
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            role: user.role,
            shelter_id: user.shelter_ref,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(AuthError::TokenIssuance)
    }

    /// Decodes and validates a bearer token, including its expiry.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(AuthError::InvalidToken)
    }
}

fn validate_registration(request: &RegisterRequest) -> Result<String, AuthError> {
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::Validation("a valid email is required".into()));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if request.role == Role::ShelterAdmin && request.shelter_ref.is_none() {
        return Err(AuthError::Validation(
            "shelterRef is required for shelter-admin accounts".into(),
        ));
    }
    Ok(email.to_owned())
}
