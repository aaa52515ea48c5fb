use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::users,
    error::{AppError, Result},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub iat: i64,
    pub exp: i64,
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| AppError::Internal("Failed to hash password".to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Issues and verifies HS256 bearer tokens bound to a username.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, username: &str) -> Result<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal("Token expiry out of range".to_string()))?;

        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|_| AppError::Internal("Failed to create token".to_string()))
    }

    /// Returns the username bound to a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Result<String> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            AppError::unauthorized()
        })?;

        if data.claims.sub.is_empty() {
            return Err(AppError::unauthorized());
        }

        Ok(data.claims.sub)
    }
}

fn required(field: Option<&str>) -> Option<&str> {
    field.filter(|v| !v.is_empty())
}

/// Registration, login and token authentication against the user table.
#[derive(Clone)]
pub struct AuthService {
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(tokens: TokenIssuer) -> Self {
        Self { tokens }
    }

    pub async fn register(
        &self,
        pool: &SqlitePool,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<()> {
        let (Some(username), Some(password)) = (required(username), required(password)) else {
            tracing::warn!("Email or password is missing for registration");
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        };

        tracing::info!("Registering user with email: {}", username);

        if users::exists(pool, username).await? {
            tracing::warn!("User with email {} already exists", username);
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;
        users::insert(pool, username, &password_hash).await?;

        tracing::info!("User {} registered successfully", username);
        Ok(())
    }

    pub async fn login(
        &self,
        pool: &SqlitePool,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<String> {
        let (Some(username), Some(password)) = (required(username), required(password)) else {
            tracing::warn!("Email or password is missing for login");
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        };

        tracing::info!("Login attempt for email: {}", username);

        let bad_credentials = || {
            tracing::warn!("Invalid credentials for email: {}", username);
            AppError::Unauthorized("Invalid email or password".to_string())
        };

        let user = users::find_by_username(pool, username)
            .await?
            .ok_or_else(bad_credentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(bad_credentials());
        }

        let token = self.tokens.issue(&user.username)?;
        tracing::info!("User {} logged in successfully", username);
        Ok(token)
    }

    pub fn authenticate(&self, token: Option<&str>) -> Result<String> {
        let token = token.ok_or_else(|| {
            tracing::warn!("User is not authenticated");
            AppError::unauthorized()
        })?;

        let username = self.tokens.verify(token)?;
        tracing::debug!("Authenticated user email: {}", username);
        Ok(username)
    }
}
