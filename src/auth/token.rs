use crate::config::JwtSettings;
use crate::error::AppError;
use crate::models::User;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject of the token: the user's id, string-encoded.
    pub sub: String,
    /// Username at the time of issuance.
    pub name: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// The numeric user id carried in `sub`, if it parses.
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// A freshly signed token and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires: DateTime<Utc>,
}

/// Signs and verifies bearer tokens with a single HS256 key.
#[derive(Clone)]
pub struct TokenService {
    issuer: String,
    audience: String,
    lifetime: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("lifetime", &self.lifetime)
            .field("keys", &"[hidden]")
            .finish()
    }
}

impl TokenService {
    /// Builds the service from configured settings.
    ///
    /// Returns `AppError::InternalServerError` when the secret is empty; there is no
    /// fallback key.
    pub fn new(settings: &JwtSettings) -> Result<Self, AppError> {
        if settings.secret.is_empty() {
            return Err(AppError::InternalServerError(
                "JWT secret is not configured".into(),
            ));
        }
        if settings.secret.len() < 32 {
            log::warn!("JWT secret is shorter than 32 bytes; use a longer random value");
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&settings.issuer]);
        validation.set_audience(&[&settings.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Ok(Self {
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            lifetime: Duration::hours(settings.expiration_hours),
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
        })
    }

    /// Issues a token for `user`, valid from now for the configured lifetime.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, AppError> {
        let issued_at = Utc::now();
        let expires = issued_at + self.lifetime;

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.username.clone(),
            email: user.email.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at.timestamp(),
            exp: expires.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))?;

        Ok(IssuedToken { token, expires })
    }

    /// Verifies signature, issuer, audience and expiry, and returns the claims.
    /// Any failure is reported as `AppError::Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
