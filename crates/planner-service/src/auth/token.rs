//! Session tokens: HS256-signed JWTs carrying a fingerprint of the password
//! they were issued for.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use planner_core::config::AuthConfig;
use planner_core::error::CoreError;

use crate::error::{ServiceError, ServiceResult};

/// Subject recorded in every token; there is a single user.
const TOKEN_SUBJECT: &str = "user";

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
    /// SHA-256 of the password the token was issued for, hex encoded.
    pub pwd: String,
}

/// Issues and verifies session tokens for the configured password.
///
/// Built once at startup from [`AuthConfig`]; handlers receive it already
/// constructed and never consult the environment themselves.
pub struct TokenAuthority {
    password_digest: Vec<u8>,
    password_fingerprint: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

// Secrets stay out of logs.
impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.sub = Some(TOKEN_SUBJECT.to_string());
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

impl TokenAuthority {
    /// ## Summary
    /// Builds the authority from auth settings.
    ///
    /// Returns `None` when no password is configured, which disables
    /// authentication altogether.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` if the token lifetime is zero.
    pub fn from_config(config: &AuthConfig) -> ServiceResult<Option<Self>> {
        let Some(password) = config.password() else {
            tracing::warn!("No password configured; API authentication is disabled");
            return Ok(None);
        };

        if config.token_ttl_hours == 0 {
            return Err(CoreError::InvalidConfiguration(
                "auth.token_ttl_hours must be at least 1".to_string(),
            )
            .into());
        }

        let key = match config.token_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => secret.as_bytes().to_vec(),
            None => Sha256::digest(format!("planner-session:{password}")).to_vec(),
        };

        let password_digest = Sha256::digest(password.as_bytes()).to_vec();
        Ok(Some(Self {
            password_fingerprint: hex::encode(&password_digest),
            password_digest,
            encoding_key: EncodingKey::from_secret(&key),
            decoding_key: DecodingKey::from_secret(&key),
            validation: validation(),
            ttl: TimeDelta::hours(i64::from(config.token_ttl_hours)),
        }))
    }

    /// ## Summary
    /// Checks `password` and issues a token valid from `now`.
    ///
    /// ## Errors
    /// Returns `NotAuthenticated` if the password is wrong.
    #[tracing::instrument(skip_all)]
    pub fn sign_in(&self, password: &str, now: DateTime<Utc>) -> ServiceResult<String> {
        let digest = Sha256::digest(password.as_bytes());
        if !bool::from(digest.as_slice().ct_eq(&self.password_digest)) {
            tracing::info!("Sign-in rejected: wrong password");
            return Err(ServiceError::NotAuthenticated);
        }

        let token = self.issue(now)?;
        tracing::info!("Sign-in succeeded");
        Ok(token)
    }

    /// ## Summary
    /// Issues a token expiring one TTL after `now`.
    ///
    /// ## Errors
    /// Returns `InvariantViolation` if the token fails to encode.
    pub fn issue(&self, now: DateTime<Utc>) -> ServiceResult<String> {
        let claims = Claims {
            sub: TOKEN_SUBJECT.to_string(),
            exp: (now + self.ttl).timestamp(),
            pwd: self.password_fingerprint.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_err| CoreError::InvariantViolation("session token failed to encode").into())
    }

    /// ## Summary
    /// Verifies a token's signature, expiry against the current time, subject
    /// and password fingerprint.
    ///
    /// ## Errors
    /// Returns `NotAuthenticated` if any check fails.
    #[tracing::instrument(skip_all)]
    pub fn verify(&self, token: &str) -> ServiceResult<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| {
                match err.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("Token rejected: expired"),
                    kind => tracing::debug!(?kind, "Token rejected"),
                }
                ServiceError::NotAuthenticated
            })?
            .claims;

        if !bool::from(claims.pwd.as_bytes().ct_eq(self.password_fingerprint.as_bytes())) {
            tracing::debug!("Token rejected: password changed");
            return Err(ServiceError::NotAuthenticated);
        }

        Ok(claims)
    }
}
