//! HS256 session tokens.
//!
//! One service both issues the token after a successful one-time-code login
//! and validates it on every authenticated request, so the signing key
//! never leaves this process.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::{Clock, SessionToken, SessionValidator, TokenIssuer};

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    email: String,
    #[serde(default)]
    email_verified: bool,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Issues and validates HS256 JWT session tokens.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl_secs: u64,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(
        secret: &SecretString,
        issuer: impl Into<String>,
        ttl_secs: u64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let key = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(key),
            decoding_key: DecodingKey::from_secret(key),
            issuer: issuer.into(),
            ttl_secs,
            clock,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = true;
        validation
    }
}

#[async_trait]
impl TokenIssuer for JwtTokenService {
    async fn issue(&self, user: &AuthenticatedUser) -> Result<SessionToken, AuthError> {
        let issued_at = self.clock.now();
        let expires_at = issued_at.plus_secs(self.ttl_secs);
        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            email_verified: user.email_verified,
            iss: self.issuer.clone(),
            iat: issued_at.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::service_unavailable(format!("token signing failed: {}", e)))?;

        Ok(SessionToken { token, expires_at })
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation()).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Session token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::debug!("Session token rejected: {}", e);
                        AuthError::InvalidToken
                    }
                }
            },
        )?;
        let claims = data.claims;

        let user_id = UserId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(user_id, claims.email, claims.email_verified))
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.issuer)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
