//! JWT session token verification.
//!
//! Tokens are issued by the external auth provider and signed with a shared HS256 secret. The
//! `sub` claim is the user id every per-user table is keyed on.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    config::AuthConfig,
    errors::{Error, Result},
    types::UserId,
};

/// Claims read from the provider's access token. Unknown claims are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Provider-level role such as "authenticated"; app roles come from `user_roles`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

impl SessionClaims {
    pub fn new(user_id: UserId, email: Option<String>, ttl: chrono::Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email,
            role: Some("authenticated".to_string()),
            aud: None,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// The identified caller, passed explicitly into views and handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub email: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

fn secret(config: &AuthConfig) -> Result<&str> {
    config.jwt_secret.as_deref().ok_or_else(|| Error::Internal {
        operation: "verify session: auth.jwt_secret is required".to_string(),
    })
}

/// Sign claims with the shared secret. Used for local development and tests; production tokens
/// come from the auth provider.
pub fn create_session_token(claims: &SessionClaims, config: &AuthConfig) -> Result<String> {
    let key = EncodingKey::from_secret(secret(config)?.as_bytes());
    encode(&Header::new(Algorithm::HS256), claims, &key).map_err(|e| Error::Internal {
        operation: format!("create JWT: {e}"),
    })
}

/// Verify and decode a JWT session token
pub fn verify_session_token(token: &str, config: &AuthConfig) -> Result<Session> {
    let key = DecodingKey::from_secret(secret(config)?.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    match &config.audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        // Client errors (401) - malformed tokens, invalid claims, expired tokens
        jsonwebtoken::errors::ErrorKind::InvalidToken
        | jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::ExpiredSignature
        | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
        | jsonwebtoken::errors::ErrorKind::InvalidIssuer
        | jsonwebtoken::errors::ErrorKind::InvalidAudience
        | jsonwebtoken::errors::ErrorKind::InvalidSubject
        | jsonwebtoken::errors::ErrorKind::ImmatureSignature
        | jsonwebtoken::errors::ErrorKind::Base64(_)
        | jsonwebtoken::errors::ErrorKind::Json(_)
        | jsonwebtoken::errors::ErrorKind::Utf8(_)
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => Error::Unauthenticated { message: None },

        // Server errors (500) - key issues, internal failures
        jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_)
        | jsonwebtoken::errors::ErrorKind::RsaFailedSigning
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName
        | jsonwebtoken::errors::ErrorKind::InvalidKeyFormat
        | jsonwebtoken::errors::ErrorKind::MissingAlgorithm
        | jsonwebtoken::errors::ErrorKind::Crypto(_) => Error::Internal {
            operation: format!("JWT verification: {e}"),
        },

        _ => Error::Internal {
            operation: format!("JWT verification (unknown error): {e}"),
        },
    })?;

    Ok(Session::from(token_data.claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: Some("test-secret-key-for-jwt".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_and_verify_session_token() {
        let config = auth_config();
        let user_id = Uuid::new_v4();
        let claims = SessionClaims::new(user_id, Some("reader@example.com".to_string()), chrono::Duration::hours(1));

        let token = create_session_token(&claims, &config).unwrap();
        let session = verify_session_token(&token, &config).unwrap();

        assert_eq!(session.user_id, user_id);
        assert_eq!(session.email.as_deref(), Some("reader@example.com"));
        assert_eq!(session.expires_at.timestamp(), claims.exp);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = auth_config();
        let claims = SessionClaims::new(Uuid::new_v4(), None, chrono::Duration::hours(1));
        let token = create_session_token(&claims, &config).unwrap();

        let other = AuthConfig {
            jwt_secret: Some("different-secret".to_string()),
            ..Default::default()
        };
        assert!(matches!(verify_session_token(&token, &other).unwrap_err(), Error::Unauthenticated { .. }));
    }

    #[test]
    fn test_verify_expired_token() {
        let config = auth_config();
        let claims = SessionClaims::new(Uuid::new_v4(), None, chrono::Duration::hours(-2));
        let token = create_session_token(&claims, &config).unwrap();

        assert!(matches!(verify_session_token(&token, &config).unwrap_err(), Error::Unauthenticated { .. }));
    }

    #[test]
    fn test_audience_checked_only_when_configured() {
        let mut claims = SessionClaims::new(Uuid::new_v4(), None, chrono::Duration::hours(1));
        claims.aud = Some("authenticated".to_string());

        let config = auth_config();
        let token = create_session_token(&claims, &config).unwrap();
        assert!(verify_session_token(&token, &config).is_ok());

        let strict = AuthConfig {
            audience: Some("authenticated".to_string()),
            ..auth_config()
        };
        assert!(verify_session_token(&token, &strict).is_ok());

        let mismatched = AuthConfig {
            audience: Some("service_role".to_string()),
            ..auth_config()
        };
        assert!(matches!(verify_session_token(&token, &mismatched).unwrap_err(), Error::Unauthenticated { .. }));
    }

    #[test]
    fn test_verify_malformed_token() {
        let config = auth_config();

        for token in ["not.a.token", "invalid", "", "too.many.parts.in.this.token"] {
            assert!(
                matches!(verify_session_token(token, &config).unwrap_err(), Error::Unauthenticated { .. }),
                "Expected Unauthenticated error for token: {token}"
            );
        }
    }

    #[test]
    fn test_missing_secret_is_internal() {
        let config = AuthConfig::default();
        assert!(matches!(verify_session_token("a.b.c", &config).unwrap_err(), Error::Internal { .. }));
    }
}
