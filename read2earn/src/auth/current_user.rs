use crate::{
    AppState,
    auth::{
        permissions::require_role,
        session::{self, Session},
    },
    config::AuthConfig,
    db::models::user_roles::AppRole,
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use tracing::{debug, instrument, trace};

/// Extract a session from the `Authorization: Bearer` header
/// Returns:
/// - None: no Authorization header, or not a Bearer token
/// - Some(Ok(session)): token verified
/// - Some(Err(error)): Bearer token present but invalid
#[instrument(skip_all)]
fn try_bearer_auth(parts: &Parts, config: &AuthConfig) -> Option<Result<Session>> {
    let auth_header = parts.headers.get(axum::http::header::AUTHORIZATION)?;

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid authorization header: {e}"),
            }));
        }
    };

    let token = auth_str.strip_prefix("Bearer ")?;
    Some(session::verify_session_token(token.trim(), config))
}

/// Extract a session from the access token cookie
/// Returns:
/// - None: no matching cookie, or every matching cookie failed verification
/// - Some(Ok(session)): token verified
/// - Some(Err(error)): the Cookie header itself is unreadable
#[instrument(skip_all)]
fn try_cookie_auth(parts: &Parts, config: &AuthConfig) -> Option<Result<Session>> {
    let cookie_header = parts.headers.get(axum::http::header::COOKIE)?;

    let cookie_str = match cookie_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid cookie header: {e}"),
            }));
        }
    };

    for cookie in cookie_str.split(';') {
        if let Some((name, value)) = cookie.trim().split_once('=') {
            if name != config.cookie_name {
                continue;
            }
            match session::verify_session_token(value, config) {
                Ok(session) => return Some(Ok(session)),
                // Stale cookies are expected after expiry; fall through to unauthenticated
                Err(e) => trace!("Ignoring session cookie: {e}"),
            }
        }
    }
    None
}

/// Resolve the caller's session. Bearer tokens take precedence over cookies so API clients are
/// never silently authenticated as whoever owns the browser cookie.
fn resolve_session(parts: &Parts, config: &AuthConfig) -> Result<Option<Session>> {
    match try_bearer_auth(parts, config) {
        Some(Ok(session)) => {
            debug!("Found bearer session for user {}", session.user_id);
            return Ok(Some(session));
        }
        Some(Err(e)) => return Err(e),
        None => trace!("No bearer token presented"),
    }

    match try_cookie_auth(parts, config) {
        Some(Ok(session)) => {
            debug!("Found cookie session for user {}", session.user_id);
            Ok(Some(session))
        }
        Some(Err(e)) => Err(e),
        None => Ok(None),
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        resolve_session(parts, &state.config.auth)?.ok_or(Error::Unauthenticated { message: None })
    }
}

/// Session if the request carries a valid one. Page handlers use this to choose between
/// rendering and redirecting, so invalid credentials read as signed out.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = Infallible;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> std::result::Result<Self, Self::Rejection> {
        match resolve_session(parts, &state.config.auth) {
            Ok(session) => Ok(MaybeSession(session)),
            Err(e) => {
                debug!("Treating request as signed out: {e}");
                Ok(MaybeSession(None))
            }
        }
    }
}

/// Session of a caller holding the `admin` app role.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let session = Session::from_request_parts(parts, state).await?;
        require_role(state.backend.as_ref(), &session, AppRole::Admin, "admin endpoints").await?;
        Ok(AdminSession(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::{SessionClaims, create_session_token};
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: Some("test-secret".to_string()),
            ..Default::default()
        }
    }

    fn token_for(user_id: Uuid) -> String {
        create_session_token(&SessionClaims::new(user_id, None, chrono::Duration::hours(1)), &config()).unwrap()
    }

    fn parts_with(headers: &[(&str, String)]) -> Parts {
        let mut builder = axum::http::Request::builder().uri("http://localhost/test");
        for (name, value) in headers {
            builder = builder.header(*name, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn no_credentials_is_signed_out() {
        assert!(resolve_session(&parts_with(&[]), &config()).unwrap().is_none());
    }

    #[test]
    fn bearer_token_is_verified() {
        let user_id = Uuid::new_v4();
        let parts = parts_with(&[("authorization", format!("Bearer {}", token_for(user_id)))]);
        assert_eq!(resolve_session(&parts, &config()).unwrap().unwrap().user_id, user_id);
    }

    #[test]
    fn invalid_bearer_token_is_rejected() {
        let parts = parts_with(&[("authorization", "Bearer nonsense".to_string())]);
        let err = resolve_session(&parts, &config()).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn non_bearer_authorization_is_ignored() {
        let parts = parts_with(&[("authorization", "Basic dXNlcjpwYXNz".to_string())]);
        assert!(resolve_session(&parts, &config()).unwrap().is_none());
    }

    #[test]
    fn cookie_session_is_found_among_other_cookies() {
        let user_id = Uuid::new_v4();
        let cookie = format!("theme=dark; sb-access-token={}; lang=en", token_for(user_id));
        let parts = parts_with(&[("cookie", cookie)]);
        assert_eq!(resolve_session(&parts, &config()).unwrap().unwrap().user_id, user_id);
    }

    #[test]
    fn stale_cookie_is_skipped() {
        let parts = parts_with(&[("cookie", "sb-access-token=expired.or.bogus".to_string())]);
        assert!(resolve_session(&parts, &config()).unwrap().is_none());
    }
}
