//! Session context and authorization.
//!
//! Sign-in happens at the external auth provider. This service only verifies the access token it
//! issued and turns it into an explicit [`Session`](session::Session) value, which handlers pass on
//! to the views. Nothing about the caller is held in global state.
//!
//! # Token sources
//!
//! - `Authorization: Bearer <jwt>` for the mobile client and API callers. A present but invalid
//!   token is a 401.
//! - The `auth.cookie_name` cookie (default `sb-access-token`) for browser page loads. Invalid or
//!   expired cookies are skipped and the request is treated as signed out.
//!
//! # Extractors
//!
//! - [`Session`](session::Session): required session, 401 otherwise
//! - [`MaybeSession`](current_user::MaybeSession): optional session for pages that redirect
//! - [`AdminSession`](current_user::AdminSession): session whose user holds the `admin` role, 403 otherwise
//!
//! ```ignore
//! async fn handler(session: Session, State(state): State<AppState>) -> Result<Json<Profile>> {
//!     state.backend.profile(session.user_id).await?;
//!     // ...
//! }
//! ```

pub mod current_user;
pub mod permissions;
pub mod session;
