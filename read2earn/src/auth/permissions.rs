//! Role checks backed by the `has_role` procedure.

use crate::{
    backend::Backend,
    auth::session::Session,
    db::models::user_roles::AppRole,
    errors::{Error, Result},
    types::abbrev_uuid,
};
use tracing::instrument;

/// Fail with 403 unless the session's user holds `role`.
#[instrument(skip(backend, session), fields(user_id = %abbrev_uuid(&session.user_id), role = %role))]
pub async fn require_role(backend: &dyn Backend, session: &Session, role: AppRole, action: &str) -> Result<()> {
    if backend.has_role(session.user_id, role).await? {
        Ok(())
    } else {
        Err(Error::InsufficientPermissions {
            role: role.to_string(),
            action: action.to_string(),
        })
    }
}
