use crate::db::errors::Result;
use crate::db::models::user_roles::AppRole;
use crate::types::{UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

pub struct UserRoles<'c> {
    db: &'c mut PgConnection,
}

impl<'c> UserRoles<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Calls the `has_role` stored procedure so the check matches what row-level policies see.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id), role = %role), err)]
    pub async fn has_role(&mut self, user_id: UserId, role: AppRole) -> Result<bool> {
        let granted: bool = sqlx::query_scalar("SELECT has_role($1, $2)")
            .bind(user_id)
            .bind(role)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(granted)
    }
}
