use crate::db::errors::Result;
use crate::db::models::profiles::{Profile, ProfileSummary};
use crate::types::{UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Profiles<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Profiles<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Full profile row for a user, if one exists.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn get_by_user_id(&mut self, user_id: UserId) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(profile)
    }

    /// Single-row read of the dashboard columns. A missing row is `DbError::NotFound`.
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn summary(&mut self, user_id: UserId) -> Result<ProfileSummary> {
        let summary = sqlx::query_as::<_, ProfileSummary>(
            r#"
            SELECT points, articles_read_today, total_articles_read, plan_type
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(summary)
    }
}
