use crate::db::errors::Result;
use crate::db::models::notification_settings::{NotificationSettings, NotificationSettingsUpsertDBRequest};
use crate::types::{UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

pub struct NotificationSettingsRepo<'c> {
    db: &'c mut PgConnection,
}

impl<'c> NotificationSettingsRepo<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn get_for_user(&mut self, user_id: UserId) -> Result<Option<NotificationSettings>> {
        let settings = sqlx::query_as::<_, NotificationSettings>("SELECT * FROM notification_settings WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(settings)
    }

    /// Insert the user's row or overwrite both preferences on the existing one
    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id)), err)]
    pub async fn upsert(&mut self, request: &NotificationSettingsUpsertDBRequest) -> Result<NotificationSettings> {
        let settings = sqlx::query_as::<_, NotificationSettings>(
            r#"
            INSERT INTO notification_settings (user_id, push_notifications, notification_interval_hours)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET
                push_notifications = EXCLUDED.push_notifications,
                notification_interval_hours = EXCLUDED.notification_interval_hours,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(request.push_notifications)
        .bind(request.notification_interval_hours)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(settings)
    }
}
