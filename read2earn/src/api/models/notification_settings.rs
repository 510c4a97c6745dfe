use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::notification_settings::{
    DEFAULT_INTERVAL_HOURS, DEFAULT_PUSH_NOTIFICATIONS, NotificationSettings, NotificationSettingsUpsertDBRequest,
};
use crate::errors::{Error, Result};
use crate::types::UserId;

pub const MIN_INTERVAL_HOURS: i32 = 1;
pub const MAX_INTERVAL_HOURS: i32 = 24;

/// A user's push notification preferences. `updated_at` is absent until they first save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NotificationSettingsResponse {
    pub push_notifications: bool,
    pub notification_interval_hours: i32,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for NotificationSettingsResponse {
    fn default() -> Self {
        Self {
            push_notifications: DEFAULT_PUSH_NOTIFICATIONS,
            notification_interval_hours: DEFAULT_INTERVAL_HOURS,
            updated_at: None,
        }
    }
}

impl From<NotificationSettings> for NotificationSettingsResponse {
    fn from(settings: NotificationSettings) -> Self {
        Self {
            push_notifications: settings.push_notifications,
            notification_interval_hours: settings.notification_interval_hours,
            updated_at: Some(settings.updated_at),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NotificationSettingsUpdate {
    pub push_notifications: bool,
    /// Hours between reminders, 1 to 24
    #[schema(minimum = 1, maximum = 24, example = 4)]
    pub notification_interval_hours: i32,
}

impl NotificationSettingsUpdate {
    pub fn into_db_request(self, user_id: UserId) -> Result<NotificationSettingsUpsertDBRequest> {
        if !(MIN_INTERVAL_HOURS..=MAX_INTERVAL_HOURS).contains(&self.notification_interval_hours) {
            return Err(Error::BadRequest {
                message: format!(
                    "Notification interval must be between {MIN_INTERVAL_HOURS} and {MAX_INTERVAL_HOURS} hours"
                ),
            });
        }
        Ok(NotificationSettingsUpsertDBRequest {
            user_id,
            push_notifications: self.push_notifications,
            notification_interval_hours: self.notification_interval_hours,
        })
    }
}
