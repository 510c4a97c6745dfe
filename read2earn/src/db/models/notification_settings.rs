//! Database models for push notification preferences.

use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_PUSH_NOTIFICATIONS: bool = true;
pub const DEFAULT_INTERVAL_HOURS: i32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct NotificationSettings {
    pub id: Uuid,
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub push_notifications: bool,
    pub notification_interval_hours: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database request for inserting or replacing a user's preferences
#[derive(Debug, Clone)]
pub struct NotificationSettingsUpsertDBRequest {
    pub user_id: UserId,
    pub push_notifications: bool,
    pub notification_interval_hours: i32,
}
