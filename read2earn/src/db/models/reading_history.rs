//! Database models for the reading history log.

use crate::types::{ArticleId, ReadingHistoryId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Column default for `reading_history.points_earned`.
pub const DEFAULT_POINTS_EARNED: i32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ReadingHistoryEntry {
    #[schema(value_type = String, format = "uuid")]
    pub id: ReadingHistoryId,
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    #[schema(value_type = String, format = "uuid")]
    pub article_id: ArticleId,
    pub points_earned: i32,
    pub read_at: DateTime<Utc>,
}

/// Database request for appending a read. `points_earned` and `read_at` take the column defaults.
#[derive(Debug, Clone)]
pub struct ReadingHistoryCreateDBRequest {
    pub user_id: UserId,
    pub article_id: ArticleId,
}
