//! Database models for upstream news provider keys.

use crate::types::ApiKeyId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An `api_keys` row. Holds the raw key, so it is never serialized straight to a client.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, FromRow)]
pub struct ProviderApiKey {
    pub id: ApiKeyId,
    /// e.g. "newsapi"
    pub provider: String,
    pub key_value: String,
    pub is_active: bool,
    pub usage_count: i32,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
