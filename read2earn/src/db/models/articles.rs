//! Database models for news articles.

use crate::types::ArticleId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// An `articles` row. Articles are ingested by the backend and never written by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Article {
    #[schema(value_type = String, format = "uuid")]
    pub id: ArticleId,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub category: String,
    pub country_code: String,
    pub image_url: Option<String>,
    pub source: Option<String>,
    pub external_id: Option<String>,
    pub read_count: i32,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
