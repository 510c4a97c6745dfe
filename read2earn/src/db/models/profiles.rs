//! Database models for user profiles.

use crate::types::{ProfileId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A full `profiles` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Profile {
    #[schema(value_type = String, format = "uuid")]
    pub id: ProfileId,
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub email: String,
    pub points: i32,
    pub articles_read_today: i32,
    pub total_articles_read: i32,
    /// "free" or "premium"
    pub plan_type: String,
    pub country_code: Option<String>,
    pub referral_code: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub referred_by: Option<UserId>,
    pub usdt_wallet_trc20: Option<String>,
    pub usdt_wallet_bep20: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The four columns the dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProfileSummary {
    pub points: i32,
    pub articles_read_today: i32,
    pub total_articles_read: i32,
    pub plan_type: String,
}

impl From<&Profile> for ProfileSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            points: profile.points,
            articles_read_today: profile.articles_read_today,
            total_articles_read: profile.total_articles_read,
            plan_type: profile.plan_type.clone(),
        }
    }
}
