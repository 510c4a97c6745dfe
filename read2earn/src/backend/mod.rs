//! Query surface the views and handlers read through.
//!
//! [`Backend`] hides where rows come from. [`postgres::PostgresBackend`] runs the repositories
//! against the hosted database; [`memory::InMemoryBackend`] keeps seeded fixtures in process for
//! tests and for the demo mode selected with `backend: in_memory`.
//!
//! Every method reports failures as [`DbError`](crate::db::errors::DbError) so callers handle both
//! implementations the same way. In particular [`Backend::profile_summary`] is a single-row read:
//! a user without a profile row gets `DbError::NotFound`.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::BackendKind;
use crate::db::errors::Result;
use crate::db::handlers::{ReadingHistoryFilter, WithdrawalFilter};
use crate::db::models::{
    api_keys::ProviderApiKey,
    articles::Article,
    notification_settings::{NotificationSettings, NotificationSettingsUpsertDBRequest},
    profiles::{Profile, ProfileSummary},
    reading_history::ReadingHistoryEntry,
    system_config::SystemConfigEntry,
    user_roles::AppRole,
    withdrawals::{Withdrawal, WithdrawalCreateDBRequest},
};
use crate::types::{ArticleId, UserId};

pub mod memory;
pub mod postgres;

pub use memory::{Fixtures, InMemoryBackend};
pub use postgres::PostgresBackend;

/// Build the configured backend. The pool is only required for `BackendKind::Postgres`.
pub fn create_backend(kind: &BackendKind, pool: Option<PgPool>) -> anyhow::Result<Arc<dyn Backend>> {
    match (kind, pool) {
        (BackendKind::Postgres, Some(pool)) => Ok(Arc::new(PostgresBackend::new(pool))),
        (BackendKind::Postgres, None) => anyhow::bail!("postgres backend selected but no database pool was created"),
        (BackendKind::InMemory, _) => Ok(Arc::new(InMemoryBackend::from_fixtures(Fixtures::demo()))),
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Dashboard columns of the user's profile. Missing row is `DbError::NotFound`.
    async fn profile_summary(&self, user_id: UserId) -> Result<ProfileSummary>;

    async fn profile(&self, user_id: UserId) -> Result<Option<Profile>>;

    /// Most recently published articles, newest first.
    async fn latest_articles(&self, limit: usize) -> Result<Vec<Article>>;

    async fn article(&self, id: ArticleId) -> Result<Option<Article>>;

    /// Append a reading history row; unknown articles are a foreign key violation.
    async fn record_read(&self, user_id: UserId, article_id: ArticleId) -> Result<ReadingHistoryEntry>;

    async fn reading_history(&self, filter: &ReadingHistoryFilter) -> Result<Vec<ReadingHistoryEntry>>;

    /// Insert a pending withdrawal. Fails with `DbError::InsufficientPoints` when the request does not
    /// fit in the profile balance minus the user's other pending requests, and with
    /// `DbError::NotFound` when the user has no profile.
    async fn create_withdrawal(&self, request: &WithdrawalCreateDBRequest) -> Result<Withdrawal>;

    /// Sum of `points_used` over the user's pending withdrawals.
    async fn pending_withdrawal_points(&self, user_id: UserId) -> Result<i64>;

    async fn withdrawals(&self, filter: &WithdrawalFilter) -> Result<Vec<Withdrawal>>;

    async fn notification_settings(&self, user_id: UserId) -> Result<Option<NotificationSettings>>;

    async fn upsert_notification_settings(&self, request: &NotificationSettingsUpsertDBRequest) -> Result<NotificationSettings>;

    async fn has_role(&self, user_id: UserId, role: AppRole) -> Result<bool>;

    async fn system_config(&self) -> Result<Vec<SystemConfigEntry>>;

    async fn api_keys(&self, provider: Option<&str>) -> Result<Vec<ProviderApiKey>>;
}
