//! [`Backend`] over the PostgreSQL repositories.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::Backend;
use crate::db::errors::Result;
use crate::db::handlers::{
    ArticleFilter, Articles, NotificationSettingsRepo, Profiles, ProviderApiKeys, ReadingHistory, ReadingHistoryFilter, Repository,
    SystemConfig, UserRoles, WithdrawalFilter, Withdrawals, api_keys::ProviderApiKeyFilter,
};
use crate::db::models::{
    api_keys::ProviderApiKey,
    articles::Article,
    notification_settings::{NotificationSettings, NotificationSettingsUpsertDBRequest},
    profiles::{Profile, ProfileSummary},
    reading_history::{ReadingHistoryCreateDBRequest, ReadingHistoryEntry},
    system_config::SystemConfigEntry,
    user_roles::AppRole,
    withdrawals::{Withdrawal, WithdrawalCreateDBRequest},
};
use crate::types::{ArticleId, UserId};

/// Each call checks out its own pooled connection, so concurrent reads never share one.
#[derive(Debug, Clone)]
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Backend for PostgresBackend {
    #[instrument(skip(self), err)]
    async fn profile_summary(&self, user_id: UserId) -> Result<ProfileSummary> {
        let mut conn = self.pool.acquire().await?;
        Profiles::new(&mut conn).summary(user_id).await
    }

    #[instrument(skip(self), err)]
    async fn profile(&self, user_id: UserId) -> Result<Option<Profile>> {
        let mut conn = self.pool.acquire().await?;
        Profiles::new(&mut conn).get_by_user_id(user_id).await
    }

    #[instrument(skip(self), err)]
    async fn latest_articles(&self, limit: usize) -> Result<Vec<Article>> {
        let mut conn = self.pool.acquire().await?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Articles::new(&mut conn).list(&ArticleFilter::latest(limit)).await
    }

    #[instrument(skip(self), err)]
    async fn article(&self, id: ArticleId) -> Result<Option<Article>> {
        let mut conn = self.pool.acquire().await?;
        Articles::new(&mut conn).get_by_id(id).await
    }

    #[instrument(skip(self), err)]
    async fn record_read(&self, user_id: UserId, article_id: ArticleId) -> Result<ReadingHistoryEntry> {
        let mut conn = self.pool.acquire().await?;
        ReadingHistory::new(&mut conn)
            .create(&ReadingHistoryCreateDBRequest { user_id, article_id })
            .await
    }

    #[instrument(skip(self), err)]
    async fn reading_history(&self, filter: &ReadingHistoryFilter) -> Result<Vec<ReadingHistoryEntry>> {
        let mut conn = self.pool.acquire().await?;
        ReadingHistory::new(&mut conn).list(filter).await
    }

    #[instrument(skip(self), err)]
    async fn create_withdrawal(&self, request: &WithdrawalCreateDBRequest) -> Result<Withdrawal> {
        let mut conn = self.pool.acquire().await?;
        Withdrawals::new(&mut conn).create(request).await
    }

    #[instrument(skip(self), err)]
    async fn pending_withdrawal_points(&self, user_id: UserId) -> Result<i64> {
        let mut conn = self.pool.acquire().await?;
        Withdrawals::new(&mut conn).pending_points(user_id).await
    }

    #[instrument(skip(self), err)]
    async fn withdrawals(&self, filter: &WithdrawalFilter) -> Result<Vec<Withdrawal>> {
        let mut conn = self.pool.acquire().await?;
        Withdrawals::new(&mut conn).list(filter).await
    }

    #[instrument(skip(self), err)]
    async fn notification_settings(&self, user_id: UserId) -> Result<Option<NotificationSettings>> {
        let mut conn = self.pool.acquire().await?;
        NotificationSettingsRepo::new(&mut conn).get_for_user(user_id).await
    }

    #[instrument(skip(self), err)]
    async fn upsert_notification_settings(&self, request: &NotificationSettingsUpsertDBRequest) -> Result<NotificationSettings> {
        let mut conn = self.pool.acquire().await?;
        NotificationSettingsRepo::new(&mut conn).upsert(request).await
    }

    #[instrument(skip(self), err)]
    async fn has_role(&self, user_id: UserId, role: AppRole) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        UserRoles::new(&mut conn).has_role(user_id, role).await
    }

    #[instrument(skip(self), err)]
    async fn system_config(&self) -> Result<Vec<SystemConfigEntry>> {
        let mut conn = self.pool.acquire().await?;
        SystemConfig::new(&mut conn).list().await
    }

    #[instrument(skip(self), err)]
    async fn api_keys(&self, provider: Option<&str>) -> Result<Vec<ProviderApiKey>> {
        let mut conn = self.pool.acquire().await?;
        let filter = ProviderApiKeyFilter {
            provider: provider.map(str::to_string),
        };
        ProviderApiKeys::new(&mut conn).list(&filter).await
    }
}
