//! In-process [`Backend`] over seeded fixtures.
//!
//! Mirrors the database's observable behaviour closely enough for the HTTP layer: column defaults
//! are applied on insert, single-row reads report `DbError::NotFound`, inserts referencing unknown
//! articles report a foreign key violation, and notification settings upsert on `user_id`.
//!
//! Either dashboard read can be made to fail with [`InMemoryBackend::fail_profile_reads`] and
//! [`InMemoryBackend::fail_article_reads`].

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Backend;
use crate::db::errors::{DbError, Result};
use crate::db::handlers::{ReadingHistoryFilter, WithdrawalFilter};
use crate::db::models::{
    api_keys::ProviderApiKey,
    articles::Article,
    notification_settings::{NotificationSettings, NotificationSettingsUpsertDBRequest},
    profiles::{Profile, ProfileSummary},
    reading_history::{DEFAULT_POINTS_EARNED, ReadingHistoryEntry},
    system_config::SystemConfigEntry,
    user_roles::{AppRole, UserRole},
    withdrawals::{STATUS_PENDING, Withdrawal, WithdrawalCreateDBRequest},
};
use crate::types::{ArticleId, UserId};

/// Rows an [`InMemoryBackend`] starts with.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub profiles: Vec<Profile>,
    pub articles: Vec<Article>,
    pub roles: Vec<UserRole>,
    pub api_keys: Vec<ProviderApiKey>,
    pub system_config: Vec<SystemConfigEntry>,
}

impl Fixtures {
    /// A handful of articles and the default system settings, for running without a database.
    pub fn demo() -> Self {
        let now = Utc::now();
        let articles = [
            ("Markets rally as inflation cools", "business", "US"),
            ("New battery chemistry doubles range", "technology", "DE"),
            ("City marathon draws record crowd", "sports", "GB"),
            ("Researchers map deep ocean currents", "science", "AU"),
            ("Streaming service announces price change", "entertainment", "US"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (title, category, country))| Article {
            id: Uuid::new_v4(),
            title: title.to_string(),
            summary: Some(format!("{title}. Read the full story to earn points.")),
            content: format!("{title}.\n\nThis is demo content served without a database."),
            category: category.to_string(),
            country_code: country.to_string(),
            image_url: None,
            source: Some("demo".to_string()),
            external_id: None,
            read_count: 0,
            published_at: now - Duration::hours(i as i64),
            created_at: now,
        })
        .collect();

        let system_config = [
            ("points_per_usdt", "1000", "Points required for one USDT"),
            ("min_withdrawal_usdt", "5", "Minimum withdrawal amount in USDT"),
            ("free_daily_articles", "50", "Daily article quota shown to free plan users"),
            ("premium_daily_articles", "100", "Daily article quota shown to premium plan users"),
        ]
        .into_iter()
        .map(|(key, value, description)| SystemConfigEntry {
            id: Uuid::new_v4(),
            key: key.to_string(),
            value: value.to_string(),
            description: Some(description.to_string()),
            updated_at: now,
        })
        .collect();

        Self {
            articles,
            system_config,
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
struct Store {
    profiles: HashMap<UserId, Profile>,
    articles: Vec<Article>,
    reading_history: Vec<ReadingHistoryEntry>,
    withdrawals: Vec<Withdrawal>,
    notification_settings: HashMap<UserId, NotificationSettings>,
    roles: Vec<UserRole>,
    api_keys: Vec<ProviderApiKey>,
    system_config: Vec<SystemConfigEntry>,
}

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    store: RwLock<Store>,
    fail_profile: AtomicBool,
    fail_articles: AtomicBool,
}

fn injected_failure(what: &str) -> DbError {
    DbError::Other(anyhow::anyhow!("injected failure reading {what}"))
}

fn pending_points(store: &Store, user_id: UserId) -> i64 {
    store
        .withdrawals
        .iter()
        .filter(|w| w.user_id == user_id && w.status == STATUS_PENDING)
        .map(|w| i64::from(w.points_used))
        .sum()
}

fn page<T>(rows: impl Iterator<Item = T>, skip: i64, limit: i64) -> Vec<T> {
    let skip = usize::try_from(skip).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);
    rows.skip(skip).take(limit).collect()
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixtures(fixtures: Fixtures) -> Self {
        let store = Store {
            profiles: fixtures.profiles.into_iter().map(|p| (p.user_id, p)).collect(),
            articles: fixtures.articles,
            roles: fixtures.roles,
            api_keys: fixtures.api_keys,
            system_config: fixtures.system_config,
            ..Default::default()
        };
        Self {
            store: RwLock::new(store),
            ..Default::default()
        }
    }

    /// Make every profile read fail until switched off again
    pub fn fail_profile_reads(&self, fail: bool) {
        self.fail_profile.store(fail, Ordering::SeqCst);
    }

    /// Make every article read fail until switched off again
    pub fn fail_article_reads(&self, fail: bool) {
        self.fail_articles.store(fail, Ordering::SeqCst);
    }

    pub async fn insert_profile(&self, profile: Profile) {
        self.store.write().await.profiles.insert(profile.user_id, profile);
    }

    pub async fn insert_article(&self, article: Article) {
        self.store.write().await.articles.push(article);
    }

    pub async fn insert_api_key(&self, key: ProviderApiKey) {
        self.store.write().await.api_keys.push(key);
    }

    pub async fn grant_role(&self, user_id: UserId, role: AppRole) {
        let mut store = self.store.write().await;
        if !store.roles.iter().any(|r| r.user_id == user_id && r.role == role) {
            store.roles.push(UserRole {
                id: Uuid::new_v4(),
                user_id,
                role,
                created_at: Utc::now(),
            });
        }
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn profile_summary(&self, user_id: UserId) -> Result<ProfileSummary> {
        if self.fail_profile.load(Ordering::SeqCst) {
            return Err(injected_failure("profile"));
        }
        let store = self.store.read().await;
        store.profiles.get(&user_id).map(ProfileSummary::from).ok_or(DbError::NotFound)
    }

    async fn profile(&self, user_id: UserId) -> Result<Option<Profile>> {
        if self.fail_profile.load(Ordering::SeqCst) {
            return Err(injected_failure("profile"));
        }
        Ok(self.store.read().await.profiles.get(&user_id).cloned())
    }

    async fn latest_articles(&self, limit: usize) -> Result<Vec<Article>> {
        if self.fail_articles.load(Ordering::SeqCst) {
            return Err(injected_failure("articles"));
        }
        let mut articles = self.store.read().await.articles.clone();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        articles.truncate(limit);
        Ok(articles)
    }

    async fn article(&self, id: ArticleId) -> Result<Option<Article>> {
        if self.fail_articles.load(Ordering::SeqCst) {
            return Err(injected_failure("articles"));
        }
        Ok(self.store.read().await.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn record_read(&self, user_id: UserId, article_id: ArticleId) -> Result<ReadingHistoryEntry> {
        let mut store = self.store.write().await;
        if !store.articles.iter().any(|a| a.id == article_id) {
            return Err(DbError::ForeignKeyViolation {
                constraint: Some("reading_history_article_id_fkey".to_string()),
                table: Some("reading_history".to_string()),
                message: format!("article {article_id} does not exist"),
            });
        }
        let entry = ReadingHistoryEntry {
            id: Uuid::new_v4(),
            user_id,
            article_id,
            points_earned: DEFAULT_POINTS_EARNED,
            read_at: Utc::now(),
        };
        store.reading_history.push(entry.clone());
        Ok(entry)
    }

    async fn reading_history(&self, filter: &ReadingHistoryFilter) -> Result<Vec<ReadingHistoryEntry>> {
        let store = self.store.read().await;
        let mut rows: Vec<_> = store.reading_history.iter().filter(|e| e.user_id == filter.user_id).cloned().collect();
        rows.sort_by(|a, b| b.read_at.cmp(&a.read_at));
        Ok(page(rows.into_iter(), filter.skip, filter.limit))
    }

    async fn create_withdrawal(&self, request: &WithdrawalCreateDBRequest) -> Result<Withdrawal> {
        if request.points_used <= 0 {
            return Err(DbError::CheckViolation {
                constraint: Some("withdrawals_points_used_check".to_string()),
                table: Some("withdrawals".to_string()),
                message: "points_used must be positive".to_string(),
            });
        }

        // One write guard covers the balance check and the insert
        let mut store = self.store.write().await;
        let balance = store.profiles.get(&request.user_id).ok_or(DbError::NotFound)?.points;
        let available = i64::from(balance) - pending_points(&store, request.user_id);
        if i64::from(request.points_used) > available {
            return Err(DbError::InsufficientPoints {
                requested: request.points_used,
                available: available.max(0),
            });
        }

        let withdrawal = Withdrawal {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            points_used: request.points_used,
            usdt_amount: request.usdt_amount,
            wallet_address: request.wallet_address.clone(),
            wallet_type: request.wallet_type.as_str().to_string(),
            status: STATUS_PENDING.to_string(),
            admin_notes: None,
            processed_at: None,
            created_at: Utc::now(),
        };
        store.withdrawals.push(withdrawal.clone());
        Ok(withdrawal)
    }

    async fn pending_withdrawal_points(&self, user_id: UserId) -> Result<i64> {
        Ok(pending_points(&*self.store.read().await, user_id))
    }

    async fn withdrawals(&self, filter: &WithdrawalFilter) -> Result<Vec<Withdrawal>> {
        let store = self.store.read().await;
        let mut rows: Vec<_> = store.withdrawals.iter().filter(|w| w.user_id == filter.user_id).cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page(rows.into_iter(), filter.skip, filter.limit))
    }

    async fn notification_settings(&self, user_id: UserId) -> Result<Option<NotificationSettings>> {
        Ok(self.store.read().await.notification_settings.get(&user_id).cloned())
    }

    async fn upsert_notification_settings(&self, request: &NotificationSettingsUpsertDBRequest) -> Result<NotificationSettings> {
        let mut store = self.store.write().await;
        let now = Utc::now();
        let settings = store
            .notification_settings
            .entry(request.user_id)
            .and_modify(|s| {
                s.push_notifications = request.push_notifications;
                s.notification_interval_hours = request.notification_interval_hours;
                s.updated_at = now;
            })
            .or_insert_with(|| NotificationSettings {
                id: Uuid::new_v4(),
                user_id: request.user_id,
                push_notifications: request.push_notifications,
                notification_interval_hours: request.notification_interval_hours,
                created_at: now,
                updated_at: now,
            });
        Ok(settings.clone())
    }

    async fn has_role(&self, user_id: UserId, role: AppRole) -> Result<bool> {
        Ok(self.store.read().await.roles.iter().any(|r| r.user_id == user_id && r.role == role))
    }

    async fn system_config(&self) -> Result<Vec<SystemConfigEntry>> {
        let mut entries = self.store.read().await.system_config.clone();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }

    async fn api_keys(&self, provider: Option<&str>) -> Result<Vec<ProviderApiKey>> {
        let store = self.store.read().await;
        let mut keys: Vec<_> = store
            .api_keys
            .iter()
            .filter(|k| provider.is_none_or(|p| k.provider == p))
            .cloned()
            .collect();
        keys.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::withdrawals::WalletType;
    use crate::test_utils::{article_published_at, profile_for};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let backend = InMemoryBackend::new();
        let err = backend.profile_summary(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }

    #[tokio::test]
    async fn profile_summary_reads_dashboard_columns() {
        let backend = InMemoryBackend::new();
        let user_id = Uuid::new_v4();
        backend.insert_profile(profile_for(user_id, 2500, "premium")).await;

        let summary = backend.profile_summary(user_id).await.unwrap();
        assert_eq!(summary.points, 2500);
        assert_eq!(summary.plan_type, "premium");
    }

    #[tokio::test]
    async fn latest_articles_are_newest_first_and_limited() {
        let backend = InMemoryBackend::new();
        for hours_ago in [5, 1, 3, 2, 4] {
            backend.insert_article(article_published_at(hours_ago)).await;
        }

        let latest = backend.latest_articles(3).await.unwrap();
        assert_eq!(latest.len(), 3);
        assert!(latest.windows(2).all(|w| w[0].published_at >= w[1].published_at));
    }

    #[tokio::test]
    async fn injected_failures_only_hit_their_read() {
        let backend = InMemoryBackend::new();
        let user_id = Uuid::new_v4();
        backend.insert_profile(profile_for(user_id, 10, "free")).await;

        backend.fail_article_reads(true);
        assert!(backend.latest_articles(10).await.is_err());
        assert!(backend.profile_summary(user_id).await.is_ok());

        backend.fail_article_reads(false);
        backend.fail_profile_reads(true);
        assert!(backend.latest_articles(10).await.is_ok());
        assert!(backend.profile_summary(user_id).await.is_err());
    }

    #[tokio::test]
    async fn record_read_applies_default_points() {
        let backend = InMemoryBackend::new();
        let article = article_published_at(1);
        let article_id = article.id;
        backend.insert_article(article).await;
        let user_id = Uuid::new_v4();

        let entry = backend.record_read(user_id, article_id).await.unwrap();
        assert_eq!(entry.points_earned, 10);

        let err = backend.record_read(user_id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        let history = backend
            .reading_history(&ReadingHistoryFilter {
                user_id,
                skip: 0,
                limit: 10,
            })
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn withdrawals_are_created_pending_and_scoped_to_user() {
        let backend = InMemoryBackend::new();
        let user_id = Uuid::new_v4();
        backend.insert_profile(profile_for(user_id, 5000, "free")).await;
        let request = WithdrawalCreateDBRequest {
            user_id,
            points_used: 5000,
            usdt_amount: Decimal::new(500, 2),
            wallet_address: "TXYZ".to_string(),
            wallet_type: WalletType::Trc20,
        };
        let created = backend.create_withdrawal(&request).await.unwrap();
        assert_eq!(created.status, "pending");
        assert_eq!(created.wallet_type, "trc20");

        let other = backend
            .withdrawals(&WithdrawalFilter {
                user_id: Uuid::new_v4(),
                skip: 0,
                limit: 10,
            })
            .await
            .unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn pending_withdrawals_reserve_the_balance() {
        let backend = InMemoryBackend::new();
        let user_id = Uuid::new_v4();
        backend.insert_profile(profile_for(user_id, 7000, "free")).await;
        let request = WithdrawalCreateDBRequest {
            user_id,
            points_used: 6000,
            usdt_amount: Decimal::new(600, 2),
            wallet_address: "TXYZ".to_string(),
            wallet_type: WalletType::Trc20,
        };

        backend.create_withdrawal(&request).await.unwrap();
        assert_eq!(backend.pending_withdrawal_points(user_id).await.unwrap(), 6000);

        let err = backend.create_withdrawal(&request).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::InsufficientPoints {
                requested: 6000,
                available: 1000
            }
        ));
        assert_eq!(backend.pending_withdrawal_points(user_id).await.unwrap(), 6000);
    }

    #[tokio::test]
    async fn withdrawal_without_profile_is_not_found() {
        let backend = InMemoryBackend::new();
        let request = WithdrawalCreateDBRequest {
            user_id: Uuid::new_v4(),
            points_used: 5000,
            usdt_amount: Decimal::new(500, 2),
            wallet_address: "TXYZ".to_string(),
            wallet_type: WalletType::Bep20,
        };

        assert!(matches!(backend.create_withdrawal(&request).await, Err(DbError::NotFound)));
    }

    #[tokio::test]
    async fn notification_settings_upsert_keeps_one_row() {
        let backend = InMemoryBackend::new();
        let user_id = Uuid::new_v4();
        assert!(backend.notification_settings(user_id).await.unwrap().is_none());

        let first = backend
            .upsert_notification_settings(&NotificationSettingsUpsertDBRequest {
                user_id,
                push_notifications: false,
                notification_interval_hours: 6,
            })
            .await
            .unwrap();
        let second = backend
            .upsert_notification_settings(&NotificationSettingsUpsertDBRequest {
                user_id,
                push_notifications: true,
                notification_interval_hours: 12,
            })
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert!(second.push_notifications);
        assert_eq!(second.notification_interval_hours, 12);
    }

    #[tokio::test]
    async fn roles_are_granted_once() {
        let backend = InMemoryBackend::new();
        let user_id = Uuid::new_v4();
        assert!(!backend.has_role(user_id, AppRole::Admin).await.unwrap());

        backend.grant_role(user_id, AppRole::Admin).await;
        backend.grant_role(user_id, AppRole::Admin).await;
        assert!(backend.has_role(user_id, AppRole::Admin).await.unwrap());
        assert!(!backend.has_role(user_id, AppRole::User).await.unwrap());
    }

    #[test]
    fn demo_fixtures_have_articles_and_settings() {
        let fixtures = Fixtures::demo();
        assert_eq!(fixtures.articles.len(), 5);
        assert!(fixtures.system_config.iter().any(|e| e.key == "points_per_usdt"));
    }
}
