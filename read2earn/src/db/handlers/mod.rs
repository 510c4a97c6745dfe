//! Repository implementations for database access.
//!
//! Each repository wraps a `PgConnection` (a pooled connection or an open transaction) and owns
//! every query against its table. Read-mostly tables implement the [`Repository`] trait; the
//! remaining operations are inherent methods named after what they do.
//!
//! - [`Profiles`]: profile rows and the dashboard summary read
//! - [`Articles`]: latest articles and single-article lookup
//! - [`ReadingHistory`]: append-only reads log
//! - [`Withdrawals`]: payout requests
//! - [`NotificationSettingsRepo`]: push preferences, upserted per user
//! - [`ProviderApiKeys`]: upstream news provider keys
//! - [`SystemConfig`]: operational key/value settings
//! - [`UserRoles`]: role grants and the `has_role` procedure
//!
//! ```ignore
//! use read2earn::db::handlers::{Articles, ArticleFilter, Repository};
//!
//! let mut conn = pool.acquire().await?;
//! let latest = Articles::new(&mut conn).list(&ArticleFilter::latest(10)).await?;
//! ```

pub mod api_keys;
pub mod articles;
pub mod notification_settings;
pub mod profiles;
pub mod reading_history;
pub mod repository;
pub mod system_config;
pub mod user_roles;
pub mod withdrawals;

pub use api_keys::ProviderApiKeys;
pub use articles::{ArticleFilter, Articles};
pub use notification_settings::NotificationSettingsRepo;
pub use profiles::Profiles;
pub use reading_history::{ReadingHistory, ReadingHistoryFilter};
pub use repository::Repository;
pub use system_config::SystemConfig;
pub use user_roles::UserRoles;
pub use withdrawals::{WithdrawalFilter, Withdrawals};
