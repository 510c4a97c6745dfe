//! Database record models matching table schemas.
//!
//! Each struct mirrors one table row and derives `sqlx::FromRow` for query results and `serde`
//! for the JSON API. Field names and optionality are the wire contract shared with the mobile
//! client, so they follow the column names exactly.
//!
//! - [`profiles`]: per-user points balance, reading counters and payout wallets
//! - [`articles`]: news items, read-only from the client's perspective
//! - [`reading_history`]: append-only log of articles a user has read
//! - [`withdrawals`]: payout requests and their backend-owned status
//! - [`notification_settings`]: per-user push preferences
//! - [`api_keys`]: upstream news provider keys (admin only)
//! - [`system_config`]: key/value operational settings
//! - [`user_roles`]: role grants checked through the `has_role` procedure

pub mod api_keys;
pub mod articles;
pub mod notification_settings;
pub mod profiles;
pub mod reading_history;
pub mod system_config;
pub mod user_roles;
pub mod withdrawals;
