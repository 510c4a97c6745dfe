//! Request and response types for the JSON API.
//!
//! Database rows that are safe to expose (articles, profiles, reading history, withdrawals) are
//! returned as-is; the types here cover request bodies, query parameters, and responses that
//! reshape or redact a row.

pub mod api_keys;
pub mod articles;
pub mod notification_settings;
pub mod pagination;
pub mod reading_history;
pub mod roles;
pub mod views;
pub mod withdrawals;
