//! HTTP request handlers.
//!
//! - [`pages`]: server-rendered HTML for `/` and `/dashboard`
//! - [`views`]: the same views as JSON, plus the bottom navigation
//! - [`profile`], [`articles`], [`reading_history`], [`withdrawals`], [`notification_settings`]:
//!   the caller's own data
//! - [`roles`]: role checks for the caller
//! - [`admin`]: system settings and provider keys, admin only
//!
//! Every JSON handler lives under `/api/v1`. Handlers that need a caller take a
//! [`crate::auth::session::Session`] extractor, which answers 401 on its own when the request
//! has no valid session. Errors convert through [`crate::errors::Error`].

pub mod admin;
pub mod articles;
pub mod notification_settings;
pub mod pages;
pub mod profile;
pub mod reading_history;
pub mod roles;
pub mod views;
pub mod withdrawals;
