//! Database layer for data persistence and access.
//!
//! The tables live in a hosted PostgreSQL instance whose integrity rules (foreign keys, check
//! constraints, row-level security) are enforced by the database itself. This module is the typed
//! contract over them.
//!
//! ```text
//! ┌─────────────┐
//! │  Backend    │  (crate::backend - the query surface the views use)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - one per table)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - table rows)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │  PostgreSQL │
//! └─────────────┘
//! ```
//!
//! Migrations live in `migrations/` and are exposed through [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
