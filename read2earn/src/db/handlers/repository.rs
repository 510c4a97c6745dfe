//! Base repository trait for database operations.

use crate::db::errors::Result;

/// Read surface shared by the repositories.
///
/// A repository is a data access layer for one postgres table. Writes differ enough between
/// tables (append-only logs, upserts, pending requests) that they stay inherent methods.
#[async_trait::async_trait]
pub trait Repository {
    /// The row type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// The filter type for list operations
    type Filter: Send + Sync;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List entities with filtering and pagination
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;
}
