use crate::db::errors::Result;
use crate::db::handlers::repository::Repository;
use crate::db::models::reading_history::{ReadingHistoryCreateDBRequest, ReadingHistoryEntry};
use crate::types::{ReadingHistoryId, UserId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing one user's reads, newest first
#[derive(Debug, Clone)]
pub struct ReadingHistoryFilter {
    pub user_id: UserId,
    pub skip: i64,
    pub limit: i64,
}

pub struct ReadingHistory<'c> {
    db: &'c mut PgConnection,
}

impl<'c> ReadingHistory<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Append a read. Points and timestamp come from the column defaults.
    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id), article_id = %abbrev_uuid(&request.article_id)), err)]
    pub async fn create(&mut self, request: &ReadingHistoryCreateDBRequest) -> Result<ReadingHistoryEntry> {
        let entry = sqlx::query_as::<_, ReadingHistoryEntry>(
            r#"
            INSERT INTO reading_history (user_id, article_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(request.article_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(entry)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for ReadingHistory<'c> {
    type Response = ReadingHistoryEntry;
    type Id = ReadingHistoryId;
    type Filter = ReadingHistoryFilter;

    #[instrument(skip(self), fields(entry_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let entry = sqlx::query_as::<_, ReadingHistoryEntry>("SELECT * FROM reading_history WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(entry)
    }

    #[instrument(skip(self, filter), fields(user_id = %abbrev_uuid(&filter.user_id), limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let entries = sqlx::query_as::<_, ReadingHistoryEntry>(
            "SELECT * FROM reading_history WHERE user_id = $1 ORDER BY read_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(filter.user_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(entries)
    }
}
