use crate::db::errors::Result;
use crate::db::handlers::repository::Repository;
use crate::db::models::articles::Article;
use crate::types::{ArticleId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing articles, newest first
#[derive(Debug, Clone)]
pub struct ArticleFilter {
    pub skip: i64,
    pub limit: i64,
}

impl ArticleFilter {
    pub fn latest(limit: i64) -> Self {
        Self { skip: 0, limit }
    }
}

pub struct Articles<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Articles<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Articles<'c> {
    type Response = Article;
    type Id = ArticleId;
    type Filter = ArticleFilter;

    #[instrument(skip(self), fields(article_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let article = sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(article)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let articles = sqlx::query_as::<_, Article>("SELECT * FROM articles ORDER BY published_at DESC LIMIT $1 OFFSET $2")
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(articles)
    }
}
