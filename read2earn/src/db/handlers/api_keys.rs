use crate::db::errors::Result;
use crate::db::handlers::repository::Repository;
use crate::db::models::api_keys::ProviderApiKey;
use crate::types::{ApiKeyId, abbrev_uuid};
use sqlx::PgConnection;
use tracing::instrument;

/// Filter for listing provider keys
#[derive(Debug, Clone, Default)]
pub struct ProviderApiKeyFilter {
    pub provider: Option<String>,
}

pub struct ProviderApiKeys<'c> {
    db: &'c mut PgConnection,
}

impl<'c> ProviderApiKeys<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for ProviderApiKeys<'c> {
    type Response = ProviderApiKey;
    type Id = ApiKeyId;
    type Filter = ProviderApiKeyFilter;

    #[instrument(skip(self), fields(api_key_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let key = sqlx::query_as::<_, ProviderApiKey>("SELECT * FROM api_keys WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(key)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let keys = sqlx::query_as::<_, ProviderApiKey>(
            r#"
            SELECT * FROM api_keys
            WHERE ($1::text IS NULL OR provider = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.provider.as_deref())
        .fetch_all(&mut *self.db)
        .await?;

        Ok(keys)
    }
}
