use crate::db::errors::Result;
use crate::db::models::system_config::SystemConfigEntry;
use sqlx::PgConnection;
use tracing::instrument;

pub struct SystemConfig<'c> {
    db: &'c mut PgConnection,
}

impl<'c> SystemConfig<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<SystemConfigEntry>> {
        let entries = sqlx::query_as::<_, SystemConfigEntry>("SELECT * FROM system_config ORDER BY key")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(entries)
    }
}
