use serde::Deserialize;
use utoipa::ToSchema;

use crate::types::ArticleId;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReadingHistoryCreate {
    #[schema(value_type = String, format = "uuid")]
    pub article_id: ArticleId,
}
