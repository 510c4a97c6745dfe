use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use utoipa::IntoParams;

use crate::points::LATEST_ARTICLES_LIMIT;

pub const MAX_ARTICLES: i64 = 100;

/// Query parameters for the article feed
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ArticlesQuery {
    /// Number of articles to return (default: 10, max: 100)
    #[param(default = 10, minimum = 1, maximum = 100)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub limit: Option<i64>,
}

impl ArticlesQuery {
    pub fn limit(&self) -> usize {
        let limit = self.limit.unwrap_or(LATEST_ARTICLES_LIMIT as i64).clamp(1, MAX_ARTICLES);
        usize::try_from(limit).unwrap_or(LATEST_ARTICLES_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_to_dashboard_size_and_clamps() {
        assert_eq!(ArticlesQuery::default().limit(), 10);
        assert_eq!(ArticlesQuery { limit: Some(0) }.limit(), 1);
        assert_eq!(ArticlesQuery { limit: Some(500) }.limit(), 100);
        assert_eq!(ArticlesQuery { limit: Some(25) }.limit(), 25);
    }
}
