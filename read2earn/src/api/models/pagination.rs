//! Offset pagination for the per-user list endpoints.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

use crate::db::handlers::{ReadingHistoryFilter, WithdrawalFilter};
use crate::types::UserId;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// `skip` and `limit` query parameters. Query strings carry numbers as text, hence `DisplayFromStr`.
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct Pagination {
    /// Number of rows to skip (default: 0)
    #[param(default = 0, minimum = 0)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub skip: Option<i64>,

    /// Maximum number of rows to return (default: 10, max: 100)
    #[param(default = 10, minimum = 1, maximum = 100)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    /// Clamped to `1..=MAX_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn reading_history_for(&self, user_id: UserId) -> ReadingHistoryFilter {
        ReadingHistoryFilter {
            user_id,
            skip: self.skip(),
            limit: self.limit(),
        }
    }

    pub fn withdrawals_for(&self, user_id: UserId) -> WithdrawalFilter {
        WithdrawalFilter {
            user_id,
            skip: self.skip(),
            limit: self.limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn defaults_when_absent() {
        let pagination = Pagination::default();
        assert_eq!(pagination.skip(), 0);
        assert_eq!(pagination.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn limit_and_skip_are_clamped() {
        let pagination = Pagination {
            skip: Some(-5),
            limit: Some(1000),
        };
        assert_eq!(pagination.skip(), 0);
        assert_eq!(pagination.limit(), MAX_LIMIT);

        let pagination = Pagination {
            skip: None,
            limit: Some(0),
        };
        assert_eq!(pagination.limit(), 1);
    }

    #[test]
    fn parses_from_query_string_values() {
        let pagination: Pagination = serde_json::from_value(serde_json::json!({ "skip": "20", "limit": "5" })).unwrap();
        assert_eq!(pagination.skip(), 20);
        assert_eq!(pagination.limit(), 5);
    }

    #[test]
    fn filters_carry_the_caller() {
        let user_id = Uuid::new_v4();
        let pagination = Pagination {
            skip: Some(10),
            limit: Some(20),
        };
        let filter = pagination.withdrawals_for(user_id);
        assert_eq!((filter.user_id, filter.skip, filter.limit), (user_id, 10, 20));
        let filter = pagination.reading_history_for(user_id);
        assert_eq!((filter.user_id, filter.skip, filter.limit), (user_id, 10, 20));
    }
}
