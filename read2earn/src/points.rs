//! Points arithmetic shown to users.
//!
//! None of this is enforced here: the reward per article and the daily quota are applied by the
//! backend when reads are recorded. These values only drive what the screens display and the
//! amount written on a withdrawal request.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Points exchanged for one USDT.
pub const POINTS_PER_USDT: i64 = 1000;

/// Reward advertised on every article card.
pub const ARTICLE_REWARD_POINTS: i32 = 10;

pub const FREE_DAILY_ARTICLES: i32 = 50;
pub const PREMIUM_DAILY_ARTICLES: i32 = 100;

/// How many articles the dashboard lists.
pub const LATEST_ARTICLES_LIMIT: usize = 10;

/// Subscription tier stored in `profiles.plan_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Free,
    Premium,
}

impl PlanType {
    /// Anything other than exactly "premium" is treated as the free plan.
    pub fn parse(plan_type: Option<&str>) -> Self {
        match plan_type {
            Some("premium") => PlanType::Premium,
            _ => PlanType::Free,
        }
    }

    pub fn daily_article_limit(&self) -> i32 {
        match self {
            PlanType::Free => FREE_DAILY_ARTICLES,
            PlanType::Premium => PREMIUM_DAILY_ARTICLES,
        }
    }
}

/// Daily quota denominator for a profile's plan; a missing profile counts as free.
pub fn daily_article_limit(plan_type: Option<&str>) -> i32 {
    PlanType::parse(plan_type).daily_article_limit()
}

/// USDT value of a points balance, rounded half away from zero to cents.
pub fn usdt_equivalent(points: i64) -> Decimal {
    (Decimal::from(points) / Decimal::from(POINTS_PER_USDT)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// [`usdt_equivalent`] formatted with exactly two decimals, e.g. 2500 -> "2.50".
pub fn format_usdt(points: i64) -> String {
    format!("{:.2}", usdt_equivalent(points))
}

/// Label shown on article cards.
pub fn reward_label() -> String {
    format!("+{ARTICLE_REWARD_POINTS} points")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_usdt(2500), "2.50");
        assert_eq!(format_usdt(0), "0.00");
        assert_eq!(format_usdt(1000), "1.00");
        assert_eq!(format_usdt(123_456), "123.46");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_usdt(1005), "1.01");
        assert_eq!(format_usdt(1004), "1.00");
        assert_eq!(format_usdt(5), "0.01");
        assert_eq!(format_usdt(4), "0.00");
    }

    #[test]
    fn equivalent_matches_division() {
        for points in [0_i64, 1, 999, 5000, 7_777, 1_000_000] {
            let expected = (Decimal::from(points) / Decimal::from(1000)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            assert_eq!(usdt_equivalent(points), expected);
        }
    }

    #[test]
    fn quota_depends_only_on_premium() {
        assert_eq!(daily_article_limit(Some("premium")), 100);
        assert_eq!(daily_article_limit(Some("free")), 50);
        assert_eq!(daily_article_limit(Some("Premium")), 50);
        assert_eq!(daily_article_limit(Some("")), 50);
        assert_eq!(daily_article_limit(None), 50);
    }

    #[test]
    fn reward_label_text() {
        assert_eq!(reward_label(), "+10 points");
    }
}
