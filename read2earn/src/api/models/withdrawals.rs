use serde::Deserialize;
use utoipa::ToSchema;

use crate::db::models::withdrawals::{WalletType, WithdrawalCreateDBRequest};
use crate::errors::{Error, Result};
use crate::points::{format_usdt, usdt_equivalent};
use crate::types::UserId;

/// Body of a withdrawal request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct WithdrawalCreate {
    /// Points to convert, at 1000 points per USDT
    #[schema(example = 5000)]
    pub points: i32,
    /// "trc20" or "bep20"
    #[schema(example = "trc20")]
    pub wallet_type: String,
    pub wallet_address: String,
}

impl WithdrawalCreate {
    /// Check the request against the caller's available points (balance less pending requests) and
    /// the configured minimum, and price it.
    pub fn into_db_request(self, user_id: UserId, available: i64, minimum_points: i32) -> Result<WithdrawalCreateDBRequest> {
        if self.points <= 0 {
            return Err(Error::BadRequest {
                message: "Points must be positive".to_string(),
            });
        }
        if self.points < minimum_points {
            return Err(Error::BadRequest {
                message: format!(
                    "Minimum withdrawal is {minimum_points} points (${})",
                    format_usdt(i64::from(minimum_points))
                ),
            });
        }
        if i64::from(self.points) > available {
            return Err(Error::BadRequest {
                message: format!("Insufficient points: requested {}, available {}", self.points, available.max(0)),
            });
        }

        let wallet_type: WalletType = self.wallet_type.parse().map_err(|message| Error::BadRequest { message })?;

        let wallet_address = self.wallet_address.trim();
        if wallet_address.is_empty() {
            return Err(Error::BadRequest {
                message: "Wallet address cannot be empty".to_string(),
            });
        }

        Ok(WithdrawalCreateDBRequest {
            user_id,
            points_used: self.points,
            usdt_amount: usdt_equivalent(i64::from(self.points)),
            wallet_address: wallet_address.to_string(),
            wallet_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn request(points: i32, wallet_type: &str, wallet_address: &str) -> WithdrawalCreate {
        WithdrawalCreate {
            points,
            wallet_type: wallet_type.to_string(),
            wallet_address: wallet_address.to_string(),
        }
    }

    #[test]
    fn valid_request_is_priced_in_usdt() {
        let user_id = Uuid::new_v4();
        let db_request = request(6500, "TRC20", "  TXYZ123  ").into_db_request(user_id, 10_000, 5000).unwrap();
        assert_eq!(db_request.user_id, user_id);
        assert_eq!(db_request.points_used, 6500);
        assert_eq!(db_request.usdt_amount, Decimal::new(650, 2));
        assert_eq!(db_request.wallet_type, WalletType::Trc20);
        assert_eq!(db_request.wallet_address, "TXYZ123");
    }

    #[test]
    fn rejects_non_positive_points() {
        let err = request(0, "trc20", "addr").into_db_request(Uuid::new_v4(), 10_000, 0).unwrap_err();
        assert!(matches!(err, Error::BadRequest { .. }));
    }

    #[test]
    fn rejects_below_minimum() {
        let err = request(4999, "trc20", "addr").into_db_request(Uuid::new_v4(), 10_000, 5000).unwrap_err();
        assert_eq!(err.user_message(), "Minimum withdrawal is 5000 points ($5.00)");
    }

    #[test]
    fn rejects_more_than_balance() {
        let err = request(8000, "bep20", "addr").into_db_request(Uuid::new_v4(), 7000, 5000).unwrap_err();
        assert_eq!(err.user_message(), "Insufficient points: requested 8000, available 7000");
    }

    #[test]
    fn rejects_unknown_wallet_type_and_blank_address() {
        let err = request(5000, "erc20", "addr").into_db_request(Uuid::new_v4(), 7000, 5000).unwrap_err();
        assert!(err.user_message().contains("unknown wallet type"));

        let err = request(5000, "bep20", "   ").into_db_request(Uuid::new_v4(), 7000, 5000).unwrap_err();
        assert_eq!(err.user_message(), "Wallet address cannot be empty");
    }
}
