//! Database models for withdrawal requests.

use crate::types::{UserId, WithdrawalId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Status of a freshly created withdrawal. Later transitions belong to the payout backend.
pub const STATUS_PENDING: &str = "pending";

/// USDT network a payout is sent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    Trc20,
    Bep20,
}

impl WalletType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletType::Trc20 => "trc20",
            WalletType::Bep20 => "bep20",
        }
    }
}

impl fmt::Display for WalletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalletType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trc20" => Ok(WalletType::Trc20),
            "bep20" => Ok(WalletType::Bep20),
            other => Err(format!("unknown wallet type '{other}', expected 'trc20' or 'bep20'")),
        }
    }
}

/// A `withdrawals` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Withdrawal {
    #[schema(value_type = String, format = "uuid")]
    pub id: WithdrawalId,
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    pub points_used: i32,
    /// JSON number, two decimal places
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 5.0)]
    pub usdt_amount: Decimal,
    pub wallet_address: String,
    /// "trc20" or "bep20"
    pub wallet_type: String,
    pub status: String,
    pub admin_notes: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Database request for creating a pending withdrawal
#[derive(Debug, Clone)]
pub struct WithdrawalCreateDBRequest {
    pub user_id: UserId,
    pub points_used: i32,
    pub usdt_amount: Decimal,
    pub wallet_address: String,
    pub wallet_type: WalletType,
}
