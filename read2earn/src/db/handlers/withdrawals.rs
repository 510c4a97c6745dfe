use crate::db::errors::{DbError, Result};
use crate::db::handlers::repository::Repository;
use crate::db::models::withdrawals::{STATUS_PENDING, Withdrawal, WithdrawalCreateDBRequest};
use crate::types::{UserId, WithdrawalId, abbrev_uuid};
use sqlx::{Connection, PgConnection};
use tracing::instrument;

/// Filter for listing one user's withdrawals, newest first
#[derive(Debug, Clone)]
pub struct WithdrawalFilter {
    pub user_id: UserId,
    pub skip: i64,
    pub limit: i64,
}

pub struct Withdrawals<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Withdrawals<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Record a pending payout request. The balance is not debited here, but the request must fit in
    /// the profile's points minus every other pending request.
    ///
    /// The profile row is locked for the duration, so concurrent requests from one user are checked
    /// one after another. A missing profile is `DbError::NotFound`.
    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id), points = request.points_used, wallet_type = %request.wallet_type), err)]
    pub async fn create(&mut self, request: &WithdrawalCreateDBRequest) -> Result<Withdrawal> {
        let mut tx = self.db.begin().await?;

        let balance: i32 = sqlx::query_scalar("SELECT points FROM profiles WHERE user_id = $1 FOR UPDATE")
            .bind(request.user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound)?;

        let pending = Self::pending_points_internal(&mut tx, request.user_id).await?;
        let available = i64::from(balance) - pending;
        if i64::from(request.points_used) > available {
            return Err(DbError::InsufficientPoints {
                requested: request.points_used,
                available: available.max(0),
            });
        }

        let withdrawal = sqlx::query_as::<_, Withdrawal>(
            r#"
            INSERT INTO withdrawals (user_id, points_used, usdt_amount, wallet_address, wallet_type, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(request.user_id)
        .bind(request.points_used)
        .bind(request.usdt_amount)
        .bind(&request.wallet_address)
        .bind(request.wallet_type.as_str())
        .bind(STATUS_PENDING)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(withdrawal)
    }

    /// Points held by the user's pending requests
    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn pending_points(&mut self, user_id: UserId) -> Result<i64> {
        Self::pending_points_internal(&mut *self.db, user_id).await
    }

    async fn pending_points_internal(conn: &mut PgConnection, user_id: UserId) -> Result<i64> {
        let pending: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(points_used), 0)::BIGINT FROM withdrawals WHERE user_id = $1 AND status = $2",
        )
        .bind(user_id)
        .bind(STATUS_PENDING)
        .fetch_one(conn)
        .await?;

        Ok(pending)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Withdrawals<'c> {
    type Response = Withdrawal;
    type Id = WithdrawalId;
    type Filter = WithdrawalFilter;

    #[instrument(skip(self), fields(withdrawal_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let withdrawal = sqlx::query_as::<_, Withdrawal>("SELECT * FROM withdrawals WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(withdrawal)
    }

    #[instrument(skip(self, filter), fields(user_id = %abbrev_uuid(&filter.user_id), limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let withdrawals = sqlx::query_as::<_, Withdrawal>(
            "SELECT * FROM withdrawals WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(filter.user_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(withdrawals)
    }
}
