use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::{info, instrument};

use crate::{
    AppState,
    api::models::{pagination::Pagination, withdrawals::WithdrawalCreate},
    auth::session::Session,
    db::models::withdrawals::Withdrawal,
    errors::{Error, Result},
};

#[utoipa::path(
    get,
    path = "/withdrawals",
    tag = "withdrawals",
    summary = "List withdrawals",
    description = "The caller's withdrawal requests, newest first",
    params(Pagination),
    responses(
        (status = 200, description = "Withdrawal requests for the caller", body = Vec<Withdrawal>),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip_all, fields(user_id = %session.user_id))]
pub async fn list_withdrawals(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Withdrawal>>> {
    let withdrawals = state.backend.withdrawals(&pagination.withdrawals_for(session.user_id)).await?;
    Ok(Json(withdrawals))
}

#[utoipa::path(
    post,
    path = "/withdrawals",
    tag = "withdrawals",
    summary = "Request withdrawal",
    description = "Request conversion of points to USDT at 1000 points per USDT. The request is stored as \
                   `pending`; points are debited when the backend processes it. Pending requests count against \
                   the balance, so the sum of a user's pending requests never exceeds their points.",
    request_body = WithdrawalCreate,
    responses(
        (status = 201, description = "Withdrawal request created", body = Withdrawal),
        (status = 400, description = "Below the minimum, above the balance, or an invalid wallet"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile exists for the caller yet"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip_all, fields(user_id = %session.user_id, points = request.points))]
pub async fn create_withdrawal(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<WithdrawalCreate>,
) -> Result<(StatusCode, Json<Withdrawal>)> {
    let profile = state.backend.profile(session.user_id).await?.ok_or_else(|| Error::NotFound {
        resource: "Profile".to_string(),
        id: session.user_id.to_string(),
    })?;

    let pending = state.backend.pending_withdrawal_points(session.user_id).await?;
    let available = i64::from(profile.points) - pending;

    // The backend repeats the balance check atomically with the insert
    let db_request = request.into_db_request(session.user_id, available, state.config.withdrawals.minimum_points)?;
    let withdrawal = state.backend.create_withdrawal(&db_request).await?;

    metrics::counter!("read2earn_withdrawals_requested_total", "wallet_type" => db_request.wallet_type.as_str()).increment(1);
    info!(withdrawal_id = %withdrawal.id, usdt_amount = %withdrawal.usdt_amount, "Withdrawal requested");
    Ok((StatusCode::CREATED, Json(withdrawal)))
}
