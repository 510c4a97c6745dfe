use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::{info, instrument};

use crate::{
    AppState,
    api::models::{pagination::Pagination, reading_history::ReadingHistoryCreate},
    auth::session::Session,
    db::models::reading_history::ReadingHistoryEntry,
    errors::Result,
};

#[utoipa::path(
    post,
    path = "/reading-history",
    tag = "reading_history",
    summary = "Record a read",
    description = "Append a read of an article for the caller. The points earned are whatever the store \
                   assigns; counters on the profile are maintained by the backend.",
    request_body = ReadingHistoryCreate,
    responses(
        (status = 201, description = "Read recorded", body = ReadingHistoryEntry),
        (status = 400, description = "Article does not exist"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip_all, fields(user_id = %session.user_id, article_id = %request.article_id))]
pub async fn record_read(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<ReadingHistoryCreate>,
) -> Result<(StatusCode, Json<ReadingHistoryEntry>)> {
    let entry = state.backend.record_read(session.user_id, request.article_id).await?;
    metrics::counter!("read2earn_articles_read_total").increment(1);
    info!(points_earned = entry.points_earned, "Recorded article read");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    get,
    path = "/reading-history",
    tag = "reading_history",
    summary = "List reads",
    description = "The caller's reads, newest first",
    params(Pagination),
    responses(
        (status = 200, description = "Reads for the caller", body = Vec<ReadingHistoryEntry>),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip_all, fields(user_id = %session.user_id))]
pub async fn list_reading_history(
    State(state): State<AppState>,
    session: Session,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<ReadingHistoryEntry>>> {
    let entries = state.backend.reading_history(&pagination.reading_history_for(session.user_id)).await?;
    Ok(Json(entries))
}
