use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::{
    AppState,
    api::models::roles::RoleCheckResponse,
    auth::session::Session,
    db::models::user_roles::AppRole,
    errors::{Error, Result},
};

#[utoipa::path(
    get,
    path = "/users/current/roles/{role}",
    tag = "roles",
    summary = "Check role",
    description = "Whether the caller holds `role`",
    params(
        ("role" = AppRole, Path, description = "Role to check"),
    ),
    responses(
        (status = 200, description = "Role check result", body = RoleCheckResponse),
        (status = 400, description = "Unknown role"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip(state, session), fields(user_id = %session.user_id))]
pub async fn check_current_user_role(
    State(state): State<AppState>,
    session: Session,
    Path(role): Path<String>,
) -> Result<Json<RoleCheckResponse>> {
    let role: AppRole = role.parse().map_err(|message| Error::BadRequest { message })?;
    let granted = state.backend.has_role(session.user_id, role).await?;
    Ok(Json(RoleCheckResponse { role, granted }))
}
