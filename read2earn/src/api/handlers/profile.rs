use axum::{Json, extract::State};
use tracing::instrument;

use crate::{
    AppState,
    auth::session::Session,
    db::models::profiles::Profile,
    errors::{Error, Result},
};

#[utoipa::path(
    get,
    path = "/profile",
    tag = "profile",
    summary = "Get profile",
    description = "The caller's full profile row",
    responses(
        (status = 200, description = "Profile found", body = Profile),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile exists for the caller yet"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip_all, fields(user_id = %session.user_id))]
pub async fn get_profile(State(state): State<AppState>, session: Session) -> Result<Json<Profile>> {
    let profile = state.backend.profile(session.user_id).await?.ok_or_else(|| Error::NotFound {
        resource: "Profile".to_string(),
        id: session.user_id.to_string(),
    })?;
    Ok(Json(profile))
}
