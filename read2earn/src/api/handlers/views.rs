//! The landing and dashboard views as JSON, for clients that render their own UI.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use crate::{
    AppState,
    api::models::views::NavigationQuery,
    auth::{current_user::MaybeSession, session::Session},
    views::{
        dashboard::{DashboardScreen, load_dashboard},
        landing::{AuthState, LandingScreen, resolve_landing},
        navigation::{NavItem, bottom_navigation},
    },
};

#[utoipa::path(
    get,
    path = "/landing",
    tag = "views",
    summary = "Landing view",
    description = "Resolve the landing page for the caller. Signed-in callers get a redirect to the dashboard.",
    responses(
        (status = 200, description = "Landing content or a redirect", body = LandingScreen),
    )
)]
#[instrument(skip_all)]
pub async fn landing_view(MaybeSession(session): MaybeSession) -> Json<LandingScreen> {
    Json(resolve_landing(&AuthState::from(session)))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "views",
    summary = "Dashboard view",
    description = "Load the caller's profile counters and the latest articles. A failed profile read yields default \
                   counters and an error notification; a failed article read yields the empty state.",
    responses(
        (status = 200, description = "Dashboard ready", body = DashboardScreen),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip_all, fields(user_id = %session.user_id))]
pub async fn dashboard_view(State(state): State<AppState>, session: Session) -> Json<DashboardScreen> {
    let model = load_dashboard(state.backend.as_ref(), &session).await;
    Json(model.render())
}

#[utoipa::path(
    get,
    path = "/navigation",
    tag = "views",
    summary = "Bottom navigation",
    description = "The four bottom navigation tabs, with the tab whose path equals `path` marked active.",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Navigation tabs in display order", body = Vec<NavItem>),
    )
)]
pub async fn navigation(Query(query): Query<NavigationQuery>) -> Json<Vec<NavItem>> {
    Json(bottom_navigation(&query.path))
}
