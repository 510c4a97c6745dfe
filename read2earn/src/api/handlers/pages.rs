//! HTML pages. These redirect instead of answering 401, since a browser is on the other end.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::{
    AppState,
    auth::current_user::MaybeSession,
    errors::Result,
    views::{
        dashboard::load_dashboard,
        landing::{AuthState, LandingScreen, resolve_landing},
    },
};

/// `/`: signed-in visitors go to their dashboard, everyone else sees the landing page.
#[instrument(skip_all)]
pub async fn landing_page(State(state): State<AppState>, MaybeSession(session): MaybeSession) -> Result<Response> {
    match resolve_landing(&AuthState::from(session)) {
        LandingScreen::Redirect { to } => Ok(Redirect::to(&to).into_response()),
        screen => Ok(Html(state.renderer.landing(&screen)?).into_response()),
    }
}

/// `/dashboard`: signed-out visitors are sent to the login page.
#[instrument(skip_all)]
pub async fn dashboard_page(State(state): State<AppState>, MaybeSession(session): MaybeSession) -> Result<Response> {
    let Some(session) = session else {
        return Ok(Redirect::to(&state.config.auth.login_path).into_response());
    };

    let model = load_dashboard(state.backend.as_ref(), &session).await;
    Ok(Html(state.renderer.dashboard(&model.render())?).into_response())
}
