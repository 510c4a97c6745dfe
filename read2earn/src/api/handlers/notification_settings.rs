use axum::{Json, extract::State};
use tracing::instrument;

use crate::{
    AppState,
    api::models::notification_settings::{NotificationSettingsResponse, NotificationSettingsUpdate},
    auth::session::Session,
    errors::Result,
};

#[utoipa::path(
    get,
    path = "/notification-settings",
    tag = "notification_settings",
    summary = "Get notification settings",
    description = "The caller's push notification preferences, or the defaults if they never saved any",
    responses(
        (status = 200, description = "Current preferences", body = NotificationSettingsResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip_all, fields(user_id = %session.user_id))]
pub async fn get_notification_settings(State(state): State<AppState>, session: Session) -> Result<Json<NotificationSettingsResponse>> {
    let settings = state.backend.notification_settings(session.user_id).await?;
    Ok(Json(settings.map(Into::into).unwrap_or_default()))
}

#[utoipa::path(
    put,
    path = "/notification-settings",
    tag = "notification_settings",
    summary = "Update notification settings",
    request_body = NotificationSettingsUpdate,
    responses(
        (status = 200, description = "Preferences saved", body = NotificationSettingsResponse),
        (status = 400, description = "Interval outside 1 to 24 hours"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip_all, fields(user_id = %session.user_id))]
pub async fn update_notification_settings(
    State(state): State<AppState>,
    session: Session,
    Json(update): Json<NotificationSettingsUpdate>,
) -> Result<Json<NotificationSettingsResponse>> {
    let request = update.into_db_request(session.user_id)?;
    let settings = state.backend.upsert_notification_settings(&request).await?;
    Ok(Json(settings.into()))
}

#[cfg(test)]
mod tests {
    use crate::api::models::notification_settings::NotificationSettingsResponse;
    use crate::backend::InMemoryBackend;
    use crate::test_utils::{auth_header, create_test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;
    use uuid::Uuid;

    #[test_log::test(tokio::test)]
    async fn defaults_until_saved_then_persists() {
        let app = create_test_app(Arc::new(InMemoryBackend::new()));
        let (name, value) = auth_header(Uuid::new_v4());

        let initial: NotificationSettingsResponse = app.get("/api/v1/notification-settings").add_header(&name, &value).await.json();
        assert_eq!(initial, NotificationSettingsResponse::default());

        let response = app
            .put("/api/v1/notification-settings")
            .add_header(&name, &value)
            .json(&json!({ "push_notifications": false, "notification_interval_hours": 12 }))
            .await;
        response.assert_status(StatusCode::OK);

        let saved: NotificationSettingsResponse = app.get("/api/v1/notification-settings").add_header(&name, &value).await.json();
        assert!(!saved.push_notifications);
        assert_eq!(saved.notification_interval_hours, 12);
        assert!(saved.updated_at.is_some());
    }

    #[test_log::test(tokio::test)]
    async fn rejects_interval_out_of_range() {
        let app = create_test_app(Arc::new(InMemoryBackend::new()));
        let (name, value) = auth_header(Uuid::new_v4());

        let response = app
            .put("/api/v1/notification-settings")
            .add_header(&name, &value)
            .json(&json!({ "push_notifications": true, "notification_interval_hours": 48 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
