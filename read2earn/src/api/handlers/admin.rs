//! Admin-only reads. The [`AdminSession`] extractor answers 403 for callers without the admin role.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use crate::{
    AppState,
    api::models::api_keys::{ApiKeysQuery, ProviderApiKeyInfo},
    auth::current_user::AdminSession,
    db::models::system_config::SystemConfigEntry,
    errors::Result,
};

#[utoipa::path(
    get,
    path = "/system-config",
    tag = "admin",
    summary = "List system settings",
    description = "Runtime settings such as the points rate and daily article quotas",
    responses(
        (status = 200, description = "All settings", body = Vec<SystemConfigEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip_all, fields(user_id = %admin.0.user_id))]
pub async fn list_system_config(State(state): State<AppState>, admin: AdminSession) -> Result<Json<Vec<SystemConfigEntry>>> {
    Ok(Json(state.backend.system_config().await?))
}

#[utoipa::path(
    get,
    path = "/api-keys",
    tag = "admin",
    summary = "List provider API keys",
    description = "News provider keys with their values masked",
    params(ApiKeysQuery),
    responses(
        (status = 200, description = "Provider keys", body = Vec<ProviderApiKeyInfo>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
    ),
    security(
        ("BearerAuth" = []),
        ("CookieAuth" = [])
    )
)]
#[instrument(skip_all, fields(user_id = %admin.0.user_id))]
pub async fn list_provider_api_keys(
    State(state): State<AppState>,
    admin: AdminSession,
    Query(query): Query<ApiKeysQuery>,
) -> Result<Json<Vec<ProviderApiKeyInfo>>> {
    let keys = state.backend.api_keys(query.provider.as_deref()).await?;
    Ok(Json(keys.into_iter().map(ProviderApiKeyInfo::from).collect()))
}

#[cfg(test)]
mod tests {
    use crate::backend::{Fixtures, InMemoryBackend};
    use crate::db::models::{api_keys::ProviderApiKey, user_roles::AppRole};
    use crate::test_utils::{auth_header, create_test_app};
    use axum::http::StatusCode;
    use chrono::Utc;
    use serde_json::Value;
    use std::sync::Arc;
    use uuid::Uuid;

    fn provider_key(provider: &str, key_value: &str) -> ProviderApiKey {
        ProviderApiKey {
            id: Uuid::new_v4(),
            provider: provider.to_string(),
            key_value: key_value.to_string(),
            is_active: true,
            usage_count: 0,
            last_used_at: None,
            created_at: Utc::now(),
        }
    }

    #[test_log::test(tokio::test)]
    async fn non_admins_are_forbidden() {
        let app = create_test_app(Arc::new(InMemoryBackend::from_fixtures(Fixtures::demo())));
        let (name, value) = auth_header(Uuid::new_v4());

        app.get("/api/v1/system-config").add_header(&name, &value).await.assert_status(StatusCode::FORBIDDEN);
        app.get("/api/v1/api-keys").add_header(&name, &value).await.assert_status(StatusCode::FORBIDDEN);
        app.get("/api/v1/system-config").await.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[test_log::test(tokio::test)]
    async fn admins_read_system_config() {
        let backend = Arc::new(InMemoryBackend::from_fixtures(Fixtures::demo()));
        let admin_id = Uuid::new_v4();
        backend.grant_role(admin_id, AppRole::Admin).await;
        let app = create_test_app(backend);
        let (name, value) = auth_header(admin_id);

        let response = app.get("/api/v1/system-config").add_header(&name, &value).await;

        response.assert_status(StatusCode::OK);
        let entries: Value = response.json();
        let keys: Vec<&str> = entries.as_array().unwrap().iter().map(|e| e["key"].as_str().unwrap()).collect();
        assert!(keys.contains(&"points_per_usdt"));
    }

    #[test_log::test(tokio::test)]
    async fn api_keys_are_masked_and_filterable() {
        let backend = Arc::new(InMemoryBackend::new());
        let admin_id = Uuid::new_v4();
        backend.grant_role(admin_id, AppRole::Admin).await;
        backend.insert_api_key(provider_key("newsapi", "newsapi-secret-0000-wxyz")).await;
        backend.insert_api_key(provider_key("gnews", "gnews-secret-1111-abcd")).await;
        let app = create_test_app(backend);
        let (name, value) = auth_header(admin_id);

        let response = app.get("/api/v1/api-keys").add_query_param("provider", "newsapi").add_header(&name, &value).await;

        response.assert_status(StatusCode::OK);
        let body = response.text();
        assert!(!body.contains("newsapi-secret"));
        let keys: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(keys.as_array().unwrap().len(), 1);
        assert_eq!(keys[0]["masked_key"], "********wxyz");
    }
}
