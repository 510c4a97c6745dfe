//! OpenAPI documentation for the `/api/v1` surface.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;

/// Session token schemes: the bearer header for API clients and the cookie browsers carry.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "BearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token issued by the auth provider:\n\n\
                            ```\nAuthorization: Bearer YOUR_ACCESS_TOKEN\n```",
                        ))
                        .build(),
                ),
            );
            components.security_schemes.insert(
                "CookieAuth".to_string(),
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "sb-access-token",
                    "Session cookie set by the auth provider (name configurable via `auth.cookie_name`)",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Read2Earn API", description = "Read news, earn points, withdraw USDT."),
    servers(
        (url = "/api/v1", description = "Read2Earn API")
    ),
    modifiers(&SecurityAddon),
    paths(
        api::handlers::views::landing_view,
        api::handlers::views::dashboard_view,
        api::handlers::views::navigation,
        api::handlers::profile::get_profile,
        api::handlers::articles::list_articles,
        api::handlers::articles::get_article,
        api::handlers::reading_history::record_read,
        api::handlers::reading_history::list_reading_history,
        api::handlers::withdrawals::list_withdrawals,
        api::handlers::withdrawals::create_withdrawal,
        api::handlers::notification_settings::get_notification_settings,
        api::handlers::notification_settings::update_notification_settings,
        api::handlers::roles::check_current_user_role,
        api::handlers::admin::list_system_config,
        api::handlers::admin::list_provider_api_keys,
    ),
    tags(
        (name = "views", description = "Screens as JSON"),
        (name = "profile", description = "The caller's profile"),
        (name = "articles", description = "News feed"),
        (name = "reading_history", description = "Articles the caller has read"),
        (name = "withdrawals", description = "Points to USDT withdrawal requests"),
        (name = "notification_settings", description = "Push notification preferences"),
        (name = "roles", description = "Role checks"),
        (name = "admin", description = "Admin-only settings and keys"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route_and_scheme() {
        let doc = ApiDoc::openapi();
        for path in [
            "/landing",
            "/dashboard",
            "/navigation",
            "/profile",
            "/articles",
            "/articles/{id}",
            "/reading-history",
            "/withdrawals",
            "/notification-settings",
            "/users/current/roles/{role}",
            "/system-config",
            "/api-keys",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let schemes = &doc.components.as_ref().unwrap().security_schemes;
        assert!(schemes.contains_key("BearerAuth"));
        assert!(schemes.contains_key("CookieAuth"));
    }

    #[test]
    fn id_fields_are_documented_as_uuid_strings() {
        use crate::db::models::{profiles::Profile, withdrawals::Withdrawal};
        use utoipa::PartialSchema;

        let withdrawal = serde_json::to_value(Withdrawal::schema()).unwrap();
        for field in ["id", "user_id"] {
            assert_eq!(withdrawal["properties"][field]["type"], "string");
            assert_eq!(withdrawal["properties"][field]["format"], "uuid");
        }

        let profile = serde_json::to_value(Profile::schema()).unwrap();
        assert_eq!(profile["properties"]["referred_by"]["format"], "uuid");
    }
}
