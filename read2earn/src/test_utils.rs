//! Fixtures and a test server over the in-memory backend.

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    AppState,
    auth::session::{Session, SessionClaims, create_session_token},
    backend::{Backend, InMemoryBackend},
    build_router,
    config::{AuthConfig, BackendKind, Config},
    db::models::{articles::Article, profiles::Profile},
    types::UserId,
    views::render::Renderer,
};

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        backend: BackendKind::InMemory,
        auth: AuthConfig {
            jwt_secret: Some(TEST_JWT_SECRET.to_string()),
            ..Default::default()
        },
        // axum-prometheus installs a process-wide recorder, which can only happen once
        enable_metrics: false,
        ..Default::default()
    }
}

/// Router over `backend`, wrapped in an axum-test server.
pub fn create_test_app(backend: Arc<InMemoryBackend>) -> TestServer {
    let state = AppState::builder()
        .config(create_test_config())
        .backend(backend as Arc<dyn Backend>)
        .renderer(Arc::new(Renderer::new().expect("templates should compile")))
        .build();
    let router = build_router(&state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}

pub fn token_for(user_id: UserId) -> String {
    let claims = SessionClaims::new(user_id, Some(format!("{user_id}@example.com")), Duration::hours(1));
    create_session_token(&claims, &create_test_config().auth).expect("Failed to sign test token")
}

/// `Authorization` header name and value for `user_id`.
pub fn auth_header(user_id: UserId) -> (String, String) {
    ("authorization".to_string(), format!("Bearer {}", token_for(user_id)))
}

pub fn session_for(user_id: UserId) -> Session {
    Session {
        user_id,
        email: Some(format!("{user_id}@example.com")),
        expires_at: Utc::now() + Duration::hours(1),
    }
}

pub fn profile_for(user_id: UserId, points: i32, plan_type: &str) -> Profile {
    let now = Utc::now();
    Profile {
        id: Uuid::new_v4(),
        user_id,
        email: format!("{user_id}@example.com"),
        points,
        articles_read_today: 3,
        total_articles_read: 42,
        plan_type: plan_type.to_string(),
        country_code: Some("US".to_string()),
        referral_code: None,
        referred_by: None,
        usdt_wallet_trc20: None,
        usdt_wallet_bep20: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn article_published_at(hours_ago: i64) -> Article {
    let published_at = Utc::now() - Duration::hours(hours_ago);
    Article {
        id: Uuid::new_v4(),
        title: format!("Story from {hours_ago} hours ago"),
        summary: Some("A short summary".to_string()),
        content: "Full article body".to_string(),
        category: "general".to_string(),
        country_code: "US".to_string(),
        image_url: None,
        source: Some("Wire".to_string()),
        external_id: None,
        read_count: 0,
        published_at,
        created_at: published_at,
    }
}
