//! # read2earn: backend-for-frontend for the Read2Earn app
//!
//! Read2Earn pays users in points for reading news articles; points convert to USDT at 1000 points
//! per USDT and can be withdrawn to a TRC20 or BEP20 wallet. This crate serves the app's landing
//! page and signed-in dashboard, plus a JSON API over the user's profile, articles, reading
//! history, withdrawal requests and notification preferences.
//!
//! ## Architecture
//!
//! The HTTP layer is [Axum](https://github.com/tokio-rs/axum). Handlers never talk to the database
//! directly: they go through a [`backend::Backend`], which is either PostgreSQL (through the
//! repositories in [`db`]) or an in-memory fixture store for demos and tests.
//!
//! Reward and quota rules are owned by the database side. The values in [`points`] only drive
//! what the screens display and how a withdrawal request is priced.
//!
//! ### Request Flow
//!
//! A request first has its session resolved by the extractors in [`auth`]: a JWT from the
//! `Authorization: Bearer` header or from the session cookie. HTML pages redirect when the
//! session is missing; JSON endpoints answer 401. Views in [`views`] turn backend reads into
//! screens, which are either rendered to HTML or returned as JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use read2earn::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = read2earn::config::Args::parse();
//!     let config = Config::load(&args)?;
//!     read2earn::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! Migrations run on startup unless `database.run_migrations` is off:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::migrate::MigrateError> {
//! read2earn::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.
pub mod api;
pub mod auth;
pub mod backend;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod points;
pub mod telemetry;
pub mod types;
pub mod views;

#[cfg(test)]
pub mod test_utils;

use crate::{
    backend::{Backend, create_backend},
    config::{BackendKind, CorsOrigin, PoolSettings},
    openapi::ApiDoc,
    views::render::Renderer,
};
use axum::{Json, Router, http, http::HeaderValue, routing::get};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{ArticleId, UserId};

/// Application state shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// let state = AppState::builder()
///     .config(config)
///     .backend(backend)
///     .renderer(Arc::new(Renderer::new()?))
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn Backend>,
    pub renderer: Arc<Renderer>,
}

/// Get the read2earn database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

async fn connect(url: &str, settings: &PoolSettings) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .max_lifetime(settings.max_lifetime)
        .connect(url)
        .await?;
    Ok(pool)
}

/// Connect and migrate when the postgres backend is selected. The in-memory backend needs no pool.
async fn setup_database(config: &Config) -> anyhow::Result<Option<PgPool>> {
    if config.backend != BackendKind::Postgres {
        info!("Using in-memory backend; no database connection will be made");
        return Ok(None);
    }

    let url = config
        .database
        .url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("database.url is required for the postgres backend"))?;

    info!("Connecting to database");
    let pool = connect(url, &config.database.pool).await?;

    if config.database.run_migrations {
        migrator().run(&pool).await?;
        info!("Database migrations applied");
    }

    Ok(Some(pool))
}

/// Create CORS layer from configuration. A `*` entry allows any origin; the rest are listed.
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let allowed = &config.auth.cors.allowed_origins;
    let allow_origin = if allowed.contains(&CorsOrigin::Wildcard) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in allowed {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.as_str().trim_end_matches('/').parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT])
        .allow_headers([http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
        .allow_credentials(config.auth.cors.allow_credentials)
        .expose_headers(vec![http::header::LOCATION]);

    if let Some(max_age) = config.auth.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the router: HTML pages, the `/api/v1` JSON API, API docs, health check, and optionally
/// Prometheus metrics, all behind CORS and request tracing.
///
/// # Errors
///
/// Returns an error if the CORS configuration is invalid.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    use api::handlers::{
        admin, articles, notification_settings, pages, profile, reading_history, roles, views, withdrawals,
    };

    let api_routes = Router::new()
        .route("/landing", get(views::landing_view))
        .route("/dashboard", get(views::dashboard_view))
        .route("/navigation", get(views::navigation))
        .route("/profile", get(profile::get_profile))
        .route("/articles", get(articles::list_articles))
        .route("/articles/{id}", get(articles::get_article))
        .route(
            "/reading-history",
            get(reading_history::list_reading_history).post(reading_history::record_read),
        )
        .route("/withdrawals", get(withdrawals::list_withdrawals).post(withdrawals::create_withdrawal))
        .route(
            "/notification-settings",
            get(notification_settings::get_notification_settings).put(notification_settings::update_notification_settings),
        )
        .route("/users/current/roles/{role}", get(roles::check_current_user_role))
        .route("/system-config", get(admin::list_system_config))
        .route("/api-keys", get(admin::list_provider_api_keys))
        .with_state(state.clone());

    let router = Router::new()
        .route("/", get(pages::landing_page))
        .route("/dashboard", get(pages::dashboard_page))
        .route("/healthz", get(|| async { "OK" }))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state.clone())
        .nest("/api/v1", api_routes)
        .merge(Scalar::with_url("/api/docs", ApiDoc::openapi()));

    let mut router = router.layer(create_cors_layer(&state.config)?);

    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Top-level container that owns the router, its state and the database pool.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects and migrates (postgres backend only), compiles the
///    templates and builds the router
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and handles requests until the
///    shutdown future resolves, then closes the pool and flushes telemetry
pub struct Application {
    router: Router,
    config: Config,
    pool: Option<PgPool>,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting read2earn with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;
        let backend = create_backend(&config.backend, pool.clone())?;
        let renderer = Renderer::new().map_err(|e| anyhow::anyhow!("Failed to compile templates: {e:#}"))?;

        let app_state = AppState::builder()
            .config(config.clone())
            .backend(backend)
            .renderer(Arc::new(renderer))
            .build();

        let router = build_router(&app_state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "read2earn listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        if let Some(pool) = self.pool {
            info!("Closing database connections...");
            pool.close().await;
        }

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::create_test_config;
    use axum::http::StatusCode;

    #[test_log::test(tokio::test)]
    async fn in_memory_application_serves_health_and_docs() {
        let server = Application::new(create_test_config()).await.unwrap().into_test_server();

        let health = server.get("/healthz").await;
        health.assert_status(StatusCode::OK);
        assert_eq!(health.text(), "OK");

        let spec: serde_json::Value = server.get("/api/openapi.json").await.json();
        assert!(spec["paths"]["/withdrawals"].is_object());

        server.get("/api/docs").await.assert_status(StatusCode::OK);
    }

    #[test_log::test(tokio::test)]
    async fn metrics_route_absent_when_disabled() {
        let server = Application::new(create_test_config()).await.unwrap().into_test_server();

        server.get("/internal/metrics").await.assert_status(StatusCode::NOT_FOUND);
    }

    #[test_log::test(tokio::test)]
    async fn postgres_backend_requires_url() {
        let config = Config {
            backend: BackendKind::Postgres,
            ..create_test_config()
        };
        assert!(Application::new(config).await.is_err());
    }

    #[test]
    fn cors_layer_accepts_default_wildcard() {
        let config = Config::default();
        assert_eq!(config.auth.cors.allowed_origins, vec![CorsOrigin::Wildcard]);
        assert!(create_cors_layer(&config).is_ok());
    }

    #[test_log::test(tokio::test)]
    async fn router_builds_with_default_cors_settings() {
        let mut config = create_test_config();
        config.auth.cors = crate::config::CorsConfig::default();
        let state = AppState::builder()
            .config(config)
            .backend(Arc::new(crate::backend::InMemoryBackend::new()) as Arc<dyn Backend>)
            .renderer(Arc::new(Renderer::new().unwrap()))
            .build();

        let server = axum_test::TestServer::new(build_router(&state).unwrap()).unwrap();
        let response = server
            .get("/healthz")
            .add_header("origin", "https://reader.example")
            .await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.header("access-control-allow-origin").to_str().unwrap(), "*");
    }

    #[test]
    fn cors_layer_accepts_configured_origins() {
        let mut config = create_test_config();
        config.auth.cors.allowed_origins = vec![CorsOrigin::Url("https://app.read2earn.example".parse().unwrap())];
        config.auth.cors.allow_credentials = true;
        assert!(create_cors_layer(&config).is_ok());
    }
}
