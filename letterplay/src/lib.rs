//! # letterplay: reviews service for the LetterPlay games catalog
//!
//! `letterplay` lets users rate and comment on games. It stores at most one review per user
//! and game (a second submission overwrites the first), lists the reviews of a game together
//! with their average score, lists a user's own reviews, lets authors delete their reviews,
//! and publishes a leaderboard of the best-rated games with their genres, developer and
//! publisher.
//!
//! ## Architecture
//!
//! The HTTP layer is [Axum](https://github.com/tokio-rs/axum) and all data lives in PostgreSQL,
//! accessed through sqlx. A request flows through three layers:
//!
//! - the **API layer** ([`api`]) validates input, resolves the caller from a trusted proxy
//!   header ([`auth`]) and shapes responses,
//! - the **service layer** ([`service`]) enforces one review per (user, game) and that only
//!   the author may delete a review,
//! - the **database layer** ([`db`]) holds repositories issuing parameterized SQL.
//!
//! The catalog tables (`users`, `jogos`, `generos`, `empresas`) are owned by the catalog;
//! this service only writes `avaliacoes`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use letterplay::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = letterplay::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     letterplay::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod service;
pub mod telemetry;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use crate::{
    api::handlers::{rankings, reviews},
    config::CorsOrigin,
    openapi::ApiDoc,
    service::ReviewService,
};
use axum::{
    Json, Router,
    http::{self, HeaderValue, Method},
    routing::{delete, get, post},
};
use bon::Builder;
pub use config::Config;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
///
/// ```ignore
/// let state = AppState::builder().db(pool).config(config).build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

impl AppState {
    pub fn review_service(&self) -> ReviewService {
        ReviewService::new(self.db.clone(), self.config.ranking.limit)
    }
}

/// Get the letterplay database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let settings = &config.database.pool;
    info!("Connecting to database");

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout())
        .idle_timeout(settings.idle_timeout())
        .max_lifetime(settings.max_lifetime())
        .connect(&config.database.url)
        .await?;

    Ok(pool)
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            // Url serializes with a trailing slash, browsers send origins without one
            CorsOrigin::Url(url) => url.as_str().trim_end_matches('/').parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_credentials(config.cors.allow_credentials);

    if let Some(max_age) = config.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router: the `/api/v1` routes, health check, OpenAPI document and
/// Scalar docs, wrapped in CORS and tracing layers.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors = create_cors_layer(&state.config)?;

    let api_routes = Router::new()
        .route(
            "/games/{game_id}/reviews",
            post(reviews::create_review).get(reviews::list_game_reviews),
        )
        .route("/reviews/me", get(reviews::list_my_reviews))
        .route("/reviews/{review_id}", delete(reviews::delete_review))
        .route("/rankings/weekly", get(rankings::weekly_ranking));

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// The configured service, ready to serve.
///
/// 1. [`Application::new`] connects to the database, runs migrations and builds the router
/// 2. [`Application::serve`] binds the TCP listener and handles requests until shutdown
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create the application, reusing `pool` if given instead of connecting.
    pub async fn new_with_pool(config: Config, pool: Option<PgPool>) -> anyhow::Result<Self> {
        debug!("Starting letterplay with configuration: {:#?}", config);

        let pool = match pool {
            Some(pool) => pool,
            None => setup_database(&config).await?,
        };
        migrator().run(&pool).await?;

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(any(test, feature = "test-utils"))]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router.into_make_service()).expect("Failed to create test server")
    }

    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("letterplay listening on http://{}", bind_addr);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
