//! Adopt a Dog - random dog photos and an admin-curated adoption list.
//!
//! # Architecture
//!
//! - Axum web framework with HTMX for the on-load widget fetch
//! - Askama templates for server-side rendering
//! - dog.ceo for random dog images
//! - Supabase authentication service for sign-in and roles
//! - `PostgreSQL` for dog records and sessions

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use tower_http::services::ServeDir;
use tower_sessions_sqlx_store::PostgresStore;

use adopt_a_dog_site::config::SiteConfig;
use adopt_a_dog_site::db::{self, PgDogStore};
use adopt_a_dog_site::dog_api::DogCeoClient;
use adopt_a_dog_site::services::auth::SupabaseAuthClient;
use adopt_a_dog_site::state::AppState;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &SiteConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = SiteConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "adopt_a_dog_site=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    let session_store = PostgresStore::new(pool.clone());

    if config.run_migrations {
        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        session_store
            .migrate()
            .await
            .expect("Failed to migrate session store");
        tracing::info!("Migrations complete");
    }

    let auth = SupabaseAuthClient::new(&config.auth).expect("Failed to create auth client");
    let state = AppState::new(
        config.clone(),
        Arc::new(PgDogStore::new(pool)),
        Arc::new(DogCeoClient::new(&config.dog_api)),
        Arc::new(auth),
    );

    let app = adopt_a_dog_site::app(state, session_store)
        .nest_service("/static", ServeDir::new("crates/site/static"))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!("site listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
