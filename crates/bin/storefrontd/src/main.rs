//! # storefrontd: storefront daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`storefront.toml` and environment overrides)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Connect to Redis for tokens, SMS codes and (by default) histories
//! - Construct application services, injecting adapters via port traits
//! - Regenerate the static homepage in the background
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod auth;
mod config;
mod history;

use std::path::PathBuf;

use storefront_adapter_http_axum::pages::StaticPagePublisher;
use storefront_adapter_http_axum::state::{AppState, Backend};
use storefront_adapter_storage_redis::{
    RedisHistoryStore, RedisSmsCodeStore, RedisTokenIssuer,
};
use storefront_adapter_storage_sqlite_sqlx::address_repo::SqliteAddressRepository;
use storefront_adapter_storage_sqlite_sqlx::history_store::SqliteHistoryStore;
use storefront_adapter_storage_sqlite_sqlx::homepage_source::SqliteHomepageSource;
use storefront_adapter_storage_sqlite_sqlx::sku_repo::SqliteSkuRepository;
use storefront_adapter_storage_sqlite_sqlx::user_repo::SqliteUserRepository;
use storefront_app::services::address_service::AddressService;
use storefront_app::services::catalog_service::CatalogService;
use storefront_app::services::history_service::HistoryService;
use storefront_app::services::homepage_service::HomepageService;
use storefront_app::services::user_service::UserService;
use storefront_domain::history::HistoryLimit;
use tracing_subscriber::EnvFilter;

use crate::auth::{BcryptPasswordHasher, LogMailer};
use crate::config::{Config, HistoryBackendKind};
use crate::history::HistoryBackend;

/// The production set of adapters.
struct Storefront;

impl Backend for Storefront {
    type History = HistoryBackend;
    type Skus = SqliteSkuRepository;
    type Users = SqliteUserRepository;
    type Addresses = SqliteAddressRepository;
    type Codes = RedisSmsCodeStore;
    type Hasher = BcryptPasswordHasher;
    type Tokens = RedisTokenIssuer;
    type Mailer = LogMailer;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = storefront_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database.url.clone(),
        max_connections: config.database.max_connections,
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Redis
    let mut redis_config = storefront_adapter_storage_redis::Config::new(&config.redis.url);
    redis_config.command_timeout = config.redis.command_timeout();
    let redis = redis_config.connect().await?;
    tracing::info!(url = %config.redis.url, "redis connected");

    // Adapters
    let skus = SqliteSkuRepository::new(pool.clone());
    let users = SqliteUserRepository::new(pool.clone());
    let addresses = SqliteAddressRepository::new(pool.clone());
    let history_store = match config.history.backend {
        HistoryBackendKind::Redis => HistoryBackend::Redis(RedisHistoryStore::new(redis.clone())),
        HistoryBackendKind::Sqlite => HistoryBackend::Sqlite(SqliteHistoryStore::new(pool.clone())),
    };
    let history_limit = HistoryLimit::new(config.history.limit)?;
    tracing::info!(
        backend = ?config.history.backend,
        limit = history_limit.get(),
        "browsing history configured"
    );

    // Services
    let state: AppState<Storefront> = AppState::new(
        HistoryService::new(history_store, skus.clone(), history_limit),
        CatalogService::new(skus),
        UserService::new(
            users.clone(),
            RedisSmsCodeStore::new(redis.clone()),
            BcryptPasswordHasher::new(config.auth.bcrypt_cost),
            RedisTokenIssuer::new(
                redis,
                config.auth.token_ttl(),
                config.auth.email_token_ttl(),
            ),
            LogMailer,
            config.auth.verify_url.clone(),
        ),
        AddressService::new(addresses, users, config.addresses.limit),
    );

    // Homepage
    let static_dir = PathBuf::from(&config.homepage.output_dir);
    let homepage = HomepageService::new(
        SqliteHomepageSource::new(pool),
        StaticPagePublisher::new(&static_dir),
    );
    let interval = config.homepage.interval();
    let refresher = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(err) = homepage.generate().await {
                tracing::warn!(error = %err, "homepage generation failed");
            }
        }
    });

    // HTTP
    let app = storefront_adapter_http_axum::router::build(state, &static_dir);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "storefrontd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresher.abort();
    tracing::info!("storefrontd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "unable to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
