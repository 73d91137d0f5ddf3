use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Duration;
use talent_pipeline::{
    config::{get_config, init_config},
    database::{
        pool::{create_pool, run_migrations},
        postgres::PgStore,
        seed::seed_demo_data,
    },
    routes,
    utils::credentials::CredentialService,
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    init_config()?;
    let config = get_config();

    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;

    let store = Arc::new(PgStore::new(pool.clone()));
    let credentials =
        CredentialService::new(&config.jwt_secret, Duration::hours(config.token_ttl_hours));

    if config.seed_demo_data {
        seed_demo_data(store.as_ref(), &credentials).await?;
    }

    let app_state = AppState::new(store, credentials);
    let app = routes::router(app_state, config.api_rps);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Database pool closed");
    Ok(())
}
