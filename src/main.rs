//! Storeroom Server: numbered room booking service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use storeroom_api::{AppState, build_app};
use storeroom_core::config::{AppConfig, StorageBackend};
use storeroom_core::error::AppError;
use storeroom_database::{DatabasePool, MemoryRoomStore, MemoryUserStore, RoomStore, UserStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("STOREROOM_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Storeroom v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Storage backend ──────────────────────────────────
    let (rooms, users, pool) = open_stores(&config).await?;

    // ── Step 2: Services and router ──────────────────────────────
    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_app(AppState::new(config, rooms, users));

    // ── Step 3: Serve until Ctrl+C ───────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("Storeroom listening on {addr}");

    let (stopped_tx, stopped_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = stopped_tx.send(());
    });

    // In-flight requests get `grace` to finish once the signal arrives.
    let result = tokio::select! {
        result = server => result.map_err(AppError::from),
        _ = async {
            let _ = stopped_rx.await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed");
            Ok(())
        }
    };

    if let Some(pool) = pool {
        pool.close().await;
    }
    tracing::info!("Storeroom stopped");
    result
}

type Stores = (Arc<dyn RoomStore>, Arc<dyn UserStore>, Option<DatabasePool>);

/// Opens the configured room and user stores.
async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    let room_count = config.booking.room_count;
    tracing::info!(backend = %config.database.backend, rooms = room_count, "Opening storage");

    match config.database.backend {
        StorageBackend::Memory => {
            let rooms: Arc<dyn RoomStore> = Arc::new(MemoryRoomStore::seeded(room_count));
            let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
            Ok((rooms, users, None))
        }
        StorageBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            let (room_repo, user_repo) = pool.repositories();
            room_repo.provision(room_count).await?;
            let rooms: Arc<dyn RoomStore> = Arc::new(room_repo);
            let users: Arc<dyn UserStore> = Arc::new(user_repo);
            Ok((rooms, users, Some(pool)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
