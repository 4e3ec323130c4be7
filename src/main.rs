//! Deskbook Server: desk and room booking service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use deskbook_api::{AppState, build_app};
use deskbook_core::config::{AppConfig, DatabaseProvider};
use deskbook_core::error::{AppError, ErrorKind};
use deskbook_database::{
    DatabasePool, InventoryStore, MemoryInventoryStore, MemoryReservationLedger,
    PgInventoryStore, PgReservationLedger, ReservationLedger,
};
use deskbook_entity::declaration::load_declaration;
use deskbook_service::InventorySnapshotHolder;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `DESKBOOK_ENV` overlay, and `DESKBOOK__*`
/// environment variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("DESKBOOK_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("DESKBOOK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(&dir, &env)
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

/// Backends selected by `database.provider`.
struct Backends {
    store: Arc<dyn InventoryStore>,
    ledger: Arc<dyn ReservationLedger>,
    pool: Option<DatabasePool>,
}

async fn open_backends(config: &AppConfig) -> Result<Backends, AppError> {
    match config.database.provider {
        DatabaseProvider::Memory => {
            tracing::warn!("Using in-memory storage; bookings are lost on restart");
            Ok(Backends {
                store: Arc::new(MemoryInventoryStore::new()),
                ledger: Arc::new(MemoryReservationLedger::new()),
                pool: None,
            })
        }
        DatabaseProvider::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;

            if config.database.run_migrations {
                deskbook_database::migration::run_migrations(pool.pool()).await?;
            }

            Ok(Backends {
                store: Arc::new(PgInventoryStore::new(pool.pool().clone())),
                ledger: Arc::new(PgReservationLedger::new(pool.pool().clone())),
                pool: Some(pool),
            })
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Deskbook v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Storage backends ─────────────────────────────────
    let Backends {
        store,
        ledger,
        pool,
    } = open_backends(&config).await?;

    // ── Step 2: Services ─────────────────────────────────────────
    let holder = Arc::new(InventorySnapshotHolder::new());
    let cors = config.server.cors.clone();
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let spaces = config.spaces.clone();
    let mut state = AppState::new(config, store, ledger, holder);
    if let Some(pool) = &pool {
        state = state.with_database(pool.clone());
    }

    // ── Step 3: Seed inventory from the declaration ──────────────
    match (&spaces.declaration_file, spaces.sync_on_boot) {
        (Some(path), true) => {
            tracing::info!(path = %path, "Syncing inventory declaration...");
            let tree = load_declaration(path)?;
            let report = state.inventory_service.sync_from_declaration(&tree).await?;
            tracing::info!(
                areas = report.areas_created,
                item_groups = report.item_groups_created,
                items = report.items_created,
                "Inventory declaration synced"
            );
        }
        _ => {
            state.inventory_service.reload().await?;
        }
    }

    let snapshot = state.inventory_service.snapshot_summary();
    tracing::info!(
        version = snapshot.version,
        areas = snapshot.areas,
        item_groups = snapshot.item_groups,
        items = snapshot.items,
        "Inventory snapshot loaded"
    );

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app = build_app(state, &cors);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
        })?;

    tracing::info!("Deskbook server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = pool {
        if tokio::time::timeout(grace, pool.close()).await.is_err() {
            tracing::warn!("Database pool did not close within the grace period");
        }
    }

    tracing::info!("Deskbook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
