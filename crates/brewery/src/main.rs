//! Brewery customer service
//!
//! Serves the customer REST API over the configured storage backend.

use std::path::PathBuf;
use std::time::Duration;

use brewery_persistence::backends::memory::InMemoryBackend;
use brewery_persistence::core::CustomerService;
use brewery_rest::{
    DocumentedService, ServerConfig, SnippetRecorder, StorageBackendMode, create_app_with_config,
    init_logging,
};
use clap::Parser;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[cfg(feature = "sqlite")]
use brewery_persistence::backends::sqlite::SqliteBackend;

/// Creates and initializes a SQLite backend from the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    let db_path = config.database_url.as_deref().unwrap_or("brewery.db");
    info!(database = %db_path, "Initializing SQLite backend");

    let backend = SqliteBackend::open(db_path)?;
    backend.init_schema()?;

    Ok(backend)
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Starts the Axum HTTP server and runs until shutdown.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Writes pending snippets to `docs_dir` every `period` until aborted.
fn spawn_snippet_flusher(
    recorder: SnippetRecorder,
    docs_dir: PathBuf,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            match recorder.write_to(&docs_dir) {
                Ok(written) if !written.is_empty() => {
                    info!(count = written.len(), "Flushed API documentation snippets");
                }
                Ok(_) => {}
                Err(e) => error!(error = %e, "Failed to flush API documentation snippets"),
            }
        }
    })
}

/// Serves a backend, recording documentation snippets when `docs_dir` is set.
async fn run<S>(service: S, config: ServerConfig) -> anyhow::Result<()>
where
    S: CustomerService + 'static,
{
    let Some(docs_dir) = config.docs_dir.clone() else {
        let app = create_app_with_config(service, config.clone());
        return serve(app, &config).await;
    };

    info!(
        dir = %docs_dir.display(),
        capacity = config.docs_capacity,
        "Recording API documentation snippets"
    );
    let recorder = SnippetRecorder::with_capacity(config.docs_capacity);
    let service = DocumentedService::with_recorder(service, recorder.clone());
    let flusher = spawn_snippet_flusher(
        recorder.clone(),
        docs_dir.clone(),
        Duration::from_secs(config.docs_flush_interval),
    );

    let app = create_app_with_config(service, config.clone());
    let served = serve(app, &config).await;
    flusher.abort();

    let written = recorder.write_to(&docs_dir)?;
    info!(
        count = written.len(),
        dropped = recorder.dropped(),
        dir = %docs_dir.display(),
        "Wrote API documentation snippets"
    );
    served
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        storage_backend = %config.storage_backend,
        "Starting brewery customer service"
    );

    match config.storage_backend {
        StorageBackendMode::Memory => run(InMemoryBackend::new(), config).await,
        StorageBackendMode::Sqlite => start_sqlite(config).await,
    }
}

/// Starts the server with the SQLite backend.
#[cfg(feature = "sqlite")]
async fn start_sqlite(config: ServerConfig) -> anyhow::Result<()> {
    let backend = create_sqlite_backend(&config)?;
    run(backend, config).await
}

/// Fallback when sqlite feature is not enabled.
#[cfg(not(feature = "sqlite"))]
async fn start_sqlite(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The sqlite backend requires the 'sqlite' feature. \
         Build with: cargo build -p brewery --features sqlite"
    )
}
