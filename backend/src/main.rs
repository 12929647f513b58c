use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use backoffice_backend::{
    config::{AppConfig, StorageBackend},
    create_router, initialize_backend,
    storage::{Connection, MemoryConnection, SqliteConnection},
};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!("Starting back-office with {:?} storage", config.storage);

    match config.storage {
        StorageBackend::Sqlite => {
            info!("Setting up database at {}", config.database_url);
            let connection = SqliteConnection::new(&config.database_url).await?;
            serve(connection, config).await
        }
        StorageBackend::Memory => serve(MemoryConnection::new(), config).await,
    }
}

async fn serve<C: Connection>(connection: C, config: AppConfig) -> Result<()> {
    let app = create_router(initialize_backend(connection), config.cors_origin);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
