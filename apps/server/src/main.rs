//! # Vela POS Server
//!
//! HTTP API binary: configuration, logging, database pool, router, serve.
//!
//! ## Startup Sequence
//! ```text
//! 1. tracing-subscriber (RUST_LOG env filter, default "info")
//! 2. ServerConfig::load()      env vars with defaults
//! 3. Database::new()           pool + WAL + embedded migrations
//! 4. axum::serve()             parallel request handling on tokio
//! ```

use tracing::info;
use tracing_subscriber::EnvFilter;

use vela_db::Database;
use vela_server::config::ServerConfig;
use vela_server::routes::app;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("starting Vela POS server");

    let config = ServerConfig::load()?;
    info!(
        port = config.port,
        database = %config.database_path,
        "configuration loaded"
    );

    // The pool creates the database file, but not its parent directory.
    if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(config.db_config()).await?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app(db)).await?;

    Ok(())
}
