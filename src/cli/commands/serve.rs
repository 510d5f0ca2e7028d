// cli/commands/serve.rs - Run the HTTP adapter

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::{self, StoreBackend};
use crate::handlers::NoteService;
use crate::http;
use crate::store::{self, PgNoteStore, SharedStore};

pub async fn handle(port: Option<u16>, create_table: bool) -> anyhow::Result<()> {
    let config = config::config();
    info!("Starting notes API in {:?} mode", config.environment);

    let store: SharedStore = match config.store.backend {
        StoreBackend::Postgres => {
            let pg = PgNoteStore::connect(&config.store)
                .context("invalid note store configuration")?;
            pg.health_check().await.context("note store is unreachable")?;
            if create_table {
                pg.create_table().await.context("failed to create notes table")?;
            }
            Arc::new(pg)
        }
        backend => {
            if create_table {
                warn!("--create-table has no effect with the {:?} store", backend);
            }
            store::connect(&config.store).context("invalid note store configuration")?
        }
    };

    let app = http::app(NoteService::new(store), config);

    let bind_addr = format!("0.0.0.0:{}", port.unwrap_or(config.api.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Notes API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Notes API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
