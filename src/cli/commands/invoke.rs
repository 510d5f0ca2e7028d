// cli/commands/invoke.rs - Handle a single gateway event
//
// A store failure aborts with an error and no response document, the way a
// function runtime sees an unhandled exception.

use std::path::PathBuf;

use anyhow::Context;
use tokio::io::AsyncReadExt;

use crate::config;
use crate::gateway::{self, GatewayEvent};
use crate::handlers::NoteService;
use crate::store;

pub async fn handle(event_path: Option<PathBuf>, pretty: bool) -> anyhow::Result<()> {
    let raw = match &event_path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read event file {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("failed to read event from stdin")?;
            raw
        }
    };

    let event: GatewayEvent = serde_json::from_str(&raw).context("event is not valid JSON")?;

    // The pool is lazy; an unauthenticated event never touches the database.
    let store =
        store::connect(&config::config().store).context("invalid note store configuration")?;
    let service = NoteService::new(store);

    let response = gateway::invoke(&service, event)
        .await
        .context("invocation failed")?;

    let output = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);
    Ok(())
}
