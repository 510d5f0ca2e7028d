pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "notes-api")]
#[command(about = "Owner-scoped note CRUD handler")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Serve the note handler over HTTP (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides NOTES_API_PORT/PORT)")]
        port: Option<u16>,

        #[arg(long, help = "Create the notes table if it does not exist (postgres store)")]
        create_table: bool,
    },

    #[command(about = "Handle one API gateway event and print the response")]
    Invoke {
        #[arg(long, help = "Event JSON file; reads stdin when omitted")]
        event: Option<PathBuf>,

        #[arg(long, help = "Pretty-print the response document")]
        pretty: bool,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve { port, create_table }) => {
            commands::serve::handle(port, create_table).await
        }
        Some(Commands::Invoke { event, pretty }) => commands::invoke::handle(event, pretty).await,
        None => commands::serve::handle(None, false).await,
    }
}
