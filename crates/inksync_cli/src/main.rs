//! InkSync terminal shell.
//!
//! # Responsibility
//! - Boot in order: configuration, logging, splash, storage, workspace.
//! - Hand the loaded workspace to the interactive session.
//!
//! # Invariants
//! - No boot step is fatal: logging and durable storage degrade with a
//!   warning instead of aborting.

mod cli;
mod command;
mod session;

use clap::Parser;
use inksync_core::{
    init_logging, AppConfig, DocumentStorage, DocumentStore, MemoryStorage, PresentationEffects,
    SharedEffects, SqliteStorage,
};
use log::{info, warn};
use session::{Session, TerminalEffects};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = cli::Args::parse().into_config();

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let effects: SharedEffects = Arc::new(TerminalEffects);
    show_splash(&config).await;
    effects.splash_shown();

    let store = DocumentStore::load(open_storage(&config));
    info!(
        "event=workspace_ready module=cli status=ok documents={} suggestion_key_present={}",
        store.len(),
        config.api_key.is_some()
    );

    Session::run(store, config.suggestion_client(), effects).await;
}

async fn show_splash(config: &AppConfig) {
    if config.splash_delay_ms == 0 {
        return;
    }
    println!("🖋️  InkSync");
    println!("Preparing your creative nook...");
    tokio::time::sleep(config.splash_delay()).await;
}

fn open_storage(config: &AppConfig) -> Box<dyn DocumentStorage> {
    match SqliteStorage::open(&config.db_path) {
        Ok(storage) => Box::new(storage),
        Err(err) => {
            warn!(
                "event=storage_open module=cli status=degraded fallback=memory error={err}"
            );
            eprintln!(
                "warning: could not open `{}` ({err}); drafts will not be saved this session",
                config.db_path.display()
            );
            Box::new(MemoryStorage::new())
        }
    }
}
