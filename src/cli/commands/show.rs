//! Show command implementation
//!
//! Prints the saved snapshot without contacting the scheduling service.

use super::{exit_code_for, EXIT_FATAL};
use crate::adapters::storage::{JsonFileStore, SnapshotStore};
use crate::config::load_config;
use crate::core::report::render_snapshot;
use clap::Args;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {}

impl ShowArgs {
    /// Execute the show command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let store = JsonFileStore::new(&config.storage.path);
        match store.load().await {
            Ok(Some(snapshot)) => {
                println!("Saved schedule ({})", store.describe());
                println!();
                print!("{}", render_snapshot(&snapshot));
                Ok(0)
            }
            Ok(None) => {
                println!("No saved schedule at {}", store.describe());
                println!("Run `shiftwatch check` to create one.");
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read saved schedule");
                eprintln!("❌ {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}
