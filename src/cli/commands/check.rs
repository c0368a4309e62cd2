//! Check command implementation
//!
//! Runs one full check: download, diff, notify, save.

use super::{exit_code_for, EXIT_CONFIG, EXIT_DELIVERY_FAILED};
use crate::config::load_config;
use crate::core::report::render_snapshot;
use crate::core::run::{RunCoordinator, RunOptions, RunSummary};
use chrono::{Local, NaiveDate};
use clap::Args;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Compute and print changes without sending mail or saving
    #[arg(long)]
    pub dry_run: bool,

    /// First day of the window (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Override the window length in days
    #[arg(long)]
    pub days: Option<u32>,
}

impl CheckArgs {
    /// Execute the check command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if let Some(days) = self.days {
            tracing::info!(days, "Overriding window length from CLI");
            config.window.days = days;
        }
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("❌ Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let options = RunOptions {
            reference: self.date.unwrap_or_else(|| Local::now().date_naive()),
            days: config.window.days,
            dry_run: self.dry_run || config.application.dry_run,
        };

        if options.dry_run {
            println!("🔍 DRY RUN MODE - nothing will be sent or saved");
        }

        let coordinator = match RunCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to set up check");
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        match coordinator.execute(&options).await {
            Ok(summary) => {
                summary.log_summary();
                print_summary(&summary);
                Ok(if summary.is_successful() {
                    0
                } else {
                    EXIT_DELIVERY_FAILED
                })
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Schedule check failed");
                eprintln!("❌ {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    print!("{}", render_snapshot(&summary.snapshot));

    if summary.changes_count() == 0 {
        println!("No changes in the schedule.");
        return;
    }

    println!("Found {} changes in the schedule.", summary.changes_count());
    println!();
    print!("{}", summary.message);

    if let Some(error) = &summary.delivery_error {
        eprintln!("❌ Notification not delivered: {error}");
    }
}
