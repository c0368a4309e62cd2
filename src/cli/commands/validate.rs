//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the shiftwatch configuration file.

use super::EXIT_CONFIG;
use crate::config::{load_config, mask, ShiftWatchConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates
        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print_summary(&config);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIG)
            }
        }
    }
}

fn print_summary(config: &ShiftWatchConfig) {
    println!("Configuration Summary:");
    println!("  Environment: {:?}", config.environment);
    println!("  Log Level: {}", config.application.log_level);
    println!("  Dry Run: {}", config.application.dry_run);
    println!("  Scheduling Server: {}", config.scheduling.base_url);
    println!("  Patient Server: {}", config.scheduling.patients_url());
    println!("  Employee ID: {}", config.scheduling.employee_id);
    println!("  Username: {}", config.scheduling.username);
    println!("  Password: {}", mask(&config.scheduling.password));
    println!("  Window: {} days", config.window.days);
    println!("  Diff Strategy: {}", config.diff.strategy);
    println!("  Notify On First Run: {}", config.diff.notify_on_first_run);
    println!("  Lookup Failure Policy: {}", config.lookup.on_failure);
    println!("  Snapshot File: {}", config.storage.path);

    if config.mail.enabled {
        println!(
            "  Mail: {}:{} ({})",
            config.mail.smtp_host, config.mail.smtp_port, config.mail.security
        );
        println!("  Mail From: {}", config.mail.sender);
        println!("  Mail To: {}", config.mail.recipient);
        println!(
            "  Mail Password: {}",
            config
                .mail
                .password
                .as_ref()
                .map(mask)
                .unwrap_or_else(|| "(not set)".to_string())
        );
    } else {
        println!("  Mail: disabled");
    }
    println!();
}
