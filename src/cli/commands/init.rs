//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "shiftwatch.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - SHIFTWATCH_SCHEDULING_PASSWORD");
                println!("     - SHIFTWATCH_MAIL_PASSWORD");
                println!("  3. Validate configuration: shiftwatch validate-config");
                println!("  4. Try a run without side effects: shiftwatch check --dry-run");
                println!("  5. Schedule `shiftwatch check` with cron or a systemd timer");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# shiftwatch configuration

[scheduling]
base_url = "https://yourcompany.example.com"
employee_id = "1234"
username = "you@example.com"
password = "${SHIFTWATCH_SCHEDULING_PASSWORD}"

[mail]
smtp_host = "smtp.example.com"
sender = "you@example.com"
recipient = "5550100@sms.example.com"
password = "${SHIFTWATCH_MAIL_PASSWORD}"
"#
        .to_string()
    }

    /// Generate configuration with all options documented
    fn generate_config_with_examples() -> String {
        r#"# shiftwatch configuration
#
# Values of the form ${VAR} are read from the environment (or a .env file).
# Any key can also be overridden with SHIFTWATCH_<SECTION>_<KEY>,
# e.g. SHIFTWATCH_WINDOW_DAYS=7.

# development | staging | production
environment = "development"

[application]
# trace | debug | info | warn | error
log_level = "info"
# Compute changes without sending mail or saving the snapshot
dry_run = false

[scheduling]
# Host serving /scheduling/admin/getshifts
base_url = "https://yourcompany.example.com"
# Host serving /api/v1/patients/{id}; defaults to base_url
# patients_base_url = "https://patients.example.com"
employee_id = "1234"
calendar_type = "user"
username = "you@example.com"
password = "${SHIFTWATCH_SCHEDULING_PASSWORD}"
timeout_seconds = 30
# Must stay true in production
tls_verify = true

[window]
# Number of days to watch, starting today (1-31)
days = 5

[diff]
# identity: compare every visit field (recommended)
# count_only: only compare how many visits each day has
strategy = "identity"
# Send a message on the very first run, when no saved schedule exists
notify_on_first_run = true

[lookup]
# abort: stop the run if a patient's city cannot be looked up
# fallback: use fallback_location instead
on_failure = "abort"
fallback_location = "Unknown"

[storage]
path = "saved-schedule.json"

[mail]
enabled = true
smtp_host = "smtp.example.com"
smtp_port = 587
# starttls | tls | none
security = "starttls"
sender = "you@example.com"
# An email-to-SMS gateway address works here
recipient = "5550100@sms.example.com"
# Defaults to the sender address
# username = "you@example.com"
password = "${SHIFTWATCH_MAIL_PASSWORD}"

[logging]
local_enabled = false
local_path = "logs"
# daily | hourly
local_rotation = "daily"
"#
        .to_string()
    }
}
