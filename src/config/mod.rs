//! Configuration management for shiftwatch.
//!
//! shiftwatch reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SHIFTWATCH_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [scheduling]
//! base_url = "https://acme.example.com"
//! employee_id = "1234"
//! username = "nurse@example.com"
//! password = "${SHIFTWATCH_SCHEDULING_PASSWORD}"
//!
//! [window]
//! days = 5
//!
//! [mail]
//! smtp_host = "smtp.example.com"
//! sender = "watch@example.com"
//! recipient = "5550100@sms.example.com"
//! password = "${SHIFTWATCH_MAIL_PASSWORD}"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use shiftwatch::config::load_config;
//!
//! # fn example() {
//! match load_config("shiftwatch.toml") {
//!     Ok(config) => println!("Watching employee {}", config.scheduling.employee_id),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DiffConfig, DiffStrategy, Environment, LoggingConfig, LookupConfig,
    LookupFailurePolicy, MailConfig, SchedulingConfig, ShiftWatchConfig, SmtpSecurity,
    StorageConfig, WindowConfig,
};
pub use secret::{mask, secret_string, SecretString, SecretValue};
