//! Configuration schema types
//!
//! This module defines the configuration structure for shiftwatch.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// How two snapshots are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiffStrategy {
    /// Per-visit identity matching on all fields
    #[default]
    Identity,
    /// Legacy mode: compare bucket lengths only
    CountOnly,
}

impl fmt::Display for DiffStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "identity"),
            Self::CountOnly => write!(f, "count_only"),
        }
    }
}

/// What to do when a subject's location cannot be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LookupFailurePolicy {
    /// Abort the whole run
    #[default]
    Abort,
    /// Keep the visit with the configured fallback location
    Fallback,
}

impl fmt::Display for LookupFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// SMTP transport security
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Plain connection upgraded with STARTTLS
    #[default]
    Starttls,
    /// Implicit TLS (SMTPS)
    Tls,
    /// No encryption
    None,
}

impl fmt::Display for SmtpSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starttls => write!(f, "starttls"),
            Self::Tls => write!(f, "tls"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Main shiftwatch configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftWatchConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Remote scheduling service
    pub scheduling: SchedulingConfig,

    /// Snapshot window
    #[serde(default)]
    pub window: WindowConfig,

    /// Diff behavior
    #[serde(default)]
    pub diff: DiffConfig,

    /// Location lookup behavior
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Snapshot persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Mail delivery
    pub mail: MailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShiftWatchConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.scheduling.validate(&self.environment)?;
        self.window.validate()?;
        self.lookup.validate()?;
        self.storage.validate()?;
        self.mail.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (compute changes, don't mail or save)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Remote scheduling service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Base URL of the scheduling API (e.g. `https://acme.example.com`)
    pub base_url: String,

    /// Base URL of the patient API, if it lives on a different host
    #[serde(default)]
    pub patients_base_url: Option<String>,

    /// Employee whose calendar is watched
    pub employee_id: String,

    /// Calendar type passed to the shifts query
    #[serde(default = "default_calendar_type")]
    pub calendar_type: String,

    /// Username for basic authentication
    pub username: String,

    /// Password for basic authentication
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// Must stay `true` in production (enforced by validation).
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl SchedulingConfig {
    /// Base URL used for patient lookups
    pub fn patients_url(&self) -> &str {
        self.patients_base_url.as_deref().unwrap_or(&self.base_url)
    }

    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        validate_http_url("scheduling.base_url", &self.base_url)?;
        if let Some(ref url) = self.patients_base_url {
            validate_http_url("scheduling.patients_base_url", url)?;
        }

        if self.employee_id.trim().is_empty() {
            return Err("scheduling.employee_id cannot be empty".to_string());
        }

        if self.username.is_empty() {
            return Err("scheduling.username cannot be empty".to_string());
        }

        if self.password.expose_secret().is_empty() {
            return Err("scheduling.password cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("scheduling.timeout_seconds must be > 0".to_string());
        }

        // Security: Enforce TLS verification in production environments
        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Set 'tls_verify = true', or set 'environment = \"development\"' for testing."
                    .to_string(),
            );
        }

        Ok(())
    }
}

fn validate_http_url(field: &str, url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!("{field} must start with http:// or https://"));
    }
    url::Url::parse(url).map_err(|e| format!("{field} is not a valid URL: {e}"))?;
    Ok(())
}

/// Snapshot window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Number of consecutive days, starting today, kept in a snapshot
    #[serde(default = "default_window_days")]
    pub days: u32,
}

impl WindowConfig {
    fn validate(&self) -> Result<(), String> {
        if !(1..=31).contains(&self.days) {
            return Err(format!(
                "window.days must be between 1 and 31, got {}",
                self.days
            ));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            days: default_window_days(),
        }
    }
}

/// Diff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Comparison strategy
    #[serde(default)]
    pub strategy: DiffStrategy,

    /// Report every visit as added when no saved schedule exists yet.
    /// When false the first run only seeds the saved schedule.
    #[serde(default = "default_true")]
    pub notify_on_first_run: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            strategy: DiffStrategy::default(),
            notify_on_first_run: true,
        }
    }
}

/// Location lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Failure policy
    #[serde(default)]
    pub on_failure: LookupFailurePolicy,

    /// Location used when a lookup fails under the fallback policy
    #[serde(default = "default_fallback_location")]
    pub fallback_location: String,
}

impl LookupConfig {
    fn validate(&self) -> Result<(), String> {
        if self.on_failure == LookupFailurePolicy::Fallback
            && self.fallback_location.trim().is_empty()
        {
            return Err(
                "lookup.fallback_location cannot be empty when on_failure = 'fallback'"
                    .to_string(),
            );
        }
        Ok(())
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            on_failure: LookupFailurePolicy::default(),
            fallback_location: default_fallback_location(),
        }
    }
}

/// Snapshot persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the saved schedule JSON file
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("storage.path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Mail delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Send notifications at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// SMTP server host name
    #[serde(default)]
    pub smtp_host: String,

    /// SMTP server port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Transport security
    #[serde(default)]
    pub security: SmtpSecurity,

    /// Sender address
    #[serde(default)]
    pub sender: String,

    /// Recipient address (an email-to-SMS gateway works too)
    #[serde(default)]
    pub recipient: String,

    /// SMTP login; defaults to the sender address
    #[serde(default)]
    pub username: Option<String>,

    /// SMTP password
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,
}

impl MailConfig {
    /// Login used for SMTP authentication
    pub fn login(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.sender)
    }

    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if !self.enabled {
            return Ok(());
        }

        if self.smtp_host.trim().is_empty() {
            return Err("mail.smtp_host cannot be empty when mail is enabled".to_string());
        }
        if self.smtp_port == 0 {
            return Err("mail.smtp_port must be > 0".to_string());
        }
        for (field, value) in [("mail.sender", &self.sender), ("mail.recipient", &self.recipient)]
        {
            if !value.contains('@') {
                return Err(format!("{field} must be an email address, got '{value}'"));
            }
        }
        if self
            .password
            .as_ref()
            .map(|p| p.expose_secret().is_empty())
            .unwrap_or(true)
        {
            return Err("mail.password cannot be empty when mail is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            security: SmtpSecurity::default(),
            sender: String::new(),
            recipient: String::new(),
            username: None,
            password: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_calendar_type() -> String {
    "user".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_window_days() -> u32 {
    5
}

fn default_fallback_location() -> String {
    "Unknown".to_string()
}

fn default_storage_path() -> String {
    "saved-schedule.json".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn scheduling() -> SchedulingConfig {
        SchedulingConfig {
            base_url: "https://acme.example.com".to_string(),
            patients_base_url: None,
            employee_id: "1234".to_string(),
            calendar_type: default_calendar_type(),
            username: "nurse".to_string(),
            password: secret_string("pass".to_string()),
            timeout_seconds: 30,
            tls_verify: true,
        }
    }

    fn mail() -> MailConfig {
        MailConfig {
            enabled: true,
            smtp_host: "smtp.example.com".to_string(),
            sender: "watch@example.com".to_string(),
            recipient: "5550100@sms.example.com".to_string(),
            password: Some(secret_string("mail-pass".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scheduling_config_validation() {
        let config = scheduling();
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Production).is_ok());

        let mut bad = scheduling();
        bad.base_url = "acme.example.com".to_string();
        assert!(bad.validate(&Environment::Development).is_err());

        let mut bad = scheduling();
        bad.employee_id = " ".to_string();
        assert!(bad.validate(&Environment::Development).is_err());

        let mut bad = scheduling();
        bad.password = secret_string(String::new());
        assert!(bad.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_tls_verification_in_production() {
        let mut config = scheduling();
        config.tls_verify = false;

        let result = config.validate(&Environment::Production);
        assert!(result
            .unwrap_err()
            .contains("TLS certificate verification cannot be disabled in production"));

        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Staging).is_ok());
    }

    #[test]
    fn test_patients_url_defaults_to_base_url() {
        let mut config = scheduling();
        assert_eq!(config.patients_url(), "https://acme.example.com");

        config.patients_base_url = Some("https://patients.example.com".to_string());
        assert_eq!(config.patients_url(), "https://patients.example.com");
    }

    #[test]
    fn test_window_config_validation() {
        assert!(WindowConfig::default().validate().is_ok());
        assert!(WindowConfig { days: 0 }.validate().is_err());
        assert!(WindowConfig { days: 32 }.validate().is_err());
        assert!(WindowConfig { days: 1 }.validate().is_ok());
    }

    #[test]
    fn test_lookup_config_validation() {
        let mut config = LookupConfig::default();
        assert_eq!(config.on_failure, LookupFailurePolicy::Abort);
        assert!(config.validate().is_ok());

        config.on_failure = LookupFailurePolicy::Fallback;
        config.fallback_location = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mail_config_validation() {
        assert!(mail().validate().is_ok());

        let mut config = mail();
        config.recipient = "nobody".to_string();
        assert!(config.validate().is_err());

        let mut config = mail();
        config.password = None;
        assert!(config.validate().is_err());

        // Nothing is required once mail is switched off
        let disabled = MailConfig::default();
        assert!(!disabled.enabled);
        assert!(disabled.validate().is_ok());
    }

    #[test]
    fn test_mail_login_defaults_to_sender() {
        let mut config = mail();
        assert_eq!(config.login(), "watch@example.com");

        config.username = Some("relay-user".to_string());
        assert_eq!(config.login(), "relay-user");
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enum_serde_names() {
        #[derive(Deserialize)]
        struct Probe {
            strategy: DiffStrategy,
            on_failure: LookupFailurePolicy,
            security: SmtpSecurity,
        }

        let probe: Probe = toml::from_str(
            r#"
strategy = "count_only"
on_failure = "fallback"
security = "tls"
"#,
        )
        .unwrap();
        assert_eq!(probe.strategy, DiffStrategy::CountOnly);
        assert_eq!(probe.on_failure, LookupFailurePolicy::Fallback);
        assert_eq!(probe.security, SmtpSecurity::Tls);
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_window_days(), 5);
        assert_eq!(default_storage_path(), "saved-schedule.json");
        assert_eq!(default_smtp_port(), 587);
        assert_eq!(DiffStrategy::default(), DiffStrategy::Identity);
        assert!(DiffConfig::default().notify_on_first_run);
    }
}
