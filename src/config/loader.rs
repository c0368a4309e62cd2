//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DiffStrategy, LookupFailurePolicy, ShiftWatchConfig, SmtpSecurity};
use crate::config::secret_string;
use crate::domain::errors::ShiftWatchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ShiftWatchConfig
/// 4. Applies environment variable overrides (SHIFTWATCH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use shiftwatch::config::loader::load_config;
///
/// let config = load_config("shiftwatch.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ShiftWatchConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ShiftWatchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ShiftWatchError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ShiftWatchConfig = toml::from_str(&contents)
        .map_err(|e| ShiftWatchError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ShiftWatchError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("environment variable pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Values are escaped for a TOML basic string, so placeholders belong inside
/// double quotes. Comment lines are left untouched. All missing variables are
/// reported at once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line =
                        processed_line.replace(&placeholder, &escape_basic_string(&value));
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ShiftWatchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Escapes `value` as the body of a TOML basic string
fn escape_basic_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        ShiftWatchError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}

/// Applies environment variable overrides using SHIFTWATCH_* prefix
///
/// Environment variables follow the pattern: SHIFTWATCH_<SECTION>_<KEY>,
/// for example SHIFTWATCH_SCHEDULING_PASSWORD or SHIFTWATCH_WINDOW_DAYS.
fn apply_env_overrides(config: &mut ShiftWatchConfig) -> Result<()> {
    let var = |name: &str| std::env::var(name).ok();

    // Application overrides
    if let Some(val) = var("SHIFTWATCH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = var("SHIFTWATCH_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Scheduling overrides
    if let Some(val) = var("SHIFTWATCH_SCHEDULING_BASE_URL") {
        config.scheduling.base_url = val;
    }
    if let Some(val) = var("SHIFTWATCH_SCHEDULING_PATIENTS_BASE_URL") {
        config.scheduling.patients_base_url = Some(val);
    }
    if let Some(val) = var("SHIFTWATCH_SCHEDULING_EMPLOYEE_ID") {
        config.scheduling.employee_id = val;
    }
    if let Some(val) = var("SHIFTWATCH_SCHEDULING_USERNAME") {
        config.scheduling.username = val;
    }
    if let Some(val) = var("SHIFTWATCH_SCHEDULING_PASSWORD") {
        config.scheduling.password = secret_string(val);
    }
    if let Some(val) = var("SHIFTWATCH_SCHEDULING_TLS_VERIFY") {
        config.scheduling.tls_verify = val.parse().unwrap_or(true);
    }

    // Window overrides
    if let Some(val) = var("SHIFTWATCH_WINDOW_DAYS") {
        config.window.days = parse_override("SHIFTWATCH_WINDOW_DAYS", &val)?;
    }

    // Diff overrides
    if let Some(val) = var("SHIFTWATCH_DIFF_STRATEGY") {
        config.diff.strategy = match val.as_str() {
            "identity" => DiffStrategy::Identity,
            "count_only" => DiffStrategy::CountOnly,
            other => {
                return Err(ShiftWatchError::Configuration(format!(
                    "Invalid SHIFTWATCH_DIFF_STRATEGY '{other}'. Must be one of: identity, count_only"
                )))
            }
        };
    }

    // Lookup overrides
    if let Some(val) = var("SHIFTWATCH_LOOKUP_ON_FAILURE") {
        config.lookup.on_failure = match val.as_str() {
            "abort" => LookupFailurePolicy::Abort,
            "fallback" => LookupFailurePolicy::Fallback,
            other => {
                return Err(ShiftWatchError::Configuration(format!(
                    "Invalid SHIFTWATCH_LOOKUP_ON_FAILURE '{other}'. Must be one of: abort, fallback"
                )))
            }
        };
    }

    // Storage overrides
    if let Some(val) = var("SHIFTWATCH_STORAGE_PATH") {
        config.storage.path = val;
    }

    // Mail overrides
    if let Some(val) = var("SHIFTWATCH_MAIL_ENABLED") {
        config.mail.enabled = val.parse().unwrap_or(true);
    }
    if let Some(val) = var("SHIFTWATCH_MAIL_SMTP_HOST") {
        config.mail.smtp_host = val;
    }
    if let Some(val) = var("SHIFTWATCH_MAIL_SMTP_PORT") {
        config.mail.smtp_port = parse_override("SHIFTWATCH_MAIL_SMTP_PORT", &val)?;
    }
    if let Some(val) = var("SHIFTWATCH_MAIL_SECURITY") {
        config.mail.security = match val.as_str() {
            "starttls" => SmtpSecurity::Starttls,
            "tls" => SmtpSecurity::Tls,
            "none" => SmtpSecurity::None,
            other => {
                return Err(ShiftWatchError::Configuration(format!(
                    "Invalid SHIFTWATCH_MAIL_SECURITY '{other}'. Must be one of: starttls, tls, none"
                )))
            }
        };
    }
    if let Some(val) = var("SHIFTWATCH_MAIL_SENDER") {
        config.mail.sender = val;
    }
    if let Some(val) = var("SHIFTWATCH_MAIL_RECIPIENT") {
        config.mail.recipient = val;
    }
    if let Some(val) = var("SHIFTWATCH_MAIL_USERNAME") {
        config.mail.username = Some(val);
    }
    if let Some(val) = var("SHIFTWATCH_MAIL_PASSWORD") {
        config.mail.password = Some(secret_string(val));
    }

    // Logging overrides
    if let Some(val) = var("SHIFTWATCH_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = var("SHIFTWATCH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
