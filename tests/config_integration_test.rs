//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold ENV_MUTEX.

use secrecy::ExposeSecret;
use shiftwatch::config::{load_config, DiffStrategy, LookupFailurePolicy, SmtpSecurity};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for name in [
        "SHIFTWATCH_APPLICATION_LOG_LEVEL",
        "SHIFTWATCH_APPLICATION_DRY_RUN",
        "SHIFTWATCH_SCHEDULING_PASSWORD",
        "SHIFTWATCH_WINDOW_DAYS",
        "SHIFTWATCH_DIFF_STRATEGY",
        "SHIFTWATCH_LOOKUP_ON_FAILURE",
        "SHIFTWATCH_STORAGE_PATH",
        "SHIFTWATCH_MAIL_ENABLED",
        "SHIFTWATCH_MAIL_SMTP_PORT",
        "TEST_SCHEDULING_PASSWORD",
        "TEST_MAIL_PASSWORD",
        "TEST_ESCAPED_PASSWORD",
    ] {
        std::env::remove_var(name);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

const MINIMAL: &str = r#"
[scheduling]
base_url = "https://acme.example.com"
employee_id = "1234"
username = "nurse"
password = "pass"

[mail]
enabled = false
"#;

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
environment = "staging"

[application]
log_level = "debug"
dry_run = true

[scheduling]
base_url = "https://acme.example.com"
patients_base_url = "https://patients.example.com"
employee_id = "1234"
calendar_type = "user"
username = "nurse@example.com"
password = "secret-pass"
timeout_seconds = 10

[window]
days = 7

[diff]
strategy = "count_only"
notify_on_first_run = false

[lookup]
on_failure = "fallback"
fallback_location = "?"

[storage]
path = "/var/lib/shiftwatch/saved-schedule.json"

[mail]
smtp_host = "smtp.example.com"
smtp_port = 465
security = "tls"
sender = "watch@example.com"
recipient = "5550100@sms.example.com"
password = "mail-pass"

[logging]
local_enabled = false
local_path = "/tmp/shiftwatch"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.scheduling.patients_url(), "https://patients.example.com");
    assert_eq!(config.scheduling.password.expose_secret().as_ref(), "secret-pass");
    assert_eq!(config.scheduling.timeout_seconds, 10);
    assert_eq!(config.window.days, 7);
    assert_eq!(config.diff.strategy, DiffStrategy::CountOnly);
    assert!(!config.diff.notify_on_first_run);
    assert_eq!(config.lookup.on_failure, LookupFailurePolicy::Fallback);
    assert_eq!(config.lookup.fallback_location, "?");
    assert_eq!(config.storage.path, "/var/lib/shiftwatch/saved-schedule.json");
    assert!(config.mail.enabled);
    assert_eq!(config.mail.smtp_port, 465);
    assert_eq!(config.mail.security, SmtpSecurity::Tls);
    assert_eq!(config.mail.login(), "watch@example.com");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(MINIMAL);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.dry_run);
    assert_eq!(config.scheduling.calendar_type, "user");
    assert_eq!(config.scheduling.patients_url(), "https://acme.example.com");
    assert_eq!(config.window.days, 5);
    assert_eq!(config.diff.strategy, DiffStrategy::Identity);
    assert!(config.diff.notify_on_first_run);
    assert_eq!(config.lookup.on_failure, LookupFailurePolicy::Abort);
    assert_eq!(config.storage.path, "saved-schedule.json");
    assert!(!config.mail.enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("TEST_SCHEDULING_PASSWORD", "from-env");
    std::env::set_var("TEST_MAIL_PASSWORD", "mail-from-env");

    let temp_file = write_config(
        r#"
[scheduling]
base_url = "https://acme.example.com"
employee_id = "1234"
username = "nurse"
password = "${TEST_SCHEDULING_PASSWORD}"

[mail]
smtp_host = "smtp.example.com"
sender = "watch@example.com"
recipient = "5550100@sms.example.com"
# password = "${NOT_SET_BUT_COMMENTED}"
password = "${TEST_MAIL_PASSWORD}"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    cleanup_env_vars();

    assert_eq!(config.scheduling.password.expose_secret().as_ref(), "from-env");
    assert_eq!(
        config
            .mail
            .password
            .as_ref()
            .map(|p| p.expose_secret().as_ref().to_string()),
        Some("mail-from-env".to_string())
    );
}

#[test]
fn test_env_var_substitution_keeps_special_characters() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let password = r#"ab\tcd"e\f"#;
    std::env::set_var("TEST_ESCAPED_PASSWORD", password);

    let temp_file = write_config(
        r#"
[scheduling]
base_url = "https://acme.example.com"
employee_id = "1234"
username = "nurse"
password = "${TEST_ESCAPED_PASSWORD}"

[mail]
enabled = false
"#,
    );

    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.expect("Failed to load config");
    assert_eq!(config.scheduling.password.expose_secret().as_ref(), password);
}

#[test]
fn test_missing_env_var_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[scheduling]
base_url = "https://acme.example.com"
employee_id = "1234"
username = "nurse"
password = "${TEST_SCHEDULING_PASSWORD}"

[mail]
enabled = false
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_SCHEDULING_PASSWORD"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("SHIFTWATCH_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("SHIFTWATCH_WINDOW_DAYS", "10");
    std::env::set_var("SHIFTWATCH_DIFF_STRATEGY", "count_only");
    std::env::set_var("SHIFTWATCH_LOOKUP_ON_FAILURE", "fallback");
    std::env::set_var("SHIFTWATCH_STORAGE_PATH", "/tmp/snap.json");
    std::env::set_var("SHIFTWATCH_SCHEDULING_PASSWORD", "override-pass");

    let temp_file = write_config(MINIMAL);
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.expect("Failed to load config");
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.window.days, 10);
    assert_eq!(config.diff.strategy, DiffStrategy::CountOnly);
    assert_eq!(config.lookup.on_failure, LookupFailurePolicy::Fallback);
    assert_eq!(config.storage.path, "/tmp/snap.json");
    assert_eq!(
        config.scheduling.password.expose_secret().as_ref(),
        "override-pass"
    );
}

#[test]
fn test_invalid_env_override() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("SHIFTWATCH_WINDOW_DAYS", "five");
    let temp_file = write_config(MINIMAL);
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    assert!(result.is_err());
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    // Window too long
    let temp_file = write_config(&format!("{MINIMAL}\n[window]\ndays = 60\n"));
    assert!(load_config(temp_file.path()).is_err());

    // Mail enabled without a host
    let temp_file = write_config(
        r#"
[scheduling]
base_url = "https://acme.example.com"
employee_id = "1234"
username = "nurse"
password = "pass"

[mail]
sender = "watch@example.com"
recipient = "5550100@sms.example.com"
password = "mail-pass"
"#,
    );
    assert!(load_config(temp_file.path()).is_err());

    // Production with TLS verification disabled
    let temp_file = write_config(
        r#"
environment = "production"

[scheduling]
base_url = "https://acme.example.com"
employee_id = "1234"
username = "nurse"
password = "pass"
tls_verify = false

[mail]
enabled = false
"#,
    );
    assert!(load_config(temp_file.path()).is_err());
}

#[test]
fn test_missing_required_section() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[mail]\nenabled = false\n");
    assert!(load_config(temp_file.path()).is_err());
}
