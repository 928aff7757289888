//! Configuration loading tests against the checked-in defaults.

use bizhub_core::config::AppConfig;

#[test]
fn test_default_config_loads() {
    let config = AppConfig::load("development").expect("default config should load");

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.auth.password_min_length, 8);
    assert_eq!(config.worker.max_attempts, 3);
    assert_eq!(config.notification.email_provider, "log");
    assert!(config.upload.max_size_bytes > 0);
}

#[test]
fn test_unknown_env_falls_back_to_defaults() {
    // No config/nonexistent.toml exists; the overlay is optional.
    let config = AppConfig::load("nonexistent").expect("missing overlay should not fail");
    assert_eq!(config.logging.level, "info");
}
