//! Configuration loading: defaults, files and environment overrides

use std::io::Write;
use serial_test::serial;
use SalaryBoard::config::Settings;

fn write_config(contents: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("salaryboard.toml");
    let mut file = std::fs::File::create(&path).expect("config file");
    file.write_all(contents.as_bytes()).expect("write config");
    (dir, path.to_string_lossy().into_owned())
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    let settings = Settings::load_from("/nonexistent/salaryboard").unwrap();

    assert_eq!(settings.api.default_per_page, 20);
    assert_eq!(settings.api.max_per_page, 100);
    assert!(settings.validate().is_ok());
}

#[test]
#[serial]
fn test_file_overrides_defaults() {
    let (_dir, path) = write_config(
        r#"
        [server]
        port = 8081

        [api]
        max_per_page = 50

        [rate_limit]
        enabled = false
        "#,
    );

    let settings = Settings::load_from(&path).unwrap();

    assert_eq!(settings.server.port, 8081);
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.api.max_per_page, 50);
    assert_eq!(settings.api.default_per_page, 20);
    assert!(!settings.rate_limit.enabled);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let (_dir, path) = write_config("[server]\nport = 8081\n");
    std::env::set_var("SALARYBOARD__SERVER__PORT", "9090");
    std::env::set_var("DATABASE_URL", "postgresql://env-host/salaryboard");

    let result = Settings::load_from(&path);

    std::env::remove_var("SALARYBOARD__SERVER__PORT");
    std::env::remove_var("DATABASE_URL");

    let settings = result.unwrap();
    assert_eq!(settings.server.port, 9090);
    assert_eq!(settings.database.url, "postgresql://env-host/salaryboard");
}

#[test]
#[serial]
fn test_invalid_file_values_fail_validation() {
    let (_dir, path) = write_config("[api]\ndefault_per_page = 500\nmax_per_page = 100\n");

    let settings = Settings::load_from(&path).unwrap();

    assert!(settings.validate().is_err());
}

#[test]
#[serial]
fn test_page_size_cap_cannot_be_raised_from_file() {
    let (_dir, path) = write_config("[api]\nmax_per_page = 500\n");

    let settings = Settings::load_from(&path).unwrap();

    assert_eq!(settings.api.max_per_page, 500);
    assert!(settings.validate().is_err());
}
