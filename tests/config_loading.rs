use indoc::indoc;
use pretty_assertions::assert_eq;
use sepsis_threshold::config::{
    build_request, load_config, load_config_from_path, loader::discover_config, CONFIG_FILE_NAME,
};
use sepsis_threshold::errors::{ConfigError, ErrorCode};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        indoc! {r#"
            [clinical]
            bed_count = 24
            available_staff_hours = 6.0

            [evaluation]
            prevalence = 0.15
        "#},
    );

    let config = load_config_from_path(&path).unwrap();
    let request = build_request(&config).unwrap();

    assert_eq!(request.setting.bed_count(), 24);
    assert_eq!(request.setting.available_staff_hours(), 6.0);
    assert_eq!(request.setting.minutes_per_alert(), 10.0);
    assert_eq!(request.prevalence, 0.15);
    assert_eq!(request.threshold, 0.5);
    assert_eq!(request.grid_size, 99);
    assert!(request.parallel.enabled);
}

#[test]
fn every_invalid_value_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        indoc! {r#"
            [clinical]
            bed_count = 0
            minutes_per_alert = -5.0

            [curve]
            alert_rate_exponent = 0.0

            [evaluation]
            prevalence = 1.0
            grid_size = 0
        "#},
    );

    let config = load_config_from_path(&path).unwrap();
    match build_request(&config) {
        Err(ConfigError::Invalid { problems }) => {
            assert_eq!(problems.len(), 5);
            assert!(problems.iter().any(|p| p.contains("bed_count")));
            assert!(problems.iter().any(|p| p.contains("minutes_per_alert")));
            assert!(problems.iter().any(|p| p.contains("alert_rate_exponent")));
            assert!(problems.iter().any(|p| p.contains("prevalence")));
            assert!(problems.iter().any(|p| p.contains("grid_size")));
        }
        other => panic!("expected invalid config, got {other:?}"),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[clinical\nbed_count = ");

    let err = load_config_from_path(&path).unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_PARSE);
}

#[test]
fn explicit_missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = load_config(Some(&missing)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::CONFIG_READ);
}

#[test]
fn config_is_discovered_from_a_subdirectory() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        indoc! {r#"
            [evaluation]
            threshold = 0.3
        "#},
    );
    let nested = dir.path().join("ward").join("icu");
    fs::create_dir_all(&nested).unwrap();

    let (path, config) = discover_config(nested).unwrap();
    assert_eq!(path, dir.path().join(CONFIG_FILE_NAME));
    assert_eq!(config.evaluation().threshold, 0.3);
}

#[test]
fn parallel_section_is_honored() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        indoc! {r#"
            [parallel]
            enabled = false
        "#},
    );

    let request = build_request(&load_config_from_path(&path).unwrap()).unwrap();
    assert!(!request.parallel.enabled);
    assert_eq!(request.parallel.min_grid_size, 1024);
}
