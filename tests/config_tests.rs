use invisi::config::{generate_starter_config, load_config, load_or_default, resolve_config_path, ConfigError};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_generated_config_is_valid() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yml");

    fs::write(&config_path, generate_starter_config()).unwrap();

    let config = load_config(&config_path).expect("Generated config should be valid");

    assert_eq!(config.farmer.name, "Kwame");
    assert_eq!(config.dashboard.tick, Duration::from_millis(100));
    assert_eq!(config.dashboard.default_tab, "all");
    assert!(!config.dashboard.start_in_pod_view);
    assert_eq!(config.batches.fermentation_days, 6);
    assert_eq!(config.summary.total_income, "₵15,400");
    assert_eq!(config.summary.quality_trend.as_deref(), Some("+2.4%"));
    assert_eq!(config.logging.filter, "invisi=info");
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_config(&temp_dir.path().join("absent.yml")).unwrap_err();

    assert!(matches!(err, ConfigError::Io(_)));
    assert!(err.to_string().contains("absent.yml"));
}

#[test]
fn test_malformed_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yml");
    fs::write(&config_path, "farmer: [unclosed\n").unwrap();

    let err = load_config(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::YamlParse(_)));
}

#[test]
fn test_unknown_key_type_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yml");
    fs::write(&config_path, "batches:\n  fermentation_days: six\n").unwrap();

    assert!(load_config(&config_path).is_err());
}

#[test]
fn test_every_invalid_value_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yml");

    let config_yaml = r#"
farmer:
  name: "  "
dashboard:
  tick: 1ms
  default_tab: roasting
batches:
  fermentation_days: 0
summary:
  avg_quality: ""
  total_income: ""
logging:
  filter: ""
"#;
    fs::write(&config_path, config_yaml).unwrap();

    match load_config(&config_path).unwrap_err() {
        ConfigError::ValidationList(errors) => {
            assert_eq!(errors.len(), 7, "errors: {:?}", errors);
            assert!(errors.iter().any(|e| e.contains("dashboard.tick")));
            assert!(errors.iter().any(|e| e.contains("roasting")));
        }
        other => panic!("expected a validation list, got: {}", other),
    }
}

#[test]
fn test_env_var_expansion() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yml");
    std::env::set_var("INVISI_TEST_FARMER", "Abena");
    fs::write(&config_path, "farmer:\n  name: $env{INVISI_TEST_FARMER}\n").unwrap();

    let config = load_config(&config_path).unwrap();
    assert_eq!(config.farmer.name, "Abena");
}

#[test]
fn test_tilde_in_log_file_is_expanded() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yml");
    fs::write(&config_path, "logging:\n  file: ~/invisi.log\n").unwrap();

    let config = load_config(&config_path).unwrap();
    let file = config.logging.file.unwrap();
    if let Some(home) = dirs::home_dir() {
        assert_eq!(file, home.join("invisi.log"));
    }
}

#[test]
fn test_no_config_falls_back_to_defaults() {
    let config = load_or_default(None).unwrap();
    assert_eq!(config.farmer.name, "Kwame");
    assert!(config.batches.seed_mock_data);
}

#[test]
fn test_explicit_path_wins() {
    let explicit = PathBuf::from("/nonexistent/invisi.yml");
    assert_eq!(resolve_config_path(Some(&explicit)), Some(explicit));
}
