use super::types::*;
use crate::batch::StageFilter;
use crate::config::{expand_env_vars, expand_tilde, unexpanded_env_vars};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation failed:\n{}", .0.join("\n"))]
    ValidationList(Vec<String>),

    #[error("validation failed: {0}")]
    Validation(String),
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let yaml_string = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read config file '{}': {}", path.display(), e),
        ))
    })?;

    let config = parse_config(&yaml_string)?;
    debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Loads `path` when one was resolved, otherwise returns the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Parses and validates a config document.
pub fn parse_config(yaml: &str) -> Result<Config, ConfigError> {
    let yaml = expand_env_vars(yaml);
    check_unexpanded_vars(&yaml)?;

    // An empty document means "all defaults".
    let mut config: Config = if yaml.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(&yaml)?
    };

    if let Some(file) = config.logging.file.as_mut() {
        *file = expand_tilde(file);
    }

    validate_config(&config)?;
    Ok(config)
}

/// Checks for unexpanded environment variables and returns a helpful error
fn check_unexpanded_vars(yaml_string: &str) -> Result<(), ConfigError> {
    let unexpanded = unexpanded_env_vars(yaml_string);
    if unexpanded.is_empty() {
        return Ok(());
    }

    let error_msg = if unexpanded.len() == 1 {
        format!(
            "Environment variable $env{{{0}}} is not set.\n\
             \n\
             To fix this, either:\n\
             1. Set the environment variable: export {0}=...\n\
             2. Replace $env{{{0}}} in the config file with an actual value",
            unexpanded[0]
        )
    } else {
        format!(
            "Environment variables are not set: {}\n\
             \n\
             To fix this, either:\n\
             1. Set the environment variables (e.g., export TMPDIR=/tmp)\n\
             2. Replace the variables in the config file with actual values",
            unexpanded.join(", ")
        )
    };

    Err(ConfigError::Validation(error_msg))
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.farmer.name.trim().is_empty() {
        errors.push("farmer.name cannot be empty".to_string());
    }

    if config.dashboard.tick < Duration::from_millis(10) {
        errors.push(format!(
            "dashboard.tick must be at least 10ms, got {:?}",
            config.dashboard.tick
        ));
    }

    if let Err(e) = config.dashboard.default_tab.parse::<StageFilter>() {
        errors.push(format!("dashboard.default_tab: {}", e));
    }

    if config.batches.fermentation_days == 0 {
        errors.push("batches.fermentation_days must be at least 1".to_string());
    }

    if config.summary.avg_quality.trim().is_empty() {
        errors.push("summary.avg_quality cannot be empty".to_string());
    }

    if config.summary.total_income.trim().is_empty() {
        errors.push("summary.total_income cannot be empty".to_string());
    }

    if config.logging.filter.trim().is_empty() {
        errors.push("logging.filter cannot be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationList(errors))
    }
}

impl Config {
    /// Tab the dashboard opens on. Validated at load time.
    pub fn default_filter(&self) -> StageFilter {
        self.dashboard.default_tab.parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config.farmer.name, "Kwame");
        assert_eq!(config.batches.fermentation_days, 6);
        assert_eq!(config.dashboard.tick, Duration::from_millis(100));
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = parse_config("farmer:\n  name: Ama\n").unwrap();
        assert_eq!(config.farmer.name, "Ama");
        assert_eq!(config.summary.avg_quality, "94%");
    }

    #[test]
    fn test_humantime_tick() {
        let config = parse_config("dashboard:\n  tick: 250ms\n").unwrap();
        assert_eq!(config.dashboard.tick, Duration::from_millis(250));
    }

    #[test]
    fn test_all_problems_reported() {
        let yaml = "farmer:\n  name: ''\ndashboard:\n  default_tab: archived\nbatches:\n  fermentation_days: 0\n";
        let err = parse_config(yaml).unwrap_err();
        match err {
            ConfigError::ValidationList(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[0].contains("farmer.name"));
                assert!(errors[1].contains("archived"));
                assert!(errors[2].contains("fermentation_days"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unset_env_var_is_reported() {
        let err = parse_config("logging:\n  file: $env{INVISI_UNSET_LOG_DIR}/invisi.log\n")
            .unwrap_err();
        assert!(err.to_string().contains("INVISI_UNSET_LOG_DIR"));
    }

    #[test]
    fn test_default_filter() {
        let config = parse_config("dashboard:\n  default_tab: Drying\n").unwrap();
        assert_eq!(
            config.default_filter(),
            StageFilter::Only(crate::batch::Stage::Drying)
        );
    }
}
