pub mod generate;
pub mod parse;
pub mod types;

use regex::Regex;
use std::path::{Path, PathBuf};

pub use generate::generate_starter_config;
pub use parse::{load_config, load_or_default, parse_config, ConfigError};
pub use types::{BatchesConfig, Config, DashboardConfig, FarmerConfig, LoggingConfig, SummaryConfig};

const ENV_VAR_PATTERN: &str = r"\$env\{([A-Za-z_][A-Za-z0-9_]*)\}";

/// Expands environment variables in a string.
/// Supports $env{VAR_NAME} syntax.
/// If an environment variable is not set, it's left unchanged.
pub fn expand_env_vars(text: &str) -> String {
    let re = Regex::new(ENV_VAR_PATTERN).unwrap();

    re.replace_all(text, |caps: &regex::Captures| {
        let var_name = caps.get(1).unwrap().as_str();
        std::env::var(var_name).unwrap_or_else(|_| caps.get(0).unwrap().as_str().to_string())
    })
    .to_string()
}

/// Names of `$env{...}` references still present after expansion, sorted and
/// deduplicated.
pub fn unexpanded_env_vars(text: &str) -> Vec<String> {
    let re = Regex::new(ENV_VAR_PATTERN).unwrap();
    let mut names: Vec<String> = re
        .captures_iter(text)
        .map(|cap| cap.get(1).unwrap().as_str().to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Expands tilde (~) in paths to the user's home directory.
/// Returns the path unchanged if it doesn't start with tilde or home directory cannot be determined.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();

    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest);
        }
    } else if path_str == "~" {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir;
        }
    }

    path.to_path_buf()
}

/// Resolves the config file path based on explicit argument or default locations.
/// Returns the first existing path from:
/// 1. Explicit path (if provided, with tilde expansion)
/// 2. ~/.config/invisi/config.yml
/// 3. /etc/invisi/config.yml
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(expand_tilde(path));
    }

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            return Some(user_config);
        }
    }

    let system_config = system_config_path();
    if system_config.exists() {
        return Some(system_config);
    }

    None
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/invisi/config.yml"))
}

pub fn system_config_path() -> PathBuf {
    PathBuf::from("/etc/invisi/config.yml")
}
