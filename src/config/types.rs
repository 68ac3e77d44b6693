use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub farmer: FarmerConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub batches: BatchesConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerConfig {
    #[serde(default = "default_farmer_name")]
    pub name: String,
}

impl Default for FarmerConfig {
    fn default() -> Self {
        Self {
            name: default_farmer_name(),
        }
    }
}

fn default_farmer_name() -> String {
    "Kwame".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Redraw interval; drives the pod animation.
    #[serde(default = "default_tick", with = "humantime_serde")]
    pub tick: Duration,
    /// Tab selected on startup: `all` or a stage name.
    #[serde(default = "default_tab")]
    pub default_tab: String,
    #[serde(default)]
    pub start_in_pod_view: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick: default_tick(),
            default_tab: default_tab(),
            start_in_pod_view: false,
        }
    }
}

fn default_tick() -> Duration {
    Duration::from_millis(100)
}

fn default_tab() -> String {
    "all".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchesConfig {
    /// Length of the fermentation stage, shown as "Day 1 of N".
    #[serde(default = "default_fermentation_days")]
    pub fermentation_days: u32,
    /// Start the session with the demo batches.
    #[serde(default = "default_true")]
    pub seed_mock_data: bool,
}

impl Default for BatchesConfig {
    fn default() -> Self {
        Self {
            fermentation_days: default_fermentation_days(),
            seed_mock_data: true,
        }
    }
}

fn default_fermentation_days() -> u32 {
    crate::batch::factory::DEFAULT_FERMENTATION_DAYS
}

fn default_true() -> bool {
    true
}

/// Display strings for the statistics cards. These are not computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_avg_quality")]
    pub avg_quality: String,
    #[serde(default = "default_quality_trend")]
    pub quality_trend: Option<String>,
    #[serde(default = "default_total_income")]
    pub total_income: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            avg_quality: default_avg_quality(),
            quality_trend: default_quality_trend(),
            total_income: default_total_income(),
        }
    }
}

fn default_avg_quality() -> String {
    "94%".to_string()
}

fn default_quality_trend() -> Option<String> {
    Some("+2.4%".to_string())
}

fn default_total_income() -> String {
    "₵15,400".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Log file for the dashboard. Without one the dashboard is silent.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            file: None,
        }
    }
}

fn default_log_filter() -> String {
    "invisi=info".to_string()
}
