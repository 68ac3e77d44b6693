pub fn generate_starter_config() -> String {
    r#"# =============================================================================
# INVISI CONFIGURATION
# =============================================================================
# Settings for the batch tracking dashboard. Every key is optional; anything
# left out falls back to the value shown here.
#
# Config file locations (in order of precedence):
#   1. Path specified via --config argument
#   2. ~/.config/invisi/config.yml
#   3. /etc/invisi/config.yml
#
# Values may reference environment variables with the $env{...} syntax.

# =============================================================================
# FARMER
# =============================================================================

farmer:
  # Shown in the greeting header ("Hello, Kwame")
  name: Kwame

# =============================================================================
# DASHBOARD
# =============================================================================

dashboard:
  # Redraw interval; also drives the pod animation
  tick: 100ms
  # Tab selected on startup: all, fermenting, drying, sorting or ready
  default_tab: all
  # Open on the pod view instead of the card grid
  start_in_pod_view: false

# =============================================================================
# BATCHES
# =============================================================================

batches:
  # Length of the fermentation stage, shown on new batches as "Day 1 of N"
  fermentation_days: 6
  # Start each session with the demo batches (#201 - #204)
  seed_mock_data: true

# =============================================================================
# SUMMARY CARDS
# =============================================================================
# Display strings only; these are not computed from batch data.

summary:
  avg_quality: "94%"
  # Leading '-' renders a downward trend
  quality_trend: "+2.4%"
  total_income: "₵15,400"

# =============================================================================
# LOGGING
# =============================================================================

logging:
  # tracing filter directive; RUST_LOG takes precedence
  filter: invisi=info
  # The dashboard only logs when a file is configured
  # file: ~/.local/state/invisi/invisi.log
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse::parse_config;

    #[test]
    fn test_starter_config_parses() {
        let config = parse_config(&generate_starter_config()).unwrap();
        assert_eq!(config.farmer.name, "Kwame");
        assert_eq!(config.batches.fermentation_days, 6);
        assert!(config.batches.seed_mock_data);
        assert!(config.logging.file.is_none());
    }
}
