use chrono::Local;
use tracing::info;

use super::dashboard::{self, App};
use crate::batch::BatchCollection;
use crate::config::Config;

/// Builds a session from `config` and runs the dashboard until the user quits.
pub fn run(mut config: Config, pod: bool) -> Result<(), Box<dyn std::error::Error>> {
    if pod {
        config.dashboard.start_in_pod_view = true;
    }

    let collection = if config.batches.seed_mock_data {
        BatchCollection::seeded()
    } else {
        BatchCollection::new()
    };
    info!(
        batches = collection.len(),
        tick = ?config.dashboard.tick,
        "Starting dashboard session"
    );

    let now = Local::now();
    let mut app = App::new(collection, &config, now.date_naive(), now.time());
    dashboard::run(&mut app, config.dashboard.tick)?;
    Ok(())
}
