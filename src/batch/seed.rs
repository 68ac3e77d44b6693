use chrono::NaiveDate;

use super::types::{Batch, BatchId, DateCaption, Metrics, Progress, Stage};

/// The mock batches a session starts with, newest first.
pub fn seed_batches() -> Vec<Batch> {
    vec![
        seed(
            "204",
            204,
            DateCaption::Started,
            (2023, 10, 12),
            Stage::Fermenting,
            Metrics::in_progress("Progress", "Day 3 of 6", percent(50)).with_sub_label("45°C Temp"),
        ),
        seed(
            "203",
            203,
            DateCaption::Started,
            (2023, 10, 8),
            Stage::Drying,
            Metrics::in_progress("Moisture", "12%", percent(60))
                .with_target("Target: 7%")
                .with_sub_label("Humidity Control"),
        ),
        seed(
            "202",
            202,
            DateCaption::Started,
            (2023, 10, 1),
            Stage::Sorting,
            Metrics::in_progress("Quality Check", "Pending", percent(85)).with_sub_label("Est. 52 kg"),
        ),
        seed(
            "201",
            201,
            DateCaption::Completed,
            (2023, 10, 14),
            Stage::Ready,
            Metrics::total_weight("50 kg"),
        ),
    ]
}

fn percent(value: u8) -> Progress {
    Progress::new(value).unwrap_or(Progress::ZERO)
}

fn seed(
    id: &str,
    sequence: u64,
    caption: DateCaption,
    (y, m, d): (i32, u32, u32),
    stage: Stage,
    metrics: Metrics,
) -> Batch {
    let date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    match Batch::new(BatchId::new(id), sequence, caption, date, stage, metrics) {
        Ok(batch) => batch,
        Err(e) => unreachable!("seed batch {} is malformed: {}", id, e),
    }
}
