use super::collection::BatchCollection;
use super::form::ValidBatchForm;
use super::types::{Batch, BatchId, DateCaption, Intake, Metrics, Progress, Stage};

pub const DEFAULT_FERMENTATION_DAYS: u32 = 6;

/// Builds new batches from validated form input.
#[derive(Debug, Clone)]
pub struct BatchFactory {
    fermentation_days: u32,
}

impl Default for BatchFactory {
    fn default() -> Self {
        Self::new(DEFAULT_FERMENTATION_DAYS)
    }
}

impl BatchFactory {
    pub fn new(fermentation_days: u32) -> Self {
        Self {
            fermentation_days: fermentation_days.max(1),
        }
    }

    pub fn fermentation_days(&self) -> u32 {
        self.fermentation_days
    }

    /// New batch in the first stage with zero progress.
    ///
    /// The caller is responsible for prepending it to `existing`.
    pub fn create(&self, form: &ValidBatchForm, existing: &BatchCollection) -> Batch {
        let mut id = BatchId::generate();
        while existing.contains(&id) {
            id = BatchId::generate();
        }

        let metrics = Metrics::in_progress(
            "Progress",
            &format!("Day 1 of {}", self.fermentation_days),
            Progress::ZERO,
        )
        .with_sub_label("Ambient Temp");

        let intake = Intake {
            weight_kg: form.weight_kg(),
            variety: form.variety(),
            notes: form.notes().map(str::to_string),
        };

        initial_batch(id, existing.next_sequence(), form, metrics).with_intake(intake)
    }
}

fn initial_batch(id: BatchId, sequence: u64, form: &ValidBatchForm, metrics: Metrics) -> Batch {
    match Batch::new(
        id,
        sequence,
        DateCaption::Started,
        form.start_date(),
        Stage::Fermenting,
        metrics,
    ) {
        Ok(batch) => batch,
        // Fermenting is never terminal and the metrics above always carry progress.
        Err(e) => unreachable!("initial batch rejected: {}", e),
    }
}
