use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::factory::BatchFactory;
use super::filter::{self, StageFilter};
use super::form::NewBatchForm;
use super::seed::seed_batches;
use super::types::{Batch, BatchId, Stage};
use super::BatchError;

/// Session-scoped owner of the active batches.
///
/// Batches are kept newest first. Display sequence numbers come from a
/// counter that only moves forward, so a label is never handed out twice.
#[derive(Debug, Clone)]
pub struct BatchCollection {
    batches: Vec<Batch>,
    next_sequence: u64,
}

impl Default for BatchCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchCollection {
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Collection holding the four mock batches.
    pub fn seeded() -> Self {
        let mut collection = Self::new();
        // Seeds are newest first; insert oldest first so prepending keeps order.
        for batch in seed_batches().into_iter().rev() {
            if let Err(e) = collection.insert(batch) {
                warn!(error = %e, "Skipping seed batch");
            }
        }
        collection
    }

    /// Sequence number the next created batch will get.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    pub fn contains(&self, id: &BatchId) -> bool {
        self.batches.iter().any(|b| b.id() == id)
    }

    /// Prepends a batch so the newest sorts first.
    pub fn insert(&mut self, batch: Batch) -> Result<(), BatchError> {
        if self.contains(batch.id()) {
            return Err(BatchError::DuplicateId(batch.id().clone()));
        }

        self.next_sequence = self.next_sequence.max(batch.sequence() + 1);
        debug!(id = %batch.id(), label = batch.label(), stage = %batch.stage(), "Inserted batch");
        self.batches.insert(0, batch);
        Ok(())
    }

    /// Validates the form, builds the batch and prepends it.
    ///
    /// On any error the collection is left untouched.
    pub fn submit(
        &mut self,
        factory: &BatchFactory,
        form: &NewBatchForm,
    ) -> Result<&Batch, BatchError> {
        let valid = form.validate().map_err(|e| {
            warn!(errors = %e, "Rejected new batch form");
            BatchError::Validation(e)
        })?;

        let batch = factory.create(&valid, self);
        info!(
            id = %batch.id(),
            label = batch.label(),
            variety = %valid.variety(),
            weight_kg = valid.weight_kg(),
            "Created batch"
        );
        self.insert(batch)?;

        Ok(&self.batches[0])
    }

    pub fn get(&self, id: &BatchId) -> Result<&Batch, BatchError> {
        self.batches
            .iter()
            .find(|b| b.id() == id)
            .ok_or_else(|| BatchError::NotFound(id.clone()))
    }

    pub fn filtered(&self, stage_filter: StageFilter) -> Vec<&Batch> {
        filter::filter(&self.batches, stage_filter)
    }

    pub fn as_slice(&self) -> &[Batch] {
        &self.batches
    }

    pub fn iter(&self) -> impl Iterator<Item = &Batch> {
        self.batches.iter()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn counts_by_stage(&self) -> HashMap<Stage, usize> {
        let mut counts = HashMap::new();
        for batch in &self.batches {
            *counts.entry(batch.stage()).or_insert(0) += 1;
        }
        counts
    }
}
