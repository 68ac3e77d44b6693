//! Decorative fermentation-pod visualization.
//!
//! Everything here reads a [`PodSnapshot`] of a batch; nothing writes back
//! into the batch collection.

pub mod beans;
pub mod scene;

use crate::batch::{resolve, Batch, Progress, Stage};

pub use beans::{place_beans, seeded_random, Bean};
pub use scene::PodScene;

pub const POD_WIDTH: f64 = 3.0;
pub const POD_HEIGHT: f64 = 4.0;
pub const POD_DEPTH: f64 = 3.0;
pub const BEAN_COUNT: usize = 1500;

/// Static sensor readings shown beside the pod.
pub const LIVE_METRICS: [(&str, &str); 4] = [
    ("Temperature", "45.2°C"),
    ("Humidity", "65%"),
    ("pH Level", "5.8"),
    ("CO2", "420 ppm"),
];

/// Read-only projection of the batch the pod displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PodSnapshot {
    pub stage: Stage,
    pub progress: Progress,
}

impl PodSnapshot {
    /// A finished batch shows a full pod.
    pub fn of(batch: &Batch) -> Self {
        Self {
            stage: batch.stage(),
            progress: batch.metrics().progress().unwrap_or(Progress::COMPLETE),
        }
    }

    pub fn accent_rgb(&self) -> (u8, u8, u8) {
        resolve(self.stage).emphasis.accent_rgb()
    }

    /// Height of the bean pile inside the pod.
    pub fn fill_height(&self) -> f64 {
        ((POD_HEIGHT - 0.2) * self.progress.ratio()).max(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::seed::seed_batches;

    #[test]
    fn test_ready_batch_projects_full() {
        let batches = seed_batches();
        let ready = batches.iter().find(|b| b.stage() == Stage::Ready).unwrap();
        let snapshot = PodSnapshot::of(ready);
        assert_eq!(snapshot.progress, Progress::COMPLETE);
        assert!((snapshot.fill_height() - 3.8).abs() < 1e-9);
    }

    #[test]
    fn test_empty_pod_keeps_minimum_fill() {
        let snapshot = PodSnapshot {
            stage: Stage::Fermenting,
            progress: Progress::ZERO,
        };
        assert_eq!(snapshot.fill_height(), 0.1);
    }

    #[test]
    fn test_accent_follows_stage() {
        let snapshot = PodSnapshot {
            stage: Stage::Drying,
            progress: Progress::ZERO,
        };
        assert_eq!(snapshot.accent_rgb(), (0x60, 0xa5, 0xfa));
    }
}
