use std::time::Duration;

use super::beans::{place_beans, Bean};
use super::{PodSnapshot, BEAN_COUNT, POD_DEPTH, POD_HEIGHT, POD_WIDTH};

/// Animated pod state for one snapshot.
///
/// Beans are placed once per snapshot; ticks only move the clock.
#[derive(Debug, Clone)]
pub struct PodScene {
    snapshot: PodSnapshot,
    beans: Vec<Bean>,
    elapsed: Duration,
}

impl PodScene {
    pub fn new(snapshot: PodSnapshot) -> Self {
        Self {
            beans: place_beans(BEAN_COUNT, POD_WIDTH, POD_DEPTH, snapshot.fill_height()),
            snapshot,
            elapsed: Duration::ZERO,
        }
    }

    /// Swaps the displayed batch, re-placing beans only if the snapshot changed.
    pub fn show(&mut self, snapshot: PodSnapshot) {
        if snapshot != self.snapshot {
            let elapsed = self.elapsed;
            *self = Self::new(snapshot);
            self.elapsed = elapsed;
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.elapsed += dt;
    }

    pub fn snapshot(&self) -> PodSnapshot {
        self.snapshot
    }

    pub fn beans(&self) -> &[Bean] {
        &self.beans
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Vertical position of the scanning laser, centred on the pod.
    pub fn laser_y(&self) -> f64 {
        let t = self.elapsed.as_secs_f64();
        ((t * 0.5).sin() + 1.0) / 2.0 * POD_HEIGHT - POD_HEIGHT / 2.0
    }

    /// Slow side-to-side sway, in radians.
    pub fn sway(&self) -> f64 {
        (self.elapsed.as_secs_f64() / 8.0).sin() * 0.05
    }

    /// Gentle vertical bob.
    pub fn bob(&self) -> f64 {
        (self.elapsed.as_secs_f64() / 3.0).sin() * 0.03
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{Progress, Stage};

    fn snapshot(progress: u8) -> PodSnapshot {
        PodSnapshot {
            stage: Stage::Fermenting,
            progress: Progress::new(progress).unwrap(),
        }
    }

    #[test]
    fn test_laser_starts_at_middle() {
        let scene = PodScene::new(snapshot(50));
        assert!(scene.laser_y().abs() < 1e-9);
    }

    #[test]
    fn test_laser_stays_inside_pod() {
        let mut scene = PodScene::new(snapshot(50));
        for _ in 0..200 {
            scene.tick(Duration::from_millis(97));
            let y = scene.laser_y();
            assert!((-POD_HEIGHT / 2.0..=POD_HEIGHT / 2.0).contains(&y));
        }
    }

    #[test]
    fn test_tick_does_not_move_beans() {
        let mut scene = PodScene::new(snapshot(80));
        let before = scene.beans().to_vec();
        scene.tick(Duration::from_secs(5));
        assert_eq!(scene.beans(), before.as_slice());
    }

    #[test]
    fn test_empty_pod_has_no_beans() {
        let scene = PodScene::new(snapshot(0));
        assert!(scene.beans().is_empty());
    }

    #[test]
    fn test_show_keeps_clock() {
        let mut scene = PodScene::new(snapshot(10));
        scene.tick(Duration::from_secs(2));
        scene.show(snapshot(90));
        assert_eq!(scene.elapsed(), Duration::from_secs(2));
        assert_eq!(scene.snapshot().progress.percent(), 90);
        assert_eq!(scene.beans().len(), crate::pod::BEAN_COUNT);
    }
}
