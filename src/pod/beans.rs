use std::f64::consts::PI;

/// Deterministic noise in `0.0..1.0`.
pub fn seeded_random(seed: f64) -> f64 {
    let x = seed.sin() * 10000.0;
    x - x.floor()
}

/// One bean inside the pod, in pod-local coordinates centred on the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bean {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rotation: (f64, f64, f64),
    pub scale: f64,
    /// Hot beans are drawn in the stage accent instead of cocoa brown.
    pub hot: bool,
}

const HOT_THRESHOLD: f64 = 0.6;

/// Scatters `count` beans through a `width × height × depth` volume.
///
/// Placement depends only on the arguments. Nothing is placed when the pile
/// is too shallow to show.
pub fn place_beans(count: usize, width: f64, depth: f64, height: f64) -> Vec<Bean> {
    if height <= 0.1 {
        return Vec::new();
    }

    (0..count)
        .map(|i| {
            let i = i as f64;
            let r1 = seeded_random(i * 3.0 + 1.0);
            let r2 = seeded_random(i * 3.0 + 2.0);
            let r3 = seeded_random(i * 3.0 + 3.0);
            let r4 = seeded_random(i * 3.0 + 4.0);

            let x = (r1 - 0.5) * (width - 0.2);
            let z = (r2 - 0.5) * (depth - 0.2);
            let y = r3 * height;

            let dist_from_center = (x * x + z * z).sqrt();
            let noise = seeded_random(i * 10.0);
            let heat = (1.0 - dist_from_center / 1.8) * 0.5 + noise * 0.5;

            Bean {
                x,
                y,
                z,
                rotation: (r4 * PI, r1 * PI, r2 * PI),
                scale: 0.7 + r3 * 0.5,
                hot: heat > HOT_THRESHOLD,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_random_in_unit_range() {
        for seed in 0..500 {
            let r = seeded_random(seed as f64);
            assert!((0.0..1.0).contains(&r), "seed {} gave {}", seed, r);
        }
    }

    #[test]
    fn test_placement_is_deterministic() {
        let a = place_beans(200, 3.0, 3.0, 2.0);
        let b = place_beans(200, 3.0, 3.0, 2.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_beans_stay_inside_volume() {
        for bean in place_beans(500, 3.0, 3.0, 2.0) {
            assert!(bean.x.abs() <= 1.4);
            assert!(bean.z.abs() <= 1.4);
            assert!((0.0..=2.0).contains(&bean.y));
            assert!((0.7..=1.2).contains(&bean.scale));
        }
    }

    #[test]
    fn test_shallow_pile_is_empty() {
        assert!(place_beans(100, 3.0, 3.0, 0.1).is_empty());
    }

    #[test]
    fn test_some_beans_are_hot_and_some_are_not() {
        let beans = place_beans(1500, 3.0, 3.0, 3.8);
        let hot = beans.iter().filter(|b| b.hot).count();
        assert!(hot > 0);
        assert!(hot < beans.len());
    }
}
