//! Turns a single point into a cloud of decaying particles.

use crate::color::ColorScheme;
use crate::particle::Particle;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub min_particles: usize,
    /// Exclusive.
    pub max_particles: usize,
    pub explosion_size: f64,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            min_particles: 100,
            max_particles: 200,
            explosion_size: 4.0,
        }
    }
}

impl BurstConfig {
    pub fn count_range(&self) -> Range<usize> {
        self.min_particles..self.max_particles
    }

    pub fn sample_count(&self, rng: &mut fastrand::Rng) -> usize {
        rng.usize(self.count_range())
    }
}

/// Mostly small sparks, some medium, a few large embers.
pub fn sample_radius(rng: &mut fastrand::Rng) -> f64 {
    let tier = rng.f64();
    if tier < 0.6 {
        0.5 + rng.f64() * 1.5
    } else if tier < 0.9 {
        2.0 + rng.f64() * 2.0
    } else {
        4.0 + rng.f64() * 3.0
    }
}

/// Emits `count` particles at `origin`. Each axis of the velocity is drawn
/// independently from `[-explosion_size, explosion_size]`, so the cloud is
/// box-shaped rather than radial.
pub fn generate(
    rng: &mut fastrand::Rng,
    origin: DVec2,
    scheme: &ColorScheme,
    count: usize,
    explosion_size: f64,
) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(count);
    for _ in 0..count {
        let start = scheme.pick(rng);
        let end = scheme.pick(rng);
        let radius = sample_radius(rng);
        let velocity = DVec2::new(
            (rng.f64() * 2.0 - 1.0) * explosion_size,
            (rng.f64() * 2.0 - 1.0) * explosion_size,
        );
        particles.push(Particle::new(origin, velocity, radius, start, end));
    }
    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn scheme() -> ColorScheme {
        ColorScheme::parse(&["#ff0000", "#00ff00", "#0000ff"]).unwrap()
    }

    #[test]
    fn emits_exactly_count_particles_at_origin() {
        let mut rng = fastrand::Rng::with_seed(1);
        let origin = DVec2::new(320.0, 140.0);
        let particles = generate(&mut rng, origin, &scheme(), 137, 4.0);
        assert_eq!(particles.len(), 137);
        assert!(particles.iter().all(|p| p.position == origin));
        assert!(generate(&mut rng, origin, &scheme(), 0, 4.0).is_empty());
    }

    #[test]
    fn velocities_stay_inside_the_box() {
        let mut rng = fastrand::Rng::with_seed(2);
        let particles = generate(&mut rng, DVec2::ZERO, &scheme(), 2_000, 4.0);
        for p in &particles {
            assert!(p.velocity.x.abs() <= 4.0);
            assert!(p.velocity.y.abs() <= 4.0);
        }
        // Both signs show up on both axes
        assert!(particles.iter().any(|p| p.velocity.x < -3.0));
        assert!(particles.iter().any(|p| p.velocity.x > 3.0));
        assert!(particles.iter().any(|p| p.velocity.y < -3.0));
        assert!(particles.iter().any(|p| p.velocity.y > 3.0));
    }

    #[test]
    fn colors_are_resampled_from_the_scheme() {
        let mut rng = fastrand::Rng::with_seed(3);
        let scheme = scheme();
        let particles = generate(&mut rng, DVec2::ZERO, &scheme, 500, 4.0);
        assert!(particles.iter().all(|p| {
            scheme.colors().contains(&p.start_color()) && scheme.colors().contains(&p.end_color())
        }));
        assert!(particles.iter().any(|p| p.start_color() != p.end_color()));
        assert!(
            particles
                .iter()
                .any(|p| p.start_color() == Rgb::new(0, 0, 255))
        );
    }

    #[test]
    fn size_tiers_follow_sixty_thirty_ten() {
        let mut rng = fastrand::Rng::with_seed(42);
        let samples = 10_000;
        let (mut small, mut medium, mut large) = (0, 0, 0);
        for _ in 0..samples {
            let r = sample_radius(&mut rng);
            assert!((0.5..7.0).contains(&r));
            if r < 2.0 {
                small += 1;
            } else if r < 4.0 {
                medium += 1;
            } else {
                large += 1;
            }
        }
        let share = |n: i32| n as f64 / samples as f64;
        assert!((share(small) - 0.6).abs() < 0.03, "small share {}", share(small));
        assert!((share(medium) - 0.3).abs() < 0.03, "medium share {}", share(medium));
        assert!((share(large) - 0.1).abs() < 0.02, "large share {}", share(large));
    }

    #[test]
    fn count_is_drawn_from_half_open_range() {
        let mut rng = fastrand::Rng::with_seed(9);
        let config = BurstConfig::default();
        for _ in 0..1_000 {
            let n = config.sample_count(&mut rng);
            assert!((100..200).contains(&n));
        }
    }
}
