use crate::burst::{self, BurstConfig};
use crate::color::{ColorScheme, Rgb};
use crate::particle::{Particle, Physics};
use glam::DVec2;

/// Detonation is considered once the shell gets this close to its target.
const TRIGGER_DISTANCE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireworkState {
    Ascending,
    Exploded,
}

/// Launch parameters of a shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub position: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2,
    /// Only decides *when* to burst; the shell is not steered towards it.
    pub target: DVec2,
    pub countdown: i32,
}

impl Launch {
    /// Somewhere along the bottom edge, heading up with a slight drift.
    pub fn random(rng: &mut fastrand::Rng, width: f64, height: f64) -> Self {
        Self {
            position: DVec2::new(rng.f64() * width, height),
            velocity: DVec2::new(rng.f64() * 2.0 - 1.0, -rng.f64() * 5.0 - 6.0),
            acceleration: DVec2::new((rng.f64() - 0.5) * 0.025, rng.f64() * 0.02 + 0.04),
            target: DVec2::new(rng.f64() * width, rng.f64() * height * 0.667),
            countdown: rng.i32(10..40),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Firework {
    position: DVec2,
    velocity: DVec2,
    acceleration: DVec2,
    target: DVec2,
    countdown: i32,
    scheme: ColorScheme,
    state: FireworkState,
    particles: Vec<Particle>,
}

impl Firework {
    pub fn new(launch: Launch, scheme: ColorScheme) -> Self {
        Self {
            position: launch.position,
            velocity: launch.velocity,
            acceleration: launch.acceleration,
            target: launch.target,
            countdown: launch.countdown,
            scheme,
            state: FireworkState::Ascending,
            particles: Vec::new(),
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn countdown(&self) -> i32 {
        self.countdown
    }

    pub fn state(&self) -> FireworkState {
        self.state
    }

    pub fn main_color(&self) -> Rgb {
        self.scheme.main_color()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Close to the target, above it, or already falling.
    pub fn trigger_holds(&self) -> bool {
        self.position.distance(self.target) < TRIGGER_DISTANCE
            || self.position.y <= self.target.y
            || self.velocity.y > 0.0
    }

    pub fn advance(&mut self, rng: &mut fastrand::Rng, burst: &BurstConfig, physics: &Physics) {
        match self.state {
            FireworkState::Ascending => {
                self.velocity += self.acceleration;
                self.position += self.velocity;

                if self.trigger_holds() {
                    if self.countdown <= 0 {
                        self.detonate(rng, burst);
                    } else {
                        self.countdown -= 1;
                    }
                }
            }
            FireworkState::Exploded => {
                self.particles.retain_mut(|particle| {
                    particle.step(physics);
                    particle.is_alive()
                });
            }
        }
    }

    /// Bursts in place. Returns the number of particles created; a second call
    /// on an exploded shell does nothing.
    pub fn detonate(&mut self, rng: &mut fastrand::Rng, burst: &BurstConfig) -> usize {
        if self.state == FireworkState::Exploded {
            return 0;
        }
        self.state = FireworkState::Exploded;

        let count = burst.sample_count(rng);
        self.particles = burst::generate(
            rng,
            self.position,
            &self.scheme,
            count,
            burst.explosion_size,
        );
        log::debug!(
            "firework burst at ({:.1}, {:.1}) into {} particles",
            self.position.x,
            self.position.y,
            count
        );
        count
    }

    pub fn is_spent(&self) -> bool {
        self.state == FireworkState::Exploded && self.particles.is_empty()
    }
}
