use crate::color::{Rgb, Rgba};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Ticks a freshly burst particle lives for.
pub const PARTICLE_LIFE: i32 = 100;

// Radius never reaches zero; liveness is decided by `life` alone
const MIN_RADIUS: f64 = 1e-3;

/// Forces applied to debris every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physics {
    pub gravity: f64,
    pub damping: f64,
    pub radius_decay: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: 0.05,
            damping: 0.99,
            radius_decay: 0.99,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    radius: f64,
    life: i32,
    initial_life: i32,
    start_color: Rgb,
    end_color: Rgb,
}

impl Particle {
    pub fn new(
        position: DVec2,
        velocity: DVec2,
        radius: f64,
        start_color: Rgb,
        end_color: Rgb,
    ) -> Self {
        Self {
            position,
            velocity,
            radius: radius.max(MIN_RADIUS),
            life: PARTICLE_LIFE,
            initial_life: PARTICLE_LIFE,
            start_color,
            end_color,
        }
    }

    /// Semi-implicit Euler step: gravity, then damping, then position.
    pub fn step(&mut self, physics: &Physics) {
        self.velocity.y += physics.gravity;
        self.velocity *= physics.damping;
        self.position += self.velocity;
        self.radius = (self.radius * physics.radius_decay).max(MIN_RADIUS);
        self.life = (self.life - 1).max(0);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn life(&self) -> i32 {
        self.life
    }

    pub fn initial_life(&self) -> i32 {
        self.initial_life
    }

    pub fn start_color(&self) -> Rgb {
        self.start_color
    }

    pub fn end_color(&self) -> Rgb {
        self.end_color
    }

    /// Normalised age: 0 at birth, 1 at death.
    pub fn age(&self) -> f64 {
        1.0 - self.life as f64 / self.initial_life as f64
    }

    /// Blend from start to end colour while fading out.
    pub fn color_at(&self) -> Rgba {
        let t = self.age();
        Rgba::new(self.start_color.lerp(self.end_color, t), 1.0 - t)
    }
}
