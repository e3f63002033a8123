use crate::burst::BurstConfig;
use crate::firework::{Firework, FireworkState};
use crate::particle::{Particle, Physics};
use crate::text::{TextFirework, TextState};

/// Anything the simulation keeps alive: a launched firework or a text burst.
/// Both own their debris outright.
#[derive(Debug, Clone)]
pub enum Shell {
    Rocket(Firework),
    Text(TextFirework),
}

impl Shell {
    pub fn advance(&mut self, rng: &mut fastrand::Rng, burst: &BurstConfig, physics: &Physics) {
        match self {
            Shell::Rocket(firework) => firework.advance(rng, burst, physics),
            Shell::Text(text) => text.advance(physics),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        match self {
            Shell::Rocket(firework) => firework.particles(),
            Shell::Text(text) => text.particles(),
        }
    }

    pub fn is_exploded(&self) -> bool {
        match self {
            Shell::Rocket(firework) => firework.state() == FireworkState::Exploded,
            Shell::Text(text) => text.state() == TextState::Exploded,
        }
    }

    pub fn is_spent(&self) -> bool {
        match self {
            Shell::Rocket(firework) => firework.is_spent(),
            Shell::Text(text) => text.is_spent(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Shell::Text(_))
    }
}

impl From<Firework> for Shell {
    fn from(firework: Firework) -> Self {
        Shell::Rocket(firework)
    }
}

impl From<TextFirework> for Shell {
    fn from(text: TextFirework) -> Self {
        Shell::Text(text)
    }
}
