//! Fireworks that burst into the shape of a line of text.

use crate::color::ColorScheme;
use crate::particle::{Particle, Physics};
use crate::surface::GlyphOutline;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection sampling gives up on a particle after this many misses.
pub const MAX_SAMPLE_ATTEMPTS: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlyphError {
    #[error("no glyph for character '{0}'")]
    Missing(char),
    #[error("glyph for character '{0}' has no filled area")]
    ZeroArea(char),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub content: String,
    pub particles_per_char: usize,
    pub font_size: f64,
    pub explosion_size: f64,
    /// Ticks between scheduled text bursts; `None` disables scheduling.
    pub interval_ticks: Option<u64>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            content: "新年快乐".to_string(),
            particles_per_char: 200,
            font_size: 120.0,
            explosion_size: 4.0,
            interval_ticks: Some(1_800),
        }
    }
}

/// Checks every visible character up front so a bad string fails before it
/// ever reaches the tick loop.
pub fn validate_text(text: &str, glyphs: &dyn GlyphOutline, font_size: f64) -> Result<(), GlyphError> {
    for ch in text.chars().filter(|c| !c.is_whitespace()) {
        let size = glyphs.bounds(ch, font_size).ok_or(GlyphError::Missing(ch))?;
        if size.x <= 0.0 || size.y <= 0.0 || glyphs.coverage(ch) <= 0.0 {
            return Err(GlyphError::ZeroArea(ch));
        }
    }
    Ok(())
}

/// Draws a point uniformly from the glyph box until one lands inside the
/// outline. Returns the offset from the glyph centre, or `None` after
/// `max_attempts` misses.
pub fn sample_in_glyph(
    rng: &mut fastrand::Rng,
    glyphs: &dyn GlyphOutline,
    ch: char,
    font_size: f64,
    max_attempts: usize,
) -> Option<DVec2> {
    let size = glyphs.bounds(ch, font_size)?;
    for _ in 0..max_attempts {
        let offset = DVec2::new((rng.f64() - 0.5) * size.x, (rng.f64() - 0.5) * size.y);
        if glyphs.contains(ch, font_size, offset) {
            return Some(offset);
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextState {
    Unexploded,
    Exploded,
}

#[derive(Debug, Clone)]
pub struct TextFirework {
    text: String,
    scheme: ColorScheme,
    state: TextState,
    particles: Vec<Particle>,
}

impl TextFirework {
    pub fn new(text: impl Into<String>, scheme: ColorScheme) -> Self {
        Self {
            text: text.into(),
            scheme,
            state: TextState::Unexploded,
            particles: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> TextState {
        self.state
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Lays the characters out evenly across the middle of the surface and
    /// fills each outline with particles flying away from the glyph centre.
    /// Returns the number of particles created.
    pub fn detonate(
        &mut self,
        rng: &mut fastrand::Rng,
        glyphs: &dyn GlyphOutline,
        surface_size: DVec2,
        config: &TextConfig,
    ) -> Result<usize, GlyphError> {
        if self.state == TextState::Exploded {
            return Ok(0);
        }
        validate_text(&self.text, glyphs, config.font_size)?;
        self.state = TextState::Exploded;

        let slots = self.text.chars().count() as f64 + 1.0;
        let mut skipped = 0;
        for (i, ch) in self.text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let anchor = DVec2::new(surface_size.x * (i as f64 + 1.0) / slots, surface_size.y / 2.0);

            for _ in 0..config.particles_per_char {
                let start = self.scheme.pick(rng);
                let end = self.scheme.pick(rng);
                let Some(offset) = sample_in_glyph(rng, glyphs, ch, config.font_size, MAX_SAMPLE_ATTEMPTS)
                else {
                    skipped += 1;
                    continue;
                };
                let radius = rng.f64() * 2.0 + 1.0;
                let velocity = offset * 0.1 * config.explosion_size;
                self.particles
                    .push(Particle::new(anchor + offset, velocity, radius, start, end));
            }
        }

        if skipped > 0 {
            log::warn!("text burst '{}' skipped {} particles that never landed in a glyph", self.text, skipped);
        }
        log::debug!("text burst '{}' into {} particles", self.text, self.particles.len());
        Ok(self.particles.len())
    }

    pub fn advance(&mut self, physics: &Physics) {
        if self.state == TextState::Exploded {
            self.particles.retain_mut(|particle| {
                particle.step(physics);
                particle.is_alive()
            });
        }
    }

    pub fn is_spent(&self) -> bool {
        self.state == TextState::Exploded && self.particles.is_empty()
    }
}
