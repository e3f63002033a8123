//! Tunables for the simulation, loadable from a TOML file.
//!
//! Every field has a default, so a file only needs the keys it changes:
//!
//! ```toml
//! spawn_probability = 0.08
//!
//! [physics]
//! gravity = 0.04
//!
//! [text]
//! content = "HAPPY NEW YEAR"
//! interval_ticks = 1200
//! ```

use crate::burst::BurstConfig;
use crate::color::ColorScheme;
use crate::particle::Physics;
use crate::text::TextConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Soft ceilings on per-frame work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_shells: usize,
    pub max_particles: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_shells: 64,
            max_particles: 20_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Opacity of the black overlay painted each frame to leave trails.
    pub fade_opacity: f64,
    /// Chance per tick of launching a new firework.
    pub spawn_probability: f64,
    pub seed: Option<u64>,
    /// Replaces the built-in firework palette.
    pub palette: Option<Vec<Vec<String>>>,
    pub physics: Physics,
    pub burst: BurstConfig,
    pub text: TextConfig,
    pub limits: Limits,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fade_opacity: 0.1,
            spawn_probability: 0.05,
            seed: None,
            palette: None,
            physics: Physics::default(),
            burst: BurstConfig::default(),
            text: TextConfig::default(),
            limits: Limits::default(),
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Collects every problem rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !(0.0..=1.0).contains(&self.fade_opacity) {
            errors.push(format!("fade_opacity must be within [0, 1], got {}", self.fade_opacity));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            errors.push(format!(
                "spawn_probability must be within [0, 1], got {}",
                self.spawn_probability
            ));
        }

        let physics = &self.physics;
        if !physics.gravity.is_finite() {
            errors.push(format!("physics.gravity must be finite, got {}", physics.gravity));
        }
        if !(physics.damping > 0.0 && physics.damping <= 1.0) {
            errors.push(format!("physics.damping must be within (0, 1], got {}", physics.damping));
        }
        if !(physics.radius_decay > 0.0 && physics.radius_decay <= 1.0) {
            errors.push(format!(
                "physics.radius_decay must be within (0, 1], got {}",
                physics.radius_decay
            ));
        }

        let burst = &self.burst;
        if burst.min_particles >= burst.max_particles {
            errors.push(format!(
                "burst.min_particles ({}) must be below burst.max_particles ({})",
                burst.min_particles, burst.max_particles
            ));
        }
        if !(burst.explosion_size.is_finite() && burst.explosion_size > 0.0) {
            errors.push(format!(
                "burst.explosion_size must be positive, got {}",
                burst.explosion_size
            ));
        }

        let text = &self.text;
        if text.particles_per_char == 0 {
            errors.push("text.particles_per_char must be at least 1".to_string());
        }
        if !(text.font_size.is_finite() && text.font_size > 0.0) {
            errors.push(format!("text.font_size must be positive, got {}", text.font_size));
        }
        if !(text.explosion_size.is_finite() && text.explosion_size >= 0.0) {
            errors.push(format!(
                "text.explosion_size must not be negative, got {}",
                text.explosion_size
            ));
        }
        if text.interval_ticks == Some(0) {
            errors.push("text.interval_ticks must be at least 1".to_string());
        }

        if self.limits.max_shells == 0 {
            errors.push("limits.max_shells must be at least 1".to_string());
        }
        if self.limits.max_particles == 0 {
            errors.push("limits.max_particles must be at least 1".to_string());
        }

        if let Some(palette) = &self.palette {
            if palette.is_empty() {
                errors.push("palette must contain at least one scheme".to_string());
            }
            for (i, scheme) in palette.iter().enumerate() {
                if let Err(e) = ColorScheme::parse(scheme.as_slice()) {
                    errors.push(format!("palette[{}]: {}", i, e));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_classic_show() {
        let config = SimConfig::default();
        assert_eq!(config.fade_opacity, 0.1);
        assert_eq!(config.spawn_probability, 0.05);
        assert_eq!(config.physics.gravity, 0.05);
        assert_eq!(config.physics.damping, 0.99);
        assert_eq!(config.physics.radius_decay, 0.99);
        assert_eq!(config.burst.count_range(), 100..200);
        assert_eq!(config.burst.explosion_size, 4.0);
        assert_eq!(config.text.particles_per_char, 200);
        assert_eq!(config.text.content, "新年快乐");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = SimConfig::from_toml(
            r##"
            spawn_probability = 0.2
            palette = [["#ff0000", "#00ff00"]]

            [physics]
            gravity = 0.1

            [text]
            content = "HI"
            "##,
        )
        .unwrap();
        assert_eq!(config.spawn_probability, 0.2);
        assert_eq!(config.physics.gravity, 0.1);
        assert_eq!(config.physics.damping, 0.99);
        assert_eq!(config.text.content, "HI");
        assert_eq!(config.text.interval_ticks, Some(1_800));
        assert_eq!(config.limits, Limits::default());
    }

    #[test]
    fn validation_reports_every_problem() {
        let config = SimConfig {
            spawn_probability: 1.5,
            palette: Some(vec![vec!["#12".to_string()]]),
            burst: BurstConfig {
                min_particles: 10,
                max_particles: 10,
                explosion_size: 4.0,
            },
            ..SimConfig::default()
        };
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3, "{errors:?}");
                assert!(errors[0].contains("spawn_probability"));
                assert!(errors[1].contains("burst.min_particles"));
                assert!(errors[2].starts_with("palette[0]"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unparseable_files() {
        assert!(matches!(
            SimConfig::from_toml("spawn_probability = \"often\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fade_opacity = 0.25\n[limits]\nmax_shells = 8").unwrap();
        let config = SimConfig::load(file.path()).unwrap();
        assert_eq!(config.fade_opacity, 0.25);
        assert_eq!(config.limits.max_shells, 8);

        let missing = SimConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
