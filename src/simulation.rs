//! The live show: spawns shells, advances them and retires the spent ones.

use crate::color::{ColorSchemeProvider, Rgb, Rgba};
use crate::config::SimConfig;
use crate::error::Result;
use crate::firework::{Firework, FireworkState, Launch};
use crate::shell::Shell;
use crate::surface::{Canvas, GlyphOutline, Surface};
use crate::text::{self, TextFirework};
use glam::DVec2;

/// Radius of an ascending shell on screen.
const ROCKET_RADIUS: f64 = 1.5;

pub struct Simulation {
    config: SimConfig,
    rng: fastrand::Rng,
    schemes: ColorSchemeProvider,
    text_schemes: ColorSchemeProvider,
    glyphs: Box<dyn GlyphOutline>,
    shells: Vec<Shell>,
    ticks: u64,
    last_text: u64,
}

impl Simulation {
    /// Validates the config, the palettes and the special text before any
    /// shell exists.
    pub fn new(config: SimConfig, glyphs: Box<dyn GlyphOutline>) -> Result<Self> {
        config.validate()?;
        let schemes = match &config.palette {
            Some(table) => ColorSchemeProvider::from_table(table.as_slice())?,
            None => ColorSchemeProvider::fireworks()?,
        };
        let text_schemes = ColorSchemeProvider::text()?;
        text::validate_text(&config.text.content, glyphs.as_ref(), config.text.font_size)?;

        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        Ok(Self {
            config,
            rng,
            schemes,
            text_schemes,
            glyphs,
            shells: Vec::new(),
            ticks: 0,
            last_text: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn shells(&self) -> &[Shell] {
        &self.shells
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn particle_count(&self) -> usize {
        self.shells.iter().map(|s| s.particles().len()).sum()
    }

    pub fn has_text(&self) -> bool {
        self.shells.iter().any(Shell::is_text)
    }

    fn has_capacity(&self) -> bool {
        self.shells.len() < self.config.limits.max_shells
            && self.particle_count() < self.config.limits.max_particles
    }

    /// Adds a prepared firework. Returns `false` when a ceiling is reached.
    pub fn launch(&mut self, firework: Firework) -> bool {
        if !self.has_capacity() {
            return false;
        }
        self.shells.push(firework.into());
        true
    }

    pub fn launch_random(&mut self, surface: &dyn Surface) -> bool {
        let launch = Launch::random(&mut self.rng, surface.width(), surface.height());
        let scheme = self.schemes.pick(&mut self.rng).clone();
        log::debug!(
            "launching firework from x={:.1} towards ({:.1}, {:.1})",
            launch.position.x,
            launch.target.x,
            launch.target.y
        );
        self.launch(Firework::new(launch, scheme))
    }

    /// Bursts the configured text in the middle of the surface. Only one text
    /// burst is alive at a time.
    pub fn launch_text(&mut self, surface: &dyn Surface) -> bool {
        if self.has_text() || !self.has_capacity() {
            return false;
        }
        self.last_text = self.ticks;

        let scheme = self.text_schemes.pick(&mut self.rng).clone();
        let mut shell = TextFirework::new(self.config.text.content.clone(), scheme);
        match shell.detonate(
            &mut self.rng,
            self.glyphs.as_ref(),
            surface.size(),
            &self.config.text,
        ) {
            Ok(_) => {
                self.shells.push(shell.into());
                true
            }
            Err(e) => {
                log::warn!("dropping text burst: {}", e);
                false
            }
        }
    }

    /// One logical frame.
    pub fn tick(&mut self, surface: &dyn Surface) {
        self.ticks += 1;

        if let Some(interval) = self.config.text.interval_ticks {
            if !self.has_text() && self.ticks - self.last_text >= interval {
                self.launch_text(surface);
            }
        }

        // Ordinary launches pause while text is on screen
        if !self.has_text() && self.rng.f64() < self.config.spawn_probability {
            self.launch_random(surface);
        }

        let rng = &mut self.rng;
        let config = &self.config;
        for shell in &mut self.shells {
            shell.advance(rng, &config.burst, &config.physics);
        }
        self.shells.retain(|shell| !shell.is_spent());

        self.enforce_particle_ceiling();
    }

    /// Evicts the oldest exploded shells until the particle total fits.
    fn enforce_particle_ceiling(&mut self) {
        let ceiling = self.config.limits.max_particles;
        let mut total = self.particle_count();
        let mut evicted = 0;

        while total > ceiling {
            let Some(oldest) = self.shells.iter().position(Shell::is_exploded) else {
                break;
            };
            total -= self.shells.remove(oldest).particles().len();
            evicted += 1;
        }

        if evicted > 0 {
            log::warn!(
                "particle ceiling {} reached, evicted {} shells",
                ceiling,
                evicted
            );
        }
    }

    /// Paints the trail overlay, then every shell and its debris.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let size = canvas.size();
        canvas.fill_rect(
            DVec2::ZERO,
            size,
            Rgba::new(Rgb::BLACK, self.config.fade_opacity),
        );

        for shell in &self.shells {
            if let Shell::Rocket(firework) = shell {
                if firework.state() == FireworkState::Ascending {
                    canvas.fill_circle(
                        firework.position(),
                        ROCKET_RADIUS,
                        Rgba::opaque(firework.main_color()),
                    );
                }
            }
            for particle in shell.particles() {
                canvas.fill_circle(particle.position, particle.radius(), particle.color_at());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burst::BurstConfig;
    use crate::color::ColorScheme;
    use crate::config::Limits;
    use crate::glyphs::BitmapFont;
    use crate::text::TextConfig;

    struct Sky(f64, f64);

    impl Surface for Sky {
        fn width(&self) -> f64 {
            self.0
        }
        fn height(&self) -> f64 {
            self.1
        }
    }

    fn quiet() -> SimConfig {
        SimConfig {
            spawn_probability: 0.0,
            seed: Some(1),
            text: TextConfig {
                interval_ticks: None,
                ..TextConfig::default()
            },
            ..SimConfig::default()
        }
    }

    fn sim(config: SimConfig) -> Simulation {
        Simulation::new(config, Box::new(BitmapFont::builtin())).unwrap()
    }

    fn primed(x: f64) -> Firework {
        Firework::new(
            Launch {
                position: DVec2::new(x, 100.0),
                velocity: DVec2::new(0.0, -1.0),
                acceleration: DVec2::ZERO,
                target: DVec2::new(x, 300.0),
                countdown: 0,
            },
            ColorScheme::parse(&["#ff0000"]).unwrap(),
        )
    }

    #[test]
    fn rejects_bad_setup() {
        let mut config = quiet();
        config.text.content = "HI~".to_string();
        assert!(Simulation::new(config, Box::new(BitmapFont::builtin())).is_err());

        let mut config = quiet();
        config.spawn_probability = -1.0;
        assert!(Simulation::new(config, Box::new(BitmapFont::builtin())).is_err());
    }

    #[test]
    fn quiet_sky_stays_empty() {
        let mut sim = sim(quiet());
        for _ in 0..500 {
            sim.tick(&Sky(800.0, 600.0));
        }
        assert!(sim.shells().is_empty());
        assert_eq!(sim.ticks(), 500);
    }

    #[test]
    fn certain_spawn_launches_every_tick() {
        let mut config = quiet();
        config.spawn_probability = 1.0;
        let mut sim = sim(config);
        for _ in 0..5 {
            sim.tick(&Sky(800.0, 600.0));
        }
        assert_eq!(sim.shells().len(), 5);
        assert!(sim.shells().iter().all(|s| !s.is_text()));
    }

    #[test]
    fn shell_ceiling_throttles_spawns() {
        let mut config = quiet();
        config.spawn_probability = 1.0;
        config.limits = Limits {
            max_shells: 3,
            max_particles: 20_000,
        };
        let mut sim = sim(config);
        for _ in 0..50 {
            sim.tick(&Sky(800.0, 600.0));
            assert!(sim.shells().len() <= 3);
        }
    }

    #[test]
    fn spent_shell_is_removed_on_the_tick_its_debris_dies() {
        let mut sim = sim(quiet());
        assert!(sim.launch(primed(400.0)));
        let sky = Sky(800.0, 600.0);

        sim.tick(&sky);
        assert!(sim.shells()[0].is_exploded());
        assert!(sim.particle_count() > 0);

        for _ in 0..crate::particle::PARTICLE_LIFE - 1 {
            sim.tick(&sky);
            assert_eq!(sim.shells().len(), 1);
        }
        sim.tick(&sky);
        assert!(sim.shells().is_empty());
    }

    #[test]
    fn scheduled_text_pauses_ordinary_launches() {
        let mut config = quiet();
        config.spawn_probability = 1.0;
        config.text.interval_ticks = Some(5);
        config.text.particles_per_char = 20;
        let mut sim = sim(config);
        let sky = Sky(1200.0, 700.0);

        for _ in 0..4 {
            sim.tick(&sky);
        }
        assert!(!sim.has_text());
        let rockets = sim.shells().len();

        sim.tick(&sky);
        assert!(sim.has_text());
        assert_eq!(sim.shells().len(), rockets + 1);

        for _ in 0..20 {
            sim.tick(&sky);
            assert!(sim.has_text());
            assert!(sim.shells().len() <= rockets + 1);
        }
        assert!(!sim.launch_text(&sky));
    }

    #[test]
    fn particle_ceiling_evicts_oldest_first() {
        let mut config = quiet();
        config.limits.max_particles = 250;
        let mut sim = sim(config);
        let burst = BurstConfig {
            min_particles: 180,
            max_particles: 181,
            explosion_size: 4.0,
        };
        let mut rng = fastrand::Rng::with_seed(5);

        let mut first = primed(100.0);
        first.detonate(&mut rng, &burst);
        let mut second = primed(700.0);
        second.detonate(&mut rng, &burst);
        assert!(sim.launch(first));
        assert!(sim.launch(second));
        assert_eq!(sim.particle_count(), 360);

        sim.tick(&Sky(800.0, 600.0));
        assert_eq!(sim.shells().len(), 1);
        assert_eq!(sim.particle_count(), 180);
        let survivor = &sim.shells()[0].particles()[0];
        assert!((survivor.position.x - 700.0).abs() < 10.0);
    }

    #[derive(Default)]
    struct Recorder {
        rects: Vec<Rgba>,
        circles: Vec<(DVec2, f64, Rgba)>,
    }

    impl Surface for Recorder {
        fn width(&self) -> f64 {
            800.0
        }
        fn height(&self) -> f64 {
            600.0
        }
    }

    impl Canvas for Recorder {
        fn fill_rect(&mut self, _origin: DVec2, _size: DVec2, color: Rgba) {
            self.rects.push(color);
        }
        fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
            self.circles.push((center, radius, color));
        }
    }

    #[test]
    fn draw_fades_then_paints_rockets_and_debris() {
        let mut sim = sim(quiet());
        // Target far above, so it is still climbing when drawn
        let rocket = Firework::new(
            Launch {
                position: DVec2::new(200.0, 500.0),
                velocity: DVec2::new(0.0, -5.0),
                acceleration: DVec2::ZERO,
                target: DVec2::new(200.0, 0.0),
                countdown: 10,
            },
            ColorScheme::parse(&["#00ff00", "#0000ff"]).unwrap(),
        );
        sim.launch(rocket);
        let mut canvas = Recorder::default();
        sim.draw(&mut canvas);

        assert_eq!(canvas.rects, vec![Rgba::new(Rgb::BLACK, 0.1)]);
        assert_eq!(canvas.circles.len(), 1);
        let (center, radius, color) = canvas.circles[0];
        assert_eq!(center, DVec2::new(200.0, 500.0));
        assert_eq!(radius, ROCKET_RADIUS);
        assert_eq!(color, Rgba::opaque(Rgb::new(0, 255, 0)));
    }
}
