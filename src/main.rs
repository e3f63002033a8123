use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use fireworks::color::Rgb;
use fireworks::config::{ConfigError, SimConfig};
use fireworks::glyphs::BitmapFont;
use fireworks::simulation::Simulation;
use std::fs::File;
use std::io::{stdout, BufWriter, Stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

mod effects;
use effects::Effect;
use effects::fireworks::{FireworksEffect, RenderOptions};

/// Fireworks in the terminal.
///
/// Keys: space launches a firework, t bursts the text, q / Esc / Ctrl+C quit.
#[derive(Debug, Parser)]
#[command(name = "fireworks", version, about)]
struct Cli {
    /// TOML file with simulation settings
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for a reproducible show
    #[arg(long)]
    seed: Option<u64>,

    /// Text for the special burst
    #[arg(long)]
    text: Option<String>,

    /// Never schedule the text burst
    #[arg(long, conflicts_with = "text_interval")]
    no_text: bool,

    /// Ticks between text bursts
    #[arg(long, value_name = "TICKS")]
    text_interval: Option<u64>,

    /// Chance per tick of launching a firework
    #[arg(long, value_name = "P")]
    spawn_probability: Option<f64>,

    #[arg(long, value_name = "N")]
    max_shells: Option<usize>,

    #[arg(long, value_name = "N")]
    max_particles: Option<usize>,

    /// World units per pixel (default: fit about 720 units to the terminal height)
    #[arg(long, value_name = "UNITS")]
    scale: Option<f64>,

    /// Background color as hex (e.g. 1a1b26)
    #[arg(long, value_name = "RRGGBB")]
    bg_color: Option<Rgb>,

    /// Disable the shimmer on lit pixels
    #[arg(long)]
    no_twinkle: bool,

    /// Write log records to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut SimConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(text) = &self.text {
            config.text.content = text.clone();
        }
        if self.no_text {
            config.text.interval_ticks = None;
        }
        if let Some(ticks) = self.text_interval {
            config.text.interval_ticks = Some(ticks);
        }
        if let Some(p) = self.spawn_probability {
            config.spawn_probability = p;
        }
        if let Some(n) = self.max_shells {
            config.limits.max_shells = n;
        }
        if let Some(n) = self.max_particles {
            config.limits.max_particles = n;
        }
    }

    fn render_options(&self) -> Result<RenderOptions, ConfigError> {
        if let Some(scale) = self.scale {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(ConfigError::Validation(vec![format!(
                    "--scale must be positive, got {}",
                    scale
                )]));
            }
        }
        Ok(RenderOptions {
            scale: self.scale,
            background: self.bg_color.unwrap_or(Rgb::BLACK),
            twinkle: !self.no_twinkle,
        })
    }
}

fn init_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    // Stay silent by default so nothing scribbles over the alternate screen
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

fn run_effect<E: Effect>(mut effect: E) -> std::io::Result<()> {
    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All), EnableMouseCapture)?;

    let result = frame_loop(&mut effect, &mut stdout);

    execute!(stdout, Show, LeaveAlternateScreen, DisableMouseCapture)?;
    terminal::disable_raw_mode()?;

    result
}

fn frame_loop<E: Effect>(effect: &mut E, stdout: &mut BufWriter<Stdout>) -> std::io::Result<()> {
    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;
    const FIXED_DT: f32 = 1.0 / 60.0;

    loop {
        if event::poll(Duration::from_millis(1))? {
            let event = event::read()?;
            match &event {
                Event::Key(key_event) => {
                    if key_event.code == KeyCode::Char('q')
                        || key_event.code == KeyCode::Esc
                        || (key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(event::KeyModifiers::CONTROL))
                    {
                        break;
                    }
                    // Pass non-exit key events to the effect
                    effect.handle_event(&event);
                }
                Event::Resize(cols, rows) => {
                    effect.resize(*cols as usize, *rows as usize * 2);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => {
                    effect.handle_event(&event);
                }
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        accumulator += frame_time;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        // One simulation tick per fixed step
        while accumulator >= FIXED_DT {
            effect.update(FIXED_DT);
            accumulator -= FIXED_DT;
        }

        effect.render(stdout)?;
    }

    Ok(())
}

fn run(cli: Cli) -> fireworks::Result<()> {
    init_logging(cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    cli.apply(&mut config);
    let options = cli.render_options()?;

    // Everything that can be misconfigured fails here, before the terminal is touched
    let sim = Simulation::new(config, Box::new(BitmapFont::builtin()))?;
    log::info!("starting show, seed {:?}", sim.config().seed);

    let (cols, rows) = terminal::size()?;
    let effect = FireworksEffect::new(sim, cols as usize, rows as usize * 2, options);
    run_effect(effect)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("fireworks: {}", e);
        std::process::exit(1);
    }
}
