use super::Effect;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use fireworks::canvas::PixelCanvas;
use fireworks::color::Rgb;
use fireworks::simulation::Simulation;
use noise::{NoiseFn, Perlin};
use std::io::{BufWriter, Stdout, Write};

// Pixels dimmer than this don't twinkle
const TWINKLE_FLOOR: f32 = 8.0;

pub struct RenderOptions {
    /// World units per pixel; `None` picks one from the terminal height.
    pub scale: Option<f64>,
    pub background: Rgb,
    pub twinkle: bool,
}

pub struct FireworksEffect {
    sim: Simulation,
    canvas: PixelCanvas,
    options: RenderOptions,
    perlin: Option<Perlin>,
    time: f32,
    output_buf: Vec<u8>,
}

impl FireworksEffect {
    pub fn new(sim: Simulation, width: usize, height: usize, options: RenderOptions) -> Self {
        let perlin = options.twinkle.then(|| Perlin::new(fastrand::u32(0..1000)));
        let scale = options.scale.unwrap_or_else(|| PixelCanvas::auto_scale(height));
        log::info!(
            "surface {}x{} pixels at {:.2} world units per pixel",
            width,
            height,
            scale
        );

        Self {
            sim,
            canvas: PixelCanvas::new(width, height, scale),
            options,
            perlin,
            time: 0.0,
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    /// Canvas light with the twinkle applied, composited onto the background.
    fn shade(&self, x: usize, y: usize) -> (u8, u8, u8) {
        let mut light = self.canvas.light(x, y);

        if let Some(perlin) = &self.perlin {
            let peak = light[0].max(light[1]).max(light[2]);
            if peak > TWINKLE_FLOOR {
                let n = perlin.get([x as f64 * 0.35, y as f64 * 0.35, self.time as f64 * 2.0]) as f32;
                let factor = 0.85 + 0.15 * n;
                for c in &mut light {
                    *c = (*c * factor).min(255.0);
                }
            }
        }

        // Screen blend so black sky shows the background untouched
        let bg = self.options.background;
        let screen = |b: u8, l: f32| (255.0 - (255.0 - b as f32) * (255.0 - l) / 255.0) as u8;
        (
            screen(bg.r, light[0]),
            screen(bg.g, light[1]),
            screen(bg.b, light[2]),
        )
    }
}

impl Effect for FireworksEffect {
    fn resize(&mut self, width: usize, height: usize) {
        let scale = self
            .options
            .scale
            .unwrap_or_else(|| PixelCanvas::auto_scale(height));
        self.canvas = PixelCanvas::new(width, height, scale);
        self.output_buf = Vec::with_capacity(width * height * 25);
        log::info!("resized to {}x{} pixels", width, height);
    }

    fn update(&mut self, dt: f32) {
        self.time += dt;
        // Wrap time to prevent floating point precision issues
        if self.time > 10000.0 {
            self.time -= 10000.0;
        }

        self.sim.tick(&self.canvas);
        self.sim.draw(&mut self.canvas);
    }

    fn render(&mut self, stdout: &mut BufWriter<Stdout>) -> std::io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let width = self.canvas.columns();
        let height = self.canvas.rows();
        let mut prev_top_color: (u8, u8, u8) = (255, 255, 255);
        let mut prev_bot_color: (u8, u8, u8) = (255, 255, 255);

        // Render using half-blocks
        for y in (0..height).step_by(2) {
            for x in 0..width {
                let top_color = self.shade(x, y);
                let bot_color = if y + 1 < height {
                    self.shade(x, y + 1)
                } else {
                    top_color
                };

                if top_color != prev_top_color {
                    write!(
                        self.output_buf,
                        "\x1b[48;2;{};{};{}m",
                        top_color.0, top_color.1, top_color.2
                    )?;
                    prev_top_color = top_color;
                }
                if bot_color != prev_bot_color {
                    write!(
                        self.output_buf,
                        "\x1b[38;2;{};{};{}m",
                        bot_color.0, bot_color.1, bot_color.2
                    )?;
                    prev_bot_color = bot_color;
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top_color = (255, 255, 255);
            prev_bot_color = (255, 255, 255);
            if y + 2 < height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        stdout.write_all(&self.output_buf)?;
        stdout.flush()?;
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char(' ') => {
                if !self.sim.launch_random(&self.canvas) {
                    log::debug!("launch refused: ceiling reached");
                }
            }
            KeyCode::Char('t') => {
                if !self.sim.launch_text(&self.canvas) {
                    log::debug!("text launch refused");
                }
            }
            _ => {}
        }
    }
}
