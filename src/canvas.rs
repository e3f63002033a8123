//! Off-screen pixel buffer the terminal renderer flushes from.

use crate::color::{Rgb, Rgba};
use crate::surface::{Canvas, Surface};
use glam::DVec2;

/// World height the automatic scale aims for.
const TARGET_WORLD_HEIGHT: f64 = 720.0;

/// Circles below this pixel radius are plotted as a single pixel.
const MIN_PIXEL_RADIUS: f64 = 0.5;

/// An RGB buffer where each pixel covers `scale` world units in both axes.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    columns: usize,
    rows: usize,
    scale: f64,
    pixels: Vec<[f32; 3]>,
}

impl PixelCanvas {
    pub fn new(columns: usize, rows: usize, scale: f64) -> Self {
        Self {
            columns,
            rows,
            scale,
            pixels: vec![[0.0; 3]; columns * rows],
        }
    }

    /// Picks a scale so the world is roughly the same height on any terminal.
    pub fn auto_scale(rows: usize) -> f64 {
        (TARGET_WORLD_HEIGHT / rows.max(1) as f64).clamp(2.0, 12.0)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Raw channel values in `[0, 255]`.
    pub fn light(&self, x: usize, y: usize) -> [f32; 3] {
        self.pixels[y * self.columns + x]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let [r, g, b] = self.light(x, y);
        Rgb::new(r.round() as u8, g.round() as u8, b.round() as u8)
    }

    pub fn clear(&mut self) {
        self.pixels.fill([0.0; 3]);
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        let a = color.alpha.clamp(0.0, 1.0) as f32;
        let src = [color.rgb.r as f32, color.rgb.g as f32, color.rgb.b as f32];
        let dst = &mut self.pixels[y * self.columns + x];
        for (d, s) in dst.iter_mut().zip(src) {
            *d = *d * (1.0 - a) + s * a;
        }
    }

    fn to_pixel(&self, world: f64) -> f64 {
        world / self.scale
    }
}

impl Surface for PixelCanvas {
    fn width(&self) -> f64 {
        self.columns as f64 * self.scale
    }

    fn height(&self) -> f64 {
        self.rows as f64 * self.scale
    }
}

impl Canvas for PixelCanvas {
    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba) {
        let x0 = self.to_pixel(origin.x).floor().max(0.0) as usize;
        let y0 = self.to_pixel(origin.y).floor().max(0.0) as usize;
        let x1 = (self.to_pixel(origin.x + size.x).ceil().max(0.0) as usize).min(self.columns);
        let y1 = (self.to_pixel(origin.y + size.y).ceil().max(0.0) as usize).min(self.rows);

        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        let cx = self.to_pixel(center.x);
        let cy = self.to_pixel(center.y);
        let r = self.to_pixel(radius);

        if r < MIN_PIXEL_RADIUS {
            if cx >= 0.0 && cy >= 0.0 && (cx as usize) < self.columns && (cy as usize) < self.rows {
                self.blend(cx as usize, cy as usize, color);
            }
            return;
        }

        let x0 = (cx - r).floor().max(0.0) as usize;
        let y0 = (cy - r).floor().max(0.0) as usize;
        let x1 = ((cx + r).ceil().max(0.0) as usize).min(self.columns);
        let y1 = ((cy + r).ceil().max(0.0) as usize).min(self.rows);
        let r2 = r * r;

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color);
                }
            }
        }
    }
}
