//! Boundaries between the simulation and whatever displays it.

use crate::color::Rgba;
use glam::DVec2;

/// Size of the drawing area in world units. Read fresh every tick so a resize
/// needs no callback into the simulation.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn size(&self) -> DVec2 {
        DVec2::new(self.width(), self.height())
    }
}

pub trait Canvas: Surface {
    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Rgba);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
}

/// Filled-outline queries for text rendered centre-aligned on a middle baseline.
pub trait GlyphOutline {
    /// Bounding box of `ch` at `font_size`, or `None` when the glyph is unknown.
    fn bounds(&self, ch: char, font_size: f64) -> Option<DVec2>;

    /// Whether `offset`, measured from the glyph centre, lies inside the outline.
    fn contains(&self, ch: char, font_size: f64, offset: DVec2) -> bool;

    /// Filled fraction of the bounding box. Zero means nothing can be sampled.
    fn coverage(&self, ch: char) -> f64;
}
