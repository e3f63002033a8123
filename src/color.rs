//! Colours, colour schemes and the curated palettes fireworks draw from.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest number of colours a single scheme may hold.
pub const MAX_SCHEME_COLORS: usize = 6;

// Soft pastels first, then the saturated families
pub const FIREWORK_PALETTE: &[&[&str]] = &[
    &["#eb85a3", "#edb2b2", "#f3e5d3"], // Popsicle
    &["#d1bdd7", "#eeb9b9", "#ead6a9"], // Lavender haze
    &["#efc2c2", "#c6b3d1", "#e59181"], // Taro
    &["#0043fd", "#069aff", "#6f6dff"], // Gardenia night
    &["#e0b8cd", "#ff3782", "#38ff98"], // Kaleidoscope
    &["#cfbbd6", "#ffa01f", "#e7b5b5"], // Plum candy
    &["#FF533e", "#FF5555", "#FFEB91"], // Reds
    &["#02FF8D", "#23FFA0", "#ADFFD9"], // Mint
    &["#5170FF", "#51ACFF", "#ADF6FF"], // Blues
];

pub const TEXT_PALETTE: &[&[&str]] = &[
    &["#FF0000", "#FF5555", "#FF8888"], // Red
    &["#FFD700", "#FFA500", "#FF8C00"], // Gold
    &["#FF69B4", "#FF1493", "#C71585"], // Pink
    &["#00FF00", "#7FFF00", "#32CD32"], // Green
    &["#1E90FF", "#00BFFF", "#87CEFA"], // Blue
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color '{0}': expected 6 hex digits (RRGGBB)")]
    InvalidLength(String),
    #[error("invalid hex character '{1}' in color '{0}'")]
    InvalidHex(String, char),
    #[error("color scheme is empty")]
    EmptyScheme,
    #[error("color scheme has {0} colors, at most {max} allowed", max = MAX_SCHEME_COLORS)]
    TooManyColors(usize),
    #[error("palette contains no color schemes")]
    EmptyPalette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim_start_matches('#');
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_string(), c));
        }
        if digits.len() != 6 {
            return Err(ColorError::InvalidLength(hex.to_string()));
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self { r, g, b }),
            _ => Err(ColorError::InvalidLength(hex.to_string())),
        }
    }

    /// Per-channel linear blend towards `other`, rounded to the nearest integer.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + t * (b as f64 - a as f64)).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A colour with floating alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    pub const fn new(rgb: Rgb, alpha: f64) -> Self {
        Self { rgb, alpha }
    }

    pub const fn opaque(rgb: Rgb) -> Self {
        Self { rgb, alpha: 1.0 }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.alpha
        )
    }
}

/// An ordered set of colours. The first entry is the scheme's main colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    colors: Vec<Rgb>,
}

impl ColorScheme {
    pub fn new(colors: Vec<Rgb>) -> Result<Self, ColorError> {
        match colors.len() {
            0 => Err(ColorError::EmptyScheme),
            n if n > MAX_SCHEME_COLORS => Err(ColorError::TooManyColors(n)),
            _ => Ok(Self { colors }),
        }
    }

    pub fn parse<S: AsRef<str>>(hexes: &[S]) -> Result<Self, ColorError> {
        let colors = hexes
            .iter()
            .map(|h| Rgb::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn main_color(&self) -> Rgb {
        self.colors[0]
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Uniform pick, with replacement.
    pub fn pick(&self, rng: &mut fastrand::Rng) -> Rgb {
        self.colors[rng.usize(0..self.colors.len())]
    }
}

/// Hands out a random scheme from a table validated up front.
#[derive(Debug, Clone)]
pub struct ColorSchemeProvider {
    schemes: Vec<ColorScheme>,
}

impl ColorSchemeProvider {
    pub fn new(schemes: Vec<ColorScheme>) -> Result<Self, ColorError> {
        if schemes.is_empty() {
            return Err(ColorError::EmptyPalette);
        }
        Ok(Self { schemes })
    }

    pub fn from_table<S: AsRef<str>, T: AsRef<[S]>>(table: &[T]) -> Result<Self, ColorError> {
        let schemes = table
            .iter()
            .map(|scheme| ColorScheme::parse(scheme.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(schemes)
    }

    pub fn fireworks() -> Result<Self, ColorError> {
        Self::from_table(FIREWORK_PALETTE)
    }

    pub fn text() -> Result<Self, ColorError> {
        Self::from_table(TEXT_PALETTE)
    }

    pub fn schemes(&self) -> &[ColorScheme] {
        &self.schemes
    }

    pub fn pick(&self, rng: &mut fastrand::Rng) -> &ColorScheme {
        &self.schemes[rng.usize(0..self.schemes.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#eb85a3").unwrap(), Rgb::new(0xeb, 0x85, 0xa3));
        assert_eq!("FF533e".parse::<Rgb>().unwrap(), Rgb::new(0xff, 0x53, 0x3e));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(
            Rgb::from_hex("#fff"),
            Err(ColorError::InvalidLength("#fff".into()))
        );
        assert_eq!(
            Rgb::from_hex("#12345g"),
            Err(ColorError::InvalidHex("#12345g".into(), 'g'))
        );
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#1234567").is_err());
    }

    #[test]
    fn displays_as_lowercase_hex() {
        assert_eq!(Rgb::new(255, 83, 62).to_string(), "#ff533e");
        assert_eq!(
            Rgba::new(Rgb::new(1, 2, 3), 0.5).to_string(),
            "rgba(1, 2, 3, 0.5)"
        );
    }

    #[test]
    fn lerp_rounds_to_nearest() {
        let mid = Rgb::BLACK.lerp(Rgb::WHITE, 0.5);
        assert_eq!(mid, Rgb::new(128, 128, 128));
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 0.0), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 1.0), Rgb::WHITE);
    }

    #[test]
    fn scheme_size_is_bounded() {
        assert_eq!(ColorScheme::new(vec![]), Err(ColorError::EmptyScheme));
        assert_eq!(
            ColorScheme::new(vec![Rgb::WHITE; 7]),
            Err(ColorError::TooManyColors(7))
        );
        let scheme = ColorScheme::parse(&["#010203", "#040506"]).unwrap();
        assert_eq!(scheme.main_color(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn builtin_palettes_are_valid() {
        let fireworks = ColorSchemeProvider::fireworks().unwrap();
        assert_eq!(fireworks.schemes().len(), FIREWORK_PALETTE.len());
        let text = ColorSchemeProvider::text().unwrap();
        assert_eq!(text.schemes().len(), TEXT_PALETTE.len());
        for scheme in fireworks.schemes().iter().chain(text.schemes()) {
            assert!((2..=MAX_SCHEME_COLORS).contains(&scheme.colors().len()));
        }
    }

    #[test]
    fn provider_rejects_bad_tables() {
        let empty: &[&[&str]] = &[];
        assert_eq!(
            ColorSchemeProvider::from_table(empty).unwrap_err(),
            ColorError::EmptyPalette
        );
        let bad: &[&[&str]] = &[&["#000000", "nope"]];
        assert!(ColorSchemeProvider::from_table(bad).is_err());
    }

    #[test]
    fn pick_stays_within_scheme() {
        let scheme = ColorScheme::parse(&["#ff0000", "#00ff00", "#0000ff"]).unwrap();
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..200 {
            assert!(scheme.colors().contains(&scheme.pick(&mut rng)));
        }
    }
}
