use crate::color::ColorError;
use crate::config::ConfigError;
use crate::text::GlyphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("bad color: {0}")]
    Color(#[from] ColorError),
    #[error("bad text: {0}")]
    Glyph(#[from] GlyphError),
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
