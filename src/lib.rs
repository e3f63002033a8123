//! Fireworks simulation engine.
//!
//! Shells launch from the bottom of a [`surface::Surface`], climb, and burst
//! into debris that falls, shrinks and fades. [`simulation::Simulation`] owns
//! every live shell; call [`simulation::Simulation::tick`] once per frame and
//! [`simulation::Simulation::draw`] to paint onto a [`surface::Canvas`].

pub mod burst;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod firework;
pub mod glyphs;
pub mod particle;
pub mod shell;
pub mod simulation;
pub mod surface;
pub mod text;

pub use error::{Error, Result};
