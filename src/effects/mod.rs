use crossterm::event::Event;
use std::io::{BufWriter, Stdout};

pub mod fireworks;

pub trait Effect {
    /// Called with the new size in pixels (two per character row).
    fn resize(&mut self, width: usize, height: usize);
    fn update(&mut self, dt: f32);
    fn render(&mut self, stdout: &mut BufWriter<Stdout>) -> std::io::Result<()>;
    fn handle_event(&mut self, _event: &Event) {}
}
