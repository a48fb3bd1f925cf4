//! Rendering module for Sandfall

pub mod palette;
mod renderer;

pub use renderer::Renderer;
