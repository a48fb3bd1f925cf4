//! # Sandfall
//!
//! Windowed falling-sand sandbox: winit event loop, wgpu renderer and an
//! egui HUD around the simulation in `sandfall-core`.

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod ui;

pub use app::App;
pub use config::SandfallConfig;
pub use error::InitError;
