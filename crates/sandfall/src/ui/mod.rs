//! UI module for Sandfall

mod hud;

pub use hud::{HudStats, show_hud};
