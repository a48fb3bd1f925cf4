//! Configuration for Sandfall

use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

use sandfall_core::SimulationSettings;

use crate::error::InitError;

/// Largest window or grid edge the default wgpu limits can back with a texture
pub fn max_texture_edge() -> u32 {
    wgpu::Limits::default().max_texture_dimension_2d
}

/// `cells * pixel_size` as a window edge, if it fits in a texture
fn canvas_edge(cells: usize, pixel_size: u32) -> Option<u32> {
    u32::try_from(cells)
        .ok()?
        .checked_mul(pixel_size)
        .filter(|&edge| edge <= max_texture_edge())
}

/// Main configuration, built from compiled-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandfallConfig {
    /// Window title
    pub title: String,
    /// Grid size, pixel scale, brush bounds and fall mode
    pub simulation: SimulationSettings,
    /// Seed for the settling rule and initial noise; `None` uses the clock
    pub seed: Option<u64>,
    /// Show FPS / grain count overlay
    pub show_hud: bool,
}

impl Default for SandfallConfig {
    fn default() -> Self {
        Self {
            title: "Falling Sand Simulation".to_string(),
            simulation: SimulationSettings::default(),
            seed: None,
            show_hud: true,
        }
    }
}

impl SandfallConfig {
    /// Load config with defaults
    pub fn load() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), InitError> {
        let sim = &self.simulation;
        if sim.width == 0 || sim.height == 0 {
            return Err(InitError::InvalidConfig(format!(
                "grid must not be empty ({}x{})",
                sim.width, sim.height
            )));
        }
        if sim.pixel_size == 0 {
            return Err(InitError::InvalidConfig("pixel size must be at least 1".into()));
        }
        if canvas_edge(sim.width, sim.pixel_size).is_none()
            || canvas_edge(sim.height, sim.pixel_size).is_none()
        {
            return Err(InitError::InvalidConfig(format!(
                "{}x{} cells at pixel size {} exceed the {} pixel window limit",
                sim.width,
                sim.height,
                sim.pixel_size,
                max_texture_edge()
            )));
        }
        if !(0.0..=1.0).contains(&sim.initial_density) {
            return Err(InitError::InvalidConfig(format!(
                "initial density {} is outside 0..=1",
                sim.initial_density
            )));
        }
        sim.brush.validate()?;
        Ok(())
    }

    /// Window inner size in physical pixels, saturating for configs that
    /// [`validate`](Self::validate) would reject
    pub fn window_size(&self) -> (u32, u32) {
        let sim = &self.simulation;
        let edge = |cells: usize| {
            u32::try_from(cells)
                .unwrap_or(u32::MAX)
                .saturating_mul(sim.pixel_size)
        };
        (edge(sim.width), edge(sim.height))
    }

    /// Configured seed, or one derived from the current time
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
