//! Brush size state driven by the scroll wheel

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Brush bounds and step size
///
/// Sizes are odd so the square brush has a center cell; an even step keeps
/// every reachable size odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Smallest brush edge in cells
    pub min_size: u32,
    /// Largest brush edge in cells
    pub max_size: u32,
    /// Change per wheel notch
    pub step: u32,
    /// Size at startup, clamped into bounds
    pub initial_size: u32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            min_size: 1,
            max_size: 15,
            step: 2,
            initial_size: 1,
        }
    }
}

impl BrushConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.min_size == 0 || self.min_size > self.max_size {
            return Err(SimError::InvalidBrush {
                min: self.min_size,
                max: self.max_size,
            });
        }
        for size in [self.min_size, self.max_size, self.initial_size] {
            if size % 2 == 0 {
                return Err(SimError::EvenBrushSize { size });
            }
        }
        if self.step % 2 != 0 {
            return Err(SimError::OddBrushStep { step: self.step });
        }
        Ok(())
    }
}

/// Current brush size, always within the configured bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushState {
    size: u32,
    config: BrushConfig,
}

impl BrushState {
    pub fn new(config: BrushConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            size: config.initial_size.clamp(config.min_size, config.max_size),
            config,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Apply a wheel delta: positive grows, negative shrinks, zero is ignored.
    ///
    /// Only the sign matters; each event moves one step. Returns whether
    /// the size changed.
    pub fn adjust(&mut self, delta: f32) -> bool {
        let before = self.size;
        if delta > 0.0 {
            self.size = self
                .size
                .saturating_add(self.config.step)
                .min(self.config.max_size);
        } else if delta < 0.0 {
            self.size = self
                .size
                .saturating_sub(self.config.step)
                .max(self.config.min_size);
        }

        if self.size != before {
            log::debug!("Brush size {} -> {}", before, self.size);
        }
        self.size != before
    }
}
