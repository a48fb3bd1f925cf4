//! # Sandfall Core
//!
//! Falling-sand simulation without any window or GPU dependency: a dense
//! [`Grid`] of cells, the [`SettlingEngine`] gravity rule, square brush
//! tools and the [`SimulationState`] that ties them to pointer input.

pub mod error;
pub mod grid;
pub mod input;
pub mod simulation;
pub mod state;
pub mod tools;

pub use error::{SimError, SimResult};
pub use grid::{Cell, Grid};
pub use input::{InputEvent, InputSource, PointerButton, PointerState};
pub use simulation::{FallMode, NoopStats, SettleRng, SettleStats, SettlingEngine, TickStats};
pub use state::{FrameOutcome, SimulationSettings, SimulationState};
pub use tools::{BrushConfig, BrushState, EraseTool, PenTool, Tool};
