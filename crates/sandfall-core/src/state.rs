//! Owned simulation context: grid, brush, pointer and settling engine
//!
//! One frame is a strict sequence: drain pending input, apply the brush,
//! run one settling tick. Rendering reads the grid afterwards.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::grid::{Cell, Grid};
use crate::input::{InputEvent, InputSource, PointerState};
use crate::simulation::{FallMode, SettleRng, SettleStats, SettlingEngine};
use crate::tools::{BrushConfig, BrushState, EraseTool, PenTool, Tool, brush_footprint};

/// Fixed parameters of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Window pixels per cell edge
    pub pixel_size: u32,
    pub brush: BrushConfig,
    pub fall_mode: FallMode,
    /// Probability that a cell starts (or resets) as sand
    pub initial_density: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            pixel_size: 3,
            brush: BrushConfig::default(),
            fall_mode: FallMode::Step,
            initial_density: 0.5,
        }
    }
}

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Shutdown,
}

/// Everything the simulation mutates, owned in one place
#[derive(Debug, Clone)]
pub struct SimulationState {
    grid: Grid,
    brush: BrushState,
    pointer: PointerState,
    engine: SettlingEngine,
    pen: PenTool,
    eraser: EraseTool,
    pixel_size: u32,
    density: f32,
    paused: bool,
    step_requested: bool,
}

impl SimulationState {
    /// Create a state whose grid starts as random noise
    pub fn new<R: SettleRng + ?Sized>(
        settings: &SimulationSettings,
        rng: &mut R,
    ) -> SimResult<Self> {
        let mut grid = Grid::new(settings.width, settings.height);
        grid.randomize(settings.initial_density, rng);
        Self::with_grid(grid, settings)
    }

    /// Create a state around an existing grid; the grid keeps its own dimensions
    pub fn with_grid(grid: Grid, settings: &SimulationSettings) -> SimResult<Self> {
        Ok(Self {
            grid,
            brush: BrushState::new(settings.brush)?,
            pointer: PointerState::new(),
            engine: SettlingEngine::new(settings.fall_mode),
            pen: PenTool,
            eraser: EraseTool,
            pixel_size: settings.pixel_size,
            density: settings.initial_density,
            paused: false,
            step_requested: false,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    pub fn fall_mode(&self) -> FallMode {
        self.engine.mode()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn sand_count(&self) -> usize {
        self.grid.count(Cell::Sand)
    }

    /// Run one frame: drain input, paint, settle.
    ///
    /// Returns [`FrameOutcome::Shutdown`] as soon as a shutdown event is seen;
    /// the rest of that frame is skipped.
    pub fn advance<I, R>(
        &mut self,
        input: &mut I,
        rng: &mut R,
        stats: &mut dyn SettleStats,
    ) -> FrameOutcome
    where
        I: InputSource + ?Sized,
        R: SettleRng + ?Sized,
    {
        while let Some(event) = input.poll_event() {
            if self.handle_event(event, rng) == FrameOutcome::Shutdown {
                return FrameOutcome::Shutdown;
            }
        }

        self.apply_brush();

        if !self.paused || self.step_requested {
            self.engine.tick(&mut self.grid, rng, stats);
            self.step_requested = false;
        }

        FrameOutcome::Continue
    }

    /// Update state for a single input event
    pub fn handle_event<R: SettleRng + ?Sized>(
        &mut self,
        event: InputEvent,
        rng: &mut R,
    ) -> FrameOutcome {
        match event {
            InputEvent::ButtonPressed(button) => self.pointer.set_button(button, true),
            InputEvent::ButtonReleased(button) => self.pointer.set_button(button, false),
            InputEvent::PointerMoved { x, y } => self.pointer.position = Some((x, y)),
            InputEvent::PointerLeft => self.pointer.leave(),
            InputEvent::Wheel(delta) => {
                self.brush.adjust(delta);
            }
            InputEvent::TogglePause => {
                self.paused = !self.paused;
                log::info!("Simulation {}", if self.paused { "paused" } else { "resumed" });
            }
            InputEvent::Step => {
                if self.paused {
                    self.step_requested = true;
                }
            }
            InputEvent::Clear => {
                self.grid.clear();
                log::info!("Grid cleared");
            }
            InputEvent::Reset => {
                self.grid.randomize(self.density, rng);
                log::info!("Grid reset with density {:.2}", self.density);
            }
            InputEvent::Shutdown => return FrameOutcome::Shutdown,
        }
        FrameOutcome::Continue
    }

    /// Paint or erase under the pointer. Painting wins when both buttons are held.
    pub fn apply_brush(&mut self) -> usize {
        let Some((x, y)) = self.pointer.grid_position(self.pixel_size) else {
            return 0;
        };
        let size = self.brush.size();
        let tool: &dyn Tool = if self.pointer.painting {
            &self.pen
        } else if self.pointer.erasing {
            &self.eraser
        } else {
            return 0;
        };
        tool.apply(&mut self.grid, x, y, size)
    }

    /// Tool the held buttons select, if any
    pub fn active_tool(&self) -> Option<&dyn Tool> {
        if self.pointer.painting {
            Some(&self.pen)
        } else if self.pointer.erasing {
            Some(&self.eraser)
        } else {
            None
        }
    }

    /// Cells the brush would cover at the current pointer position
    pub fn brush_footprint(&self) -> Option<(Range<usize>, Range<usize>)> {
        let (x, y) = self.pointer.grid_position(self.pixel_size)?;
        brush_footprint(&self.grid, x, y, self.brush.size())
    }
}
