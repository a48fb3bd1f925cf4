//! Eraser tool

use super::{Tool, draw_square};
use crate::grid::{Cell, Grid};

/// Eraser tool that empties the brush
#[derive(Debug, Default, Clone, Copy)]
pub struct EraseTool;

impl Tool for EraseTool {
    fn name(&self) -> &str {
        "Eraser"
    }

    fn apply(&self, grid: &mut Grid, x: i32, y: i32, brush_size: u32) -> usize {
        draw_square(grid, x, y, brush_size, Cell::Empty)
    }
}
