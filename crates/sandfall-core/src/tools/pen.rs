//! Pen tool for drawing sand

use super::{Tool, draw_square};
use crate::grid::{Cell, Grid};

/// Pen tool that fills the brush with sand
#[derive(Debug, Default, Clone, Copy)]
pub struct PenTool;

impl Tool for PenTool {
    fn name(&self) -> &str {
        "Pen"
    }

    fn apply(&self, grid: &mut Grid, x: i32, y: i32, brush_size: u32) -> usize {
        draw_square(grid, x, y, brush_size, Cell::Sand)
    }
}
