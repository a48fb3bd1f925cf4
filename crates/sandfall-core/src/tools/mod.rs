//! Brush tools for painting and erasing sand

mod brush;
mod erase;
mod pen;

pub use brush::{BrushConfig, BrushState};
pub use erase::EraseTool;
pub use pen::PenTool;

use crate::grid::{Cell, Grid};

/// Trait for drawing tools
pub trait Tool {
    /// Tool display name
    fn name(&self) -> &str;

    /// Apply tool centered on grid position `(x, y)`; returns cells written
    fn apply(&self, grid: &mut Grid, x: i32, y: i32, brush_size: u32) -> usize;
}

/// Rows and columns covered by a square brush, clipped to the grid.
///
/// Returns `None` when the center itself lies outside the grid.
pub fn brush_footprint(
    grid: &Grid,
    center_x: i32,
    center_y: i32,
    size: u32,
) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
    if !grid.in_bounds(center_y, center_x) {
        return None;
    }
    let half = (size / 2) as usize;
    let (cx, cy) = (center_x as usize, center_y as usize);

    let rows = cy.saturating_sub(half)..(cy + half + 1).min(grid.height());
    let cols = cx.saturating_sub(half)..(cx + half + 1).min(grid.width());
    Some((rows, cols))
}

/// Fill the square brush around `(center_x, center_y)` with `cell`
pub fn draw_square(
    grid: &mut Grid,
    center_x: i32,
    center_y: i32,
    size: u32,
    cell: Cell,
) -> usize {
    match brush_footprint(grid, center_x, center_y, size) {
        Some((rows, cols)) => grid.fill_rect(rows, cols, cell),
        None => 0,
    }
}
