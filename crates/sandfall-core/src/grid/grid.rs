//! Row-major grid of cells with bounds-checked access

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::Cell;
use crate::error::{SimError, SimResult};
use crate::simulation::SettleRng;

/// Fixed-size 2D grid, row 0 at the top.
///
/// Dimensions are set at construction and never change. Public accessors
/// return [`SimError::OutOfBounds`] instead of panicking; the settling
/// engine and tools use the crate-internal accessors after clipping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Unvalidated serialized form of a [`Grid`]
#[derive(Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = SimError;

    fn try_from(raw: RawGrid) -> SimResult<Self> {
        let expected = raw.width.checked_mul(raw.height);
        if expected != Some(raw.cells.len()) {
            return Err(SimError::CellCountMismatch {
                width: raw.width,
                height: raw.height,
                cells: raw.cells.len(),
            });
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Create a grid where each cell is independently sand with `density` probability
    pub fn random<R: SettleRng + ?Sized>(
        width: usize,
        height: usize,
        density: f32,
        rng: &mut R,
    ) -> Self {
        let mut grid = Self::new(width, height);
        grid.randomize(density, rng);
        grid
    }

    /// Build a grid from rows of cells. All rows must share the first row's length.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height: rows.len(),
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether signed coordinates fall inside the grid
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    fn checked_index(&self, row: usize, col: usize) -> SimResult<usize> {
        if row < self.height && col < self.width {
            Ok(row * self.width + col)
        } else {
            Err(SimError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            })
        }
    }

    /// Read a cell
    pub fn get(&self, row: usize, col: usize) -> SimResult<Cell> {
        let idx = self.checked_index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Write a cell
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> SimResult<()> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Exchange two cells. Both positions are validated before anything is written.
    pub fn swap(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) -> SimResult<()> {
        let a = self.checked_index(r1, c1)?;
        let b = self.checked_index(r2, c2)?;
        self.cells.swap(a, b);
        Ok(())
    }

    /// Unchecked read for callers that already clipped their coordinates
    pub(crate) fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    pub(crate) fn swap_cells(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) {
        self.cells.swap(r1 * self.width + c1, r2 * self.width + c2);
    }

    /// Write `cell` into the rectangle, clipped to the grid. Returns cells written.
    pub fn fill_rect(&mut self, rows: Range<usize>, cols: Range<usize>, cell: Cell) -> usize {
        let rows = rows.start.min(self.height)..rows.end.min(self.height);
        let cols = cols.start.min(self.width)..cols.end.min(self.width);
        if cols.is_empty() {
            return 0;
        }

        let mut written = 0;
        for row in rows {
            let start = row * self.width;
            self.cells[start + cols.start..start + cols.end].fill(cell);
            written += cols.len();
        }
        written
    }

    /// Set every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Refill every cell with noise of the given sand density
    pub fn randomize<R: SettleRng + ?Sized>(&mut self, density: f32, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = if rng.check_probability(density) {
                Cell::Sand
            } else {
                Cell::Empty
            };
        }
    }

    /// Number of cells holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }
}
