//! Gravity settling rule for sand grains
//!
//! Columns are scanned left to right, each one bottom-up starting at the
//! second-to-last row (the bottom row is the floor and never moves). A sand
//! grain with an empty cell below falls; otherwise it tries one diagonal
//! below, picking the side at random except at the grid edges where the
//! inward side is forced.

use serde::{Deserialize, Serialize};

use super::{SettleRng, SettleStats};
use crate::grid::Grid;

/// How far a grain falls when the cell below it is empty
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallMode {
    /// Exactly one row per tick
    #[default]
    Step,
    /// Down to the bottom of the contiguous empty run below the grain
    Telescope,
}

/// Advances a [`Grid`] one settling tick at a time
#[derive(Debug, Default, Clone)]
pub struct SettlingEngine {
    mode: FallMode,
    /// Rows of the current column that received a grain sliding in from the left
    arrived: Vec<bool>,
    /// Same for the column to the right of the current one
    arrived_next: Vec<bool>,
}

impl SettlingEngine {
    pub fn new(mode: FallMode) -> Self {
        Self {
            mode,
            arrived: Vec::new(),
            arrived_next: Vec::new(),
        }
    }

    pub fn mode(&self) -> FallMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: FallMode) {
        self.mode = mode;
    }

    /// Run one settling tick over the whole grid.
    ///
    /// Every grain moves at most once per tick. The only randomness consumed
    /// is one coin flip per blocked grain in an interior column, so the result
    /// is a pure function of the grid and the random sequence.
    pub fn tick<R: SettleRng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        stats: &mut dyn SettleStats,
    ) {
        let width = grid.width();
        let height = grid.height();
        if width == 0 || height < 2 {
            return;
        }

        self.arrived.clear();
        self.arrived.resize(height, false);
        self.arrived_next.clear();
        self.arrived_next.resize(height, false);

        for col in 0..width {
            std::mem::swap(&mut self.arrived, &mut self.arrived_next);
            self.arrived_next.fill(false);

            for row in (0..height - 1).rev() {
                if self.arrived[row] || !grid.cell(row, col).is_sand() {
                    continue;
                }

                if grid.cell(row + 1, col).is_empty() {
                    let landing = match self.mode {
                        FallMode::Step => row + 1,
                        FallMode::Telescope => empty_run_end(grid, row + 1, col),
                    };
                    // Rows between the old and new position are all empty now,
                    // so the scan simply continues above the vacated cell.
                    grid.swap_cells(row, col, landing, col);
                    stats.record_fall(landing - row);
                    continue;
                }

                let Some(target) = diagonal_target(col, width, rng) else {
                    continue;
                };
                if grid.cell(row + 1, target).is_empty() {
                    grid.swap_cells(row, col, row + 1, target);
                    if target > col {
                        self.arrived_next[row + 1] = true;
                    }
                    stats.record_slide();
                }
            }
        }
    }
}

/// Last empty row of the run starting at `start` (which must be empty)
fn empty_run_end(grid: &Grid, start: usize, col: usize) -> usize {
    let mut row = start;
    while row + 1 < grid.height() && grid.cell(row + 1, col).is_empty() {
        row += 1;
    }
    row
}

/// Column a blocked grain tries to slide into, if any
fn diagonal_target<R: SettleRng + ?Sized>(
    col: usize,
    width: usize,
    rng: &mut R,
) -> Option<usize> {
    if width < 2 {
        None
    } else if col == 0 {
        Some(1)
    } else if col == width - 1 {
        Some(col - 1)
    } else if rng.coin_flip() {
        Some(col + 1)
    } else {
        Some(col - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::simulation::{NoopStats, TickStats};
    use std::collections::VecDeque;

    use crate::grid::Cell::{Empty as E, Sand as S};

    /// Replays fixed coin flips, then repeats the fallback
    struct Scripted {
        flips: VecDeque<bool>,
        fallback: bool,
        calls: usize,
    }

    impl Scripted {
        fn new(flips: &[bool], fallback: bool) -> Self {
            Self {
                flips: flips.iter().copied().collect(),
                fallback,
                calls: 0,
            }
        }

        fn always(side: bool) -> Self {
            Self {
                flips: VecDeque::new(),
                fallback: side,
                calls: 0,
            }
        }
    }

    impl SettleRng for Scripted {
        fn coin_flip(&mut self) -> bool {
            self.calls += 1;
            self.flips.pop_front().unwrap_or(self.fallback)
        }

        fn unit_f32(&mut self) -> f32 {
            0.5
        }
    }

    fn grid(rows: &[&[Cell]]) -> Grid {
        let rows: Vec<Vec<Cell>> = rows.iter().map(|r| r.to_vec()).collect();
        Grid::from_rows(&rows).unwrap()
    }

    fn tick(engine: &mut SettlingEngine, grid: &mut Grid, rng: &mut Scripted) {
        engine.tick(grid, rng, &mut NoopStats);
    }

    #[test]
    fn test_single_grain_falls_one_row() {
        let mut g = grid(&[&[E, S, E], &[E, E, E], &[E, E, E]]);
        let mut engine = SettlingEngine::default();
        tick(&mut engine, &mut g, &mut Scripted::always(true));

        assert_eq!(g, grid(&[&[E, E, E], &[E, S, E], &[E, E, E]]));
    }

    #[test]
    fn test_telescope_falls_to_bottom_of_run() {
        let mut g = grid(&[&[E, S, E], &[E, E, E], &[E, E, E]]);
        let mut engine = SettlingEngine::new(FallMode::Telescope);
        tick(&mut engine, &mut g, &mut Scripted::always(true));

        assert_eq!(g, grid(&[&[E, E, E], &[E, E, E], &[E, S, E]]));
    }

    #[test]
    fn test_telescope_stops_on_obstacle() {
        let mut g = grid(&[&[S], &[E], &[E], &[S], &[E]]);
        let mut engine = SettlingEngine::new(FallMode::Telescope);
        let mut stats = TickStats::default();
        engine.tick(&mut g, &mut Scripted::always(true), &mut stats);

        // The lower grain drops to the floor first, so the upper one
        // telescopes through the cell it vacated
        assert_eq!(g, grid(&[&[E], &[E], &[E], &[S], &[S]]));
        assert_eq!(stats.falls, 2);
        assert_eq!(stats.rows_fallen, 4);
    }

    #[test]
    fn test_column_of_grains_moves_together_in_step_mode() {
        let mut g = grid(&[&[S], &[S], &[E]]);
        let mut engine = SettlingEngine::default();
        tick(&mut engine, &mut g, &mut Scripted::always(true));

        assert_eq!(g, grid(&[&[E], &[S], &[S]]));
    }

    #[test]
    fn test_floor_row_never_moves() {
        let mut g = grid(&[&[E, E, E], &[S, E, S]]);
        let mut engine = SettlingEngine::default();
        tick(&mut engine, &mut g, &mut Scripted::always(false));

        assert_eq!(g, grid(&[&[E, E, E], &[S, E, S]]));
    }

    #[test]
    fn test_left_edge_forced_right() {
        // Grain at column 0 sits on sand; the rng always says "left"
        let mut g = grid(&[&[S, E, E], &[S, E, E]]);
        let mut engine = SettlingEngine::default();
        let mut rng = Scripted::always(false);
        tick(&mut engine, &mut g, &mut rng);

        assert_eq!(g, grid(&[&[E, E, E], &[S, S, E]]));
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn test_right_edge_forced_left() {
        let mut g = grid(&[&[E, E, S], &[E, E, S]]);
        let mut engine = SettlingEngine::default();
        let mut rng = Scripted::always(true);
        tick(&mut engine, &mut g, &mut rng);

        assert_eq!(g, grid(&[&[E, E, E], &[E, S, S]]));
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn test_single_column_never_slides() {
        let mut g = grid(&[&[S], &[S]]);
        let mut engine = SettlingEngine::default();
        tick(&mut engine, &mut g, &mut Scripted::always(true));

        assert_eq!(g, grid(&[&[S], &[S]]));
    }

    #[test]
    fn test_interior_follows_coin() {
        let start = grid(&[&[E, S, E], &[E, S, E]]);

        let mut right = start.clone();
        tick(&mut SettlingEngine::default(), &mut right, &mut Scripted::always(true));
        assert_eq!(right, grid(&[&[E, E, E], &[E, S, S]]));

        let mut left = start;
        tick(&mut SettlingEngine::default(), &mut left, &mut Scripted::always(false));
        assert_eq!(left, grid(&[&[E, E, E], &[S, S, E]]));
    }

    #[test]
    fn test_blocked_diagonal_stays() {
        // Only the chosen diagonal is tried
        let mut g = grid(&[&[E, S, E], &[E, S, S]]);
        let mut engine = SettlingEngine::default();
        tick(&mut engine, &mut g, &mut Scripted::always(true));

        assert_eq!(g, grid(&[&[E, S, E], &[E, S, S]]));
    }

    #[test]
    fn test_slide_right_moves_once_per_tick() {
        // The lower grain in column 1 tries left and is blocked; the upper one
        // slides right over an empty cell and must not fall again this tick
        let mut g = grid(&[&[E, S, E], &[E, S, E], &[S, S, E]]);
        let mut engine = SettlingEngine::default();
        let mut stats = TickStats::default();
        engine.tick(&mut g, &mut Scripted::new(&[false, true], false), &mut stats);

        assert_eq!(g, grid(&[&[E, E, E], &[E, S, S], &[S, S, E]]));
        assert_eq!(stats.slides, 1);
        assert_eq!(stats.falls, 0);

        engine.tick(&mut g, &mut Scripted::always(false), &mut stats);
        assert_eq!(g, grid(&[&[E, E, E], &[E, S, E], &[S, S, S]]));
        assert_eq!(stats.falls, 1);
    }

    #[test]
    fn test_degenerate_grids_are_untouched() {
        let mut engine = SettlingEngine::default();
        let mut rng = Scripted::always(true);

        let mut one_row = grid(&[&[S, E, S]]);
        tick(&mut engine, &mut one_row, &mut rng);
        assert_eq!(one_row, grid(&[&[S, E, S]]));

        let mut empty = Grid::new(0, 0);
        tick(&mut engine, &mut empty, &mut rng);
        assert_eq!(empty, Grid::new(0, 0));
    }

    #[test]
    fn test_mode_switch() {
        let mut engine = SettlingEngine::default();
        assert_eq!(engine.mode(), FallMode::Step);
        engine.set_mode(FallMode::Telescope);
        assert_eq!(engine.mode(), FallMode::Telescope);
    }
}
