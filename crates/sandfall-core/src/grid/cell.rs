//! Cell states

use serde::{Deserialize, Serialize};

/// A single cell in the grid
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Sand,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn is_sand(self) -> bool {
        self == Cell::Sand
    }
}
