//! Dense cell storage

mod cell;
#[allow(clippy::module_inception)]
mod grid;

pub use cell::Cell;
pub use grid::Grid;
