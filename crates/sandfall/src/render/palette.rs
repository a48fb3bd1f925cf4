//! CPU-side colouring of the grid
//!
//! Sand gets a per-cell blue-channel jitter that is re-rolled every frame.
//! The jitter is decoration only and never feeds back into the grid.

use std::ops::Range;

use rand::Rng;
use sandfall_core::{Cell, Grid};

/// Base colour of a sand grain (RGBA)
pub const SAND_COLOR: [u8; 4] = [255, 220, 180, 255];
/// Background colour of empty cells
pub const EMPTY_COLOR: [u8; 4] = [0, 0, 0, 255];
/// Translucent brush footprint drawn over the grid
pub const BRUSH_OVERLAY: [u8; 4] = [0, 60, 240, 150];
/// Maximum blue-channel offset applied to sand
pub const JITTER: i16 = 10;

/// Colour of a cell with the given jitter
pub fn cell_color(cell: Cell, jitter: i16) -> [u8; 4] {
    match cell {
        Cell::Sand => {
            let blue = (i16::from(SAND_COLOR[2]) + jitter).clamp(0, 255) as u8;
            [SAND_COLOR[0], SAND_COLOR[1], blue, SAND_COLOR[3]]
        }
        Cell::Empty => EMPTY_COLOR,
    }
}

/// Alpha-blend `overlay` onto an opaque `base`
pub fn blend(base: [u8; 4], overlay: [u8; 4]) -> [u8; 4] {
    let alpha = overlay[3] as f32 / 255.0;
    let mix = |o: u8, b: u8| ((o as f32 * alpha) + (b as f32 * (1.0 - alpha))).round() as u8;
    [
        mix(overlay[0], base[0]),
        mix(overlay[1], base[1]),
        mix(overlay[2], base[2]),
        base[3],
    ]
}

/// Write the grid into an RGBA8 buffer of `width * height * 4` bytes.
///
/// `footprint` is the brush area as `(rows, cols)`, tinted with [`BRUSH_OVERLAY`].
pub fn fill_pixels<R: Rng>(
    grid: &Grid,
    footprint: Option<&(Range<usize>, Range<usize>)>,
    rng: &mut R,
    out: &mut [u8],
) {
    let width = grid.width();
    for (row, cells) in grid.rows().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            let jitter = match cell {
                Cell::Sand => rng.random_range(-JITTER..=JITTER),
                Cell::Empty => 0,
            };
            let mut color = cell_color(cell, jitter);
            let in_brush =
                footprint.is_some_and(|(rows, cols)| rows.contains(&row) && cols.contains(&col));
            if in_brush {
                color = blend(color, BRUSH_OVERLAY);
            }

            let idx = (row * width + col) * 4;
            if let Some(pixel) = out.get_mut(idx..idx + 4) {
                pixel.copy_from_slice(&color);
            }
        }
    }
}
