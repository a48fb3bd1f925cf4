//! Settling statistics collection

/// Sink for per-tick movement counts
///
/// Lets the engine report what it did without owning any bookkeeping.
pub trait SettleStats {
    /// Record a straight fall of `rows` rows
    fn record_fall(&mut self, rows: usize);

    /// Record a diagonal slide
    fn record_slide(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Debug, Default)]
pub struct NoopStats;

impl SettleStats for NoopStats {
    fn record_fall(&mut self, _rows: usize) {}
    fn record_slide(&mut self) {}
}

/// Counting implementation, reset by the caller whenever it reports
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    pub falls: u64,
    pub rows_fallen: u64,
    pub slides: u64,
}

impl TickStats {
    /// Total grains moved
    pub fn moves(&self) -> u64 {
        self.falls + self.slides
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SettleStats for TickStats {
    fn record_fall(&mut self, rows: usize) {
        self.falls += 1;
        self.rows_fallen += rows as u64;
    }

    fn record_slide(&mut self) {
        self.slides += 1;
    }
}
