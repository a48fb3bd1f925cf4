//! Settling simulation

mod rng_trait;
mod settle;
mod stats;

pub use rng_trait::SettleRng;
pub use settle::{FallMode, SettlingEngine};
pub use stats::{NoopStats, SettleStats, TickStats};
