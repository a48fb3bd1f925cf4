//! Random source used by the settling rule and grid noise
//!
//! The engine never reaches for an ambient generator. Callers hand in
//! anything implementing [`SettleRng`]:
//! - a seeded `rand` generator (the native app, tests)
//! - a scripted source that replays fixed choices (unit tests)

/// Random number source for the simulation
pub trait SettleRng {
    /// Random boolean with 50% probability
    fn coin_flip(&mut self) -> bool;

    /// Random f32 in [0.0, 1.0)
    fn unit_f32(&mut self) -> f32;

    /// Check if a random value is less than the probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.unit_f32() < probability
    }
}

// Covers thread-local and seeded generators alike
impl<T: rand::Rng> SettleRng for T {
    fn coin_flip(&mut self) -> bool {
        self.random::<bool>()
    }

    fn unit_f32(&mut self) -> f32 {
        self.random::<f32>()
    }
}
