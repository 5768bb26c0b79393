//! Rating sources for facilities without an upstream rating.

use rand::Rng;

/// Lower bound of synthesized ratings.
pub const MIN_SYNTHETIC_RATING: f64 = 3.5;

/// Upper bound of synthesized ratings.
pub const MAX_SYNTHETIC_RATING: f64 = 5.0;

/// Supplies a rating for a facility that has none.
///
/// Called at most once per candidate per request; the value is stored on the
/// ranked result and never re-drawn.
pub trait RatingSource: Send + Sync {
    fn sample(&self) -> f64;
}

/// Uniform random rating in [3.5, 5.0].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRating;

impl RatingSource for RandomRating {
    fn sample(&self) -> f64 {
        rand::thread_rng().gen_range(MIN_SYNTHETIC_RATING..=MAX_SYNTHETIC_RATING)
    }
}

/// Constant rating, for reproducible rankings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRating(pub f64);

impl RatingSource for FixedRating {
    fn sample(&self) -> f64 {
        self.0
    }
}
