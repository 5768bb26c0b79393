//! Facility ranking.
//!
//! Every candidate gets a composite score blending proximity, rating and a
//! pediatric-specialty boost:
//!
//! ```text
//! score = 0.6 * (1 / (distance_km + 0.5)) + 0.3 * (rating / 5) + boost
//! boost = 0.2 if pediatric else 0
//! ```
//!
//! Candidates are pushed onto a `BinaryHeap` and popped best-first until the
//! requested count is reached.

mod engine;
mod rating;

pub use engine::{
    composite_score, top_n, RankingEngine, DISTANCE_SMOOTHING_KM, MAX_RATING, PEDIATRIC_BOOST,
    PROXIMITY_WEIGHT, RATING_WEIGHT,
};
pub use rating::{
    FixedRating, RandomRating, RatingSource, MAX_SYNTHETIC_RATING, MIN_SYNTHETIC_RATING,
};
