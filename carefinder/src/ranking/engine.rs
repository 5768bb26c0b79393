//! Composite scoring and top-N selection.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::coord::{round_to, GeoPoint};
use crate::facility::{is_pediatric, FacilityRecord, RankedFacility};

use super::rating::{RandomRating, RatingSource};

/// Weight of the proximity term.
pub const PROXIMITY_WEIGHT: f64 = 0.6;

/// Added to the distance before inversion so nearby facilities stay finite.
pub const DISTANCE_SMOOTHING_KM: f64 = 0.5;

/// Weight of the normalised rating term.
pub const RATING_WEIGHT: f64 = 0.3;

/// Ratings are normalised against this maximum.
pub const MAX_RATING: f64 = 5.0;

/// Flat boost for pediatric facilities.
pub const PEDIATRIC_BOOST: f64 = 0.2;

/// Composite relevance score.
///
/// `0.6 / (distance + 0.5) + 0.3 * rating / 5 + (0.2 if pediatric)`
#[inline]
pub fn composite_score(distance_km: f64, rating: f64, is_pediatric: bool) -> f64 {
    let boost = if is_pediatric { PEDIATRIC_BOOST } else { 0.0 };
    PROXIMITY_WEIGHT * (1.0 / (distance_km + DISTANCE_SMOOTHING_KM))
        + RATING_WEIGHT * (rating / MAX_RATING)
        + boost
}

/// Max-heap entry: higher score wins, earlier input wins ties.
struct HeapEntry {
    seq: usize,
    facility: RankedFacility,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.facility
            .score
            .total_cmp(&other.facility.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// The `n` highest-scoring candidates, best first.
///
/// Equal scores keep their input order.
pub fn top_n(candidates: Vec<RankedFacility>, n: usize) -> Vec<RankedFacility> {
    let mut heap: BinaryHeap<HeapEntry> = candidates
        .into_iter()
        .enumerate()
        .map(|(seq, facility)| HeapEntry { seq, facility })
        .collect();

    let take = n.min(heap.len());
    let mut ranked = Vec::with_capacity(take);
    while ranked.len() < take {
        match heap.pop() {
            Some(entry) => ranked.push(entry.facility),
            None => break,
        }
    }
    ranked
}

/// Scores facility records against a query origin and orders them.
pub struct RankingEngine<R: RatingSource = RandomRating> {
    ratings: R,
}

impl RankingEngine<RandomRating> {
    /// Engine that synthesizes missing ratings at random.
    pub fn new() -> Self {
        Self {
            ratings: RandomRating,
        }
    }
}

impl Default for RankingEngine<RandomRating> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RatingSource> RankingEngine<R> {
    /// Engine using `ratings` for facilities without an upstream rating.
    pub fn with_rating_source(ratings: R) -> Self {
        Self { ratings }
    }

    /// Computes distance, rating, pediatric flag and score for one record.
    ///
    /// The rating is taken from the record if it is in (0, 5], otherwise
    /// drawn once from the rating source. Either way it is rounded to one
    /// decimal and that value is the one scored.
    pub fn score_candidate(&self, origin: GeoPoint, mut record: FacilityRecord) -> RankedFacility {
        let distance_km = origin.distance_km(&GeoPoint {
            lat: record.lat,
            lng: record.lng,
        });

        let rating = record
            .rating
            .take()
            .filter(|r| r.is_finite() && *r > 0.0 && *r <= MAX_RATING)
            .unwrap_or_else(|| self.ratings.sample());
        let rating = round_to(rating, 1);

        let is_pediatric = is_pediatric(&record);
        let score = composite_score(distance_km, rating, is_pediatric);

        RankedFacility {
            facility: record,
            distance_km,
            rating,
            is_pediatric,
            score,
        }
    }

    /// Scores every record and returns the best `n`, highest score first.
    pub fn rank(
        &self,
        origin: GeoPoint,
        records: Vec<FacilityRecord>,
        n: usize,
    ) -> Vec<RankedFacility> {
        let scored = records
            .into_iter()
            .map(|record| self.score_candidate(origin, record))
            .collect();
        top_n(scored, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::{FacilityType, ADDRESS_UNAVAILABLE, SPECIALITY_TAG};
    use crate::ranking::FixedRating;
    use std::collections::BTreeMap;

    const EPS: f64 = 1e-9;

    fn record(id: &str, name: &str, lat: f64, lng: f64, rating: Option<f64>) -> FacilityRecord {
        FacilityRecord {
            id: id.to_string(),
            name: name.to_string(),
            lat,
            lng,
            facility_type: FacilityType::Hospital,
            tags: BTreeMap::new(),
            address: ADDRESS_UNAVAILABLE.to_string(),
            rating,
        }
    }

    fn ranked(id: &str, score: f64) -> RankedFacility {
        RankedFacility {
            facility: record(id, id, 0.0, 0.0, None),
            distance_km: 0.0,
            rating: 4.0,
            is_pediatric: false,
            score,
        }
    }

    fn origin() -> GeoPoint {
        GeoPoint::new(40.71, -74.00).unwrap()
    }

    // =========================================================================
    // Scoring formula
    // =========================================================================

    #[test]
    fn test_score_reference_value() {
        let score = composite_score(1.0, 4.0, false);
        assert!((score - 0.64).abs() < EPS, "got {}", score);
    }

    #[test]
    fn test_pediatric_boost_delta() {
        let plain = composite_score(2.3, 4.5, false);
        let pediatric = composite_score(2.3, 4.5, true);
        assert!((pediatric - plain - PEDIATRIC_BOOST).abs() < EPS);
    }

    #[test]
    fn test_zero_distance_is_finite() {
        let score = composite_score(0.0, 5.0, false);
        assert!((score - 1.5).abs() < EPS);
    }

    #[test]
    fn test_closer_scores_higher() {
        assert!(composite_score(1.0, 4.0, false) > composite_score(5.0, 4.0, false));
    }

    // =========================================================================
    // Candidate scoring
    // =========================================================================

    #[test]
    fn test_score_candidate_uses_upstream_rating() {
        let engine = RankingEngine::with_rating_source(FixedRating(1.0));
        let r = engine.score_candidate(origin(), record("a", "Clinic", 40.71, -74.00, Some(4.8)));

        assert_eq!(r.rating, 4.8);
        assert_eq!(r.distance_km, 0.0);
        assert!(r.facility.rating.is_none());
    }

    #[test]
    fn test_score_candidate_synthesizes_missing_rating_once() {
        let engine = RankingEngine::with_rating_source(FixedRating(3.94));
        let r = engine.score_candidate(origin(), record("a", "Clinic", 40.71, -74.00, None));

        assert_eq!(r.rating, 3.9);
        let expected = composite_score(r.distance_km, 3.9, false);
        assert!((r.score - expected).abs() < EPS);
    }

    #[test]
    fn test_score_candidate_replaces_out_of_range_rating() {
        let engine = RankingEngine::with_rating_source(FixedRating(4.0));
        let r = engine.score_candidate(origin(), record("a", "Clinic", 40.71, -74.00, Some(9.0)));
        assert_eq!(r.rating, 4.0);
    }

    #[test]
    fn test_random_rating_in_range_after_rounding() {
        let engine = RankingEngine::new();
        for i in 0..200 {
            let r = engine.score_candidate(origin(), record(&i.to_string(), "X", 40.7, -74.0, None));
            assert!((3.5..=5.0).contains(&r.rating));
        }
    }

    #[test]
    fn test_pediatric_candidate_ranks_higher() {
        let engine = RankingEngine::with_rating_source(FixedRating(4.0));
        let mut pediatric = record("p", "Clinic", 40.72, -74.01, None);
        pediatric
            .tags
            .insert(SPECIALITY_TAG.to_string(), "pediatrics".to_string());
        let plain = record("q", "Clinic", 40.72, -74.01, None);

        let ranked = engine.rank(origin(), vec![plain, pediatric], 30);
        assert_eq!(ranked[0].id(), "p");
        assert!(ranked[0].is_pediatric);
        assert!((ranked[0].score - ranked[1].score - PEDIATRIC_BOOST).abs() < EPS);
    }

    // =========================================================================
    // Top-N
    // =========================================================================

    #[test]
    fn test_top_n_orders_descending() {
        let out = top_n(
            vec![ranked("a", 0.2), ranked("b", 0.9), ranked("c", 0.5)],
            10,
        );
        let ids: Vec<&str> = out.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_top_n_truncates() {
        let candidates: Vec<RankedFacility> =
            (0..100).map(|i| ranked(&i.to_string(), i as f64)).collect();
        let out = top_n(candidates, 30);

        assert_eq!(out.len(), 30);
        assert_eq!(out[0].id(), "99");
        assert_eq!(out[29].id(), "70");
        assert!(out.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_top_n_ties_keep_input_order() {
        let out = top_n(
            vec![
                ranked("first", 0.5),
                ranked("high", 0.7),
                ranked("second", 0.5),
                ranked("third", 0.5),
            ],
            4,
        );
        let ids: Vec<&str> = out.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["high", "first", "second", "third"]);
    }

    #[test]
    fn test_top_n_empty_and_zero() {
        assert!(top_n(Vec::new(), 30).is_empty());
        assert!(top_n(vec![ranked("a", 1.0)], 0).is_empty());
    }
}
