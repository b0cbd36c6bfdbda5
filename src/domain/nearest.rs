use crate::domain::{Coordinate, distance};

/// Anything with a fixed position that can take part in a nearest search.
pub trait Located {
    fn coordinate(&self) -> Coordinate;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Candidate<T> {
    pub coordinate: Coordinate,
    pub value: T,
}

impl<T> Candidate<T> {
    pub fn new(coordinate: Coordinate, value: T) -> Self {
        Candidate { coordinate, value }
    }
}

impl<T: Located> From<T> for Candidate<T> {
    fn from(value: T) -> Self {
        Candidate::new(value.coordinate(), value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NearestResult<T> {
    Found { candidate: Candidate<T>, distance: f64 },
    Empty,
}

impl<T> NearestResult<T> {
    pub fn into_value(self) -> Option<T> {
        match self {
            NearestResult::Found { candidate, .. } => Some(candidate.value),
            NearestResult::Empty => None,
        }
    }

    pub fn distance(&self) -> Option<f64> {
        match self {
            NearestResult::Found { distance, .. } => Some(*distance),
            NearestResult::Empty => None,
        }
    }
}

/// How candidates are measured against the query point.
pub trait Metric {
    fn distance(&self, query: Coordinate, candidate: Coordinate) -> f64;

    /// Whether `distance` strictly improves on `best`. Implementations must keep this a strict comparison,
    /// otherwise equidistant candidates no longer resolve to the earliest one.
    fn improves(&self, distance: f64, best: f64) -> bool {
        distance < best
    }
}

/// Euclidean distance over raw latitude and longitude values, ignoring the curvature of the earth.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatPlane;

impl Metric for FlatPlane {
    fn distance(&self, query: Coordinate, candidate: Coordinate) -> f64 {
        distance(candidate, query)
    }
}

#[derive(Clone, Copy, Debug)]
struct Best {
    index: usize,
    distance: f64,
}

/// Linear scan for the candidate closest to a query point.
///
/// Every candidate is measured exactly once and the best one is only replaced on a strict improvement, so
/// the first of several equidistant candidates wins. No spatial index is kept, candidate sets are expected
/// to be small.
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestPointFinder<M = FlatPlane> {
    metric: M,
}

impl NearestPointFinder<FlatPlane> {
    pub fn new() -> Self {
        NearestPointFinder { metric: FlatPlane }
    }
}

impl<M: Metric> NearestPointFinder<M> {
    #[cfg(test)]
    pub fn with_metric(metric: M) -> Self {
        NearestPointFinder { metric }
    }

    pub fn find_nearest<T>(&self, query: Coordinate, candidates: Vec<Candidate<T>>) -> NearestResult<T> {
        let mut best: Option<Best> = None;

        for (index, candidate) in candidates.iter().enumerate() {
            let distance = self.metric.distance(query, candidate.coordinate);
            best = match best {
                None => Some(Best { index, distance }),
                Some(current) if self.metric.improves(distance, current.distance) => Some(Best { index, distance }),
                keep => keep,
            };
        }

        let Some(best) = best else {
            return NearestResult::Empty;
        };

        match candidates.into_iter().nth(best.index) {
            Some(candidate) => NearestResult::Found {
                candidate,
                distance: best.distance,
            },
            None => NearestResult::Empty,
        }
    }
}

/// Finds the nearest of `items` to `query` using the flat-plane metric.
pub fn find_nearest<T: Located>(query: Coordinate, items: impl IntoIterator<Item = T>) -> NearestResult<T> {
    NearestPointFinder::new().find_nearest(query, items.into_iter().map(Candidate::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::cell::Cell;

    fn candidates(points: &[(f64, f64)]) -> Vec<Candidate<usize>> {
        points
            .iter()
            .enumerate()
            .map(|(i, (lat, long))| Candidate::new(Coordinate::new(*lat, *long), i))
            .collect()
    }

    #[derive(Default)]
    struct CountingMetric {
        evaluations: Cell<usize>,
        comparisons: Cell<usize>,
    }

    impl Metric for CountingMetric {
        fn distance(&self, query: Coordinate, candidate: Coordinate) -> f64 {
            self.evaluations.set(self.evaluations.get() + 1);
            FlatPlane.distance(query, candidate)
        }

        fn improves(&self, distance: f64, best: f64) -> bool {
            self.comparisons.set(self.comparisons.get() + 1);
            distance < best
        }
    }

    #[test]
    fn returns_empty_without_candidates() {
        let result = NearestPointFinder::new().find_nearest::<usize>(Coordinate::new(1.0, 2.0), vec![]);
        assert_eq!(result, NearestResult::Empty);
    }

    #[test]
    fn finds_the_closest_candidate() {
        let result = NearestPointFinder::new().find_nearest(
            Coordinate::new(10.0, 10.0),
            candidates(&[(0.0, 0.0), (10.0, 10.1), (20.0, 20.0)]),
        );

        let NearestResult::Found { candidate, distance } = result else {
            panic!("expected a candidate, found {:?}", result);
        };
        assert_eq!(candidate.value, 1);
        assert_eq!(candidate.coordinate, Coordinate::new(10.0, 10.1));
        assert_abs_diff_eq!(distance, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn first_candidate_wins_a_tie() {
        let result = NearestPointFinder::new().find_nearest(Coordinate::new(0.0, 0.0), candidates(&[(1.0, 0.0), (0.0, 1.0)]));

        assert_eq!(result.distance(), Some(1.0));
        assert_eq!(result.into_value(), Some(0));
    }

    #[test]
    fn earliest_of_several_equidistant_candidates_wins_after_a_farther_seed() {
        let result = NearestPointFinder::new().find_nearest(
            Coordinate::new(0.0, 0.0),
            candidates(&[(5.0, 5.0), (0.0, -2.0), (2.0, 0.0), (-2.0, 0.0), (0.0, 2.0)]),
        );
        assert_eq!(result.into_value(), Some(1));
    }

    #[rstest]
    #[case(Coordinate::new(5.0, 5.0))]
    #[case(Coordinate::new(-80.0, 170.0))]
    #[case(Coordinate::new(1e6, -1e6))]
    fn single_candidate_is_always_returned(#[case] query: Coordinate) {
        let result = NearestPointFinder::new().find_nearest(query, candidates(&[(5.0, 5.0)]));
        assert_eq!(result.into_value(), Some(0));
    }

    #[test]
    fn accepts_out_of_range_coordinates() {
        let result = NearestPointFinder::new().find_nearest(
            Coordinate::new(120.0, 400.0),
            candidates(&[(-95.0, -200.0), (91.0, 181.0)]),
        );
        assert_eq!(result.into_value(), Some(1));
    }

    #[test]
    fn result_is_never_farther_than_any_other_candidate() {
        let points: Vec<(f64, f64)> = (0..50)
            .map(|i| {
                let i = i as f64;
                ((i * 7.3) % 11.0 - 5.0, (i * 3.1) % 13.0 - 6.5)
            })
            .collect();
        let queries = [Coordinate::new(0.0, 0.0), Coordinate::new(-4.2, 3.3), Coordinate::new(5.0, -6.0)];

        for query in queries {
            let result = NearestPointFinder::new().find_nearest(query, candidates(&points));
            let best = result.distance().expect("candidates are not empty");
            for (lat, long) in &points {
                assert!(best <= distance_of(query, *lat, *long), "{} is farther than ({}, {})", best, lat, long);
            }
        }
    }

    fn distance_of(query: Coordinate, latitude: f64, longitude: f64) -> f64 {
        query.distance_to(&Coordinate::new(latitude, longitude))
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(17)]
    fn scans_every_candidate_exactly_once(#[case] n: usize) {
        let metric = CountingMetric::default();
        let finder = NearestPointFinder::with_metric(metric);
        // Closest candidate first, so an early exit would be observable.
        let points: Vec<(f64, f64)> = (0..n).map(|i| (i as f64, 0.0)).collect();

        finder.find_nearest(Coordinate::new(0.0, 0.0), candidates(&points));

        assert_eq!(finder.metric.evaluations.get(), n);
        assert_eq!(finder.metric.comparisons.get(), n - 1);
    }

    #[derive(Debug, PartialEq)]
    struct Stop(&'static str, f64, f64);

    impl Located for Stop {
        fn coordinate(&self) -> Coordinate {
            Coordinate::new(self.1, self.2)
        }
    }

    #[test]
    fn find_nearest_returns_the_located_value() {
        let stops = vec![Stop("far", 3.0, 3.0), Stop("near", 0.5, 0.5)];
        assert_eq!(find_nearest(Coordinate::new(0.0, 0.0), stops).into_value(), Some(Stop("near", 0.5, 0.5)));
    }
}
