//! Nearest-executor assignment.
//!
//! Ranks a roster by great-circle distance from an operation's location and
//! takes the nearest N. Executors without a usable location rank at `+∞`,
//! after every located executor. Ties keep roster order, so the result is
//! deterministic. Without a target location everyone ties and the result
//! is simply the first N executors of the roster.
//!
//! Assignment is advisory: the same executor may be proposed for
//! overlapping operations.

use std::collections::HashSet;

use crate::models::{distance_or_infinite, Coordinate, Executor};

/// An executor paired with its distance from a target (km, `+∞` if unknown).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedExecutor<'a> {
    pub executor: &'a Executor,
    pub distance_km: f64,
}

/// Ranks the whole roster by ascending distance from `location`.
///
/// Stable: equal distances keep roster order.
pub fn rank_by_distance<'a>(
    location: Option<&Coordinate>,
    roster: &'a [Executor],
) -> Vec<RankedExecutor<'a>> {
    let mut ranked: Vec<RankedExecutor<'a>> = roster
        .iter()
        .map(|executor| RankedExecutor {
            executor,
            distance_km: distance_or_infinite(location, executor.coordinate().as_ref()),
        })
        .collect();
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}

/// Selects the `count` executors nearest to `location`.
///
/// Returns fewer than `count` when the roster is short. Roster entries
/// repeating an already selected ID are skipped.
///
/// # Example
///
/// ```
/// use site_schedule::assignment::assign_nearest;
/// use site_schedule::models::{Coordinate, Executor};
///
/// let roster = vec![
///     Executor::new("far").with_location("59.9311, 30.3609"),
///     Executor::new("near").with_location("55.75, 37.62"),
/// ];
/// let site = Coordinate::parse("55.7558, 37.6173");
/// let picked = assign_nearest(site.as_ref(), &roster, 1);
/// assert_eq!(picked[0].id, "near");
/// ```
pub fn assign_nearest<'a>(
    location: Option<&Coordinate>,
    roster: &'a [Executor],
    count: usize,
) -> Vec<&'a Executor> {
    if count == 0 {
        return Vec::new();
    }

    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut picked: Vec<&'a Executor> = Vec::with_capacity(count.min(roster.len()));
    for ranked in rank_by_distance(location, roster) {
        if picked.len() == count {
            break;
        }
        let executor: &'a Executor = ranked.executor;
        if seen.insert(executor.id.as_str()) {
            picked.push(executor);
        }
    }

    if picked.len() < count {
        tracing::debug!(
            requested = count,
            assigned = picked.len(),
            roster = roster.len(),
            "roster too short for requested headcount"
        );
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn site() -> Option<Coordinate> {
        Coordinate::parse("55.7558, 37.6173")
    }

    fn roster() -> Vec<Executor> {
        vec![
            Executor::new("1").with_name("Иван").with_location("55.75, 37.62"),
            Executor::new("2").with_name("Петр").with_location("55.8, 37.7"),
            Executor::new("3").with_name("Сергей").with_location("59.9311, 30.3609"),
            Executor::new("4").with_name("Андрей").with_location(""),
        ]
    }

    fn ids(executors: &[&Executor]) -> Vec<String> {
        executors.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_two_nearest() {
        let roster = roster();
        let picked = assign_nearest(site().as_ref(), &roster, 2);
        assert_eq!(ids(&picked), vec!["1", "2"]);
        assert_eq!(picked[0].name, "Иван");
    }

    #[test]
    fn test_rank_unlocated_last() {
        let roster = roster();
        let ranked = rank_by_distance(site().as_ref(), &roster);
        let order: Vec<&str> = ranked.iter().map(|r| r.executor.id.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "3", "4"]);
        assert!(ranked[3].distance_km.is_infinite());
        assert!(ranked[0].distance_km < ranked[1].distance_km);
    }

    #[test]
    fn test_unlocated_fills_when_short() {
        let roster = vec![
            Executor::new("a").with_location(""),
            Executor::new("b").with_location("55.8, 37.7"),
        ];
        let picked = assign_nearest(site().as_ref(), &roster, 2);
        assert_eq!(ids(&picked), vec!["b", "a"]);
    }

    #[test]
    fn test_no_location_uses_roster_order() {
        let roster = roster();
        let picked = assign_nearest(None, &roster, 3);
        assert_eq!(ids(&picked), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_zero_count() {
        let roster = roster();
        assert!(assign_nearest(site().as_ref(), &roster, 0).is_empty());
    }

    #[test]
    fn test_short_roster() {
        let roster = roster();
        let picked = assign_nearest(site().as_ref(), &roster, 10);
        assert_eq!(picked.len(), 4);
        assert!(assign_nearest(site().as_ref(), &[], 2).is_empty());
    }

    #[test]
    fn test_duplicate_ids_skipped() {
        let roster = vec![
            Executor::new("1").with_location("55.75, 37.62"),
            Executor::new("1").with_location("55.76, 37.62"),
            Executor::new("2").with_location("55.8, 37.7"),
        ];
        let picked = assign_nearest(site().as_ref(), &roster, 2);
        assert_eq!(ids(&picked), vec!["1", "2"]);
    }

    #[test]
    fn test_idempotent() {
        let roster = roster();
        let first = ids(&assign_nearest(site().as_ref(), &roster, 3));
        let second = ids(&assign_nearest(site().as_ref(), &roster, 3));
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_nearest_sorted(
            points in proptest::collection::vec(
                proptest::option::of((-80.0f64..80.0, -170.0f64..170.0)),
                0..12,
            ),
            count in 0usize..14,
        ) {
            let roster: Vec<Executor> = points
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let e = Executor::new(i.to_string());
                    match p {
                        Some((lat, lon)) => e.with_location(format!("{lat}, {lon}")),
                        None => e,
                    }
                })
                .collect();
            let target = site();
            let picked = assign_nearest(target.as_ref(), &roster, count);

            prop_assert_eq!(picked.len(), count.min(roster.len()));
            let distances: Vec<f64> = picked
                .iter()
                .map(|e| distance_or_infinite(target.as_ref(), e.coordinate().as_ref()))
                .collect();
            prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));

            // Unlocated executors appear only once the located ones are used up.
            let located = roster.iter().filter(|e| e.is_located()).count();
            let picked_unlocated = picked.iter().filter(|e| !e.is_located()).count();
            prop_assert_eq!(picked_unlocated, picked.len().saturating_sub(located));
        }
    }
}
