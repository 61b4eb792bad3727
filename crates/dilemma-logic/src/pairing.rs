//! Round-robin pairing schedule
//!
//! Strategies are indexed `0..n`. For every `first` in `0..n` and every
//! `second` in `0..=first`, one match is played with `first` in the first
//! role. That is every pair with `second <= first`: self-pairings are in,
//! mirrored pairings (roles swapped) are out, `n(n+1)/2` matches in all.
//!
//! The schedule order is the rank order `first(first+1)/2 + second`, so any
//! match can be located in O(1) without building the list.

/// Total number of matches for `n` strategies — O(1), no allocation
pub fn pairing_count(participant_count: usize) -> usize {
    triangular(participant_count)
}

/// Every `(first, second)` pair in schedule order
///
/// Heap-allocating version. Callers that only need one match should use
/// [`pairing_for_match`] instead.
pub fn round_robin_pairs(participant_count: usize) -> Vec<(usize, usize)> {
    (0..participant_count)
        .flat_map(|first| (0..=first).map(move |second| (first, second)))
        .collect()
}

/// Get the pairing for a specific match index — O(1) memory
pub fn pairing_for_match(participant_count: usize, match_index: usize) -> Option<(usize, usize)> {
    if match_index >= pairing_count(participant_count) {
        return None;
    }
    Some(unrank_pair(match_index))
}

/// Position of `(first, second)` in the schedule, if it is scheduled at all
pub fn match_index_of(participant_count: usize, first: usize, second: usize) -> Option<usize> {
    if first >= participant_count || second > first {
        return None;
    }
    Some(triangular(first) + second)
}

// ───────────── Internal helpers ─────────────

/// n-th triangular number n(n+1)/2
fn triangular(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Integer floor square root via Newton's method
fn isqrt_floor(n: u64) -> u64 {
    if n <= 1 {
        return n;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Rank → (first, second) with second ≤ first.
///
/// rank = first(first+1)/2 + second
fn unrank_pair(rank: usize) -> (usize, usize) {
    // Estimate first via floor((sqrt(1 + 8·rank) − 1) / 2)
    let root = isqrt_floor(1 + 8 * rank as u64);
    let mut first = ((root - 1) / 2) as usize;

    // Correct estimate
    while first > 0 && triangular(first) > rank {
        first -= 1;
    }
    while triangular(first + 1) <= rank {
        first += 1;
    }

    (first, rank - triangular(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_and_single() {
        assert!(round_robin_pairs(0).is_empty());
        assert_eq!(round_robin_pairs(1), vec![(0, 0)]);
        assert_eq!(pairing_count(0), 0);
        assert_eq!(pairing_count(1), 1);
    }

    #[test]
    fn test_three_strategies_order() {
        assert_eq!(
            round_robin_pairs(3),
            vec![(0, 0), (1, 0), (1, 1), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn test_count_matches_list() {
        for n in 0..30 {
            assert_eq!(round_robin_pairs(n).len(), pairing_count(n));
        }
    }

    #[test]
    fn test_each_strategy_plays_itself_once() {
        let n = 12;
        let pairs = round_robin_pairs(n);
        for i in 0..n {
            let selfplay = pairs.iter().filter(|(a, b)| *a == i && *b == i).count();
            assert_eq!(selfplay, 1, "strategy {} self-play count", i);
        }
    }

    #[test]
    fn test_no_mirrored_pairings() {
        let pairs = round_robin_pairs(20);
        for (first, second) in &pairs {
            assert!(second <= first, "Mirrored pairing found: {} vs {}", first, second);
        }

        let mut sorted = pairs.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), pairs.len(), "Duplicate pairing found");
    }

    #[test]
    fn test_pairing_for_match() {
        let pairs = round_robin_pairs(10);

        for (i, expected) in pairs.iter().enumerate() {
            assert_eq!(pairing_for_match(10, i), Some(*expected));
        }

        // Out of bounds
        assert_eq!(pairing_for_match(10, pairs.len()), None);
        assert_eq!(pairing_for_match(0, 0), None);
    }

    #[test]
    fn test_match_index_of() {
        assert_eq!(match_index_of(3, 0, 0), Some(0));
        assert_eq!(match_index_of(3, 2, 1), Some(4));
        assert_eq!(match_index_of(3, 1, 2), None);
        assert_eq!(match_index_of(3, 3, 0), None);
    }

    #[test]
    fn test_isqrt_floor() {
        assert_eq!(isqrt_floor(0), 0);
        assert_eq!(isqrt_floor(1), 1);
        assert_eq!(isqrt_floor(15), 3);
        assert_eq!(isqrt_floor(16), 4);
        assert_eq!(isqrt_floor(17), 4);
    }

    proptest! {
        #[test]
        fn prop_unrank_agrees_with_schedule(
            n in 1usize..2000,
            pick in any::<prop::sample::Index>(),
        ) {
            let index = pick.index(pairing_count(n));
            let (first, second) = pairing_for_match(n, index).unwrap();

            prop_assert!(second <= first);
            prop_assert!(first < n);
            prop_assert_eq!(match_index_of(n, first, second), Some(index));
        }
    }
}
