//! Healing of neighbouring matches.
//!
//! Two aligned blocks separated by only a few n-grams are usually one reused
//! passage with a small edit in the middle. Healing fuses such pairs into a
//! single match spanning both.

use crate::models::{ExtendedMatch, RawMatch};

/// Heal raw aligner blocks.
///
/// `matches` must be ordered by `a` ascending, as the aligner returns them.
pub fn heal_neighboring_matches(matches: &[RawMatch], min_distance: usize) -> Vec<ExtendedMatch> {
    let wrapped: Vec<ExtendedMatch> = matches.iter().copied().map(ExtendedMatch::from).collect();
    heal_extended_matches(&wrapped, min_distance)
}

/// Heal a list of matches in one greedy left-to-right pass.
///
/// Each match is compared only with the one after it. When the gap in text A
/// between them is smaller than `min_distance` n-grams they are fused and the
/// second one is consumed, so it does not take part in the next comparison.
/// Fused matches are not re-examined in the same pass.
pub fn heal_extended_matches(matches: &[ExtendedMatch], min_distance: usize) -> Vec<ExtendedMatch> {
    if matches.len() <= 1 {
        return matches.to_vec();
    }

    let mut healed: Vec<ExtendedMatch> = Vec::with_capacity(matches.len());
    let mut i = 0;

    while i < matches.len() {
        let current = &matches[i];
        let Some(next) = matches.get(i + 1) else {
            healed.push(*current);
            break;
        };

        let gap = next.a.saturating_sub(current.end_a());
        if gap < min_distance {
            let merged = merge_two_matches(current, next);
            log::debug!(
                "healing a={} b={} with a={} b={} (gap {})",
                current.a,
                current.b,
                next.a,
                next.b,
                gap
            );
            healed.push(merged);
            i += 2;
        } else {
            healed.push(*current);
            i += 1;
        }
    }

    healed
}

/// Fuse two matches into one running from the start of `first` to the end of
/// `second` in both texts. Sizes are computed per text, so they can differ.
fn merge_two_matches(first: &ExtendedMatch, second: &ExtendedMatch) -> ExtendedMatch {
    let size_a = second.end_a().max(first.end_a()) - first.a;
    let size_b = second.end_b().max(first.end_b()) - first.b;

    ExtendedMatch {
        extended_backwards: first.extended_backwards,
        extended_forwards: second.extended_forwards,
        ..ExtendedMatch::healed(first.a, first.b, size_a, size_b)
    }
}

/// Whether any two consecutive matches in a healed list are still closer than
/// `min_distance` in text A.
pub fn has_healable_neighbors(matches: &[ExtendedMatch], min_distance: usize) -> bool {
    matches
        .windows(2)
        .any(|pair| pair[1].a.saturating_sub(pair[0].end_a()) < min_distance)
}
