//! Ratcliff/Obershelp matching-block alignment for n-gram id sequences.
//!
//! Finds the longest common contiguous run, then recurses on the regions to
//! its left and right, so every reported block appears in the same relative
//! order in both sequences. Worst case is quadratic, but whole documents are
//! aligned once per pair so this is not a hot loop under load.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{MatchParams, RawMatch};

/// Sequences at least this long get the popular-element heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Positions of every element of `b`, with popular elements removed when
/// `autojunk` is set.
fn build_b2j<T: Eq + Hash>(b: &[T], autojunk: bool) -> HashMap<&T, Vec<usize>> {
    let mut b2j: HashMap<&T, Vec<usize>> = HashMap::new();
    for (j, elt) in b.iter().enumerate() {
        b2j.entry(elt).or_default().push(j);
    }

    if autojunk && b.len() >= AUTOJUNK_MIN_LEN {
        let ntest = b.len() / 100 + 1;
        b2j.retain(|_, positions| positions.len() <= ntest);
    }

    b2j
}

/// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties resolve to the earliest start in `a`, then the earliest in `b`.
/// Popular elements never seed a match but may extend one.
fn find_longest_match<T: Eq + Hash>(
    a: &[T],
    b: &[T],
    b2j: &HashMap<&T, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0;

    // j2len[j] = length of the longest match ending at a[i - 1] and b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut new_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let prev = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0)
                } else {
                    0
                };
                let k = prev + 1;
                new_j2len.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = new_j2len;
    }

    while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_size += 1;
    }

    while best_i + best_size < ahi
        && best_j + best_size < bhi
        && a[best_i + best_size] == b[best_j + best_size]
    {
        best_size += 1;
    }

    (best_i, best_j, best_size)
}

/// All maximal matching blocks between `a` and `b`, ordered by position.
///
/// Adjacent blocks are collapsed into one. Blocks never overlap and appear in
/// the same order in both sequences.
pub fn matching_blocks<T: Eq + Hash>(a: &[T], b: &[T], autojunk: bool) -> Vec<RawMatch> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let b2j = build_b2j(b, autojunk);

    let mut queue: Vec<(usize, usize, usize, usize)> = vec![(0, a.len(), 0, b.len())];
    let mut blocks: Vec<(usize, usize, usize)> = Vec::new();

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = find_longest_match(a, b, &b2j, alo, ahi, blo, bhi);
        if k > 0 {
            blocks.push((i, j, k));
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }
    }

    blocks.sort_unstable();

    let mut collapsed: Vec<RawMatch> = Vec::with_capacity(blocks.len());
    for (i, j, k) in blocks {
        match collapsed.last_mut() {
            Some(last) if last.a + last.size == i && last.b + last.size == j => {
                last.size += k;
            }
            _ => collapsed.push(RawMatch { a: i, b: j, size: k }),
        }
    }

    collapsed
}

/// Matching blocks longer than `params.threshold` n-grams.
pub fn align_ngrams(seq_a: &[u32], seq_b: &[u32], params: &MatchParams) -> Vec<RawMatch> {
    let blocks = matching_blocks(seq_a, seq_b, params.autojunk);
    let total = blocks.len();

    let kept: Vec<RawMatch> = blocks
        .into_iter()
        .filter(|m| m.size > params.threshold)
        .collect();

    log::debug!(
        "aligner: {} blocks, {} above threshold {}",
        total,
        kept.len(),
        params.threshold
    );

    kept
}
