use super::traits::WordVector;
use super::vector::VectorEntity;
use std::collections::HashMap;

/// Per-word `(min, max)` over all input vectors.
pub(crate) fn word_ranges(data: &[VectorEntity], n_words: usize) -> Vec<(f64, f64)> {
    let mut ranges = vec![(f64::INFINITY, f64::NEG_INFINITY); n_words];
    for entity in data {
        for (range, &c) in ranges.iter_mut().zip(entity.counts()) {
            range.0 = range.0.min(c);
            range.1 = range.1.max(c);
        }
    }
    ranges
}

/// Write the arithmetic mean of `members` into `out`.
///
/// Returns `false` (leaving `out` untouched) when there are no members.
pub(crate) fn mean_into<'a>(
    out: &mut [f64],
    members: impl Iterator<Item = &'a VectorEntity>,
) -> bool {
    let mut sums = vec![0.0f64; out.len()];
    let mut count = 0usize;
    for m in members {
        for (s, &c) in sums.iter_mut().zip(m.counts()) {
            *s += c;
        }
        count += 1;
    }
    if count == 0 {
        return false;
    }
    let denom = count as f64;
    for (o, s) in out.iter_mut().zip(sums) {
        *o = s / denom;
    }
    true
}

/// Symmetric memo of pairwise distances keyed by node id.
#[derive(Debug, Default)]
pub(crate) struct DistanceCache {
    dists: HashMap<(usize, usize), f64>,
}

impl DistanceCache {
    #[inline]
    fn key(a: usize, b: usize) -> (usize, usize) {
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }

    pub(crate) fn get(&self, a: usize, b: usize) -> Option<f64> {
        self.dists.get(&Self::key(a, b)).copied()
    }

    pub(crate) fn insert(&mut self, a: usize, b: usize, d: f64) {
        self.dists.insert(Self::key(a, b), d);
    }

    /// Drop every entry that mentions `id`.
    pub(crate) fn evict(&mut self, id: usize) {
        self.dists.retain(|&(a, b), _| a != id && b != id);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.dists.len()
    }
}
