//! Randomized selection of order statistics over index arrays
//!
//! Finds the element that would sit at a given position if the indexed values
//! were sorted by a single key, without sorting them. Expected linear time.

use rand::Rng;

/// Select the `nth` smallest entry of `indices` by `key`
///
/// `indices` is reordered in place. Returns the selected entry, or `None` when
/// `nth` is out of range. Pivots are drawn from `rng`, so a seeded generator
/// makes the result reproducible.
pub fn select_nth<R, K>(indices: &mut [usize], nth: usize, key: K, rng: &mut R) -> Option<usize>
where
    R: Rng,
    K: Fn(usize) -> i32,
{
    if nth >= indices.len() {
        return None;
    }

    let mut lo = 0;
    let mut hi = indices.len() - 1;
    while lo < hi {
        let pivot = rng.random_range(lo..=hi);
        indices.swap(pivot, lo);
        let split = hoare_partition(indices, lo, hi, &key);
        if nth <= split {
            hi = split;
        } else {
            lo = split + 1;
        }
    }

    indices.get(lo).copied()
}

// Partitions around the key of indices[lo]. Returns j with lo <= j < hi such
// that every key in [lo, j] is <= the pivot and every key in (j, hi] is >= it.
// Both scans stop at or before an element already known to satisfy them, so
// i and j never leave [lo, hi].
#[allow(clippy::indexing_slicing)]
fn hoare_partition<K>(indices: &mut [usize], lo: usize, hi: usize, key: &K) -> usize
where
    K: Fn(usize) -> i32,
{
    let pivot = key(indices[lo]);
    let mut i = lo;
    let mut j = hi;
    loop {
        while key(indices[i]) < pivot {
            i += 1;
        }
        while key(indices[j]) > pivot {
            j -= 1;
        }
        if i >= j {
            return j;
        }
        indices.swap(i, j);
        i += 1;
        j -= 1;
    }
}
