// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Generalized Binary Search
//!
//! Binary search over a sorted slice with a caller-supplied key extractor and
//! a selectable [`Target`]: existence, left insertion point, or right
//! insertion point. A fourth kind of answer, the full equal range, is
//! provided by [`equal_range`] and friends.
//!
//! All functions report absence as a value: `Err(index)` carries the position
//! at which the target would be inserted to keep the slice sorted, so callers
//! branch on the result instead of handling exceptions.
//!
//! ## Equal-range queries stay `O(log n)`
//!
//! The search pass that locates the left insertion point *simultaneously*
//! tightens bounds `[hi_le, hi_gt)` on where the right insertion point must
//! lie. The follow-up search for the right insertion point therefore runs
//! over a narrow residual window instead of the whole slice, keeping a range
//! query a single logarithmic descent rather than two wide ones.
//!
//! ## Examples
//!
//! ```rust
//! use tempora_core::search::{equal_range, search, Target};
//!
//! let items = [1, 1, 1, 3, 3, 3, 5, 5, 5];
//! assert_eq!(search(&items, &3, Target::Lo), Ok(3));
//! assert_eq!(search(&items, &3, Target::Hi), Ok(6));
//! assert_eq!(equal_range(&items, &3, None), Ok(3..6));
//! assert_eq!(search(&items, &4, Target::Any), Err(6));
//! ```

pub mod multi;

use std::cmp::Ordering;
use std::ops::Range;

/// The kind of answer a search should produce.
///
/// * `Any`: existence; any index of an equal run is acceptable.
/// * `Lo`: the left insertion point (first index of the equal run).
/// * `Hi`: the right insertion point (one past the last of the equal run).
///
/// Full equal-range answers are produced by [`equal_range`], which composes
/// a `Lo` and a residual-window `Hi` search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Any,
    Lo,
    Hi,
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Any => write!(f, "any"),
            Target::Lo => write!(f, "lo"),
            Target::Hi => write!(f, "hi"),
        }
    }
}

/// Raw outcome of a single search pass.
///
/// `hi_le` and `hi_gt` bound the right insertion point of `hi_key` (when one
/// was supplied): it lies in `[hi_le, hi_gt)`.
struct Probe {
    found: bool,
    index: usize,
    hi_le: usize,
    hi_gt: usize,
}

/// Single-pass binary search supporting all targets.
///
/// Existence queries return as soon as an exemplar is found. Left/right
/// insertion point queries resolve ties toward the requested end of the
/// equal run. When `hi_key` is supplied the pass also tightens the bounds on
/// the right insertion point of `hi_key`, which is what makes the two-pass
/// equal-range composition cheap.
///
/// Progress is guaranteed on every iteration: neither bound is ever
/// repeated.
fn probe<T, K, F>(
    items: &[T],
    window: Range<usize>,
    key: &F,
    lo_key: &K,
    hi_key: Option<&K>,
    target: Target,
) -> Probe
where
    K: Ord,
    F: Fn(usize, &T) -> K,
{
    let mut lo = window.start.min(items.len());
    let mut hi = window.end.min(items.len());
    if lo > hi {
        lo = hi;
    }
    // Initial values suitable for returning immediately.
    let mut mid = hi + 1;
    let mut direction = Ordering::Greater;
    // Saved comparison results.
    let mut lo_dir = Ordering::Less;
    let mut hi_dir = Ordering::Greater;
    // Bounds on the right insertion point.
    let mut hi_le = lo;
    let mut hi_gt = hi;
    let same_keys = hi_key.is_some_and(|k| k == lo_key);
    while lo < hi {
        mid = lo + (hi - lo) / 2;
        let item_key = key(mid, &items[mid]);
        direction = lo_key.cmp(&item_key);
        if direction == Ordering::Less || (direction == Ordering::Equal && target == Target::Lo) {
            // Keep searching to the left. Never repeat the hi bound.
            hi = if mid < hi { mid } else { hi - 1 };
            hi_dir = direction;
            if let Some(hk) = hi_key {
                let hi_direction = if same_keys { direction } else { hk.cmp(&item_key) };
                if hi_direction == Ordering::Less {
                    hi_gt = hi;
                } else if hi > hi_le {
                    hi_le = hi;
                }
            }
        } else if direction == Ordering::Greater
            || (direction == Ordering::Equal && target == Target::Hi)
        {
            // Keep searching to the right. Never repeat the lo bound.
            lo = if mid > lo { mid } else { lo + 1 };
            lo_dir = direction;
            if hi_key.is_some() && lo > hi_le {
                hi_le = lo;
            }
        } else {
            // direction == Equal && target == Any
            return Probe {
                found: true,
                index: mid,
                hi_le,
                hi_gt,
            };
        }
    }
    // `lo` is now at the left or right insertion point depending on the
    // target. Recover a comparison result if `lo` did not land on `mid`.
    let found = if lo != mid {
        lo_dir == Ordering::Equal || hi_dir == Ordering::Equal
    } else {
        direction == Ordering::Equal
    };
    Probe {
        found,
        index: lo,
        hi_le,
        hi_gt,
    }
}

/// Searches a sorted slice of keys for `target_key`.
///
/// Returns `Ok(index)` when found (the index meaning depends on `target`,
/// see [`Target`]) and `Err(insertion_point)` otherwise.
///
/// # Examples
///
/// ```rust
/// use tempora_core::search::{search, Target};
///
/// let items = [2, 2, 4, 4, 6];
/// assert_eq!(search(&items, &4, Target::Lo), Ok(2));
/// assert_eq!(search(&items, &4, Target::Hi), Ok(4));
/// assert_eq!(search(&items, &5, Target::Lo), Err(4));
/// ```
pub fn search<K>(items: &[K], target_key: &K, target: Target) -> Result<usize, usize>
where
    K: Ord + Clone,
{
    search_in(items, 0..items.len(), target_key, target)
}

/// Like [`search`], restricted to the window `[window.start, window.end)`.
pub fn search_in<K>(
    items: &[K],
    window: Range<usize>,
    target_key: &K,
    target: Target,
) -> Result<usize, usize>
where
    K: Ord + Clone,
{
    search_by_key_in(items, window, |_, item: &K| item.clone(), target_key, target)
}

/// Searches a sorted slice for `target_key` under a key extractor.
///
/// The extractor receives `(index, &item)` so a separate key array can be
/// consulted instead of the items themselves.
pub fn search_by_key<T, K, F>(
    items: &[T],
    key: F,
    target_key: &K,
    target: Target,
) -> Result<usize, usize>
where
    K: Ord,
    F: Fn(usize, &T) -> K,
{
    search_by_key_in(items, 0..items.len(), key, target_key, target)
}

/// Like [`search_by_key`], restricted to the window `[window.start,
/// window.end)`.
pub fn search_by_key_in<T, K, F>(
    items: &[T],
    window: Range<usize>,
    key: F,
    target_key: &K,
    target: Target,
) -> Result<usize, usize>
where
    K: Ord,
    F: Fn(usize, &T) -> K,
{
    let p = probe(items, window, &key, target_key, None, target);
    if p.found {
        Ok(p.index)
    } else {
        Err(p.index)
    }
}

/// Returns the range of indices whose keys `k` satisfy
/// `lo_key <= k <= hi_key` (with `hi_key` defaulting to `lo_key`).
///
/// `Ok(range)` is non-empty; `Err(index)` is the common insertion point of
/// both ends when no key matches.
///
/// # Examples
///
/// ```rust
/// use tempora_core::search::equal_range;
///
/// let items = [1, 1, 3, 3, 3, 5];
/// assert_eq!(equal_range(&items, &3, None), Ok(2..5));
/// assert_eq!(equal_range(&items, &1, Some(&3)), Ok(0..5));
/// assert_eq!(equal_range(&items, &2, None), Err(2));
/// ```
pub fn equal_range<K>(items: &[K], lo_key: &K, hi_key: Option<&K>) -> Result<Range<usize>, usize>
where
    K: Ord + Clone,
{
    equal_range_in(items, 0..items.len(), lo_key, hi_key)
}

/// Like [`equal_range`], restricted to a window.
pub fn equal_range_in<K>(
    items: &[K],
    window: Range<usize>,
    lo_key: &K,
    hi_key: Option<&K>,
) -> Result<Range<usize>, usize>
where
    K: Ord + Clone,
{
    equal_range_by_key_in(items, window, |_, item: &K| item.clone(), lo_key, hi_key)
}

/// Key-extractor form of [`equal_range`].
pub fn equal_range_by_key<T, K, F>(
    items: &[T],
    key: F,
    lo_key: &K,
    hi_key: Option<&K>,
) -> Result<Range<usize>, usize>
where
    K: Ord,
    F: Fn(usize, &T) -> K,
{
    equal_range_by_key_in(items, 0..items.len(), key, lo_key, hi_key)
}

/// Like [`equal_range_by_key`], restricted to a window.
///
/// The left insertion point is located first; the right insertion point is
/// then searched only within the residual bounds tightened by the first
/// pass.
pub fn equal_range_by_key_in<T, K, F>(
    items: &[T],
    window: Range<usize>,
    key: F,
    lo_key: &K,
    hi_key: Option<&K>,
) -> Result<Range<usize>, usize>
where
    K: Ord,
    F: Fn(usize, &T) -> K,
{
    let hi_key = hi_key.unwrap_or(lo_key);
    let first = probe(items, window, &key, lo_key, Some(hi_key), Target::Lo);
    let second = probe(
        items,
        first.hi_le..first.hi_gt,
        &key,
        hi_key,
        None,
        Target::Hi,
    );
    if first.index < second.index {
        Ok(first.index..second.index)
    } else {
        Err(first.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //           0  1  2  3  4  5  6  7  8  9 10 11 12 13 14
    const ODDS: [i32; 15] = [1, 1, 1, 3, 3, 3, 5, 5, 5, 7, 7, 7, 9, 9, 9];
    const EVNS: [i32; 12] = [2, 2, 2, 4, 4, 4, 6, 6, 6, 8, 8, 8];

    //           0   1   2   3   4   5   6   7   8   9
    const UNIQ: [i32; 20] = [
        0, 5, 7, 11, 13, 21, 25, 30, 31, 36, 40, 45, 46, 50, 71, 77, 82, 83, 84, 93,
    ];

    #[test]
    fn test_empty() {
        let items: [i32; 0] = [];
        assert_eq!(search(&items, &1, Target::Any), Err(0));
        assert_eq!(search(&items, &1, Target::Lo), Err(0));
        assert_eq!(search(&items, &1, Target::Hi), Err(0));
        assert_eq!(equal_range(&items, &1, None), Err(0));
    }

    #[test]
    fn test_not_find() {
        for (nums, absent) in [
            (&ODDS[..], [0, 2, 4, 6, 8, 10].as_slice()),
            (&EVNS[..], [1, 3, 5, 7, 9].as_slice()),
        ] {
            for &x in absent {
                let idx = (3 * (x - (x % 2)) / 2) as usize;
                for target in [Target::Any, Target::Lo, Target::Hi] {
                    assert_eq!(search(nums, &x, target), Err(idx), "{nums:?} {x}");
                }
                assert_eq!(equal_range(nums, &x, None), Err(idx), "{nums:?} {x}");
            }
        }
    }

    #[test]
    fn test_find_any() {
        for (nums, present) in [
            (&ODDS[..], [1, 3, 5, 7, 9].as_slice()),
            (&EVNS[..], [2, 4, 6, 8].as_slice()),
        ] {
            for &x in present {
                let lo = (3 * (x - 2 + (x % 2)) / 2) as usize;
                let hi = lo + 3;
                let idx = search(nums, &x, Target::Any).expect("should find");
                assert!(lo <= idx && idx < hi, "{nums:?} {x} -> {idx}");
            }
        }
    }

    #[test]
    fn test_find_lo_and_hi() {
        for (nums, present) in [
            (&ODDS[..], [1, 3, 5, 7, 9].as_slice()),
            (&EVNS[..], [2, 4, 6, 8].as_slice()),
        ] {
            for &x in present {
                let idx = (3 * (x - 2 + (x % 2)) / 2) as usize;
                assert_eq!(search(nums, &x, Target::Lo), Ok(idx));
                assert_eq!(search(nums, &x, Target::Hi), Ok(idx + 3));
                assert_eq!(equal_range(nums, &x, None), Ok(idx..idx + 3));
            }
        }
    }

    #[test]
    fn test_equal_run_insertion_points() {
        let items = [1, 1, 1, 3, 3, 3, 5, 5, 5];
        assert_eq!(search(&items, &3, Target::Lo), Ok(3));
        assert_eq!(search(&items, &3, Target::Hi), Ok(6));
        assert_eq!(equal_range(&items, &3, None), Ok(3..6));
    }

    #[test]
    fn test_not_find_range() {
        // Below everything.
        assert_eq!(equal_range(&UNIQ, &-100, Some(&-10)), Err(0));
        // Between each pair of neighboring values.
        for hi_idx in 1..UNIQ.len() {
            let x_lo = UNIQ[hi_idx - 1] + 1;
            let x_hi = UNIQ[hi_idx] - 1;
            if x_lo > x_hi {
                continue;
            }
            assert_eq!(
                equal_range(&UNIQ, &x_lo, Some(&x_hi)),
                Err(hi_idx),
                "between {x_lo} and {x_hi}"
            );
        }
        // Above everything.
        assert_eq!(equal_range(&UNIQ, &100, Some(&110)), Err(UNIQ.len()));
    }

    #[test]
    fn test_find_range_two_keys() {
        // Two adjacent equal runs as one range: keys x and x + 2.
        for (nums, present) in [
            (&ODDS[..], [1, 3, 5, 7].as_slice()),
            (&EVNS[..], [2, 4, 6].as_slice()),
        ] {
            for &x in present {
                let idx = (3 * (x - 2 + (x % 2)) / 2) as usize;
                let hi = x + 2;
                assert_eq!(equal_range(nums, &x, Some(&hi)), Ok(idx..idx + 6));
                // A hi key falling in the gap covers the same slots.
                let hi = x + 3;
                assert_eq!(equal_range(nums, &x, Some(&hi)), Ok(idx..idx + 6));
            }
        }
    }

    #[test]
    fn test_windowed_search() {
        let items = [1, 1, 3, 3, 5, 5, 7, 7];
        assert_eq!(search_in(&items, 2..6, &3, Target::Lo), Ok(2));
        assert_eq!(search_in(&items, 4..8, &3, Target::Lo), Err(4));
        assert_eq!(equal_range_in(&items, 0..4, &3, None), Ok(2..4));
        // Degenerate windows never find anything.
        assert_eq!(search_in(&items, 5..5, &5, Target::Any), Err(5));
        assert_eq!(search_in(&items, 6..2, &3, Target::Any), Err(2));
    }

    #[test]
    fn test_search_by_key_with_tags() {
        // Keys live beside payloads; the extractor projects them out.
        let items = [(10, 'a'), (20, 'b'), (20, 'c'), (30, 'd')];
        let key = |_: usize, item: &(i32, char)| item.0;
        assert_eq!(search_by_key(&items, key, &20, Target::Lo), Ok(1));
        assert_eq!(search_by_key(&items, key, &20, Target::Hi), Ok(3));
        assert_eq!(equal_range_by_key(&items, key, &20, None), Ok(1..3));
        assert_eq!(search_by_key(&items, key, &25, Target::Any), Err(3));
    }

    #[test]
    fn test_range_postconditions_randomized() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x7e5);
        for _ in 0..200 {
            let len = rng.gen_range(0..40);
            let mut items: Vec<i32> = (0..len).map(|_| rng.gen_range(0..12)).collect();
            items.sort_unstable();
            let x = rng.gen_range(-1..14);
            match equal_range(&items, &x, None) {
                Ok(range) => {
                    assert!(items[range.clone()].iter().all(|&v| v == x));
                    if range.start > 0 {
                        assert!(items[range.start - 1] < x);
                    }
                    if range.end < items.len() {
                        assert!(items[range.end] > x);
                    }
                }
                Err(idx) => {
                    assert!(!items.contains(&x));
                    assert!(items[..idx].iter().all(|&v| v < x));
                    assert!(items[idx..].iter().all(|&v| v > x));
                }
            }
        }
    }
}
