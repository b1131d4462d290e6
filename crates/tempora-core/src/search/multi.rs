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

//! # Multi-Column Joint Search
//!
//! Answers compound equality queries ("which rows match *all* of these
//! per-column targets?") over several independently sorted views of the
//! same row collection, without materializing a join.
//!
//! Each view is a *column*: either a plain slice already sorted by its key
//! (positions are row indices), or a [`Tagged`] array sorted by key whose
//! entries remember the original row. Every column carries its own target;
//! the joint search runs an equal-range query per column, maps matching
//! positions back to rows, and intersects the row sets. The moment any
//! column's range comes up empty the whole query short-circuits to the empty
//! set.
//!
//! A column that is sub-sorted within the previous column's equal runs (the
//! classic lexicographic layout, e.g. a type column inside a run of equal
//! timestamps) can be marked *chained*: it is then searched inside the
//! previous column's result window instead of its full extent.

use crate::search::equal_range_by_key_in;
use fixedbitset::FixedBitSet;
use std::ops::Range;

/// A sort key paired with the row it came from.
///
/// Sorting an array of these by key yields a searchable view of an
/// originally unsorted column while keeping the row recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tagged<K> {
    pub key: K,
    pub row: usize,
}

/// Builds a tagged array for a column: extracts a key per row and sorts by
/// `(key, row)`.
///
/// # Examples
///
/// ```rust
/// use tempora_core::search::multi::tag_sort;
///
/// let rows = [(3, 'c'), (1, 'a'), (2, 'b')];
/// let tags = tag_sort(&rows, |_, r| r.0);
/// let order: Vec<usize> = tags.iter().map(|t| t.row).collect();
/// assert_eq!(order, vec![1, 2, 0]);
/// ```
pub fn tag_sort<T, K, F>(items: &[T], key: F) -> Vec<Tagged<K>>
where
    K: Ord,
    F: Fn(usize, &T) -> K,
{
    let mut tags: Vec<Tagged<K>> = items
        .iter()
        .enumerate()
        .map(|(row, item)| Tagged {
            key: key(row, item),
            row,
        })
        .collect();
    tags.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.row.cmp(&b.row)));
    tags
}

/// One column of a joint query, bound to its target value.
pub trait ColumnSearch {
    /// Number of rows in the underlying collection.
    fn rows(&self) -> usize;

    /// The range of sorted positions matching this column's target, searched
    /// within `window`. Empty when nothing matches.
    fn find(&self, window: Range<usize>) -> Range<usize>;

    /// Maps a sorted position back to its original row.
    fn resolve(&self, pos: usize) -> usize;

    /// Whether this column is sub-sorted within the previous column's equal
    /// runs and should therefore be searched inside the previous result
    /// window.
    fn is_chained(&self) -> bool {
        false
    }
}

/// A plain pre-sorted column. Positions are row indices.
#[derive(Debug, Clone)]
pub struct KeyedColumn<'a, K> {
    keys: &'a [K],
    target: K,
    chained: bool,
}

impl<'a, K: Ord + Clone> KeyedColumn<'a, K> {
    pub fn new(keys: &'a [K], target: K) -> Self {
        Self {
            keys,
            target,
            chained: false,
        }
    }

    /// Marks the column as sub-sorted within the previous column's equal
    /// runs.
    pub fn chained(keys: &'a [K], target: K) -> Self {
        Self {
            keys,
            target,
            chained: true,
        }
    }
}

impl<K: Ord + Clone> ColumnSearch for KeyedColumn<'_, K> {
    fn rows(&self) -> usize {
        self.keys.len()
    }

    fn find(&self, window: Range<usize>) -> Range<usize> {
        equal_range_by_key_in(self.keys, window, |_, k: &K| k.clone(), &self.target, None)
            .unwrap_or_else(|idx| idx..idx)
    }

    fn resolve(&self, pos: usize) -> usize {
        pos
    }

    fn is_chained(&self) -> bool {
        self.chained
    }
}

/// An independently sorted tagged column. Positions resolve through the
/// tags.
#[derive(Debug, Clone)]
pub struct TaggedColumn<'a, K> {
    entries: &'a [Tagged<K>],
    target: K,
}

impl<'a, K: Ord + Clone> TaggedColumn<'a, K> {
    pub fn new(entries: &'a [Tagged<K>], target: K) -> Self {
        Self { entries, target }
    }
}

impl<K: Ord + Clone> ColumnSearch for TaggedColumn<'_, K> {
    fn rows(&self) -> usize {
        self.entries.len()
    }

    fn find(&self, window: Range<usize>) -> Range<usize> {
        equal_range_by_key_in(
            self.entries,
            window,
            |_, t: &Tagged<K>| t.key.clone(),
            &self.target,
            None,
        )
        .unwrap_or_else(|idx| idx..idx)
    }

    fn resolve(&self, pos: usize) -> usize {
        self.entries[pos].row
    }
}

/// Returns the sorted row indices that satisfy every column's target.
///
/// Chained columns are searched within the previous column's result window;
/// all others over their full extent. The result is the intersection of the
/// per-column row sets, and an empty range in any column short-circuits the
/// query to the empty set. An empty column list yields the empty set.
///
/// # Examples
///
/// ```rust
/// use tempora_core::search::multi::{multi_search, tag_sort, ColumnSearch, TaggedColumn};
///
/// let rows = [(1, 'b'), (2, 'a'), (1, 'a'), (2, 'b')];
/// let by_num = tag_sort(&rows, |_, r| r.0);
/// let by_chr = tag_sort(&rows, |_, r| r.1);
/// let cols: [&dyn ColumnSearch; 2] = [
///     &TaggedColumn::new(&by_num, 1),
///     &TaggedColumn::new(&by_chr, 'a'),
/// ];
/// assert_eq!(multi_search(&cols), vec![2]);
/// ```
pub fn multi_search(columns: &[&dyn ColumnSearch]) -> Vec<usize> {
    let nbits = match columns.iter().map(|c| c.rows()).max() {
        Some(n) => n,
        None => return Vec::new(),
    };
    let mut acc: Option<FixedBitSet> = None;
    let mut prev: Option<Range<usize>> = None;
    for column in columns {
        let window = match (&prev, column.is_chained()) {
            (Some(range), true) => range.clone(),
            _ => 0..column.rows(),
        };
        let found = column.find(window);
        if found.is_empty() {
            return Vec::new();
        }
        let mut set = FixedBitSet::with_capacity(nbits);
        for pos in found.clone() {
            set.insert(column.resolve(pos));
        }
        acc = Some(match acc {
            None => set,
            Some(mut joined) => {
                joined.intersect_with(&set);
                if joined.count_ones(..) == 0 {
                    return Vec::new();
                }
                joined
            }
        });
        prev = Some(found);
    }
    acc.map(|set| set.ones().collect()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    // A small synthetic table: (color, size, weight).
    const TABLE: [(&str, i32, i32); 8] = [
        ("red", 2, 10),
        ("blue", 1, 30),
        ("red", 1, 20),
        ("green", 2, 10),
        ("blue", 2, 20),
        ("red", 2, 30),
        ("blue", 1, 10),
        ("green", 1, 10),
    ];

    fn naive(color: &str, size: i32) -> Vec<usize> {
        TABLE
            .iter()
            .enumerate()
            .filter(|(_, r)| r.0 == color && r.1 == size)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_tag_sort_orders_by_key_then_row() {
        let tags = tag_sort(&TABLE, |_, r| r.1);
        let keys: Vec<i32> = tags.iter().map(|t| t.key).collect();
        assert_eq!(keys, vec![1, 1, 1, 1, 2, 2, 2, 2]);
        assert_eq!(tags[0].row, 1);
        assert_eq!(tags[1].row, 2);
    }

    #[test]
    fn test_multi_search_matches_naive_scan() {
        let by_color = tag_sort(&TABLE, |_, r| r.0);
        let by_size = tag_sort(&TABLE, |_, r| r.1);
        for color in ["red", "blue", "green", "purple"] {
            for size in [1, 2, 3] {
                let cols: [&dyn ColumnSearch; 2] = [
                    &TaggedColumn::new(&by_color, color),
                    &TaggedColumn::new(&by_size, size),
                ];
                assert_eq!(multi_search(&cols), naive(color, size), "{color} {size}");
            }
        }
    }

    #[test]
    fn test_multi_search_three_columns() {
        let by_color = tag_sort(&TABLE, |_, r| r.0);
        let by_size = tag_sort(&TABLE, |_, r| r.1);
        let by_weight = tag_sort(&TABLE, |_, r| r.2);
        let cols: [&dyn ColumnSearch; 3] = [
            &TaggedColumn::new(&by_color, "blue"),
            &TaggedColumn::new(&by_size, 1),
            &TaggedColumn::new(&by_weight, 10),
        ];
        assert_eq!(multi_search(&cols), vec![6]);
    }

    #[test]
    fn test_multi_search_short_circuits_on_absent_target() {
        let by_color = tag_sort(&TABLE, |_, r| r.0);
        let by_size = tag_sort(&TABLE, |_, r| r.1);
        let cols: [&dyn ColumnSearch; 2] = [
            &TaggedColumn::new(&by_color, "purple"),
            &TaggedColumn::new(&by_size, 1),
        ];
        assert_eq!(multi_search(&cols), Vec::<usize>::new());
    }

    #[test]
    fn test_chained_column_within_lexicographic_runs() {
        // Rows sorted by (n, c): a plain primary column and a chained
        // secondary column over the same layout.
        let rows = [(1, 'a'), (1, 'b'), (1, 'b'), (2, 'a'), (2, 'b'), (3, 'a')];
        let ns: Vec<i32> = rows.iter().map(|r| r.0).collect();
        let cs: Vec<char> = rows.iter().map(|r| r.1).collect();
        let cols: [&dyn ColumnSearch; 2] = [
            &KeyedColumn::new(&ns, 1),
            &KeyedColumn::chained(&cs, 'b'),
        ];
        assert_eq!(multi_search(&cols), vec![1, 2]);
        let cols: [&dyn ColumnSearch; 2] = [
            &KeyedColumn::new(&ns, 2),
            &KeyedColumn::chained(&cs, 'b'),
        ];
        assert_eq!(multi_search(&cols), vec![4]);
        let cols: [&dyn ColumnSearch; 2] = [
            &KeyedColumn::new(&ns, 3),
            &KeyedColumn::chained(&cs, 'b'),
        ];
        assert_eq!(multi_search(&cols), Vec::<usize>::new());
    }

    #[test]
    fn test_mixed_plain_and_tagged_columns() {
        // Rows sorted by the first field; the second field needs tags.
        let rows = [(1, 'z'), (2, 'y'), (2, 'z'), (3, 'x')];
        let ns: Vec<i32> = rows.iter().map(|r| r.0).collect();
        let by_chr = tag_sort(&rows, |_, r| r.1);
        let cols: [&dyn ColumnSearch; 2] = [
            &KeyedColumn::new(&ns, 2),
            &TaggedColumn::new(&by_chr, 'z'),
        ];
        assert_eq!(multi_search(&cols), vec![2]);
    }

    #[test]
    fn test_single_plain_column() {
        let keys = [1, 2, 2, 3];
        let cols: [&dyn ColumnSearch; 1] = [&KeyedColumn::new(&keys, 2)];
        assert_eq!(multi_search(&cols), vec![1, 2]);
        let cols: [&dyn ColumnSearch; 1] = [&KeyedColumn::new(&keys, 9)];
        assert_eq!(multi_search(&cols), Vec::<usize>::new());
    }

    #[test]
    fn test_no_columns() {
        assert_eq!(multi_search(&[]), Vec::<usize>::new());
    }
}
