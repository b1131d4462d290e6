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

//! # Tempora
//!
//! An in-memory indexing and query engine for event sequences: ordered
//! collections of typed, optionally valued occurrences anchored to points
//! or intervals of any totally ordered domain. Sequences are indexed once
//! at construction and then answer temporal questions (existence,
//! first occurrence, ordering, overlap, range selection, and
//! interval-boundary transitions) without linear rescans.
//!
//! This crate is the facade over the Tempora workspace:
//!
//! - [`tempora_core`]: time domains and the generalized sorted-search
//!   primitives (binary and multi-column).
//! - [`tempora_interval`]: open/closed intervals, compound unions, and
//!   Allen's interval algebra.
//! - [`tempora_seq`]: events and the [`EventSequence`] query surface.
//!
//! ## Example
//!
//! ```rust
//! use std::ops::Bound;
//! use tempora::{AllenRelation, Event, EventSequence, Interval};
//!
//! let seq: EventSequence<i64, &str> = EventSequence::new([
//!     Event::at(0, "wake", ()),
//!     Event::over(Interval::new(3, 8), "rain", ()),
//!     Event::at(9, "sleep", ()),
//! ]);
//! assert!(seq.before(&["wake", "sleep"], true));
//! assert_eq!(seq.events_overlapping(Bound::Included(&4), Bound::Included(&6), None).len(), 1);
//!
//! let a = Interval::new(3, 8);
//! assert_eq!(a.allen_relation(&Interval::new(10, 12)), AllenRelation::Before);
//! ```

pub use tempora_core::search::multi::{
    multi_search, tag_sort, ColumnSearch, KeyedColumn, Tagged, TaggedColumn,
};
pub use tempora_core::search::{
    equal_range, equal_range_by_key, equal_range_by_key_in, equal_range_in, search, search_by_key,
    search_by_key_in, search_in, Target,
};
pub use tempora_core::time::{TimePoint, Unmeasured};
pub use tempora_interval::{AllenRelation, CompoundInterval, Interval, IntervalError, IntervalUnion};
pub use tempora_seq::{
    union_aggregator, Event, EventIndex, EventSequence, Merge, SequenceId, Transition,
    Transitions, When,
};
