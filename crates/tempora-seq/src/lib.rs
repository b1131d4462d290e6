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

//! # Tempora Seq
//!
//! Events and immutable, queryable event sequences.
//!
//! ## Architecture
//!
//! The crate is designed around a strict separation between **construction**
//! and **querying**:
//!
//! * **`event`**: The [`Event`] value type, the point-or-interval
//!   [`When`], and the typed identifiers ([`SequenceId`], [`EventIndex`]).
//! * **`sequence`**: [`EventSequence`] sorts a batch of events once,
//!   builds bound and type indexes, and answers existence, first-occurrence,
//!   range, overlap, and ordering queries in logarithmic time.
//! * **`transitions`**: the sweep-line decomposition of interval
//!   boundaries.
//! * **`aggregate`**: fold-based derivation of new sequences, including the
//!   gap-fusing [`union_aggregator`].
//!
//! ## Design Philosophy
//!
//! 1. **Frozen indexes**: everything derived at construction is immutable;
//!    the fact map is the single, clearly marked mutable side table.
//! 2. **Absence is a value**: queries return `Option` or empty collections,
//!    never raise, and degrade gracefully on empty sequences.
//! 3. **Derivation over mutation**: `copy_with`, `extend`, `subsequence`,
//!    and `aggregate_events` build new sequences instead of editing one.

pub mod aggregate;
pub mod event;
pub mod sequence;
pub mod transitions;

pub use aggregate::{union_aggregator, Merge};
pub use event::{Event, EventIndex, SequenceId, When};
pub use sequence::EventSequence;
pub use transitions::{Transition, Transitions};
