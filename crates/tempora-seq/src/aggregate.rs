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

//! # Aggregators
//!
//! Fold functions for [`EventSequence::aggregate_events`]: each selected
//! type's events are fed in time order through
//! `aggregator(&mut accumulator, event)`, building a list of in-progress
//! output events.
//!
//! The canonical aggregator is [`union_aggregator`]: it fuses bursts of
//! point observations with noisy gaps into episodes by coercing points to
//! minimum-length intervals and merging an event into the previous episode
//! whenever the gap between them is small enough.
//!
//! [`EventSequence::aggregate_events`]: crate::sequence::EventSequence::aggregate_events

use crate::event::{Event, When};
use tempora_core::time::TimePoint;
use tempora_interval::Interval;

/// Values that can absorb another value of the same type when two events
/// merge into one.
///
/// Implemented for `Vec<_>` (concatenation, the canonical episode payload)
/// and `()` (occurrence events carry nothing to merge).
pub trait Merge {
    fn merge(&mut self, other: Self);
}

impl<V> Merge for Vec<V> {
    #[inline]
    fn merge(&mut self, mut other: Self) {
        self.append(&mut other);
    }
}

impl Merge for () {
    #[inline]
    fn merge(&mut self, _other: ()) {}
}

impl Merge for String {
    #[inline]
    fn merge(&mut self, other: Self) {
        self.push_str(&other);
    }
}

/// Builds the union aggregator: points become intervals of at least
/// `min_len`, and an event merges into the previous in-progress episode
/// whenever it overlaps it or trails it by at most `max_gap`.
///
/// Merging extends the episode's high bound and merges the values via
/// [`Merge`]. Episodes are emitted as half-open intervals `[lo, hi)`;
/// events whose occurrence cannot be widened (an unmeasurable domain)
/// keep their original `when`.
///
/// # Panics
///
/// The returned aggregator panics if `min_len` is negative.
///
/// # Examples
///
/// ```rust
/// use tempora_interval::Interval;
/// use tempora_seq::{union_aggregator, Event, EventSequence};
///
/// let seq: EventSequence<i64, &str, Vec<i32>> = EventSequence::new([
///     Event::over(Interval::with_bounds(3, 8, false, true).unwrap(), "obs", vec![1]),
///     Event::over(Interval::with_bounds(9, 12, false, true).unwrap(), "obs", vec![2]),
///     Event::over(Interval::with_bounds(20, 25, false, true).unwrap(), "obs", vec![3]),
/// ]);
/// // A gap of 1 fuses; a gap of 8 stays split.
/// let fused = seq.aggregate_events(union_aggregator(1, 2), None);
/// assert_eq!(fused.len(), 2);
/// let first = fused.get(0).unwrap();
/// assert_eq!((first.when().lo(), first.when().hi()), (&3, &12));
/// assert_eq!(first.value(), &vec![1, 2]);
/// ```
pub fn union_aggregator<T, Ty, V>(
    min_len: T::Span,
    max_gap: T::Span,
) -> impl FnMut(&mut Vec<Event<T, Ty, V>>, Event<T, Ty, V>)
where
    T: TimePoint,
    Ty: Clone,
    V: Merge,
{
    move |accumulator, event| {
        let (when, ty, value) = event.into_parts();
        let lo = when.lo().clone();
        let mut hi = when.hi().clone();
        if when.is_pointlike() {
            if let Some(widened) = lo.advance_by(&min_len) {
                hi = widened;
            }
        }
        let mergeable = match accumulator.last() {
            Some(last) => {
                let last_hi = last.when().hi();
                lo <= *last_hi
                    || T::span_between(last_hi, &lo).is_some_and(|gap| gap <= max_gap)
            }
            None => false,
        };
        if mergeable {
            if let Some(last) = accumulator.pop() {
                let (last_when, last_ty, mut last_value) = last.into_parts();
                let lo = last_when.lo().clone();
                let hi = if hi > *last_when.hi() {
                    hi
                } else {
                    last_when.hi().clone()
                };
                last_value.merge(value);
                accumulator.push(episode(lo, hi, last_ty, last_value));
            }
        } else {
            accumulator.push(episode(lo, hi, ty, value));
        }
    }
}

/// Assembles an in-progress episode event as a half-open interval, or a
/// point event when the bounds are degenerate.
fn episode<T, Ty, V>(lo: T, hi: T, ty: Ty, value: V) -> Event<T, Ty, V>
where
    T: TimePoint,
{
    if lo == hi {
        Event::new(When::At(lo), ty, value)
    } else {
        let interval =
            Interval::with_bounds(lo, hi, false, true).expect("episode bounds are ordered");
        Event::over(interval, ty, value)
    }
}
