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

//! # Events
//!
//! An event is an immutable `(when, type, value)` triple: something observed
//! at a point in time or over a span of time. The *when* is either a bare
//! point of the time domain or an [`Interval`] over it, captured by the
//! [`When`] enum; the *type* says what was observed and the *value* carries
//! an optional payload.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::AtomicU64;
use tempora_core::time::TimePoint;
use tempora_interval::Interval;

/// When an event occurred: at a single point, or over an interval.
///
/// A point behaves exactly like the closed degenerate interval at the same
/// value: `When::At(t)` and `When::Over(Interval::point(t))` are equal and
/// sort together.
///
/// # Examples
///
/// ```rust
/// use tempora_interval::Interval;
/// use tempora_seq::When;
///
/// let at = When::At(3);
/// assert_eq!(at, When::Over(Interval::point(3)));
/// assert!(at < When::At(4));
/// assert!(!at.is_spanning());
/// assert!(When::Over(Interval::new(3, 5)).is_spanning());
/// ```
#[derive(Debug, Clone)]
pub enum When<T: TimePoint> {
    At(T),
    Over(Interval<T>),
}

impl<T: TimePoint> When<T> {
    /// The low bound: the point itself, or the interval's low bound.
    #[inline]
    pub fn lo(&self) -> &T {
        match self {
            When::At(t) => t,
            When::Over(interval) => interval.lo(),
        }
    }

    /// The high bound: the point itself, or the interval's high bound.
    #[inline]
    pub fn hi(&self) -> &T {
        match self {
            When::At(t) => t,
            When::Over(interval) => interval.hi(),
        }
    }

    /// Whether the low bound is excluded. A point is closed on both sides.
    #[inline]
    pub fn is_lo_open(&self) -> bool {
        match self {
            When::At(_) => false,
            When::Over(interval) => interval.is_lo_open(),
        }
    }

    /// Whether the high bound is excluded.
    #[inline]
    pub fn is_hi_open(&self) -> bool {
        match self {
            When::At(_) => false,
            When::Over(interval) => interval.is_hi_open(),
        }
    }

    /// Whether this is an empty interval. A bare point is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            When::At(_) => false,
            When::Over(interval) => interval.is_empty(),
        }
    }

    /// Whether this occurrence genuinely spans time (`lo != hi`).
    #[inline]
    pub fn is_spanning(&self) -> bool {
        self.lo() != self.hi()
    }

    /// Whether this occurrence is a point or a degenerate interval.
    #[inline]
    pub fn is_pointlike(&self) -> bool {
        !self.is_spanning()
    }

    /// The comparison key `(lo, lo_open, hi, ¬hi_open)`; see
    /// [`Interval::key`].
    #[inline]
    pub fn key(&self) -> (&T, bool, &T, bool) {
        (self.lo(), self.is_lo_open(), self.hi(), !self.is_hi_open())
    }
}

impl<T: TimePoint> From<T> for When<T> {
    #[inline]
    fn from(t: T) -> Self {
        When::At(t)
    }
}

impl<T: TimePoint> From<Interval<T>> for When<T> {
    #[inline]
    fn from(interval: Interval<T>) -> Self {
        When::Over(interval)
    }
}

impl<T: TimePoint> PartialEq for When<T> {
    fn eq(&self, other: &Self) -> bool {
        (self.is_empty() && other.is_empty()) || self.key() == other.key()
    }
}

impl<T: TimePoint> Eq for When<T> {}

impl<T: TimePoint> PartialOrd for When<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: TimePoint> Ord for When<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.key().cmp(&other.key()),
        }
    }
}

impl<T: TimePoint + Hash> Hash for When<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_empty() {
            0u8.hash(state);
        } else {
            1u8.hash(state);
            self.key().hash(state);
        }
    }
}

impl<T: TimePoint + fmt::Display> fmt::Display for When<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            When::At(t) => write!(f, "{}", t),
            When::Over(interval) => write!(f, "{}", interval),
        }
    }
}

/// An immutable observation: something of type `Ty` happened at `when`,
/// optionally carrying a `value`.
///
/// Two events are equal iff all three fields are equal.
///
/// # Examples
///
/// ```rust
/// use tempora_interval::Interval;
/// use tempora_seq::Event;
///
/// let rain = Event::over(Interval::new(3, 8), "rain", 2.5);
/// assert_eq!(rain.ty(), &"rain");
/// assert_eq!(rain.when().lo(), &3);
///
/// let gust: Event<i64, &str> = Event::at(5, "gust", ());
/// assert!(gust.when().is_pointlike());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event<T: TimePoint, Ty, V = ()> {
    when: When<T>,
    ty: Ty,
    value: V,
}

impl<T: TimePoint, Ty, V> Event<T, Ty, V> {
    /// Creates an event from its parts.
    #[inline]
    pub fn new(when: When<T>, ty: Ty, value: V) -> Self {
        Self { when, ty, value }
    }

    /// Creates a point event.
    #[inline]
    pub fn at(t: T, ty: Ty, value: V) -> Self {
        Self::new(When::At(t), ty, value)
    }

    /// Creates an interval event.
    #[inline]
    pub fn over(interval: Interval<T>, ty: Ty, value: V) -> Self {
        Self::new(When::Over(interval), ty, value)
    }

    /// When the event occurred.
    #[inline]
    pub fn when(&self) -> &When<T> {
        &self.when
    }

    /// What was observed.
    #[inline]
    pub fn ty(&self) -> &Ty {
        &self.ty
    }

    /// The payload.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Decomposes the event into its parts.
    #[inline]
    pub fn into_parts(self) -> (When<T>, Ty, V) {
        (self.when, self.ty, self.value)
    }
}

impl<T, Ty, V> fmt::Display for Event<T, Ty, V>
where
    T: TimePoint + fmt::Display,
    Ty: fmt::Display,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event({}, {}, {:?})", self.when, self.ty, self.value)
    }
}

/// An opaque identifier shared by all events of a sequence.
///
/// Sequences constructed without an explicit id receive a synthesized one
/// from a process-wide counter.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceId(u64);

impl SequenceId {
    /// Wraps a caller-chosen identifier.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Hands out a fresh identifier from a process-wide counter.
    pub fn synthesize() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, std::sync::atomic::Ordering::Relaxed))
    }
}

impl From<u64> for SequenceId {
    #[inline]
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SequenceId({})", self.0)
    }
}

/// A typed index into a sequence's sorted event array.
///
/// Distinct from a raw `usize` so positions in the event array cannot be
/// mixed up with positions in the sorted bound arrays they are recovered
/// from.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventIndex(usize);

impl EventIndex {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for EventIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventIndex({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_when_point_equals_degenerate_interval() {
        assert_eq!(When::At(3), When::Over(Interval::point(3)));
        assert_ne!(When::At(3), When::Over(Interval::new(3, 5)));
    }

    #[test]
    fn test_when_ordering() {
        assert!(When::At(3) < When::At(4));
        // A spanning interval at the same low bound sorts after the point,
        // because the point's high bound is smaller.
        assert!(When::At(3) < When::Over(Interval::new(3, 5)));
        // Empties sort first and compare equal.
        assert_eq!(When::Over(Interval::empty(9)), When::Over(Interval::empty(2)));
        assert!(When::Over(Interval::empty(9)) < When::At(0));
    }

    #[test]
    fn test_when_bounds() {
        let w = When::Over(Interval::with_bounds(3, 8, false, true).unwrap());
        assert_eq!((w.lo(), w.hi()), (&3, &8));
        assert!(!w.is_lo_open());
        assert!(w.is_hi_open());
        assert!(w.is_spanning());
        assert!(When::At(5).is_pointlike());
    }

    #[test]
    fn test_event_equality() {
        let a = Event::at(3, "a", 1);
        assert_eq!(a, Event::at(3, "a", 1));
        assert_ne!(a, Event::at(3, "a", 2));
        assert_ne!(a, Event::at(3, "b", 1));
        assert_ne!(a, Event::at(4, "a", 1));
        // A point event equals the same event anchored to a point interval.
        assert_eq!(a, Event::over(Interval::point(3), "a", 1));
    }

    #[test]
    fn test_sequence_id_synthesis_is_unique() {
        let a = SequenceId::synthesize();
        let b = SequenceId::synthesize();
        assert_ne!(a, b);
        assert_eq!(SequenceId::new(7).get(), 7);
        assert_eq!(SequenceId::from(7u64), SequenceId::new(7));
    }

    #[test]
    fn test_event_index() {
        let i = EventIndex::new(5);
        assert_eq!(i.get(), 5);
        assert_eq!(format!("{}", i), "EventIndex(5)");
    }
}
