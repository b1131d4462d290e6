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

//! # Time Domains
//!
//! A *time domain* is any totally ordered set of values that events can be
//! anchored to: integers, floating-point seconds, dates, or even strings with
//! a sortable format. Some domains additionally support *measurement*: the
//! distance between two points is itself a value (a span) that can be
//! compared with other spans and added back onto a point.
//!
//! Whether a domain measures is a property of the type, not of an individual
//! value, so [`TimePoint`] exposes the measurement operations as
//! `Option`-returning associated functions: an implementation for an
//! unmeasurable domain simply returns `None` from all of them. Callers that
//! require measurement (e.g. gap-based episode merging) document that
//! requirement instead of probing at runtime.

use std::fmt::Debug;

/// A point in a totally ordered time domain.
///
/// The `Span` associated type is the domain's measure of distance. For
/// numeric domains the span is the domain itself; for ordered-but-unmeasured
/// domains use [`Unmeasured`] (or any placeholder) and return `None` from the
/// measurement functions.
///
/// # Examples
///
/// ```rust
/// use tempora_core::time::TimePoint;
///
/// assert_eq!(<i64 as TimePoint>::span_between(&3, &8), Some(5));
/// assert_eq!(<i64 as TimePoint>::zero_span(), Some(0));
/// assert_eq!(7i64.advance_by(&2), Some(9));
///
/// // Strings are ordered but not measurable.
/// let lo = String::from("2018-10-31");
/// let hi = String::from("2018-11-01");
/// assert_eq!(String::span_between(&lo, &hi), None);
/// ```
pub trait TimePoint: Ord + Clone {
    /// The measure of distance between two points of this domain.
    type Span: Clone + PartialEq + PartialOrd + Debug;

    /// Returns `hi - lo`, or `None` if the domain does not measure (or the
    /// result is not representable).
    fn span_between(lo: &Self, hi: &Self) -> Option<Self::Span>;

    /// Returns the zero-length span, or `None` if the domain does not
    /// measure.
    fn zero_span() -> Option<Self::Span>;

    /// Returns `self + span`, or `None` if the domain does not measure (or
    /// the result is not representable).
    fn advance_by(&self, span: &Self::Span) -> Option<Self>;

    /// Returns `a + b`, or `None` if the domain does not measure (or the
    /// sum is not representable). Used to total the known lengths of a
    /// collection of intervals.
    fn accumulate(a: &Self::Span, b: &Self::Span) -> Option<Self::Span>;
}

/// Span placeholder for domains that are ordered but not measurable.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Unmeasured;

macro_rules! impl_time_point_for_int {
    ($t:ty) => {
        impl TimePoint for $t {
            type Span = $t;

            #[inline]
            fn span_between(lo: &Self, hi: &Self) -> Option<Self::Span> {
                num_traits::CheckedSub::checked_sub(hi, lo)
            }

            #[inline]
            fn zero_span() -> Option<Self::Span> {
                Some(num_traits::Zero::zero())
            }

            #[inline]
            fn advance_by(&self, span: &Self::Span) -> Option<Self> {
                num_traits::CheckedAdd::checked_add(self, span)
            }

            #[inline]
            fn accumulate(a: &Self::Span, b: &Self::Span) -> Option<Self::Span> {
                num_traits::CheckedAdd::checked_add(a, b)
            }
        }
    };
}

impl_time_point_for_int!(i8);
impl_time_point_for_int!(u8);
impl_time_point_for_int!(i16);
impl_time_point_for_int!(u16);
impl_time_point_for_int!(i32);
impl_time_point_for_int!(u32);
impl_time_point_for_int!(i64);
impl_time_point_for_int!(u64);
impl_time_point_for_int!(i128);
impl_time_point_for_int!(u128);
impl_time_point_for_int!(isize);
impl_time_point_for_int!(usize);

impl TimePoint for String {
    type Span = Unmeasured;

    #[inline]
    fn span_between(_lo: &Self, _hi: &Self) -> Option<Self::Span> {
        None
    }

    #[inline]
    fn zero_span() -> Option<Self::Span> {
        None
    }

    #[inline]
    fn advance_by(&self, _span: &Self::Span) -> Option<Self> {
        None
    }

    #[inline]
    fn accumulate(_a: &Self::Span, _b: &Self::Span) -> Option<Self::Span> {
        None
    }
}

impl<'a> TimePoint for &'a str {
    type Span = Unmeasured;

    #[inline]
    fn span_between(_lo: &Self, _hi: &Self) -> Option<Self::Span> {
        None
    }

    #[inline]
    fn zero_span() -> Option<Self::Span> {
        None
    }

    #[inline]
    fn advance_by(&self, _span: &Self::Span) -> Option<Self> {
        None
    }

    #[inline]
    fn accumulate(_a: &Self::Span, _b: &Self::Span) -> Option<Self::Span> {
        None
    }
}
