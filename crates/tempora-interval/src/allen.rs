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

//! # Allen's Interval Algebra
//!
//! The thirteen mutually exclusive ways two intervals can be placed relative
//! to each other, encoded so that the inverse relation is the negation of
//! the code. See <https://en.wikipedia.org/wiki/Allen%27s_interval_algebra>.

/// A relation of Allen's interval algebra between intervals `a` and `b`.
///
/// The discriminants run from −6 (`Before`) to 6 (`After`) and inverse
/// relations have negated discriminants, so `r.inverse()` is exactly
/// `from_code(-r.code())`. The comments show the canonical sorted order of
/// endpoint placements each relation stands for.
///
/// # Examples
///
/// ```rust
/// use tempora_interval::AllenRelation;
///
/// assert_eq!(AllenRelation::Before.inverse(), AllenRelation::After);
/// assert_eq!(AllenRelation::Equal.inverse(), AllenRelation::Equal);
/// assert!(AllenRelation::AbutBefore.is_inverse(AllenRelation::AbutAfter));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum AllenRelation {
    /// a1 a2 b1 b2
    Before = -6,
    /// a1 a2=b1 b2
    AbutBefore = -5,
    /// a1 b1 a2 b2
    OverlapBefore = -4,
    /// a1 b1 a2=b2
    OutsideEnd = -3,
    /// a1 b1 b2 a2
    Outside = -2,
    /// a1=b1 a2 b2
    InsideBegin = -1,
    /// a1=b1 a2=b2
    Equal = 0,
    /// a1=b1 b2 a2
    OutsideBegin = 1,
    /// b1 a1 a2 b2
    Inside = 2,
    /// b1 a1 a2=b2
    InsideEnd = 3,
    /// b1 a1 b2 a2
    OverlapAfter = 4,
    /// b1 b2=a1 a2
    AbutAfter = 5,
    /// b1 b2 a1 a2
    After = 6,
}

impl AllenRelation {
    /// The numeric code of this relation in −6..=6.
    #[inline]
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// The relation with the given code, or `None` if the code is out of
    /// range.
    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            -6 => Some(Self::Before),
            -5 => Some(Self::AbutBefore),
            -4 => Some(Self::OverlapBefore),
            -3 => Some(Self::OutsideEnd),
            -2 => Some(Self::Outside),
            -1 => Some(Self::InsideBegin),
            0 => Some(Self::Equal),
            1 => Some(Self::OutsideBegin),
            2 => Some(Self::Inside),
            3 => Some(Self::InsideEnd),
            4 => Some(Self::OverlapAfter),
            5 => Some(Self::AbutAfter),
            6 => Some(Self::After),
            _ => None,
        }
    }

    /// The inverse relation: the relation of `b` to `a` given the relation
    /// of `a` to `b`. `Equal` is its own inverse.
    pub const fn inverse(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::AbutBefore => Self::AbutAfter,
            Self::OverlapBefore => Self::OverlapAfter,
            Self::OutsideEnd => Self::InsideEnd,
            Self::Outside => Self::Inside,
            Self::InsideBegin => Self::OutsideBegin,
            Self::Equal => Self::Equal,
            Self::OutsideBegin => Self::InsideBegin,
            Self::Inside => Self::Outside,
            Self::InsideEnd => Self::OutsideEnd,
            Self::OverlapAfter => Self::OverlapBefore,
            Self::AbutAfter => Self::AbutBefore,
            Self::After => Self::Before,
        }
    }

    /// Returns `true` if `other` is the inverse of `self`.
    #[inline]
    pub const fn is_inverse(self, other: Self) -> bool {
        self.code() == -other.code()
    }
}

impl std::fmt::Display for AllenRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Before => "before",
            Self::AbutBefore => "abut-before",
            Self::OverlapBefore => "overlap-before",
            Self::OutsideEnd => "outside-end",
            Self::Outside => "outside",
            Self::InsideBegin => "inside-begin",
            Self::Equal => "equal",
            Self::OutsideBegin => "outside-begin",
            Self::Inside => "inside",
            Self::InsideEnd => "inside-end",
            Self::OverlapAfter => "overlap-after",
            Self::AbutAfter => "abut-after",
            Self::After => "after",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AllenRelation; 13] = [
        AllenRelation::Before,
        AllenRelation::AbutBefore,
        AllenRelation::OverlapBefore,
        AllenRelation::OutsideEnd,
        AllenRelation::Outside,
        AllenRelation::InsideBegin,
        AllenRelation::Equal,
        AllenRelation::OutsideBegin,
        AllenRelation::Inside,
        AllenRelation::InsideEnd,
        AllenRelation::OverlapAfter,
        AllenRelation::AbutAfter,
        AllenRelation::After,
    ];

    #[test]
    fn test_codes_round_trip() {
        for rel in ALL {
            assert_eq!(AllenRelation::from_code(rel.code()), Some(rel));
        }
        assert_eq!(AllenRelation::from_code(7), None);
        assert_eq!(AllenRelation::from_code(-7), None);
    }

    #[test]
    fn test_inverse_negates_code() {
        for rel in ALL {
            assert_eq!(rel.inverse().code(), -rel.code());
            assert_eq!(rel.inverse().inverse(), rel);
            assert!(rel.is_inverse(rel.inverse()));
        }
    }

    #[test]
    fn test_named_inverses() {
        assert_eq!(AllenRelation::Before.inverse(), AllenRelation::After);
        assert_eq!(AllenRelation::AbutBefore.inverse(), AllenRelation::AbutAfter);
        assert_eq!(
            AllenRelation::OverlapBefore.inverse(),
            AllenRelation::OverlapAfter
        );
        assert_eq!(AllenRelation::OutsideEnd.inverse(), AllenRelation::InsideEnd);
        assert_eq!(AllenRelation::Outside.inverse(), AllenRelation::Inside);
        assert_eq!(
            AllenRelation::InsideBegin.inverse(),
            AllenRelation::OutsideBegin
        );
        assert_eq!(AllenRelation::Equal.inverse(), AllenRelation::Equal);
    }

    #[test]
    fn test_is_inverse_rejects_unrelated() {
        assert!(!AllenRelation::Before.is_inverse(AllenRelation::InsideEnd));
        assert!(AllenRelation::Equal.is_inverse(AllenRelation::Equal));
    }
}
