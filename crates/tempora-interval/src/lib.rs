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

//! # Tempora Interval
//!
//! Intervals over any [`TimePoint`](tempora_core::time::TimePoint) domain,
//! with independently open or closed bounds, optional lengths, careful
//! point/empty normalization, and an interval algebra:
//!
//! - Set operations: union (possibly yielding a
//!   [`CompoundInterval`](crate::interval::CompoundInterval)), intersection
//!   with empty short-circuiting, containment, and subset tests.
//! - [`AllenRelation`](crate::allen::AllenRelation): the thirteen relations
//!   of Allen's interval algebra, where the inverse of a relation is the
//!   negation of its code.
//!
//! Invariant violations at construction time (`lo > hi`, negative lengths)
//! fail fast through [`IntervalError`](crate::interval::IntervalError) or
//! the panicking `new` constructor; everything after construction is a pure
//! total function.

pub mod allen;
pub mod interval;

pub use allen::AllenRelation;
pub use interval::{CompoundInterval, Interval, IntervalError, IntervalUnion};
