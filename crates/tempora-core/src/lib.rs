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

//! # Tempora Core
//!
//! Foundational primitives for the Tempora event-sequence ecosystem. This
//! crate consolidates the reusable building blocks that higher-level interval
//! and sequence crates are built on.
//!
//! ## Modules
//!
//! - `time`: The [`TimePoint`](time::TimePoint) trait describing orderable
//!   time domains, with an optional measurement capability (span between two
//!   points, zero span, advancing a point by a span) expressed per
//!   implementation rather than probed at runtime.
//! - `search`: A generalized binary search over sorted, arbitrarily keyed
//!   slices supporting existence, left/right insertion point, and full
//!   equal-range targets, plus a multi-column joint search that intersects
//!   per-column range results without materializing a join.
//!
//! ## Purpose
//!
//! These primitives enable generic, allocation-light query code over
//! immutable sorted indexes while keeping absence a value (`Result` with an
//! insertion point), never an exception.

pub mod search;
pub mod time;
