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

//! # Transition Sweeps
//!
//! A sweep-line decomposition of a sequence's interval boundaries. Every
//! spanning event contributes a *start* impulse at its low bound and a
//! *stop* impulse at its high bound; every point-like event contributes a
//! single *point* impulse. Impulses are ordered by `(when, −rank)` so that
//! starts sort before stops at the same instant, then grouped by equal
//! `when` and classified into `(when, starts, stops, points)`.
//!
//! The grouping deliberately leaves the interpretation of coincident starts
//! and stops to the caller: applications differ on whether an interval that
//! stops exactly where another starts means a hand-off or a gap, and the
//! three lists carry enough information for either convention.

use crate::event::Event;
use crate::sequence::EventSequence;
use std::hash::Hash;
use tempora_core::time::TimePoint;

/// What a single impulse marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImpulseKind {
    Start,
    Stop,
    Point,
}

impl ImpulseKind {
    /// Start and point impulses outrank stop impulses, so they come first
    /// at a shared instant.
    #[inline]
    fn rank(self) -> u8 {
        match self {
            ImpulseKind::Start | ImpulseKind::Point => 1,
            ImpulseKind::Stop => 0,
        }
    }
}

/// One impulse of the sweep: an event boundary at a specific time.
#[derive(Debug, Clone)]
struct Impulse<'a, T: TimePoint, Ty, V> {
    when: &'a T,
    kind: ImpulseKind,
    event: &'a Event<T, Ty, V>,
}

/// All boundary activity at one instant: the events starting, stopping,
/// and occurring as points at `when`.
#[derive(Debug, Clone)]
pub struct Transition<'a, T: TimePoint, Ty, V> {
    pub when: &'a T,
    pub starts: Vec<&'a Event<T, Ty, V>>,
    pub stops: Vec<&'a Event<T, Ty, V>>,
    pub points: Vec<&'a Event<T, Ty, V>>,
}

/// The one-shot iterator returned by
/// [`EventSequence::transitions`]. Yields [`Transition`]s in ascending
/// `when` order.
#[derive(Debug)]
pub struct Transitions<'a, T: TimePoint, Ty, V> {
    impulses: Vec<Impulse<'a, T, Ty, V>>,
    position: usize,
}

impl<'a, T: TimePoint, Ty, V> Iterator for Transitions<'a, T, Ty, V> {
    type Item = Transition<'a, T, Ty, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.impulses.get(self.position)?;
        let when = first.when;
        let mut transition = Transition {
            when,
            starts: Vec::new(),
            stops: Vec::new(),
            points: Vec::new(),
        };
        while let Some(impulse) = self.impulses.get(self.position) {
            if impulse.when != when {
                break;
            }
            match impulse.kind {
                ImpulseKind::Start => transition.starts.push(impulse.event),
                ImpulseKind::Stop => transition.stops.push(impulse.event),
                ImpulseKind::Point => transition.points.push(impulse.event),
            }
            self.position += 1;
        }
        Some(transition)
    }
}

impl<T, Ty, V, F> EventSequence<T, Ty, V, F>
where
    T: TimePoint,
    Ty: Ord + Hash + Clone,
{
    /// Sweeps the boundaries of the selected types (default: all, in sorted
    /// type order for determinism) and yields one [`Transition`] per
    /// distinct boundary instant, in ascending order.
    ///
    /// The returned iterator is single-pass; collect it if you need to walk
    /// the transitions more than once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tempora_interval::Interval;
    /// use tempora_seq::{Event, EventSequence};
    ///
    /// let seq: EventSequence<i64, &str> = EventSequence::new([
    ///     Event::over(Interval::new(0, 5), "a", ()),
    ///     Event::at(5, "b", ()),
    /// ]);
    /// let groups: Vec<_> = seq.transitions(None).collect();
    /// assert_eq!(groups.len(), 2);
    /// assert_eq!(groups[0].starts.len(), 1);
    /// // At 5 the interval stops and the point fires together.
    /// assert_eq!(groups[1].stops.len(), 1);
    /// assert_eq!(groups[1].points.len(), 1);
    /// ```
    pub fn transitions(&self, types: Option<&[Ty]>) -> Transitions<'_, T, Ty, V> {
        let selected = self.selected_types(types);
        let mut impulses: Vec<Impulse<'_, T, Ty, V>> = Vec::new();
        for ty in &selected {
            for event in self.events_of_type(ty) {
                if event.when().is_spanning() {
                    impulses.push(Impulse {
                        when: event.when().lo(),
                        kind: ImpulseKind::Start,
                        event,
                    });
                    impulses.push(Impulse {
                        when: event.when().hi(),
                        kind: ImpulseKind::Stop,
                        event,
                    });
                } else {
                    impulses.push(Impulse {
                        when: event.when().lo(),
                        kind: ImpulseKind::Point,
                        event,
                    });
                }
            }
        }
        // (when, −rank): starts and points ahead of stops at a shared
        // instant. The sort is stable, so ties keep type order.
        impulses.sort_by(|a, b| {
            a.when
                .cmp(b.when)
                .then_with(|| b.kind.rank().cmp(&a.kind.rank()))
        });
        Transitions {
            impulses,
            position: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_interval::Interval;

    fn seq() -> EventSequence<i64, &'static str> {
        EventSequence::new([
            Event::over(Interval::new(0, 4), "a", ()),
            Event::over(Interval::new(4, 7), "a", ()),
            Event::at(2, "b", ()),
            Event::over(Interval::new(2, 2), "c", ()),
            Event::at(9, "b", ()),
        ])
    }

    #[test]
    fn test_every_boundary_appears_once() {
        let seq = seq();
        let mut starts = 0;
        let mut stops = 0;
        let mut points = 0;
        for transition in seq.transitions(None) {
            starts += transition.starts.len();
            stops += transition.stops.len();
            points += transition.points.len();
        }
        // Two spanning events, three point-like ones (including the
        // degenerate interval).
        assert_eq!(starts, 2);
        assert_eq!(stops, 2);
        assert_eq!(points, 3);
    }

    #[test]
    fn test_groups_ascend_and_merge_coincident_boundaries() {
        let seq = seq();
        let groups: Vec<_> = seq.transitions(None).collect();
        let whens: Vec<&i64> = groups.iter().map(|g| g.when).collect();
        assert_eq!(whens, vec![&0, &2, &4, &7, &9]);
        // At 4 one interval stops and the next starts; both are reported in
        // the same group, classification left to the caller.
        let at4 = &groups[2];
        assert_eq!(at4.starts.len(), 1);
        assert_eq!(at4.stops.len(), 1);
        assert!(at4.points.is_empty());
        // The degenerate interval at 2 counts as a point, alongside the
        // plain point event.
        let at2 = &groups[1];
        assert_eq!(at2.points.len(), 2);
        assert!(at2.starts.is_empty() && at2.stops.is_empty());
    }

    #[test]
    fn test_type_selection() {
        let seq = seq();
        let groups: Vec<_> = seq.transitions(Some(&["b"])).collect();
        let whens: Vec<&i64> = groups.iter().map(|g| g.when).collect();
        assert_eq!(whens, vec![&2, &9]);
        assert!(groups.iter().all(|g| g.starts.is_empty()));
        // Absent types are ignored.
        assert_eq!(seq.transitions(Some(&["missing"])).count(), 0);
    }

    #[test]
    fn test_empty_sequence_has_no_transitions() {
        let seq: EventSequence<i64, &str> = EventSequence::new([]);
        assert_eq!(seq.transitions(None).count(), 0);
    }

    #[test]
    fn test_interval_event_start_and_stop_pair() {
        let seq: EventSequence<i64, &str> =
            EventSequence::new([Event::over(Interval::new(1, 6), "x", ())]);
        let groups: Vec<_> = seq.transitions(None).collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].when, &1);
        assert_eq!(groups[0].starts.len(), 1);
        assert_eq!(groups[1].when, &6);
        assert_eq!(groups[1].stops.len(), 1);
        assert_eq!(groups[0].starts[0], groups[1].stops[0]);
    }
}
