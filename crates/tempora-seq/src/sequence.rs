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

//! # Event Sequences
//!
//! An [`EventSequence`] is an immutable, queryable batch of events sharing
//! one identity. Construction sorts the events by `(when, type)` and builds
//! three indexes in one pass over the result:
//!
//! - `lows`: the events' low bounds, tagged with their event positions and
//!   sorted by bound; the backbone of every time-based search;
//! - `highs`: the analogous high-bound array, materialized only when some
//!   event genuinely spans time (otherwise it would be identical to `lows`
//!   and sorting it twice is wasted work);
//! - a type index mapping each event type to its positions in time order.
//!
//! Everything built at construction is frozen for the sequence's lifetime.
//! The one exception is the *fact* map (atemporal key/value attributes of
//! the whole sequence), which stays writable through
//! [`facts_mut`](EventSequence::facts_mut) and is not safe for
//! uncoordinated concurrent writers.
//!
//! Queries never fail on ordinary absence: lookups return `Option` or empty
//! collections, and every query degrades gracefully on an empty sequence.

use crate::event::{Event, EventIndex, SequenceId, When};
use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::Bound;
use tempora_core::search::{equal_range_by_key, equal_range_by_key_in, search_by_key, Target};
use tempora_core::time::TimePoint;

/// An immutable, indexed batch of events with one identity and a mutable
/// fact side table.
///
/// Type parameters: `T` is the time domain, `Ty` the event type, `V` the
/// event value, and `F` the fact value.
///
/// # Examples
///
/// ```rust
/// use tempora_seq::{Event, EventSequence};
///
/// let seq: EventSequence<i64, &str> = EventSequence::new([
///     Event::at(3, "y", ()),
///     Event::at(0, "e", ()),
///     Event::at(3, "t", ()),
/// ]);
/// assert_eq!(seq.len(), 3);
/// assert!(seq.has_type(&"e"));
/// let order: Vec<&str> = seq.events().map(|e| *e.ty()).collect();
/// assert_eq!(order, vec!["e", "t", "y"]);
/// ```
#[derive(Debug, Clone)]
pub struct EventSequence<T: TimePoint, Ty, V = (), F = ()> {
    id: SequenceId,
    facts: FxHashMap<String, F>,
    events: Vec<Event<T, Ty, V>>,
    lows: Vec<(T, EventIndex)>,
    highs: Option<Vec<(T, EventIndex)>>,
    type_index: FxHashMap<Ty, Vec<EventIndex>>,
}

impl<T, Ty, V, F> EventSequence<T, Ty, V, F>
where
    T: TimePoint,
    Ty: Ord + Hash + Clone,
{
    /// Builds a sequence with a synthesized id and no facts.
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Event<T, Ty, V>>,
    {
        Self::assemble(SequenceId::synthesize(), FxHashMap::default(), events)
    }

    /// Builds a sequence with the given id and no facts.
    pub fn with_id<I>(id: SequenceId, events: I) -> Self
    where
        I: IntoIterator<Item = Event<T, Ty, V>>,
    {
        Self::assemble(id, FxHashMap::default(), events)
    }

    /// Builds a sequence with the given id and facts.
    pub fn with_facts<I>(id: SequenceId, facts: FxHashMap<String, F>, events: I) -> Self
    where
        I: IntoIterator<Item = Event<T, Ty, V>>,
    {
        Self::assemble(id, facts, events)
    }

    /// Sorts the events and builds all derived indexes.
    fn assemble<I>(id: SequenceId, facts: FxHashMap<String, F>, events: I) -> Self
    where
        I: IntoIterator<Item = Event<T, Ty, V>>,
    {
        let mut events: Vec<Event<T, Ty, V>> = events.into_iter().collect();
        events.sort_by(|a, b| a.when().cmp(b.when()).then_with(|| a.ty().cmp(b.ty())));
        let mut lows: Vec<(T, EventIndex)> = Vec::with_capacity(events.len());
        let mut any_spanning = false;
        for (i, event) in events.iter().enumerate() {
            lows.push((event.when().lo().clone(), EventIndex::new(i)));
            any_spanning |= event.when().is_spanning();
        }
        lows.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        let highs = if any_spanning {
            let mut highs: Vec<(T, EventIndex)> = events
                .iter()
                .enumerate()
                .map(|(i, event)| (event.when().hi().clone(), EventIndex::new(i)))
                .collect();
            highs.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
            Some(highs)
        } else {
            None
        };
        let mut type_index: FxHashMap<Ty, Vec<EventIndex>> = FxHashMap::default();
        for (i, event) in events.iter().enumerate() {
            type_index
                .entry(event.ty().clone())
                .or_default()
                .push(EventIndex::new(i));
        }
        Self {
            id,
            facts,
            events,
            lows,
            highs,
            type_index,
        }
    }

    /// The sequence identity.
    #[inline]
    pub fn id(&self) -> SequenceId {
        self.id
    }

    /// The number of events.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the sequence holds no events.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The event at the given position of the sorted order.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Event<T, Ty, V>> {
        self.events.get(index)
    }

    /// Iterates over the events in `(when, type)` order. Restartable.
    #[inline]
    pub fn events(&self) -> std::slice::Iter<'_, Event<T, Ty, V>> {
        self.events.iter()
    }

    /// The event types present in this sequence, in no particular order.
    pub fn types(&self) -> impl Iterator<Item = &Ty> {
        self.type_index.keys()
    }

    /// Whether any event has the given type.
    #[inline]
    pub fn has_type(&self, ty: &Ty) -> bool {
        self.type_index.contains_key(ty)
    }

    /// How many events have the given type.
    pub fn n_events_of_type(&self, ty: &Ty) -> usize {
        self.type_index.get(ty).map_or(0, Vec::len)
    }

    /// Iterates over the events of one type, in time order. Restartable.
    pub fn events_of_type<'a>(&'a self, ty: &Ty) -> impl Iterator<Item = &'a Event<T, Ty, V>> {
        self.bucket(ty)
            .iter()
            .map(move |index| &self.events[index.get()])
    }

    #[inline]
    fn bucket(&self, ty: &Ty) -> &[EventIndex] {
        self.type_index.get(ty).map(Vec::as_slice).unwrap_or_default()
    }

    #[inline]
    fn event_at(&self, index: EventIndex) -> &Event<T, Ty, V> {
        &self.events[index.get()]
    }

    /// The fact map: atemporal key/value attributes of the whole sequence.
    #[inline]
    pub fn facts(&self) -> &FxHashMap<String, F> {
        &self.facts
    }

    /// Mutable access to the fact map.
    ///
    /// This is the sole mutable surface of a sequence. It is not safe for
    /// uncoordinated concurrent writers; treat it as single-writer.
    #[inline]
    pub fn facts_mut(&mut self) -> &mut FxHashMap<String, F> {
        &mut self.facts
    }

    /// The fact stored under `key`, if any.
    pub fn fact(&self, key: &str) -> Option<&F> {
        self.facts.get(key)
    }

    /// Whether a fact is stored under `key`.
    pub fn has_fact(&self, key: &str) -> bool {
        self.facts.contains_key(key)
    }

    /// Stores a fact, returning the previous value under that key.
    pub fn set_fact(&mut self, key: impl Into<String>, value: F) -> Option<F> {
        self.facts.insert(key.into(), value)
    }

    /// Whether any event occurred exactly at `when`.
    pub fn has_when(&self, when: &When<T>) -> bool {
        search_by_key(
            &self.events,
            |_, event: &Event<T, Ty, V>| event.when().clone(),
            when,
            Target::Any,
        )
        .is_ok()
    }

    /// Whether this exact event (all three fields equal) is present.
    ///
    /// Narrows to the equal-`when` run, then to the equal-type run inside
    /// it, and only then scans linearly: values are not orderable in
    /// general, so the final comparison has to walk the (normally tiny)
    /// tied run.
    pub fn has_event(&self, event: &Event<T, Ty, V>) -> bool
    where
        V: PartialEq,
    {
        let when_range = match equal_range_by_key(
            &self.events,
            |_, e: &Event<T, Ty, V>| e.when().clone(),
            event.when(),
            None,
        ) {
            Ok(range) => range,
            Err(_) => return false,
        };
        let ty_range = match equal_range_by_key_in(
            &self.events,
            when_range,
            |_, e: &Event<T, Ty, V>| e.ty().clone(),
            event.ty(),
            None,
        ) {
            Ok(range) => range,
            Err(_) => return false,
        };
        self.events[ty_range].iter().any(|e| e == event)
    }

    /// The first event of the given type, or `None` if the type is absent.
    pub fn first(&self, ty: &Ty) -> Option<&Event<T, Ty, V>> {
        self.bucket(ty).first().map(|&index| self.event_at(index))
    }

    /// The first event of the given type at or after `after`, or strictly
    /// after it when `strict` is set.
    ///
    /// `strict` skips the entire run of events equal to `after`;
    /// non-`strict` lands at the start of that run.
    pub fn first_after(&self, ty: &Ty, after: &When<T>, strict: bool) -> Option<&Event<T, Ty, V>> {
        let bucket = self.bucket(ty);
        let target = if strict { Target::Hi } else { Target::Lo };
        let position = match search_by_key(
            bucket,
            |_, index: &EventIndex| self.event_at(*index).when().clone(),
            after,
            target,
        ) {
            Ok(position) | Err(position) => position,
        };
        bucket.get(position).map(|&index| self.event_at(index))
    }

    /// Positions in a sorted bound array whose bound satisfies a lower
    /// constraint.
    fn cut_at_least(bounds: &[(T, EventIndex)], constraint: Bound<&T>) -> std::ops::Range<usize> {
        let position = match constraint {
            Bound::Unbounded => 0,
            Bound::Included(value) => {
                match search_by_key(bounds, |_, pair: &(T, EventIndex)| pair.0.clone(), value, Target::Lo)
                {
                    Ok(position) | Err(position) => position,
                }
            }
            Bound::Excluded(value) => {
                match search_by_key(bounds, |_, pair: &(T, EventIndex)| pair.0.clone(), value, Target::Hi)
                {
                    Ok(position) | Err(position) => position,
                }
            }
        };
        position..bounds.len()
    }

    /// Positions in a sorted bound array whose bound satisfies an upper
    /// constraint.
    fn cut_at_most(bounds: &[(T, EventIndex)], constraint: Bound<&T>) -> std::ops::Range<usize> {
        let position = match constraint {
            Bound::Unbounded => bounds.len(),
            Bound::Included(value) => {
                match search_by_key(bounds, |_, pair: &(T, EventIndex)| pair.0.clone(), value, Target::Hi)
                {
                    Ok(position) | Err(position) => position,
                }
            }
            Bound::Excluded(value) => {
                match search_by_key(bounds, |_, pair: &(T, EventIndex)| pair.0.clone(), value, Target::Lo)
                {
                    Ok(position) | Err(position) => position,
                }
            }
        };
        0..position
    }

    /// Collects the event positions of a bound-array range into a bit set.
    fn positions_to_set(
        &self,
        bounds: &[(T, EventIndex)],
        range: std::ops::Range<usize>,
    ) -> FixedBitSet {
        let mut set = FixedBitSet::with_capacity(self.events.len());
        for position in range {
            set.insert(bounds[position].1.get());
        }
        set
    }

    /// The union of the requested types' position sets.
    fn type_set(&self, types: &[Ty]) -> FixedBitSet {
        let mut set = FixedBitSet::with_capacity(self.events.len());
        for ty in types {
            for index in self.bucket(ty) {
                set.insert(index.get());
            }
        }
        set
    }

    /// Materializes a bit set of event positions in `(when, type)` order.
    fn collect_set(&self, set: &FixedBitSet) -> Vec<&Event<T, Ty, V>> {
        set.ones().map(|position| &self.events[position]).collect()
    }

    /// The events lying entirely between `lo` and `hi`: each event's low
    /// bound satisfies the `lo` constraint and its high bound the `hi`
    /// constraint, each side independently (`Bound::Unbounded` means no
    /// constraint). Optionally restricted to the given types. Materialized,
    /// in `(when, type)` order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::ops::Bound;
    /// use tempora_seq::{Event, EventSequence};
    ///
    /// let seq: EventSequence<i64, &str> = EventSequence::new([
    ///     Event::at(0, "e", ()),
    ///     Event::at(3, "y", ()),
    ///     Event::at(3, "t", ()),
    ///     Event::at(5, "y", ()),
    /// ]);
    /// let hits = seq.events_between(Bound::Unbounded, Bound::Included(&3), None);
    /// let order: Vec<&str> = hits.iter().map(|e| *e.ty()).collect();
    /// assert_eq!(order, vec!["e", "t", "y"]);
    /// ```
    pub fn events_between(
        &self,
        lo: Bound<&T>,
        hi: Bound<&T>,
        types: Option<&[Ty]>,
    ) -> Vec<&Event<T, Ty, V>> {
        if self.events.is_empty() {
            return Vec::new();
        }
        let low_range = Self::cut_at_least(&self.lows, lo);
        let mut set = self.positions_to_set(&self.lows, low_range);
        let highs = self.highs.as_deref().unwrap_or(&self.lows);
        let high_range = Self::cut_at_most(highs, hi);
        set.intersect_with(&self.positions_to_set(highs, high_range));
        if let Some(types) = types {
            set.intersect_with(&self.type_set(types));
        }
        self.collect_set(&set)
    }

    /// The events overlapping the query range: each event's low bound lies
    /// at or below the query's upper bound *and* its high bound at or above
    /// the query's lower bound. Materialized, in `(when, type)` order.
    pub fn events_overlapping(
        &self,
        lo: Bound<&T>,
        hi: Bound<&T>,
        types: Option<&[Ty]>,
    ) -> Vec<&Event<T, Ty, V>> {
        if self.events.is_empty() {
            return Vec::new();
        }
        let low_range = Self::cut_at_most(&self.lows, hi);
        let mut set = self.positions_to_set(&self.lows, low_range);
        let highs = self.highs.as_deref().unwrap_or(&self.lows);
        let high_range = Self::cut_at_least(highs, lo);
        set.intersect_with(&self.positions_to_set(highs, high_range));
        if let Some(types) = types {
            set.intersect_with(&self.type_set(types));
        }
        self.collect_set(&set)
    }

    /// The events lying entirely at or after `lo`.
    pub fn events_after(&self, lo: Bound<&T>, types: Option<&[Ty]>) -> Vec<&Event<T, Ty, V>> {
        self.events_between(lo, Bound::Unbounded, types)
    }

    /// The events lying entirely at or before `hi`.
    pub fn events_before(&self, hi: Bound<&T>, types: Option<&[Ty]>) -> Vec<&Event<T, Ty, V>> {
        self.events_between(Bound::Unbounded, hi, types)
    }

    /// Whether events of the given types occur in the given order.
    ///
    /// With two types: does the earliest `types[0]` event start before (or,
    /// non-strict, not after) the latest `types[1]` event? With three or
    /// more: a chain walk that requires each type to occur at or after the
    /// previous type's match; `strict` additionally requires each step to
    /// start after the *entire* tied run of the previous match.
    ///
    /// The ordering compares event low bounds; only point semantics are
    /// verified for interval-valued occurrences.
    ///
    /// An empty type list is trivially true; a single type reduces to
    /// [`has_type`](Self::has_type); any absent type makes the answer
    /// `false`.
    pub fn before(&self, types: &[Ty], strict: bool) -> bool {
        match types {
            [] => true,
            [ty] => self.has_type(ty),
            [first_ty, second_ty] => {
                let (Some(first_bucket), Some(second_bucket)) =
                    (self.type_index.get(first_ty), self.type_index.get(second_ty))
                else {
                    return false;
                };
                let (Some(&earliest), Some(&latest)) =
                    (first_bucket.first(), second_bucket.last())
                else {
                    return false;
                };
                let start = self.event_at(earliest).when().lo();
                let end = self.event_at(latest).when().lo();
                if strict {
                    start < end
                } else {
                    start <= end
                }
            }
            _ => self.before_chain(types, strict),
        }
    }

    /// The monotonic chain walk behind [`before`](Self::before) for three
    /// or more types.
    fn before_chain(&self, types: &[Ty], strict: bool) -> bool {
        let Some(first_event) = self.events.first() else {
            return false;
        };
        let mut min_when = first_event.when().clone();
        for (step, ty) in types.iter().enumerate() {
            let bucket = self.bucket(ty);
            let position = match search_by_key(
                bucket,
                |_, index: &EventIndex| self.event_at(*index).when().clone(),
                &min_when,
                Target::Lo,
            ) {
                Ok(position) | Err(position) => position,
            };
            let Some(&index) = bucket.get(position) else {
                return false;
            };
            let matched = self.event_at(index).when().clone();
            if strict {
                if step + 1 == types.len() {
                    break;
                }
                // The next type must start after the full tied run of the
                // matched when, not merely after one event.
                let next = match search_by_key(
                    &self.events,
                    |_, event: &Event<T, Ty, V>| event.when().clone(),
                    &matched,
                    Target::Hi,
                ) {
                    Ok(position) | Err(position) => position,
                };
                match self.events.get(next) {
                    Some(event) => min_when = event.when().clone(),
                    None => return false,
                }
            } else {
                min_when = matched;
            }
        }
        true
    }

    /// Builds a new sequence from substituted parts; omitted arguments
    /// reuse this sequence's values. The original is never mutated.
    pub fn copy_with(
        &self,
        events: Option<Vec<Event<T, Ty, V>>>,
        facts: Option<FxHashMap<String, F>>,
        id: Option<SequenceId>,
    ) -> Self
    where
        V: Clone,
        F: Clone,
    {
        Self::assemble(
            id.unwrap_or(self.id),
            facts.unwrap_or_else(|| self.facts.clone()),
            events.unwrap_or_else(|| self.events.clone()),
        )
    }

    /// Builds a new sequence holding this sequence's events plus `more`,
    /// keeping the id and facts.
    pub fn extend<I>(&self, more: I) -> Self
    where
        I: IntoIterator<Item = Event<T, Ty, V>>,
        V: Clone,
        F: Clone,
    {
        let mut events = self.events.clone();
        events.extend(more);
        Self::assemble(self.id, self.facts.clone(), events)
    }

    /// Builds a new sequence holding only the events accepted by the
    /// predicate, keeping the id and facts.
    pub fn subsequence<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&Event<T, Ty, V>) -> bool,
        V: Clone,
        F: Clone,
    {
        let events: Vec<Event<T, Ty, V>> = self
            .events
            .iter()
            .filter(|event| predicate(event))
            .cloned()
            .collect();
        Self::assemble(self.id, self.facts.clone(), events)
    }

    /// Runs a left-fold per selected type and wraps the results in a new
    /// sequence.
    ///
    /// Each selected type's events are fed through the aggregator in time
    /// order, building up a list of in-progress output events; the
    /// accumulated lists of all selected types are concatenated with the
    /// untouched events of unselected types. The id and facts carry over.
    ///
    /// See [`union_aggregator`](crate::aggregate::union_aggregator) for the
    /// canonical aggregator.
    pub fn aggregate_events<A>(&self, mut aggregator: A, types: Option<&[Ty]>) -> Self
    where
        A: FnMut(&mut Vec<Event<T, Ty, V>>, Event<T, Ty, V>),
        V: Clone,
        F: Clone,
    {
        let selected = self.selected_types(types);
        let mut output: Vec<Event<T, Ty, V>> = Vec::new();
        for ty in &selected {
            let mut accumulator = Vec::new();
            for index in self.bucket(ty) {
                aggregator(&mut accumulator, self.event_at(*index).clone());
            }
            output.append(&mut accumulator);
        }
        if types.is_some() {
            for event in &self.events {
                if !selected.iter().any(|ty| ty == event.ty()) {
                    output.push(event.clone());
                }
            }
        }
        Self::assemble(self.id, self.facts.clone(), output)
    }

    /// The requested types that are present, deduplicated and sorted;
    /// defaults to all types.
    pub(crate) fn selected_types(&self, types: Option<&[Ty]>) -> Vec<Ty> {
        let mut selected: Vec<Ty> = match types {
            Some(types) => types
                .iter()
                .filter(|ty| self.type_index.contains_key(*ty))
                .cloned()
                .collect(),
            None => self.type_index.keys().cloned().collect(),
        };
        selected.sort();
        selected.dedup();
        selected
    }
}
