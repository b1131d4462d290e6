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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use std::ops::Bound;
use tempora_interval::Interval;
use tempora_seq::{Event, EventSequence, When};

const TYPES: [&str; 8] = [
    "admit", "discharge", "dose", "fever", "lab", "rash", "scan", "visit",
];

fn build_sequence(n: usize) -> EventSequence<i64, &'static str, i32> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xbe7c);
    let events = (0..n).map(|_| {
        let ty = TYPES[rng.gen_range(0..TYPES.len())];
        let lo = rng.gen_range(0..100_000i64);
        if rng.gen_bool(0.3) {
            let hi = lo + rng.gen_range(1..500);
            Event::over(Interval::new(lo, hi), ty, rng.gen_range(0..1000))
        } else {
            Event::at(lo, ty, rng.gen_range(0..1000))
        }
    });
    EventSequence::new(events)
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for n in [1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let events: Vec<Event<i64, &str, i32>> =
                build_sequence(n).events().cloned().collect();
            b.iter(|| EventSequence::<i64, &str, i32>::new(black_box(events.clone())));
        });
    }
    group.finish();
}

fn bench_point_queries(c: &mut Criterion) {
    let seq = build_sequence(100_000);
    let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
    c.bench_function("has_when", |b| {
        b.iter(|| {
            let t = rng.gen_range(0..100_000i64);
            black_box(seq.has_when(&When::At(t)))
        })
    });
    c.bench_function("first_after", |b| {
        b.iter(|| {
            let t = rng.gen_range(0..100_000i64);
            black_box(seq.first_after(&"dose", &When::At(t), true))
        })
    });
}

fn bench_range_queries(c: &mut Criterion) {
    let seq = build_sequence(100_000);
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xfeed);
    c.bench_function("events_between", |b| {
        b.iter(|| {
            let lo = rng.gen_range(0..90_000i64);
            let hi = lo + 1_000;
            black_box(seq.events_between(Bound::Included(&lo), Bound::Excluded(&hi), None).len())
        })
    });
    c.bench_function("events_overlapping", |b| {
        b.iter(|| {
            let lo = rng.gen_range(0..90_000i64);
            let hi = lo + 1_000;
            black_box(
                seq.events_overlapping(Bound::Included(&lo), Bound::Excluded(&hi), None)
                    .len(),
            )
        })
    });
    c.bench_function("transitions", |b| {
        b.iter(|| black_box(seq.transitions(None).count()))
    });
}

criterion_group!(
    benches,
    bench_construction,
    bench_point_queries,
    bench_range_queries
);
criterion_main!(benches);
