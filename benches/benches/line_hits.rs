// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use projectory_markers::{Marker, MarkerAction, MarkerConfig, MarkerId, MarkerState};
use projectory_matrix::PatternPoint;
use projectory_measure::{Line, LineAction, LineState, MeasureConfig, PointerContext, Unit};

/// Short diagonal lines on a loose grid, none overlapping.
fn scattered_lines(len: usize, config: &MeasureConfig) -> Vec<Line> {
    (0..len)
        .map(|i| {
            let x = (i % 64) as f64 * 300.0;
            let y = (i / 64) as f64 * 300.0;
            Line::new(
                PatternPoint::new(x, y),
                PatternPoint::new(x + 150.0, y + 80.0),
                Unit::Inches,
                config,
            )
        })
        .collect()
}

fn bench_pointer_down(c: &mut Criterion) {
    let mut group = c.benchmark_group("lines/pointer_down");
    let config = MeasureConfig::default();

    for len in [16usize, 256, 4_096] {
        let mut state = LineState::new();
        state.apply(LineAction::Replace(scattered_lines(len, &config)), &config);
        let last = state.lines()[len - 1].clone();
        group.throughput(Throughput::Elements(len as u64));

        // Worst case for the endpoint pass: the grabbed handle is the last one.
        let grab = PointerContext::at(last.end());
        group.bench_with_input(BenchmarkId::new("grab_last", len), &state, |b, state| {
            b.iter_batched(
                || state.clone(),
                |mut s| black_box(s.apply(LineAction::PointerDown(grab), &config)),
                BatchSize::SmallInput,
            );
        });

        // Falls through both passes.
        let miss = PointerContext::at(PatternPoint::new(-1_000.0, -1_000.0));
        group.bench_with_input(BenchmarkId::new("miss", len), &state, |b, state| {
            b.iter_batched(
                || state.clone(),
                |mut s| black_box(s.apply(LineAction::PointerDown(miss), &config)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_marker_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("markers/clear_nearest");
    let config = MarkerConfig::default();

    for len in [16usize, 256, 4_096] {
        let markers: Vec<Marker> = (0..len)
            .map(|i| Marker {
                id: MarkerId(i as u64),
                position: PatternPoint::new((i % 64) as f64 * 400.0, (i / 64) as f64 * 400.0),
                created_at: 0,
            })
            .collect();
        let mut state = MarkerState::new();
        state.apply(MarkerAction::Replace(markers), &config);
        state.apply(MarkerAction::ToggleClearing, &config);
        group.throughput(Throughput::Elements(len as u64));

        let press = MarkerAction::PointerDown {
            position: PatternPoint::new(410.0, 20.0),
            now: 0,
        };
        group.bench_with_input(BenchmarkId::new("remove", len), &state, |b, state| {
            b.iter_batched(
                || state.clone(),
                |mut s| black_box(s.apply(press.clone(), &config)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pointer_down, bench_marker_removal);
criterion_main!(benches);
