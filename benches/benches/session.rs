// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use projectory_matrix::{Matrix, PatternPoint};
use projectory_measure::{Line, LineAction, MeasureConfig, Unit};
use projectory_session::{Config, Session, SessionAction};

fn session_with_lines(len: usize) -> Session {
    let config = Config::default();
    let measure = MeasureConfig::default();
    let lines = (0..len)
        .map(|i| {
            let x = (i % 32) as f64 * 200.0;
            let y = (i / 32) as f64 * 200.0;
            Line::new(
                PatternPoint::new(x, y),
                PatternPoint::new(x + 96.0, y + 48.0),
                Unit::Inches,
                &measure,
            )
        })
        .collect();
    let mut session = Session::new(config, Matrix::scale(1.5))
        .unwrap_or_default()
        .with_layout(Size::new(6_400.0, 4_800.0));
    session.dispatch(SessionAction::Line(LineAction::Replace(lines)));
    session
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("session/snapshot");

    for len in [8usize, 128, 1_024] {
        let session = session_with_lines(len);
        group.bench_with_input(BenchmarkId::new("serialize_state", len), &session, |b, s| {
            b.iter(|| black_box(s.serialize_state()));
        });
        group.bench_with_input(BenchmarkId::new("render", len), &session, |b, s| {
            b.iter(|| black_box(s.render()));
        });
    }

    group.finish();
}

fn bench_named_actions(c: &mut Criterion) {
    let mut group = c.benchmark_group("session/apply_named");
    let session = session_with_lines(128);
    let nudge = serde_json::json!({"dx": 6.0, "dy": 0.0});

    group.bench_function("nudge", |b| {
        b.iter_batched(
            || session.clone(),
            |mut s| black_box(s.apply_named("nudge", nudge.clone())),
            BatchSize::SmallInput,
        );
    });
    group.bench_function("toggle_zoom_out", |b| {
        b.iter_batched(
            || session.clone(),
            |mut s| black_box(s.apply_named("toggle_zoom_out", serde_json::Value::Null)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_snapshot, bench_named_actions);
criterion_main!(benches);
