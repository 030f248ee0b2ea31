// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};
use projectory_matrix::{DevicePoint, Matrix, PatternPoint};
use projectory_view::mapper::{pattern_to_screen, screen_to_pattern};
use projectory_view::{Perspective, ViewState};

/// A keystoned calibration with its own perspective, plus a rotated, panned
/// local transform.
fn projected_view() -> ViewState {
    let calibration = Matrix::from_rows([
        [1.9, 0.12, 40.0],
        [-0.05, 2.1, 25.0],
        [0.000_08, 0.000_05, 1.0],
    ]);
    let perspective = calibration
        .invert()
        .map(Perspective::new)
        .unwrap_or_default();
    let mut view = ViewState::with_perspective(calibration, perspective);
    let rotate = Matrix::rotate_deg(27.0, Point::new(1152.0, 864.0));
    view.set_local_transform(rotate * Matrix::translate(Vec2::new(-300.0, 80.0)));
    view
}

fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapper");
    let view = projected_view();

    for len in [64usize, 4_096] {
        let device: Vec<DevicePoint> = (0..len)
            .map(|i| DevicePoint::new((i % 64) as f64 * 30.0, (i / 64) as f64 * 17.0))
            .collect();
        let pattern: Vec<PatternPoint> = (0..len)
            .map(|i| PatternPoint::new((i % 64) as f64 * 12.0, (i / 64) as f64 * 9.0))
            .collect();
        group.throughput(Throughput::Elements(len as u64));

        // Inverts the local transform per point.
        group.bench_with_input(
            BenchmarkId::new("screen_to_pattern", len),
            &device,
            |b, device| {
                b.iter(|| {
                    for &p in device {
                        let _ = black_box(screen_to_pattern(&view, p));
                    }
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("pattern_to_screen", len),
            &pattern,
            |b, pattern| {
                b.iter(|| {
                    for &p in pattern {
                        black_box(pattern_to_screen(&view, p));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_mapping);
criterion_main!(benches);
