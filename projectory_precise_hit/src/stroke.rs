// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroke-oriented helpers for precise hit testing.
//!
//! These types are intentionally small building blocks rather than a full
//! stroke model. Measurement lines are drawn as straight segments, so a
//! centerline plus half-width is all the engine needs.

use kurbo::{Line, ParamCurveNearest, Point};

use crate::{HitKind, HitParams, HitScore, PreciseHitTest};

/// A simple stroked line segment (centerline + half-width).
///
/// The precise hit test uses the distance from the query point to the line
/// segment and compares it against the half-width plus
/// [`HitParams::stroke_tolerance`]. This does not model joins or caps; the
/// segment ends are effectively round.
#[derive(Clone, Copy, Debug)]
pub struct StrokedLine {
    /// The centerline segment in local coordinates.
    pub line: Line,
    /// Half of the stroke width in local units.
    pub half_width: f64,
}

impl PreciseHitTest for StrokedLine {
    fn hit_test_local(&self, pt: Point, params: &HitParams) -> Option<HitScore> {
        let dist = if self.line.p0 == self.line.p1 {
            pt.distance(self.line.p0)
        } else {
            self.line.nearest(pt, 0.).distance_sq.sqrt()
        };
        let limit = self.half_width + params.stroke_tolerance;
        if dist <= limit {
            Some(HitScore {
                distance: dist,
                kind: HitKind::Stroke,
            })
        } else {
            None
        }
    }
}
