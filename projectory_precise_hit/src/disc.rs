// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::{HitKind, HitParams, HitScore, PreciseHitTest};

/// A filled circle: line endpoint handles and point markers.
///
/// The boundary counts as inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disc {
    /// Center in local coordinates.
    pub center: Point,
    /// Radius in local units.
    pub radius: f64,
}

impl PreciseHitTest for Disc {
    fn hit_test_local(&self, pt: Point, params: &HitParams) -> Option<HitScore> {
        let dist = pt.distance(self.center);
        (dist <= self.radius + params.fill_tolerance).then_some(HitScore {
            distance: dist,
            kind: HitKind::Fill,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_inside() {
        let disc = Disc {
            center: Point::new(100.0, 200.0),
            radius: 144.0,
        };
        let params = HitParams::default();
        assert!(disc.hit_test_local(Point::new(244.0, 200.0), &params).is_some());
        assert!(disc.hit_test_local(Point::new(300.0, 200.0), &params).is_none());
    }
}
