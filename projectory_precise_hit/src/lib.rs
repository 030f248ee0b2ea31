// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projectory Precise Hit: geometry-level hit testing helpers.
//!
//! Coarse culling is not needed at the scale of a measurement overlay (a
//! handful of lines and markers), so this crate only answers the precise
//! question: given a query point in the shape's own coordinates, is it a hit,
//! and how close was it?
//!
//! - [`StrokedLine`]: a segment with a half-width, for line bodies.
//! - [`Disc`]: a filled circle, for endpoints and point markers.
//! - [`first_hit`] / [`nearest_hit`]: scan a list of shapes in order.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use projectory_precise_hit::{Disc, HitParams, PreciseHitTest};
//!
//! let handle = Disc { center: Point::new(10.0, 10.0), radius: 4.0 };
//! let params = HitParams::default();
//! assert!(handle.hit_test_local(Point::new(12.0, 12.0), &params).is_some());
//! assert!(handle.hit_test_local(Point::new(20.0, 10.0), &params).is_none());
//! ```

mod disc;
mod stroke;

use kurbo::Point;

pub use disc::Disc;
pub use stroke::StrokedLine;

/// Which part of a shape was hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitKind {
    /// The interior of a filled shape.
    Fill,
    /// The stroke of an outlined shape.
    Stroke,
}

/// Tolerances applied on top of a shape's own extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HitParams {
    /// Extra distance accepted around strokes.
    pub stroke_tolerance: f64,
    /// Extra distance accepted around filled shapes.
    pub fill_tolerance: f64,
}

/// Result of a successful hit test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitScore {
    /// Distance from the query point to the shape's reference geometry
    /// (centerline or center). Smaller is closer.
    pub distance: f64,
    /// Which part of the shape was hit.
    pub kind: HitKind,
}

/// Precise hit testing in a shape's local coordinates.
pub trait PreciseHitTest {
    /// Tests `pt` against this shape, returning a score on hit.
    fn hit_test_local(&self, pt: Point, params: &HitParams) -> Option<HitScore>;
}

/// Returns the index and score of the first shape that `pt` hits.
pub fn first_hit<'a, T, I>(shapes: I, pt: Point, params: &HitParams) -> Option<(usize, HitScore)>
where
    T: PreciseHitTest + 'a,
    I: IntoIterator<Item = &'a T>,
{
    shapes
        .into_iter()
        .enumerate()
        .find_map(|(i, shape)| shape.hit_test_local(pt, params).map(|score| (i, score)))
}

/// Returns the index and score of the closest shape that `pt` hits.
///
/// Ties keep the earliest shape.
pub fn nearest_hit<'a, T, I>(shapes: I, pt: Point, params: &HitParams) -> Option<(usize, HitScore)>
where
    T: PreciseHitTest + 'a,
    I: IntoIterator<Item = &'a T>,
{
    shapes
        .into_iter()
        .enumerate()
        .filter_map(|(i, shape)| shape.hit_test_local(pt, params).map(|score| (i, score)))
        .fold(None, |best: Option<(usize, HitScore)>, candidate| match best {
            Some(b) if b.1.distance <= candidate.1.distance => Some(b),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discs() -> [Disc; 3] {
        [
            Disc {
                center: Point::new(0.0, 0.0),
                radius: 5.0,
            },
            Disc {
                center: Point::new(3.0, 0.0),
                radius: 5.0,
            },
            Disc {
                center: Point::new(100.0, 0.0),
                radius: 5.0,
            },
        ]
    }

    #[test]
    fn first_hit_respects_order() {
        let (i, _) = first_hit(&discs(), Point::new(2.5, 0.0), &HitParams::default()).unwrap();
        assert_eq!(i, 0);
    }

    #[test]
    fn nearest_hit_prefers_closest() {
        let (i, score) = nearest_hit(&discs(), Point::new(2.5, 0.0), &HitParams::default()).unwrap();
        assert_eq!(i, 1);
        assert!((score.distance - 0.5).abs() < 1e-12);
    }

    #[test]
    fn misses_return_none() {
        let params = HitParams::default();
        assert!(first_hit(&discs(), Point::new(50.0, 0.0), &params).is_none());
        assert!(nearest_hit(&discs(), Point::new(50.0, 0.0), &params).is_none());
        assert!(nearest_hit::<Disc, _>(&[], Point::ORIGIN, &params).is_none());
    }
}
