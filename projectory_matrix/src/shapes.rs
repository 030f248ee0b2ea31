// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

/// Corners of a `width` × `height` rectangle anchored at the origin.
///
/// Order is clockwise on screen: top-left, top-right, bottom-right,
/// bottom-left.
#[must_use]
pub fn rect_corners(width: f64, height: f64) -> [Point; 4] {
    [
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ]
}

/// Axis-aligned bounding box of `points`, or `None` if there are none.
#[must_use]
pub fn bounding_box(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut points = points.into_iter();
    let first = points.next()?;
    Some(points.fold(Rect::from_points(first, first), |rect, p| rect.union_pt(p)))
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{bounding_box, rect_corners};
    use crate::Matrix;

    #[test]
    fn corners_go_clockwise_from_origin() {
        let c = rect_corners(4.0, 3.0);
        assert_eq!(c[0], Point::ORIGIN);
        assert_eq!(c[2], Point::new(4.0, 3.0));
    }

    #[test]
    fn bounding_box_of_rotated_rect() {
        let m = Matrix::rotate_deg(90.0, Point::ORIGIN);
        let bbox = bounding_box(rect_corners(4.0, 2.0).map(|p| m.transform_point(p)));
        assert_eq!(bbox, Some(Rect::new(-2.0, 0.0, 0.0, 4.0)));
    }

    #[test]
    fn bounding_box_of_nothing_is_none() {
        assert_eq!(bounding_box(Vec::<Point>::new()), None);
        assert_eq!(
            bounding_box([Point::new(1.0, 2.0)]),
            Some(Rect::new(1.0, 2.0, 1.0, 2.0))
        );
    }
}
