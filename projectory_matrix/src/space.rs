// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::{Add, Sub};

use kurbo::{Point, Vec2};

macro_rules! space_point {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub Point);

        impl $name {
            /// The origin of this space.
            pub const ORIGIN: Self = Self(Point::ORIGIN);

            /// Creates a point from its coordinates.
            #[must_use]
            pub const fn new(x: f64, y: f64) -> Self {
                Self(Point::new(x, y))
            }

            /// Returns the untagged point.
            #[must_use]
            pub const fn point(self) -> Point {
                self.0
            }

            /// Horizontal coordinate.
            #[must_use]
            pub const fn x(self) -> f64 {
                self.0.x
            }

            /// Vertical coordinate (grows downward).
            #[must_use]
            pub const fn y(self) -> f64 {
                self.0.y
            }

            /// Euclidean distance to another point in the same space.
            #[must_use]
            pub fn distance(self, other: Self) -> f64 {
                self.0.distance(other.0)
            }
        }

        impl Sub for $name {
            type Output = Vec2;

            fn sub(self, rhs: Self) -> Vec2 {
                self.0 - rhs.0
            }
        }

        impl Add<Vec2> for $name {
            type Output = Self;

            fn add(self, rhs: Vec2) -> Self {
                Self(self.0 + rhs)
            }
        }
    };
}

space_point!(
    /// A raw input coordinate as reported by the host (client pixels).
    DevicePoint
);

space_point!(
    /// A coordinate in calibrated space: where the perspective mapping sends
    /// device points and where the local transform sends pattern points.
    CalibratedPoint
);

space_point!(
    /// A coordinate in the document's own space, independent of pan, zoom,
    /// and rotation.
    PatternPoint
);

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::PatternPoint;

    #[test]
    fn difference_is_a_vector_in_the_same_space() {
        let a = PatternPoint::new(1.0, 2.0);
        let b = PatternPoint::new(4.0, 6.0);
        assert_eq!(b - a, Vec2::new(3.0, 4.0));
        assert_eq!(a + Vec2::new(3.0, 4.0), b);
        assert_eq!(a.distance(b), 5.0);
    }
}
