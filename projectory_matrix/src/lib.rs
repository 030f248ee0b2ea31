// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projectory Matrix: homogeneous 2D transforms and space-tagged points.
//!
//! Every other Projectory crate speaks in terms of three coordinate spaces:
//! - **Device** space: raw pointer/client coordinates as reported by the host.
//! - **Calibrated** space: the output of the perspective mapping, and the
//!   space the user's local transform maps pattern points into.
//! - **Pattern** space: the document's own coordinate system.
//!
//! Points in each space get their own wrapper type ([`DevicePoint`],
//! [`CalibratedPoint`], [`PatternPoint`]) so that mixing spaces without going
//! through a [`Matrix`] is a type error.
//!
//! [`Matrix`] is a 3×3 homogeneous transform. It covers the affine
//! operations used by interactive gestures (translate, scale, rotate, flip)
//! as well as the projective mapping produced by a four-corner calibration.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use projectory_matrix::Matrix;
//!
//! let pan = Matrix::translate(Vec2::new(10.0, 0.0));
//! let zoom = Matrix::scale_about_point(2.0, Point::new(50.0, 50.0));
//!
//! // `zoom * pan` applies `pan` first.
//! let m = zoom * pan;
//! let p = m.transform_point(Point::new(40.0, 50.0));
//! assert!((p.x - 50.0).abs() < 1e-9);
//!
//! let back = m.invert().unwrap().transform_point(p);
//! assert!((back.x - 40.0).abs() < 1e-9);
//! ```

mod matrix;
mod shapes;
mod space;

pub use matrix::{DEGENERATE_EPSILON, DegenerateTransform, Matrix};
pub use shapes::{bounding_box, rect_corners};
pub use space::{CalibratedPoint, DevicePoint, PatternPoint};
