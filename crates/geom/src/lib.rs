#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Cubic bézier and line segment math on top of euclid.
//!
//! This crate is reexported in `curvedraw`.
//!
//! # Overview.
//!
//! Two coordinate spaces are used throughout the curvedraw crates:
//!
//! - *path space*, in which paths are authored, uses `f64` coordinates ([`Point`]),
//! - *device space*, the pixel grid of the output surface, uses `i32` coordinates
//!   ([`DevicePoint`]).
//!
//! Going from the former to the latter happens by applying an affine [`Transform`]
//! and rounding to the nearest integer (see [`to_device`]).
//!
//! # Flattening
//!
//! Flattening is the action of approximating a curve with a succession of line segments.
//!
//! Unlike tolerance-based flattening, the curves drawn by this crate are always
//! subdivided into the same number of steps, [`BEZIER_NUM_STEPS`], so that the size
//! of the output can be bounded before looking at the curve. The points are produced
//! in device space, after the transform was applied, which keeps the number of
//! distinct points low for small curves once consecutive duplicates are collapsed.
//!
//! ```
//! use curvedraw_geom::{flatten_bezier, point, BEZIER_FILL_LENGTH};
//!
//! let points = flatten_bezier(point(0, 0), point(10, 0), point(10, 10), point(0, 10));
//! assert_eq!(points.len(), BEZIER_FILL_LENGTH);
//! assert_eq!(points[0], point(0, 0));
//! assert_eq!(points[BEZIER_FILL_LENGTH - 1], point(0, 10));
//! ```

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod cubic_bezier;
pub mod flatten_cubic;
mod line;

#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::flatten_cubic::{
    flatten_bezier, hit_test_segment, BEZIER_DEPTH, BEZIER_FILL_LENGTH, BEZIER_NUM_STEPS,
};
#[doc(inline)]
pub use crate::line::{hit_test_line, LineSegment};

/// Alias for `euclid::default::Point2D<f64>`, a position in path space.
pub type Point = euclid::default::Point2D<f64>;

/// Alias for `euclid::default::Point2D<i32>`, a position on the device's pixel grid.
pub type DevicePoint = euclid::default::Point2D<i32>;

/// Alias for `euclid::default::Vector2D<f64>`.
pub type Vector = euclid::default::Vector2D<f64>;

/// Alias for `euclid::default::Box2D<f64>`.
pub type Box2D = euclid::default::Box2D<f64>;

/// Alias for `euclid::default::Transform2D<f64>`.
///
/// The six coefficients are the 2x2 linear map (`m11`, `m12`, `m21`, `m22`) followed
/// by the translation (`m31`, `m32`).
pub type Transform = euclid::default::Transform2D<f64>;

/// Alias for `euclid::default::Rotation2D<f64>`.
pub type Rotation = euclid::default::Rotation2D<f64>;

/// Alias for `euclid::Translation2D<f64, ..>`.
pub type Translation = euclid::Translation2D<f64, euclid::UnknownUnit, euclid::UnknownUnit>;

/// Alias for `euclid::default::Scale<f64>`.
pub type Scale = euclid::default::Scale<f64>;

/// Shorthand for `Point2D::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> euclid::default::Point2D<S> {
    euclid::default::Point2D::new(x, y)
}

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: f64, y: f64) -> Vector {
    Vector::new(x, y)
}

/// Rounds a position to the nearest device pixel.
///
/// Halfway cases round to the even neighbour, which is what the display server's
/// own `rint`-based conversion does.
#[inline]
pub fn to_device(p: Point) -> DevicePoint {
    point(p.x.round_ties_even() as i32, p.y.round_ties_even() as i32)
}

pub mod traits {
    use crate::{Point, Rotation, Scale, Transform, Translation, Vector};

    /// The "apply an affine map to a 2D point" capability.
    pub trait Transformation {
        fn transform_point(&self, p: Point) -> Point;
        fn transform_vector(&self, v: Vector) -> Vector;
    }

    impl Transformation for Transform {
        fn transform_point(&self, p: Point) -> Point {
            self.transform_point(p)
        }

        fn transform_vector(&self, v: Vector) -> Vector {
            self.transform_vector(v)
        }
    }

    impl Transformation for Rotation {
        fn transform_point(&self, p: Point) -> Point {
            self.transform_point(p)
        }

        fn transform_vector(&self, v: Vector) -> Vector {
            self.transform_vector(v)
        }
    }

    impl Transformation for Translation {
        fn transform_point(&self, p: Point) -> Point {
            self.transform_point(p)
        }

        fn transform_vector(&self, v: Vector) -> Vector {
            v
        }
    }

    impl Transformation for Scale {
        fn transform_point(&self, p: Point) -> Point {
            (*self).transform_point(p)
        }

        fn transform_vector(&self, v: Vector) -> Vector {
            (*self).transform_vector(v)
        }
    }

    // Automatically implement Transformation for all &Transformation.
    impl<'l, T: Transformation> Transformation for &'l T {
        #[inline]
        fn transform_point(&self, p: Point) -> Point {
            (*self).transform_point(p)
        }

        #[inline]
        fn transform_vector(&self, v: Vector) -> Vector {
            (*self).transform_vector(v)
        }
    }
}

#[test]
fn rounding_to_device() {
    assert_eq!(to_device(point(0.4, -0.4)), point(0, 0));
    assert_eq!(to_device(point(0.6, -0.6)), point(1, -1));
    assert_eq!(to_device(point(2.5, 3.5)), point(2, 4));
    assert_eq!(to_device(point(-2.5, 10.49)), point(-2, 10));
}

#[test]
fn transformation_by_reference() {
    use traits::Transformation;

    fn apply<T: Transformation>(t: T, p: Point) -> Point {
        t.transform_point(p)
    }

    let transform = Transform::new(2.0, 0.0, 0.0, 3.0, 10.0, 20.0);
    assert_eq!(apply(&transform, point(1.0, 1.0)), point(12.0, 23.0));
    assert_eq!(
        apply(Translation::new(1.0, -1.0), point(1.0, 1.0)),
        point(2.0, 0.0)
    );
}
