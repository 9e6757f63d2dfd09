#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Data structures to build and iterate over paths made of line and cubic bézier
//! segments.
//!
//! A [`Path`] is a fixed sequence of [`PathSegment`]s plus a `closed` flag. The first
//! segment only provides the start position, each of the following ones describes how
//! to draw from the previous endpoint to its own endpoint.
//!
//! A [`PathSet`] groups several paths that together describe one shape, for example a
//! glyph with holes, which is filled with the even-odd rule.
//!
//! This crate is reexported in `curvedraw`.
//!
//! # Examples
//!
//! ```
//! use curvedraw_path::{Path, PathEvent};
//! use curvedraw_path::math::point;
//! use curvedraw_path::builder::*;
//!
//! // Create a builder object to build the path.
//! let mut builder = Path::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.cubic_bezier_to(point(10.0, 5.0), point(0.0, 5.0), point(0.0, 10.0));
//! builder.close();
//!
//! // Generate the actual path object.
//! let path = builder.build();
//!
//! // Closing the path added a line back to (0, 0).
//! assert_eq!(path.len(), 4);
//! assert!(path.is_closed());
//!
//! for event in &path {
//!     println!("{:?}", event);
//! }
//! ```

pub use curvedraw_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod builder;
mod events;
pub mod path;
pub mod path_set;

pub use crate::events::*;
#[doc(inline)]
pub use crate::path::{Path, PathSegment, SegmentKind};
#[doc(inline)]
pub use crate::path_set::PathSet;

/// The fill rule defines how to determine what is inside and what is outside of the shape.
///
/// See the SVG specification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillRule {
    EvenOdd,
    NonZero,
}

impl FillRule {
    #[inline]
    pub fn is_in(&self, winding_number: i32) -> bool {
        match *self {
            FillRule::EvenOdd => winding_number % 2 != 0,
            FillRule::NonZero => winding_number != 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i32) -> bool {
        !self.is_in(winding_number)
    }
}

#[test]
fn fill_rule() {
    assert!(FillRule::EvenOdd.is_in(1));
    assert!(FillRule::EvenOdd.is_in(-3));
    assert!(FillRule::EvenOdd.is_out(2));
    assert!(FillRule::NonZero.is_in(2));
    assert!(FillRule::NonZero.is_out(0));
}

pub mod traits {
    //! `curvedraw_path` traits reexported here for convenience.

    pub use crate::builder::PathBuilder;
    pub use crate::geom::traits::Transformation;
}

pub mod math {
    //! The `curvedraw_geom` types used everywhere, reexported.

    pub use crate::geom::{
        point, to_device, vector, Box2D, DevicePoint, Point, Rotation, Scale, Transform,
        Translation, Vector,
    };
}
