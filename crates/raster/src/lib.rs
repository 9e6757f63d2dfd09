#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Turns paths into device space geometry and draws it.
//!
//! This crate is reexported in `curvedraw`.
//!
//! # Overview
//!
//! Drawing a path happens in three steps:
//!
//! - every segment of a path is transformed into device space and rounded to the pixel
//!   grid, curves are flattened, which gives a polyline (see the [`polyline`] module),
//! - the polylines of several paths are combined into one polygon suitable for an
//!   even-odd fill, or kept apart for stroking (see the [`compositor`] module),
//! - the result is handed to a [`DrawTarget`] and a [`Region`], which do the actual
//!   scan conversion (see the [`draw`] module).
//!
//! The number of points of the output is bounded before any work is done, and the
//! buffers are allocated once. Errors are reported before anything is drawn.
//!
//! # Examples
//!
//! ```
//! use curvedraw_raster::{draw_multi_path, FillStyle, MultiPathStyle};
//! use curvedraw_raster::recording::{DrawCommand, Recorder};
//! use curvedraw_raster::target::PolygonRegion;
//! use curvedraw_raster::math::{point, Transform};
//! use curvedraw_path::{PathSet, traits::PathBuilder};
//!
//! // A square with a square hole.
//! let mut builder = PathSet::builder();
//! builder.add_polygon(&[point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)], true);
//! builder.add_polygon(&[point(3.0, 3.0), point(6.0, 3.0), point(6.0, 6.0), point(3.0, 6.0)], true);
//! let paths = builder.build();
//!
//! let mut target = Recorder::new();
//! let mut region = PolygonRegion::new();
//! draw_multi_path(
//!     &mut target,
//!     &mut region,
//!     &paths,
//!     &Transform::scale(2.0, 2.0),
//!     None,
//!     &MultiPathStyle::DEFAULT.with_fill(FillStyle::Solid),
//! ).unwrap();
//!
//! assert_eq!(target.commands().len(), 1);
//! match &target.commands()[0] {
//!     DrawCommand::FillPolygon { points, .. } => {
//!         // Both squares, plus the points linking the second one to the first.
//!         assert_eq!(points.len(), 11);
//!         assert_eq!(points[5], point(6, 6));
//!         assert_eq!(points[10], point(0, 0));
//!     }
//!     _ => panic!(),
//! }
//! ```

pub use curvedraw_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod compositor;
pub mod draw;
mod error;
pub mod polyline;
pub mod recording;
pub mod target;

#[doc(inline)]
pub use crate::compositor::{compose, estimate_composite_points, CompositeOptions, Composition};
#[doc(inline)]
pub use crate::draw::{draw_multi_path, draw_single_path, multipath_region, FillStyle, MultiPathStyle};
pub use crate::error::*;
#[doc(inline)]
pub use crate::polyline::{
    add_transformed_points, build_polyline, estimate_number_of_points, DevicePolyline,
    PolylineOptions,
};
#[doc(inline)]
pub use crate::target::{DrawTarget, FillRule, Region};

pub use curvedraw_path::geom::{flatten_bezier, hit_test_segment};

pub mod math {
    //! The math types used by this crate, reexported from `curvedraw_path`.

    pub use curvedraw_path::math::*;
}
