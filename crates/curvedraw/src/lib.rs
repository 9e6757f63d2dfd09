#![deny(bare_trait_objects)]

//! Drawing paths made of line segments and cubic béziers on an integer pixel grid.
//!
//! # Crates
//!
//! This meta-crate (`curvedraw`) reexports the following sub-crates for convenience:
//!
//! * **curvedraw_geom** - Cubic bézier flattening and hit testing in device space.
//! * **curvedraw_path** - Tools to build and iterate over paths and path sets.
//! * **curvedraw_raster** - Turns paths into polylines and polygons and hands them
//!   to a draw target.
//! * **curvedraw_extra** - An SVG path parser and a small software canvas.
//!
//! Each `curvedraw_<name>` crate is reexported as a `<name>` module in `curvedraw`.
//! For example:
//!
//! ```ignore
//! use curvedraw_raster::draw_multi_path;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! use curvedraw::raster::draw_multi_path;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! When using the main crate `curvedraw`, the `curvedraw_extra` dependency is disabled
//! by default. It can be added with the feature flag `extra`.
//!
//! # Examples
//!
//! ## Flattening a path
//!
//! ```
//! use curvedraw::math::{point, Transform};
//! use curvedraw::path::Path;
//! use curvedraw::path::builder::*;
//! use curvedraw::raster::{build_polyline, PolylineOptions};
//!
//! let mut builder = Path::builder();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.cubic_bezier_to(point(10.0, 5.0), point(0.0, 5.0), point(0.0, 10.0));
//! builder.close();
//! let path = builder.build();
//!
//! let polyline = build_polyline(
//!     &path,
//!     &Transform::scale(4.0, 4.0),
//!     &PolylineOptions::DEFAULT,
//! ).unwrap();
//!
//! assert_eq!(polyline.points()[1], point(40, 0));
//! assert!(polyline.points().contains(&point(0, 40)));
//! // The path was closed with a line back to its first point.
//! assert_eq!(polyline.points().last(), Some(&point(0, 0)));
//! ```
//!
//! ## Hit testing a curve
//!
//! ```
//! use curvedraw::geom::{hit_test_segment, point};
//!
//! let (p0, p1, p2, p3) = (point(0, 0), point(0, 100), point(100, 100), point(100, 0));
//! assert!(hit_test_segment(p0, p1, p2, p3, point(50, 75), 1.0));
//! assert!(!hit_test_segment(p0, p1, p2, p3, point(50, 50), 1.0));
//! ```

pub extern crate curvedraw_raster;

#[cfg(feature = "extra")]
pub extern crate curvedraw_extra;

#[cfg(feature = "extra")]
pub use curvedraw_extra as extra;

pub use curvedraw_raster as raster;
pub use curvedraw_raster::path;
pub use curvedraw_raster::path::geom;
pub use curvedraw_raster::path::geom::euclid;

pub use curvedraw_raster::math;
