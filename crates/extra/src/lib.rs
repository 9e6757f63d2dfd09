#![deny(bare_trait_objects)]

//! Optional utilities for the curvedraw crates: a parser for the SVG path syntax and
//! a small software canvas to look at the output of the rasterizer.

extern crate curvedraw_path as path;
extern crate curvedraw_raster as raster;

pub use path::geom::euclid;
pub use path::math;

pub mod canvas;
pub mod parser;
