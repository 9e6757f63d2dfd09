//! Composition of several paths into one polygon or several polylines.
//!
//! All paths of a [`PathSet`] are converted into the same buffer. When the result is
//! meant to be filled, two kinds of points are added after each path:
//!
//! - if the path is open, a copy of its first point, which closes it,
//! - for every path but the first one, a copy of the very first point of the set.
//!
//! The second kind links all paths to a common anchor. The edges introduced this way
//! are traversed twice in opposite directions, so with the even-odd rule the whole
//! buffer is read as one polygon that has the shape of all paths combined, holes
//! included.

use crate::error::{try_reserve, RasterResult};
use crate::math::*;
use crate::polyline::{
    add_transformed_points, estimate_number_of_points, is_degenerate, PolylineOptions,
};
use curvedraw_path::traits::Transformation;
use curvedraw_path::PathSet;

use std::ops::Range;

/// Parameters for [`compose`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CompositeOptions {
    /// The visible area, in path space.
    ///
    /// Default value: `None`.
    pub clip_rect: Option<Box2D>,

    /// See [`PolylineOptions::optimize_clip`].
    ///
    /// Default value: `false`.
    pub optimize_clip: bool,

    /// Whether open paths are closed and all paths linked into one polygon.
    ///
    /// Default value: `false`.
    pub filled: bool,
}

impl CompositeOptions {
    pub const DEFAULT: Self = CompositeOptions {
        clip_rect: None,
        optimize_clip: false,
        filled: false,
    };

    /// Options for a polygon that will be filled.
    #[inline]
    pub const fn fill() -> Self {
        Self::DEFAULT.with_filled(true)
    }

    /// Options for polylines that will be stroked.
    #[inline]
    pub const fn stroke() -> Self {
        Self::DEFAULT
    }

    #[inline]
    pub const fn with_clip_rect(mut self, clip_rect: Option<Box2D>) -> Self {
        self.clip_rect = clip_rect;
        self
    }

    #[inline]
    pub const fn with_optimize_clip(mut self, optimize: bool) -> Self {
        self.optimize_clip = optimize;
        self
    }

    #[inline]
    pub const fn with_filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    #[inline]
    pub fn polyline_options(&self) -> PolylineOptions {
        PolylineOptions {
            clip_rect: self.clip_rect,
            optimize_clip: self.optimize_clip,
        }
    }
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The result of [`compose`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Composition {
    points: Vec<DevicePoint>,
    subpaths: Vec<Range<usize>>,
}

impl Composition {
    /// All points, including the ones added to close and link the paths.
    ///
    /// This is the polygon to fill when the composition was built with
    /// [`CompositeOptions::filled`].
    #[inline]
    pub fn polygon(&self) -> &[DevicePoint] {
        &self.points
    }

    /// The polyline of each path, without the points added for filling.
    pub fn subpaths(&self) -> impl Iterator<Item = &[DevicePoint]> + '_ {
        self.subpaths
            .iter()
            .map(move |range| &self.points[range.clone()])
    }

    /// The location of each path's polyline in [`polygon`](Self::polygon).
    #[inline]
    pub fn subpath_ranges(&self) -> &[Range<usize>] {
        &self.subpaths
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether there is nothing to draw.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        is_degenerate(&self.points)
    }

    pub fn into_points(self) -> Vec<DevicePoint> {
        self.points
    }
}

/// Returns an upper bound of the number of points [`compose`] produces.
///
/// Each path contributes its own estimate, plus two points when `filled` is true.
pub fn estimate_composite_points(paths: &PathSet, filled: bool) -> usize {
    let extra = if filled { 2 } else { 0 };

    paths
        .iter()
        .map(|path| estimate_number_of_points(path) + extra)
        .sum()
}

/// Converts all paths of the set into one buffer.
///
/// Fails if any of the paths is empty, in which case nothing is returned. An empty set
/// produces an empty, degenerate, composition.
pub fn compose<T>(
    paths: &PathSet,
    transform: &T,
    options: &CompositeOptions,
) -> RasterResult<Composition>
where
    T: Transformation,
{
    let capacity = estimate_composite_points(paths, options.filled);
    let polyline_options = options.polyline_options();

    let mut points = Vec::new();
    try_reserve(&mut points, capacity)?;
    let mut subpaths = Vec::new();
    try_reserve(&mut subpaths, paths.len())?;

    let mut anchor = None;
    for path in paths {
        let start = points.len();
        let added = add_transformed_points(path, transform, &polyline_options, &mut points)?;
        subpaths.push(start..start + added);

        if options.filled {
            let first = points[start];
            if !path.is_closed() {
                points.push(first);
            }
            match anchor {
                Some(anchor) => points.push(anchor),
                None => anchor = Some(first),
            }
        }
    }

    debug_assert!(points.len() <= capacity);

    Ok(Composition { points, subpaths })
}

#[cfg(test)]
use crate::error::RasterError;
#[cfg(test)]
use curvedraw_path::{Path, PathSegment};

#[cfg(test)]
fn square(x: f64, y: f64, size: f64, closed: bool) -> Path {
    Path::new(
        vec![
            PathSegment::start(point(x, y)),
            PathSegment::Line {
                to: point(x + size, y),
            },
            PathSegment::Line {
                to: point(x + size, y + size),
            },
            PathSegment::Line {
                to: point(x, y + size),
            },
        ],
        closed,
    )
}

#[test]
fn closed_path_gets_no_closing_point() {
    let set = PathSet::from(square(0.0, 0.0, 10.0, true));
    let composition = compose(&set, &Transform::identity(), &CompositeOptions::fill()).unwrap();

    assert_eq!(
        composition.polygon(),
        &[point(0, 0), point(10, 0), point(10, 10), point(0, 10)]
    );
}

#[test]
fn open_path_gets_one_closing_point() {
    let set = PathSet::from(square(0.0, 0.0, 10.0, false));
    let composition = compose(&set, &Transform::identity(), &CompositeOptions::fill()).unwrap();

    assert_eq!(
        composition.polygon(),
        &[point(0, 0), point(10, 0), point(10, 10), point(0, 10), point(0, 0)]
    );
    assert_eq!(composition.subpath_ranges(), &[0..4]);
}

#[test]
fn paths_are_linked_to_the_first_point() {
    let set: PathSet = vec![
        square(0.0, 0.0, 10.0, true),
        square(2.0, 2.0, 4.0, false),
        square(20.0, 0.0, 1.0, true),
    ]
    .into_iter()
    .collect();

    let composition = compose(&set, &Transform::identity(), &CompositeOptions::fill()).unwrap();

    assert_eq!(
        composition.polygon(),
        &[
            // First path, closed.
            point(0, 0),
            point(10, 0),
            point(10, 10),
            point(0, 10),
            // Second path, closed then linked.
            point(2, 2),
            point(6, 2),
            point(6, 6),
            point(2, 6),
            point(2, 2),
            point(0, 0),
            // Third path, linked.
            point(20, 0),
            point(21, 0),
            point(21, 1),
            point(20, 1),
            point(0, 0),
        ]
    );
    assert!(composition.len() <= estimate_composite_points(&set, true));

    let subpaths: Vec<&[DevicePoint]> = composition.subpaths().collect();
    assert_eq!(subpaths.len(), 3);
    assert_eq!(subpaths[1], &[point(2, 2), point(6, 2), point(6, 6), point(2, 6)]);
}

#[test]
fn strokes_are_not_stitched() {
    let set: PathSet = vec![square(0.0, 0.0, 10.0, false), square(2.0, 2.0, 4.0, false)]
        .into_iter()
        .collect();

    let composition =
        compose(&set, &Transform::identity(), &CompositeOptions::stroke()).unwrap();

    assert_eq!(composition.len(), 8);
    assert_eq!(composition.subpath_ranges(), &[0..4, 4..8]);
}

#[test]
fn single_point_is_degenerate() {
    let set = PathSet::from(Path::new(vec![PathSegment::start(point(7.0, 3.0))], false));
    let transforms = [
        Transform::identity(),
        Transform::scale(3.0, -2.0),
        Transform::new(0.0, 1.0, -1.0, 0.0, 40.0, 40.0),
    ];
    let clips = [
        None,
        Some(Box2D {
            min: point(0.0, 0.0),
            max: point(1.0, 1.0),
        }),
    ];

    for transform in &transforms {
        for clip in &clips {
            let options = CompositeOptions::fill()
                .with_clip_rect(*clip)
                .with_optimize_clip(true);
            let composition = compose(&set, transform, &options).unwrap();
            assert!(composition.is_degenerate());
        }
    }
}

#[test]
fn empty_set() {
    let composition = compose(
        &PathSet::new(),
        &Transform::identity(),
        &CompositeOptions::fill(),
    )
    .unwrap();

    assert!(composition.is_empty());
    assert!(composition.is_degenerate());
    assert_eq!(estimate_composite_points(&PathSet::new(), true), 0);
}

#[test]
fn empty_path_aborts_the_composition() {
    let set: PathSet = vec![square(0.0, 0.0, 10.0, true), Path::empty()]
        .into_iter()
        .collect();

    assert_eq!(
        compose(&set, &Transform::identity(), &CompositeOptions::fill()),
        Err(RasterError::EmptyPath)
    );
}
