//! Conversion of a single path into a device space polyline.
//!
//! The start point and line segments are transformed and rounded to the pixel grid,
//! curves are transformed, rounded and then [flattened](curvedraw_path::geom::flatten_cubic)
//! with a fixed number of steps. Because the number of points a segment can produce
//! only depends on its kind, [`estimate_number_of_points`] gives an upper bound of the
//! output size that is used to allocate the buffer once.
//!
//! ## Culling
//!
//! When a clip rectangle is provided and [`PolylineOptions::optimize_clip`] is set,
//! curves whose control points all lie on the same side of the rectangle are drawn as
//! a straight line to their end point instead of being flattened. The clip rectangle is
//! expressed in path space, like the control points it is compared with.
//!
//! This is only correct for fills and one pixel wide strokes: a thick stroke of a
//! curve outside of the rectangle can still reach into it.

use crate::error::{try_reserve, RasterError, RasterResult};
use crate::math::*;
use curvedraw_path::geom::{CubicBezierSegment, BEZIER_FILL_LENGTH};
use curvedraw_path::traits::Transformation;
use curvedraw_path::{Path, SegmentKind};

use log::{trace, warn};
use std::ops::Deref;

/// Parameters for the conversion of a path into a polyline.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PolylineOptions {
    /// The visible area, in path space.
    ///
    /// Default value: `None`.
    pub clip_rect: Option<Box2D>,

    /// Whether curves entirely outside of `clip_rect` are replaced with straight lines.
    ///
    /// Must be disabled when the polyline will be stroked with a line wider than a
    /// pixel.
    ///
    /// Default value: `false`.
    pub optimize_clip: bool,
}

impl PolylineOptions {
    pub const DEFAULT: Self = PolylineOptions {
        clip_rect: None,
        optimize_clip: false,
    };

    /// Options culling curves outside of `clip_rect`.
    #[inline]
    pub fn culling(clip_rect: Box2D) -> Self {
        Self::DEFAULT
            .with_clip_rect(Some(clip_rect))
            .with_optimize_clip(true)
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

    // The rectangle to cull against, if culling is enabled. The corners may be given
    // in any order.
    fn culling_rect(&self) -> Option<Box2D> {
        if !self.optimize_clip {
            return None;
        }

        self.clip_rect
            .map(|rect| Box2D::from_points(&[rect.min, rect.max]))
    }
}

impl Default for PolylineOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A sequence of device space points produced from one path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DevicePolyline {
    points: Vec<DevicePoint>,
}

impl DevicePolyline {
    pub fn new() -> Self {
        DevicePolyline { points: Vec::new() }
    }

    #[inline]
    pub fn points(&self) -> &[DevicePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<DevicePoint> {
        self.points
    }

    /// Whether the polyline covers no area and has no length.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        is_degenerate(&self.points)
    }
}

impl Deref for DevicePolyline {
    type Target = [DevicePoint];

    fn deref(&self) -> &[DevicePoint] {
        &self.points
    }
}

impl From<Vec<DevicePoint>> for DevicePolyline {
    fn from(points: Vec<DevicePoint>) -> Self {
        DevicePolyline { points }
    }
}

/// Returns true if the points don't describe anything visible: there are fewer than
/// two of them or they are all at the same position.
pub fn is_degenerate(points: &[DevicePoint]) -> bool {
    match points.split_first() {
        Some((first, rest)) => rest.iter().all(|p| p == first),
        None => true,
    }
}

/// Maximum number of points a segment of the given kind appends to a polyline.
#[inline]
pub const fn max_points_per_segment(kind: SegmentKind) -> usize {
    match kind {
        // The first point of the flattened curve is the previous end point.
        SegmentKind::Bezier => BEZIER_FILL_LENGTH - 1,
        SegmentKind::Line => 1,
    }
}

/// Returns an upper bound of the number of points [`add_transformed_points`] produces
/// for this path.
///
/// Returns zero for an empty path, which can't be converted.
pub fn estimate_number_of_points(path: &Path) -> usize {
    match path.segments().split_first() {
        Some((_, rest)) => {
            1 + rest
                .iter()
                .map(|segment| max_points_per_segment(segment.kind()))
                .sum::<usize>()
        }
        None => 0,
    }
}

/// Returns true if the four points lie strictly on one side of the rectangle.
///
/// A curve touching the rectangle's border is not culled.
pub fn is_culled(curve: &CubicBezierSegment<f64>, clip_rect: &Box2D) -> bool {
    let hull = curve.fast_bounding_box();

    hull.max.x < clip_rect.min.x
        || hull.min.x > clip_rect.max.x
        || hull.max.y < clip_rect.min.y
        || hull.min.y > clip_rect.max.y
}

/// Converts a path to device space and appends the resulting points to `output`.
///
/// Returns the number of appended points, which is at least one and at most
/// [`estimate_number_of_points`].
///
/// Consecutive equal points produced by line segments are collapsed, except for the
/// last point of the path which is always appended. The first point is the transformed
/// and rounded start of the path and the last point the transformed and rounded end of
/// its last segment.
///
/// Fails with [`RasterError::EmptyPath`] if the path has no segment, in which case
/// `output` is left untouched.
pub fn add_transformed_points<T>(
    path: &Path,
    transform: &T,
    options: &PolylineOptions,
    output: &mut Vec<DevicePoint>,
) -> RasterResult<usize>
where
    T: Transformation,
{
    let segments = path.segments();
    let first = match segments.first() {
        Some(first) => first,
        None => {
            warn!("Attempted to rasterize an empty path.");
            return Err(RasterError::EmptyPath);
        }
    };

    let start = output.len();
    let culling_rect = options.culling_rect();
    let last_index = segments.len() - 1;

    let mut from = first.to();
    output.push(to_device(transform.transform_point(from)));

    for (i, segment) in segments.iter().enumerate().skip(1) {
        let curve = segment
            .to_cubic(from)
            .filter(|curve| match &culling_rect {
                Some(rect) if is_culled(curve, rect) => {
                    trace!("Curve {} culled, drawing a line instead.", i);
                    false
                }
                _ => true,
            });

        match curve {
            Some(curve) => {
                let flattened = curve.transformed(transform).to_device().flattened();
                // The first point is the previous end point, already in the output.
                output.extend_from_slice(&flattened[1..]);
            }
            None => {
                let p = to_device(transform.transform_point(segment.to()));
                if i == last_index || output.last() != Some(&p) {
                    output.push(p);
                }
            }
        }

        from = segment.to();
    }

    Ok(output.len() - start)
}

/// Converts a path into a new polyline.
///
/// The buffer is allocated once, using [`estimate_number_of_points`].
pub fn build_polyline<T>(
    path: &Path,
    transform: &T,
    options: &PolylineOptions,
) -> RasterResult<DevicePolyline>
where
    T: Transformation,
{
    let capacity = estimate_number_of_points(path);
    if capacity == 0 {
        warn!("Attempted to rasterize an empty path.");
        return Err(RasterError::EmptyPath);
    }

    let mut points = Vec::new();
    try_reserve(&mut points, capacity)?;

    add_transformed_points(path, transform, options, &mut points)?;
    debug_assert!(points.len() <= capacity);

    Ok(DevicePolyline { points })
}

#[cfg(test)]
use curvedraw_path::geom::BEZIER_NUM_STEPS;
#[cfg(test)]
use curvedraw_path::PathSegment;

#[cfg(test)]
fn segments_path(segments: Vec<PathSegment>, closed: bool) -> Path {
    Path::new(segments, closed)
}

#[cfg(test)]
fn scenario_path() -> Path {
    segments_path(
        vec![
            PathSegment::start(point(0.0, 0.0)),
            PathSegment::Line {
                to: point(10.0, 0.0),
            },
            PathSegment::Bezier {
                ctrl1: point(10.0, 5.0),
                ctrl2: point(0.0, 5.0),
                to: point(0.0, 10.0),
            },
        ],
        true,
    )
}

#[test]
fn estimate() {
    assert_eq!(estimate_number_of_points(&Path::empty()), 0);
    assert_eq!(
        estimate_number_of_points(&segments_path(vec![PathSegment::start(point(1.0, 1.0))], false)),
        1
    );
    assert_eq!(
        estimate_number_of_points(&scenario_path()),
        1 + 1 + BEZIER_FILL_LENGTH - 1
    );
}

#[test]
fn line_and_curve() {
    let path = scenario_path();
    let polyline =
        build_polyline(&path, &Transform::identity(), &PolylineOptions::DEFAULT).unwrap();

    assert_eq!(polyline[0], point(0, 0));
    assert_eq!(polyline[1], point(10, 0));
    assert_eq!(polyline.last(), Some(&point(0, 10)));
    assert_eq!(polyline.len(), 2 + BEZIER_NUM_STEPS);
    assert!(polyline.len() <= estimate_number_of_points(&path));
    assert!(!polyline.is_degenerate());
}

#[test]
fn empty_path() {
    let mut output = vec![point(1, 2)];
    let result = add_transformed_points(
        &Path::empty(),
        &Transform::identity(),
        &PolylineOptions::DEFAULT,
        &mut output,
    );

    assert_eq!(result, Err(RasterError::EmptyPath));
    assert_eq!(output, vec![point(1, 2)]);
    assert_eq!(
        build_polyline(&Path::empty(), &Transform::identity(), &PolylineOptions::DEFAULT),
        Err(RasterError::EmptyPath)
    );
}

#[test]
fn single_point() {
    let path = segments_path(vec![PathSegment::start(point(2.4, 7.6))], false);
    let polyline =
        build_polyline(&path, &Transform::identity(), &PolylineOptions::DEFAULT).unwrap();

    assert_eq!(polyline.points(), &[point(2, 8)]);
    assert!(polyline.is_degenerate());
}

#[test]
fn duplicates_are_collapsed_except_at_the_end() {
    let path = segments_path(
        vec![
            PathSegment::start(point(0.0, 0.0)),
            PathSegment::Line {
                to: point(0.2, 0.1),
            },
            PathSegment::Line {
                to: point(5.0, 5.0),
            },
            PathSegment::Line {
                to: point(5.2, 4.9),
            },
        ],
        false,
    );

    let polyline =
        build_polyline(&path, &Transform::identity(), &PolylineOptions::DEFAULT).unwrap();

    assert_eq!(polyline.points(), &[point(0, 0), point(5, 5), point(5, 5)]);
}

#[test]
fn two_coincident_points() {
    let path = segments_path(
        vec![
            PathSegment::start(point(3.0, 3.0)),
            PathSegment::Line {
                to: point(3.1, 3.0),
            },
        ],
        false,
    );

    let polyline =
        build_polyline(&path, &Transform::identity(), &PolylineOptions::DEFAULT).unwrap();

    assert_eq!(polyline.points(), &[point(3, 3), point(3, 3)]);
    assert!(polyline.is_degenerate());
}

#[test]
fn transform_is_applied_before_rounding() {
    let path = segments_path(
        vec![
            PathSegment::start(point(0.1, 0.1)),
            PathSegment::Line {
                to: point(1.0, 0.5),
            },
        ],
        false,
    );

    let transform = Transform::scale(10.0, 10.0).then_translate(vector(100.0, 200.0));
    let polyline = build_polyline(&path, &transform, &PolylineOptions::DEFAULT).unwrap();

    assert_eq!(polyline.points(), &[point(101, 201), point(110, 205)]);
}

#[test]
fn curves_outside_of_the_clip_rect_are_culled() {
    let path = segments_path(
        vec![
            PathSegment::start(point(0.0, 0.0)),
            PathSegment::Bezier {
                ctrl1: point(10.0, 20.0),
                ctrl2: point(20.0, 20.0),
                to: point(30.0, 0.0),
            },
        ],
        false,
    );
    let clip = Box2D {
        min: point(100.0, 100.0),
        max: point(200.0, 200.0),
    };
    let transform = Transform::scale(2.0, 2.0);

    let culled = build_polyline(&path, &transform, &PolylineOptions::culling(clip)).unwrap();
    assert_eq!(culled.points(), &[point(0, 0), point(60, 0)]);

    // Without culling the curve is flattened, but ends at the same place.
    let flattened = build_polyline(
        &path,
        &transform,
        &PolylineOptions::DEFAULT.with_clip_rect(Some(clip)),
    )
    .unwrap();
    assert_eq!(flattened.len(), BEZIER_FILL_LENGTH);
    assert_eq!(flattened.last(), culled.last());
}

#[test]
fn inverted_clip_rect() {
    let path = segments_path(
        vec![
            PathSegment::start(point(10.0, 10.0)),
            PathSegment::Bezier {
                ctrl1: point(20.0, 90.0),
                ctrl2: point(80.0, 90.0),
                to: point(90.0, 10.0),
            },
        ],
        false,
    );
    let inverted = Box2D {
        min: point(100.0, 100.0),
        max: point(0.0, 0.0),
    };

    let polyline = build_polyline(
        &path,
        &Transform::identity(),
        &PolylineOptions::culling(inverted),
    )
    .unwrap();
    assert_eq!(polyline.len(), BEZIER_FILL_LENGTH);
}

#[test]
fn curves_touching_the_clip_rect_are_not_culled() {
    let path = segments_path(
        vec![
            PathSegment::start(point(0.0, 0.0)),
            PathSegment::Bezier {
                ctrl1: point(10.0, 20.0),
                ctrl2: point(20.0, 20.0),
                to: point(30.0, 0.0),
            },
        ],
        false,
    );
    let clip = Box2D {
        min: point(30.0, -50.0),
        max: point(200.0, 200.0),
    };

    let polyline = build_polyline(
        &path,
        &Transform::identity(),
        &PolylineOptions::culling(clip),
    )
    .unwrap();
    assert_eq!(polyline.len(), BEZIER_FILL_LENGTH);

    let inside = Box2D {
        min: point(5.0, 5.0),
        max: point(6.0, 6.0),
    };
    let curve = path.segments()[1].to_cubic(point(0.0, 0.0)).unwrap();
    assert!(!is_culled(&curve, &inside));
    assert!(!is_culled(&curve, &clip));
}

#[test]
fn appending_to_a_shared_buffer() {
    let path = scenario_path();
    let mut output = vec![point(-5, -5)];

    let added = add_transformed_points(
        &path,
        &Transform::identity(),
        &PolylineOptions::DEFAULT,
        &mut output,
    )
    .unwrap();

    assert_eq!(added, output.len() - 1);
    assert_eq!(output[0], point(-5, -5));
    assert_eq!(output[1], point(0, 0));
}

#[test]
fn random_paths_respect_the_estimate() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..500 {
        let num_segments = rng.gen_range(1..40);
        let mut segments = Vec::with_capacity(num_segments);
        let random_point = |rng: &mut StdRng| {
            point(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0))
        };

        segments.push(PathSegment::start(random_point(&mut rng)));
        for _ in 1..num_segments {
            // Small segments produce many duplicates, large ones few.
            if rng.gen_bool(0.5) {
                segments.push(PathSegment::Line {
                    to: random_point(&mut rng),
                });
            } else {
                segments.push(PathSegment::Bezier {
                    ctrl1: random_point(&mut rng),
                    ctrl2: random_point(&mut rng),
                    to: random_point(&mut rng),
                });
            }
        }
        let path = segments_path(segments, rng.gen_bool(0.5));

        let scale = rng.gen_range(0.001..4.0);
        let transform = Transform::new(
            scale,
            rng.gen_range(-0.5..0.5),
            rng.gen_range(-0.5..0.5),
            scale,
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
        );
        let clip = Box2D {
            min: point(-50.0, -50.0),
            max: point(50.0, 50.0),
        };
        let options = PolylineOptions::DEFAULT
            .with_clip_rect(if rng.gen_bool(0.5) { Some(clip) } else { None })
            .with_optimize_clip(rng.gen_bool(0.5));

        let polyline = build_polyline(&path, &transform, &options).unwrap();

        assert!(polyline.len() <= estimate_number_of_points(&path));
        assert_eq!(
            polyline.first(),
            Some(&to_device(transform.transform_point(path.first_point().unwrap())))
        );
        assert_eq!(
            polyline.last(),
            Some(&to_device(transform.transform_point(path.last_point().unwrap())))
        );
    }
}
