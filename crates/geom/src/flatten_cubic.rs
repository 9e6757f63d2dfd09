//! Fixed-depth flattening of device space cubic bézier curves.
//!
//! Every curve is approximated with the same number of line segments, no matter its
//! size or shape. This wastes a few points on short or flat curves, but lets callers
//! compute an upper bound of the output size of a whole path by only looking at the
//! kind of each segment, and allocate once.
//!
//! The sizes below all derive from [`BEZIER_DEPTH`]:
//!
//! - [`BEZIER_NUM_STEPS`] is the number of line segments per curve,
//! - [`BEZIER_FILL_LENGTH`] is the number of points produced per curve, including
//!   both end points.
//!
//! The points are produced by evaluating the curve's polynomial form (the bézier
//! basis matrix applied to the control points) at `BEZIER_NUM_STEPS + 1` uniformly
//! spaced values of `t`, then rounding to the nearest pixel. The first and last
//! points are always exactly the curve's end points.

use crate::{point, CubicBezierSegment, DevicePoint, LineSegment};
use arrayvec::ArrayVec;

/// Subdivision depth of the flattening.
pub const BEZIER_DEPTH: u32 = 5;

/// Number of line segments a curve is approximated with.
pub const BEZIER_NUM_STEPS: usize = (1 << (BEZIER_DEPTH + 1)) + 1;

/// Number of points a flattened curve is made of, both end points included.
pub const BEZIER_FILL_LENGTH: usize = BEZIER_NUM_STEPS + 1;

/// Maps the four control points to the coefficients of the cubic polynomial,
/// highest degree first.
pub const BEZIER_BASIS: [[i64; 4]; 4] = [
    [-1, 3, -3, 1],
    [3, -6, 3, 0],
    [-3, 3, 0, 0],
    [1, 0, 0, 0],
];

// Polynomial coefficients of one coordinate. They are exact since the control
// points are integers.
fn coefficients(values: [i32; 4]) -> [f64; 4] {
    let mut result = [0.0; 4];
    for (row, coeff) in BEZIER_BASIS.iter().zip(result.iter_mut()) {
        let mut sum: i64 = 0;
        for (m, v) in row.iter().zip(values.iter()) {
            sum += m * (*v as i64);
        }
        *coeff = sum as f64;
    }

    result
}

#[inline]
fn evaluate(c: &[f64; 4], t: f64) -> i32 {
    (((c[0] * t + c[1]) * t + c[2]) * t + c[3]).round_ties_even() as i32
}

impl CubicBezierSegment<i32> {
    /// Invokes a callback for each of the [`BEZIER_FILL_LENGTH`] points of the flattened
    /// curve, starting with `from` and ending with `to`.
    ///
    /// Consecutive points may be equal. Collapsing them is up to the caller.
    pub fn for_each_flattened<F: FnMut(DevicePoint)>(&self, callback: &mut F) {
        let cx = coefficients([self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x]);
        let cy = coefficients([self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y]);

        callback(self.from);

        let step = 1.0 / BEZIER_NUM_STEPS as f64;
        for i in 1..BEZIER_NUM_STEPS {
            let t = i as f64 * step;
            callback(point(evaluate(&cx, t), evaluate(&cy, t)));
        }

        // Finish on the end point exactly.
        callback(self.to);
    }

    /// Returns the flattened representation of the curve.
    ///
    /// The result always contains exactly [`BEZIER_FILL_LENGTH`] points.
    pub fn flattened(&self) -> ArrayVec<DevicePoint, BEZIER_FILL_LENGTH> {
        let mut points = ArrayVec::new();
        self.for_each_flattened(&mut |p| points.push(p));

        points
    }

    /// Appends the flattened curve to `output` and returns the number of points written.
    pub fn flatten_into(&self, output: &mut Vec<DevicePoint>) -> usize {
        let start = output.len();
        self.for_each_flattened(&mut |p| output.push(p));

        output.len() - start
    }

    /// Invokes a callback for each line segment of the flattened curve.
    pub fn for_each_flattened_segment<F: FnMut(&LineSegment<i32>)>(&self, callback: &mut F) {
        for edge in self.flattened().windows(2) {
            callback(&LineSegment {
                from: edge[0],
                to: edge[1],
            });
        }
    }

    /// Returns whether `at` lies within `tolerance` pixels of the flattened curve.
    ///
    /// The comparison is inclusive.
    pub fn hit_test(&self, at: DevicePoint, tolerance: f64) -> bool {
        let at = at.to_f64();
        self.flattened().windows(2).any(|edge| {
            LineSegment {
                from: edge[0],
                to: edge[1],
            }
            .to_f64()
            .is_near(at, tolerance)
        })
    }
}

/// Flattens the curve defined by the four device space points.
///
/// Always returns [`BEZIER_FILL_LENGTH`] points, the first one being `p0` and the
/// last one `p3`.
pub fn flatten_bezier(
    p0: DevicePoint,
    p1: DevicePoint,
    p2: DevicePoint,
    p3: DevicePoint,
) -> ArrayVec<DevicePoint, BEZIER_FILL_LENGTH> {
    CubicBezierSegment {
        from: p0,
        ctrl1: p1,
        ctrl2: p2,
        to: p3,
    }
    .flattened()
}

/// Returns whether `at` lies within `tolerance` pixels of the flattened curve
/// defined by the four device space points.
pub fn hit_test_segment(
    p0: DevicePoint,
    p1: DevicePoint,
    p2: DevicePoint,
    p3: DevicePoint,
    at: DevicePoint,
    tolerance: f64,
) -> bool {
    CubicBezierSegment {
        from: p0,
        ctrl1: p1,
        ctrl2: p2,
        to: p3,
    }
    .hit_test(at, tolerance)
}

#[test]
fn derived_sizes() {
    assert_eq!(BEZIER_NUM_STEPS, 65);
    assert_eq!(BEZIER_FILL_LENGTH, 66);
    assert_eq!(BEZIER_FILL_LENGTH, (1 << (BEZIER_DEPTH + 1)) + 2);
}

#[test]
fn flatten_end_points() {
    let points = flatten_bezier(point(0, 0), point(100, 0), point(100, 100), point(100, 200));

    assert_eq!(points.len(), BEZIER_FILL_LENGTH);
    assert_eq!(points[0], point(0, 0));
    assert_eq!(points[BEZIER_FILL_LENGTH - 1], point(100, 200));
}

#[test]
fn flatten_is_deterministic() {
    let a = flatten_bezier(point(3, -7), point(120, 45), point(-60, 300), point(17, 11));
    let b = flatten_bezier(point(3, -7), point(120, 45), point(-60, 300), point(17, 11));

    assert_eq!(a, b);
}

#[test]
fn flatten_follows_the_curve() {
    let curve = CubicBezierSegment {
        from: point(0, 0),
        ctrl1: point(300, 0),
        ctrl2: point(300, 300),
        to: point(0, 300),
    };
    let reference = curve.to_f64();

    let points = curve.flattened();
    for (i, p) in points.iter().enumerate() {
        let t = i as f64 / BEZIER_NUM_STEPS as f64;
        let expected = reference.sample(t);
        assert!((p.x as f64 - expected.x).abs() <= 0.5 + 1e-9);
        assert!((p.y as f64 - expected.y).abs() <= 0.5 + 1e-9);
    }
}

#[test]
fn flatten_point() {
    let points = flatten_bezier(point(4, 4), point(4, 4), point(4, 4), point(4, 4));

    assert_eq!(points.len(), BEZIER_FILL_LENGTH);
    assert!(points.iter().all(|p| *p == point(4, 4)));
}

#[test]
fn flatten_into_appends() {
    let curve = CubicBezierSegment {
        from: point(0, 0),
        ctrl1: point(10, 0),
        ctrl2: point(10, 10),
        to: point(0, 10),
    };

    let mut output = vec![point(-1, -1)];
    let n = curve.flatten_into(&mut output);

    assert_eq!(n, BEZIER_FILL_LENGTH);
    assert_eq!(output.len(), BEZIER_FILL_LENGTH + 1);
    assert_eq!(output[1], point(0, 0));
    assert_eq!(output.last(), Some(&point(0, 10)));
}

#[test]
fn flattened_segments_are_connected() {
    let curve = CubicBezierSegment {
        from: point(0, 0),
        ctrl1: point(10, 40),
        ctrl2: point(50, -20),
        to: point(60, 10),
    };

    let mut count = 0;
    let mut prev = curve.from;
    curve.for_each_flattened_segment(&mut |segment| {
        assert_eq!(segment.from, prev);
        prev = segment.to;
        count += 1;
    });

    assert_eq!(count, BEZIER_NUM_STEPS);
    assert_eq!(prev, curve.to);
}

#[test]
fn hit_testing() {
    let p0 = point(0, 0);
    let p1 = point(0, 100);
    let p2 = point(100, 100);
    let p3 = point(100, 0);

    // On the end points.
    assert!(hit_test_segment(p0, p1, p2, p3, point(0, 0), 1.0));
    assert!(hit_test_segment(p0, p1, p2, p3, point(100, 0), 1.0));
    // The curve peaks at y = 75 for t = 0.5.
    assert!(hit_test_segment(p0, p1, p2, p3, point(50, 75), 1.0));
    assert!(hit_test_segment(p0, p1, p2, p3, point(50, 78), 3.0));
    assert!(!hit_test_segment(p0, p1, p2, p3, point(50, 80), 2.0));
    // Inside of the control hull but far from the curve.
    assert!(!hit_test_segment(p0, p1, p2, p3, point(50, 20), 2.0));
}
