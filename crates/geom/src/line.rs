use crate::{DevicePoint, Point};

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: euclid::default::Point2D<S>,
    pub to: euclid::default::Point2D<S>,
}

impl LineSegment<f64> {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f64) -> Point {
        self.from.lerp(self.to, t)
    }

    /// Computes the distance between this segment and a point.
    #[inline]
    pub fn distance_to_point(&self, p: Point) -> f64 {
        self.square_distance_to_point(p).sqrt()
    }

    /// Computes the squared distance between this segment and a point.
    ///
    /// Can be useful to save a square root when comparing against
    /// a distance that can be squared.
    #[inline]
    pub fn square_distance_to_point(&self, p: Point) -> f64 {
        (self.closest_point(p) - p).square_length()
    }

    /// Computes the closest point on this segment to `p`.
    #[inline]
    pub fn closest_point(&self, p: Point) -> Point {
        let v1 = self.to - self.from;
        let v2 = p - self.from;
        let len2 = v1.dot(v1);
        if len2 == 0.0 {
            // The segment is a single point.
            return self.from;
        }

        let t = f64::min(f64::max(v2.dot(v1) / len2, 0.0), 1.0);

        self.from + v1 * t
    }

    /// Returns whether `p` is within `tolerance` of this segment.
    ///
    /// The comparison is inclusive.
    #[inline]
    pub fn is_near(&self, p: Point, tolerance: f64) -> bool {
        self.square_distance_to_point(p) <= tolerance * tolerance
    }
}

impl LineSegment<i32> {
    #[inline]
    pub fn to_f64(&self) -> LineSegment<f64> {
        LineSegment {
            from: self.from.to_f64(),
            to: self.to.to_f64(),
        }
    }
}

/// Returns whether the device space point `at` lies within `tolerance` pixels of
/// the line between `from` and `to`.
pub fn hit_test_line(from: DevicePoint, to: DevicePoint, at: DevicePoint, tolerance: f64) -> bool {
    LineSegment { from, to }
        .to_f64()
        .is_near(at.to_f64(), tolerance)
}

#[cfg(test)]
use crate::point;

#[test]
fn distance_to_point() {
    let l = LineSegment {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
    };

    assert_eq!(l.distance_to_point(point(5.0, 3.0)), 3.0);
    assert_eq!(l.distance_to_point(point(-3.0, 4.0)), 5.0);
    assert_eq!(l.distance_to_point(point(13.0, -4.0)), 5.0);
    assert_eq!(l.closest_point(point(7.0, 100.0)), point(7.0, 0.0));
}

#[test]
fn degenerate_segment_distance() {
    let l = LineSegment {
        from: point(1.0, 1.0),
        to: point(1.0, 1.0),
    };

    assert_eq!(l.closest_point(point(4.0, 5.0)), point(1.0, 1.0));
    assert_eq!(l.distance_to_point(point(4.0, 5.0)), 5.0);
}

#[test]
fn hit_line_tolerance_is_inclusive() {
    let from = point(0, 0);
    let to = point(0, 20);

    assert!(hit_test_line(from, to, point(2, 10), 2.0));
    assert!(!hit_test_line(from, to, point(3, 10), 2.0));
    assert!(hit_test_line(from, to, point(0, 22), 2.0));
    assert!(!hit_test_line(from, to, point(0, 23), 2.0));
}
