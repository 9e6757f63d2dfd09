use crate::traits::Transformation;
use crate::{point, to_device, Box2D, Point, Vector};

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
///
/// `CubicBezierSegment<f64>` lives in path space and supports sampling and transforms,
/// while `CubicBezierSegment<i32>` lives in device space and is what gets flattened
/// (see the [`flatten_cubic`](crate::flatten_cubic) module).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: euclid::default::Point2D<S>,
    pub ctrl1: euclid::default::Point2D<S>,
    pub ctrl2: euclid::default::Point2D<S>,
    pub to: euclid::default::Point2D<S>,
}

impl<S: Copy> CubicBezierSegment<S> {
    /// Start of the curve.
    #[inline]
    pub fn from(&self) -> euclid::default::Point2D<S> {
        self.from
    }

    /// End of the curve.
    #[inline]
    pub fn to(&self) -> euclid::default::Point2D<S> {
        self.to
    }

    /// The four points in curve order.
    #[inline]
    pub fn points(&self) -> [euclid::default::Point2D<S>; 4] {
        [self.from, self.ctrl1, self.ctrl2, self.to]
    }
}

impl CubicBezierSegment<f64> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f64) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * 3.0 * one_t2 * t
            + self.ctrl2.to_vector() * 3.0 * one_t * t2
            + self.to.to_vector() * t3
    }

    #[inline]
    fn derivative_coefficients(&self, t: f64) -> (f64, f64, f64, f64) {
        let t2 = t * t;
        (
            -3.0 * t2 + 6.0 * t - 3.0,
            9.0 * t2 - 12.0 * t + 3.0,
            -9.0 * t2 + 6.0 * t,
            3.0 * t2,
        )
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    ///
    /// This is the tangent direction of the curve, not normalized.
    pub fn derivative(&self, t: f64) -> Vector {
        let (c0, c1, c2, c3) = self.derivative_coefficients(t);
        self.from.to_vector() * c0
            + self.ctrl1.to_vector() * c1
            + self.ctrl2.to_vector() * c2
            + self.to.to_vector() * c3
    }

    /// Applies the transform to this curve and returns the results.
    #[inline]
    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        CubicBezierSegment {
            from: transform.transform_point(self.from),
            ctrl1: transform.transform_point(self.ctrl1),
            ctrl2: transform.transform_point(self.ctrl2),
            to: transform.transform_point(self.to),
        }
    }

    /// Rounds each of the four points to the device pixel grid.
    #[inline]
    pub fn to_device(&self) -> CubicBezierSegment<i32> {
        CubicBezierSegment {
            from: to_device(self.from),
            ctrl1: to_device(self.ctrl1),
            ctrl2: to_device(self.ctrl2),
            to: to_device(self.to),
        }
    }

    /// Returns a conservative rectangle the curve is contained in.
    ///
    /// This is the bounding box of the four points (the control hull), which always
    /// contains the curve.
    pub fn fast_bounding_box(&self) -> Box2D {
        let (min_x, max_x) = self.fast_bounding_range_x();
        let (min_y, max_y) = self.fast_bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns a conservative range of x that contains this curve.
    #[inline]
    pub fn fast_bounding_range_x(&self) -> (f64, f64) {
        let min_x = self
            .from
            .x
            .min(self.ctrl1.x)
            .min(self.ctrl2.x)
            .min(self.to.x);
        let max_x = self
            .from
            .x
            .max(self.ctrl1.x)
            .max(self.ctrl2.x)
            .max(self.to.x);

        (min_x, max_x)
    }

    /// Returns a conservative range of y that contains this curve.
    #[inline]
    pub fn fast_bounding_range_y(&self) -> (f64, f64) {
        let min_y = self
            .from
            .y
            .min(self.ctrl1.y)
            .min(self.ctrl2.y)
            .min(self.to.y);
        let max_y = self
            .from
            .y
            .max(self.ctrl1.y)
            .max(self.ctrl2.y)
            .max(self.to.y);

        (min_y, max_y)
    }
}

impl CubicBezierSegment<i32> {
    #[inline]
    pub fn to_f64(&self) -> CubicBezierSegment<f64> {
        CubicBezierSegment {
            from: self.from.to_f64(),
            ctrl1: self.ctrl1.to_f64(),
            ctrl2: self.ctrl2.to_f64(),
            to: self.to.to_f64(),
        }
    }
}

#[test]
fn sample_end_points() {
    let c = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 0.0),
        ctrl2: point(1.0, 1.0),
        to: point(0.0, 1.0),
    };

    assert_eq!(c.sample(0.0), c.from);
    assert_eq!(c.sample(1.0), c.to);
    assert_eq!(c.sample(0.5), point(0.75, 0.5));
}

#[test]
fn derivative() {
    let c = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 0.0),
        ctrl2: point(1.0, 1.0),
        to: point(0.0, 1.0),
    };

    // The tangent at the ends points along the control arms, scaled by 3.
    assert_eq!(c.derivative(0.0), crate::vector(3.0, 0.0));
    assert_eq!(c.derivative(1.0), crate::vector(-3.0, 0.0));
    assert_eq!(c.derivative(0.5), crate::vector(0.0, 1.5));
}

#[test]
fn fast_bounding_box_includes_control_points() {
    let c = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(-5.0, 20.0),
        ctrl2: point(15.0, -3.0),
        to: point(10.0, 10.0),
    };

    let b = c.fast_bounding_box();
    assert_eq!(b.min, point(-5.0, -3.0));
    assert_eq!(b.max, point(15.0, 20.0));
}

#[test]
fn transformed_and_rounded() {
    use crate::Transform;

    let c = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.2, 0.0),
        ctrl2: point(1.0, 1.0),
        to: point(0.0, 1.0),
    };

    let device = c
        .transformed(&Transform::scale(10.0, 10.0).then_translate(crate::vector(5.0, 5.0)))
        .to_device();

    assert_eq!(device.from, point(5, 5));
    assert_eq!(device.ctrl1, point(17, 5));
    assert_eq!(device.ctrl2, point(15, 15));
    assert_eq!(device.to, point(5, 15));
}
