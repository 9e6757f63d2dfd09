use crate::geom::traits::Transformation;
use crate::geom::{CubicBezierSegment, LineSegment};
use crate::math::Point;

/// Represents an event or edge of a path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathEvent {
    Begin {
        at: Point,
    },
    Line {
        from: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    End {
        last: Point,
        first: Point,
        close: bool,
    },
}

impl PathEvent {
    pub fn from(&self) -> Point {
        match *self {
            PathEvent::Line { from, .. }
            | PathEvent::Cubic { from, .. }
            | PathEvent::Begin { at: from }
            | PathEvent::End { last: from, .. } => from,
        }
    }

    pub fn to(&self) -> Point {
        match *self {
            PathEvent::Line { to, .. }
            | PathEvent::Cubic { to, .. }
            | PathEvent::Begin { at: to }
            | PathEvent::End { first: to, .. } => to,
        }
    }

    /// Returns the line segment of a `Line` event.
    pub fn as_line(&self) -> Option<LineSegment<f64>> {
        match *self {
            PathEvent::Line { from, to } => Some(LineSegment { from, to }),
            _ => None,
        }
    }

    /// Returns the curve of a `Cubic` event.
    pub fn as_cubic(&self) -> Option<CubicBezierSegment<f64>> {
        match *self {
            PathEvent::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => Some(CubicBezierSegment {
                from,
                ctrl1,
                ctrl2,
                to,
            }),
            _ => None,
        }
    }

    pub fn transformed<T: Transformation>(&self, mat: &T) -> Self {
        match self {
            PathEvent::Line { from, to } => PathEvent::Line {
                from: mat.transform_point(*from),
                to: mat.transform_point(*to),
            },
            PathEvent::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => PathEvent::Cubic {
                from: mat.transform_point(*from),
                ctrl1: mat.transform_point(*ctrl1),
                ctrl2: mat.transform_point(*ctrl2),
                to: mat.transform_point(*to),
            },
            PathEvent::Begin { at } => PathEvent::Begin {
                at: mat.transform_point(*at),
            },
            PathEvent::End { first, last, close } => PathEvent::End {
                last: mat.transform_point(*last),
                first: mat.transform_point(*first),
                close: *close,
            },
        }
    }
}
