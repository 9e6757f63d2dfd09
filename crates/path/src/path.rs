//! The path data structure.
//!

use crate::builder::Builder;
use crate::geom::traits::Transformation;
use crate::geom::{CubicBezierSegment, LineSegment};
use crate::math::{point, Box2D, Point};
use crate::PathEvent;

use std::fmt;
use std::iter::IntoIterator;

/// The kind of a [`PathSegment`], without its parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SegmentKind {
    Line,
    Bezier,
}

/// One element of a [`Path`].
///
/// The first segment of a path only supplies the start position: its kind is
/// meaningless and by convention it is a `Line`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathSegment {
    Line {
        to: Point,
    },
    Bezier {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
}

impl PathSegment {
    /// The segment used at the beginning of a path.
    #[inline]
    pub fn start(at: Point) -> Self {
        PathSegment::Line { to: at }
    }

    /// The endpoint of the segment.
    #[inline]
    pub fn to(&self) -> Point {
        match *self {
            PathSegment::Line { to } | PathSegment::Bezier { to, .. } => to,
        }
    }

    #[inline]
    pub fn kind(&self) -> SegmentKind {
        match self {
            PathSegment::Line { .. } => SegmentKind::Line,
            PathSegment::Bezier { .. } => SegmentKind::Bezier,
        }
    }

    #[inline]
    pub fn is_bezier(&self) -> bool {
        self.kind() == SegmentKind::Bezier
    }

    /// Returns the curve drawn by this segment when starting from `from`.
    pub fn to_cubic(&self, from: Point) -> Option<CubicBezierSegment<f64>> {
        match *self {
            PathSegment::Bezier { ctrl1, ctrl2, to } => Some(CubicBezierSegment {
                from,
                ctrl1,
                ctrl2,
                to,
            }),
            PathSegment::Line { .. } => None,
        }
    }

    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        match *self {
            PathSegment::Line { to } => PathSegment::Line {
                to: transform.transform_point(to),
            },
            PathSegment::Bezier { ctrl1, ctrl2, to } => PathSegment::Bezier {
                ctrl1: transform.transform_point(ctrl1),
                ctrl2: transform.transform_point(ctrl2),
                to: transform.transform_point(to),
            },
        }
    }
}

/// A simple path data structure.
///
/// A path is an immutable sequence of segments and a `closed` flag telling whether
/// the last point implicitly connects back to the first one.
///
/// A well formed path has at least one segment (its start point). An empty path can
/// still be created with [`Path::empty`] or [`Path::new`], drawing it is
/// rejected by the rasterizer.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path {
    segments: Box<[PathSegment]>,
    closed: bool,
}

impl Path {
    /// Creates an empty `Path`.
    #[inline]
    pub fn empty() -> Path {
        Path {
            segments: Box::new([]),
            closed: false,
        }
    }

    /// Creates a [Builder](../builder/struct.Builder.html) to build a path.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Creates a path from its segments.
    pub fn new<Iter>(segments: Iter, closed: bool) -> Path
    where
        Iter: IntoIterator<Item = PathSegment>,
    {
        Path {
            segments: segments.into_iter().collect::<Vec<_>>().into_boxed_slice(),
            closed,
        }
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments, the start point included.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Number of bézier segments.
    pub fn num_curves(&self) -> usize {
        self.segments.iter().skip(1).filter(|s| s.is_bezier()).count()
    }

    #[inline]
    pub fn first_point(&self) -> Option<Point> {
        self.segments.first().map(PathSegment::to)
    }

    #[inline]
    pub fn last_point(&self) -> Option<Point> {
        self.segments.last().map(PathSegment::to)
    }

    /// Iterates over the path's events.
    pub fn iter(&self) -> Iter {
        Iter::new(&self.segments, self.closed)
    }

    /// Applies a transform to all endpoints and control points of this path and
    /// returns the result.
    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        Path {
            segments: self
                .segments
                .iter()
                .map(|s| s.transformed(transform))
                .collect(),
            closed: self.closed,
        }
    }

    /// Computes a conservative axis-aligned rectangle that contains the path, using
    /// control points rather than the curves themselves.
    ///
    /// Returns an empty rectangle at the origin for an empty path.
    pub fn fast_bounding_box(&self) -> Box2D {
        let mut min = point(f64::MAX, f64::MAX);
        let mut max = point(f64::MIN, f64::MIN);
        for segment in self.segments.iter() {
            let (lo, hi) = match *segment {
                PathSegment::Line { to } => (to, to),
                PathSegment::Bezier { ctrl1, ctrl2, to } => (
                    to.min(ctrl1).min(ctrl2),
                    to.max(ctrl1).max(ctrl2),
                ),
            };
            min = min.min(lo);
            max = max.max(hi);
        }

        // Return an empty rectangle by default if there was no segment in the path.
        if self.segments.is_empty() {
            return Box2D::zero();
        }

        Box2D { min, max }
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "\"")?;
        for (i, segment) in self.segments.iter().enumerate() {
            match (i, segment) {
                (0, s) => write!(formatter, "M {} {}", s.to().x, s.to().y)?,
                (_, PathSegment::Line { to }) => write!(formatter, " L {} {}", to.x, to.y)?,
                (_, PathSegment::Bezier { ctrl1, ctrl2, to }) => write!(
                    formatter,
                    " C {} {} {} {} {} {}",
                    ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
                )?,
            }
        }
        if self.closed {
            write!(formatter, " Z")?;
        }
        write!(formatter, "\"")
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = PathEvent;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

/// An iterator over the events of a [`Path`].
///
/// Produces a `Begin` event, one `Line` or `Cubic` event per drawing segment and
/// an `End` event. An empty path produces no event.
#[derive(Clone)]
pub struct Iter<'l> {
    segments: std::slice::Iter<'l, PathSegment>,
    first: Point,
    current: Point,
    closed: bool,
    started: bool,
    ended: bool,
}

impl<'l> Iter<'l> {
    fn new(segments: &'l [PathSegment], closed: bool) -> Self {
        Iter {
            segments: segments.iter(),
            first: point(0.0, 0.0),
            current: point(0.0, 0.0),
            closed,
            started: false,
            ended: segments.is_empty(),
        }
    }
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        if self.ended {
            return None;
        }

        let segment = match self.segments.next() {
            Some(segment) => segment,
            None => {
                self.ended = true;
                return Some(PathEvent::End {
                    last: self.current,
                    first: self.first,
                    close: self.closed,
                });
            }
        };

        let from = self.current;
        self.current = segment.to();

        if !self.started {
            self.started = true;
            self.first = self.current;
            return Some(PathEvent::Begin { at: self.current });
        }

        Some(match *segment {
            PathSegment::Line { to } => PathEvent::Line { from, to },
            PathSegment::Bezier { ctrl1, ctrl2, to } => PathEvent::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            },
        })
    }
}

// Appends a line back to the first point unless the segments already end there.
pub(crate) fn close_segments(segments: &mut Vec<PathSegment>) {
    let (first, last) = match (segments.first(), segments.last()) {
        (Some(first), Some(last)) => (first.to(), last.to()),
        _ => return,
    };

    if segments.len() > 1 && first != last {
        segments.push(PathSegment::Line { to: first });
    }
}

/// Returns the line segments of the path's `Line` events, in order.
pub fn line_segments(path: &Path) -> impl Iterator<Item = LineSegment<f64>> + '_ {
    path.iter().filter_map(|evt| evt.as_line())
}

#[cfg(test)]
use crate::builder::PathBuilder;

#[test]
fn test_path_iter() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.cubic_bezier_to(point(10.0, 5.0), point(0.0, 5.0), point(0.0, 10.0));
    builder.close();
    let path = builder.build();

    let events: Vec<PathEvent> = path.iter().collect();
    assert_eq!(
        events,
        vec![
            PathEvent::Begin {
                at: point(0.0, 0.0)
            },
            PathEvent::Line {
                from: point(0.0, 0.0),
                to: point(10.0, 0.0)
            },
            PathEvent::Cubic {
                from: point(10.0, 0.0),
                ctrl1: point(10.0, 5.0),
                ctrl2: point(0.0, 5.0),
                to: point(0.0, 10.0)
            },
            PathEvent::Line {
                from: point(0.0, 10.0),
                to: point(0.0, 0.0)
            },
            PathEvent::End {
                last: point(0.0, 0.0),
                first: point(0.0, 0.0),
                close: true
            },
        ]
    );
}

#[test]
fn test_empty_path() {
    let path = Path::empty();
    assert!(path.is_empty());
    assert_eq!(path.iter().next(), None);
    assert_eq!(path.first_point(), None);
    assert_eq!(path.fast_bounding_box(), Box2D::zero());
}

#[test]
fn test_single_point_path() {
    let path = Path::new(vec![PathSegment::start(point(3.0, 4.0))], false);

    let events: Vec<PathEvent> = path.iter().collect();
    assert_eq!(
        events,
        vec![
            PathEvent::Begin {
                at: point(3.0, 4.0)
            },
            PathEvent::End {
                last: point(3.0, 4.0),
                first: point(3.0, 4.0),
                close: false
            },
        ]
    );
    assert_eq!(path.first_point(), path.last_point());
}

#[test]
fn test_fast_bounding_box() {
    let path = Path::new(
        vec![
            PathSegment::start(point(0.0, 0.0)),
            PathSegment::Bezier {
                ctrl1: point(-5.0, 3.0),
                ctrl2: point(4.0, 12.0),
                to: point(2.0, 2.0),
            },
            PathSegment::Line {
                to: point(7.0, -1.0),
            },
        ],
        true,
    );

    let b = path.fast_bounding_box();
    assert_eq!(b.min, point(-5.0, -1.0));
    assert_eq!(b.max, point(7.0, 12.0));
    assert_eq!(path.num_curves(), 1);
}

#[test]
fn test_transformed() {
    use crate::math::Transform;

    let path = Path::new(
        vec![
            PathSegment::start(point(1.0, 1.0)),
            PathSegment::Line {
                to: point(2.0, 1.0),
            },
        ],
        false,
    )
    .transformed(&Transform::scale(2.0, 3.0));

    assert_eq!(path.first_point(), Some(point(2.0, 3.0)));
    assert_eq!(path.last_point(), Some(point(4.0, 3.0)));
    assert!(!path.is_closed());
    assert_eq!(line_segments(&path).count(), 1);
}

#[test]
fn test_debug_format() {
    let path = Path::new(
        vec![
            PathSegment::start(point(0.0, 0.0)),
            PathSegment::Line {
                to: point(1.0, 0.0),
            },
        ],
        true,
    );

    assert_eq!(format!("{:?}", path), "\"M 0 0 L 1 0 Z\"");
}
