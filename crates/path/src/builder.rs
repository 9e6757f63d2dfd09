//! Path building utilities.
//!
//! [`PathBuilder`] is the interface shared by all builders. [`Builder`] produces a
//! single [`Path`], while [`path_set::Builder`](crate::path_set::Builder) produces a
//! [`PathSet`](crate::PathSet) with one path per sub-path.
//!
//! ## Examples
//!
//! ```
//! use curvedraw_path::{Path, math::point, traits::PathBuilder};
//!
//! let mut builder = Path::builder();
//!
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(1.0, 0.0));
//! builder.cubic_bezier_to(point(2.0, 0.0), point(2.0, 1.0), point(1.0, 1.0));
//! builder.close(); // close() is equivalent to end(true).
//!
//! // Closing added a line back to the first point.
//! let path = builder.build();
//! assert_eq!(path.len(), 4);
//! assert_eq!(path.last_point(), path.first_point());
//! ```
//!
//! Drawing commands issued while no sub-path is in progress start one at the end
//! point of the command, so the following builds a path that only contains `(5, 5)`:
//!
//! ```
//! use curvedraw_path::{Path, math::point, traits::PathBuilder};
//!
//! let mut builder = Path::builder();
//! builder.line_to(point(5.0, 5.0));
//! let path = builder.build();
//!
//! assert_eq!(path.len(), 1);
//! assert_eq!(path.first_point(), Some(point(5.0, 5.0)));
//! ```

use crate::events::PathEvent;
use crate::geom::traits::Transformation;
use crate::math::*;
use crate::path::{close_segments, Path, PathSegment};

use std::iter::IntoIterator;

/// The interface implemented by all path builders.
pub trait PathBuilder {
    /// Starts a new sub-path at a given position.
    ///
    /// There should be no sub-path in progress when this method is called.
    /// `at` becomes the current position of the sub-path.
    fn begin(&mut self, at: Point);

    /// Ends the current sub path.
    ///
    /// After this method is called, there is no sub-path in progress until
    /// `begin` is called again.
    fn end(&mut self, close: bool);

    /// Closes the current sub path.
    ///
    /// Shorthand for `builder.end(true)`.
    fn close(&mut self) {
        self.end(true)
    }

    /// Adds a line segment to the current sub-path.
    fn line_to(&mut self, to: Point);

    /// Adds a cubic bézier curve to the current sub-path.
    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point);

    /// Hints at the builder that a certain number of segments will be added.
    fn reserve(&mut self, _segments: usize) {}

    /// Applies the provided path event.
    ///
    /// By default this calls one of `begin`, `end`, `line_to` or `cubic_bezier_to`
    /// according to the path event.
    fn path_event(&mut self, event: PathEvent) {
        match event {
            PathEvent::Begin { at } => {
                self.begin(at);
            }
            PathEvent::Line { to, .. } => {
                self.line_to(to);
            }
            PathEvent::Cubic {
                ctrl1, ctrl2, to, ..
            } => {
                self.cubic_bezier_to(ctrl1, ctrl2, to);
            }
            PathEvent::End { close, .. } => {
                self.end(close);
            }
        }
    }

    /// Adds events from an iterator.
    fn extend<Evts>(&mut self, events: Evts)
    where
        Evts: IntoIterator<Item = PathEvent>,
        Self: Sized,
    {
        for evt in events.into_iter() {
            self.path_event(evt)
        }
    }

    /// Adds a sub-path made of line segments between the provided points.
    ///
    /// Does nothing if `points` is empty.
    fn add_polygon(&mut self, points: &[Point], closed: bool) {
        if points.is_empty() {
            return;
        }

        self.reserve(points.len());

        self.begin(points[0]);
        for p in &points[1..] {
            self.line_to(*p);
        }

        self.end(closed);
    }

    /// Returns a builder that applies the given transform to all points.
    fn transformed<T>(self, transform: T) -> Transformed<Self, T>
    where
        T: Transformation,
        Self: Sized,
    {
        Transformed::new(self, transform)
    }
}

/// Builds a path.
///
/// This trait is separate from `PathBuilder` to allow it to be used as trait object
/// (which isn't possible when a method returns an associated type).
pub trait Build {
    /// The type of object that is created by this builder.
    type PathType;

    /// Builds a path object, consuming the builder.
    fn build(self) -> Self::PathType;
}

/// Builds a single [`Path`].
///
/// A `Path` holds exactly one sub-path. Starting a second sub-path discards the
/// first one, use a [`PathSet`](crate::PathSet) to describe several.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    segments: Vec<PathSegment>,
    closed: bool,
    in_subpath: bool,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            segments: Vec::new(),
            closed: false,
            in_subpath: false,
        }
    }

    pub fn with_capacity(segments: usize) -> Self {
        Builder {
            segments: Vec::with_capacity(segments),
            closed: false,
            in_subpath: false,
        }
    }

    /// Returns the current position, if a segment was added.
    pub fn current_position(&self) -> Option<Point> {
        self.segments.last().map(PathSegment::to)
    }

    pub fn build(self) -> Path {
        Path::new(self.segments, self.closed)
    }

    // Returns true if the drawing command must be skipped because it started the
    // sub-path.
    fn begin_if_needed(&mut self, to: Point) -> bool {
        if self.in_subpath {
            return false;
        }

        self.begin(to);

        true
    }
}

impl PathBuilder for Builder {
    fn begin(&mut self, at: Point) {
        nan_check(at);
        self.segments.clear();
        self.segments.push(PathSegment::start(at));
        self.closed = false;
        self.in_subpath = true;
    }

    fn end(&mut self, close: bool) {
        if self.in_subpath {
            if close {
                close_segments(&mut self.segments);
            }
            self.closed = close;
        }
        self.in_subpath = false;
    }

    fn line_to(&mut self, to: Point) {
        nan_check(to);
        if self.begin_if_needed(to) {
            return;
        }

        self.segments.push(PathSegment::Line { to });
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        nan_check(ctrl1);
        nan_check(ctrl2);
        nan_check(to);
        if self.begin_if_needed(to) {
            return;
        }

        self.segments.push(PathSegment::Bezier { ctrl1, ctrl2, to });
    }

    fn reserve(&mut self, segments: usize) {
        self.segments.reserve(segments);
    }
}

impl Build for Builder {
    type PathType = Path;

    fn build(self) -> Path {
        Builder::build(self)
    }
}

/// A builder that applies a transform to all points before forwarding them.
pub struct Transformed<Builder, Transform> {
    builder: Builder,
    transform: Transform,
}

impl<Builder, Transform> Transformed<Builder, Transform> {
    #[inline]
    pub fn new(builder: Builder, transform: Transform) -> Self {
        Transformed { builder, transform }
    }
}

impl<Builder: Build, Transform> Build for Transformed<Builder, Transform> {
    type PathType = Builder::PathType;

    #[inline]
    fn build(self) -> Builder::PathType {
        self.builder.build()
    }
}

impl<Builder, Transform> PathBuilder for Transformed<Builder, Transform>
where
    Builder: PathBuilder,
    Transform: Transformation,
{
    #[inline]
    fn begin(&mut self, at: Point) {
        self.builder.begin(self.transform.transform_point(at));
    }

    #[inline]
    fn end(&mut self, close: bool) {
        self.builder.end(close)
    }

    #[inline]
    fn line_to(&mut self, to: Point) {
        self.builder.line_to(self.transform.transform_point(to));
    }

    #[inline]
    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.builder.cubic_bezier_to(
            self.transform.transform_point(ctrl1),
            self.transform.transform_point(ctrl2),
            self.transform.transform_point(to),
        );
    }

    #[inline]
    fn reserve(&mut self, segments: usize) {
        self.builder.reserve(segments);
    }
}

#[inline]
pub(crate) fn nan_check(p: Point) {
    debug_assert!(p.x.is_finite());
    debug_assert!(p.y.is_finite());
}

#[test]
fn build_open_path() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.line_to(point(1.0, 1.0));
    builder.end(false);

    let path = builder.build();
    assert_eq!(path.len(), 3);
    assert!(!path.is_closed());
    assert_eq!(path.last_point(), Some(point(1.0, 1.0)));
}

#[test]
fn implicit_begin() {
    let mut builder = Path::builder();
    builder.cubic_bezier_to(point(1.0, 0.0), point(1.0, 1.0), point(0.0, 1.0));
    builder.line_to(point(3.0, 3.0));
    builder.close();

    let path = builder.build();
    assert_eq!(
        path.segments(),
        &[
            PathSegment::start(point(0.0, 1.0)),
            PathSegment::Line {
                to: point(3.0, 3.0)
            },
            PathSegment::Line {
                to: point(0.0, 1.0)
            },
        ]
    );
    assert!(path.is_closed());
}

#[test]
fn end_without_subpath() {
    let mut builder = Path::builder();
    builder.close();

    let path = builder.build();
    assert!(path.is_empty());
    assert!(!path.is_closed());
}

#[test]
fn add_polygon() {
    let mut builder = Path::builder();
    builder.add_polygon(&[point(0.0, 0.0), point(4.0, 0.0), point(4.0, 4.0)], true);

    let path = builder.build();
    assert_eq!(path.len(), 4);
    assert!(path.is_closed());
    assert_eq!(path.last_point(), Some(point(0.0, 0.0)));

    // No extra segment when the polygon already ends at its first point.
    let mut builder = Path::builder();
    builder.add_polygon(&[point(0.0, 0.0), point(4.0, 0.0), point(0.0, 0.0)], true);
    assert_eq!(builder.build().len(), 3);
}

#[test]
fn transformed_builder() {
    let mut builder = Path::builder().transformed(Translation::new(10.0, 20.0));
    builder.begin(point(0.0, 0.0));
    builder.cubic_bezier_to(point(1.0, 0.0), point(1.0, 1.0), point(0.0, 1.0));
    builder.end(false);

    let path = builder.build();
    assert_eq!(path.first_point(), Some(point(10.0, 20.0)));
    assert_eq!(
        path.segments()[1],
        PathSegment::Bezier {
            ctrl1: point(11.0, 20.0),
            ctrl2: point(11.0, 21.0),
            to: point(10.0, 21.0),
        }
    );
}

#[test]
fn replay_events() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(2.0, 0.0));
    builder.close();
    let original = builder.build();

    let mut copy = Path::builder();
    copy.extend(original.iter());

    assert_eq!(copy.build(), original);
}
