//! Several paths describing one shape.

use crate::builder::{nan_check, Build, PathBuilder};
use crate::math::{Box2D, Point};
use crate::path::{close_segments, Path, PathSegment};

use std::iter::FromIterator;
use std::ops::Index;

/// An ordered sequence of paths that together describe one shape.
///
/// A glyph with a hole is typically a `PathSet` of two paths. Filling is done with
/// the even-odd rule, so the order of the paths does not change which pixels are
/// covered, it only changes the order of the points in the composed polygon.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PathSet {
    paths: Vec<Path>,
}

impl PathSet {
    pub fn new() -> Self {
        PathSet { paths: Vec::new() }
    }

    /// Creates a builder producing one path per sub-path.
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn push(&mut self, path: Path) {
        self.paths.push(path);
    }

    pub fn iter(&self) -> std::slice::Iter<Path> {
        self.paths.iter()
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Total number of segments over all paths.
    pub fn num_segments(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }

    /// Union of the paths' [fast bounding boxes](Path::fast_bounding_box), ignoring
    /// empty paths.
    pub fn fast_bounding_box(&self) -> Box2D {
        self.paths
            .iter()
            .filter(|path| !path.is_empty())
            .map(Path::fast_bounding_box)
            .fold(None, |acc: Option<Box2D>, b| match acc {
                Some(acc) => Some(acc.union(&b)),
                None => Some(b),
            })
            .unwrap_or_else(Box2D::zero)
    }
}

impl From<Vec<Path>> for PathSet {
    fn from(paths: Vec<Path>) -> Self {
        PathSet { paths }
    }
}

impl From<Path> for PathSet {
    fn from(path: Path) -> Self {
        PathSet { paths: vec![path] }
    }
}

impl FromIterator<Path> for PathSet {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        PathSet {
            paths: iter.into_iter().collect(),
        }
    }
}

impl Extend<Path> for PathSet {
    fn extend<I: IntoIterator<Item = Path>>(&mut self, iter: I) {
        self.paths.extend(iter);
    }
}

impl Index<usize> for PathSet {
    type Output = Path;

    fn index(&self, index: usize) -> &Path {
        &self.paths[index]
    }
}

impl<'l> IntoIterator for &'l PathSet {
    type Item = &'l Path;
    type IntoIter = std::slice::Iter<'l, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl IntoIterator for PathSet {
    type Item = Path;
    type IntoIter = std::vec::IntoIter<Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

/// Builds a [`PathSet`], starting a new path on each `begin`.
///
/// A sub-path that is still in progress when `build` is called is kept, as an open
/// path.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    paths: Vec<Path>,
    current: Vec<PathSegment>,
    in_subpath: bool,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            paths: Vec::new(),
            current: Vec::new(),
            in_subpath: false,
        }
    }

    /// Returns the current position, if a sub-path is in progress.
    pub fn current_position(&self) -> Option<Point> {
        if !self.in_subpath {
            return None;
        }

        self.current.last().map(PathSegment::to)
    }

    pub fn build(mut self) -> PathSet {
        self.flush(false);

        PathSet { paths: self.paths }
    }

    fn flush(&mut self, closed: bool) {
        if !self.in_subpath {
            return;
        }

        let mut segments = std::mem::take(&mut self.current);
        if closed {
            close_segments(&mut segments);
        }
        self.paths.push(Path::new(segments, closed));
        self.in_subpath = false;
    }

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
        self.flush(false);
        self.current.push(PathSegment::start(at));
        self.in_subpath = true;
    }

    fn end(&mut self, close: bool) {
        self.flush(close);
    }

    fn line_to(&mut self, to: Point) {
        nan_check(to);
        if self.begin_if_needed(to) {
            return;
        }

        self.current.push(PathSegment::Line { to });
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        nan_check(ctrl1);
        nan_check(ctrl2);
        nan_check(to);
        if self.begin_if_needed(to) {
            return;
        }

        self.current.push(PathSegment::Bezier { ctrl1, ctrl2, to });
    }

    fn reserve(&mut self, segments: usize) {
        self.current.reserve(segments);
    }
}

impl Build for Builder {
    type PathType = PathSet;

    fn build(self) -> PathSet {
        Builder::build(self)
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn one_path_per_subpath() {
    let mut builder = PathSet::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 10.0));
    builder.close();

    builder.begin(point(2.0, 2.0));
    builder.cubic_bezier_to(point(4.0, 2.0), point(4.0, 4.0), point(2.0, 4.0));
    builder.end(false);

    let set = builder.build();
    assert_eq!(set.len(), 2);
    assert!(set[0].is_closed());
    assert!(!set[1].is_closed());
    assert_eq!(set[1].num_curves(), 1);
    // Closing the first sub-path added a line back to its start.
    assert_eq!(set[0].len(), 4);
    assert_eq!(set.num_segments(), 6);
}

#[test]
fn unterminated_subpaths() {
    let mut builder = PathSet::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    // Starting a new sub-path ends the previous one.
    builder.begin(point(5.0, 5.0));
    builder.line_to(point(6.0, 5.0));

    let set = builder.build();
    assert_eq!(set.len(), 2);
    assert!(!set[0].is_closed());
    assert_eq!(set[1].first_point(), Some(point(5.0, 5.0)));
}

#[test]
fn drawing_without_begin() {
    let mut builder = PathSet::builder();
    builder.line_to(point(1.0, 1.0));
    builder.line_to(point(2.0, 1.0));
    builder.close();
    builder.line_to(point(7.0, 7.0));

    let set = builder.build();
    assert_eq!(set.len(), 2);
    assert_eq!(set[0].len(), 3);
    assert_eq!(set[0].first_point(), Some(point(1.0, 1.0)));
    assert_eq!(set[1].len(), 1);
}

#[test]
fn bounding_box_skips_empty_paths() {
    let set: PathSet = vec![
        Path::empty(),
        Path::new(
            vec![
                PathSegment::start(point(1.0, 1.0)),
                PathSegment::Line {
                    to: point(3.0, 2.0),
                },
            ],
            false,
        ),
        Path::new(vec![PathSegment::start(point(-1.0, 5.0))], false),
    ]
    .into_iter()
    .collect();

    let b = set.fast_bounding_box();
    assert_eq!(b.min, point(-1.0, 1.0));
    assert_eq!(b.max, point(3.0, 5.0));
    assert_eq!(PathSet::new().fast_bounding_box(), Box2D::zero());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn nan_points_are_rejected() {
    let mut builder = PathSet::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(std::f64::NAN, 1.0));
}
