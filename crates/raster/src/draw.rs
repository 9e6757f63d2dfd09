//! Drawing paths and path sets on a [`DrawTarget`].
//!
//! These functions compute all the points first and only talk to the target once
//! that succeeded, so a path that can't be drawn leaves the target untouched.

use crate::compositor::{compose, CompositeOptions};
use crate::error::RasterResult;
use crate::math::Box2D;
use crate::polyline::{build_polyline, is_degenerate, PolylineOptions};
use crate::target::{DrawTarget, FillRule, Region};
use curvedraw_path::traits::Transformation;
use curvedraw_path::{Path, PathSet};

use log::debug;

/// How a path set is filled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillStyle {
    /// Not filled.
    None,
    /// Filled with the target's current color.
    Solid,
    /// Filled by [`DrawTarget::fill_region`] after clipping to the shape.
    Procedural,
}

/// Parameters for [`draw_multi_path`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct MultiPathStyle {
    /// Default value: `FillStyle::None`.
    pub fill: FillStyle,

    /// Whether each path is stroked.
    ///
    /// Default value: `false`.
    pub line: bool,

    /// Whether the target's clip is set to the shape after filling it and left that
    /// way.
    ///
    /// Default value: `false`.
    pub clip_to_region: bool,
}

impl MultiPathStyle {
    pub const DEFAULT: Self = MultiPathStyle {
        fill: FillStyle::None,
        line: false,
        clip_to_region: false,
    };

    #[inline]
    pub const fn with_fill(mut self, fill: FillStyle) -> Self {
        self.fill = fill;
        self
    }

    #[inline]
    pub const fn with_line(mut self, line: bool) -> Self {
        self.line = line;
        self
    }

    #[inline]
    pub const fn with_clip_to_region(mut self, clip: bool) -> Self {
        self.clip_to_region = clip;
        self
    }

    /// Whether the paths are stitched into one polygon and added to the region.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.fill != FillStyle::None || self.clip_to_region
    }
}

impl Default for MultiPathStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Draws a single path.
///
/// The path is filled if `fill` is requested and the path is closed, and stroked if
/// `line` is requested. Curves outside of `clip_rect` (in path space) are simplified
/// unless the path is stroked.
pub fn draw_single_path<D, T>(
    target: &mut D,
    path: &Path,
    transform: &T,
    clip_rect: Option<Box2D>,
    fill: bool,
    line: bool,
) -> RasterResult<()>
where
    D: DrawTarget + ?Sized,
    T: Transformation,
{
    let options = PolylineOptions::DEFAULT
        .with_clip_rect(clip_rect)
        .with_optimize_clip(!line);
    let polyline = build_polyline(path, transform, &options)?;

    if polyline.is_degenerate() {
        debug!("Nothing to draw ({} points).", polyline.len());
        return Ok(());
    }

    if fill && path.is_closed() {
        target.fill_polygon(&polyline, FillRule::EvenOdd);
    }

    if line {
        target.draw_polyline(&polyline);
    }

    Ok(())
}

/// Draws several paths as one shape.
///
/// When the style [is filled](MultiPathStyle::is_filled), the paths are stitched into
/// one even-odd polygon which is added to `region`, then:
///
/// - a `Solid` fill paints the polygon,
/// - a `Procedural` fill sets the clip to `region` and calls
///   [`fill_region`](DrawTarget::fill_region), restoring the previous clip afterwards
///   unless `clip_to_region` is set,
/// - otherwise, if `clip_to_region` is set, the clip is set to `region`.
///
/// Then, if `line` is set, each path is stroked on its own.
pub fn draw_multi_path<D, T>(
    target: &mut D,
    region: &mut D::Region,
    paths: &PathSet,
    transform: &T,
    clip_rect: Option<Box2D>,
    style: &MultiPathStyle,
) -> RasterResult<()>
where
    D: DrawTarget + ?Sized,
    T: Transformation,
{
    let filled = style.is_filled();
    let options = CompositeOptions::DEFAULT
        .with_clip_rect(clip_rect)
        .with_optimize_clip(!style.line)
        .with_filled(filled);

    let composition = compose(paths, transform, &options)?;

    if composition.is_degenerate() {
        debug!("Nothing to draw ({} points).", composition.len());
        return Ok(());
    }

    if filled {
        region.union_polygon(composition.polygon(), FillRule::EvenOdd);

        if style.fill == FillStyle::Procedural {
            if !style.clip_to_region {
                target.push_clip();
            }
            target.set_clip_region(region);
            target.fill_region(region);
            if !style.clip_to_region {
                target.pop_clip();
            }
        } else {
            if style.fill == FillStyle::Solid {
                target.fill_polygon(composition.polygon(), FillRule::EvenOdd);
            }
            if style.clip_to_region {
                target.set_clip_region(region);
            }
        }
    }

    if style.line {
        // A lone point has no length.
        for polyline in composition.subpaths().filter(|p| !is_degenerate(p)) {
            target.draw_polyline(polyline);
        }
    }

    Ok(())
}

/// Adds the shape described by several paths to a region.
///
/// Curves outside of `clip_rect` are simplified.
pub fn multipath_region<R, T>(
    region: &mut R,
    paths: &PathSet,
    transform: &T,
    clip_rect: Option<Box2D>,
) -> RasterResult<()>
where
    R: Region + ?Sized,
    T: Transformation,
{
    let options = CompositeOptions::fill()
        .with_clip_rect(clip_rect)
        .with_optimize_clip(true);

    let composition = compose(paths, transform, &options)?;

    if composition.is_degenerate() {
        debug!("Empty region ({} points).", composition.len());
        return Ok(());
    }

    region.union_polygon(composition.polygon(), FillRule::EvenOdd);

    Ok(())
}

#[cfg(test)]
use crate::error::RasterError;
#[cfg(test)]
use crate::math::{point, DevicePoint, Transform};
#[cfg(test)]
use crate::recording::{DrawCommand, Recorder};
#[cfg(test)]
use crate::target::PolygonRegion;
#[cfg(test)]
use curvedraw_path::PathSegment;

#[cfg(test)]
fn triangle(closed: bool) -> Path {
    Path::new(
        vec![
            PathSegment::start(point(0.0, 0.0)),
            PathSegment::Line {
                to: point(8.0, 0.0),
            },
            PathSegment::Line {
                to: point(0.0, 8.0),
            },
        ],
        closed,
    )
}

#[cfg(test)]
fn triangle_points() -> Vec<DevicePoint> {
    vec![point(0, 0), point(8, 0), point(0, 8)]
}

#[test]
fn single_path_fill_and_stroke() {
    let mut recorder = Recorder::new();
    draw_single_path(
        &mut recorder,
        &triangle(true),
        &Transform::identity(),
        None,
        true,
        true,
    )
    .unwrap();

    assert_eq!(
        recorder.commands(),
        &[
            DrawCommand::FillPolygon {
                points: triangle_points(),
                fill_rule: FillRule::EvenOdd,
            },
            DrawCommand::DrawPolyline {
                points: triangle_points(),
            },
        ]
    );
}

#[test]
fn open_single_path_is_not_filled() {
    let mut recorder = Recorder::new();
    draw_single_path(
        &mut recorder,
        &triangle(false),
        &Transform::identity(),
        None,
        true,
        false,
    )
    .unwrap();

    assert!(recorder.is_empty());
}

#[test]
fn degenerate_single_path() {
    let path = Path::new(
        vec![
            PathSegment::start(point(1.0, 1.0)),
            PathSegment::Line {
                to: point(1.2, 0.9),
            },
        ],
        true,
    );

    let mut recorder = Recorder::new();
    draw_single_path(&mut recorder, &path, &Transform::identity(), None, true, true).unwrap();

    assert!(recorder.is_empty());
}

#[test]
fn empty_single_path() {
    let mut recorder = Recorder::new();
    let result = draw_single_path(
        &mut recorder,
        &Path::empty(),
        &Transform::identity(),
        None,
        true,
        true,
    );

    assert_eq!(result, Err(RasterError::EmptyPath));
    assert!(recorder.is_empty());
}

#[test]
fn multi_path_solid_fill() {
    let paths = PathSet::from(triangle(false));
    let mut recorder = Recorder::new();
    let mut region = PolygonRegion::new();

    draw_multi_path(
        &mut recorder,
        &mut region,
        &paths,
        &Transform::identity(),
        None,
        &MultiPathStyle::DEFAULT.with_fill(FillStyle::Solid),
    )
    .unwrap();

    let mut closed = triangle_points();
    closed.push(point(0, 0));

    assert_eq!(region.polygons(), &[(closed.clone(), FillRule::EvenOdd)]);
    assert_eq!(
        recorder.commands(),
        &[DrawCommand::FillPolygon {
            points: closed,
            fill_rule: FillRule::EvenOdd,
        }]
    );
}

#[test]
fn multi_path_procedural_fill() {
    let paths = PathSet::from(triangle(true));
    let mut recorder = Recorder::new();
    let mut region = PolygonRegion::new();

    draw_multi_path(
        &mut recorder,
        &mut region,
        &paths,
        &Transform::identity(),
        None,
        &MultiPathStyle::DEFAULT
            .with_fill(FillStyle::Procedural)
            .with_line(true),
    )
    .unwrap();

    assert_eq!(
        recorder.commands(),
        &[
            DrawCommand::PushClip,
            DrawCommand::SetClipRegion {
                region: region.clone()
            },
            DrawCommand::FillRegion {
                region: region.clone()
            },
            DrawCommand::PopClip,
            DrawCommand::DrawPolyline {
                points: triangle_points()
            },
        ]
    );
}

#[test]
fn multi_path_procedural_fill_and_clip() {
    let paths = PathSet::from(triangle(true));
    let mut recorder = Recorder::new();
    let mut region = PolygonRegion::new();

    draw_multi_path(
        &mut recorder,
        &mut region,
        &paths,
        &Transform::identity(),
        None,
        &MultiPathStyle::DEFAULT
            .with_fill(FillStyle::Procedural)
            .with_clip_to_region(true),
    )
    .unwrap();

    assert_eq!(
        recorder.commands(),
        &[
            DrawCommand::SetClipRegion {
                region: region.clone()
            },
            DrawCommand::FillRegion { region },
        ]
    );
}

#[test]
fn multi_path_clip_only() {
    let paths = PathSet::from(triangle(true));
    let mut recorder = Recorder::new();
    let mut region = PolygonRegion::new();

    let style = MultiPathStyle::DEFAULT.with_clip_to_region(true);
    assert!(style.is_filled());

    draw_multi_path(
        &mut recorder,
        &mut region,
        &paths,
        &Transform::identity(),
        None,
        &style,
    )
    .unwrap();

    assert_eq!(region.polygons().len(), 1);
    assert_eq!(
        recorder.commands(),
        &[DrawCommand::SetClipRegion { region }]
    );
}

#[test]
fn multi_path_lines_only() {
    let paths: PathSet = vec![triangle(false), triangle(true)].into_iter().collect();
    let mut recorder = Recorder::new();
    let mut region = PolygonRegion::new();

    draw_multi_path(
        &mut recorder,
        &mut region,
        &paths,
        &Transform::identity(),
        None,
        &MultiPathStyle::DEFAULT.with_line(true),
    )
    .unwrap();

    assert!(region.is_empty());
    assert_eq!(
        recorder.commands(),
        &[
            DrawCommand::DrawPolyline {
                points: triangle_points()
            },
            DrawCommand::DrawPolyline {
                points: triangle_points()
            },
        ]
    );
}

#[test]
fn multi_path_lines_skip_lone_points() {
    let paths: PathSet = vec![
        triangle(false),
        Path::new(vec![PathSegment::start(point(30.0, 30.0))], false),
    ]
    .into_iter()
    .collect();
    let mut recorder = Recorder::new();
    let mut region = PolygonRegion::new();

    draw_multi_path(
        &mut recorder,
        &mut region,
        &paths,
        &Transform::identity(),
        None,
        &MultiPathStyle::DEFAULT.with_line(true),
    )
    .unwrap();

    assert_eq!(
        recorder.commands(),
        &[DrawCommand::DrawPolyline {
            points: triangle_points()
        }]
    );
}

#[test]
fn multi_path_degenerate() {
    let paths = PathSet::from(Path::new(vec![PathSegment::start(point(4.0, 4.0))], false));
    let mut recorder = Recorder::new();
    let mut region = PolygonRegion::new();

    draw_multi_path(
        &mut recorder,
        &mut region,
        &paths,
        &Transform::scale(5.0, 5.0),
        None,
        &MultiPathStyle::DEFAULT
            .with_fill(FillStyle::Solid)
            .with_line(true),
    )
    .unwrap();

    assert!(recorder.is_empty());
    assert!(region.is_empty());
}

#[test]
fn multi_path_error_draws_nothing() {
    let paths: PathSet = vec![triangle(true), Path::empty()].into_iter().collect();
    let mut recorder = Recorder::new();
    let mut region = PolygonRegion::new();

    let result = draw_multi_path(
        &mut recorder,
        &mut region,
        &paths,
        &Transform::identity(),
        None,
        &MultiPathStyle::DEFAULT.with_fill(FillStyle::Solid),
    );

    assert_eq!(result, Err(RasterError::EmptyPath));
    assert!(recorder.is_empty());
    assert!(region.is_empty());
}

#[test]
fn region_from_paths() {
    let paths: PathSet = vec![triangle(false), triangle(true)].into_iter().collect();
    let mut region = PolygonRegion::new();

    multipath_region(&mut region, &paths, &Transform::identity(), None).unwrap();

    let mut expected = triangle_points();
    expected.push(point(0, 0));
    expected.extend(triangle_points());
    expected.push(point(0, 0));

    assert_eq!(region.polygons(), &[(expected, FillRule::EvenOdd)]);
}
