//! The interfaces through which paths are drawn.
//!
//! The rasterizer does not paint pixels itself: once the device space points are
//! computed it hands them to a [`DrawTarget`], which scan-converts polygons, strokes
//! polylines and manages clipping. A [`Region`] accumulates polygons into an area that
//! can later be filled or used as a clip.

use crate::math::DevicePoint;

pub use curvedraw_path::FillRule;

/// An area built from polygons.
pub trait Region {
    /// Adds the inside of the polygon to the region.
    ///
    /// The polygon is implicitly closed.
    fn union_polygon(&mut self, points: &[DevicePoint], fill_rule: FillRule);
}

/// A surface paths can be drawn on.
pub trait DrawTarget {
    /// The kind of region this target can fill and clip with.
    type Region: Region;

    /// Paints the inside of a polygon with the current color.
    ///
    /// The polygon is implicitly closed.
    fn fill_polygon(&mut self, points: &[DevicePoint], fill_rule: FillRule);

    /// Strokes a polyline with the current line style.
    fn draw_polyline(&mut self, points: &[DevicePoint]);

    /// Paints the area described by the current clip with a procedural fill such as a
    /// gradient or a pattern.
    ///
    /// `region` is the region the clip was last set to.
    fn fill_region(&mut self, region: &Self::Region);

    /// Restricts further drawing to the inside of the region.
    fn set_clip_region(&mut self, region: &Self::Region);

    /// Saves the current clip.
    fn push_clip(&mut self);

    /// Restores the clip saved by the matching `push_clip`.
    fn pop_clip(&mut self);
}

impl<'l, R: Region + ?Sized> Region for &'l mut R {
    fn union_polygon(&mut self, points: &[DevicePoint], fill_rule: FillRule) {
        (**self).union_polygon(points, fill_rule);
    }
}

/// A region that only stores its polygons.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolygonRegion {
    polygons: Vec<(Vec<DevicePoint>, FillRule)>,
}

impl PolygonRegion {
    pub fn new() -> Self {
        PolygonRegion {
            polygons: Vec::new(),
        }
    }

    pub fn polygons(&self) -> &[(Vec<DevicePoint>, FillRule)] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn clear(&mut self) {
        self.polygons.clear();
    }
}

impl Region for PolygonRegion {
    fn union_polygon(&mut self, points: &[DevicePoint], fill_rule: FillRule) {
        self.polygons.push((points.to_vec(), fill_rule));
    }
}

#[test]
fn polygon_region() {
    use crate::math::point;

    let mut region = PolygonRegion::new();
    assert!(region.is_empty());

    {
        let mut by_ref = &mut region;
        by_ref.union_polygon(&[point(0, 0), point(1, 0), point(0, 1)], FillRule::EvenOdd);
    }

    assert_eq!(region.polygons().len(), 1);
    assert_eq!(region.polygons()[0].1, FillRule::EvenOdd);

    region.clear();
    assert!(region.is_empty());
}
