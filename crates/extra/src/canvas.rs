//! A minimal one bit software rasterizer.
//!
//! [`Canvas`] implements [`DrawTarget`] and [`Mask`] implements [`Region`], which is
//! enough to look at the output of the rasterizer without a windowing system: the
//! command line tool renders into a canvas and the tests check pixels of it.
//!
//! Polygons are scan-converted by sampling pixel centers, so a pixel is inside a
//! polygon if its center is. Polylines are drawn one pixel wide with Bresenham's
//! algorithm.

use crate::path::math::DevicePoint;
use crate::path::FillRule;
use crate::raster::{DrawTarget, Region};

use std::fmt::Write;

/// A grid of booleans, used both as pixel storage and as clip region.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Creates a mask with all bits unset.
    pub fn new(width: u32, height: u32) -> Self {
        Mask {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }

        Some(y as usize * self.width as usize + x as usize)
    }

    /// Returns the bit at the given position, `false` outside of the mask.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(idx) => self.bits[idx],
            None => false,
        }
    }

    /// Sets the bit at the given position, ignoring positions outside of the mask.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: bool) {
        if let Some(idx) = self.index(x, y) {
            self.bits[idx] = value;
        }
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }

    pub fn clear(&mut self) {
        for bit in &mut self.bits {
            *bit = false;
        }
    }

    /// Invokes the callback for each horizontal span of pixels whose center is inside
    /// the polygon. The span's end is exclusive and both ends are clamped to the mask.
    pub fn for_each_span<F>(&self, points: &[DevicePoint], fill_rule: FillRule, callback: &mut F)
    where
        F: FnMut(i32, i32, i32),
    {
        if points.len() < 3 {
            return;
        }

        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for y in 0..self.height as i32 {
            let sample_y = y as f64 + 0.5;

            crossings.clear();
            let mut prev = points[points.len() - 1];
            for &p in points {
                let (y0, y1) = (prev.y as f64, p.y as f64);
                if (y0 <= sample_y) != (y1 <= sample_y) {
                    let t = (sample_y - y0) / (y1 - y0);
                    let x = prev.x as f64 + t * (p.x - prev.x) as f64;
                    let winding = if y1 > y0 { 1 } else { -1 };
                    crossings.push((x, winding));
                }
                prev = p;
            }

            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if fill_rule.is_out(winding) {
                    continue;
                }

                let start = (pair[0].0 - 0.5).ceil().max(0.0) as i32;
                let end = ((pair[1].0 - 0.5).ceil() as i32).min(self.width as i32);
                if start < end {
                    callback(y, start, end);
                }
            }
        }
    }

    /// Renders the mask with `#` for set bits and `.` for unset ones, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut output = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.bits.chunks(self.width.max(1) as usize) {
            for bit in row {
                output.push(if *bit { '#' } else { '.' });
            }
            output.push('\n');
        }

        output
    }
}

impl Region for Mask {
    fn union_polygon(&mut self, points: &[DevicePoint], fill_rule: FillRule) {
        let mut spans = Vec::new();
        self.for_each_span(points, fill_rule, &mut |y, start, end| spans.push((y, start, end)));
        for (y, start, end) in spans {
            for x in start..end {
                self.set(x, y, true);
            }
        }
    }
}

/// A one bit image with a clip stack.
#[derive(Clone, Debug)]
pub struct Canvas {
    pixels: Mask,
    clip: Option<Mask>,
    clip_stack: Vec<Option<Mask>>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            pixels: Mask::new(width, height),
            clip: None,
            clip_stack: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Creates an empty region the size of the canvas.
    pub fn new_region(&self) -> Mask {
        Mask::new(self.width(), self.height())
    }

    pub fn pixels(&self) -> &Mask {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.pixels.get(x, y)
    }

    /// Whether drawing at the given position is allowed by the current clip.
    #[inline]
    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        match &self.clip {
            Some(clip) => clip.get(x, y),
            None => true,
        }
    }

    fn plot(&mut self, x: i32, y: i32) {
        if self.is_visible(x, y) {
            self.pixels.set(x, y, true);
        }
    }

    // Only the part of the line that overlaps the canvas is walked, so the endpoints
    // can be anywhere in the i32 range.
    fn draw_line(&mut self, from: DevicePoint, to: DevicePoint) {
        let (from, to) = match clip_line(from, to, self.width(), self.height()) {
            Some(line) => line,
            None => return,
        };

        let dx = (to.0 - from.0).abs();
        let dy = -(to.1 - from.1).abs();
        let sx = if from.0 < to.0 { 1 } else { -1 };
        let sy = if from.1 < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = from;

        loop {
            self.plot(x as i32, y as i32);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Writes the canvas as a plain (`P1`) PBM image.
    pub fn to_pbm(&self) -> String {
        let mut output = String::new();
        // Writing into a String can't fail.
        let _ = writeln!(output, "P1\n{} {}", self.width(), self.height());
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                output.push(if self.get(x, y) { '1' } else { '0' });
            }
            output.push('\n');
        }

        output
    }
}

/// Clips a line to the pixels of a `width` by `height` grid (Liang-Barsky).
///
/// Returns `None` if the line does not cross the grid. Lines that are entirely inside
/// are returned unchanged.
fn clip_line(
    from: DevicePoint,
    to: DevicePoint,
    width: u32,
    height: u32,
) -> Option<((i64, i64), (i64, i64))> {
    if width == 0 || height == 0 {
        return None;
    }

    let (x0, y0) = (from.x as f64, from.y as f64);
    let (dx, dy) = (to.x as f64 - x0, to.y as f64 - y0);
    let (max_x, max_y) = ((width - 1) as f64, (height - 1) as f64);

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for &(p, q) in &[(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| {
        (
            (x0 + t * dx).round().clamp(0.0, max_x) as i64,
            (y0 + t * dy).round().clamp(0.0, max_y) as i64,
        )
    };

    Some((at(t0), at(t1)))
}

impl DrawTarget for Canvas {
    type Region = Mask;

    fn fill_polygon(&mut self, points: &[DevicePoint], fill_rule: FillRule) {
        let mut spans = Vec::new();
        self.pixels
            .for_each_span(points, fill_rule, &mut |y, start, end| spans.push((y, start, end)));
        for (y, start, end) in spans {
            for x in start..end {
                self.plot(x, y);
            }
        }
    }

    fn draw_polyline(&mut self, points: &[DevicePoint]) {
        match points {
            [] => {}
            [p] => self.plot(p.x, p.y),
            _ => {
                for edge in points.windows(2) {
                    self.draw_line(edge[0], edge[1]);
                }
            }
        }
    }

    fn fill_region(&mut self, _region: &Mask) {
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                self.plot(x, y);
            }
        }
    }

    fn set_clip_region(&mut self, region: &Mask) {
        self.clip = Some(region.clone());
    }

    fn push_clip(&mut self) {
        self.clip_stack.push(self.clip.clone());
    }

    fn pop_clip(&mut self) {
        if let Some(clip) = self.clip_stack.pop() {
            self.clip = clip;
        }
    }
}

#[cfg(test)]
use crate::path::math::point;

#[cfg(test)]
fn square(x: i32, y: i32, size: i32) -> Vec<DevicePoint> {
    vec![
        point(x, y),
        point(x + size, y),
        point(x + size, y + size),
        point(x, y + size),
    ]
}

#[test]
fn fill_square() {
    let mut canvas = Canvas::new(20, 20);
    canvas.fill_polygon(&square(0, 0, 10), FillRule::EvenOdd);

    assert_eq!(canvas.pixels().count(), 100);
    assert!(canvas.get(0, 0));
    assert!(canvas.get(9, 9));
    assert!(!canvas.get(10, 9));
    assert!(!canvas.get(9, 10));
}

#[test]
fn fill_rules() {
    // Two overlapping squares in the same direction, linked along their top edge.
    let mut points = square(0, 0, 10);
    points.push(point(0, 0));
    points.extend(square(5, 0, 10));
    points.push(point(5, 0));

    let mut even_odd = Mask::new(20, 20);
    even_odd.union_polygon(&points, FillRule::EvenOdd);
    let mut non_zero = Mask::new(20, 20);
    non_zero.union_polygon(&points, FillRule::NonZero);

    assert!(!even_odd.get(7, 5));
    assert!(non_zero.get(7, 5));
    assert!(even_odd.get(2, 5));
    assert!(even_odd.get(12, 5));
}

#[test]
fn polygon_outside_of_the_canvas() {
    let mut canvas = Canvas::new(8, 8);
    canvas.fill_polygon(&square(-20, -20, 10), FillRule::EvenOdd);
    canvas.fill_polygon(&square(4, 4, 100), FillRule::EvenOdd);

    assert_eq!(canvas.pixels().count(), 16);
}

#[test]
fn polylines() {
    let mut canvas = Canvas::new(10, 10);
    canvas.draw_polyline(&[point(0, 0), point(9, 0), point(9, 9)]);

    assert_eq!(canvas.pixels().count(), 19);
    assert!(canvas.get(5, 0));
    assert!(canvas.get(9, 5));

    let mut canvas = Canvas::new(10, 10);
    canvas.draw_polyline(&[point(0, 0), point(9, 9)]);
    assert_eq!(canvas.pixels().count(), 10);
    assert!(canvas.get(4, 4));

    let mut canvas = Canvas::new(10, 10);
    canvas.draw_polyline(&[point(3, 3)]);
    assert_eq!(canvas.pixels().count(), 1);
}

#[test]
fn lines_far_outside_of_the_canvas() {
    let mut canvas = Canvas::new(8, 8);
    canvas.draw_polyline(&[point(0, 0), point(i32::MAX, 0)]);
    assert_eq!(canvas.pixels().count(), 8);

    canvas.draw_polyline(&[point(i32::MIN, i32::MIN), point(i32::MAX, i32::MIN)]);
    assert_eq!(canvas.pixels().count(), 8);

    let mut canvas = Canvas::new(8, 8);
    canvas.draw_polyline(&[point(-1_000_000, 3), point(1_000_000, 3)]);
    assert_eq!(canvas.pixels().count(), 8);
    assert!(canvas.get(0, 3));
    assert!(canvas.get(7, 3));
}

#[test]
fn clip_stack() {
    let mut canvas = Canvas::new(10, 10);
    let mut region = canvas.new_region();
    region.union_polygon(&square(0, 0, 5), FillRule::EvenOdd);

    canvas.push_clip();
    canvas.set_clip_region(&region);
    canvas.fill_region(&region);
    canvas.pop_clip();

    assert_eq!(canvas.pixels().count(), 25);

    // The clip was restored.
    canvas.draw_polyline(&[point(9, 9)]);
    assert!(canvas.get(9, 9));
}

#[test]
fn pbm_output() {
    let mut canvas = Canvas::new(3, 2);
    canvas.draw_polyline(&[point(0, 0), point(2, 0)]);

    assert_eq!(canvas.to_pbm(), "P1\n3 2\n111\n000\n");
    assert_eq!(canvas.pixels().to_ascii(), "###\n...\n");
}
