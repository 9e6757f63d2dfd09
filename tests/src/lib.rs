//! Fixtures shared by the integration tests and the benchmarks.

use curvedraw::geom::CubicBezierSegment;
use curvedraw::math::{point, Point};
use curvedraw::path::builder::PathBuilder;
use curvedraw::path::PathSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// An outline with two holes, in the SVG path syntax.
pub const GLYPH: &str = "
    M 10 0 L 90 0 C 95 0 100 5 100 10 L 100 90 C 100 95 95 100 90 100
    L 10 100 C 5 100 0 95 0 90 L 0 10 C 0 5 5 0 10 0 Z
    M 20 20 L 45 20 L 45 45 L 20 45 Z
    M 55 55 C 70 55 80 65 80 80 C 65 80 55 70 55 55 Z
";

pub const SEED: u64 = 0x5eed;

fn random_point(rng: &mut StdRng, extent: f64) -> Point {
    point(rng.gen_range(-extent..extent), rng.gen_range(-extent..extent))
}

/// Cubic bézier curves with device space control points.
pub fn generate_bezier_curves() -> Vec<CubicBezierSegment<i32>> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut curves = Vec::with_capacity(1000);
    for _ in 0..1000 {
        let mut p = || random_point(&mut rng, 1000.0);
        let curve = CubicBezierSegment {
            from: p(),
            ctrl1: p(),
            ctrl2: p(),
            to: p(),
        };
        curves.push(curve.to_device());
    }

    curves
}

/// A set of closed paths mixing lines and curves.
pub fn generate_path_set(num_paths: usize, segments_per_path: usize) -> PathSet {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut builder = PathSet::builder();
    for _ in 0..num_paths {
        builder.begin(random_point(&mut rng, 100.0));
        for _ in 0..segments_per_path {
            if rng.gen_bool(0.5) {
                builder.line_to(random_point(&mut rng, 100.0));
            } else {
                let ctrl1 = random_point(&mut rng, 100.0);
                let ctrl2 = random_point(&mut rng, 100.0);
                builder.cubic_bezier_to(ctrl1, ctrl2, random_point(&mut rng, 100.0));
            }
        }
        builder.end(rng.gen_bool(0.8));
    }

    builder.build()
}

#[cfg(test)]
use curvedraw::extra::canvas::Canvas;
#[cfg(test)]
use curvedraw::extra::parser::parse_path_set;
#[cfg(test)]
use curvedraw::math::{Box2D, Transform};
#[cfg(test)]
use curvedraw::raster::{
    compose, draw_multi_path, estimate_composite_points, multipath_region, CompositeOptions,
    DrawTarget, FillStyle, MultiPathStyle,
};

#[test]
fn glyph_with_holes() {
    let paths = parse_path_set(GLYPH).unwrap();
    assert_eq!(paths.len(), 3);

    let mut canvas = Canvas::new(100, 100);
    let mut region = canvas.new_region();
    draw_multi_path(
        &mut canvas,
        &mut region,
        &paths,
        &Transform::identity(),
        None,
        &MultiPathStyle::DEFAULT.with_fill(FillStyle::Solid),
    )
    .unwrap();

    // Inside the outline.
    assert!(canvas.get(10, 50));
    assert!(canvas.get(50, 10));
    // In the holes.
    assert!(!canvas.get(30, 30));
    assert!(!canvas.get(70, 72));
    // Outside of the rounded corner.
    assert!(!canvas.get(0, 0));

    // The region received the same polygon.
    assert_eq!(&region, canvas.pixels());
}

#[test]
fn procedural_fill_matches_solid_fill() {
    let paths = parse_path_set(GLYPH).unwrap();
    let transform = Transform::scale(0.5, 0.5);

    let mut solid = Canvas::new(60, 60);
    let mut region = solid.new_region();
    let style = MultiPathStyle::DEFAULT.with_fill(FillStyle::Solid);
    draw_multi_path(&mut solid, &mut region, &paths, &transform, None, &style).unwrap();

    let mut procedural = Canvas::new(60, 60);
    let mut region = procedural.new_region();
    let style = MultiPathStyle::DEFAULT.with_fill(FillStyle::Procedural);
    draw_multi_path(&mut procedural, &mut region, &paths, &transform, None, &style).unwrap();

    assert_eq!(solid.pixels(), procedural.pixels());

    // The clip was restored, drawing outside of the shape works.
    procedural.draw_polyline(&[point(59, 59)]);
    assert!(procedural.get(59, 59));
}

#[test]
fn clip_to_region() {
    let paths = parse_path_set("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap();

    let mut canvas = Canvas::new(20, 20);
    let mut region = canvas.new_region();
    let style = MultiPathStyle::DEFAULT.with_clip_to_region(true);
    draw_multi_path(&mut canvas, &mut region, &paths, &Transform::identity(), None, &style)
        .unwrap();

    // Nothing is drawn but later drawing is clipped to the square.
    assert_eq!(canvas.pixels().count(), 0);
    canvas.draw_polyline(&[point(0, 5), point(19, 5)]);
    assert_eq!(canvas.pixels().count(), 10);
}

#[test]
fn region_of_several_sets() {
    let first = parse_path_set("M 0 0 L 4 0 L 4 4 L 0 4 Z").unwrap();
    let second = parse_path_set("M 6 6 L 10 6 L 10 10 L 6 10 Z").unwrap();

    let mut region = Canvas::new(10, 10).new_region();
    let clip = Some(Box2D::new(point(0.0, 0.0), point(10.0, 10.0)));
    multipath_region(&mut region, &first, &Transform::identity(), clip).unwrap();
    multipath_region(&mut region, &second, &Transform::identity(), clip).unwrap();

    assert_eq!(region.count(), 32);
    assert!(region.get(3, 3));
    assert!(!region.get(5, 5));
    assert!(region.get(6, 6));
}

#[test]
fn composite_upper_bound() {
    let transforms = [
        Transform::identity(),
        Transform::scale(0.01, 0.01),
        Transform::scale(40.0, -3.0),
        Transform::new(0.5, 1.5, -2.0, 0.25, 300.0, -7.0),
    ];

    for num_paths in 1..6 {
        let paths = generate_path_set(num_paths, 12);
        for transform in &transforms {
            for &filled in &[false, true] {
                let options = CompositeOptions::DEFAULT
                    .with_filled(filled)
                    .with_clip_rect(Some(Box2D::new(point(-20.0, -20.0), point(20.0, 20.0))))
                    .with_optimize_clip(true);
                let composition = compose(&paths, transform, &options).unwrap();
                assert!(composition.len() <= estimate_composite_points(&paths, filled));
            }
        }
    }
}

#[test]
fn flattened_curves_have_fixed_length() {
    use curvedraw::geom::BEZIER_FILL_LENGTH;

    for curve in generate_bezier_curves().iter().take(50) {
        let points = curve.flattened();
        assert_eq!(points.len(), BEZIER_FILL_LENGTH);
        assert_eq!(points[0], curve.from);
        assert_eq!(points[BEZIER_FILL_LENGTH - 1], curve.to);
    }
}
