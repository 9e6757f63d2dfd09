#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};
use curvedraw::extra::canvas::Canvas;
use curvedraw::extra::parser::parse_path_set;
use curvedraw::math::Transform;
use curvedraw::raster::{compose, draw_multi_path, CompositeOptions, FillStyle, MultiPathStyle};
use curvedraw_tests::*;

fn compose_paths(c: &mut Criterion) {
    let transform = Transform::scale(4.0, 4.0);
    let mut g = c.benchmark_group("compose");
    for num_paths in &[1, 10, 100] {
        let paths = generate_path_set(*num_paths, 20);
        g.bench_with_input(BenchmarkId::new("fill", num_paths), &paths, |b, paths| {
            b.iter(|| compose(paths, &transform, &CompositeOptions::fill()))
        });
        g.bench_with_input(BenchmarkId::new("stroke", num_paths), &paths, |b, paths| {
            b.iter(|| compose(paths, &transform, &CompositeOptions::stroke()))
        });
    }
    g.finish();
}

fn render_glyph(c: &mut Criterion) {
    let paths = match parse_path_set(GLYPH) {
        Ok(paths) => paths,
        Err(e) => panic!("{}", e),
    };
    let style = MultiPathStyle::DEFAULT.with_fill(FillStyle::Solid).with_line(true);
    let render = || {
        let mut canvas = Canvas::new(200, 200);
        let mut region = canvas.new_region();
        let result = draw_multi_path(
            &mut canvas,
            &mut region,
            &paths,
            &Transform::scale(2.0, 2.0),
            None,
            &style,
        );
        (result, canvas)
    };

    // A failing draw would only measure the early return.
    if let (Err(e), _) = render() {
        panic!("{}", e);
    }

    c.bench_function("render glyph", |b| {
        b.iter(|| {
            let (result, canvas) = render();
            criterion::black_box(result.is_ok());
            criterion::black_box(canvas.pixels().count())
        })
    });
}

criterion_group!(composition, compose_paths, render_glyph);
criterion_main!(composition);
