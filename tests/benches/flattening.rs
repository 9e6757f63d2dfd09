#[macro_use]
extern crate criterion;

use criterion::Criterion;
use curvedraw::geom::{flatten_bezier, hit_test_segment, point};
use curvedraw_tests::*;

fn flatten(c: &mut Criterion) {
    let curves = generate_bezier_curves();
    c.bench_function("flatten_bezier", |b| {
        b.iter(|| {
            for curve in &curves {
                let points = flatten_bezier(curve.from, curve.ctrl1, curve.ctrl2, curve.to);
                criterion::black_box(points);
            }
        })
    });

    let mut output = Vec::with_capacity(curves.len() * 66);
    c.bench_function("flatten_into", |b| {
        b.iter(|| {
            output.clear();
            for curve in &curves {
                curve.flatten_into(&mut output);
            }
            criterion::black_box(output.len());
        })
    });
}

fn hit_test(c: &mut Criterion) {
    let curves = generate_bezier_curves();
    let at = point(10, -20);
    c.bench_function("hit_test_segment", |b| {
        b.iter(|| {
            let mut hits = 0;
            for curve in &curves {
                if hit_test_segment(curve.from, curve.ctrl1, curve.ctrl2, curve.to, at, 2.0) {
                    hits += 1;
                }
            }
            criterion::black_box(hits);
        })
    });
}

criterion_group!(flattening, flatten, hit_test);
criterion_main!(flattening);
