// Copyright 2025 Lars Brubaker
// The three ear-selection policies all produce valid triangulations.

mod helpers;

use approx::assert_relative_eq;
use fist_rust::{EarOrder, Triangulator, TriangulatorConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn star_face(tri: &mut Triangulator) -> (Vec<[f64; 2]>, fist_rust::Triangulation) {
    let pts = helpers::star_polygon(9, 6.0, 2.5);
    tri.add_face(&[helpers::ring(pts.len())]);
    let coords = helpers::flat(&pts);
    let out = tri.triangulate(&coords).unwrap();
    helpers::verify_valid_output(tri, &out, coords.len());
    (pts, out)
}

fn check(pts: &[[f64; 2]], out: &fist_rust::Triangulation) {
    assert_eq!(out.triangle_count(), pts.len() - 2);
    let expected = helpers::polygon_signed_area(pts, &helpers::ring(pts.len()));
    assert_relative_eq!(helpers::total_signed_area(pts, out), expected, epsilon = 1e-9);
    helpers::verify_consistent_winding(pts, out, true, 1e-12);
}

#[test]
fn quality_sorted_is_the_default() {
    let tri = Triangulator::new();
    assert_eq!(tri.config().ear_order, EarOrder::QualitySorted);
}

#[test]
fn sequential_order() {
    let mut tri = Triangulator::new();
    tri.set_ear_order(EarOrder::Sequential);
    let (pts, out) = star_face(&mut tri);
    check(&pts, &out);
}

#[test]
fn random_order_with_seed_is_reproducible() {
    let config = TriangulatorConfig {
        ear_order: EarOrder::Random,
        seed: Some(42),
        ..Default::default()
    };
    let mut a = Triangulator::with_config(config.clone());
    let mut b = Triangulator::with_config(config);
    let (pts, out_a) = star_face(&mut a);
    let (_, out_b) = star_face(&mut b);
    check(&pts, &out_a);
    assert_eq!(out_a.triangles(), out_b.triangles());
}

#[test]
fn random_order_with_injected_rng() {
    let mut tri = Triangulator::new();
    tri.set_ear_order(EarOrder::Random);
    tri.set_rng(Box::new(StdRng::seed_from_u64(7)));
    let (pts, out) = star_face(&mut tri);
    check(&pts, &out);
}

#[test]
fn random_order_with_thread_rng() {
    let mut tri = Triangulator::new();
    tri.set_ear_order(EarOrder::Random);
    for _ in 0..5 {
        tri.clear();
        let (pts, out) = star_face(&mut tri);
        check(&pts, &out);
    }
}

#[test]
fn every_order_handles_holes() {
    let pts = [
        [0.0, 0.0],
        [4.0, 0.0],
        [4.0, 4.0],
        [0.0, 4.0],
        [1.0, 1.0],
        [1.0, 3.0],
        [3.0, 3.0],
        [3.0, 1.0],
    ];
    for order in [EarOrder::QualitySorted, EarOrder::Sequential, EarOrder::Random] {
        let mut tri = Triangulator::new();
        tri.set_ear_order(order);
        tri.set_seed(3);
        tri.add_face(&[vec![0, 1, 2, 3], vec![4, 5, 6, 7]]);
        let out = tri.triangulate(&helpers::flat(&pts)).unwrap();
        assert_eq!(out.triangle_count(), 8, "{:?}", order);
        assert_relative_eq!(helpers::total_signed_area(&pts, &out), 12.0, epsilon = 1e-9);
    }
}
