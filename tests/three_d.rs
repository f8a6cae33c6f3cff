// Copyright 2025 Lars Brubaker
// Tests for faces given in 3D: arbitrary planes and slightly warped loops.

mod helpers;

use approx::assert_relative_eq;
use fist_rust::Triangulator;

fn triangulate_3d(coords: &[[f64; 3]], loops: &[Vec<u32>]) -> fist_rust::Triangulation {
    let mut tri = Triangulator::new();
    tri.add_face(loops);
    let out = tri.triangulate(coords).unwrap();
    helpers::verify_valid_output(&tri, &out, coords.len());
    out
}

/// Map 2D points into the plane spanned by `u` and `v` through `origin`.
fn embed(points: &[[f64; 2]], origin: [f64; 3], u: [f64; 3], v: [f64; 3]) -> Vec<[f64; 3]> {
    points
        .iter()
        .map(|p| {
            [
                origin[0] + p[0] * u[0] + p[1] * v[0],
                origin[1] + p[0] * u[1] + p[1] * v[1],
                origin[2] + p[0] * u[2] + p[1] * v[2],
            ]
        })
        .collect()
}

#[test]
fn quad_in_tilted_plane() {
    // z = x
    let coords = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 0.0],
    ];
    let out = triangulate_3d(&coords, &[helpers::ring(4)]);
    assert_eq!(out.triangle_count(), 2);
    assert_relative_eq!(
        helpers::total_area_3d(&coords, &out),
        std::f64::consts::SQRT_2,
        epsilon = 1e-12
    );
}

#[test]
fn hexagon_in_xz_plane() {
    let pts = helpers::regular_polygon(6, 2.0);
    let coords = embed(&pts, [0.0, 5.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
    let out = triangulate_3d(&coords, &[helpers::ring(6)]);
    assert_eq!(out.triangle_count(), 4);
    let expected = helpers::polygon_signed_area(&pts, &helpers::ring(6));
    assert_relative_eq!(helpers::total_area_3d(&coords, &out), expected, epsilon = 1e-9);
}

#[test]
fn l_shape_in_yz_plane() {
    let pts = [
        [0.0, 0.0],
        [2.0, 0.0],
        [2.0, 1.0],
        [1.0, 1.0],
        [1.0, 2.0],
        [0.0, 2.0],
    ];
    let coords = embed(&pts, [3.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
    let out = triangulate_3d(&coords, &[helpers::ring(6)]);
    assert_eq!(out.triangle_count(), 4);
    assert_relative_eq!(helpers::total_area_3d(&coords, &out), 3.0, epsilon = 1e-9);
    // the triangles live in the same 2D frame, so check winding there
    helpers::verify_consistent_winding(&pts, &out, true, 1e-12);
}

#[test]
fn square_with_hole_in_oblique_plane() {
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
    let t = 1.0 / 2.0_f64.sqrt();
    let w = 1.0 / 6.0_f64.sqrt();
    // orthonormal u, v with normal (1, 1, 1) / sqrt(3)
    let u = [t, -t, 0.0];
    let v = [w, w, -2.0 * w];
    let coords = embed(&pts, [1.0, 2.0, 3.0], u, v);
    let out = triangulate_3d(&coords, &[vec![0, 1, 2, 3], vec![4, 5, 6, 7]]);
    assert_eq!(out.triangle_count(), 8);
    assert_relative_eq!(helpers::total_area_3d(&coords, &out), 12.0, epsilon = 1e-9);
    helpers::verify_consistent_winding(&pts, &out, true, 1e-12);
}

#[test]
fn slightly_warped_octagon() {
    let pts = helpers::regular_polygon(8, 3.0);
    let coords: Vec<[f64; 3]> = pts
        .iter()
        .enumerate()
        .map(|(i, p)| [p[0], p[1], if i % 2 == 0 { 0.01 } else { -0.01 }])
        .collect();
    let out = triangulate_3d(&coords, &[helpers::ring(8)]);
    assert_eq!(out.triangle_count(), 6);
    let expected = helpers::polygon_signed_area(&pts, &helpers::ring(8));
    assert_relative_eq!(helpers::total_signed_area(&pts, &out), expected, epsilon = 1e-9);
}

#[test]
fn faces_in_different_planes() {
    let square = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.5, -0.5]];
    let mut coords = embed(&square, [0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    coords.extend(embed(&square, [0.0; 3], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]));
    let mut tri = Triangulator::new();
    tri.add_face(&[vec![0, 4, 1, 2, 3]]);
    tri.add_face(&[vec![5, 9, 6, 7, 8]]);
    let out = tri.triangulate(&coords).unwrap();
    assert_eq!(out.face_ranges(), &[0..3, 3..6]);
    for t in out.face_triangles(1) {
        assert!(t.iter().all(|&i| i >= 5));
    }
    assert_relative_eq!(helpers::total_area_3d(&coords, &out), 2.5, epsilon = 1e-12);
}
