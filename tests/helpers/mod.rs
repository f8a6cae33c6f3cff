// Copyright 2025 Lars Brubaker
// Shared test utilities for fist-rust tests.

#![allow(dead_code)]

use fist_rust::{Triangulation, Triangulator};

/// Lift 2D points into the z = 0 plane.
pub fn flat(points: &[[f64; 2]]) -> Vec<[f64; 3]> {
    points.iter().map(|p| [p[0], p[1], 0.0]).collect()
}

/// Signed area of a triangle given 3 vertices (2D).
pub fn triangle_area(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
}

/// Area of a triangle in 3D.
pub fn triangle_area_3d(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    0.5 * (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt()
}

/// Total signed area of all output triangles.
pub fn total_signed_area(points: &[[f64; 2]], out: &Triangulation) -> f64 {
    out.triangles()
        .iter()
        .map(|t| {
            triangle_area(
                points[t[0] as usize],
                points[t[1] as usize],
                points[t[2] as usize],
            )
        })
        .sum()
}

/// Total unsigned area of all output triangles in 3D.
pub fn total_area_3d(coords: &[[f64; 3]], out: &Triangulation) -> f64 {
    out.triangles()
        .iter()
        .map(|t| {
            triangle_area_3d(
                coords[t[0] as usize],
                coords[t[1] as usize],
                coords[t[2] as usize],
            )
        })
        .sum()
}

/// Signed area of a loop of point indices (shoelace).
pub fn polygon_signed_area(points: &[[f64; 2]], indices: &[u32]) -> f64 {
    let n = indices.len();
    let mut area = 0.0;
    for i in 0..n {
        let p = points[indices[i] as usize];
        let q = points[indices[(i + 1) % n] as usize];
        area += p[0] * q[1] - q[0] * p[1];
    }
    area * 0.5
}

/// Counter-clockwise regular polygon.
pub fn regular_polygon(n: usize, radius: f64) -> Vec<[f64; 2]> {
    (0..n)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / n as f64;
            [radius * a.cos(), radius * a.sin()]
        })
        .collect()
}

/// Counter-clockwise star with `spikes` outer points, 2 * spikes vertices.
pub fn star_polygon(spikes: usize, outer: f64, inner: f64) -> Vec<[f64; 2]> {
    (0..2 * spikes)
        .map(|i| {
            let a = std::f64::consts::PI * i as f64 / spikes as f64;
            let r = if i % 2 == 0 { outer } else { inner };
            [r * a.cos(), r * a.sin()]
        })
        .collect()
}

/// Loop over every index 0..n.
pub fn ring(n: usize) -> Vec<u32> {
    (0..n as u32).collect()
}

/// Triangulate one 2D face; panics on error.
pub fn triangulate(points: &[[f64; 2]], loops: &[Vec<u32>]) -> Triangulation {
    fist_rust::triangulate_2d(points, loops)
        .unwrap_or_else(|e| panic!("triangulation failed: {}", e))
}

/// Verify that all output is valid: indices in range and corner slots that
/// map back to the same vertex through the loop stream.
pub fn verify_valid_output(tri: &Triangulator, out: &Triangulation, vertex_count: usize) {
    let stream = tri.loop_indices();
    assert_eq!(out.triangles().len(), out.corners().len());
    for (i, (t, c)) in out.triangles().iter().zip(out.corners()).enumerate() {
        for k in 0..3 {
            assert!(
                (t[k] as usize) < vertex_count,
                "triangle {} index {} out of range (vertex_count={})",
                i,
                t[k],
                vertex_count
            );
            assert_eq!(
                stream[c[k] as usize], t[k],
                "triangle {} corner {} does not map back to its vertex",
                i, k
            );
        }
    }
}

/// Verify no triangle winds against the caller's outer loop.
pub fn verify_consistent_winding(points: &[[f64; 2]], out: &Triangulation, ccw: bool, eps: f64) {
    for (i, t) in out.triangles().iter().enumerate() {
        let a = triangle_area(
            points[t[0] as usize],
            points[t[1] as usize],
            points[t[2] as usize],
        );
        let a = if ccw { a } else { -a };
        assert!(a >= -eps, "triangle {} {:?} is inverted (area={})", i, t, a);
    }
}

/// Verify no degenerate (zero-area) triangles in output.
pub fn verify_no_degenerate_triangles(points: &[[f64; 2]], out: &Triangulation, eps: f64) {
    for (i, t) in out.triangles().iter().enumerate() {
        let a = triangle_area(
            points[t[0] as usize],
            points[t[1] as usize],
            points[t[2] as usize],
        )
        .abs();
        assert!(a > eps, "triangle {} {:?} is degenerate (area={})", i, t, a);
    }
}
