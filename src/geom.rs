// Copyright 2025 Lars Brubaker
// License: MIT
//
// Pure geometric helpers on 2D working-frame points and 3D input vectors.
//
// Nothing in here knows about point indices or the node list; the index-based
// predicates (stable determinant, cones, segment tests) live in
// triangulator/numerics.rs and are built from these.

use std::cmp::Ordering;

pub type Real = f64;

/// A 3D input coordinate.
pub type Vec3 = [Real; 3];

/// A projected point in the 2D working frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point2 {
    pub x: Real,
    pub y: Real,
}

impl Point2 {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Point2 { x, y }
    }

    #[inline]
    pub fn sub(self, other: Point2) -> Point2 {
        Point2::new(self.x - other.x, self.y - other.y)
    }

    #[inline]
    pub fn midpoint(self, other: Point2) -> Point2 {
        Point2::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }
}

/// Returns true if u == v (exact equality).
#[inline]
pub fn vert_eq(u: Point2, v: Point2) -> bool {
    u.x == v.x && u.y == v.y
}

/// Lexicographic ordering used to sort the working point set.
/// Coordinates are validated as finite before they get here.
pub fn lex_cmp(u: Point2, v: Point2) -> Ordering {
    u.x.partial_cmp(&v.x)
        .unwrap_or(Ordering::Equal)
        .then(u.y.partial_cmp(&v.y).unwrap_or(Ordering::Equal))
}

/// 2x2 determinant of (u - v, v - w). Positive when u, v, w turn CCW.
#[inline]
pub fn det2d(u: Point2, v: Point2, w: Point2) -> Real {
    (u.x - v.x) * (v.y - w.y) + (v.y - u.y) * (v.x - w.x)
}

#[inline]
pub fn dot2(u: Point2, v: Point2) -> Real {
    u.x * v.x + u.y * v.y
}

/// L1 distance between two points.
#[inline]
pub fn base_length(u: Point2, v: Point2) -> Real {
    (u.x - v.x).abs() + (u.y - v.y).abs()
}

/// Signed angle at p swept from p1 to p2, in (-pi, pi].
/// Summed over a closed boundary this gives 2*pi times the winding number.
pub fn signed_angle(p: Point2, p1: Point2, p2: Point2) -> Real {
    let a = p1.sub(p);
    let b = p2.sub(p);
    let cross = a.x * b.y - a.y * b.x;
    cross.atan2(dot2(a, b))
}

#[inline]
pub fn sub3(u: &Vec3, v: &Vec3) -> Vec3 {
    [u[0] - v[0], u[1] - v[1], u[2] - v[2]]
}

#[inline]
pub fn dot3(u: &Vec3, v: &Vec3) -> Real {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

#[inline]
pub fn cross3(u: &Vec3, v: &Vec3) -> Vec3 {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

#[inline]
pub fn length3(v: &Vec3) -> Real {
    dot3(v, v).sqrt()
}

/// Index of the coordinate with the largest magnitude.
pub fn long_axis(v: &Vec3) -> usize {
    let mut i = 0;
    if v[1].abs() > v[0].abs() {
        i = 1;
    }
    if v[2].abs() > v[i].abs() {
        i = 2;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lex_cmp_orders_x_then_y() {
        let mut pts = vec![
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(0.0, -1.0),
        ];
        pts.sort_by(|a, b| lex_cmp(*a, *b));
        assert_eq!(pts[0], Point2::new(0.0, -1.0));
        assert_eq!(pts[1], Point2::new(0.0, 2.0));
        assert_eq!(pts[2], Point2::new(1.0, 0.0));
    }

    #[test]
    fn det2d_sign_matches_turn() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.0, 1.0);
        assert_relative_eq!(det2d(a, b, c), 1.0);
        assert_relative_eq!(det2d(a, c, b), -1.0);
        assert_eq!(det2d(a, b, Point2::new(2.0, 0.0)), 0.0);
    }

    #[test]
    fn l1_length() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, -4.0);
        assert_relative_eq!(base_length(a, b), 7.0);
    }

    #[test]
    fn signed_angle_around_square_sums_to_full_turn() {
        let p = Point2::new(0.5, 0.5);
        let sq = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let total: Real = (0..4).map(|i| signed_angle(p, sq[i], sq[(i + 1) % 4])).sum();
        assert_relative_eq!(total, std::f64::consts::TAU, epsilon = 1e-12);
    }

    #[test]
    fn cross_and_long_axis() {
        let n = cross3(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]);
        assert_eq!(n, [0.0, 0.0, 1.0]);
        assert_eq!(long_axis(&[0.1, -3.0, 2.0]), 1);
        assert_relative_eq!(length3(&[2.0, 3.0, 6.0]), 7.0);
    }
}
