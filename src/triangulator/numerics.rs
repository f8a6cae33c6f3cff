// Copyright 2025 Lars Brubaker
// Index-based predicates on the sorted working point set.
//
// Every test takes point indices rather than coordinates. Because the point
// array is sorted lexicographically, comparing indices is the same as
// comparing positions along any line through collinear points, and the
// determinant can be evaluated in an order fixed by the indices alone.

use std::f64::consts::{PI, TAU};

use crate::geom::{base_length, det2d, dot2, signed_angle, Point2, Real};
use crate::list::{Angle, NodeId, NodeList, INVALID};

/// is i1 <= i3 <= i2 ?
#[inline]
pub(crate) fn in_between(i1: u32, i2: u32, i3: u32) -> bool {
    i1 <= i3 && i3 <= i2
}

/// is i1 < i3 < i2 ?
#[inline]
pub(crate) fn strictly_in_between(i1: u32, i2: u32, i3: u32) -> bool {
    i1 < i3 && i3 < i2
}

#[derive(Copy, Clone)]
pub(crate) struct Predicates<'a> {
    pub points: &'a [Point2],
    pub eps: Real,
}

impl Predicates<'_> {
    #[inline]
    fn p(&self, i: u32) -> Point2 {
        self.points[i as usize]
    }

    /// Determinant of (i, j, k) evaluated with the arguments in increasing
    /// index order, so a given triple always yields the same bits.
    pub(crate) fn stable_det(&self, i: u32, j: u32, k: u32) -> Real {
        if i == j || i == k || j == k {
            return 0.0;
        }
        let (p, q, r) = (self.p(i), self.p(j), self.p(k));
        if i < j {
            if j < k {
                det2d(p, q, r)
            } else if i < k {
                -det2d(p, r, q)
            } else {
                det2d(r, p, q)
            }
        } else if i < k {
            -det2d(q, p, r)
        } else if j < k {
            det2d(q, r, p)
        } else {
            -det2d(r, q, p)
        }
    }

    /// 1 for a left turn, -1 for a right turn, 0 within eps.
    pub(crate) fn orientation(&self, i: u32, j: u32, k: u32) -> i32 {
        let det = self.stable_det(i, j, k);
        if det < -self.eps {
            -1
        } else if det > self.eps {
            1
        } else {
            0
        }
    }

    /// Does the direction j -> l lie inside the angle i, j, k?
    /// Collinear rays count as inside for convex corners.
    pub(crate) fn is_in_cone(&self, i: u32, j: u32, k: u32, l: u32, convex: bool) -> bool {
        if convex {
            if i != j {
                match self.orientation(i, j, l) {
                    o if o < 0 => return false,
                    0 if !in_between(i.min(j), i.max(j), l) => return false,
                    _ => {}
                }
            }
            if j != k {
                match self.orientation(j, k, l) {
                    o if o < 0 => return false,
                    0 if !in_between(j.min(k), j.max(k), l) => return false,
                    _ => {}
                }
            }
            true
        } else {
            !(self.orientation(i, j, l) <= 0 && self.orientation(j, k, l) < 0)
        }
    }

    /// Open-cone variant used where several corners share point j.
    pub(crate) fn is_strictly_in_cone(
        &self,
        i: u32,
        j: u32,
        k: u32,
        l: u32,
        convex: bool,
    ) -> bool {
        let ori1 = self.orientation(i, j, l);
        let ori2 = self.orientation(j, k, l);
        if convex {
            ori1 > 0 && ori2 > 0
        } else {
            ori1 > 0 || ori2 > 0
        }
    }

    /// Do segments (i1, i2) and (i3, i4) intersect? Requires i1 <= i2 and
    /// i3 <= i4. Shared endpoints do not count, identical segments do, and a
    /// collinear endpoint strictly inside the other segment does. Every
    /// segment that touches i5 bumps `shared`.
    pub(crate) fn seg_intersect(
        &self,
        i1: u32,
        i2: u32,
        i3: u32,
        i4: u32,
        i5: u32,
        shared: &mut usize,
    ) -> bool {
        debug_assert!(i1 <= i2 && i3 <= i4);
        if i1 == i2 || i3 == i4 {
            return false;
        }
        if i1 == i3 && i2 == i4 {
            return true;
        }
        if i5 != INVALID && (i3 == i5 || i4 == i5) {
            *shared += 1;
        }
        if i1 == i3 || i1 == i4 || i2 == i3 || i2 == i4 {
            return false;
        }

        let ori1 = self.orientation(i1, i2, i3);
        let ori2 = self.orientation(i1, i2, i4);
        if (ori1 > 0 && ori2 > 0) || (ori1 < 0 && ori2 < 0) {
            return false;
        }
        let ori3 = self.orientation(i3, i4, i1);
        let ori4 = self.orientation(i3, i4, i2);
        if (ori3 > 0 && ori4 > 0) || (ori3 < 0 && ori4 < 0) {
            return false;
        }

        if ori1 == 0 && strictly_in_between(i1, i2, i3) {
            return true;
        }
        if ori2 == 0 && strictly_in_between(i1, i2, i4) {
            return true;
        }
        if ori3 == 0 && strictly_in_between(i3, i4, i1) {
            return true;
        }
        if ori4 == 0 && strictly_in_between(i3, i4, i2) {
            return true;
        }
        ori1 != 0 && ori2 != 0 && ori3 != 0 && ori4 != 0
    }

    /// Is i4 inside or on the CCW triangle (i1, i2, i3)?
    pub(crate) fn vtx_in_triangle(&self, i1: u32, i2: u32, i3: u32, i4: u32) -> bool {
        self.orientation(i2, i3, i4) >= 0
            && self.orientation(i1, i2, i4) >= 0
            && self.orientation(i3, i1, i4) >= 0
    }

    /// Quality of the ear (i, k, j) clipped along the diagonal i-j with apex
    /// k: longest side squared over twice the area, smaller is better.
    pub(crate) fn ratio(&self, i: u32, j: u32, k: u32) -> Real {
        let (p, q, r) = (self.p(i), self.p(j), self.p(k));
        let a = base_length(p, q);
        let b = base_length(p, r);
        let c = base_length(r, q);
        let base = a.max(b).max(c);

        // short diagonal: clip the spike right away
        if 10.0 * a < b.min(c) {
            return 0.1;
        }

        let mut area = self.stable_det(i, j, k);
        if area < -self.eps {
            area = -area;
        } else if area <= self.eps {
            return if base > a { 0.1 } else { Real::MAX };
        }

        let ratio = base * base / area;
        if ratio < 10.0 || a >= base {
            ratio
        } else {
            0.1
        }
    }

    /// Classify the corner j between i and k. `node` is the list node at j;
    /// its neighbours are walked when the corner is 0 or 360 degrees.
    pub(crate) fn is_convex_angle(
        &self,
        nodes: &NodeList,
        i: u32,
        j: u32,
        k: u32,
        node: NodeId,
    ) -> Angle {
        if i == j {
            // duplicate on the left: allow clipping j
            return Angle::Convex;
        }
        if j == k {
            return Angle::Reflex;
        }
        match self.orientation(i, j, k) {
            1 => Angle::Convex,
            -1 => Angle::Reflex,
            _ => {
                let d = dot2(self.p(i).sub(self.p(j)), self.p(k).sub(self.p(j)));
                if d < 0.0 {
                    Angle::Straight
                } else {
                    self.spike_angle(nodes, i, j, k, node)
                }
            }
        }
    }

    /// Decide between a 0 and a 360 degree corner by walking outward along
    /// the loop until the collinear run ends.
    fn spike_angle(
        &self,
        nodes: &NodeList,
        mut i1: u32,
        mut i2: u32,
        mut i3: u32,
        node: NodeId,
    ) -> Angle {
        let mut ind1 = nodes.prev(node);
        let mut ind3 = nodes.next(node);

        loop {
            if ind1 == ind3 {
                // everything collinear
                return Angle::Full;
            }

            if i1 != i3 {
                let (lo, hi) = if i1 < i2 { (i1, i2) } else { (i2, i1) };
                if in_between(lo, hi, i3) {
                    i2 = i3;
                    ind3 = nodes.next(ind3);
                    i3 = nodes.point(ind3);
                } else {
                    i2 = i1;
                    ind1 = nodes.prev(ind1);
                    i1 = nodes.point(ind1);
                }
                if ind1 == ind3 {
                    return Angle::Spike;
                }
                match self.orientation(i1, i2, i3) {
                    1 => return Angle::Spike,
                    -1 => return Angle::Full,
                    _ => continue,
                }
            }

            let i0 = i2;
            i2 = i1;
            ind1 = nodes.prev(ind1);
            i1 = nodes.point(ind1);
            if ind1 == ind3 {
                return Angle::Spike;
            }
            ind3 = nodes.next(ind3);
            i3 = nodes.point(ind3);
            if ind1 == ind3 {
                return Angle::Spike;
            }

            match self.orientation(i1, i2, i3) {
                1 => {
                    if self.orientation(i1, i2, i0) > 0 && self.orientation(i2, i3, i0) > 0 {
                        return Angle::Full;
                    }
                    return Angle::Spike;
                }
                -1 => {
                    if self.orientation(i2, i1, i0) > 0 && self.orientation(i3, i2, i0) > 0 {
                        return Angle::Spike;
                    }
                    return Angle::Full;
                }
                _ => {
                    let d = dot2(self.p(i1).sub(self.p(i2)), self.p(i3).sub(self.p(i2)));
                    if d < 0.0 {
                        return if self.orientation(i2, i1, i0) > 0 {
                            Angle::Spike
                        } else {
                            Angle::Full
                        };
                    }
                }
            }
        }
    }

    /// Winding number of the loop through `head` around an arbitrary point.
    pub(crate) fn winding_number(&self, nodes: &NodeList, head: NodeId, p: Point2) -> i32 {
        let mut total = 0.0;
        for n in nodes.cycle(head) {
            let a = self.p(nodes.point(n));
            let b = self.p(nodes.point(nodes.next(n)));
            total += signed_angle(p, a, b);
        }
        ((total + PI) / TAU).floor() as i32
    }
}
