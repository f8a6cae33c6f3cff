// Copyright 2025 Lars Brubaker
// Planar projection of a face's loops into the 2D working frame.

use super::TriangulationContext;
use crate::geom::{cross3, dot3, length3, sub3, Point2, Real, Vec3};
use crate::list::NodeId;

/// Fan triangles whose sine of angle is below this are skipped.
const NORMAL_EPS: Real = 1.0e-8;

/// Frame (n1, n2) spanning the plane with normal n3.
pub(crate) fn plane_frame(n3: &Vec3) -> (Vec3, Vec3) {
    let mut n1 = if n3[0].abs() > 0.1 || n3[1].abs() > 0.1 {
        [-n3[1], n3[0], 0.0]
    } else {
        [n3[2], 0.0, -n3[0]]
    };
    let d = length3(&n1);
    for c in &mut n1 {
        *c /= d;
    }
    let mut n2 = cross3(&n1, n3);
    let d = length3(&n2);
    for c in &mut n2 {
        *c /= d;
    }
    (n1, n2)
}

fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let d = length3(&v);
    if d > NORMAL_EPS {
        [v[0] / d, v[1] / d, v[2] / d]
    } else {
        fallback
    }
}

impl TriangulationContext<'_> {
    /// Average normal of a loop: unit normals of the fan around its head,
    /// each flipped to agree with the running sum. Node points are still
    /// vertex indices here.
    pub(super) fn loop_normal(&self, head: NodeId) -> Vec3 {
        let pivot = self.coords[self.nodes.point(head) as usize];
        let prev = self.coords[self.nodes.point(self.nodes.prev(head)) as usize];

        let mut normal = [0.0; 3];
        let mut pq = sub3(&prev, &pivot);
        let mut n = self.nodes.next(head);
        loop {
            let pr = sub3(&self.coords[self.nodes.point(n) as usize], &pivot);
            let nr = cross3(&pq, &pr);
            let d = length3(&nr);
            if d > NORMAL_EPS * length3(&pq) * length3(&pr) && d > 0.0 {
                let mut nr = [nr[0] / d, nr[1] / d, nr[2] / d];
                if dot3(&normal, &nr) < 0.0 {
                    nr = [-nr[0], -nr[1], -nr[2]];
                }
                for k in 0..3 {
                    normal[k] += nr[k];
                }
            }
            pq = pr;
            if n == head {
                break;
            }
            n = self.nodes.next(n);
        }
        normalize_or(normal, [0.0, 0.0, 1.0])
    }

    /// Project every loop of the face onto the plane of its combined normal.
    /// One working point is created per node.
    pub(super) fn project_face(&mut self) {
        let mut normal = self.loop_normal(self.loops[0]);
        if self.loops.len() > 1 {
            for i in 1..self.loops.len() {
                let mut nr = self.loop_normal(self.loops[i]);
                if dot3(&normal, &nr) < 0.0 {
                    nr = [-nr[0], -nr[1], -nr[2]];
                }
                for k in 0..3 {
                    normal[k] += nr[k];
                }
            }
            normal = normalize_or(normal, [0.0, 0.0, 1.0]);
        }

        let (n1, n2) = plane_frame(&normal);
        self.points.clear();
        for l in 0..self.loops.len() {
            let head = self.loops[l];
            let mut n = head;
            loop {
                let v = &self.coords[self.nodes.point(n) as usize];
                let idx = self.points.len() as u32;
                self.points.push(Point2::new(dot3(&n1, v), dot3(&n2, v)));
                self.nodes.set_point(n, idx);
                n = self.nodes.next(n);
                if n == head {
                    break;
                }
            }
        }
    }
}
