// Copyright 2025 Lars Brubaker
// Shortcut for triangles and quadrilaterals without holes.

use super::numerics::Predicates;
use super::TriangulationContext;
use crate::error::Diagnostic;
use crate::geom::{cross3, long_axis, sub3, Point2, Real, Vec3};
use crate::list::NodeId;

impl TriangulationContext<'_> {
    /// Emit a lone triangle or quad directly from the input coordinates.
    /// Returns false if the face needs the general path. Node points are
    /// still vertex indices here.
    pub(super) fn simple_face(&mut self, head: NodeId) -> bool {
        let ring: Vec<NodeId> = self.nodes.cycle(head).collect();
        match ring.len() {
            3 if self.distinct_coords(&ring) => {
                self.store_triangle(ring[0], ring[1], ring[2]);
                true
            }
            4 if self.distinct_coords(&ring) => {
                self.simple_quad([ring[0], ring[1], ring[2], ring[3]]);
                true
            }
            _ => false,
        }
    }

    fn distinct_coords(&self, ring: &[NodeId]) -> bool {
        let coord = |n: NodeId| self.coords[self.point_of(n) as usize];
        ring.iter()
            .enumerate()
            .all(|(a, &na)| ring[a + 1..].iter().all(|&nb| coord(na) != coord(nb)))
    }

    fn simple_quad(&mut self, ring: [NodeId; 4]) {
        let v: [Vec3; 4] = ring.map(|n| self.coords[self.point_of(n) as usize]);

        // cross of the diagonals; zero only for a flat bowtie
        let mut normal = cross3(&sub3(&v[2], &v[0]), &sub3(&v[3], &v[1]));
        if normal == [0.0; 3] {
            normal = cross3(&sub3(&v[0], &v[1]), &sub3(&v[2], &v[1]));
        }
        let (u, w) = match long_axis(&normal) {
            0 => (1, 2),
            1 => (2, 0),
            _ => (0, 1),
        };

        // slot 0 is unused so the corners are 1..=4
        let mut points = [Point2::default(); 5];
        for (k, c) in v.iter().enumerate() {
            points[k + 1] = Point2::new(c[u], c[w]);
        }
        let (mut xmin, mut xmax, mut ymin, mut ymax) = (
            points[1].x,
            points[1].x,
            points[1].y,
            points[1].y,
        );
        for p in &points[2..] {
            xmin = xmin.min(p.x);
            xmax = xmax.max(p.x);
            ymin = ymin.min(p.y);
            ymax = ymax.max(p.y);
        }
        let extent: Real = (xmax - xmin).max(ymax - ymin);
        let preds = Predicates {
            points: &points,
            eps: self.config.epsilon * extent * extent,
        };

        let o1 = preds.orientation(1, 2, 3);
        let o2 = preds.orientation(1, 3, 4);
        if o1 != 0 && o1 == o2 {
            self.store_triangle(ring[0], ring[1], ring[2]);
            self.store_triangle(ring[0], ring[2], ring[3]);
        } else {
            // neither diagonal splits a bowtie into like-wound halves
            let o3 = preds.orientation(2, 3, 4);
            let o4 = preds.orientation(2, 4, 1);
            if o3 == 0 || o3 != o4 {
                self.report(Diagnostic::SelfIntersectingLoop { face: self.face });
            }
            self.store_triangle(ring[1], ring[2], ring[3]);
            self.store_triangle(ring[1], ring[3], ring[0]);
        }
    }
}
