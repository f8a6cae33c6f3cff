// Copyright 2025 Lars Brubaker
// Recovery when no ear is left: resolve a local crossing, split the chain
// along a valid diagonal, or clip something anyway.

use std::f64::consts::TAU;

use tracing::debug;

use super::ear_clip::Ladder;
use super::TriangulationContext;
use crate::ear_queue::{EarEntry, EarOrder};
use crate::error::Diagnostic;
use crate::geom::{signed_angle, Real};
use crate::list::{Angle, NodeId, INVALID};

impl TriangulationContext<'_> {
    /// Try the recovery steps in order on the current chain.
    pub(super) fn desperate(&mut self) -> Ladder {
        let head = self.first_node;
        if let Some(quad) = self.exists_cross_over(head) {
            self.handle_cross_over(quad);
            return Ladder::CrossOver;
        }
        if let Some((a, b)) = self.exists_split(head) {
            self.handle_split(a, b);
            return Ladder::Split;
        }
        self.lets_hope(head);
        Ladder::LastResort
    }

    /// Interior angle at a node, in [0, 2pi).
    fn corner_angle(&self, n: NodeId) -> Real {
        let p = self.points[self.point_of(n) as usize];
        let next = self.points[self.point_of(self.nodes.next(n)) as usize];
        let prev = self.points[self.point_of(self.nodes.prev(n)) as usize];
        let a = signed_angle(p, next, prev);
        if a < 0.0 {
            a + TAU
        } else {
            a
        }
    }

    /// Find consecutive nodes ind1..ind4 whose edges (ind1, ind2) and
    /// (ind3, ind4) cross.
    pub(super) fn exists_cross_over(&self, head: NodeId) -> Option<[NodeId; 4]> {
        let preds = self.preds();
        let mut ind1 = head;
        loop {
            let ind2 = self.nodes.next(ind1);
            let ind3 = self.nodes.next(ind2);
            let ind4 = self.nodes.next(ind3);
            if ind4 == ind1 {
                // a triangle has nothing to untangle
                return None;
            }
            let bb1 = self.bbox(self.point_of(ind1), self.point_of(ind2));
            let bb2 = self.bbox(self.point_of(ind3), self.point_of(ind4));
            let mut shared = 0;
            if bb1.overlaps(&bb2)
                && preds.seg_intersect(bb1.imin, bb1.imax, bb2.imin, bb2.imax, INVALID, &mut shared)
            {
                return Some([ind1, ind2, ind3, ind4]);
            }
            ind1 = ind2;
            if ind1 == head {
                return None;
            }
        }
    }

    /// Clip one of the two triangles around the crossing and queue the
    /// neighbour as a forced ear.
    pub(super) fn handle_cross_over(&mut self, [ind1, ind2, ind3, ind4]: [NodeId; 4]) {
        let angle1 = self.corner_angle(ind1);
        let angle4 = self.corner_angle(ind4);
        let first = if angle1 < angle4 {
            true
        } else if angle1 > angle4 {
            false
        } else if self.queue.order() == EarOrder::QualitySorted {
            let preds = self.preds();
            let (i1, i2, i3, i4) = (
                self.point_of(ind1),
                self.point_of(ind2),
                self.point_of(ind3),
                self.point_of(ind4),
            );
            preds.ratio(i3, i4, i1) > preds.ratio(i1, i2, i4)
        } else {
            true
        };

        if first {
            self.delete_node(ind2);
            self.store_triangle(ind1, ind2, ind3);
            let angle = self.angle_at(ind1);
            self.set_node_angle(ind1, angle);
            self.set_node_angle(ind3, Angle::Convex);
            self.queue.insert(EarEntry {
                ratio: 0.0,
                apex: ind3,
                prev: ind1,
                next: ind4,
            });
        } else {
            self.delete_node(ind3);
            self.store_triangle(ind2, ind3, ind4);
            let angle = self.angle_at(ind4);
            self.set_node_angle(ind4, angle);
            self.set_node_angle(ind2, Angle::Convex);
            self.queue.insert(EarEntry {
                ratio: 0.0,
                apex: ind2,
                prev: ind1,
                next: ind4,
            });
        }
        self.report(Diagnostic::CrossOverResolved { face: self.face });
    }

    /// Find a diagonal between two non-adjacent nodes that lies inside the
    /// chain and crosses none of its edges.
    pub(super) fn exists_split(&mut self, head: NodeId) -> Option<(NodeId, NodeId)> {
        self.edge_loops.clear();
        self.edge_loops.push(head);
        self.edge_loops.extend_from_slice(&self.chains);

        let ring: Vec<NodeId> = self.nodes.cycle(head).collect();
        let n = ring.len();
        if n < 4 {
            return None;
        }
        let preds = self.preds();
        for a in 0..n {
            let ind1 = ring[a];
            let i1 = self.point_of(ind1);
            let i0 = self.point_of(self.nodes.prev(ind1));
            let i2 = self.point_of(self.nodes.next(ind1));
            let convex1 = self.nodes.angle(ind1).is_convex();
            // b runs over the nodes that are not neighbours of a
            for b in (a + 2)..n {
                if a == 0 && b == n - 1 {
                    continue;
                }
                let ind3 = ring[b];
                let i3 = self.point_of(ind3);
                if i3 == i1 {
                    continue;
                }
                if !preds.is_in_cone(i0, i1, i2, i3, convex1) {
                    continue;
                }
                let j0 = self.point_of(self.nodes.prev(ind3));
                let j2 = self.point_of(self.nodes.next(ind3));
                if !preds.is_in_cone(j0, i3, j2, i1, self.nodes.angle(ind3).is_convex()) {
                    continue;
                }
                let bb = self.bbox(i1, i3);
                if self.diagonal_crosses_boundary(&bb, ind1) {
                    continue;
                }
                let mid = self.points[i1 as usize].midpoint(self.points[i3 as usize]);
                if preds.winding_number(&self.nodes, head, mid) == 1 {
                    return Some((ind1, ind3));
                }
            }
        }
        None
    }

    /// Cut the chain along a-b into two chains and queue both.
    pub(super) fn handle_split(&mut self, a: NodeId, b: NodeId) {
        let a2 = self.nodes.make_node(self.point_of(a), self.nodes.common(a));
        self.nodes.insert_after(a, a2);
        let b2 = self.nodes.make_node(self.point_of(b), self.nodes.common(b));
        self.nodes.insert_after(b, b2);
        self.nodes.split_splice(a, a2, b, b2);
        for n in [a, a2, b, b2] {
            self.reset_angle(n);
        }
        debug!(
            face = self.face,
            left = self.nodes.cycle_len(a),
            right = self.nodes.cycle_len(b),
            "split chain"
        );
        self.chains.push(a);
        self.chains.push(b);
        self.report(Diagnostic::PolygonSplit { face: self.face });
    }

    /// Force the first convex node (or the head) into the queue as an ear.
    pub(super) fn lets_hope(&mut self, head: NodeId) {
        let apex = match self
            .nodes
            .cycle(head)
            .find(|&n| self.nodes.angle(n).is_convex())
        {
            Some(n) => n,
            None => {
                self.set_node_angle(head, Angle::Convex);
                head
            }
        };
        self.queue.insert(EarEntry {
            ratio: 0.0,
            apex,
            prev: self.nodes.prev(apex),
            next: self.nodes.next(apex),
        });
        self.report(Diagnostic::IrreducibleLastResort { face: self.face });
    }
}
