// Copyright 2025 Lars Brubaker
// Merging holes into the outer loop with bridge edges.

use tracing::debug;

use super::TriangulationContext;
use crate::error::Diagnostic;
use crate::geom::{base_length, Real};
use crate::list::NodeId;

#[derive(Copy, Clone, Debug)]
struct Candidate {
    dist: Real,
    node: NodeId,
}

impl TriangulationContext<'_> {
    /// Lowest-index node of a loop; ties prefer a reflex node.
    pub(super) fn find_leftmost(&self, head: NodeId) -> NodeId {
        let mut best = head;
        let mut best_i = self.nodes.point(head);
        for n in self.nodes.cycle(head).skip(1) {
            let i = self.nodes.point(n);
            if i < best_i || (i == best_i && self.nodes.angle(n).is_reflex()) {
                best = n;
                best_i = i;
            }
        }
        best
    }

    /// Connect every hole to the outer loop, leftmost hole first.
    pub(super) fn construct_bridges(&mut self) {
        let outer = self.loops[0];
        let mut holes: Vec<(NodeId, usize)> = (1..self.loops.len())
            .map(|l| (self.find_leftmost(self.loops[l]), l))
            .collect();
        holes.sort_by_key(|&(n, _)| self.nodes.point(n));

        self.edge_loops.clear();
        self.edge_loops.extend_from_slice(&self.loops);

        for (start, l) in holes {
            let head = self.loops[l];
            let hole_id = self.loop_ids[l];
            let target = match self.find_bridge(outer, start) {
                Some(n) => n,
                None => {
                    self.report(Diagnostic::NoValidBridge {
                        face: self.face,
                        hole: hole_id,
                    });
                    self.nearest_node(outer, start)
                }
            };

            if self.nodes.point(target) == self.nodes.point(start) {
                self.simple_bridge(target, start);
            } else {
                self.insert_bridge(target, start);
            }
            debug!(
                face = self.face,
                hole = hole_id,
                from = self.nodes.point(start),
                to = self.nodes.point(target),
                "bridged hole"
            );
            self.edge_loops.retain(|&h| h != head);
        }
        self.loops.truncate(1);
        self.loop_ids.truncate(1);
        self.edge_loops.clear();
    }

    /// Outer-loop nodes sorted by L1 distance to `start`.
    fn bridge_candidates(&self, outer: NodeId, start: NodeId) -> Vec<Candidate> {
        let p = self.points[self.nodes.point(start) as usize];
        let mut candidates: Vec<Candidate> = self
            .nodes
            .cycle(outer)
            .map(|n| Candidate {
                dist: base_length(p, self.points[self.nodes.point(n) as usize]),
                node: n,
            })
            .collect();
        candidates.sort_by(|a, b| a.dist.total_cmp(&b.dist));
        candidates
    }

    /// Nearest outer node whose diagonal to `start` lies in both corners'
    /// cones and crosses no edge; failing that, the nearest crossing-free one.
    pub(super) fn find_bridge(&self, outer: NodeId, start: NodeId) -> Option<NodeId> {
        let i = self.nodes.point(start);
        let candidates = self.bridge_candidates(outer, start);
        let preds = self.preds();

        let hole_prev = self.nodes.point(self.nodes.prev(start));
        let hole_next = self.nodes.point(self.nodes.next(start));
        let hole_convex = self.nodes.angle(start).is_convex();

        for c in &candidates {
            let i1 = self.nodes.point(c.node);
            if i1 > i {
                continue;
            }
            let i0 = self.nodes.point(self.nodes.prev(c.node));
            let i2 = self.nodes.point(self.nodes.next(c.node));
            let convex = self.nodes.angle(c.node).is_convex();
            if !preds.is_in_cone(i0, i1, i2, i, convex)
                || !preds.is_in_cone(hole_prev, i, hole_next, i1, hole_convex)
            {
                continue;
            }
            let bb = self.bbox(i1, i);
            if !self.diagonal_crosses_boundary(&bb, c.node) {
                return Some(c.node);
            }
        }

        // the hole's leftmost point is not inside the outer loop
        for c in &candidates {
            let bb = self.bbox(self.nodes.point(c.node), i);
            if !self.diagonal_crosses_boundary(&bb, c.node) {
                return Some(c.node);
            }
        }
        None
    }

    fn nearest_node(&self, outer: NodeId, start: NodeId) -> NodeId {
        self.bridge_candidates(outer, start)
            .first()
            .map_or(outer, |c| c.node)
    }

    /// Join two loops that share a point by swapping successors.
    pub(super) fn simple_bridge(&mut self, a: NodeId, b: NodeId) {
        self.nodes.rotate_links(a, b);
        self.reset_angle(a);
        self.reset_angle(b);
    }

    /// Join two loops with a doubled edge a-b. Each end is duplicated and the
    /// copy keeps its original's corner slot.
    pub(super) fn insert_bridge(&mut self, a: NodeId, b: NodeId) {
        let a2 = self.nodes.make_node(self.nodes.point(a), self.nodes.common(a));
        self.nodes.insert_after(a, a2);
        let b2 = self.nodes.make_node(self.nodes.point(b), self.nodes.common(b));
        self.nodes.insert_after(b, b2);
        self.nodes.split_splice(a, a2, b, b2);
        for n in [a, a2, b, b2] {
            self.reset_angle(n);
        }
    }
}
