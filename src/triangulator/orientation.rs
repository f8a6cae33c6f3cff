// Copyright 2025 Lars Brubaker
// Orientation of the outer loop and holes, and angle classification.

use super::TriangulationContext;
use crate::error::{Diagnostic, TriangulationError, TriangulationResult};
use crate::geom::Real;
use crate::list::{Angle, NodeId};

impl TriangulationContext<'_> {
    /// Twice the signed area of a loop, summed as triangles hooked at point 0.
    pub(super) fn polygon_area(&self, head: NodeId) -> Real {
        let preds = self.preds();
        self.nodes
            .cycle(head)
            .map(|n| {
                let i1 = self.nodes.point(n);
                let i2 = self.nodes.point(self.nodes.next(n));
                preds.stable_det(0, i1, i2)
            })
            .sum()
    }

    /// Make the outer loop CCW and every hole CW. A hole larger than the
    /// outer loop is an error unless loop reordering is enabled.
    pub(super) fn adjust_orientation(&mut self) -> TriangulationResult<()> {
        let mut areas: Vec<Real> = self.loops.iter().map(|&h| self.polygon_area(h)).collect();

        let mut outer = 0;
        let mut largest = areas[0].abs();
        for (i, a) in areas.iter().enumerate().skip(1) {
            if a.abs() > largest {
                largest = a.abs();
                outer = i;
            }
        }

        if outer != 0 {
            if !self.config.reorder_loops {
                return Err(TriangulationError::LoopOrdering {
                    face: self.face,
                    hole: self.loop_ids[outer],
                    outer_area: 0.5 * areas[0].abs(),
                    hole_area: 0.5 * largest,
                });
            }
            self.report(Diagnostic::LoopsReordered {
                face: self.face,
                hole: self.loop_ids[outer],
            });
            self.loops.swap(0, outer);
            self.loop_ids.swap(0, outer);
            areas.swap(0, outer);
        }

        if areas[0] < 0.0 {
            self.nodes.reverse(self.loops[0]);
            self.ccw_loop = false;
        }
        for i in 1..self.loops.len() {
            if areas[i] > 0.0 {
                self.nodes.reverse(self.loops[i]);
            }
        }
        Ok(())
    }

    /// Set the angle class of every node of a loop.
    pub(super) fn classify_angles(&mut self, head: NodeId) {
        let mut n = head;
        loop {
            self.reset_angle(n);
            n = self.nodes.next(n);
            if n == head {
                break;
            }
        }
    }

    /// Recompute one node's angle class from its current neighbours.
    pub(super) fn reset_angle(&mut self, n: NodeId) {
        let angle = self.angle_at(n);
        self.nodes.set_angle(n, angle);
    }

    pub(super) fn angle_at(&self, n: NodeId) -> Angle {
        let i0 = self.nodes.point(self.nodes.prev(n));
        let i1 = self.nodes.point(n);
        let i2 = self.nodes.point(self.nodes.next(n));
        self.preds().is_convex_angle(&self.nodes, i0, i1, i2, n)
    }
}
