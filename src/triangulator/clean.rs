// Copyright 2025 Lars Brubaker
// Sorting and de-duplication of the projected point set.

use super::TriangulationContext;
use crate::error::Diagnostic;
use crate::geom::{lex_cmp, vert_eq};
use crate::list::NodeId;

impl TriangulationContext<'_> {
    /// Sort the working points lexicographically, merge exact duplicates and
    /// renumber the nodes. Consecutive nodes on the same point are collapsed
    /// and loops left with fewer than three nodes are dropped. Returns false
    /// if the outer loop did not survive.
    pub(super) fn clean_face(&mut self) -> bool {
        let n = self.points.len();
        let mut order: Vec<u32> = (0..n as u32).collect();
        order.sort_by(|&a, &b| lex_cmp(self.points[a as usize], self.points[b as usize]));

        let mut remap = vec![0u32; n];
        let mut sorted = Vec::with_capacity(n);
        for &old in &order {
            let p = self.points[old as usize];
            match sorted.last() {
                Some(&last) if vert_eq(last, p) => {}
                _ => sorted.push(p),
            }
            remap[old as usize] = (sorted.len() - 1) as u32;
        }
        self.points = sorted;

        for node in self.nodes.nodes.iter_mut() {
            node.point = remap[node.point as usize];
        }

        let mut removed = 0;
        let mut kept = Vec::with_capacity(self.loops.len());
        let mut kept_ids = Vec::with_capacity(self.loops.len());
        for l in 0..self.loops.len() {
            let (head, dropped) = self.collapse_repeats(self.loops[l]);
            removed += dropped;
            if self.nodes.cycle_len(head) >= 3 {
                kept.push(head);
                kept_ids.push(self.loop_ids[l]);
            } else if l == 0 {
                return false;
            }
        }
        self.loops = kept;
        self.loop_ids = kept_ids;

        if removed > 0 {
            self.report(Diagnostic::DuplicatePointsRemoved {
                face: self.face,
                count: removed,
            });
        }
        true
    }

    /// Unlink every node that repeats its predecessor's point. Returns the
    /// (possibly moved) head and the number of nodes removed.
    fn collapse_repeats(&mut self, mut head: NodeId) -> (NodeId, usize) {
        let mut removed = 0;
        let mut n = head;
        loop {
            let next = self.nodes.next(n);
            if next == n {
                break;
            }
            if self.nodes.point(next) == self.nodes.point(n) {
                if next == head {
                    head = n;
                }
                self.nodes.unlink(next);
                removed += 1;
                continue;
            }
            n = next;
            if n == head {
                break;
            }
        }
        (head, removed)
    }
}
