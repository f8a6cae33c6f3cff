// Copyright 2025 Lars Brubaker
// Validity oracle: the live set of reflex nodes, and brute-force boundary
// crossing tests pruned by bounding boxes.

use super::TriangulationContext;
use crate::bbox::BBox;
use crate::list::{NodeId, INVALID};

#[derive(Copy, Clone, Debug)]
struct ReflexEntry {
    node: NodeId,
    next: u32,
}

/// Singly-linked list of the reflex nodes of the chain being clipped.
#[derive(Debug, Default)]
pub(crate) struct ReflexSet {
    head: u32,
    entries: Vec<ReflexEntry>,
    len: usize,
}

impl ReflexSet {
    pub(crate) fn new() -> Self {
        ReflexSet {
            head: INVALID,
            entries: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.head = INVALID;
        self.entries.clear();
        self.len = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn insert(&mut self, node: NodeId) {
        let idx = self.entries.len() as u32;
        self.entries.push(ReflexEntry {
            node,
            next: self.head,
        });
        self.head = idx;
        self.len += 1;
    }

    /// Unlink `node`; returns false if it was not in the set.
    pub(crate) fn remove(&mut self, node: NodeId) -> bool {
        let mut prev = INVALID;
        let mut cur = self.head;
        while cur != INVALID {
            let entry = self.entries[cur as usize];
            if entry.node == node {
                if prev == INVALID {
                    self.head = entry.next;
                } else {
                    self.entries[prev as usize].next = entry.next;
                }
                self.len -= 1;
                return true;
            }
            prev = cur;
            cur = entry.next;
        }
        false
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut cur = self.head;
        std::iter::from_fn(move || {
            if cur == INVALID {
                return None;
            }
            let entry = self.entries[cur as usize];
            cur = entry.next;
            Some(entry.node)
        })
    }
}

impl TriangulationContext<'_> {
    /// Rebuild the reflex set from the angle classes of one chain.
    pub(super) fn collect_reflex(&mut self, head: NodeId) {
        self.reflex.clear();
        let mut n = head;
        loop {
            if self.nodes.angle(n).is_reflex() {
                self.reflex.insert(n);
            }
            n = self.nodes.next(n);
            if n == head {
                break;
            }
        }
    }

    /// Does the CCW triangle (apex, next, prev) contain a reflex node other
    /// than its own corners? A reflex node sitting on a corner's point counts
    /// when one of its edges leaves that corner into the triangle.
    pub(super) fn triangle_contains_reflex(
        &self,
        apex: NodeId,
        next: NodeId,
        prev: NodeId,
        bb: &mut BBox,
    ) -> bool {
        if self.reflex.len() == 0 {
            return false;
        }
        let i1 = self.nodes.point(apex);
        let i2 = self.nodes.point(next);
        let i3 = self.nodes.point(prev);
        bb.extend(&self.points, i1);

        let preds = self.preds();
        // corner, its CCW successor, its CCW predecessor
        let corners = [(i1, i2, i3), (i2, i3, i1), (i3, i1, i2)];
        for n in self.reflex.iter() {
            if n == apex || n == next || n == prev {
                continue;
            }
            let i5 = self.nodes.point(n);
            if !bb.contains_point(&self.points, i5) {
                continue;
            }
            if let Some(&(c, u, w)) = corners.iter().find(|(c, _, _)| *c == i5) {
                let enters = |q: u32| {
                    q != c && preds.orientation(c, u, q) > 0 && preds.orientation(c, q, w) > 0
                };
                if enters(self.nodes.point(self.nodes.prev(n)))
                    || enters(self.nodes.point(self.nodes.next(n)))
                {
                    return true;
                }
            } else if preds.vtx_in_triangle(i1, i2, i3, i5) {
                return true;
            }
        }
        false
    }

    /// Does the diagonal spanned by `bb` (one end at node `node5`) cross any
    /// edge of the loops in edge_loops? If `node5`'s point is shared by four
    /// or more edges the diagonal is also checked against the other corners
    /// at that point.
    pub(super) fn diagonal_crosses_boundary(&self, bb: &BBox, node5: NodeId) -> bool {
        let i5 = self.nodes.point(node5);
        let preds = self.preds();
        let mut shared = 0;
        for &head in &self.edge_loops {
            for n in self.nodes.cycle(head) {
                let bb1 = self.bbox(self.nodes.point(n), self.nodes.point(self.nodes.next(n)));
                if bb.overlaps(&bb1)
                    && preds.seg_intersect(bb.imin, bb.imax, bb1.imin, bb1.imax, i5, &mut shared)
                {
                    return true;
                }
            }
        }
        if shared >= 4 {
            let other = if bb.imin == i5 { bb.imax } else { bb.imin };
            return self.bottleneck_blocks(node5, other);
        }
        false
    }

    /// At a point where several corners meet, reject a diagonal from `node5`
    /// toward `other` that also lies strictly inside another corner's cone.
    fn bottleneck_blocks(&self, node5: NodeId, other: u32) -> bool {
        let i5 = self.nodes.point(node5);
        if other == i5 {
            return false;
        }
        let preds = self.preds();
        for &head in &self.edge_loops {
            for n in self.nodes.cycle(head) {
                if n == node5 || self.nodes.point(n) != i5 {
                    continue;
                }
                let p = self.nodes.point(self.nodes.prev(n));
                let s = self.nodes.point(self.nodes.next(n));
                if p == i5 || s == i5 {
                    continue;
                }
                let convex = self.nodes.angle(n).is_convex();
                if preds.is_strictly_in_cone(p, i5, s, other, convex) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_iter() {
        let mut set = ReflexSet::new();
        set.insert(4);
        set.insert(7);
        set.insert(9);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![9, 7, 4]);
        assert!(set.remove(7));
        assert!(!set.remove(7));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![9, 4]);
        assert!(set.remove(9));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![4]);
        assert_eq!(set.len(), 1);
        set.clear();
        assert_eq!(set.iter().count(), 0);
    }
}
