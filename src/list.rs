// Copyright 2025 Lars Brubaker
// License: MIT
//
// Circular doubly-linked polygon loops stored in a single arena.
//
// All links are u32 indices into NodeList::nodes; INVALID = u32::MAX is the
// null link. Unlinked nodes keep their slot (and their point/common data) for
// the rest of the face, so handles held by the ear queue never alias a
// different node.

pub const INVALID: u32 = u32::MAX;

/// Index into NodeList::nodes
pub type NodeId = u32;

/// Interior angle class of a loop corner. The numeric order is meaningful:
/// the cross-over heuristic prefers the smaller class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Angle {
    /// 360 degrees: the corner folds back into the polygon.
    Full = -2,
    Reflex = -1,
    /// 180 degrees.
    Straight = 0,
    Convex = 1,
    /// 0 degrees: a spike pointing out of the polygon.
    Spike = 2,
}

impl Angle {
    #[inline]
    pub fn is_convex(self) -> bool {
        self > Angle::Straight
    }

    #[inline]
    pub fn is_reflex(self) -> bool {
        self < Angle::Straight
    }
}

#[derive(Clone, Debug)]
pub struct PolyNode {
    /// Index into the working point array (a vertex index before projection).
    pub point: u32,
    pub next: NodeId,
    pub prev: NodeId,
    pub angle: Angle,
    /// Corner slot in the caller's flattened loop-index stream.
    pub common: u32,
}

impl Default for PolyNode {
    fn default() -> Self {
        Self {
            point: INVALID,
            next: INVALID,
            prev: INVALID,
            angle: Angle::Convex,
            common: INVALID,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NodeList {
    pub nodes: Vec<PolyNode>,
}

impl NodeList {
    pub fn new() -> Self {
        NodeList { nodes: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a node that links to itself.
    pub fn make_node(&mut self, point: u32, common: u32) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(PolyNode {
            point,
            next: id,
            prev: id,
            angle: Angle::Convex,
            common,
        });
        id
    }

    /// Build a closed loop from (point, common) pairs in order.
    /// Returns the first node, or INVALID for an empty iterator.
    pub fn push_loop<I>(&mut self, corners: I) -> NodeId
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut head = INVALID;
        let mut last = INVALID;
        for (point, common) in corners {
            let id = self.make_node(point, common);
            if head == INVALID {
                head = id;
            } else {
                self.insert_after(last, id);
            }
            last = id;
        }
        head
    }

    #[inline]
    pub fn point(&self, id: NodeId) -> u32 {
        self.nodes[id as usize].point
    }

    #[inline]
    pub fn next(&self, id: NodeId) -> NodeId {
        self.nodes[id as usize].next
    }

    #[inline]
    pub fn prev(&self, id: NodeId) -> NodeId {
        self.nodes[id as usize].prev
    }

    #[inline]
    pub fn angle(&self, id: NodeId) -> Angle {
        self.nodes[id as usize].angle
    }

    #[inline]
    pub fn set_angle(&mut self, id: NodeId, angle: Angle) {
        self.nodes[id as usize].angle = angle;
    }

    #[inline]
    pub fn common(&self, id: NodeId) -> u32 {
        self.nodes[id as usize].common
    }

    #[inline]
    pub fn set_point(&mut self, id: NodeId, point: u32) {
        self.nodes[id as usize].point = point;
    }

    /// True while the node is part of some loop.
    #[inline]
    pub fn is_live(&self, id: NodeId) -> bool {
        (id as usize) < self.nodes.len() && self.nodes[id as usize].next != INVALID
    }

    /// Insert `id` between `after` and its successor.
    pub fn insert_after(&mut self, after: NodeId, id: NodeId) {
        let next = self.nodes[after as usize].next;
        self.nodes[id as usize].prev = after;
        self.nodes[id as usize].next = next;
        self.nodes[next as usize].prev = id;
        self.nodes[after as usize].next = id;
    }

    /// Remove a node from its loop. The slot is not reclaimed.
    pub fn unlink(&mut self, id: NodeId) {
        let prev = self.nodes[id as usize].prev;
        let next = self.nodes[id as usize].next;
        if prev == INVALID || next == INVALID {
            return;
        }
        self.nodes[prev as usize].next = next;
        self.nodes[next as usize].prev = prev;
        self.nodes[id as usize].next = INVALID;
        self.nodes[id as usize].prev = INVALID;
    }

    /// Swap the successors of two nodes. Applied to nodes of two different
    /// loops this merges them; applied within one loop it splits it.
    pub fn rotate_links(&mut self, a: NodeId, b: NodeId) {
        let an = self.nodes[a as usize].next;
        let bn = self.nodes[b as usize].next;
        self.nodes[a as usize].next = bn;
        self.nodes[b as usize].next = an;
        self.nodes[an as usize].prev = b;
        self.nodes[bn as usize].prev = a;
    }

    /// Re-link after duplicating `a` into `a2` and `b` into `b2` (each inserted
    /// right after its original): a -> b2 and b -> a2.
    pub fn split_splice(&mut self, a: NodeId, a2: NodeId, b: NodeId, b2: NodeId) {
        self.nodes[a as usize].next = b2;
        self.nodes[b2 as usize].prev = a;
        self.nodes[a2 as usize].prev = b;
        self.nodes[b as usize].next = a2;
    }

    /// Reverse the direction of the loop containing `head`.
    pub fn reverse(&mut self, head: NodeId) {
        let mut id = head;
        loop {
            let node = &mut self.nodes[id as usize];
            std::mem::swap(&mut node.next, &mut node.prev);
            // the old next is now prev
            id = node.prev;
            if id == head {
                break;
            }
        }
    }

    pub fn cycle(&self, head: NodeId) -> CycleIter<'_> {
        CycleIter {
            list: self,
            head,
            cur: head,
            done: head == INVALID,
        }
    }

    pub fn cycle_len(&self, head: NodeId) -> usize {
        self.cycle(head).count()
    }
}

/// Walks one loop once, starting at its head.
pub struct CycleIter<'a> {
    list: &'a NodeList,
    head: NodeId,
    cur: NodeId,
    done: bool,
}

impl Iterator for CycleIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.done {
            return None;
        }
        let id = self.cur;
        self.cur = self.list.next(id);
        if self.cur == self.head || self.cur == INVALID {
            self.done = true;
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points_of(list: &NodeList, head: NodeId) -> Vec<u32> {
        list.cycle(head).map(|id| list.point(id)).collect()
    }

    #[test]
    fn push_loop_links_in_order() {
        let mut list = NodeList::new();
        let head = list.push_loop([(10, 0), (11, 1), (12, 2)]);
        assert_eq!(points_of(&list, head), vec![10, 11, 12]);
        assert_eq!(list.prev(head), 2);
        assert_eq!(list.cycle_len(head), 3);
    }

    #[test]
    fn unlink_keeps_slot_but_drops_links() {
        let mut list = NodeList::new();
        let head = list.push_loop([(0, 0), (1, 1), (2, 2), (3, 3)]);
        list.unlink(1);
        assert!(!list.is_live(1));
        assert_eq!(list.point(1), 1);
        assert_eq!(points_of(&list, head), vec![0, 2, 3]);
        // a second unlink is a no-op
        list.unlink(1);
        assert_eq!(list.cycle_len(head), 3);
    }

    #[test]
    fn reverse_flips_direction() {
        let mut list = NodeList::new();
        let head = list.push_loop([(0, 0), (1, 1), (2, 2), (3, 3)]);
        list.reverse(head);
        assert_eq!(points_of(&list, head), vec![0, 3, 2, 1]);
        list.reverse(head);
        assert_eq!(points_of(&list, head), vec![0, 1, 2, 3]);
    }

    #[test]
    fn rotate_links_merges_two_loops() {
        let mut list = NodeList::new();
        let a = list.push_loop([(0, 0), (1, 1), (2, 2)]);
        let b = list.push_loop([(0, 3), (5, 4), (6, 5)]);
        list.rotate_links(a, b);
        assert_eq!(points_of(&list, a), vec![0, 5, 6, 0, 1, 2]);
    }

    #[test]
    fn split_splice_splits_one_loop() {
        let mut list = NodeList::new();
        let head = list.push_loop([(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
        // diagonal 0-2
        let a2 = list.make_node(0, 0);
        list.insert_after(0, a2);
        let b2 = list.make_node(2, 2);
        list.insert_after(2, b2);
        list.split_splice(0, a2, 2, b2);
        assert_eq!(points_of(&list, head), vec![0, 2, 3, 4]);
        assert_eq!(points_of(&list, 2), vec![2, 0, 1]);
    }

    #[test]
    fn angle_classes_are_ordered() {
        assert!(Angle::Full < Angle::Reflex);
        assert!(Angle::Convex < Angle::Spike);
        assert!(Angle::Spike.is_convex() && Angle::Convex.is_convex());
        assert!(Angle::Full.is_reflex() && !Angle::Straight.is_reflex());
    }
}
