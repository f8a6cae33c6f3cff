// Copyright 2025 Lars Brubaker
// Ear classification and the clipping driver.

use tracing::debug;

use super::{ChainState, TriangulationContext};
use crate::ear_queue::{EarEntry, EarOrder};
use crate::error::Diagnostic;
use crate::list::{Angle, NodeId, INVALID};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum ClipOutcome {
    /// An ear was clipped; true if that finished the chain.
    Clipped(bool),
    /// No candidate left in the queue.
    Empty,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum Ladder {
    CrossOver,
    Split,
    LastResort,
}

impl TriangulationContext<'_> {
    /// Change a node's angle class, keeping the reflex set in step.
    pub(super) fn set_node_angle(&mut self, n: NodeId, angle: Angle) {
        let was = self.nodes.angle(n).is_reflex();
        let now = angle.is_reflex();
        if was && !now {
            self.reflex.remove(n);
        } else if !was && now {
            self.reflex.insert(n);
        }
        self.nodes.set_angle(n, angle);
    }

    /// Unlink a node from the chain being clipped.
    pub(super) fn delete_node(&mut self, n: NodeId) {
        if self.nodes.angle(n).is_reflex() {
            self.reflex.remove(n);
        }
        if self.first_node == n {
            self.first_node = self.nodes.next(n);
        }
        self.nodes.unlink(n);
    }

    /// Is the corner at `ind2` an ear? Returns the queue entry if so.
    pub(super) fn is_ear(&self, ind2: NodeId) -> Option<EarEntry> {
        let ind3 = self.nodes.next(ind2);
        let ind4 = self.nodes.next(ind3);
        let ind1 = self.nodes.prev(ind2);
        let ind0 = self.nodes.prev(ind1);
        let (i0, i1, i2, i3, i4) = (
            self.point_of(ind0),
            self.point_of(ind1),
            self.point_of(ind2),
            self.point_of(ind3),
            self.point_of(ind4),
        );
        let entry = |ratio| EarEntry {
            ratio,
            apex: ind2,
            prev: ind1,
            next: ind3,
        };

        // not a simple polygon here; clipping is the only way forward
        if i1 == i3 || i1 == i2 || i2 == i3 || self.nodes.angle(ind2) == Angle::Spike {
            return Some(entry(0.0));
        }
        if i0 == i3 {
            let reflex = self.nodes.angle(ind0).is_reflex() || self.nodes.angle(ind3).is_reflex();
            return reflex.then(|| entry(0.0));
        }
        if i1 == i4 {
            let reflex = self.nodes.angle(ind1).is_reflex() || self.nodes.angle(ind4).is_reflex();
            return reflex.then(|| entry(0.0));
        }

        let preds = self.preds();
        if !preds.is_in_cone(i0, i1, i2, i3, self.nodes.angle(ind1).is_convex()) {
            return None;
        }
        if !preds.is_in_cone(i2, i3, i4, i1, self.nodes.angle(ind3).is_convex()) {
            return None;
        }

        let mut bb = self.bbox(i1, i3);
        if self.triangle_contains_reflex(ind2, ind3, ind1, &mut bb) {
            return None;
        }

        let ratio = if self.queue.order() == EarOrder::QualitySorted {
            preds.ratio(i1, i3, i2)
        } else {
            1.0
        };
        Some(entry(ratio))
    }

    /// Refill the queue with every ear of the chain.
    pub(super) fn classify_ears(&mut self, head: NodeId) {
        self.queue.reset();
        let mut n = head;
        loop {
            if self.nodes.angle(n).is_convex() {
                if let Some(e) = self.is_ear(n) {
                    self.queue.dump(e);
                }
            }
            n = self.nodes.next(n);
            if n == head {
                break;
            }
        }
        self.queue.init();
    }

    /// Pop the best live ear and clip it.
    pub(super) fn clip_ear(&mut self) -> ClipOutcome {
        let ear = loop {
            let Some(e) = self.queue.pop(&mut *self.rng) else {
                return ClipOutcome::Empty;
            };
            if self.nodes.is_live(e.apex)
                && self.nodes.prev(e.apex) == e.prev
                && self.nodes.next(e.apex) == e.next
            {
                break e;
            }
        };
        let (ind1, ind2, ind3) = (ear.prev, ear.apex, ear.next);

        self.delete_node(ind2);
        self.store_triangle(ind1, ind2, ind3);

        let ind0 = self.nodes.prev(ind1);
        if ind0 == ind3 {
            return ClipOutcome::Clipped(true);
        }
        let ind4 = self.nodes.next(ind3);
        if ind0 == ind4 {
            // one triangle left
            self.store_triangle(ind1, ind3, ind4);
            return ClipOutcome::Clipped(true);
        }

        let angle1 = self.angle_at(ind1);
        let angle3 = self.angle_at(ind3);
        self.set_node_angle(ind1, angle1);
        self.set_node_angle(ind3, angle3);

        for n in [ind1, ind3] {
            if self.nodes.angle(n).is_convex() {
                if let Some(e) = self.is_ear(n) {
                    self.queue.insert(e);
                }
            }
        }
        ClipOutcome::Clipped(false)
    }

    /// Make `head` the current chain: classify its angles, reflex set and
    /// ears.
    pub(super) fn start_chain(&mut self, head: NodeId) -> ChainState {
        self.first_node = head;
        self.queue.reset();
        match self.nodes.cycle_len(head) {
            0..=2 => return ChainState::Done,
            3 => return ChainState::LastTriangle,
            _ => {}
        }
        self.classify_angles(head);
        self.collect_reflex(head);
        self.classify_ears(head);
        ChainState::Active
    }

    /// Triangulate the (bridged) loop through `head`, including any chains
    /// split off along the way.
    pub(super) fn clip_face(&mut self, head: NodeId) {
        let nodes = self.nodes.cycle_len(head);
        self.step_limit = self.config.max_steps.unwrap_or(16 * nodes + 64);
        self.steps = 0;
        self.chains.clear();
        self.chains.push(head);

        while let Some(chain) = self.chains.pop() {
            if !self.clip_chain(chain) {
                let steps = self.steps;
                self.report(Diagnostic::StepLimitReached {
                    face: self.face,
                    steps,
                });
                let rest = std::mem::take(&mut self.chains);
                self.fan_clip(self.first_node);
                for chain in rest {
                    self.fan_clip(chain);
                }
                return;
            }
        }
    }

    /// Run the state machine on one chain. Returns false if the step limit
    /// stopped it.
    fn clip_chain(&mut self, head: NodeId) -> bool {
        let mut state = self.start_chain(head);
        let mut reclassified = false;
        loop {
            match state {
                ChainState::Done => return true,
                ChainState::LastTriangle => {
                    let a = self.first_node;
                    let b = self.nodes.next(a);
                    let c = self.nodes.next(b);
                    self.store_triangle(a, b, c);
                    return true;
                }
                ChainState::Active => {}
            }

            self.steps += 1;
            if self.steps > self.step_limit {
                return false;
            }

            match self.clip_ear() {
                ClipOutcome::Clipped(true) => state = ChainState::Done,
                ClipOutcome::Clipped(false) => reclassified = false,
                ClipOutcome::Empty if !reclassified => {
                    reclassified = true;
                    state = self.start_chain(self.first_node);
                }
                ClipOutcome::Empty => {
                    if !self.troubled {
                        self.troubled = true;
                        self.report(Diagnostic::SelfIntersectingLoop { face: self.face });
                    }
                    match self.desperate() {
                        Ladder::CrossOver => reclassified = false,
                        Ladder::Split => return true,
                        Ladder::LastResort => {}
                    }
                }
            }
        }
    }

    /// Emit the chain through `head` as a fan around its head.
    pub(super) fn fan_clip(&mut self, head: NodeId) {
        if head == INVALID || !self.nodes.is_live(head) {
            return;
        }
        let ring: Vec<NodeId> = self.nodes.cycle(head).collect();
        debug!(face = self.face, nodes = ring.len(), "fan-clipping chain");
        for w in ring[1..].windows(2) {
            self.store_triangle(ring[0], w[0], w[1]);
        }
    }
}
