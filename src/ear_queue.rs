// Copyright 2025 Lars Brubaker
// License: MIT
//
// Candidate-ear queue.
//
// Quality-sorted order is a two-phase queue:
//   Phase 1 (pre-init): dump() appends to a plain array.
//   Phase 2 (post-init): the array is sorted once and later inserts go into a
//   binary min-heap; pop() takes whichever of the two has the smaller ratio.
// Entries with ratio 0.0 bypass all of that and sit on a LIFO stack that is
// always drained first. Entries are never deleted in place; the driver drops
// stale ones when it pops them.

use std::collections::VecDeque;

use rand::{Rng, RngCore};

use crate::geom::Real;
use crate::list::NodeId;

/// How the driver picks the next ear among the queued candidates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum EarOrder {
    /// Smallest quality ratio first (best-shaped triangles).
    #[default]
    QualitySorted,
    /// First queued, first clipped.
    Sequential,
    /// Uniformly random among queued ears.
    Random,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EarEntry {
    pub ratio: Real,
    pub apex: NodeId,
    pub prev: NodeId,
    pub next: NodeId,
}

/// 1-based binary min-heap keyed on ratio. entries[0] is unused.
struct Heap {
    entries: Vec<EarEntry>,
}

impl Heap {
    fn new() -> Self {
        Heap { entries: Vec::new() }
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    fn size(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    #[inline]
    fn leq(&self, a: usize, b: usize) -> bool {
        self.entries[a].ratio <= self.entries[b].ratio
    }

    fn float_down(&mut self, mut curr: usize) {
        let size = self.size();
        loop {
            let mut child = curr << 1;
            if child > size {
                break;
            }
            if child < size && self.leq(child + 1, child) {
                child += 1;
            }
            if self.leq(curr, child) {
                break;
            }
            self.entries.swap(curr, child);
            curr = child;
        }
    }

    fn float_up(&mut self, mut curr: usize) {
        while curr > 1 {
            let parent = curr >> 1;
            if self.leq(parent, curr) {
                break;
            }
            self.entries.swap(curr, parent);
            curr = parent;
        }
    }

    fn insert(&mut self, entry: EarEntry) {
        if self.entries.is_empty() {
            // placeholder for slot 0
            self.entries.push(entry);
        }
        self.entries.push(entry);
        let curr = self.size();
        self.float_up(curr);
    }

    #[inline]
    fn minimum(&self) -> Option<&EarEntry> {
        self.entries.get(1)
    }

    fn extract_min(&mut self) -> Option<EarEntry> {
        let size = self.size();
        if size == 0 {
            return None;
        }
        self.entries.swap(1, size);
        let min = self.entries.pop();
        if self.size() > 1 {
            self.float_down(1);
        }
        min
    }
}

/// The ear queue for one chain.
pub struct EarQueue {
    order: EarOrder,
    /// Ratio-0 entries, most recent on top.
    zero: Vec<EarEntry>,
    /// Pre-init entries; after init(), sorted so the smallest ratio is last.
    sorted: Vec<EarEntry>,
    heap: Heap,
    fifo: VecDeque<EarEntry>,
    pool: Vec<EarEntry>,
    initialized: bool,
}

impl EarQueue {
    pub fn new(order: EarOrder) -> Self {
        EarQueue {
            order,
            zero: Vec::new(),
            sorted: Vec::new(),
            heap: Heap::new(),
            fifo: VecDeque::new(),
            pool: Vec::new(),
            initialized: false,
        }
    }

    pub fn order(&self) -> EarOrder {
        self.order
    }

    /// Empty the queue and return to the pre-init phase.
    pub fn reset(&mut self) {
        self.zero.clear();
        self.sorted.clear();
        self.heap.clear();
        self.fifo.clear();
        self.pool.clear();
        self.initialized = false;
    }

    /// Bulk insert during classification. Call init() once all ears are in.
    pub fn dump(&mut self, entry: EarEntry) {
        if self.initialized {
            self.insert(entry);
            return;
        }
        if entry.ratio == 0.0 {
            self.zero.push(entry);
            return;
        }
        match self.order {
            EarOrder::QualitySorted => self.sorted.push(entry),
            EarOrder::Sequential => self.fifo.push_back(entry),
            EarOrder::Random => self.pool.push(entry),
        }
    }

    pub fn init(&mut self) {
        if self.order == EarOrder::QualitySorted {
            // descending, so pops come off the end in ascending order
            self.sorted.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
        }
        self.initialized = true;
    }

    pub fn insert(&mut self, entry: EarEntry) {
        if !self.initialized {
            self.dump(entry);
            return;
        }
        if entry.ratio == 0.0 {
            self.zero.push(entry);
            return;
        }
        match self.order {
            EarOrder::QualitySorted => self.heap.insert(entry),
            EarOrder::Sequential => self.fifo.push_back(entry),
            EarOrder::Random => self.pool.push(entry),
        }
    }

    /// Remove the next candidate. `rng` is only consulted by EarOrder::Random.
    pub fn pop(&mut self, rng: &mut dyn RngCore) -> Option<EarEntry> {
        if let Some(entry) = self.zero.pop() {
            return Some(entry);
        }
        match self.order {
            EarOrder::QualitySorted => {
                let sort_min = self.sorted.last().map(|e| e.ratio);
                let heap_min = self.heap.minimum().map(|e| e.ratio);
                match (sort_min, heap_min) {
                    (Some(s), Some(h)) if h <= s => self.heap.extract_min(),
                    (Some(_), _) => self.sorted.pop(),
                    (None, _) => self.heap.extract_min(),
                }
            }
            EarOrder::Sequential => self.fifo.pop_front(),
            EarOrder::Random => {
                if self.pool.is_empty() {
                    return None;
                }
                let i = rng.random_range(0..self.pool.len());
                Some(self.pool.swap_remove(i))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.zero.len() + self.sorted.len() + self.heap.size() + self.fifo.len() + self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
