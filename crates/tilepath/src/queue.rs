//! Open list of the search: a binary min-heap of node handles with
//! decrease-key.
//!
//! Each queued node stores its heap position in `SearchNode::slot`, so
//! a node whose cost dropped can be sifted up in place instead of being
//! searched for. Nodes are ordered by priority, then by creation order, so
//! equal priorities leave the queue first-in first-out.

use std::cmp::Ordering;

use crate::node::{NO_SLOT, NodeArena, NodeId};

#[derive(Debug, Default)]
pub(crate) struct IndexedQueue {
    heap: Vec<NodeId>,
}

// Heap 101
//
//              0
//        1           2
//     3     4     5     6
//
//   - Up: (i-1)/2
//   - Left: 2i+1
//   - Right: 2i+2
#[inline]
fn up(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
fn left(i: usize) -> usize {
    2 * i + 1
}

impl IndexedQueue {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Queue `id`, which must not be queued already.
    pub(crate) fn push(&mut self, nodes: &mut NodeArena, id: NodeId) {
        debug_assert_eq!(nodes[id].slot, NO_SLOT, "node queued twice");
        if self.heap.len() == self.heap.capacity() {
            log::trace!("open queue growing past {} entries", self.heap.capacity());
        }
        let slot = self.heap.len();
        self.heap.push(id);
        nodes[id].slot = slot;
        self.sift_up(nodes, slot);
        self.verify(nodes);
    }

    /// Remove and return the node with the lowest priority.
    pub(crate) fn pop(&mut self, nodes: &mut NodeArena) -> Option<NodeId> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(nodes, 0, last);
        let id = self.heap.pop()?;
        nodes[id].slot = NO_SLOT;
        if !self.heap.is_empty() {
            self.sift_down(nodes, 0);
        }
        self.verify(nodes);
        Some(id)
    }

    /// Restore heap order after the priority of queued node `id` dropped.
    pub(crate) fn decrease_key(&mut self, nodes: &mut NodeArena, id: NodeId) {
        let slot = nodes[id].slot;
        debug_assert!(slot < self.heap.len(), "decrease_key on unqueued node");
        debug_assert_eq!(self.heap[slot], id, "node slot out of sync");
        self.sift_up(nodes, slot);
        self.verify(nodes);
    }

    fn less(nodes: &NodeArena, a: NodeId, b: NodeId) -> bool {
        nodes[a]
            .priority()
            .total_cmp(&nodes[b].priority())
            .then(a.cmp(&b))
            == Ordering::Less
    }

    fn sift_up(&mut self, nodes: &mut NodeArena, mut pos: usize) {
        while pos > 0 {
            let parent = up(pos);
            if !Self::less(nodes, self.heap[pos], self.heap[parent]) {
                break;
            }
            self.swap(nodes, parent, pos);
            pos = parent;
        }
    }

    fn sift_down(&mut self, nodes: &mut NodeArena, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let mut best = pos;
            let l = left(pos);
            let r = l + 1;
            if l < len && Self::less(nodes, self.heap[l], self.heap[best]) {
                best = l;
            }
            if r < len && Self::less(nodes, self.heap[r], self.heap[best]) {
                best = r;
            }
            if best == pos {
                break;
            }
            self.swap(nodes, pos, best);
            pos = best;
        }
    }

    /// Swap two heap positions, keeping node slots in sync.
    #[inline]
    fn swap(&mut self, nodes: &mut NodeArena, a: usize, b: usize) {
        self.heap.swap(a, b);
        nodes[self.heap[a]].slot = a;
        nodes[self.heap[b]].slot = b;
    }

    #[cfg(not(test))]
    #[inline(always)]
    fn verify(&self, _nodes: &NodeArena) {}

    #[cfg(test)]
    fn verify(&self, nodes: &NodeArena) {
        for (i, &id) in self.heap.iter().enumerate() {
            assert_eq!(nodes[id].slot, i, "slot of {id:?} out of sync");
            if i > 0 {
                assert!(
                    !Self::less(nodes, id, self.heap[up(i)]),
                    "heap order broken at {i}"
                );
            }
        }
    }
}
