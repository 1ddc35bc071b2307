//! Per-search bookkeeping for each touched cell.
//!
//! Nodes live in a [`NodeArena`] and refer to each other by [`NodeId`], so
//! the predecessor links form a tree rooted at the start node and all nodes
//! are dropped together when the search returns.

use std::ops::{Index, IndexMut};

use tilepath_core::Point;

/// Handle of a node in its [`NodeArena`]. Handles are handed out in
/// creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(usize);

/// Slot value of a node that is not in the open queue.
pub(crate) const NO_SLOT: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Open,
    Closed,
}

#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub(crate) pos: Point,
    /// Cost of the cheapest known route from the start.
    pub(crate) g: f64,
    /// Estimated remaining cost, fixed at creation.
    pub(crate) h: f64,
    /// Agent's traversal cost of this tile.
    pub(crate) tile_cost: f64,
    pub(crate) parent: Option<NodeId>,
    pub(crate) status: Status,
    /// Position in the open queue, or [`NO_SLOT`].
    pub(crate) slot: usize,
}

impl SearchNode {
    /// The seed node of a search.
    pub(crate) fn start(pos: Point, h: f64, tile_cost: f64) -> Self {
        Self {
            pos,
            g: 0.0,
            h,
            tile_cost,
            parent: None,
            status: Status::Open,
            slot: NO_SLOT,
        }
    }

    /// A frontier node first reached from `parent`.
    pub(crate) fn reached(pos: Point, g: f64, h: f64, tile_cost: f64, parent: NodeId) -> Self {
        Self {
            pos,
            g,
            h,
            tile_cost,
            parent: Some(parent),
            status: Status::Open,
            slot: NO_SLOT,
        }
    }

    /// A node for a tile the agent cannot pass. It starts closed and is
    /// never queued.
    pub(crate) fn blocked(pos: Point, g: f64, h: f64, tile_cost: f64, parent: NodeId) -> Self {
        Self {
            status: Status::Closed,
            ..Self::reached(pos, g, h, tile_cost, parent)
        }
    }

    /// Queue key: `g + h`.
    #[inline]
    pub(crate) fn priority(&self) -> f64 {
        self.g + self.h
    }

    #[inline]
    pub(crate) fn is_closed(&self) -> bool {
        self.status == Status::Closed
    }

    /// Record a route of cost `g` through `parent` if it is strictly
    /// cheaper than the current one. Returns whether the node changed.
    pub(crate) fn relax(&mut self, g: f64, parent: NodeId) -> bool {
        debug_assert_eq!(self.status, Status::Open, "relaxing a closed node");
        if g < self.g {
            self.g = g;
            self.parent = Some(parent);
            true
        } else {
            false
        }
    }

    pub(crate) fn close(&mut self) {
        debug_assert_eq!(self.status, Status::Open, "node closed twice");
        self.status = Status::Closed;
    }
}

/// Owner of every node created during one search.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Positions from the start node to `id`, following predecessors.
    pub(crate) fn trace_back(&self, id: NodeId) -> Vec<Point> {
        let mut steps = Vec::new();
        let mut cur = Some(id);
        while let Some(i) = cur {
            let node = &self[i];
            steps.push(node.pos);
            cur = node.parent;
        }
        steps.reverse();
        steps
    }
}

impl Index<NodeId> for NodeArena {
    type Output = SearchNode;

    #[inline]
    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for NodeArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }
}
