use tilepath_core::{Point, Range};

use crate::node::NodeId;

/// What the touched-set knows about a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Touch {
    /// Outside the tracked rectangle.
    Outside,
    /// Not reached yet in this search.
    Fresh,
    /// Already owns a node.
    Seen(NodeId),
}

/// Dense map from cells of a [`Range`] to their search node, guaranteeing at
/// most one node per cell.
#[derive(Debug)]
pub(crate) struct TouchedSet {
    range: Range,
    slots: Vec<Option<NodeId>>,
    count: usize,
}

impl TouchedSet {
    pub(crate) fn new(range: Range) -> Self {
        Self {
            range,
            slots: vec![None; range.len()],
            count: 0,
        }
    }

    #[inline]
    pub(crate) fn get(&self, p: Point) -> Touch {
        match self.range.index_of(p) {
            None => Touch::Outside,
            Some(i) => match self.slots[i] {
                None => Touch::Fresh,
                Some(id) => Touch::Seen(id),
            },
        }
    }

    /// Bind `p` to `id`. `p` must be inside the range and still fresh.
    pub(crate) fn insert(&mut self, p: Point, id: NodeId) {
        debug_assert!(self.range.contains(p), "touched {p} outside {}", self.range);
        let Some(i) = self.range.index_of(p) else {
            return;
        };
        debug_assert!(self.slots[i].is_none(), "{p} touched twice");
        self.slots[i] = Some(id);
        self.count += 1;
    }

    /// Number of touched cells.
    pub(crate) fn len(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeArena, SearchNode};

    #[test]
    fn tracks_cells_once() {
        let mut arena = NodeArena::default();
        let id = arena.push(SearchNode::start(Point::new(2, 3), 0.0, 1.0));

        let mut touched = TouchedSet::new(Range::new(1, 1, 4, 4));
        assert_eq!(touched.get(Point::new(2, 3)), Touch::Fresh);
        touched.insert(Point::new(2, 3), id);
        assert_eq!(touched.get(Point::new(2, 3)), Touch::Seen(id));
        assert_eq!(touched.get(Point::new(3, 3)), Touch::Fresh);
        assert_eq!(touched.get(Point::new(0, 0)), Touch::Outside);
        assert_eq!(touched.get(Point::new(4, 1)), Touch::Outside);
        assert_eq!(touched.len(), 1);
    }
}
