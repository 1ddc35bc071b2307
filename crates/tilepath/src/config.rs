use tilepath_core::Point;

use crate::cost::euclidean;

/// Estimate of the remaining cost used to order the search frontier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Straight-line distance. Admissible and consistent when every
    /// passable tile costs at least `1`.
    #[default]
    Euclidean,
    /// No estimate; the search degenerates to Dijkstra and stays optimal
    /// for any non-negative tile costs.
    Zero,
}

impl Heuristic {
    /// Estimated cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Point, to: Point) -> f64 {
        match self {
            Self::Euclidean => euclidean(from, to),
            Self::Zero => 0.0,
        }
    }
}

/// Tunables for a [`Pathfinder`](crate::Pathfinder).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub heuristic: Heuristic,
    /// Number of nodes to preallocate. When unset it is estimated from the
    /// distance between the endpoints.
    pub initial_capacity: Option<usize>,
    /// Give up after closing this many nodes. Unbounded when unset.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}
