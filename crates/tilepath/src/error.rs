use std::fmt;

use thiserror::Error;
use tilepath_core::{Point, Range};

/// Which end of a path request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Errors returned by a path request.
///
/// An unreachable target is not an error; it is reported as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// An endpoint lies outside the grid. Callers must clamp or snap it
    /// before searching.
    #[error("{endpoint} {point} is outside the grid {range}")]
    OutOfBounds {
        endpoint: Endpoint,
        point: Point,
        range: Range,
    },
    /// The configured expansion budget ran out before the search settled.
    #[error("search gave up after expanding {expanded} nodes")]
    BudgetExhausted { expanded: usize },
}
