//! Agent-aware A* pathfinding on rectangular tile grids.
//!
//! A search runs over an 8-connected grid supplied through [`TileGrid`],
//! asking the moving [`Agent`] which tiles it may enter and what each tile
//! costs it. Different agents can therefore get different routes across the
//! same map.
//!
//! - [`Pathfinder::find_path`] searches between two explicit cells.
//! - [`Pathfinder::find_path_to`] starts from a [`MobileAgent`]'s position.
//! - [`Pathfinder::search`] also reports [`SearchStats`].
//! - [`find_path`] runs a search with the default [`SearchConfig`].
//!
//! A successful search yields a [`Path`], which the movement code walks one
//! tile at a time with [`Path::advance`] and [`Path::current`].
//!
//! # Cost model
//!
//! [`Agent::traversal_cost`] is a time cost per unit distance. Moving
//! between adjacent tiles `a` and `b` costs half a step on each tile:
//!
//! ```text
//! step = d/2 * cost(a) + d/2 * cost(b)     d = 1 orthogonal, √2 diagonal
//! ```
//!
//! The default Euclidean heuristic never overestimates as long as every
//! passable tile costs the agent at least `1`. Agents with cheaper tiles
//! should search with [`Heuristic::Zero`] to keep routes optimal.

mod config;
mod cost;
mod error;
mod node;
mod path;
mod queue;
mod search;
mod snap;
mod touched;
mod traits;

pub use config::{Heuristic, SearchConfig};
pub use cost::{chebyshev, euclidean, half_step, route_cost, step_cost};
pub use error::{Endpoint, PathError};
pub use path::Path;
pub use search::{Pathfinder, SearchOutcome, SearchStats, find_path};
pub use snap::nearest_passable;
pub use traits::{Agent, MobileAgent, TileGrid};

pub use tilepath_core::{Point, Range, TileMap};
