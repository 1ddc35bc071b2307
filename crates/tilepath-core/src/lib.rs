//! **tilepath-core** — geometry and tile storage shared by the *tilepath*
//! crates.
//!
//! This crate provides integer grid coordinates ([`Point`]), half-open
//! rectangles ([`Range`]) and a dense rectangular tile store ([`TileMap`])
//! that can be built programmatically or parsed from ASCII art.

pub mod geom;
pub mod tilemap;

pub use geom::{Point, Range, RangeIter};
pub use tilemap::{ParseError, TileMap};
