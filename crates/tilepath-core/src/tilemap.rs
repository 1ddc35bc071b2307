//! A dense rectangular tile store.
//!
//! [`TileMap`] owns one value per cell of its [`Range`], stored row-major.
//! Maps can be filled programmatically or parsed from ASCII art, one
//! character per tile:
//!
//! ```
//! use tilepath_core::{Point, TileMap};
//!
//! let map = TileMap::parse("..#\n...", |ch| match ch {
//!     '.' => Some(false),
//!     '#' => Some(true),
//!     _ => None,
//! })
//! .unwrap();
//! assert_eq!(map.get(Point::new(2, 0)), Some(&true));
//! ```

use std::ops::{Index, IndexMut};

use thiserror::Error;

use crate::geom::{Point, Range};

/// A rectangular grid with one `T` per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTileMap<T>")
)]
pub struct TileMap<T> {
    range: Range,
    cells: Vec<T>,
}

impl<T: Clone> TileMap<T> {
    /// Create a `width` × `height` map anchored at the origin, every cell
    /// set to `fill`.
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        Self::with_range(Range::sized(width, height), fill)
    }

    /// Create a map covering `range`, every cell set to `fill`.
    pub fn with_range(range: Range, fill: T) -> Self {
        Self {
            range,
            cells: vec![fill; range.len()],
        }
    }

    /// Set every cell to `tile`.
    pub fn fill(&mut self, tile: T) {
        self.cells.fill(tile);
    }
}

impl<T> TileMap<T> {
    /// Create a map covering `range`, each cell computed from its position.
    pub fn from_fn(range: Range, mut f: impl FnMut(Point) -> T) -> Self {
        Self {
            range,
            cells: range.iter().map(&mut f).collect(),
        }
    }

    /// Parse a map from text, one line per row and one character per tile.
    ///
    /// Leading and trailing blank lines are ignored, as is trailing
    /// whitespace on each line. Every row must have the same width. `glyph`
    /// maps a character to a tile, returning `None` for characters that
    /// are not part of the legend.
    pub fn parse(s: &str, mut glyph: impl FnMut(char) -> Option<T>) -> Result<Self, ParseError> {
        let rows: Vec<&str> = s
            .trim_matches('\n')
            .lines()
            .map(str::trim_end)
            .collect();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(ParseError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ParseError::InconsistentWidth {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let tile = glyph(ch).ok_or(ParseError::UnknownGlyph {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                cells.push(tile);
            }
        }

        Ok(Self {
            range: Range::sized(width as i32, rows.len() as i32),
            cells,
        })
    }

    /// The rectangle covered by this map.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Width of the map.
    #[inline]
    pub fn width(&self) -> i32 {
        self.range.width()
    }

    /// Height of the map.
    #[inline]
    pub fn height(&self) -> i32 {
        self.range.height()
    }

    /// Whether `p` is a cell of the map.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range.contains(p)
    }

    /// The tile at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&T> {
        self.range.index_of(p).map(|i| &self.cells[i])
    }

    /// Mutable access to the tile at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        let i = self.range.index_of(p)?;
        Some(&mut self.cells[i])
    }

    /// Replace the tile at `p`. Returns the previous tile, or `None` (and
    /// drops `tile`) if `p` is out of bounds.
    pub fn set(&mut self, p: Point, tile: T) -> Option<T> {
        let slot = self.get_mut(p)?;
        Some(std::mem::replace(slot, tile))
    }

    /// Iterate over every position and its tile, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.range.iter().zip(self.cells.iter())
    }
}

impl<T> Index<Point> for TileMap<T> {
    type Output = T;

    /// Panics if `p` is outside the map.
    fn index(&self, p: Point) -> &T {
        match self.range.index_of(p) {
            Some(i) => &self.cells[i],
            None => panic!("tile {p} is outside the map {}", self.range),
        }
    }
}

impl<T> IndexMut<Point> for TileMap<T> {
    fn index_mut(&mut self, p: Point) -> &mut T {
        let range = self.range;
        match range.index_of(p) {
            Some(i) => &mut self.cells[i],
            None => panic!("tile {p} is outside the map {range}"),
        }
    }
}

/// Wire form of a [`TileMap`], checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTileMap<T> {
    range: Range,
    cells: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawTileMap<T>> for TileMap<T> {
    type Error = String;

    fn try_from(raw: RawTileMap<T>) -> Result<Self, String> {
        if raw.cells.len() != raw.range.len() {
            return Err(format!(
                "tile map {} needs {} cells, found {}",
                raw.range,
                raw.range.len(),
                raw.cells.len()
            ));
        }
        Ok(Self {
            range: raw.range,
            cells: raw.cells,
        })
    }
}

/// Errors that can occur when parsing a [`TileMap`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input has no tiles.
    #[error("tile map is empty")]
    Empty,
    /// A row is wider or narrower than the first one.
    #[error("tile map row {row} has width {found}, expected {expected}")]
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character is not part of the legend.
    #[error("unknown tile glyph \u{201c}{ch}\u{201d} at {pos}")]
    UnknownGlyph { ch: char, pos: Point },
}
