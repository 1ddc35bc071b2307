use tilepath_core::{Point, Range, TileMap};

/// The map being searched.
///
/// The grid must not change while a search is running.
pub trait TileGrid {
    /// Tile value handed to the [`Agent`].
    type Tile;

    /// Bounding rectangle of the grid. Every cell for which
    /// [`is_inside`](Self::is_inside) holds must lie within it.
    fn range(&self) -> Range;

    /// Whether `p` is a cell of the grid.
    fn is_inside(&self, p: Point) -> bool {
        self.range().contains(p)
    }

    /// The tile at `p`. Only called for points that are inside the grid.
    fn tile(&self, p: Point) -> Self::Tile;
}

/// The unit a path is computed for.
pub trait Agent<T: ?Sized> {
    /// Whether the agent may ever occupy `tile`.
    fn can_pass(&self, tile: &T) -> bool;

    /// Time cost per unit distance for crossing `tile`. Must be `>= 0`.
    ///
    /// Higher values make the tile more expensive; the value is never
    /// inverted.
    fn traversal_cost(&self, tile: &T) -> f64;
}

/// An agent placed on the grid, used as the default search start.
pub trait MobileAgent<T: ?Sized>: Agent<T> {
    /// The cell the agent currently occupies.
    fn position(&self) -> Point;
}

impl<T: Clone> TileGrid for TileMap<T> {
    type Tile = T;

    fn range(&self) -> Range {
        TileMap::range(self)
    }

    fn tile(&self, p: Point) -> T {
        self[p].clone()
    }
}
