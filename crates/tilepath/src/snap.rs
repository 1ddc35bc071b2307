use tilepath_core::Point;

use crate::cost::euclidean;
use crate::traits::{Agent, TileGrid};

/// The cell closest to `p` that `agent` can pass, for callers that need to
/// retarget a request whose target is blocked, occupied or off the map.
///
/// Cells are scanned in growing square rings around `p` (clamped into the
/// grid first) until no later ring can hold a closer cell. Distance is
/// Euclidean; ties go to the inner ring, then to the first cell in
/// row-major order. Returns `None` if the agent can pass no cell of the
/// grid.
pub fn nearest_passable<G, A>(grid: &G, agent: &A, p: Point) -> Option<Point>
where
    G: TileGrid + ?Sized,
    A: Agent<G::Tile> + ?Sized,
{
    let range = grid.range();
    if range.is_empty() {
        return None;
    }
    let center = range.clamp(p);
    let passable = |q: Point| grid.is_inside(q) && agent.can_pass(&grid.tile(q));

    if passable(center) {
        return Some(center);
    }

    // Every cell of ring `r` is at least `r` away from `center`, and at
    // least as far from `p` since `center` is `p` clamped.
    let max_radius = range.width().max(range.height());
    let mut best: Option<(f64, Point)> = None;
    for r in 1..=max_radius {
        if best.is_some_and(|(bd, _)| f64::from(r) >= bd) {
            break;
        }
        for dy in -r..=r {
            let on_edge = dy == -r || dy == r;
            let step = if on_edge { 1 } else { 2 * r };
            let mut dx = -r;
            while dx <= r {
                let q = center.shift(dx, dy);
                if range.contains(q) && passable(q) {
                    let d = euclidean(p, q);
                    if best.is_none_or(|(bd, _)| d < bd) {
                        best = Some((d, q));
                    }
                }
                dx += step;
            }
        }
    }
    best.map(|(_, q)| q)
}
