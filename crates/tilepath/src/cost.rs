use std::f64::consts::FRAC_1_SQRT_2;

use tilepath_core::Point;

use crate::traits::{Agent, TileGrid};

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    dx.hypot(dy)
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Half the length of the step between adjacent tiles: `0.5` orthogonally,
/// `√2/2` diagonally.
#[inline]
pub fn half_step(a: Point, b: Point) -> f64 {
    if a.is_diagonal_to(b) { FRAC_1_SQRT_2 } else { 0.5 }
}

/// Cost of stepping from `a` to adjacent `b`, paying half the step on each
/// tile at that tile's traversal cost.
#[inline]
pub fn step_cost(a: Point, cost_a: f64, b: Point, cost_b: f64) -> f64 {
    let half = half_step(a, b);
    half * cost_a + half * cost_b
}

/// Total cost for `agent` of walking `steps`, a sequence of adjacent cells
/// inside `grid`.
pub fn route_cost<G, A>(grid: &G, agent: &A, steps: &[Point]) -> f64
where
    G: TileGrid + ?Sized,
    A: Agent<G::Tile> + ?Sized,
{
    steps
        .windows(2)
        .map(|w| {
            let ca = agent.traversal_cost(&grid.tile(w[0]));
            let cb = agent.traversal_cost(&grid.tile(w[1]));
            step_cost(w[0], ca, w[1], cb)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    #[test]
    fn distances() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert!((euclidean(a, b) - 5.0).abs() < 1e-12);
        assert_eq!(chebyshev(a, b), 4);
        assert_eq!(euclidean(b, b), 0.0);
    }

    #[test]
    fn step_costs_average_both_tiles() {
        let o = Point::new(2, 2);
        assert_eq!(step_cost(o, 1.0, Point::new(3, 2), 1.0), 1.0);
        assert_eq!(step_cost(o, 1.0, Point::new(2, 1), 3.0), 2.0);
        assert!((step_cost(o, 1.0, Point::new(3, 3), 1.0) - SQRT_2).abs() < 1e-12);
        assert!((step_cost(o, 2.0, Point::new(1, 1), 4.0) - 3.0 * SQRT_2).abs() < 1e-12);
    }
}
