//! The A* engine.

use log::{debug, trace, warn};
use tilepath_core::{Point, Range};

use crate::config::{Heuristic, SearchConfig};
use crate::cost::{chebyshev, step_cost};
use crate::error::{Endpoint, PathError};
use crate::node::{NodeArena, NodeId, SearchNode};
use crate::path::Path;
use crate::queue::IndexedQueue;
use crate::touched::{Touch, TouchedSet};
use crate::traits::{Agent, MobileAgent, TileGrid};

/// Counters describing one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the frontier and expanded.
    pub expanded: usize,
    /// Cells that received a node, blocked ones included.
    pub touched: usize,
}

/// Result of [`Pathfinder::search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The route, or `None` if the target cannot be reached.
    pub path: Option<Path>,
    pub stats: SearchStats,
}

/// Runs path requests with a fixed [`SearchConfig`].
///
/// A `Pathfinder` holds no per-search state: every call builds its own
/// node arena, touched-set and open queue and drops them on return.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pathfinder {
    config: SearchConfig,
}

impl Pathfinder {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Shortest path for `agent` from `start` to `target`.
    ///
    /// Returns `Ok(None)` if no path exists. Both endpoints must be inside
    /// the grid. The start tile is never checked for passability.
    pub fn find_path<G, A>(
        &self,
        grid: &G,
        agent: &A,
        start: Point,
        target: Point,
    ) -> Result<Option<Path>, PathError>
    where
        G: TileGrid + ?Sized,
        A: Agent<G::Tile> + ?Sized,
    {
        self.search(grid, agent, start, target).map(|o| o.path)
    }

    /// Shortest path for `agent` from its current position to `target`.
    pub fn find_path_to<G, A>(
        &self,
        grid: &G,
        agent: &A,
        target: Point,
    ) -> Result<Option<Path>, PathError>
    where
        G: TileGrid + ?Sized,
        A: MobileAgent<G::Tile> + ?Sized,
    {
        self.find_path(grid, agent, agent.position(), target)
    }

    /// Like [`find_path`](Self::find_path), also reporting search counters.
    pub fn search<G, A>(
        &self,
        grid: &G,
        agent: &A,
        start: Point,
        target: Point,
    ) -> Result<SearchOutcome, PathError>
    where
        G: TileGrid + ?Sized,
        A: Agent<G::Tile> + ?Sized,
    {
        let range = grid.range();
        check_inside(grid, range, Endpoint::Start, start)?;
        check_inside(grid, range, Endpoint::Target, target)?;

        let capacity = self.initial_capacity(range, start, target);
        let mut search = Search {
            grid,
            agent,
            target,
            heuristic: self.config.heuristic,
            nodes: NodeArena::with_capacity(capacity),
            touched: TouchedSet::new(range),
            open: IndexedQueue::with_capacity(capacity),
        };
        let outcome = search.run(start, self.config.max_expansions);

        match &outcome {
            Ok(o) => match &o.path {
                Some(path) => debug!(
                    "path {start} -> {target}: {} steps, cost {:.3}, expanded {}, touched {}",
                    path.len(),
                    path.cost(),
                    o.stats.expanded,
                    o.stats.touched
                ),
                None => debug!(
                    "no path {start} -> {target}: expanded {}, touched {}",
                    o.stats.expanded, o.stats.touched
                ),
            },
            Err(err) => warn!("path {start} -> {target}: {err}"),
        }
        outcome
    }

    /// Preallocation size: a band around the straight line between the
    /// endpoints, bounded by the grid size.
    fn initial_capacity(&self, range: Range, start: Point, target: Point) -> usize {
        self.config.initial_capacity.unwrap_or_else(|| {
            let span = chebyshev(start, target) as usize + 1;
            (span * 8).min(range.len())
        })
    }
}

/// Shortest path for `agent` from `start` to `target` with the default
/// [`SearchConfig`].
pub fn find_path<G, A>(
    grid: &G,
    agent: &A,
    start: Point,
    target: Point,
) -> Result<Option<Path>, PathError>
where
    G: TileGrid + ?Sized,
    A: Agent<G::Tile> + ?Sized,
{
    Pathfinder::default().find_path(grid, agent, start, target)
}

fn check_inside<G: TileGrid + ?Sized>(
    grid: &G,
    range: Range,
    endpoint: Endpoint,
    point: Point,
) -> Result<(), PathError> {
    if grid.is_inside(point) && range.contains(point) {
        Ok(())
    } else {
        Err(PathError::OutOfBounds {
            endpoint,
            point,
            range,
        })
    }
}

/// State of a single search.
struct Search<'a, G: ?Sized, A: ?Sized> {
    grid: &'a G,
    agent: &'a A,
    target: Point,
    heuristic: Heuristic,
    nodes: NodeArena,
    touched: TouchedSet,
    open: IndexedQueue,
}

impl<G, A> Search<'_, G, A>
where
    G: TileGrid + ?Sized,
    A: Agent<G::Tile> + ?Sized,
{
    fn run(&mut self, start: Point, budget: Option<usize>) -> Result<SearchOutcome, PathError> {
        let tile_cost = self.agent.traversal_cost(&self.grid.tile(start));
        let seed = self.nodes.push(SearchNode::start(
            start,
            self.heuristic.estimate(start, self.target),
            tile_cost,
        ));
        self.touched.insert(start, seed);
        self.open.push(&mut self.nodes, seed);

        let mut expanded = 0;
        while let Some(current) = self.open.pop(&mut self.nodes) {
            let node = &self.nodes[current];
            if node.pos == self.target {
                let path = Path::new(self.nodes.trace_back(current), node.g);
                return Ok(self.outcome(Some(path), expanded));
            }
            if budget.is_some_and(|limit| expanded >= limit) {
                return Err(PathError::BudgetExhausted { expanded });
            }

            self.nodes[current].close();
            expanded += 1;
            self.expand(current);
        }

        Ok(self.outcome(None, expanded))
    }

    fn outcome(&self, path: Option<Path>, expanded: usize) -> SearchOutcome {
        SearchOutcome {
            path,
            stats: SearchStats {
                expanded,
                touched: self.touched.len(),
            },
        }
    }

    /// Relax the Moore neighbourhood of the freshly closed node `current`.
    fn expand(&mut self, current: NodeId) {
        let here = self.nodes[current].pos;
        let g_here = self.nodes[current].g;
        let cost_here = self.nodes[current].tile_cost;
        trace!(
            "expand {here}: g {g_here:.3}, frontier {}",
            self.open.len()
        );

        for next in here.neighbors_8() {
            if !self.grid.is_inside(next) {
                continue;
            }
            match self.touched.get(next) {
                Touch::Outside => {}
                Touch::Fresh => {
                    let tile = self.grid.tile(next);
                    let tile_cost = self.agent.traversal_cost(&tile);
                    let g = g_here + step_cost(here, cost_here, next, tile_cost);
                    let h = self.heuristic.estimate(next, self.target);
                    if self.agent.can_pass(&tile) {
                        let id = self
                            .nodes
                            .push(SearchNode::reached(next, g, h, tile_cost, current));
                        self.touched.insert(next, id);
                        self.open.push(&mut self.nodes, id);
                    } else {
                        let id = self
                            .nodes
                            .push(SearchNode::blocked(next, g, h, tile_cost, current));
                        self.touched.insert(next, id);
                    }
                }
                Touch::Seen(id) => {
                    let node = &mut self.nodes[id];
                    if node.is_closed() {
                        continue;
                    }
                    let g = g_here + step_cost(here, cost_here, next, node.tile_cost);
                    if node.relax(g, current) {
                        trace!("relax {next}: g {g:.3} via {here}");
                        self.open.decrease_key(&mut self.nodes, id);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::route_cost;
    use std::f64::consts::SQRT_2;
    use tilepath_core::TileMap;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Terrain {
        Floor,
        Mud,
        Wall,
        Water,
    }

    fn terrain(ch: char) -> Option<Terrain> {
        match ch {
            '.' => Some(Terrain::Floor),
            '~' => Some(Terrain::Mud),
            '#' => Some(Terrain::Wall),
            'w' => Some(Terrain::Water),
            _ => None,
        }
    }

    struct Walker;

    impl Agent<Terrain> for Walker {
        fn can_pass(&self, tile: &Terrain) -> bool {
            matches!(tile, Terrain::Floor | Terrain::Mud)
        }

        fn traversal_cost(&self, tile: &Terrain) -> f64 {
            match tile {
                Terrain::Mud => 4.0,
                _ => 1.0,
            }
        }
    }

    struct Swimmer {
        at: Point,
    }

    impl Agent<Terrain> for Swimmer {
        fn can_pass(&self, tile: &Terrain) -> bool {
            *tile != Terrain::Wall
        }

        fn traversal_cost(&self, tile: &Terrain) -> f64 {
            match tile {
                Terrain::Water => 1.0,
                _ => 2.0,
            }
        }
    }

    impl MobileAgent<Terrain> for Swimmer {
        fn position(&self) -> Point {
            self.at
        }
    }

    fn map(s: &str) -> TileMap<Terrain> {
        TileMap::parse(s, terrain).unwrap()
    }

    fn open_5x5() -> TileMap<Terrain> {
        TileMap::new(5, 5, Terrain::Floor)
    }

    fn pts(list: &[(i32, i32)]) -> Vec<Point> {
        list.iter().map(|&p| Point::from(p)).collect()
    }

    #[test]
    fn start_equals_target() {
        let grid = open_5x5();
        let path = find_path(&grid, &Walker, Point::new(2, 2), Point::new(2, 2))
            .unwrap()
            .unwrap();
        assert_eq!(path.steps(), &[Point::new(2, 2)]);
        assert_eq!(path.cost(), 0.0);
    }

    #[test]
    fn diagonal_on_open_grid() {
        let grid = open_5x5();
        let path = find_path(&grid, &Walker, Point::new(0, 0), Point::new(2, 2))
            .unwrap()
            .unwrap();
        assert_eq!(path.steps(), pts(&[(0, 0), (1, 1), (2, 2)]));
        assert!((path.cost() - 2.0 * SQRT_2).abs() < 1e-9);
        assert_eq!(path.destination(), Point::new(2, 2));
    }

    #[test]
    fn detours_around_blocked_cell() {
        let mut grid = open_5x5();
        grid.set(Point::new(0, 1), Terrain::Wall);
        let outcome = Pathfinder::default()
            .search(&grid, &Walker, Point::new(0, 0), Point::new(0, 3))
            .unwrap();
        let path = outcome.path.unwrap();
        assert!((path.cost() - (1.0 + 2.0 * SQRT_2)).abs() < 1e-9);
        // Two routes cost the same; (1, 2) is discovered before (0, 2) in
        // clockwise order and has the lower key, so the target is reached
        // through it and never relaxed through (0, 2).
        assert_eq!(path.steps(), pts(&[(0, 0), (1, 1), (1, 2), (0, 3)]));
        assert_eq!(
            outcome.stats,
            SearchStats {
                expanded: 3,
                touched: 12
            }
        );
    }

    #[test]
    fn adjacent_endpoints() {
        let grid = map("
.~
..
");
        let path = find_path(&grid, &Walker, Point::new(0, 0), Point::new(1, 0))
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.cost(), step_cost(Point::new(0, 0), 1.0, Point::new(1, 0), 4.0));
    }

    #[test]
    fn enclosed_target_is_unreachable() {
        let grid = map("
.......
..###..
..#.#..
..###..
.......
");
        let outcome = Pathfinder::default()
            .search(&grid, &Walker, Point::new(0, 0), Point::new(3, 2))
            .unwrap();
        assert_eq!(outcome.path, None);
        // The whole outer ring of floor is explored before giving up.
        assert_eq!(outcome.stats.expanded, 35 - 9);
    }

    #[test]
    fn impassable_target_is_unreachable() {
        let grid = map("
...
..#
");
        let path = find_path(&grid, &Walker, Point::new(0, 0), Point::new(2, 1)).unwrap();
        assert!(path.is_none());
    }

    #[test]
    fn impassable_start_is_not_checked() {
        let grid = map("
#..
...
");
        let path = find_path(&grid, &Walker, Point::new(0, 0), Point::new(2, 0))
            .unwrap()
            .unwrap();
        assert_eq!(path.start(), Point::new(0, 0));
        assert_eq!(path.end(), Point::new(2, 0));
    }

    #[test]
    fn avoids_expensive_tiles() {
        let grid = map("
.~.
...
");
        let path = find_path(&grid, &Walker, Point::new(0, 0), Point::new(2, 0))
            .unwrap()
            .unwrap();
        assert_eq!(path.steps(), pts(&[(0, 0), (1, 1), (2, 0)]));
        assert!((path.cost() - 2.0 * SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn agents_see_different_routes() {
        let grid = map("
.......
.wwwww.
.......
");
        let start = Point::new(0, 1);
        let target = Point::new(6, 1);

        let walk = find_path(&grid, &Walker, start, target).unwrap().unwrap();
        assert!(walk.steps().iter().all(|p| p.y != 1 || p.x == 0 || p.x == 6));

        let swimmer = Swimmer { at: start };
        let swim = Pathfinder::default()
            .find_path_to(&grid, &swimmer, target)
            .unwrap()
            .unwrap();
        let straight: Vec<Point> = (0..7).map(|x| Point::new(x, 1)).collect();
        assert_eq!(swim.steps(), straight);
        assert!((swim.cost() - 7.0).abs() < 1e-9);
    }

    #[test]
    fn cost_matches_route() {
        let grid = map("
..~~....
.#~~.##.
.#...#~.
.####~~.
........
");
        let start = Point::new(0, 0);
        let target = Point::new(6, 2);
        let path = find_path(&grid, &Walker, start, target).unwrap().unwrap();
        let summed = route_cost(&grid, &Walker, path.steps());
        assert!((path.cost() - summed).abs() < 1e-9);
        for w in path.steps().windows(2) {
            assert!(w[0].is_adjacent(w[1]));
        }
    }

    #[test]
    fn same_request_same_route() {
        let grid = map("
.........
.~~~.~~~.
.........
.~~~.~~~.
.........
");
        let first = find_path(&grid, &Walker, Point::new(0, 0), Point::new(8, 4)).unwrap();
        for _ in 0..5 {
            let again = find_path(&grid, &Walker, Point::new(0, 0), Point::new(8, 4)).unwrap();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn out_of_bounds_endpoints_are_errors() {
        let grid = open_5x5();
        let err = find_path(&grid, &Walker, Point::new(0, 0), Point::new(5, 0)).unwrap_err();
        assert_eq!(
            err,
            PathError::OutOfBounds {
                endpoint: Endpoint::Target,
                point: Point::new(5, 0),
                range: grid.range(),
            }
        );
        let err = find_path(&grid, &Walker, Point::new(-1, 0), Point::new(1, 0)).unwrap_err();
        assert!(matches!(
            err,
            PathError::OutOfBounds {
                endpoint: Endpoint::Start,
                ..
            }
        ));
    }

    #[test]
    fn budget_stops_search() {
        let grid = TileMap::new(30, 30, Terrain::Floor);
        let finder = Pathfinder::new(SearchConfig::new().with_max_expansions(5));
        let err = finder
            .find_path(&grid, &Walker, Point::new(0, 0), Point::new(29, 29))
            .unwrap_err();
        assert_eq!(err, PathError::BudgetExhausted { expanded: 5 });

        let near = finder
            .find_path(&grid, &Walker, Point::new(0, 0), Point::new(1, 1))
            .unwrap();
        assert!(near.is_some());
    }

    #[test]
    fn zero_heuristic_finds_equal_cost() {
        let grid = map("
....~...
.##.~.#.
.#..~.#.
.#.##.#.
........
");
        let start = Point::new(0, 0);
        let target = Point::new(7, 4);
        let astar = find_path(&grid, &Walker, start, target).unwrap().unwrap();
        let dijkstra = Pathfinder::new(SearchConfig::new().with_heuristic(Heuristic::Zero))
            .search(&grid, &Walker, start, target)
            .unwrap();
        let dpath = dijkstra.path.unwrap();
        assert!((astar.cost() - dpath.cost()).abs() < 1e-9);
    }

    #[test]
    fn heuristic_reduces_work() {
        let grid = TileMap::new(40, 40, Terrain::Floor);
        let start = Point::new(0, 20);
        let target = Point::new(39, 20);
        let astar = Pathfinder::default()
            .search(&grid, &Walker, start, target)
            .unwrap();
        let dijkstra = Pathfinder::new(SearchConfig::new().with_heuristic(Heuristic::Zero))
            .search(&grid, &Walker, start, target)
            .unwrap();
        assert!(astar.stats.expanded < dijkstra.stats.expanded);
        assert_eq!(astar.path.unwrap().len(), 40);
    }

    #[test]
    fn explicit_capacity_is_only_a_hint() {
        let grid = TileMap::new(20, 20, Terrain::Floor);
        let finder = Pathfinder::new(SearchConfig::new().with_initial_capacity(1));
        assert_eq!(finder.config().initial_capacity, Some(1));
        let path = finder
            .find_path(&grid, &Walker, Point::new(0, 0), Point::new(19, 7))
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 20);
    }
}
