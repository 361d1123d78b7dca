//! Priority-queue search over the tile grid.
//!
//! [`Pathfinder::area`] computes every cell reachable within a cost budget
//! (plain Dijkstra). [`Pathfinder::path`] adds a Manhattan-distance heuristic
//! and stops as soon as the goal is first discovered, which is not guaranteed
//! to be the cheapest route when diagonal moves are mixed in.
//!
//! Nodes live in an arena owned by the [`SearchResult`]; back-pointers are
//! arena indices.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::field::TileGrid;
use crate::point::{Point, ADJACENT, DIAGONALS};
use crate::tilemap::Tilemap;

/// Cost of one cardinal step.
pub const CARDINAL_COST: f32 = 1.0;
/// Cost of one diagonal step.
pub const DIAGONAL_COST: f32 = 1.5;

/// A visited cell and the best known way to reach it.
#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    pub coord: Point,
    /// Accumulated movement cost from the start
    pub cost: f32,
    /// Number of moves from the start
    pub steps: u32,
    /// Arena index of the node this one was reached from
    pub previous: Option<usize>,
}

/// Visited set produced by one search call.
#[derive(Clone, Debug)]
pub struct SearchResult {
    nodes: Vec<PathNode>,
    index: Tilemap<Option<usize>>,
    goal: Option<usize>,
}

impl SearchResult {
    fn new(grid: &TileGrid, from: Point) -> Self {
        let mut index = Tilemap::new_with(grid.columns(), grid.rows(), None);
        index.set(from, Some(0));
        Self {
            nodes: vec![PathNode {
                coord: from,
                cost: 0.0,
                steps: 0,
                previous: None,
            }],
            index,
            goal: None,
        }
    }

    /// All visited nodes, in discovery order. The start is always first.
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> &PathNode {
        &self.nodes[0]
    }

    pub fn contains(&self, point: Point) -> bool {
        self.get(point).is_some()
    }

    /// Node recorded for `point`, if the search reached it.
    pub fn get(&self, point: Point) -> Option<&PathNode> {
        let idx = (*self.index.get(point)?)?;
        self.nodes.get(idx)
    }

    /// Node the given node was reached from.
    pub fn previous(&self, node: &PathNode) -> Option<&PathNode> {
        node.previous.and_then(|idx| self.nodes.get(idx))
    }

    /// The goal node of a [`Pathfinder::path`] search, if it was reached.
    pub fn goal(&self) -> Option<&PathNode> {
        self.goal.and_then(|idx| self.nodes.get(idx))
    }

    /// Cells from the start to `target`, both included.
    pub fn route(&self, target: Point) -> Option<Vec<Point>> {
        let mut node = self.get(target)?;
        let mut route = vec![node.coord];
        while let Some(prev) = self.previous(node) {
            route.push(prev.coord);
            node = prev;
        }
        route.reverse();
        Some(route)
    }

    /// Cells from the start to the goal of a path search.
    pub fn goal_route(&self) -> Option<Vec<Point>> {
        self.goal().and_then(|node| self.route(node.coord))
    }

    fn push(&mut self, node: PathNode) -> usize {
        let idx = self.nodes.len();
        self.index.set(node.coord, Some(idx));
        self.nodes.push(node);
        idx
    }
}

/// Heap entry. Entries go stale when their node is later improved; they are
/// detected by comparing `cost` with the node's current cost.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    priority: f32,
    cost: f32,
    order: u64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    // Reversed so the std max-heap pops the lowest priority, oldest first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Search engine bound to one grid. Each call builds its own frontier and
/// visited set; nothing is shared between calls.
pub struct Pathfinder<'a> {
    grid: &'a TileGrid,
}

struct Search<'a> {
    grid: &'a TileGrid,
    diagonal: bool,
    max_cost: Option<f32>,
    goal: Option<Point>,
    frontier: BinaryHeap<Frontier>,
    pushed: u64,
    visited: SearchResult,
}

impl<'a> Pathfinder<'a> {
    pub fn new(grid: &'a TileGrid) -> Self {
        Self { grid }
    }

    /// Every cell reachable from `from` with accumulated cost `<= max_cost`.
    ///
    /// Panics if `from` is outside the grid.
    pub fn area(&self, from: Point, max_cost: f32, diagonal: bool) -> SearchResult {
        let result = Search::new(self.grid, from, diagonal, Some(max_cost), None).run();
        trace!(%from, max_cost, visited = result.len(), "area search finished");
        result
    }

    /// Search towards `goal`, returning once it is first discovered.
    ///
    /// When the goal is unreachable the whole reachable region is returned and
    /// [`SearchResult::goal`] is `None`. Panics if `from` is outside the grid.
    pub fn path(&self, from: Point, goal: Point, diagonal: bool) -> SearchResult {
        let result = Search::new(self.grid, from, diagonal, None, Some(goal)).run();
        trace!(%from, %goal, reached = result.goal.is_some(), visited = result.len(), "path search finished");
        result
    }
}

impl<'a> Search<'a> {
    fn new(
        grid: &'a TileGrid,
        from: Point,
        diagonal: bool,
        max_cost: Option<f32>,
        goal: Option<Point>,
    ) -> Self {
        assert!(
            grid.contains(from),
            "search start {} is outside the {}x{} grid",
            from,
            grid.columns(),
            grid.rows()
        );
        let mut search = Self {
            grid,
            diagonal,
            max_cost,
            goal,
            frontier: BinaryHeap::new(),
            pushed: 0,
            visited: SearchResult::new(grid, from),
        };
        if goal == Some(from) {
            search.visited.goal = Some(0);
        } else {
            search.enqueue(0);
        }
        search
    }

    fn run(mut self) -> SearchResult {
        if self.visited.goal.is_some() {
            return self.visited;
        }
        while let Some(entry) = self.frontier.pop() {
            if entry.cost > self.visited.nodes[entry.node].cost {
                continue;
            }
            if let Some(goal) = self.expand(entry.node) {
                self.visited.goal = Some(goal);
                break;
            }
        }
        self.visited
    }

    /// Relax cardinal neighbors, then diagonal ones. A diagonal is skipped
    /// unless one of its two flanking cardinals is walkable.
    fn expand(&mut self, current: usize) -> Option<usize> {
        let origin = self.visited.nodes[current].coord;
        let mut flanks = [false; 4];

        for (i, offset) in ADJACENT.iter().enumerate() {
            let next = origin + *offset;
            flanks[i] = self.grid.is_walkable_at(next);
            if let Some(goal) = self.relax(current, next, CARDINAL_COST) {
                return Some(goal);
            }
        }

        if !self.diagonal {
            return None;
        }

        for (i, offset) in DIAGONALS.iter().enumerate() {
            if !(flanks[i] || flanks[(i + 1) % 4]) {
                continue;
            }
            if let Some(goal) = self.relax(current, origin + *offset, DIAGONAL_COST) {
                return Some(goal);
            }
        }

        None
    }

    /// Record or improve `next`. Returns the arena index of `next` when it is
    /// the goal being discovered for the first time.
    fn relax(&mut self, current: usize, next: Point, step_cost: f32) -> Option<usize> {
        if !self.grid.is_walkable_at(next) {
            return None;
        }

        let (cost, steps) = {
            let node = &self.visited.nodes[current];
            (node.cost + step_cost, node.steps + 1)
        };
        if self.max_cost.is_some_and(|max| cost > max) {
            return None;
        }

        let known = self.visited.index.get(next).copied().flatten();
        match known {
            None => {
                let idx = self.visited.push(PathNode {
                    coord: next,
                    cost,
                    steps,
                    previous: Some(current),
                });
                if self.goal == Some(next) {
                    return Some(idx);
                }
                self.enqueue(idx);
            }
            Some(idx) if cost < self.visited.nodes[idx].cost => {
                let node = &mut self.visited.nodes[idx];
                node.cost = cost;
                node.steps = steps;
                node.previous = Some(current);
                self.enqueue(idx);
            }
            Some(_) => {}
        }
        None
    }

    fn enqueue(&mut self, idx: usize) {
        let node = &self.visited.nodes[idx];
        let heuristic = self
            .goal
            .map_or(0.0, |goal| node.coord.manhattan(goal) as f32);
        self.frontier.push(Frontier {
            priority: node.cost + heuristic,
            cost: node.cost,
            order: self.pushed,
            node: idx,
        });
        self.pushed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ObstacleId, TerrainKind};

    fn open_grid(columns: usize, rows: usize) -> TileGrid {
        let mut grid = TileGrid::new(columns, rows);
        for y in 0..rows {
            for x in 0..columns {
                grid.replace_terrain(Point::new(x as i32, y as i32), TerrainKind::Dirt);
            }
        }
        grid
    }

    fn assert_route_is_connected(result: &SearchResult, target: Point) {
        let route = result.route(target).expect("route");
        assert_eq!(route[0], result.start().coord);
        assert_eq!(route[route.len() - 1], target);
        for pair in route.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_area_includes_start_at_zero_cost() {
        let grid = open_grid(5, 5);
        let result = Pathfinder::new(&grid).area(Point::new(2, 2), 0.0, true);
        assert_eq!(result.len(), 1);
        assert_eq!(result.start().coord, Point::new(2, 2));
        assert_eq!(result.start().cost, 0.0);
    }

    #[test]
    fn test_area_cardinal_is_manhattan_diamond() {
        let grid = open_grid(9, 9);
        let center = Point::new(4, 4);
        let result = Pathfinder::new(&grid).area(center, 3.0, false);

        for y in 0..9 {
            for x in 0..9 {
                let p = Point::new(x, y);
                let inside = center.manhattan(p) <= 3;
                assert_eq!(result.contains(p), inside, "{}", p);
                if let Some(node) = result.get(p) {
                    assert_eq!(node.cost, center.manhattan(p) as f32);
                }
            }
        }
    }

    #[test]
    fn test_area_diagonal_costs() {
        let grid = open_grid(5, 5);
        let result = Pathfinder::new(&grid).area(Point::new(0, 0), 10.0, true);
        assert_eq!(result.get(Point::new(1, 1)).map(|n| n.cost), Some(1.5));
        assert_eq!(result.get(Point::new(2, 2)).map(|n| n.cost), Some(3.0));
        assert_eq!(result.get(Point::new(2, 1)).map(|n| n.cost), Some(2.5));
        for node in result.iter() {
            assert!(node.cost <= 10.0);
        }
    }

    #[test]
    fn test_area_respects_cost_bound_with_diagonals() {
        let grid = open_grid(7, 7);
        let result = Pathfinder::new(&grid).area(Point::new(3, 3), 2.0, true);
        assert!(result.contains(Point::new(4, 4)));
        assert!(!result.contains(Point::new(5, 5)));
        assert!(result.iter().all(|n| n.cost <= 2.0));
    }

    #[test]
    fn test_area_skips_water_and_obstacles() {
        let mut grid = open_grid(3, 3);
        grid.replace_terrain(Point::new(1, 0), TerrainKind::Water);
        grid.set_obstacle(Point::new(1, 1), ObstacleId(0));
        grid.replace_terrain(Point::new(1, 2), TerrainKind::Water);

        let result = Pathfinder::new(&grid).area(Point::new(0, 0), 100.0, true);
        assert!(!result.contains(Point::new(1, 0)));
        assert!(!result.contains(Point::new(1, 1)));
        assert!(!result.contains(Point::new(2, 0)));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_no_corner_cutting_between_two_blocked_cardinals() {
        let mut grid = open_grid(2, 2);
        grid.replace_terrain(Point::new(1, 0), TerrainKind::Water);
        grid.set_obstacle(Point::new(0, 1), ObstacleId(0));

        let result = Pathfinder::new(&grid).area(Point::new(0, 0), 10.0, true);
        assert!(!result.contains(Point::new(1, 1)));

        let path = Pathfinder::new(&grid).path(Point::new(0, 0), Point::new(1, 1), true);
        assert!(path.goal().is_none());
    }

    #[test]
    fn test_diagonal_allowed_with_one_open_flank() {
        let mut grid = open_grid(2, 2);
        grid.replace_terrain(Point::new(1, 0), TerrainKind::Water);

        let result = Pathfinder::new(&grid).area(Point::new(0, 0), 10.0, true);
        assert_eq!(result.get(Point::new(1, 1)).map(|n| n.cost), Some(1.5));
    }

    #[test]
    fn test_no_returned_diagonal_cuts_a_corner() {
        let mut grid = open_grid(6, 6);
        for p in [(1, 0), (0, 1), (3, 2), (2, 3), (4, 4), (2, 1)] {
            grid.replace_terrain(Point::from(p), TerrainKind::Water);
        }
        let result = Pathfinder::new(&grid).area(Point::new(1, 1), 50.0, true);
        for node in result.iter() {
            let Some(prev) = result.previous(node) else { continue };
            if prev.coord.is_diagonal_to(node.coord) {
                let flank_a = Point::new(node.coord.x, prev.coord.y);
                let flank_b = Point::new(prev.coord.x, node.coord.y);
                assert!(grid.is_walkable_at(flank_a) || grid.is_walkable_at(flank_b));
            }
        }
    }

    #[test]
    fn test_path_reconstructs_to_start() {
        let mut grid = open_grid(8, 6);
        for y in 0..5 {
            grid.replace_terrain(Point::new(4, y), TerrainKind::Water);
        }
        let from = Point::new(1, 1);
        let goal = Point::new(6, 1);
        let result = Pathfinder::new(&grid).path(from, goal, true);

        let node = result.goal().expect("goal reached");
        assert_eq!(node.coord, goal);
        assert_route_is_connected(&result, goal);
        assert_eq!(result.goal_route().map(|r| r[r.len() - 1]), Some(goal));
    }

    #[test]
    fn test_path_without_diagonals_is_manhattan() {
        let grid = open_grid(6, 6);
        let result = Pathfinder::new(&grid).path(Point::new(0, 0), Point::new(5, 3), false);
        let node = result.goal().expect("goal reached");
        assert_eq!(node.cost, 8.0);
        assert_eq!(node.steps, 8);
        assert_route_is_connected(&result, Point::new(5, 3));
        assert_eq!(result.goal_route().map(|r| r.len()), Some(9));
    }

    #[test]
    fn test_path_to_unreachable_goal_exhausts_region() {
        let mut grid = open_grid(5, 3);
        for y in 0..3 {
            grid.replace_terrain(Point::new(2, y), TerrainKind::Water);
        }
        let result = Pathfinder::new(&grid).path(Point::new(0, 1), Point::new(4, 1), true);
        assert!(result.goal().is_none());
        assert!(result.route(Point::new(4, 1)).is_none());
        assert_eq!(result.len(), 6);
    }

    #[test]
    fn test_path_to_self() {
        let grid = open_grid(3, 3);
        let result = Pathfinder::new(&grid).path(Point::new(1, 1), Point::new(1, 1), true);
        assert_eq!(result.len(), 1);
        assert_eq!(result.goal_route(), Some(vec![Point::new(1, 1)]));
    }

    #[test]
    fn test_relaxation_improves_costs_in_place() {
        // Area search settles nodes in cost order, so every recorded node
        // agrees with its predecessor and the chain length matches `steps`.
        let grid = open_grid(6, 6);
        let result = Pathfinder::new(&grid).area(Point::new(0, 0), 6.0, true);
        for node in result.iter() {
            if let Some(prev) = result.previous(node) {
                let step = if prev.coord.is_diagonal_to(node.coord) {
                    DIAGONAL_COST
                } else {
                    CARDINAL_COST
                };
                assert_eq!(node.cost, prev.cost + step);
                assert_eq!(node.steps, prev.steps + 1);
            }
            let route = result.route(node.coord).expect("route");
            assert_eq!(route.len() as u32, node.steps + 1);
        }
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_start_outside_grid_panics() {
        let grid = open_grid(3, 3);
        let _ = Pathfinder::new(&grid).area(Point::new(5, 5), 3.0, true);
    }
}
