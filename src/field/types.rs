//! Tile cells and the grid that stores them.
//!
//! Walkability is never stored: it is derived from the current terrain and
//! the obstacle reference every time it is asked for.

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::tilemap::Tilemap;

use super::obstacles::ObstacleId;
use super::terrain::TerrainKind;

/// A single cell of the field
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileCell {
    coord: Point,
    terrain: TerrainKind,
    obstacle: Option<ObstacleId>,
}

impl TileCell {
    /// Create an unpainted cell at `coord`
    pub fn new(coord: Point) -> Self {
        Self {
            coord,
            terrain: TerrainKind::None,
            obstacle: None,
        }
    }

    pub fn coord(&self) -> Point {
        self.coord
    }

    pub fn terrain(&self) -> TerrainKind {
        self.terrain
    }

    pub fn obstacle(&self) -> Option<ObstacleId> {
        self.obstacle
    }

    /// Walkable terrain with nothing standing on it.
    pub fn is_walkable(&self) -> bool {
        self.terrain.is_walkable() && self.obstacle.is_none()
    }

    /// Paint terrain through the replace rule (see [`TerrainKind::replaced_by`]).
    ///
    /// This is the only way terrain changes after initialization.
    pub fn replace_terrain(&mut self, terrain: TerrainKind) {
        self.terrain = self.terrain.replaced_by(terrain);
    }

    pub fn set_obstacle(&mut self, obstacle: ObstacleId) {
        self.obstacle = Some(obstacle);
    }

    /// Detach the obstacle, returning its id if there was one.
    pub fn clear_obstacle(&mut self) -> Option<ObstacleId> {
        self.obstacle.take()
    }

    /// ASCII character for display (obstacle marker is handled by the caller)
    pub fn ascii_char(&self) -> char {
        self.terrain.ascii_char()
    }
}

/// Columns x rows of tile cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    cells: Tilemap<TileCell>,
}

impl TileGrid {
    /// Allocate storage with no terrain assigned.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            cells: Tilemap::from_fn(columns, rows, TileCell::new),
        }
    }

    pub fn columns(&self) -> usize {
        self.cells.width
    }

    pub fn rows(&self) -> usize {
        self.cells.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.cells.contains(point)
    }

    pub fn get(&self, point: Point) -> Option<&TileCell> {
        self.cells.get(point)
    }

    pub fn get_mut(&mut self, point: Point) -> Option<&mut TileCell> {
        self.cells.get_mut(point)
    }

    /// Cell at `point`. Panics when `point` lies outside the grid.
    pub fn tile(&self, point: Point) -> &TileCell {
        &self.cells[point]
    }

    /// Mutable cell at `point`. Panics when `point` lies outside the grid.
    pub fn tile_mut(&mut self, point: Point) -> &mut TileCell {
        &mut self.cells[point]
    }

    /// Neighbor in the given table slot, or `None` past the grid edge.
    pub fn neighbor(&self, point: Point, index: usize, diagonal: bool) -> Option<&TileCell> {
        self.get(point.neighbor(index, diagonal))
    }

    /// Walkability of the cell at `point`; cells outside the grid are not walkable.
    pub fn is_walkable_at(&self, point: Point) -> bool {
        self.get(point).is_some_and(TileCell::is_walkable)
    }

    pub fn terrain(&self, point: Point) -> TerrainKind {
        self.tile(point).terrain()
    }

    pub fn obstacle(&self, point: Point) -> Option<ObstacleId> {
        self.tile(point).obstacle()
    }

    /// Paint terrain at `point` through the replace rule.
    pub fn replace_terrain(&mut self, point: Point, terrain: TerrainKind) {
        self.tile_mut(point).replace_terrain(terrain);
    }

    pub fn set_obstacle(&mut self, point: Point, obstacle: ObstacleId) {
        self.tile_mut(point).set_obstacle(obstacle);
    }

    /// Detach the obstacle at `point`, making the cell walkable again if its
    /// terrain allows it.
    pub fn clear_obstacle(&mut self, point: Point) -> Option<ObstacleId> {
        self.tile_mut(point).clear_obstacle()
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &TileCell> {
        self.cells.values().iter()
    }

    /// Cells in one row, left to right.
    pub fn row(&self, y: usize) -> &[TileCell] {
        let start = y * self.columns();
        &self.cells.values()[start..start + self.columns()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_unpainted() {
        let grid = TileGrid::new(4, 3);
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.area(), 12);
        for cell in grid.iter() {
            assert_eq!(cell.terrain(), TerrainKind::None);
            assert!(cell.obstacle().is_none());
            assert_eq!(grid.tile(cell.coord()), cell);
        }
    }

    #[test]
    fn test_walkability_follows_terrain_and_obstacle() {
        let mut grid = TileGrid::new(2, 2);
        let p = Point::new(1, 0);

        grid.replace_terrain(p, TerrainKind::Grass);
        assert!(grid.is_walkable_at(p));

        grid.set_obstacle(p, ObstacleId(0));
        assert!(!grid.is_walkable_at(p));

        assert_eq!(grid.clear_obstacle(p), Some(ObstacleId(0)));
        assert!(grid.is_walkable_at(p));

        grid.replace_terrain(p, TerrainKind::Water);
        assert!(!grid.is_walkable_at(p));

        grid.replace_terrain(p, TerrainKind::Road);
        assert_eq!(grid.terrain(p), TerrainKind::Bridge);
        assert!(grid.is_walkable_at(p));
    }

    #[test]
    fn test_neighbor_lookup_stops_at_edges() {
        let grid = TileGrid::new(3, 3);
        let corner = Point::new(0, 0);
        assert!(grid.neighbor(corner, 0, false).is_some());
        assert!(grid.neighbor(corner, 2, false).is_none());
        assert!(grid.neighbor(corner, 0, true).is_some());
        assert!(grid.neighbor(corner, 1, true).is_none());
        assert!(!grid.is_walkable_at(Point::new(-1, 0)));
    }

    #[test]
    fn test_row_slices() {
        let grid = TileGrid::new(3, 2);
        let row = grid.row(1);
        assert_eq!(row.len(), 3);
        assert_eq!(row[2].coord(), Point::new(2, 1));
    }
}
