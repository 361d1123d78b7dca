//! Breadth-first cluster growth for terrain patches and ponds.

use std::collections::VecDeque;

use rand::Rng;

use crate::field::{ObstacleRegistry, TerrainKind};
use crate::point::Point;
use crate::tilemap::Tilemap;

use super::{below, MapGenerator};

/// Order in which a growing cluster tries its neighbors.
const GROWTH_ORDER: [Point; 4] = [
    Point::new(-1, 0),
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
];

/// Probability that a cell at `radius` lets a neighbor into the cluster.
///
/// Certain below `min_radius`, then falls linearly towards zero as the radius
/// approaches `max_radius`.
pub fn admission_chance(radius: u32, min_radius: u32, max_radius: u32) -> f32 {
    if radius < min_radius {
        1.0
    } else if min_radius >= max_radius {
        0.0
    } else {
        1.0 - (radius + 1 - min_radius) as f32 / (max_radius - min_radius) as f32
    }
}

impl<R: ObstacleRegistry> MapGenerator<R> {
    /// Grow a patch of `terrain` from a random cell. Returns the number of
    /// cells painted.
    pub fn grow_cluster(&mut self, terrain: TerrainKind, min_radius: u32, max_radius: u32) -> usize {
        let start = Point::new(
            below(&mut self.rng, self.columns) as i32,
            below(&mut self.rng, self.rows) as i32,
        );

        // 0 marks cells that have not joined the cluster
        let mut radius: Tilemap<u32> = Tilemap::new(self.columns, self.rows);
        let mut queue = VecDeque::new();
        radius.set(start, 1);
        queue.push_back(start);

        let mut painted = 0;
        while let Some(cell) = queue.pop_front() {
            let distance = radius[cell];
            self.grid.replace_terrain(cell, terrain);
            painted += 1;

            if distance >= max_radius {
                continue;
            }
            let chance = admission_chance(distance, min_radius, max_radius);
            if chance <= 0.0 {
                continue;
            }

            for offset in GROWTH_ORDER {
                let next = cell + offset;
                if radius.get(next).copied() != Some(0) {
                    continue;
                }
                if chance >= 1.0 || self.rng.gen::<f32>() < chance {
                    radius.set(next, distance + 1);
                    queue.push_back(next);
                }
            }
        }

        painted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admission_chance_band() {
        assert_eq!(admission_chance(1, 3, 5), 1.0);
        assert_eq!(admission_chance(2, 3, 5), 1.0);
        assert_eq!(admission_chance(3, 3, 5), 0.5);
        assert_eq!(admission_chance(4, 3, 5), 0.0);
        assert_eq!(admission_chance(3, 3, 3), 0.0);
        assert_eq!(admission_chance(0, 0, 1), 0.0);
    }

    #[test]
    fn test_cluster_stays_within_radius() {
        let mut generator = MapGenerator::new(21, 21, 5).unwrap();
        generator.init();
        let painted = generator.grow_cluster(TerrainKind::Grass, 3, 6);

        let cells: Vec<Point> = generator
            .grid()
            .iter()
            .filter(|c| c.terrain() == TerrainKind::Grass)
            .map(|c| c.coord())
            .collect();
        assert_eq!(cells.len(), painted);
        assert!(painted >= 1);

        // Every painted cell is within max_radius - 1 steps of some start
        // cell, so the patch spans at most 2 * 5 + 1 cells on each axis.
        let min_x = cells.iter().map(|p| p.x).min().unwrap();
        let max_x = cells.iter().map(|p| p.x).max().unwrap();
        let min_y = cells.iter().map(|p| p.y).min().unwrap();
        let max_y = cells.iter().map(|p| p.y).max().unwrap();
        assert!(max_x - min_x <= 10);
        assert!(max_y - min_y <= 10);
    }

    #[test]
    fn test_full_chance_fills_diamond() {
        // With min_radius == max_radius every cell below the max spreads
        // with certainty, painting the whole diamond that fits the grid.
        let mut generator = MapGenerator::new(30, 30, 11).unwrap();
        generator.init();
        let painted = generator.grow_cluster(TerrainKind::Dirt, 4, 4);

        let grid = generator.grid();
        let dirt: Vec<Point> = grid
            .iter()
            .filter(|c| c.terrain() == TerrainKind::Dirt)
            .map(|c| c.coord())
            .collect();
        assert_eq!(dirt.len(), painted);
        assert!(painted <= 25);
    }

    #[test]
    fn test_water_cluster_replaces_previous_terrain() {
        let mut generator = MapGenerator::new(6, 6, 2).unwrap();
        generator.init();
        for cell in generator.grid().iter().map(|c| c.coord()).collect::<Vec<_>>() {
            generator.grid_mut().replace_terrain(cell, TerrainKind::Grass);
        }
        let painted = generator.grow_cluster(TerrainKind::Water, 2, 5);
        let water = generator
            .grid()
            .iter()
            .filter(|c| c.terrain() == TerrainKind::Water)
            .count();
        assert_eq!(water, painted);
    }
}
