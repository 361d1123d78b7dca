//! Rock and tree scattering.

use crate::field::{Obstacle, ObstacleRegistry, TerrainKind};

use super::{below, MapGenerator};

impl<R: ObstacleRegistry> MapGenerator<R> {
    /// Scatter up to `amount` obstacles over cells not drawn before.
    ///
    /// Rocks go on dirt, trees on grass; a drawn cell with any other terrain
    /// leaves the pool without an obstacle. Returns the number placed.
    pub fn place_obstacles(&mut self, amount: usize) -> usize {
        let mut placed = 0;
        while placed < amount && !self.empty_tiles.is_empty() {
            let pick = below(&mut self.rng, self.empty_tiles.len());
            let point = self.empty_tiles.swap_remove(pick);

            let obstacle = match self.grid.terrain(point) {
                TerrainKind::Dirt => Obstacle::rock(),
                TerrainKind::Grass => Obstacle::tree(),
                _ => continue,
            };
            let id = self.obstacles.create(obstacle);
            self.grid.set_obstacle(point, id);
            placed += 1;
        }
        placed
    }
}
