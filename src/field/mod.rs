//! The tile store: terrain, obstacles and the grid of cells.

pub mod obstacles;
pub mod terrain;
pub mod types;

pub use obstacles::{Obstacle, ObstacleId, ObstacleKind, ObstacleRegistry, ObstacleStore, OBSTACLE_MAX_HP};
pub use terrain::TerrainKind;
pub use types::{TileCell, TileGrid};
