//! Jungle field generation library
//!
//! Seeded tile-grid generation (dirt and grass patches, ponds, rivers, roads,
//! rocks and trees) plus a priority-queue search over the finished grid.
//! Re-exports modules for use by the binary and tools.

pub mod error;
pub mod field;
pub mod mapgen;
pub mod params;
pub mod pathfinder;
pub mod point;
pub mod seeds;
pub mod tilemap;

pub use error::{MapError, Result};
pub use field::{Obstacle, ObstacleId, ObstacleKind, ObstacleRegistry, ObstacleStore, TerrainKind, TileCell, TileGrid};
pub use mapgen::{generate_map, Corridor, GeneratedMap, MapGenerator};
pub use params::GeneratorParams;
pub use pathfinder::{PathNode, Pathfinder, SearchResult};
pub use point::Point;
pub use seeds::{MonotonicSeeds, RandomSeeds, SeedSource};
