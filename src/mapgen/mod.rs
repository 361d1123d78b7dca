//! Seeded field generation.
//!
//! A [`MapGenerator`] owns one ChaCha random source, the tile grid and an
//! obstacle registry. [`MapGenerator::generate`] runs the passes in a fixed
//! order so that a seed and grid size always reproduce the same field:
//!
//! 1. dirt and grass clusters
//! 2. ponds
//! 3. rivers
//! 4. more ponds
//! 5. roads, carved along a cost field from the search engine
//! 6. rocks and trees
//!
//! Each pass is also exposed on its own for callers that want to paint a
//! field by hand.

mod clusters;
mod corridors;
mod obstacles;
mod roads;

pub use clusters::admission_chance;
pub use corridors::Corridor;

use std::time::Instant;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{MapError, Result, MIN_EDGE};
use crate::field::{Obstacle, ObstacleRegistry, ObstacleStore, TerrainKind, TileGrid};
use crate::params::GeneratorParams;
use crate::point::Point;
use crate::seeds::SeedSource;

pub struct MapGenerator<R = ObstacleStore> {
    columns: usize,
    rows: usize,
    seed: u64,
    params: GeneratorParams,
    rng: ChaCha8Rng,
    grid: TileGrid,
    obstacles: R,
    /// Cells no obstacle pass has drawn yet
    empty_tiles: Vec<Point>,
    initialized: bool,
}

impl MapGenerator {
    /// Generator with the default obstacle store.
    pub fn new(columns: usize, rows: usize, seed: u64) -> Result<Self> {
        Self::with_registry(columns, rows, seed, ObstacleStore::new())
    }

    /// Generator seeded from `source`.
    pub fn from_seed_source(columns: usize, rows: usize, mut source: impl SeedSource) -> Result<Self> {
        Self::new(columns, rows, source.next_seed())
    }

    /// Consume the generator, keeping the finished field.
    pub fn into_map(self) -> GeneratedMap {
        GeneratedMap {
            seed: self.seed,
            grid: self.grid,
            obstacles: self.obstacles,
        }
    }
}

impl<R: ObstacleRegistry> MapGenerator<R> {
    /// Generator that allocates obstacles through `registry`.
    pub fn with_registry(columns: usize, rows: usize, seed: u64, registry: R) -> Result<Self> {
        if columns < MIN_EDGE || rows < MIN_EDGE {
            return Err(MapError::InvalidDimensions { columns, rows });
        }
        Ok(Self {
            columns,
            rows,
            seed,
            params: GeneratorParams::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            grid: TileGrid::new(columns, rows),
            obstacles: registry,
            empty_tiles: Vec::new(),
            initialized: false,
        })
    }

    /// Replace the default parameters.
    pub fn with_params(mut self, params: GeneratorParams) -> Result<Self> {
        params.validate()?;
        self.params = params;
        Ok(self)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Direct access to the grid, for callers that paint by hand.
    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    pub fn obstacles(&self) -> &R {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut R {
        &mut self.obstacles
    }

    pub fn into_parts(self) -> (TileGrid, R) {
        (self.grid, self.obstacles)
    }

    /// Reset the grid to unpainted cells and refill the empty-cell pool.
    pub fn init(&mut self) -> &TileGrid {
        debug!(seed = self.seed, columns = self.columns, rows = self.rows, "map seed");
        self.grid = TileGrid::new(self.columns, self.rows);
        self.empty_tiles = self.grid.iter().map(|cell| cell.coord()).collect();
        self.initialized = true;
        &self.grid
    }

    /// Run the full pipeline and return the finished grid.
    pub fn generate(&mut self) -> &TileGrid {
        let started = Instant::now();
        if !self.initialized {
            self.init();
        }

        let params = self.params.clone();
        let short_edge = self.columns.min(self.rows) as u32;

        let clusters = self.rng.gen_range(params.cluster_count.clone());
        for _ in 0..clusters {
            let terrain = if below(&mut self.rng, 2) == 0 {
                TerrainKind::Dirt
            } else {
                TerrainKind::Grass
            };
            self.grow_cluster(terrain, short_edge / 3, short_edge / 2);
        }

        let ponds = self.grow_ponds(&params);

        let mut vertical = self.rng.gen::<bool>();
        let rivers = self.rng.gen_range(params.river_count.clone());
        for _ in 0..rivers {
            let river = Corridor::river(vertical, &params);
            self.carve_corridor(&river);
            vertical = !vertical;
        }

        let late_ponds = self.grow_ponds(&params);

        let roads = self.rng.gen_range(params.road_count.clone());
        let mut roads_built = 0;
        for i in 0..roads {
            if i > 0 {
                vertical = !vertical;
            }
            if self.carve_road(vertical) {
                roads_built += 1;
            }
        }

        let (base, spread) = params.obstacle_budget(self.grid.area());
        let target = below(&mut self.rng, spread) + base;
        let placed = self.place_obstacles(target);
        self.empty_tiles.clear();

        debug!(
            clusters,
            ponds = ponds + late_ponds,
            rivers,
            roads,
            roads_built,
            obstacles = placed,
            "map passes finished"
        );
        info!(
            seed = self.seed,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "map generation finished"
        );

        &self.grid
    }

    fn grow_ponds(&mut self, params: &GeneratorParams) -> usize {
        let ponds = self.rng.gen_range(params.pond_count.clone());
        let (min_radius, max_radius) = params.pond_radius;
        for _ in 0..ponds {
            self.grow_cluster(TerrainKind::Water, min_radius, max_radius);
        }
        ponds
    }
}

/// Uniform draw in `0..bound`; zero without drawing when `bound` is zero.
fn below(rng: &mut ChaCha8Rng, bound: usize) -> usize {
    if bound == 0 {
        0
    } else {
        rng.gen_range(0..bound)
    }
}

/// A finished field: the grid, its obstacles and the seed that produced them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMap {
    pub seed: u64,
    pub grid: TileGrid,
    pub obstacles: ObstacleStore,
}

impl GeneratedMap {
    /// Obstacle standing on `point`, if any.
    pub fn obstacle_at(&self, point: Point) -> Option<&Obstacle> {
        let id = self.grid.get(point)?.obstacle()?;
        self.obstacles.get(id)
    }

    /// One string per row; obstacles are drawn over their terrain.
    pub fn ascii_rows(&self) -> Vec<String> {
        (0..self.grid.rows())
            .map(|y| {
                self.grid
                    .row(y)
                    .iter()
                    .map(|cell| match self.obstacle_at(cell.coord()) {
                        Some(obstacle) => obstacle.kind.ascii_char(),
                        None => cell.ascii_char(),
                    })
                    .collect()
            })
            .collect()
    }
}

/// Generate a field in one call.
pub fn generate_map(columns: usize, rows: usize, seed: u64) -> Result<GeneratedMap> {
    let mut generator = MapGenerator::new(columns, rows, seed)?;
    generator.generate();
    Ok(generator.into_map())
}
