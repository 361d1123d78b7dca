//! Meandering corridors: rivers and straight-ish road strips.
//!
//! A corridor runs from one border to the opposite one. Its midline drifts
//! sideways and its width breathes within a band; both changes are driven by
//! a mutation chance that builds up every quiet step until it fires.

use rand::Rng;

use crate::field::{ObstacleRegistry, TerrainKind};
use crate::params::GeneratorParams;
use crate::point::Point;

use super::{below, MapGenerator};

/// Shape of one corridor carve.
#[derive(Clone, Debug, PartialEq)]
pub struct Corridor {
    pub terrain: TerrainKind,
    pub min_width: u32,
    /// Exclusive of the initial width draw, inclusive once the corridor mutates
    pub max_width: u32,
    /// Run top to bottom instead of left to right
    pub vertical: bool,
    /// Stop on reaching a cell that already has this corridor's terrain
    pub fork: bool,
    /// Added to the mutation chance (in percent) on every quiet step
    pub mutation_factor: u32,
}

impl Corridor {
    /// A river as the generator carves it.
    pub fn river(vertical: bool, params: &GeneratorParams) -> Self {
        Self {
            terrain: TerrainKind::Water,
            min_width: params.river_width.0,
            max_width: params.river_width.1,
            vertical,
            fork: true,
            mutation_factor: params.river_mutation_factor,
        }
    }

    /// A road strip; crossing water leaves bridges behind.
    pub fn road(vertical: bool) -> Self {
        Self {
            terrain: TerrainKind::Road,
            min_width: 1,
            max_width: 3,
            vertical,
            fork: false,
            mutation_factor: 30,
        }
    }
}

/// Cell at position `along` the corridor axis and `across` it.
fn corridor_point(along: i32, across: i32, vertical: bool) -> Point {
    if vertical {
        Point::new(across, along)
    } else {
        Point::new(along, across)
    }
}

impl<R: ObstacleRegistry> MapGenerator<R> {
    /// Carve a corridor across the grid. Returns the number of steps carved.
    pub fn carve_corridor(&mut self, corridor: &Corridor) -> usize {
        let (span, length) = if corridor.vertical {
            (self.columns, self.rows)
        } else {
            (self.rows, self.columns)
        };
        let last = span as i32 - 1;
        let start_range = span / 2;
        let mut mid = (below(&mut self.rng, start_range) + (span - start_range) / 2) as i32;
        let min_width = corridor.min_width;
        let max_width = corridor.max_width;
        let mut width = below(&mut self.rng, max_width.saturating_sub(min_width) as usize) as u32 + min_width;
        let mut mutate_chance = 0u32;

        let steps: Vec<i32> = if self.rng.gen::<bool>() {
            (0..length as i32).rev().collect()
        } else {
            (0..length as i32).collect()
        };

        let mut carved = 0;
        for along in steps {
            let midline = corridor_point(along, mid, corridor.vertical);
            if corridor.fork && self.grid.terrain(midline) == corridor.terrain {
                break;
            }
            carved += 1;

            let mut crossing = false;
            let half = (width / 2) as i32;
            for w in 0..width as i32 {
                let point = corridor_point(along, mid + w - half, corridor.vertical);
                let Some(cell) = self.grid.get_mut(point) else {
                    continue;
                };
                if cell.terrain() == TerrainKind::Water && corridor.terrain == TerrainKind::Road {
                    crossing = true;
                }
                cell.replace_terrain(corridor.terrain);
            }
            if crossing {
                continue;
            }

            let fires = mutate_chance >= 100
                || below(&mut self.rng, 100) as u32 >= 100 - mutate_chance;
            if !fires {
                mutate_chance += corridor.mutation_factor;
                continue;
            }
            mutate_chance = 0;

            if self.rng.gen::<bool>() {
                // drift the midline and paint the newly exposed edge
                if self.rng.gen::<bool>() {
                    if mid < last {
                        mid += 1;
                        let edge = (mid + half - 1 + (width % 2) as i32).min(last);
                        self.grid
                            .replace_terrain(corridor_point(along, edge, corridor.vertical), corridor.terrain);
                    }
                } else if mid > 0 {
                    mid -= 1;
                    let edge = (mid - half).max(0);
                    self.grid
                        .replace_terrain(corridor_point(along, edge, corridor.vertical), corridor.terrain);
                }
            } else if width == max_width {
                width -= 1;
            } else if width == min_width || self.rng.gen::<bool>() {
                width += 1;
            } else {
                width -= 1;
            }
        }

        carved
    }
}
