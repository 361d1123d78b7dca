//! Road carving along the cheapest edge-to-edge route.
//!
//! A road starts on the left border (or the top border for vertical roads),
//! floods the grid with a cost field and follows the back-pointers from the
//! cheapest cell on the opposite border. Water blocks the flood, so a road can
//! only cross a river where a bridge already exists.

use tracing::debug;

use crate::field::{ObstacleRegistry, TerrainKind};
use crate::pathfinder::Pathfinder;
use crate::point::Point;

use super::{below, MapGenerator};

impl<R: ObstacleRegistry> MapGenerator<R> {
    /// Carve one road. Returns false when the road was skipped.
    pub fn carve_road(&mut self, vertical: bool) -> bool {
        let Some(start) = self.road_start(vertical) else {
            debug!(vertical, "no viable road start, skipping road");
            return false;
        };

        let budget = (self.columns * self.rows) as f32;
        let route = {
            let field = Pathfinder::new(&self.grid).area(start, budget, false);

            let far_edge: Vec<Point> = if vertical {
                (0..self.columns as i32)
                    .map(|x| Point::new(x, self.rows as i32 - 1))
                    .collect()
            } else {
                (0..self.rows as i32)
                    .map(|y| Point::new(self.columns as i32 - 1, y))
                    .collect()
            };

            let mut end = None;
            let mut min_cost = budget;
            for point in far_edge {
                if let Some(node) = field.get(point) {
                    if node.cost < min_cost {
                        min_cost = node.cost;
                        end = Some(point);
                    }
                }
            }

            let Some(end) = end else {
                debug!(%start, vertical, "opposite edge unreachable, skipping road");
                return false;
            };
            match field.route(end) {
                Some(route) => route,
                None => return false,
            }
        };

        let on_start_edge = |p: Point| if vertical { p.y == 0 } else { p.x == 0 };
        let mut painted = 0;
        for (i, &point) in route.iter().enumerate().rev() {
            self.grid.replace_terrain(point, TerrainKind::Road);
            painted += 1;
            let runs_along_edge = i > 0 && on_start_edge(point) && on_start_edge(route[i - 1]);
            if runs_along_edge {
                break;
            }
        }

        debug!(%start, end = %route[route.len() - 1], painted, "road carved");
        true
    }

    /// A walkable start cell on the central half of the start border.
    fn road_start(&mut self, vertical: bool) -> Option<Point> {
        let span = if vertical { self.columns } else { self.rows };
        let range = span / 2;
        let offset = (span - range) / 2;

        for _ in 0..self.params.road_start_attempts {
            let across = (below(&mut self.rng, range) + offset) as i32;
            let candidate = if vertical {
                Point::new(across, 0)
            } else {
                Point::new(0, across)
            };
            let cell = self.grid.tile(candidate);
            if cell.terrain() != TerrainKind::Water && cell.obstacle().is_none() {
                return Some(candidate);
            }
        }
        None
    }
}
