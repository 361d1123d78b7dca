//! Map generation parameters and configuration

use std::ops::RangeInclusive;

use crate::error::{MapError, Result};

/// Tunables for [`crate::mapgen::MapGenerator`].
///
/// Counts are inclusive ranges; the actual count for a run is drawn from the
/// seeded random source.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorParams {
    // =========================================================================
    // Terrain passes
    // =========================================================================

    /// Number of dirt/grass clusters (default: 5..=9)
    pub cluster_count: RangeInclusive<usize>,

    /// Number of ponds grown before the rivers, and again after them
    /// (default: 0..=2 each time)
    pub pond_count: RangeInclusive<usize>,

    /// Pond radius band, `(min, max)` (default: 2, 5)
    pub pond_radius: (u32, u32),

    /// Number of rivers (default: 0..=3)
    pub river_count: RangeInclusive<usize>,

    /// River width band, `(min, max)`; `min` must be below `max`
    /// (default: 1, 3)
    pub river_width: (u32, u32),

    /// Percentage added to the river's mutation chance on every quiet step
    /// (default: 30)
    pub river_mutation_factor: u32,

    // =========================================================================
    // Roads
    // =========================================================================

    /// Number of roads (default: 1..=3)
    pub road_count: RangeInclusive<usize>,

    /// Start cells tried on the border before a road is skipped (default: 10)
    pub road_start_attempts: usize,

    // =========================================================================
    // Obstacles
    // =========================================================================

    /// Obstacle target is `rand(area / random_divisor) + area / base_divisor`
    /// (default: 40)
    pub obstacle_base_divisor: usize,

    /// See `obstacle_base_divisor` (default: 20)
    pub obstacle_random_divisor: usize,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            cluster_count: 5..=9,
            pond_count: 0..=2,
            pond_radius: (2, 5),
            river_count: 0..=3,
            river_width: (1, 3),
            river_mutation_factor: 30,
            road_count: 1..=3,
            road_start_attempts: 10,
            obstacle_base_divisor: 40,
            obstacle_random_divisor: 20,
        }
    }
}

impl GeneratorParams {
    /// Check that every range and band can be drawn from.
    pub fn validate(&self) -> Result<()> {
        for (name, range) in [
            ("cluster_count", &self.cluster_count),
            ("pond_count", &self.pond_count),
            ("river_count", &self.river_count),
            ("road_count", &self.road_count),
        ] {
            if range.is_empty() {
                return Err(invalid(name, format!("empty range {:?}", range)));
            }
        }

        let (min_radius, max_radius) = self.pond_radius;
        if min_radius > max_radius {
            return Err(invalid(
                "pond_radius",
                format!("min {} exceeds max {}", min_radius, max_radius),
            ));
        }

        let (min_width, max_width) = self.river_width;
        if min_width == 0 || min_width >= max_width {
            return Err(invalid(
                "river_width",
                format!("need 0 < min < max, got ({}, {})", min_width, max_width),
            ));
        }

        if self.river_mutation_factor == 0 {
            return Err(invalid("river_mutation_factor", "must be positive".to_string()));
        }
        if self.road_start_attempts == 0 {
            return Err(invalid("road_start_attempts", "must be positive".to_string()));
        }
        if self.obstacle_base_divisor == 0 || self.obstacle_random_divisor == 0 {
            return Err(invalid("obstacle_divisor", "divisors must be positive".to_string()));
        }

        Ok(())
    }

    /// Obstacle budget bounds for a grid with `area` cells: `(base, spread)`.
    pub fn obstacle_budget(&self, area: usize) -> (usize, usize) {
        (area / self.obstacle_base_divisor, area / self.obstacle_random_divisor)
    }
}

fn invalid(name: &'static str, reason: String) -> MapError {
    MapError::InvalidParameter { name, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GeneratorParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_river_width() {
        let params = GeneratorParams {
            river_width: (2, 2),
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, MapError::InvalidParameter { name: "river_width", .. }));
    }

    #[test]
    fn test_rejects_empty_range() {
        #[allow(clippy::reversed_empty_ranges)]
        let params = GeneratorParams {
            road_count: 3..=1,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_obstacle_budget() {
        let params = GeneratorParams::default();
        assert_eq!(params.obstacle_budget(400), (10, 20));
        assert_eq!(params.obstacle_budget(10), (0, 0));
    }
}
