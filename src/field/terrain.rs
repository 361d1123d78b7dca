//! Terrain kinds for field tiles.
//!
//! Terrain is the ground layer of a tile. Obstacles (rocks, trees) live on
//! top of it and are described in [`super::obstacles`].

use serde::{Deserialize, Serialize};

/// Ground type of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Freshly initialized tile that no generation pass has painted yet
    #[default]
    None,
    Dirt,
    Grass,
    Water,
    Road,
    /// Road laid across water
    Bridge,
}

impl TerrainKind {
    pub fn all() -> &'static [Self] {
        &[
            Self::None,
            Self::Dirt,
            Self::Grass,
            Self::Water,
            Self::Road,
            Self::Bridge,
        ]
    }

    /// Decode the compact byte form (`0..=5`, declaration order).
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::all().get(byte as usize).copied()
    }

    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    /// Water is the only terrain that cannot be walked on.
    pub fn is_walkable(&self) -> bool {
        !matches!(self, TerrainKind::Water)
    }

    /// Terrain that results from painting `incoming` over `self`.
    ///
    /// Road over water becomes a bridge and road never overwrites a bridge.
    /// Everything else takes the incoming kind.
    pub fn replaced_by(self, incoming: TerrainKind) -> TerrainKind {
        match (incoming, self) {
            (TerrainKind::Road, TerrainKind::Water) => TerrainKind::Bridge,
            (TerrainKind::Road, TerrainKind::Bridge) => TerrainKind::Bridge,
            _ => incoming,
        }
    }

    /// Get ASCII character for terminal display
    pub fn ascii_char(&self) -> char {
        match self {
            TerrainKind::None => ' ',
            TerrainKind::Dirt => ':',
            TerrainKind::Grass => '.',
            TerrainKind::Water => '~',
            TerrainKind::Road => '=',
            TerrainKind::Bridge => '#',
        }
    }
}

impl std::fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerrainKind::None => write!(f, "none"),
            TerrainKind::Dirt => write!(f, "dirt"),
            TerrainKind::Grass => write!(f, "grass"),
            TerrainKind::Water => write!(f, "water"),
            TerrainKind::Road => write!(f, "road"),
            TerrainKind::Bridge => write!(f, "bridge"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_water_blocks() {
        for kind in TerrainKind::all() {
            assert_eq!(kind.is_walkable(), *kind != TerrainKind::Water);
        }
    }

    #[test]
    fn test_road_over_water_becomes_bridge() {
        assert_eq!(TerrainKind::Water.replaced_by(TerrainKind::Road), TerrainKind::Bridge);
        assert_eq!(TerrainKind::Bridge.replaced_by(TerrainKind::Road), TerrainKind::Bridge);
        assert_eq!(TerrainKind::Grass.replaced_by(TerrainKind::Road), TerrainKind::Road);
        assert_eq!(TerrainKind::Road.replaced_by(TerrainKind::Water), TerrainKind::Water);
    }

    #[test]
    fn test_byte_mapping() {
        assert_eq!(TerrainKind::from_byte(1), Some(TerrainKind::Dirt));
        assert_eq!(TerrainKind::from_byte(2), Some(TerrainKind::Grass));
        assert_eq!(TerrainKind::from_byte(6), None);
        for kind in TerrainKind::all() {
            assert_eq!(TerrainKind::from_byte(kind.as_byte()), Some(*kind));
        }
    }
}
