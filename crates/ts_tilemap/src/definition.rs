use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collision::Collision;
use crate::tilemap::Tilemap;

/// Tileset definition resource describing a tilemap's tile types.
///
/// This is the serializable configuration a [`Tilemap`] is built from.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct TilesetDefinition {
    /// Human-readable name for this tileset.
    pub name: String,
    /// Grid width in cells.
    pub columns: u32,
    /// Grid height in cells.
    pub rows: u32,
    /// Width of every tile type.
    pub tile_width: f32,
    /// Height of every tile type.
    pub tile_height: f32,
    /// Number of tile types to generate.
    pub tile_count: u32,
    /// Per-type overrides, applied in order.
    #[serde(default)]
    pub tiles: Vec<TileTypeDef>,
}

impl Default for TilesetDefinition {
    fn default() -> Self {
        Self {
            name: "New Tileset".to_string(),
            columns: 32,
            rows: 32,
            tile_width: 16.0,
            tile_height: 16.0,
            tile_count: 16,
            tiles: Vec::new(),
        }
    }
}

/// A tileset definition that cannot be built as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TilesetError {
    /// An override names a tile index at or past `tile_count`.
    IndexOutOfRange { entry: usize, index: u32, tile_count: u32 },
    /// An override range with `start > end` selects nothing.
    EmptyRange { entry: usize, start: u32, end: u32 },
}

impl std::fmt::Display for TilesetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { entry, index, tile_count } => write!(
                f,
                "override {} names tile {} but the tileset has {} tile types",
                entry, index, tile_count
            ),
            Self::EmptyRange { entry, start, end } => {
                write!(f, "override {} has empty range {}..={}", entry, start, end)
            }
        }
    }
}

impl std::error::Error for TilesetError {}

impl TilesetDefinition {
    /// Check that every override selects tile types inside `tile_count`.
    pub fn validate(&self) -> Result<(), TilesetError> {
        for (entry, def) in self.tiles.iter().enumerate() {
            match &def.indices {
                TileSelection::Range { start, end } if start > end => {
                    return Err(TilesetError::EmptyRange { entry, start: *start, end: *end });
                }
                TileSelection::Range { end, .. } => self.check_index(entry, *end)?,
                TileSelection::Indices(list) => {
                    for &index in list {
                        self.check_index(entry, index)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn check_index(&self, entry: usize, index: u32) -> Result<(), TilesetError> {
        if index >= self.tile_count {
            return Err(TilesetError::IndexOutOfRange {
                entry,
                index,
                tile_count: self.tile_count,
            });
        }
        Ok(())
    }

    /// Build a tilemap whose tiles reference `owner`.
    pub fn build_tilemap(&self, owner: Entity) -> Tilemap {
        let mut tilemap = Tilemap::new(self.columns, self.rows, self.tile_width, self.tile_height);
        tilemap.generate_tiles(owner, self.tile_count);

        for def in &self.tiles {
            def.apply(&mut tilemap);
        }

        info!(
            tileset = %self.name,
            tiles = tilemap.tile_count(),
            overrides = self.tiles.len(),
            "built tilemap"
        );
        tilemap
    }
}

/// Which tile types a definition or request targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileSelection {
    /// Inclusive index range.
    Range { start: u32, end: u32 },
    Indices(Vec<u32>),
}

impl TileSelection {
    pub fn single(index: u32) -> Self {
        Self::Indices(vec![index])
    }
}

/// Overrides for a selection of tile types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileTypeDef {
    pub indices: TileSelection,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mass: Option<f32>,
    #[serde(default)]
    pub collision: Option<CollisionDef>,
}

/// Arguments for a `set_collision` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionDef {
    pub mask: Collision,
    #[serde(default = "default_true")]
    pub reset: bool,
    #[serde(default = "default_true")]
    pub separate_x: bool,
    #[serde(default = "default_true")]
    pub separate_y: bool,
}

impl CollisionDef {
    pub fn new(mask: Collision) -> Self {
        Self {
            mask,
            reset: true,
            separate_x: true,
            separate_y: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl TileTypeDef {
    fn apply(&self, tilemap: &mut Tilemap) {
        let indices: Vec<u32> = match &self.indices {
            TileSelection::Range { start, end } => {
                let count = tilemap.tile_count();
                if *end >= count {
                    warn!(
                        start,
                        end,
                        tile_count = count,
                        "tileset override range clamped to the tile table"
                    );
                }
                (*start..=*end).take_while(|&i| i < count).collect()
            }
            TileSelection::Indices(list) => list.clone(),
        };

        for index in indices {
            let Some(tile) = tilemap.tile_mut(index) else {
                warn!(index, "tileset override names a missing tile type");
                continue;
            };
            if let Some(name) = &self.name {
                tile.name = Some(name.clone());
            }
            if let Some(mass) = self.mass {
                tile.mass = mass;
            }
            if let Some(c) = self.collision {
                tile.set_collision(c.mask, c.reset, c.separate_x, c.separate_y);
            }
        }
    }
}
