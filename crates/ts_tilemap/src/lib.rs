use bevy::prelude::*;

pub mod collision;
pub mod definition;
pub mod requests;
pub mod tile;
pub mod tilemap;

pub use collision::Collision;
pub use definition::{CollisionDef, TileSelection, TileTypeDef, TilesetDefinition, TilesetError};
pub use requests::{apply_tile_collision_requests, TileCollisionRequest};
pub use tile::Tile;
pub use tilemap::Tilemap;

/// Tilemap plugin for Tessera.
/// Owns tile-type collision state and applies collision requests.
pub struct TsTilemapPlugin;

impl Plugin for TsTilemapPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TileCollisionRequest>()
            .add_systems(Update, apply_tile_collision_requests);
    }
}
