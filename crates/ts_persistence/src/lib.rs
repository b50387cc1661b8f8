use bevy::prelude::*;

pub mod tileset_io;

pub use tileset_io::{load_tileset, save_tileset, TilesetIoError};

/// Persistence plugin for Tessera.
/// Loads the tileset definition from RON when one is configured.
pub struct TsPersistencePlugin {
    /// Tileset file to load at build time. `None` keeps the default definition.
    pub tileset: Option<std::path::PathBuf>,
}

impl Plugin for TsPersistencePlugin {
    fn build(&self, app: &mut App) {
        let def = match &self.tileset {
            Some(path) => match load_tileset(path) {
                Ok(def) => {
                    info!(path = %path.display(), tileset = %def.name, "loaded tileset");
                    def
                }
                Err(e) => {
                    error!(path = %path.display(), "failed to load tileset: {}", e);
                    ts_tilemap::TilesetDefinition::default()
                }
            },
            None => ts_tilemap::TilesetDefinition::default(),
        };
        app.insert_resource(def);
    }
}
