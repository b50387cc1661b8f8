use bevy::prelude::*;

pub mod coords;
pub mod face;

pub use coords::TileCoord;
pub use face::Face;

/// Core plugin providing foundational types for Tessera.
pub struct TsCorePlugin;

impl Plugin for TsCorePlugin {
    fn build(&self, _app: &mut App) {
        // Core types are used by other crates; no systems to register here.
    }
}
