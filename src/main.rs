use bevy::log::LogPlugin;
use bevy::prelude::*;
use ts_core::{Face, TileCoord};
use ts_persistence::tileset_io::{ensure_tilesets_dir, save_tileset, tileset_filename};
use ts_tilemap::{Collision, TileCollisionRequest, TileSelection, Tilemap, TilesetDefinition};

/// Usage: `tessera [TILESET.ron]` or `tessera --write-default`.
fn main() {
    let arg = std::env::args().nth(1);

    if arg.as_deref() == Some("--write-default") {
        write_default_tileset();
        return;
    }

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .add_plugins((
            ts_core::TsCorePlugin,
            ts_tilemap::TsTilemapPlugin,
            ts_persistence::TsPersistencePlugin {
                tileset: arg.map(Into::into),
            },
        ))
        .add_systems(Startup, spawn_tilemap)
        .add_systems(
            Update,
            log_tilemaps.after(ts_tilemap::apply_tile_collision_requests),
        );

    // Startup queues the demo request; Update applies it, then logs.
    app.finish();
    app.cleanup();
    app.update();
}

fn write_default_tileset() {
    let def = TilesetDefinition::default();
    let result = ensure_tilesets_dir().and_then(|dir| {
        let path = dir.join(tileset_filename(&def.name));
        save_tileset(&path, &def).map(|()| path)
    });
    match result {
        Ok(path) => println!("Saved tileset to {}", path.display()),
        Err(e) => eprintln!("Failed to save tileset: {}", e),
    }
}

/// Spawn the tilemap described by the tileset resource and fill its first row.
fn spawn_tilemap(
    mut commands: Commands,
    tileset: Res<TilesetDefinition>,
    mut requests: EventWriter<TileCollisionRequest>,
) {
    let entity = commands.spawn_empty().id();
    let mut tilemap = tileset.build_tilemap(entity);

    if tilemap.tile_count() > 0 {
        for x in 0..tilemap.columns as i32 {
            let index = x as u32 % tilemap.tile_count();
            tilemap.set_cell(TileCoord::new(x, 0), Some(index));
        }

        // Demo: the first tile type becomes a floor once Update applies this.
        requests.send(TileCollisionRequest::Set {
            tilemap: entity,
            tiles: TileSelection::single(0),
            collision: Collision::UP,
            reset: false,
            separate_x: true,
            separate_y: true,
        });
    }

    commands.entity(entity).insert(tilemap);
}

fn log_tilemaps(tilemaps: Query<&Tilemap>) {
    for tilemap in &tilemaps {
        for tile in tilemap.tiles().iter().filter(|t| t.is_solid()) {
            let faces: Vec<_> = Face::all()
                .iter()
                .filter(|f| tile.collides(**f))
                .map(|f| f.name())
                .collect();
            info!("{} {:?} faces={:?}", tile, tile.name, faces);
        }
        // Cells in the first row that stop something falling from above.
        let floor = (0..tilemap.columns as i32)
            .filter(|&x| tilemap.blocks_entry(TileCoord::new(x, -1), Face::Down))
            .count();
        info!(
            tiles = tilemap.tile_count(),
            floor,
            solid = tilemap.tiles().iter().filter(|t| t.is_solid()).count(),
            "tilemap state"
        );
    }
}
