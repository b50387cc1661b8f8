use bevy::prelude::*;

use crate::collision::Collision;
use crate::definition::TileSelection;
use crate::tilemap::Tilemap;

/// A change to tile-type collision state, applied in the order it was sent.
#[derive(Event, Clone, Debug)]
pub enum TileCollisionRequest {
    /// Run `set_collision` on the selected tile types.
    Set {
        tilemap: Entity,
        tiles: TileSelection,
        collision: Collision,
        reset: bool,
        separate_x: bool,
        separate_y: bool,
    },
    /// Run `reset_collision` on the selected tile types.
    Reset {
        tilemap: Entity,
        tiles: TileSelection,
    },
}

impl TileCollisionRequest {
    /// The tilemap entity this request targets.
    pub fn tilemap(&self) -> Entity {
        match self {
            Self::Set { tilemap, .. } | Self::Reset { tilemap, .. } => *tilemap,
        }
    }

    fn apply(&self, tilemap: &mut Tilemap) {
        match self {
            Self::Set {
                tiles,
                collision,
                reset,
                separate_x,
                separate_y,
                ..
            } => match tiles {
                TileSelection::Range { start, end } => tilemap.set_collision_range(
                    *start,
                    *end,
                    *collision,
                    *reset,
                    *separate_x,
                    *separate_y,
                ),
                TileSelection::Indices(list) => tilemap.set_collision_by_index(
                    list,
                    *collision,
                    *reset,
                    *separate_x,
                    *separate_y,
                ),
            },
            Self::Reset { tiles, .. } => match tiles {
                TileSelection::Range { start, end } => tilemap.reset_collision_range(*start, *end),
                TileSelection::Indices(list) => tilemap.reset_collision_by_index(list),
            },
        }
    }
}

/// Applies queued collision requests in send order. This is the only system
/// that mutates tile collision state; resolution systems take `&Tilemap`.
pub fn apply_tile_collision_requests(
    mut requests: EventReader<TileCollisionRequest>,
    mut tilemaps: Query<&mut Tilemap>,
) {
    for request in requests.read() {
        let Ok(mut tilemap) = tilemaps.get_mut(request.tilemap()) else {
            warn!(entity = ?request.tilemap(), "collision request for an entity without a tilemap");
            continue;
        };
        request.apply(&mut tilemap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TsTilemapPlugin;

    fn app_with_tilemap() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(TsTilemapPlugin);
        let entity = app.world_mut().spawn_empty().id();
        let mut tilemap = Tilemap::new(4, 4, 16.0, 16.0);
        tilemap.generate_tiles(entity, 4);
        app.world_mut().entity_mut(entity).insert(tilemap);
        (app, entity)
    }

    fn set(tilemap: Entity, tiles: TileSelection, collision: Collision) -> TileCollisionRequest {
        TileCollisionRequest::Set {
            tilemap,
            tiles,
            collision,
            reset: false,
            separate_x: true,
            separate_y: true,
        }
    }

    #[test]
    fn set_request_updates_tiles() {
        let (mut app, entity) = app_with_tilemap();
        app.world_mut().send_event(TileCollisionRequest::Set {
            tilemap: entity,
            tiles: TileSelection::Range { start: 1, end: 2 },
            collision: Collision::WALL,
            reset: true,
            separate_x: true,
            separate_y: false,
        });
        app.update();

        let tilemap = app.world().get::<Tilemap>(entity).unwrap();
        assert!(!tilemap.tile(0).unwrap().is_solid());
        let tile = tilemap.tile(2).unwrap();
        assert!(tile.collide_left() && tile.collide_right());
        assert!(!tile.separate_y());
    }

    #[test]
    fn set_then_reset_in_one_frame_leaves_tile_clear() {
        let (mut app, entity) = app_with_tilemap();
        app.world_mut()
            .send_event(set(entity, TileSelection::single(0), Collision::ANY));
        app.world_mut().send_event(TileCollisionRequest::Reset {
            tilemap: entity,
            tiles: TileSelection::single(0),
        });
        app.update();

        let tile = app.world().get::<Tilemap>(entity).unwrap().tile(0).unwrap();
        assert!(!tile.is_solid());
        assert_eq!(tile.allow_collisions(), Collision::NONE);
    }

    #[test]
    fn reset_then_set_in_one_frame_keeps_only_new_faces() {
        let (mut app, entity) = app_with_tilemap();
        app.world_mut()
            .send_event(set(entity, TileSelection::single(3), Collision::ANY));
        app.update();

        app.world_mut().send_event(TileCollisionRequest::Reset {
            tilemap: entity,
            tiles: TileSelection::single(3),
        });
        app.world_mut()
            .send_event(set(entity, TileSelection::single(3), Collision::DOWN));
        app.update();

        let tile = app.world().get::<Tilemap>(entity).unwrap().tile(3).unwrap();
        assert!(tile.collide_down());
        assert!(!tile.collide_up());
        assert!(!tile.collide_left());
    }

    #[test]
    fn request_for_missing_tilemap_is_dropped() {
        let (mut app, entity) = app_with_tilemap();
        let stray = app.world_mut().spawn_empty().id();
        app.world_mut()
            .send_event(set(stray, TileSelection::single(0), Collision::ANY));
        app.update();

        let tilemap = app.world().get::<Tilemap>(entity).unwrap();
        assert!(!tilemap.tile(0).unwrap().is_solid());
    }
}
