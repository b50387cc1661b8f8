use std::fmt;

use bevy::prelude::*;
use ts_core::Face;

use crate::collision::Collision;

/// One tile type of a tilemap: geometry, mass and per-face collision state.
///
/// A `Tile` describes a type shared by every map cell that uses it, not a
/// single on-screen cell. The collide flags are a cached decoding of
/// [`Tile::allow_collisions`] and only change through [`Tile::set_collision`]
/// and [`Tile::reset_collision`].
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    index: u32,
    width: f32,
    height: f32,
    /// Virtual mass used by separation response.
    pub mass: f32,
    /// Free-form label, never read by the tilemap itself.
    pub name: Option<String>,
    allow_collisions: Collision,
    collide_left: bool,
    collide_right: bool,
    collide_up: bool,
    collide_down: bool,
    separate_x: bool,
    separate_y: bool,
    tilemap: Option<Entity>,
}

impl Tile {
    /// Create a tile type owned by the `tilemap` entity.
    ///
    /// Geometry is stored as given; zero or negative sizes are accepted.
    pub fn new(tilemap: Entity, index: u32, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
            mass: 1.0,
            name: None,
            allow_collisions: Collision::NONE,
            collide_left: false,
            collide_right: false,
            collide_up: false,
            collide_down: false,
            separate_x: true,
            separate_y: true,
            tilemap: Some(tilemap),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// The raw mask passed to the last `set_collision`, or `NONE` after a reset.
    pub fn allow_collisions(&self) -> Collision {
        self.allow_collisions
    }

    pub fn collide_left(&self) -> bool {
        self.collide_left
    }

    pub fn collide_right(&self) -> bool {
        self.collide_right
    }

    pub fn collide_up(&self) -> bool {
        self.collide_up
    }

    pub fn collide_down(&self) -> bool {
        self.collide_down
    }

    pub fn collides(&self, face: Face) -> bool {
        match face {
            Face::Left => self.collide_left,
            Face::Right => self.collide_right,
            Face::Up => self.collide_up,
            Face::Down => self.collide_down,
        }
    }

    /// True if any face takes part in collision.
    pub fn is_solid(&self) -> bool {
        self.collide_left || self.collide_right || self.collide_up || self.collide_down
    }

    pub fn separate_x(&self) -> bool {
        self.separate_x
    }

    pub fn separate_y(&self) -> bool {
        self.separate_y
    }

    /// The owning tilemap entity, `None` once destroyed.
    pub fn tilemap(&self) -> Option<Entity> {
        self.tilemap
    }

    pub fn is_destroyed(&self) -> bool {
        self.tilemap.is_none()
    }

    /// Decode `collision` into the per-face flags and set the separation toggles.
    ///
    /// Faces implied by the mask are switched on. Faces it does not imply keep
    /// their previous value unless `reset_collisions` clears them first.
    /// `ANY` switches all four faces on. Bits naming no face are stored in the
    /// mask but otherwise ignored.
    pub fn set_collision(
        &mut self,
        collision: Collision,
        reset_collisions: bool,
        separate_x: bool,
        separate_y: bool,
    ) {
        if reset_collisions {
            self.reset_collision();
        }

        self.separate_x = separate_x;
        self.separate_y = separate_y;
        self.allow_collisions = collision;

        if collision.contains(Collision::ANY) {
            self.collide_left = true;
            self.collide_right = true;
            self.collide_up = true;
            self.collide_down = true;
        } else {
            // Set-only: a face not implied by this mask is never cleared here.
            if collision.implies(Face::Left) {
                self.collide_left = true;
            }
            if collision.implies(Face::Right) {
                self.collide_right = true;
            }
            if collision.implies(Face::Up) {
                self.collide_up = true;
            }
            if collision.implies(Face::Down) {
                self.collide_down = true;
            }
        }

        debug!(
            index = self.index,
            mask = collision.bits(),
            reset = reset_collisions,
            left = self.collide_left,
            right = self.collide_right,
            up = self.collide_up,
            down = self.collide_down,
            "tile collision set"
        );
    }

    /// Clear the mask and all four collide flags. Separation toggles are kept.
    pub fn reset_collision(&mut self) {
        self.allow_collisions = Collision::NONE;
        self.collide_left = false;
        self.collide_right = false;
        self.collide_up = false;
        self.collide_down = false;
    }

    /// Release the reference to the owning tilemap.
    ///
    /// Collision state, mass and geometry are left untouched.
    pub fn destroy(&mut self) {
        self.tilemap = None;
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{{Tiled (index={} collisions={} width={} height={})}}]",
            self.index,
            self.allow_collisions.bits(),
            self.width,
            self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile() -> Tile {
        Tile::new(Entity::from_raw(7), 3, 16.0, 16.0)
    }

    fn flags(tile: &Tile) -> [bool; 4] {
        [
            tile.collide_left(),
            tile.collide_right(),
            tile.collide_up(),
            tile.collide_down(),
        ]
    }

    #[test]
    fn new_tile_has_defaults() {
        let t = tile();
        assert_eq!(t.index(), 3);
        assert_eq!(t.width(), 16.0);
        assert_eq!(t.height(), 16.0);
        assert_eq!(t.mass, 1.0);
        assert!(t.name.is_none());
        assert_eq!(t.allow_collisions(), Collision::NONE);
        assert_eq!(flags(&t), [false; 4]);
        assert!(t.separate_x());
        assert!(t.separate_y());
        assert_eq!(t.tilemap(), Some(Entity::from_raw(7)));
    }

    #[test]
    fn new_tile_accepts_degenerate_geometry() {
        let t = Tile::new(Entity::from_raw(1), 0, 0.0, -4.0);
        assert_eq!(t.width(), 0.0);
        assert_eq!(t.height(), -4.0);
    }

    #[test]
    fn any_sets_every_face_regardless_of_other_bits() {
        for extra in [0, 0x0001, 0x0100, 0x8000_0000] {
            let mut t = tile();
            t.set_collision(Collision::from_mask(Collision::ANY.bits() | extra), false, true, true);
            assert_eq!(flags(&t), [true; 4]);
        }
    }

    #[test]
    fn wall_sets_left_and_right() {
        let mut t = tile();
        t.set_collision(Collision::WALL, false, true, true);
        assert_eq!(flags(&t), [true, true, false, false]);
    }

    #[test]
    fn ceiling_sets_up_and_down() {
        let mut t = tile();
        t.set_collision(Collision::CEILING, false, true, true);
        assert_eq!(flags(&t), [false, false, true, true]);
    }

    #[test]
    fn wall_with_up_adds_up() {
        let mut t = tile();
        t.set_collision(Collision::WALL | Collision::UP, false, true, true);
        assert_eq!(flags(&t), [true, true, true, false]);
    }

    #[test]
    fn single_faces_decode_independently() {
        for face in Face::all() {
            let mut t = tile();
            t.set_collision(Collision::for_face(*face), false, true, true);
            for other in Face::all() {
                assert_eq!(t.collides(*other), other == face);
            }
        }
    }

    #[test]
    fn reset_then_none_clears_everything() {
        let mut t = tile();
        t.set_collision(Collision::ANY, false, true, true);
        t.reset_collision();
        t.set_collision(Collision::NONE, false, false, true);
        assert_eq!(flags(&t), [false; 4]);
        assert!(!t.separate_x());
        assert!(t.separate_y());
        assert_eq!(t.allow_collisions(), Collision::NONE);
    }

    #[test]
    fn reset_flag_clears_stale_faces() {
        let mut t = tile();
        t.set_collision(Collision::ANY, false, true, true);
        t.set_collision(Collision::LEFT, true, true, false);
        assert_eq!(flags(&t), [true, false, false, false]);
        assert_eq!(t.allow_collisions(), Collision::LEFT);
        assert!(!t.separate_y());
    }

    #[test]
    fn without_reset_stale_faces_survive() {
        let mut t = tile();
        t.set_collision(Collision::RIGHT, false, true, true);
        t.set_collision(Collision::LEFT, false, true, true);
        assert!(t.collide_left());
        assert!(t.collide_right());
        assert_eq!(t.allow_collisions(), Collision::LEFT);
    }

    #[test]
    fn none_without_reset_keeps_faces() {
        let mut t = tile();
        t.set_collision(Collision::CEILING, false, true, true);
        t.set_collision(Collision::NONE, false, true, true);
        assert_eq!(flags(&t), [false, false, true, true]);
        assert_eq!(t.allow_collisions(), Collision::NONE);
    }

    #[test]
    fn unknown_bits_are_stored_but_ignored() {
        let mut t = tile();
        t.set_collision(Collision::from_mask(0x0002 | 0x0040), false, true, true);
        assert_eq!(flags(&t), [false; 4]);
        assert_eq!(t.allow_collisions().bits(), 0x0042);
    }

    #[test]
    fn reset_keeps_separation_and_mass() {
        let mut t = tile();
        t.mass = 3.5;
        t.set_collision(Collision::WALL, false, false, false);
        t.reset_collision();
        t.reset_collision();
        assert_eq!(flags(&t), [false; 4]);
        assert_eq!(t.allow_collisions(), Collision::NONE);
        assert!(!t.separate_x());
        assert!(!t.separate_y());
        assert_eq!(t.mass, 3.5);
    }

    #[test]
    fn display_fresh_tile() {
        assert_eq!(
            tile().to_string(),
            "[{Tiled (index=3 collisions=0 width=16 height=16)}]"
        );
    }

    #[test]
    fn display_shows_raw_mask() {
        let mut t = tile();
        t.set_collision(Collision::WALL, false, true, true);
        assert_eq!(
            t.to_string(),
            "[{Tiled (index=3 collisions=17 width=16 height=16)}]"
        );
    }

    #[test]
    fn destroy_only_drops_tilemap() {
        let mut t = tile().with_name("spikes");
        t.set_collision(Collision::UP, false, true, false);
        let before = flags(&t);
        t.destroy();
        assert!(t.is_destroyed());
        assert_eq!(t.tilemap(), None);
        assert_eq!(flags(&t), before);
        assert_eq!(t.allow_collisions(), Collision::UP);
        assert_eq!(t.name.as_deref(), Some("spikes"));
        assert!(!t.separate_y());
    }
}
