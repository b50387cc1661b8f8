use bevy::prelude::*;
use ts_core::{Face, TileCoord};

use crate::collision::Collision;
use crate::tile::Tile;

/// Tile-type table plus the grid of cells that reference it.
///
/// Cells store a tile index (or nothing). Collision state lives on the
/// shared [`Tile`], so changing a tile type affects every cell using it.
#[derive(Component, Debug, Clone)]
pub struct Tilemap {
    pub columns: u32,
    pub rows: u32,
    pub tile_width: f32,
    pub tile_height: f32,
    tiles: Vec<Tile>,
    cells: Vec<Option<u32>>,
}

impl Tilemap {
    pub fn new(columns: u32, rows: u32, tile_width: f32, tile_height: f32) -> Self {
        Self {
            columns,
            rows,
            tile_width,
            tile_height,
            tiles: Vec::new(),
            cells: vec![None; columns as usize * rows as usize],
        }
    }

    /// Append `qty` tile types owned by `owner`, indexed after the existing ones.
    pub fn generate_tiles(&mut self, owner: Entity, qty: u32) {
        let start = self.tiles.len() as u32;
        self.tiles.extend(
            (start..start + qty).map(|i| Tile::new(owner, i, self.tile_width, self.tile_height)),
        );
    }

    pub fn tile(&self, index: u32) -> Option<&Tile> {
        self.tiles.get(index as usize)
    }

    pub fn tile_mut(&mut self, index: u32) -> Option<&mut Tile> {
        self.tiles.get_mut(index as usize)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile_count(&self) -> u32 {
        self.tiles.len() as u32
    }

    fn range_mut(&mut self, start: u32, end: u32) -> impl Iterator<Item = &mut Tile> {
        self.tiles
            .iter_mut()
            .filter(move |tile| (start..=end).contains(&tile.index()))
    }

    /// Apply `set_collision` to every existing tile in `start..=end`.
    pub fn set_collision_range(
        &mut self,
        start: u32,
        end: u32,
        collision: Collision,
        reset_collisions: bool,
        separate_x: bool,
        separate_y: bool,
    ) {
        for tile in self.range_mut(start, end) {
            tile.set_collision(collision, reset_collisions, separate_x, separate_y);
        }
    }

    /// Apply `set_collision` to each listed tile. Unknown indices are skipped.
    pub fn set_collision_by_index(
        &mut self,
        indices: &[u32],
        collision: Collision,
        reset_collisions: bool,
        separate_x: bool,
        separate_y: bool,
    ) {
        for &index in indices {
            if let Some(tile) = self.tile_mut(index) {
                tile.set_collision(collision, reset_collisions, separate_x, separate_y);
            }
        }
    }

    pub fn reset_collision_range(&mut self, start: u32, end: u32) {
        for tile in self.range_mut(start, end) {
            tile.reset_collision();
        }
    }

    pub fn reset_collision_by_index(&mut self, indices: &[u32]) {
        for &index in indices {
            if let Some(tile) = self.tile_mut(index) {
                tile.reset_collision();
            }
        }
    }

    /// Assign a tile index to a cell. Returns false if `coord` is outside the grid.
    pub fn set_cell(&mut self, coord: TileCoord, index: Option<u32>) -> bool {
        match coord.to_index(self.columns, self.rows) {
            Some(i) => {
                self.cells[i] = index;
                true
            }
            None => false,
        }
    }

    pub fn cell(&self, coord: TileCoord) -> Option<u32> {
        let i = coord.to_index(self.columns, self.rows)?;
        self.cells[i]
    }

    /// The tile type used by the cell at `coord`.
    pub fn tile_at(&self, coord: TileCoord) -> Option<&Tile> {
        self.tile(self.cell(coord)?)
    }

    /// Whether the given face of the cell at `coord` takes part in collision.
    pub fn face_collides(&self, coord: TileCoord, face: Face) -> bool {
        self.tile_at(coord).is_some_and(|tile| tile.collides(face))
    }

    /// Whether leaving the cell at `from` across `face` is stopped by the
    /// neighbor's facing side. Moving right into a cell tests its left face.
    pub fn blocks_entry(&self, from: TileCoord, face: Face) -> bool {
        self.face_collides(from.neighbor(face), face.opposite())
    }

    /// Destroy every tile type and clear the grid.
    pub fn destroy(&mut self) {
        for tile in &mut self.tiles {
            tile.destroy();
        }
        self.tiles.clear();
        self.cells.fill(None);
    }
}
