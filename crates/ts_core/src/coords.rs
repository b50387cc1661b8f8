use crate::face::Face;

/// Grid position of a map cell in tile-space coordinates.
///
/// `y` grows downward, matching row order in the cell grid.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Default)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell sharing the given face with this one.
    pub const fn neighbor(&self, face: Face) -> Self {
        let (dx, dy) = face.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Row-major index into a grid `columns` wide, or `None` outside `columns × rows`.
    pub fn to_index(&self, columns: u32, rows: u32) -> Option<usize> {
        let x = u32::try_from(self.x).ok()?;
        let y = u32::try_from(self.y).ok()?;
        if x >= columns || y >= rows {
            return None;
        }
        Some(y as usize * columns as usize + x as usize)
    }
}
