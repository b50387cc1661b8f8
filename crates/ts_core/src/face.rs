/// One of the four cardinal faces of a map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Left,
    Right,
    Up,
    Down,
}

impl Face {
    /// Get all faces in order.
    pub fn all() -> &'static [Face] {
        &[Self::Left, Self::Right, Self::Up, Self::Down]
    }

    pub const fn opposite(&self) -> Face {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Grid step `(dx, dy)` towards the neighbor across this face.
    pub const fn offset(&self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }

    /// True for faces crossed by horizontal movement.
    pub const fn is_horizontal(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}
