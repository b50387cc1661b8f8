use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use ts_core::Face;

bitflags! {
    /// Per-face collision mask for a tile type.
    ///
    /// `WALL`, `CEILING` and `ANY` are composites of the four face bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Collision: u32 {
        const NONE = 0;
        const LEFT = 0x0001;
        const RIGHT = 0x0010;
        const UP = 0x0100;
        const DOWN = 0x1000;
        const WALL = Self::LEFT.bits() | Self::RIGHT.bits();
        const CEILING = Self::UP.bits() | Self::DOWN.bits();
        const ANY = Self::WALL.bits() | Self::CEILING.bits();
    }
}

impl Collision {
    /// Wrap a raw mask, keeping bits that name no face.
    pub const fn from_mask(mask: u32) -> Self {
        Self::from_bits_retain(mask)
    }

    /// The single-face flag for `face`.
    pub const fn for_face(face: Face) -> Self {
        match face {
            Face::Left => Self::LEFT,
            Face::Right => Self::RIGHT,
            Face::Up => Self::UP,
            Face::Down => Self::DOWN,
        }
    }

    /// Whether this mask asks `face` to collide, either directly or through
    /// the composite covering it.
    pub fn implies(&self, face: Face) -> bool {
        let composite = if face.is_horizontal() {
            Self::WALL
        } else {
            Self::CEILING
        };
        self.contains(Self::ANY) || self.contains(Self::for_face(face)) || self.contains(composite)
    }
}
