//! Eight-way facing direction.
//!
//! Facings travel over the wire as small integers (`0..=7`), so
//! [`Facing::from_index`] is the checked entry point. When auto-rotation is
//! enabled the facing also selects the sprite rotation.

use crate::components::rotation::Rotation;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    #[default]
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
    UpLeft = 4,
    UpRight = 5,
    DownLeft = 6,
    DownRight = 7,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::Up,
        Facing::Down,
        Facing::Left,
        Facing::Right,
        Facing::UpLeft,
        Facing::UpRight,
        Facing::DownLeft,
        Facing::DownRight,
    ];

    /// Map a wire index to a facing. Returns `None` outside `0..=7`.
    pub fn from_index(index: i32) -> Option<Facing> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn index(self) -> i32 {
        self as i32
    }

    /// Sprite angle in degrees, clockwise from up.
    pub fn degrees(self) -> f32 {
        match self {
            Facing::Up => 0.0,
            Facing::Down => 180.0,
            Facing::Left => 270.0,
            Facing::Right => 90.0,
            Facing::UpLeft => 315.0,
            Facing::UpRight => 45.0,
            Facing::DownLeft => 225.0,
            Facing::DownRight => 135.0,
        }
    }

    /// Rotation to apply when drawing; always zero unless `auto_rotate` is set.
    pub fn rotation(self, auto_rotate: bool) -> Rotation {
        if auto_rotate {
            Rotation::new(self.degrees())
        } else {
            Rotation::default()
        }
    }
}
