use bevy::prelude::*;

#[derive(Component)]
pub struct Car;

/// Which half of the split screen an entity belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn number(self) -> usize {
        self.index() + 1
    }
}

#[derive(Component)]
pub struct CheckpointMarker {
    pub index: usize,
}
