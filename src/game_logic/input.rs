use crate::game_logic::PlayerSlot;
use bevy::prelude::*;

/// What a player wants the car to do this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl DriveIntent {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

/// One player's four driving keys. Physical key codes, so letter case and
/// keyboard layout modifiers never matter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
}

impl KeyBindings {
    pub const WASD: KeyBindings = KeyBindings {
        up: KeyCode::KeyW,
        down: KeyCode::KeyS,
        left: KeyCode::KeyA,
        right: KeyCode::KeyD,
    };

    pub const ARROWS: KeyBindings = KeyBindings {
        up: KeyCode::ArrowUp,
        down: KeyCode::ArrowDown,
        left: KeyCode::ArrowLeft,
        right: KeyCode::ArrowRight,
    };

    pub fn for_player(player: PlayerSlot) -> Self {
        match player {
            PlayerSlot::One => Self::WASD,
            PlayerSlot::Two => Self::ARROWS,
        }
    }

    pub fn intent(&self, keys: &ButtonInput<KeyCode>) -> DriveIntent {
        DriveIntent {
            forward: keys.pressed(self.up),
            backward: keys.pressed(self.down),
            left: keys.pressed(self.left),
            right: keys.pressed(self.right),
        }
    }
}

/// Sample both players' intents from the shared key table.
pub fn read_intents(keys: &ButtonInput<KeyCode>) -> [DriveIntent; 2] {
    PlayerSlot::ALL.map(|player| KeyBindings::for_player(player).intent(keys))
}
