use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Selects the vehicle profile both players race with.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Strict, case-insensitive parse. `None` for anything unrecognised.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Lenient parse used for query strings and command lines: a missing or
    /// unrecognised value means medium.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    pub fn profile(&self) -> VehicleProfile {
        match self {
            Difficulty::Easy => VehicleProfile {
                acceleration: 0.1,
                max_speed: 2.5,
                turn_rate: 0.07,
                color: Color::srgb(1.0, 0.0, 0.0),
                sprite: "sprites/sprite1.png",
            },
            Difficulty::Medium => VehicleProfile {
                acceleration: 0.2,
                max_speed: 4.0,
                turn_rate: 0.05,
                color: Color::srgb(0.0, 0.5, 0.0),
                sprite: "sprites/sprite2.png",
            },
            Difficulty::Hard => VehicleProfile {
                acceleration: 0.3,
                max_speed: 6.0,
                turn_rate: 0.035,
                color: Color::srgb(0.0, 0.0, 1.0),
                sprite: "sprites/sprite3.png",
            },
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable car traits plus the art that goes with them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleProfile {
    pub acceleration: f32,
    pub max_speed: f32,
    pub turn_rate: f32,
    /// Fallback colour when the sprite is unavailable.
    pub color: Color,
    pub sprite: &'static str,
}
