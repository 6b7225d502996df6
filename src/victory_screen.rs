use bevy::prelude::*;

use crate::game_logic::{PlayerSlot, Race};
use crate::hud::{GameFont, HudPlacement, hud_text};

const WIN_COLOR: Color = Color::srgb(1.0, 0.84, 0.0);
const LOSE_COLOR: Color = Color::srgb(0.8, 0.8, 0.8);

#[derive(Component)]
pub struct ResultBanner;

/// Headline and follow-up line shown in `player`'s half once `winner` is
/// known.
pub fn result_lines(player: PlayerSlot, winner: PlayerSlot) -> (String, &'static str) {
    if player == winner {
        (format!("PLAYER {} WINS", player.number()), "GOOD JOB!")
    } else {
        (format!("PLAYER {} LOSES", player.number()), "IT'S OK...")
    }
}

pub fn setup_victory_screen(
    mut commands: Commands,
    race: Res<Race>,
    game_font: Res<GameFont>,
    banners: Query<(), With<ResultBanner>>,
) {
    let Some(winner) = race.winner() else {
        return;
    };
    if !banners.is_empty() {
        return;
    }

    for player in PlayerSlot::ALL {
        let (headline, follow_up) = result_lines(player, winner);
        let color = if player == winner { WIN_COLOR } else { LOSE_COLOR };

        commands.spawn((
            hud_text(
                player,
                HudPlacement::TopCenter(200.0),
                headline,
                game_font.text_font(48.0),
                color,
            ),
            ResultBanner,
        ));
        commands.spawn((
            hud_text(
                player,
                HudPlacement::TopCenter(270.0),
                follow_up.to_string(),
                game_font.text_font(32.0),
                color,
            ),
            ResultBanner,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_lines() {
        assert_eq!(
            result_lines(PlayerSlot::Two, PlayerSlot::Two),
            ("PLAYER 2 WINS".to_string(), "GOOD JOB!")
        );
        assert_eq!(
            result_lines(PlayerSlot::One, PlayerSlot::Two),
            ("PLAYER 1 LOSES".to_string(), "IT'S OK...")
        );
    }
}
