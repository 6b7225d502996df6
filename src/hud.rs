use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::sprite::Anchor;

use crate::camera::hud_layer;
use crate::game_logic::{PlayerSlot, Race};
use crate::map::to_world;

pub const FONT_PATH: &str = "fonts/slkscr.ttf";
const HUD_Z: f32 = 50.0;

/// Font every text in the game uses. Falls back to Bevy's built-in font
/// when the file can't be loaded.
#[derive(Resource)]
pub struct GameFont(pub Handle<Font>);

impl FromWorld for GameFont {
    fn from_world(world: &mut World) -> Self {
        let asset_server = world.resource::<AssetServer>();
        GameFont(asset_server.load(FONT_PATH))
    }
}

impl GameFont {
    pub fn text_font(&self, font_size: f32) -> TextFont {
        TextFont {
            font: self.0.clone(),
            font_size,
            ..default()
        }
    }
}

pub fn fall_back_to_default_font(
    asset_server: Res<AssetServer>,
    mut game_font: ResMut<GameFont>,
    mut texts: Query<&mut TextFont>,
) {
    if game_font.0 == Handle::default() {
        return;
    }

    if let LoadState::Failed(e) = asset_server.load_state(game_font.0.id()) {
        warn!("Could not load {} ({}), using the default font", FONT_PATH, e);
        game_font.0 = Handle::default();
        for mut text_font in &mut texts {
            text_font.font = Handle::default();
        }
    }
}

/// Where a HUD text sits inside its player's half of the screen, measured
/// from the top of the viewport.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub enum HudPlacement {
    TopLeft(Vec2),
    TopRight(Vec2),
    TopCenter(f32),
}

impl HudPlacement {
    /// Track-space point for a viewport whose top-left corner is at
    /// `corner`.
    pub fn resolve(&self, corner: Vec2, viewport_size: Vec2) -> Vec2 {
        match *self {
            HudPlacement::TopLeft(offset) => corner + offset,
            HudPlacement::TopRight(offset) => corner + Vec2::new(viewport_size.x - offset.x, offset.y),
            HudPlacement::TopCenter(y) => corner + Vec2::new(viewport_size.x / 2.0, y),
        }
    }

    pub fn anchor(&self) -> Anchor {
        match self {
            HudPlacement::TopLeft(_) => Anchor::TopLeft,
            HudPlacement::TopRight(_) => Anchor::TopRight,
            HudPlacement::TopCenter(_) => Anchor::TopCenter,
        }
    }
}

#[derive(Component)]
pub struct LapText;

pub fn lap_label(player: PlayerSlot, lap: u32, lap_target: u32) -> String {
    format!("P{} Lap: {}/{}", player.number(), lap, lap_target)
}

/// Text bundle pinned to one player's viewport.
pub fn hud_text(
    player: PlayerSlot,
    placement: HudPlacement,
    text: String,
    font: TextFont,
    color: Color,
) -> impl Bundle {
    (
        Text2d::new(text),
        font,
        TextColor(color),
        placement.anchor(),
        placement,
        hud_layer(player),
        Transform::from_xyz(0.0, 0.0, HUD_Z),
        player,
    )
}

pub fn spawn_lap_hud(mut commands: Commands, game_font: Res<GameFont>, race: Res<Race>) {
    for player in PlayerSlot::ALL {
        let lap = race.vehicle(player).lap;
        commands.spawn((
            hud_text(
                player,
                HudPlacement::TopLeft(Vec2::new(20.0, 20.0)),
                lap_label(player, lap, race.lap_target),
                game_font.text_font(25.0),
                Color::WHITE,
            ),
            LapText,
        ));
    }
}

pub fn update_lap_hud(race: Res<Race>, mut texts: Query<(&mut Text2d, &PlayerSlot), With<LapText>>) {
    if !race.is_changed() {
        return;
    }

    for (mut text, player) in &mut texts {
        let label = lap_label(*player, race.vehicle(*player).lap, race.lap_target);
        if text.0 != label {
            text.0 = label;
        }
    }
}

// HUD texts ride along with their player's camera
pub fn place_hud(race: Res<Race>, mut texts: Query<(&mut Transform, &HudPlacement, &PlayerSlot)>) {
    for (mut transform, placement, player) in &mut texts {
        let corner = race.camera(*player).position;
        let point = placement.resolve(corner, race.viewport_size);
        transform.translation = to_world(point, HUD_Z);
    }
}
