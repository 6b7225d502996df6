use bevy::prelude::*;
use bevy::render::camera::{ClearColorConfig, Viewport};
use bevy::render::view::RenderLayers;
use bevy::window::PrimaryWindow;

use crate::game_logic::{PlayerSlot, Race};
use crate::map::to_world;

// Window-related constants
pub const WIN_W: f32 = 1280.;
pub const WIN_H: f32 = 720.;

#[derive(Component)]
pub struct MenuCamera;

#[derive(Component)]
pub struct PlayerCamera;

/// Size of one half of the split screen in logical pixels.
pub fn split_viewport_size(window: Option<&Window>) -> Vec2 {
    match window {
        Some(window) => Vec2::new(window.width() / 2.0, window.height()),
        None => Vec2::new(WIN_W / 2.0, WIN_H),
    }
}

/// Layer only the given player's camera renders, used for its HUD.
pub fn hud_layer(player: PlayerSlot) -> RenderLayers {
    RenderLayers::layer(1 + player.index())
}

pub fn spawn_menu_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MenuCamera));
}

pub fn despawn_menu_camera(mut commands: Commands, cameras: Query<Entity, With<MenuCamera>>) {
    for entity in &cameras {
        commands.entity(entity).despawn();
    }
}

// One camera per player; viewports are assigned by fit_split_viewports
pub fn spawn_split_cameras(mut commands: Commands, race: Res<Race>) {
    for player in PlayerSlot::ALL {
        let center = race.camera(player).center(race.viewport_size);
        commands.spawn((
            Camera2d,
            Camera {
                // renders cameras with different priorities to prevent ambiguities
                order: player.index() as isize,
                // the first camera already cleared the whole window
                clear_color: match player {
                    PlayerSlot::One => ClearColorConfig::Default,
                    PlayerSlot::Two => ClearColorConfig::None,
                },
                ..default()
            },
            RenderLayers::from_layers(&[0, 1 + player.index()]),
            Transform::from_translation(to_world(center, 0.0)),
            PlayerCamera,
            player,
        ));
    }
}

/// Keep each camera on its half of the window and tell the race how big a
/// half is.
pub fn fit_split_viewports(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut Camera, &PlayerSlot), With<PlayerCamera>>,
    mut race: ResMut<Race>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let size = window.physical_size();
    let half_width = size.x / 2;
    if half_width == 0 || size.y == 0 {
        return;
    }

    for (mut camera, player) in &mut cameras {
        let position = UVec2::new(half_width * player.index() as u32, 0);
        let extent = UVec2::new(half_width, size.y);

        let unchanged = camera
            .viewport
            .as_ref()
            .is_some_and(|v| v.physical_position == position && v.physical_size == extent);
        if unchanged {
            continue;
        }

        camera.viewport = Some(Viewport {
            physical_position: position,
            physical_size: extent,
            ..default()
        });
    }

    let logical = split_viewport_size(Some(window));
    if race.viewport_size != logical {
        race.viewport_size = logical;
    }
}

// Camera follows its player's smoothed view
pub fn sync_follow_cameras(
    race: Res<Race>,
    mut cameras: Query<(&mut Transform, &PlayerSlot), With<PlayerCamera>>,
) {
    for (mut transform, player) in &mut cameras {
        let center = race.camera(*player).center(race.viewport_size);
        let mut target = to_world(center, transform.translation.z);

        // round to integers to prevent subpixel gaps
        target.x = target.x.round();
        target.y = target.y.round();

        transform.translation = target;
    }
}
