mod camera;
mod car;
mod config;
mod dialogue;
mod game_logic;
mod hud;
mod map;
mod networking;
mod race;
mod title_screen;
mod victory_screen;

use bevy::{prelude::*, window::PresentMode};
use clap::Parser;

use camera::{
    WIN_H, WIN_W, despawn_menu_camera, fit_split_viewports, spawn_menu_camera, spawn_split_cameras,
    sync_follow_cameras,
};
use car::{resolve_car_art, spawn_cars, spawn_engine_sound, sync_car_sprites, toggle_engine_sound};
use config::{GameArgs, GameConfig};
use dialogue::{advance_dialogue, destroy_dialogue, setup_dialogue};
use hud::{GameFont, fall_back_to_default_font, place_hud, spawn_lap_hud, update_lap_hud};
use map::{paint_checkpoints, spawn_track};
use networking::NetworkingPlugin;
use race::{drive_race, race_is_over, setup_race};
use title_screen::{animate_title_screen, check_for_title_input, destroy_title_screen, setup_title_screen};
use victory_screen::setup_victory_screen;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Title,
    Dialogue,
    Playing,
}

fn main() {
    let config = GameConfig::from(GameArgs::parse());

    // --difficulty goes straight to the race
    let initial_state = match config.quick_start {
        Some(_) => GameState::Playing,
        None => GameState::Title,
    };
    let difficulty = config.quick_start.unwrap_or_default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tapioca City Racers".into(),
                resolution: (WIN_W, WIN_H).into(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(NetworkingPlugin)
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(difficulty)
        .insert_resource(config)
        .init_resource::<GameFont>()
        .insert_state(initial_state)
        .add_systems(OnEnter(GameState::Title), (spawn_menu_camera, setup_title_screen))
        .add_systems(OnExit(GameState::Title), destroy_title_screen)
        .add_systems(OnEnter(GameState::Dialogue), setup_dialogue)
        .add_systems(OnExit(GameState::Dialogue), destroy_dialogue)
        .add_systems(
            OnEnter(GameState::Playing),
            (
                despawn_menu_camera,
                setup_race,
                (
                    spawn_split_cameras,
                    spawn_track,
                    spawn_cars,
                    spawn_engine_sound,
                    spawn_lap_hud,
                ),
            )
                .chain(),
        )
        .add_systems(Update, fall_back_to_default_font)
        .add_systems(
            Update,
            (check_for_title_input, animate_title_screen).run_if(in_state(GameState::Title)),
        )
        .add_systems(Update, advance_dialogue.run_if(in_state(GameState::Dialogue)))
        .add_systems(
            Update,
            (
                fit_split_viewports,
                drive_race,
                (
                    sync_car_sprites,
                    sync_follow_cameras,
                    update_lap_hud,
                    paint_checkpoints,
                    (setup_victory_screen.run_if(race_is_over), place_hud).chain(),
                ),
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(
            Update,
            (resolve_car_art, toggle_engine_sound).run_if(in_state(GameState::Playing)),
        )
        .run();
}
