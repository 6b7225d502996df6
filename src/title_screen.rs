use crate::GameState;
use bevy::input::ButtonInput;
use bevy::input::keyboard::KeyCode;
use bevy::prelude::*;

use crate::config::GameConfig;
use crate::game_logic::Difficulty;
use crate::hud::GameFont;
use crate::networking::{SessionLink, request_session};

// Title animation timings, in seconds
pub const TITLE_FADE: f32 = 2.0;
pub const PROMPT_DELAY: f32 = 0.8;
pub const PROMPT_FADE: f32 = 1.2;
const PROMPT_RISE: f32 = 50.0;

const TITLE_Y: f32 = 180.0;
const OPTIONS_Y: f32 = 0.0;
const PROMPT_Y: f32 = -150.0;

const CHOSEN_COLOR: Color = Color::srgb(1.0, 0.84, 0.0);

#[derive(Component)]
pub struct TitleScreenEntity;

#[derive(Component)]
pub struct TitleText;

#[derive(Component)]
pub struct StartPrompt;

#[derive(Component)]
pub struct DifficultyOption(pub Difficulty);

/// Menu state while the title screen is up. Enter does nothing until a
/// difficulty has been picked.
#[derive(Resource, Default)]
pub struct TitleMenu {
    pub chosen: Option<Difficulty>,
    pub elapsed: f32,
}

/// 0..=1 progress of an animation of `duration` that starts after `delay`.
pub fn fade_progress(elapsed: f32, delay: f32, duration: f32) -> f32 {
    ((elapsed - delay) / duration).clamp(0.0, 1.0)
}

fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

pub fn difficulty_for_key(key: KeyCode) -> Option<Difficulty> {
    match key {
        KeyCode::Digit1 | KeyCode::Numpad1 => Some(Difficulty::Easy),
        KeyCode::Digit2 | KeyCode::Numpad2 => Some(Difficulty::Medium),
        KeyCode::Digit3 | KeyCode::Numpad3 => Some(Difficulty::Hard),
        _ => None,
    }
}

pub fn setup_title_screen(mut commands: Commands, game_font: Res<GameFont>) {
    commands.insert_resource(TitleMenu::default());

    commands.spawn((
        Text2d::new("TAPIOCA CITY RACERS"),
        game_font.text_font(64.0),
        TextColor(Color::WHITE.with_alpha(0.0)),
        Transform::from_xyz(0., TITLE_Y, 1.).with_scale(Vec3::splat(0.01)),
        TitleText,
        TitleScreenEntity,
    ));

    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let x = (i as f32 - 1.0) * 250.0;
        commands.spawn((
            Text2d::new(format!("{}  {}", i + 1, difficulty.as_str().to_uppercase())),
            game_font.text_font(32.0),
            TextColor(Color::WHITE),
            Transform::from_xyz(x, OPTIONS_Y, 1.),
            DifficultyOption(*difficulty),
            TitleScreenEntity,
        ));
    }

    commands.spawn((
        Text2d::new("PRESS ENTER TO START"),
        game_font.text_font(32.0),
        TextColor(Color::WHITE.with_alpha(0.0)),
        Transform::from_xyz(0., PROMPT_Y - PROMPT_RISE, 1.),
        StartPrompt,
        TitleScreenEntity,
    ));

    commands.spawn((
        Text2d::new("P1: W A S D        P2: ARROW KEYS"),
        game_font.text_font(20.0),
        TextColor(Color::srgb(0.7, 0.7, 0.7)),
        Transform::from_xyz(0., -260., 1.),
        TitleScreenEntity,
    ));
}

pub fn animate_title_screen(
    time: Res<Time>,
    mut menu: ResMut<TitleMenu>,
    mut title: Query<(&mut Transform, &mut TextColor), (With<TitleText>, Without<StartPrompt>)>,
    mut prompt: Query<(&mut Transform, &mut TextColor), (With<StartPrompt>, Without<TitleText>)>,
    mut options: Query<(&DifficultyOption, &mut TextColor), (Without<TitleText>, Without<StartPrompt>)>,
) {
    menu.elapsed += time.delta_secs();

    let t = ease_out_quad(fade_progress(menu.elapsed, 0.0, TITLE_FADE));
    for (mut transform, mut color) in &mut title {
        transform.scale = Vec3::splat(t.max(0.01));
        color.0 = color.0.with_alpha(t);
    }

    // the prompt stays dim until something is picked
    let t = ease_out_quad(fade_progress(menu.elapsed, PROMPT_DELAY, PROMPT_FADE));
    let ready = if menu.chosen.is_some() { 1.0 } else { 0.5 };
    for (mut transform, mut color) in &mut prompt {
        transform.translation.y = PROMPT_Y - PROMPT_RISE * (1.0 - t);
        color.0 = color.0.with_alpha(t * ready);
    }

    for (option, mut color) in &mut options {
        let target = if menu.chosen == Some(option.0) {
            CHOSEN_COLOR
        } else {
            Color::WHITE
        };
        if color.0 != target {
            color.0 = target;
        }
    }
}

pub fn check_for_title_input(
    input: Res<ButtonInput<KeyCode>>,
    mut menu: ResMut<TitleMenu>,
    mut next_state: ResMut<NextState<GameState>>,
    mut commands: Commands,
    session_link: Res<SessionLink>,
    config: Res<GameConfig>,
) {
    for key in input.get_just_pressed() {
        if let Some(difficulty) = difficulty_for_key(*key) {
            menu.chosen = Some(difficulty);
        }
    }

    if !input.just_pressed(KeyCode::Enter) && !input.just_pressed(KeyCode::NumpadEnter) {
        return;
    }

    let Some(difficulty) = menu.chosen else {
        return;
    };

    info!("Starting on {}", difficulty);
    commands.insert_resource(difficulty);
    request_session(&session_link, &config, difficulty);
    next_state.set(GameState::Dialogue);
}

pub fn destroy_title_screen(mut commands: Commands, entities: Query<Entity, With<TitleScreenEntity>>) {
    for entity in &entities {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<TitleMenu>();
}
