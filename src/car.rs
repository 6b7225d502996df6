use bevy::asset::LoadState;
use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;

use crate::game_logic::{Car, Difficulty, PlayerSlot, Race, read_intents};
use crate::map::to_world;

// Car-related constants
pub const CAR_SPRITE_HEIGHT: f32 = 60.0;
pub const FALLBACK_CAR_SIZE: Vec2 = Vec2::new(40.0, 20.0);
const CAR_Z: f32 = 10.0;

pub const ENGINE_SOUND_PATH: &str = "audio/carstatic.ogg";
pub const ENGINE_VOLUME: f32 = 0.06;

/// Image a car is drawn with, until it is known whether it loaded.
#[derive(Component)]
pub struct CarArt {
    image: Handle<Image>,
    fallback_color: Color,
    resolved: bool,
}

#[derive(Component)]
pub struct EngineSound;

pub fn spawn_cars(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    difficulty: Res<Difficulty>,
    race: Res<Race>,
) {
    let profile = difficulty.profile();
    let image: Handle<Image> = asset_server.load(profile.sprite);

    for player in PlayerSlot::ALL {
        let vehicle = race.vehicle(player);
        commands.spawn((
            Sprite::from_image(image.clone()),
            Transform::from_translation(to_world(vehicle.position, CAR_Z))
                .with_rotation(Quat::from_rotation_z(-vehicle.angle)),
            CarArt {
                image: image.clone(),
                fallback_color: profile.color,
                resolved: false,
            },
            Car,
            player,
        ));
    }
}

/// Width of a car sprite drawn `CAR_SPRITE_HEIGHT` tall, keeping the
/// image's aspect ratio.
pub fn car_sprite_size(image_size: UVec2) -> Option<Vec2> {
    if image_size.y == 0 {
        return None;
    }
    let aspect = image_size.x as f32 / image_size.y as f32;
    Some(Vec2::new(CAR_SPRITE_HEIGHT * aspect, CAR_SPRITE_HEIGHT))
}

pub fn resolve_car_art(
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut cars: Query<(&mut Sprite, &mut CarArt)>,
) {
    for (mut sprite, mut art) in &mut cars {
        if art.resolved {
            continue;
        }

        match asset_server.load_state(art.image.id()) {
            LoadState::Loaded => {
                let size = images.get(&art.image).and_then(|image| car_sprite_size(image.size()));
                if let Some(size) = size {
                    sprite.custom_size = Some(size);
                    art.resolved = true;
                }
            }
            LoadState::Failed(e) => {
                warn!("Car sprite unavailable ({}), drawing a plain car", e);
                *sprite = Sprite::from_color(art.fallback_color, FALLBACK_CAR_SIZE);
                art.resolved = true;
            }
            _ => {}
        }
    }
}

pub fn sync_car_sprites(race: Res<Race>, mut cars: Query<(&mut Transform, &PlayerSlot), With<Car>>) {
    for (mut transform, player) in &mut cars {
        let vehicle = race.vehicle(*player);
        transform.translation = to_world(vehicle.position, CAR_Z);
        transform.rotation = Quat::from_rotation_z(-vehicle.angle);
    }
}

pub fn spawn_engine_sound(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        AudioPlayer::new(asset_server.load(ENGINE_SOUND_PATH)),
        PlaybackSettings {
            volume: Volume::Linear(ENGINE_VOLUME),
            paused: true,
            ..PlaybackSettings::LOOP
        },
        EngineSound,
    ));
}

// Engine hums while anyone holds a driving key
pub fn toggle_engine_sound(
    keys: Res<ButtonInput<KeyCode>>,
    mut engines: Query<&mut AudioSink, With<EngineSound>>,
) {
    let driving = read_intents(&keys).iter().any(|intent| !intent.is_idle());

    for sink in &mut engines {
        if driving && sink.is_paused() {
            sink.play();
        } else if !driving && !sink.is_paused() {
            sink.pause();
        }
    }
}
