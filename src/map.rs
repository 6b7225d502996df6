use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::game_logic::{
    CheckpointMarker, FLOWER_COUNT, PLAYER_COUNT, Race, TrackLayout, Zone, scatter_flowers,
};
use crate::hud::GameFont;

// Map colours
pub const GRASS_COLOR: Color = Color::srgb(0.2, 0.667, 0.333); // #3a5
pub const ROAD_COLOR: Color = Color::srgb(0.333, 0.333, 0.333); // #555
pub const BUILDING_COLOR: Color = Color::srgb(0.6, 0.6, 0.6); // #999
const STEM_COLOR: Color = Color::srgb(0.0, 0.5, 0.0);

pub const CHECKPOINT_IDLE: Color = Color::srgba(134.0 / 255.0, 134.0 / 255.0, 32.0 / 255.0, 0.4);
pub const CHECKPOINT_BOTH: Color = Color::srgb(0.5, 0.0, 0.5);
pub const CHECKPOINT_P1: Color = Color::srgb(1.0, 0.0, 0.0);
pub const CHECKPOINT_P2: Color = Color::srgb(0.0, 0.0, 1.0);

// Draw order, back to front
const GRASS_Z: f32 = 0.0;
const FLOWER_Z: f32 = 1.0;
const ROAD_Z: f32 = 2.0;
const BUILDING_Z: f32 = 3.0;
const CHECKPOINT_Z: f32 = 4.0;

/// Track coordinates grow downward; Bevy's world grows upward.
pub fn to_world(point: Vec2, z: f32) -> Vec3 {
    Vec3::new(point.x, -point.y, z)
}

fn zone_sprite(zone: &Zone, color: Color, z: f32) -> (Sprite, Transform) {
    (
        Sprite::from_color(color, zone.size()),
        Transform::from_translation(to_world(zone.center(), z)),
    )
}

/// Stem hanging 6px down from a flower's centre, drawn over the petals.
fn flower_stem() -> (Sprite, Transform) {
    (
        Sprite::from_color(STEM_COLOR, Vec2::new(1.0, 6.0)),
        Transform::from_xyz(0.0, -3.0, 0.1),
    )
}

pub fn checkpoint_color(flags: [bool; PLAYER_COUNT]) -> Color {
    match flags {
        [true, true] => CHECKPOINT_BOTH,
        [true, false] => CHECKPOINT_P1,
        [false, true] => CHECKPOINT_P2,
        [false, false] => CHECKPOINT_IDLE,
    }
}

pub fn spawn_track(
    mut commands: Commands,
    track: Res<TrackLayout>,
    game_font: Res<GameFont>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(zone_sprite(&track.bounds, GRASS_COLOR, GRASS_Z));

    // flowers under the road are never seen
    let mut rng = rand::rng();
    let flowers = scatter_flowers(&mut rng, FLOWER_COUNT, &track.bounds);
    let mut drawn = 0;
    for flower in flowers.iter().filter(|f| !track.is_on_road(f.position)) {
        commands
            .spawn((
                Mesh2d(meshes.add(Circle::new(flower.size))),
                MeshMaterial2d(materials.add(flower.color)),
                Transform::from_translation(to_world(flower.position, FLOWER_Z)),
            ))
            .with_children(|parent| {
                parent.spawn(flower_stem());
            });
        drawn += 1;
    }
    debug!("Drew {} of {} flowers", drawn, flowers.len());

    for segment in &track.road {
        commands.spawn(zone_sprite(segment, ROAD_COLOR, ROAD_Z));
    }

    for building in &track.buildings {
        let outline = Zone::new(
            building.x - 1.0,
            building.y - 1.0,
            building.width + 2.0,
            building.height + 2.0,
        );
        commands.spawn(zone_sprite(&outline, Color::BLACK, BUILDING_Z));
        commands.spawn(zone_sprite(building, BUILDING_COLOR, BUILDING_Z + 0.1));
    }

    for (index, checkpoint) in track.checkpoints.iter().enumerate() {
        let label_rotation = if checkpoint.height > checkpoint.width {
            Quat::from_rotation_z(FRAC_PI_2)
        } else {
            Quat::IDENTITY
        };

        commands
            .spawn((
                zone_sprite(checkpoint, CHECKPOINT_IDLE, CHECKPOINT_Z),
                CheckpointMarker { index },
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text2d::new(format!("Checkpoint {}", index + 1)),
                    game_font.text_font(16.0),
                    TextColor(Color::WHITE),
                    Transform::from_xyz(0.0, 0.0, 0.1).with_rotation(label_rotation),
                ));
            });
    }
}

pub fn paint_checkpoints(race: Res<Race>, mut checkpoints: Query<(&CheckpointMarker, &mut Sprite)>) {
    if !race.is_changed() {
        return;
    }

    for (marker, mut sprite) in &mut checkpoints {
        let color = checkpoint_color(race.checkpoint_flags.get(marker.index));
        if sprite.color != color {
            sprite.color = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_colors() {
        assert_eq!(checkpoint_color([false, false]), CHECKPOINT_IDLE);
        assert_eq!(checkpoint_color([true, false]), CHECKPOINT_P1);
        assert_eq!(checkpoint_color([false, true]), CHECKPOINT_P2);
        assert_eq!(checkpoint_color([true, true]), CHECKPOINT_BOTH);
    }

    #[test]
    fn test_stem_starts_at_flower_centre() {
        let (sprite, transform) = flower_stem();
        let size = sprite.custom_size.unwrap();

        // top of the stem sits on the centre, bottom 6px below it
        assert_eq!(transform.translation.y + size.y / 2.0, 0.0);
        assert_eq!(transform.translation.y - size.y / 2.0, -6.0);
        assert!(transform.translation.z > 0.0);
    }

    #[test]
    fn test_to_world_flips_y() {
        assert_eq!(to_world(Vec2::new(300.0, 200.0), 2.0), Vec3::new(300.0, -200.0, 2.0));
    }
}
