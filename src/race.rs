use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::split_viewport_size;
use crate::game_logic::{Difficulty, LapEvent, Race, TickClock, TrackLayout, read_intents};

// Builds the track and both vehicles from the chosen difficulty
pub fn setup_race(
    mut commands: Commands,
    difficulty: Res<Difficulty>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let track = TrackLayout::tapioca_city();
    let viewport_size = split_viewport_size(windows.single().ok());
    let race = Race::new(&track, &difficulty.profile(), viewport_size);

    info!(
        "Race starting on {} with {} checkpoints, first to {} laps",
        *difficulty,
        track.checkpoints.len(),
        race.lap_target
    );

    commands.insert_resource(track);
    commands.insert_resource(race);
    commands.insert_resource(TickClock::default());
}

/// Run however many fixed ticks the frame time calls for, all with the
/// keyboard state sampled once this frame.
pub fn drive_race(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    track: Res<TrackLayout>,
    mut race: ResMut<Race>,
    mut clock: ResMut<TickClock>,
) {
    let due = clock.advance(time.delta());
    if due == 0 {
        return;
    }

    let intents = read_intents(&keys);
    for _ in 0..due {
        for (player, event) in race.step(&track, &intents) {
            if let LapEvent::LapCompleted { lap } = event {
                debug!("Player {} now on lap {}", player.number(), lap);
            }
        }
    }
}

pub fn race_is_over(race: Option<Res<Race>>) -> bool {
    race.is_some_and(|race| race.is_over())
}
