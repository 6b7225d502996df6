use std::time::Duration;

use crate::game_logic::{
    CheckpointFlags, DriveIntent, FollowCamera, LAP_TARGET, LapEvent, MAX_TICKS_PER_FRAME,
    OFF_ROAD_DRAG, PlayerSlot, TICK_RATE_HZ, TrackLayout, Vehicle, VehicleProfile, keep_on_map,
    resolve_buildings, resolve_car_collision, update_checkpoints,
};
use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaceStatus {
    Running,
    /// Terminal. Physics no longer advances.
    Over { winner: PlayerSlot },
}

/// Everything the per-tick update mutates.
#[derive(Resource, Clone, Debug)]
pub struct Race {
    pub vehicles: [Vehicle; 2],
    pub cameras: [FollowCamera; 2],
    pub checkpoint_flags: CheckpointFlags,
    pub status: RaceStatus,
    pub lap_target: u32,
    /// Size of one player's half of the screen, in world units.
    pub viewport_size: Vec2,
    pub ticks: u64,
}

impl Race {
    pub fn new(track: &TrackLayout, profile: &VehicleProfile, viewport_size: Vec2) -> Self {
        Self {
            vehicles: track
                .start_positions
                .map(|start| Vehicle::new(start, profile)),
            cameras: [FollowCamera::default(); 2],
            checkpoint_flags: CheckpointFlags::new(track.checkpoints.len()),
            status: RaceStatus::Running,
            lap_target: LAP_TARGET,
            viewport_size,
            ticks: 0,
        }
    }

    pub fn vehicle(&self, player: PlayerSlot) -> &Vehicle {
        &self.vehicles[player.index()]
    }

    pub fn camera(&self, player: PlayerSlot) -> &FollowCamera {
        &self.cameras[player.index()]
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, RaceStatus::Over { .. })
    }

    pub fn winner(&self) -> Option<PlayerSlot> {
        match self.status {
            RaceStatus::Running => None,
            RaceStatus::Over { winner } => Some(winner),
        }
    }

    /// Advance the race by one tick. Does nothing once the race is over.
    pub fn step(&mut self, track: &TrackLayout, intents: &[DriveIntent; 2]) -> Vec<(PlayerSlot, LapEvent)> {
        if self.is_over() {
            return Vec::new();
        }

        let mut events = Vec::new();
        for player in PlayerSlot::ALL {
            for event in self.update_player(track, player, &intents[player.index()]) {
                events.push((player, event));
            }
        }

        let [first, second] = &mut self.vehicles;
        if resolve_car_collision(first, second) {
            debug!("Cars collided on tick {}", self.ticks);
        }

        self.ticks += 1;
        self.check_finish();
        events
    }

    fn update_player(
        &mut self,
        track: &TrackLayout,
        player: PlayerSlot,
        intent: &DriveIntent,
    ) -> Vec<LapEvent> {
        let vehicle = &mut self.vehicles[player.index()];

        if intent.forward {
            vehicle.accelerate(true);
        }
        if intent.backward {
            vehicle.accelerate(false);
        }

        vehicle.apply_friction();

        let turn_factor = vehicle.turn_factor();
        if intent.left {
            vehicle.turn(true, turn_factor);
        }
        if intent.right {
            vehicle.turn(false, turn_factor);
        }

        vehicle.move_forward();
        keep_on_map(vehicle, &track.bounds);

        if !track.is_on_road(vehicle.position) {
            vehicle.slow_down(OFF_ROAD_DRAG);
        }

        resolve_buildings(vehicle, &track.buildings);
        let events = update_checkpoints(
            vehicle,
            player,
            &track.checkpoints,
            &mut self.checkpoint_flags,
        );

        let target = vehicle.position;
        self.cameras[player.index()].follow(target, self.viewport_size);

        events
    }

    fn check_finish(&mut self) {
        // player one wins a same-tick tie
        let finisher = PlayerSlot::ALL
            .into_iter()
            .find(|player| self.vehicle(*player).lap >= self.lap_target);

        if let Some(winner) = finisher {
            info!("Player {} wins after {} ticks", winner.number(), self.ticks);
            self.status = RaceStatus::Over { winner };
        }
    }
}

/// Fixed-step accumulator. Fed with elapsed time from any source, it says
/// how many simulation ticks are due.
#[derive(Resource, Clone, Debug)]
pub struct TickClock {
    step: Duration,
    accumulated: Duration,
    max_ticks: u32,
}

impl TickClock {
    pub fn new(step: Duration, max_ticks: u32) -> Self {
        Self {
            step,
            accumulated: Duration::ZERO,
            max_ticks,
        }
    }

    /// Ticks due after `elapsed` more time has passed. When more than
    /// `max_ticks` are due the backlog is dropped instead of carried over.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;

        let mut due = 0;
        while self.accumulated >= self.step {
            self.accumulated -= self.step;
            due += 1;
            if due == self.max_ticks {
                self.accumulated = Duration::ZERO;
                break;
            }
        }
        due
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(1.0 / TICK_RATE_HZ), MAX_TICKS_PER_FRAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::Difficulty;

    const VIEWPORT: Vec2 = Vec2::new(640.0, 720.0);

    fn new_race(difficulty: Difficulty) -> (TrackLayout, Race) {
        let track = TrackLayout::tapioca_city();
        let race = Race::new(&track, &difficulty.profile(), VIEWPORT);
        (track, race)
    }

    fn full_throttle() -> DriveIntent {
        DriveIntent {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_race_stays_put() {
        let (track, mut race) = new_race(Difficulty::Medium);
        race.step(&track, &[DriveIntent::default(); 2]);

        assert_eq!(race.vehicle(PlayerSlot::One).position, Vec2::new(300.0, 300.0));
        assert_eq!(race.vehicle(PlayerSlot::Two).position, Vec2::new(400.0, 300.0));
        assert_eq!(race.status, RaceStatus::Running);
        assert_eq!(race.ticks, 1);
    }

    #[test]
    fn test_single_tick_physics_order() {
        let (track, mut race) = new_race(Difficulty::Medium);
        race.step(&track, &[full_throttle(), DriveIntent::default()]);

        let car = race.vehicle(PlayerSlot::One);
        // accelerate 0.2, then friction
        let speed = 0.2 * 0.95;
        assert!((car.speed() - speed).abs() < 1e-6);
        assert!((car.position.x - (300.0 + speed)).abs() < 1e-4);
    }

    #[test]
    fn test_speed_invariant_holds_over_long_run() {
        let (track, mut race) = new_race(Difficulty::Hard);
        let intents = [
            DriveIntent {
                forward: true,
                left: true,
                ..Default::default()
            },
            DriveIntent {
                backward: true,
                right: true,
                ..Default::default()
            },
        ];

        for _ in 0..2000 {
            race.step(&track, &intents);
            for car in &race.vehicles {
                assert!(car.speed().abs() <= car.max_speed);
                assert!(car.checkpoint_index < track.checkpoints.len());
            }
        }
    }

    #[test]
    fn test_off_road_drag_compounds_with_friction() {
        let (track, mut race) = new_race(Difficulty::Medium);
        race.vehicles[0].position = Vec2::new(2500.0, 1500.0);
        race.vehicles[0].set_speed(2.0);

        race.step(&track, &[DriveIntent::default(); 2]);

        let expected = 2.0 * 0.95 * 0.92;
        assert!((race.vehicles[0].speed() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_race_ends_when_lap_target_reached() {
        let (track, mut race) = new_race(Difficulty::Medium);
        race.vehicles[1].lap = 2;
        race.vehicles[1].checkpoint_index = 3;
        race.vehicles[1].position = track.checkpoints[3].center();

        race.step(&track, &[DriveIntent::default(); 2]);

        assert_eq!(race.vehicles[1].lap, 3);
        assert_eq!(race.winner(), Some(PlayerSlot::Two));
    }

    #[test]
    fn test_over_freezes_physics() {
        let (track, mut race) = new_race(Difficulty::Medium);
        race.status = RaceStatus::Over {
            winner: PlayerSlot::One,
        };
        race.vehicles[0].set_speed(3.0);
        let before = race.vehicles.clone();

        let events = race.step(&track, &[full_throttle(); 2]);

        assert!(events.is_empty());
        assert_eq!(race.vehicles, before);
        assert_eq!(race.ticks, 0);
    }

    #[test]
    fn test_player_one_wins_a_tie() {
        let (track, mut race) = new_race(Difficulty::Medium);
        race.vehicles[0].lap = 3;
        race.vehicles[1].lap = 3;
        race.vehicles[1].position = Vec2::new(2500.0, 1500.0);

        race.step(&track, &[DriveIntent::default(); 2]);

        assert_eq!(race.winner(), Some(PlayerSlot::One));
    }

    #[test]
    fn test_cameras_follow_their_own_car() {
        let (track, mut race) = new_race(Difficulty::Medium);
        for _ in 0..600 {
            race.step(&track, &[DriveIntent::default(); 2]);
        }

        let p1 = race.camera(PlayerSlot::One).center(VIEWPORT);
        let p2 = race.camera(PlayerSlot::Two).center(VIEWPORT);
        assert!(p1.distance(Vec2::new(300.0, 300.0)) < 0.01);
        assert!(p2.distance(Vec2::new(400.0, 300.0)) < 0.01);
    }

    #[test]
    fn test_clock_counts_whole_steps() {
        let mut clock = TickClock::new(Duration::from_millis(10), 5);

        assert_eq!(clock.advance(Duration::from_millis(25)), 2);
        assert_eq!(clock.advance(Duration::from_millis(5)), 1);
        assert_eq!(clock.advance(Duration::from_millis(9)), 0);
        assert_eq!(clock.advance(Duration::from_millis(1)), 1);
    }

    #[test]
    fn test_clock_drops_backlog_past_cap() {
        let mut clock = TickClock::new(Duration::from_millis(10), 5);

        assert_eq!(clock.advance(Duration::from_secs(2)), 5);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }
}
