use crate::game_logic::{PLAYER_COUNT, PlayerSlot, Vehicle, Zone};
use bevy::prelude::*;

/// Per-checkpoint "touched this lap" flags, one per player.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckpointFlags {
    flags: Vec<[bool; PLAYER_COUNT]>,
}

impl CheckpointFlags {
    pub fn new(checkpoint_count: usize) -> Self {
        Self {
            flags: vec![[false; PLAYER_COUNT]; checkpoint_count],
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn is_marked(&self, checkpoint: usize, player: PlayerSlot) -> bool {
        self.flags
            .get(checkpoint)
            .is_some_and(|flags| flags[player.index()])
    }

    /// Both flags of one checkpoint, in player order.
    pub fn get(&self, checkpoint: usize) -> [bool; PLAYER_COUNT] {
        self.flags.get(checkpoint).copied().unwrap_or_default()
    }

    pub fn mark(&mut self, checkpoint: usize, player: PlayerSlot) {
        if let Some(flags) = self.flags.get_mut(checkpoint) {
            flags[player.index()] = true;
        }
    }

    /// Clears one player's flags; the other player's are untouched.
    pub fn clear_player(&mut self, player: PlayerSlot) {
        for flags in &mut self.flags {
            flags[player.index()] = false;
        }
    }
}

/// What happened to a car's progress this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LapEvent {
    Checkpoint { index: usize },
    LapCompleted { lap: u32 },
}

/// Move the car on to its next checkpoint, wrapping into a new lap.
pub fn advance_checkpoint(
    vehicle: &mut Vehicle,
    player: PlayerSlot,
    flags: &mut CheckpointFlags,
) -> LapEvent {
    let reached = vehicle.checkpoint_index;
    vehicle.checkpoint_index += 1;

    if vehicle.checkpoint_index >= flags.len() {
        vehicle.checkpoint_index = 0;
        vehicle.lap += 1;
        flags.clear_player(player);
        return LapEvent::LapCompleted { lap: vehicle.lap };
    }

    LapEvent::Checkpoint { index: reached }
}

/// Flag every checkpoint the car overlaps and advance progress when the
/// overlapped one is the next in order. Checkpoints are visited in index
/// order, so several in-order checkpoints may be taken in a single tick.
pub fn update_checkpoints(
    vehicle: &mut Vehicle,
    player: PlayerSlot,
    checkpoints: &[Zone],
    flags: &mut CheckpointFlags,
) -> Vec<LapEvent> {
    let mut events = Vec::new();

    for (index, checkpoint) in checkpoints.iter().enumerate() {
        if !vehicle.zone().overlaps(checkpoint) {
            continue;
        }

        flags.mark(index, player);

        if index == vehicle.checkpoint_index {
            let event = advance_checkpoint(vehicle, player, flags);
            match event {
                LapEvent::Checkpoint { index } => {
                    info!("Player {} reached checkpoint {}", player.number(), index + 1);
                }
                LapEvent::LapCompleted { lap } => {
                    info!("Player {} completed lap {}", player.number(), lap);
                }
            }
            events.push(event);
        }
    }

    events
}
