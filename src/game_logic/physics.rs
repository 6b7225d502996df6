use crate::game_logic::{
    BOUNCE_DAMPING, BOUNCE_PUSHBACK, CAR_HEIGHT, CAR_WIDTH, FRICTION, MIN_TURN_FACTOR, Zone,
    VehicleProfile,
};
use bevy::prelude::*;

/// Kinematic state of one car.
///
/// Speed is a signed scalar along the heading. It is only written through
/// `set_speed`, which keeps `|speed| <= max_speed`.
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    pub position: Vec2,
    pub angle: f32,
    speed: f32,
    pub acceleration: f32,
    pub max_speed: f32,
    pub turn_rate: f32,
    pub checkpoint_index: usize,
    pub lap: u32,
}

impl Vehicle {
    pub fn new(position: Vec2, profile: &VehicleProfile) -> Self {
        Self {
            position,
            angle: 0.0,
            speed: 0.0,
            acceleration: profile.acceleration,
            max_speed: profile.max_speed,
            turn_rate: profile.turn_rate,
            checkpoint_index: 0,
            lap: 0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(-self.max_speed, self.max_speed);
    }

    pub fn forward_vector(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// Collision box centered on the position, ignoring heading.
    pub fn zone(&self) -> Zone {
        Zone::new(
            self.position.x - CAR_WIDTH / 2.0,
            self.position.y - CAR_HEIGHT / 2.0,
            CAR_WIDTH,
            CAR_HEIGHT,
        )
    }

    pub fn accelerate(&mut self, forward: bool) {
        let delta = if forward { self.acceleration } else { -self.acceleration };
        self.set_speed(self.speed + delta);
    }

    pub fn apply_friction(&mut self) {
        self.set_speed(self.speed * FRICTION);
    }

    /// Steering authority shrinks as the car nears top speed.
    pub fn turn_factor(&self) -> f32 {
        (1.0 - self.speed.abs() / self.max_speed).max(MIN_TURN_FACTOR)
    }

    pub fn turn(&mut self, left: bool, factor: f32) {
        let direction = if left { -1.0 } else { 1.0 };
        self.angle += direction * self.turn_rate * factor;
    }

    pub fn move_forward(&mut self) {
        self.position += self.forward_vector() * self.speed;
    }

    pub fn slow_down(&mut self, amount: f32) {
        self.set_speed(self.speed * amount);
    }

    /// Building response: shove back along the heading and halve the speed.
    /// Not a reflection; the pushback is 1.5 times the current speed.
    pub fn bounce(&mut self) {
        self.position -= self.forward_vector() * self.speed * BOUNCE_PUSHBACK;
        self.set_speed(self.speed * BOUNCE_DAMPING);
    }
}
