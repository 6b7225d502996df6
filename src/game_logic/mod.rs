pub mod constants;
pub mod components;
pub mod difficulty;
pub mod physics;
pub mod collisions;
pub mod lap_system;
pub mod map;
pub mod input;
pub mod camera;
pub mod simulation;

pub use constants::*;
pub use components::*;
pub use difficulty::*;
pub use physics::*;
pub use collisions::*;
pub use lap_system::*;
pub use map::*;
pub use input::*;
pub use camera::*;
pub use simulation::*;
