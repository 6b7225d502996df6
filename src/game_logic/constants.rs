// Simulation timing
pub const TICK_RATE_HZ: f64 = 60.0; // physics constants are tuned per tick at this rate
pub const MAX_TICKS_PER_FRAME: u32 = 5;

// Physics constants
pub const FRICTION: f32 = 0.95;
pub const OFF_ROAD_DRAG: f32 = 0.92;
pub const BOUNCE_PUSHBACK: f32 = 1.5;
pub const BOUNCE_DAMPING: f32 = 0.5;
pub const WALL_RESTITUTION: f32 = -0.3;
pub const MIN_TURN_FACTOR: f32 = 0.3;

// Car dimensions (collision box, independent of heading)
pub const CAR_WIDTH: f32 = 60.0;
pub const CAR_HEIGHT: f32 = 30.0;

// Race rules
pub const LAP_TARGET: u32 = 3;
pub const PLAYER_COUNT: usize = 2;

// Camera
pub const CAMERA_SMOOTHING: f32 = 0.08;
