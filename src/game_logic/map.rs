use crate::game_logic::Zone;
use bevy::prelude::*;
use rand::Rng;

/// Static track geometry. Built once when a race starts and only ever read
/// afterwards; the per-player checkpoint flags live in `Race`.
#[derive(Resource, Clone, Debug)]
pub struct TrackLayout {
    pub bounds: Zone,
    pub road: Vec<Zone>,
    pub buildings: Vec<Zone>,
    /// In the order they must be driven through.
    pub checkpoints: Vec<Zone>,
    pub start_positions: [Vec2; 2],
}

impl TrackLayout {
    /// The Tapioca City circuit.
    pub fn tapioca_city() -> Self {
        Self {
            bounds: Zone::new(0.0, 0.0, 3000.0, 2000.0),
            road: vec![
                Zone::new(0.0, 200.0, 2000.0, 200.0),
                Zone::new(800.0, 200.0, 200.0, 900.0),
                Zone::new(200.0, 700.0, 1600.0, 200.0),
                Zone::new(200.0, 200.0, 200.0, 700.0),
            ],
            buildings: vec![
                Zone::new(500.0, 300.0, 180.0, 120.0),
                Zone::new(1050.0, 300.0, 200.0, 150.0),
                Zone::new(600.0, 820.0, 240.0, 130.0),
            ],
            checkpoints: vec![
                Zone::new(400.0, 220.0, 150.0, 20.0),
                Zone::new(1800.0, 400.0, 20.0, 200.0),
                Zone::new(800.0, 900.0, 150.0, 20.0),
                Zone::new(220.0, 500.0, 20.0, 200.0),
            ],
            start_positions: [Vec2::new(300.0, 300.0), Vec2::new(400.0, 300.0)],
        }
    }

    /// On-road means strictly inside at least one road segment.
    pub fn is_on_road(&self, point: Vec2) -> bool {
        self.road.iter().any(|segment| segment.contains(point))
    }
}

impl Default for TrackLayout {
    fn default() -> Self {
        Self::tapioca_city()
    }
}

pub const FLOWER_COUNT: usize = 150;

pub const FLOWER_COLORS: [Color; 4] = [
    Color::srgb(1.0, 105.0 / 255.0, 180.0 / 255.0), // #ff69b4
    Color::srgb(1.0, 215.0 / 255.0, 0.0),           // #ffd700
    Color::srgb(1.0, 69.0 / 255.0, 0.0),            // #ff4500
    Color::srgb(218.0 / 255.0, 112.0 / 255.0, 214.0 / 255.0), // #da70d6
];

/// Purely decorative.
#[derive(Clone, Copy, Debug)]
pub struct Flower {
    pub position: Vec2,
    pub size: f32,
    pub color: Color,
}

/// Scatter flowers over the whole map. Callers skip the ones on the road
/// when drawing.
pub fn scatter_flowers<R: Rng + ?Sized>(rng: &mut R, count: usize, bounds: &Zone) -> Vec<Flower> {
    (0..count)
        .map(|_| Flower {
            position: Vec2::new(
                bounds.x + rng.random::<f32>() * bounds.width,
                bounds.y + rng.random::<f32>() * bounds.height,
            ),
            size: rng.random::<f32>() * 4.0 + 3.0,
            color: FLOWER_COLORS[rng.random_range(0..FLOWER_COLORS.len())],
        })
        .collect()
}
