use crate::game_logic::{Vehicle, WALL_RESTITUTION};
use bevy::prelude::*;

/// Axis-aligned rectangle in track coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zone {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Zone {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Edges touching is not an overlap.
    pub fn overlaps(&self, other: &Zone) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Strict containment: points on an edge are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.x && point.x < self.right() && point.y > self.y && point.y < self.bottom()
    }
}

/// Bounce the car off every building it currently overlaps.
/// Each test sees the position left by the previous bounce.
pub fn resolve_buildings(vehicle: &mut Vehicle, buildings: &[Zone]) -> usize {
    let mut hits = 0;
    for building in buildings {
        if vehicle.zone().overlaps(building) {
            vehicle.bounce();
            hits += 1;
        }
    }
    hits
}

/// Car-to-car response: swap speed scalars, then push each car away from
/// the other by half the center-to-center delta.
///
/// Swapping raw speeds ignores the collision normal; kept as-is.
pub fn resolve_car_collision(a: &mut Vehicle, b: &mut Vehicle) -> bool {
    if !a.zone().overlaps(&b.zone()) {
        return false;
    }

    let speed_a = a.speed();
    a.set_speed(b.speed());
    b.set_speed(speed_a);

    let push = (a.position - b.position) / 2.0;
    a.position += push;
    b.position -= push;
    true
}

/// Clamp the car inside the map. Every clamped edge flips and damps speed,
/// so a corner hit applies the factor twice.
pub fn keep_on_map(vehicle: &mut Vehicle, bounds: &Zone) -> bool {
    let mut clamped = false;

    if vehicle.position.x < bounds.x {
        vehicle.position.x = bounds.x;
        vehicle.set_speed(vehicle.speed() * WALL_RESTITUTION);
        clamped = true;
    }
    if vehicle.position.x > bounds.right() {
        vehicle.position.x = bounds.right();
        vehicle.set_speed(vehicle.speed() * WALL_RESTITUTION);
        clamped = true;
    }
    if vehicle.position.y < bounds.y {
        vehicle.position.y = bounds.y;
        vehicle.set_speed(vehicle.speed() * WALL_RESTITUTION);
        clamped = true;
    }
    if vehicle.position.y > bounds.bottom() {
        vehicle.position.y = bounds.bottom();
        vehicle.set_speed(vehicle.speed() * WALL_RESTITUTION);
        clamped = true;
    }

    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::Difficulty;

    fn car_at(x: f32, y: f32) -> Vehicle {
        Vehicle::new(Vec2::new(x, y), &Difficulty::Medium.profile())
    }

    #[test]
    fn test_overlap_excludes_touching_edges() {
        let a = Zone::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Zone::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Zone::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Zone::new(0.0, 10.0, 10.0, 10.0)));
        assert!(a.overlaps(&Zone::new(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_contains_is_strict() {
        let zone = Zone::new(0.0, 200.0, 2000.0, 200.0);
        assert!(zone.contains(Vec2::new(300.0, 300.0)));
        assert!(!zone.contains(Vec2::new(0.0, 300.0)));
        assert!(!zone.contains(Vec2::new(300.0, 400.0)));
    }

    #[test]
    fn test_building_hit_bounces_back_along_heading() {
        // building just ahead of a car driving +x at top speed
        let building = Zone::new(320.0, 280.0, 100.0, 40.0);
        let mut car = car_at(300.0, 300.0);
        car.set_speed(4.0);

        let hits = resolve_buildings(&mut car, &[building]);

        assert_eq!(hits, 1);
        assert!((car.position.x - 294.0).abs() < 1e-4);
        assert_eq!(car.position.y, 300.0);
        assert_eq!(car.speed(), 2.0);
    }

    #[test]
    fn test_building_miss_leaves_car_alone() {
        let building = Zone::new(1000.0, 1000.0, 10.0, 10.0);
        let mut car = car_at(300.0, 300.0);
        car.set_speed(3.0);

        assert_eq!(resolve_buildings(&mut car, &[building]), 0);
        assert_eq!(car.position, Vec2::new(300.0, 300.0));
        assert_eq!(car.speed(), 3.0);
    }

    #[test]
    fn test_car_collision_swaps_speeds_and_separates() {
        let mut a = car_at(300.0, 300.0);
        let mut b = car_at(340.0, 310.0);
        a.set_speed(3.0);
        b.set_speed(-2.0);

        assert!(resolve_car_collision(&mut a, &mut b));

        assert_eq!(a.speed(), -2.0);
        assert_eq!(b.speed(), 3.0);
        // delta a - b = (-40, -10), half is (-20, -5)
        assert_eq!(a.position, Vec2::new(280.0, 295.0));
        assert_eq!(b.position, Vec2::new(360.0, 315.0));
    }

    #[test]
    fn test_distant_cars_do_not_collide() {
        let mut a = car_at(300.0, 300.0);
        let mut b = car_at(400.0, 300.0);
        a.set_speed(3.0);

        assert!(!resolve_car_collision(&mut a, &mut b));
        assert_eq!(a.speed(), 3.0);
        assert_eq!(b.speed(), 0.0);
    }

    #[test]
    fn test_keep_on_map_reflects_speed() {
        let bounds = Zone::new(0.0, 0.0, 3000.0, 2000.0);
        let mut car = car_at(-5.0, 500.0);
        car.set_speed(-2.0);

        assert!(keep_on_map(&mut car, &bounds));
        assert_eq!(car.position.x, 0.0);
        assert!((car.speed() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_keep_on_map_exact_edge_is_inside() {
        let bounds = Zone::new(0.0, 0.0, 3000.0, 2000.0);
        let mut car = car_at(3000.0, 2000.0);
        car.set_speed(3.0);

        assert!(!keep_on_map(&mut car, &bounds));
        assert_eq!(car.speed(), 3.0);
    }

    #[test]
    fn test_keep_on_map_corner_applies_twice() {
        let bounds = Zone::new(0.0, 0.0, 3000.0, 2000.0);
        let mut car = car_at(3010.0, 2010.0);
        car.set_speed(4.0);

        assert!(keep_on_map(&mut car, &bounds));
        assert_eq!(car.position, Vec2::new(3000.0, 2000.0));
        assert!((car.speed() - 4.0 * 0.09).abs() < 1e-5);
    }
}
