use crate::game_logic::CAMERA_SMOOTHING;
use bevy::prelude::*;

/// Smoothed view of one player. `position` is the top-left corner of the
/// viewport in track coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FollowCamera {
    pub position: Vec2,
}

impl FollowCamera {
    /// Ease toward the spot that centers `target` in a viewport of
    /// `viewport_size`.
    pub fn follow(&mut self, target: Vec2, viewport_size: Vec2) {
        let offset = viewport_size / 2.0;
        self.position += (target - self.position - offset) * CAMERA_SMOOTHING;
    }

    pub fn center(&self, viewport_size: Vec2) -> Vec2 {
        self.position + viewport_size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_moves_eight_percent_of_the_gap() {
        let mut camera = FollowCamera::default();
        camera.follow(Vec2::new(600.0, 400.0), Vec2::new(400.0, 600.0));

        // goal is (600 - 200, 400 - 300) = (400, 100)
        assert!((camera.position.x - 32.0).abs() < 1e-4);
        assert!((camera.position.y - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_follow_converges_on_target() {
        let mut camera = FollowCamera::default();
        let viewport = Vec2::new(640.0, 720.0);
        let target = Vec2::new(300.0, 300.0);

        for _ in 0..500 {
            camera.follow(target, viewport);
        }

        assert!(camera.center(viewport).distance(target) < 0.01);
    }
}
