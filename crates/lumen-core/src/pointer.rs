//! Cursor-following light
//!
//! The light chases the last known pointer position with a first-order
//! low-pass filter: every frame closes `ease` of the remaining distance, and
//! once both axes are within `snap_distance` it lands exactly on the target.
//! The first pointer movement snaps immediately so the light does not sweep
//! in from the viewport centre on load.

use crate::config::PointerConfig;
use crate::effect::{Effect, Target, Transform};
use crate::geometry::Point;

/// Opacity applied while the pointer is outside the window
pub const HIDDEN_OPACITY: f64 = 0.0;

#[derive(Debug, Clone)]
pub struct PointerFollower {
    target: Point,
    current: Point,
    has_snapped: bool,
    ease: f64,
    snap_distance: f64,
    visible_opacity: f64,
    opacity: f64,
}

impl PointerFollower {
    /// Start at `origin` (the viewport centre) with no pointer seen yet
    pub fn new(config: &PointerConfig, origin: Point) -> Self {
        Self {
            target: origin,
            current: origin,
            has_snapped: false,
            ease: config.ease,
            snap_distance: config.snap_distance,
            visible_opacity: config.visible_opacity,
            opacity: config.visible_opacity,
        }
    }

    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }

    #[inline]
    pub fn current(&self) -> Point {
        self.current
    }

    #[inline]
    pub fn has_snapped(&self) -> bool {
        self.has_snapped
    }

    #[inline]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn on_pointer_move(&mut self, position: Point) {
        self.target = position;
        if !self.has_snapped {
            self.current = position;
            self.has_snapped = true;
        }
    }

    /// Advance one frame and return the position to render
    pub fn step(&mut self) -> Point {
        let dx = self.target.x - self.current.x;
        let dy = self.target.y - self.current.y;

        if dx.abs() < self.snap_distance && dy.abs() < self.snap_distance {
            self.current = self.target;
        } else {
            self.current.x += dx * self.ease;
            self.current.y += dy * self.ease;
        }

        self.current
    }

    /// Advance one frame and express the result as a style write
    pub fn frame(&mut self) -> Effect {
        let Point { x, y } = self.step();
        Effect::SetTransform {
            target: Target::CursorLight,
            transform: Transform { x, y },
        }
    }

    pub fn on_pointer_leave(&mut self) -> Effect {
        self.set_opacity(HIDDEN_OPACITY)
    }

    pub fn on_pointer_enter(&mut self) -> Effect {
        self.set_opacity(self.visible_opacity)
    }

    fn set_opacity(&mut self, opacity: f64) -> Effect {
        self.opacity = opacity;
        Effect::SetOpacity {
            target: Target::CursorLight,
            opacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follower() -> PointerFollower {
        PointerFollower::new(&PointerConfig::default(), Point::new(640.0, 360.0))
    }

    #[test]
    fn test_first_move_snaps() {
        let mut light = follower();
        assert!(!light.has_snapped());

        light.on_pointer_move(Point::new(10.0, 20.0));
        assert!(light.has_snapped());
        assert_eq!(light.current(), Point::new(10.0, 20.0));
        assert_eq!(light.step(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_idle_frames_hold_position() {
        let mut light = follower();
        for _ in 0..5 {
            assert_eq!(light.step(), Point::new(640.0, 360.0));
        }
        assert!(!light.has_snapped());
    }

    #[test]
    fn test_geometric_convergence() {
        let mut light = follower();
        light.on_pointer_move(Point::new(0.0, 0.0));
        light.on_pointer_move(Point::new(300.0, -120.0));
        let target = light.target();

        let mut previous = light.current().distance(target);
        let mut frames = 0;
        loop {
            let before = light.current();
            let now = light.step();
            frames += 1;
            let distance = now.distance(target);

            if (target.x - before.x).abs() < 0.3 && (target.y - before.y).abs() < 0.3 {
                assert_eq!(now, target);
                break;
            }
            assert!(distance < previous, "frame {} did not approach", frames);
            // Never overshoots: stays on the same side on each axis
            assert!((target.x - now.x) * (target.x - before.x) >= 0.0);
            assert!((target.y - now.y) * (target.y - before.y) >= 0.0);
            previous = distance;
            assert!(frames < 100, "did not converge");
        }

        // Absorbing once settled
        for _ in 0..10 {
            assert_eq!(light.step(), target);
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut light = follower();
        assert_eq!(light.current(), Point::new(640.0, 360.0));

        light.on_pointer_move(Point::new(500.0, 300.0));
        assert_eq!(light.current(), Point::new(500.0, 300.0));

        light.on_pointer_move(Point::new(520.0, 300.0));
        let next = light.step();
        assert!((next.x - 508.0).abs() < 1e-9);
        assert_eq!(next.y, 300.0);

        for _ in 0..50 {
            light.step();
        }
        assert_eq!(light.current(), Point::new(520.0, 300.0));
    }

    #[test]
    fn test_opacity_gating_does_not_stop_motion() {
        let mut light = follower();
        light.on_pointer_move(Point::new(0.0, 0.0));
        light.on_pointer_move(Point::new(100.0, 0.0));

        assert_eq!(
            light.on_pointer_leave(),
            Effect::SetOpacity {
                target: Target::CursorLight,
                opacity: 0.0
            }
        );
        assert_eq!(light.opacity(), 0.0);
        let moved = light.step();
        assert!(moved.x > 0.0);

        light.on_pointer_enter();
        assert_eq!(light.opacity(), 0.7);
    }

    #[test]
    fn test_frame_effect() {
        let mut light = follower();
        light.on_pointer_move(Point::new(12.0, 34.0));
        assert_eq!(
            light.frame(),
            Effect::SetTransform {
                target: Target::CursorLight,
                transform: Transform { x: 12.0, y: 34.0 }
            }
        );
    }
}
