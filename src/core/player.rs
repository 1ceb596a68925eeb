use std::f32::consts::PI;

/// Position in map units and heading in radians.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

impl Pose {
    pub const fn new(x: f32, y: f32, angle: f32) -> Self {
        Self { x, y, angle }
    }
}

/// Movement requested for one frame, independent of how it was captured.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl MoveIntent {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.turn_left || self.turn_right)
    }
}

pub struct Player {
    pub pose: Pose,
    pub fov: f32,        // campo de visión
    pub speed_walk: f32, // map units / s
    pub speed_turn: f32, // rad / s
}

impl Player {
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            fov: PI / 3.0,
            speed_walk: 2.0,
            speed_turn: 1.0,
        }
    }

    /// Applies one frame of input. Forward motion only happens when
    /// `is_free(x, y)` accepts the destination.
    pub fn update(&mut self, intent: MoveIntent, dt: f32, is_free: impl Fn(f32, f32) -> bool) {
        if intent.turn_right {
            self.pose.angle += self.speed_turn * dt;
        }
        if intent.turn_left {
            self.pose.angle -= self.speed_turn * dt;
        }
        if intent.forward {
            let nx = self.pose.x + dt * self.speed_walk * self.pose.angle.cos();
            let ny = self.pose.y + dt * self.speed_walk * self.pose.angle.sin();
            if is_free(nx, ny) {
                self.pose.x = nx;
                self.pose.y = ny;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turning_is_scaled_by_dt() {
        let mut p = Player::new(Pose::new(1.0, 1.0, 0.0));
        p.update(MoveIntent { turn_right: true, ..Default::default() }, 0.5, |_, _| true);
        assert!((p.pose.angle - 0.5).abs() < 1e-6);
        p.update(MoveIntent { turn_left: true, ..Default::default() }, 0.25, |_, _| true);
        assert!((p.pose.angle - 0.25).abs() < 1e-6);
    }

    #[test]
    fn forward_follows_heading() {
        let mut p = Player::new(Pose::new(1.0, 1.0, PI / 2.0));
        p.update(MoveIntent { forward: true, ..Default::default() }, 0.5, |_, _| true);
        assert!((p.pose.x - 1.0).abs() < 1e-5);
        assert!((p.pose.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn blocked_move_keeps_position() {
        let mut p = Player::new(Pose::new(1.0, 1.0, 0.0));
        p.update(MoveIntent { forward: true, ..Default::default() }, 1.0, |_, _| false);
        assert_eq!(p.pose, Pose::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn idle_intent() {
        assert!(MoveIntent::default().is_idle());
        assert!(!MoveIntent { forward: true, ..Default::default() }.is_idle());
    }
}
