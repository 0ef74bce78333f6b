//! Kinematic body: sub-pixel position, integer box, velocity.
//!
//! The box is always the rounded position. All movement goes through the
//! per-axis integration calls below so the two never drift apart; the
//! resolver in `systems::resolver` sequences them.

use glam::Vec2;

use crate::core::rect::Rect;

#[derive(Debug, Clone)]
pub struct KinematicBody {
    pos: Vec2,
    rect: Rect,
    /// Velocity in px/s. AI and control code write this between steps.
    pub vel: Vec2,
    on_ground: bool,
    pub facing_right: bool,
}

impl KinematicBody {
    /// Body whose top-left corner starts at `pos`.
    pub fn new(pos: Vec2, width: i32, height: i32) -> Self {
        let rect = Rect::from_pos(pos, width, height);
        Self {
            pos: Vec2::new(rect.x as f32, rect.y as f32),
            rect,
            vel: Vec2::ZERO,
            on_ground: false,
            facing_right: true,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// Leave the ground (jump impulse applied this frame).
    pub fn lift_off(&mut self) {
        self.on_ground = false;
    }

    /// Accelerate downward, capped at `max_fall`.
    pub fn apply_gravity(&mut self, gravity: f32, max_fall: f32, dt: f32) {
        self.vel.y = (self.vel.y + gravity * dt).min(max_fall);
    }

    /// Advance x by `vx * dt` and re-round the box.
    pub fn integrate_x(&mut self, dt: f32) {
        self.pos.x += self.vel.x * dt;
        self.rect.x = self.pos.x.round() as i32;
    }

    /// Advance y by `vy * dt` and re-round the box.
    /// Returns the bottom edge before the move.
    pub fn integrate_y(&mut self, dt: f32) -> f32 {
        let prev_bottom = self.pos.y + self.rect.h as f32;
        self.pos.y += self.vel.y * dt;
        self.rect.y = self.pos.y.round() as i32;
        self.on_ground = false;
        prev_bottom
    }

    /// Push out of `obstacle` against the horizontal velocity and stop.
    pub fn block_horizontal(&mut self, obstacle: &Rect) {
        if self.vel.x > 0.0 {
            self.rect.set_right(obstacle.left());
        } else if self.vel.x < 0.0 {
            self.rect.x = obstacle.right();
        }
        self.pos.x = self.rect.x as f32;
        self.vel.x = 0.0;
    }

    /// Push out of `obstacle` against the vertical velocity and stop.
    /// Returns true when this was a landing.
    pub fn block_vertical(&mut self, obstacle: &Rect) -> bool {
        let landed = self.vel.y > 0.0;
        if landed {
            self.rect.set_bottom(obstacle.top());
            self.on_ground = true;
        } else if self.vel.y < 0.0 {
            self.rect.y = obstacle.bottom();
        }
        self.pos.y = self.rect.y as f32;
        self.vel.y = 0.0;
        landed
    }

    /// Rest the bottom edge on `top` (one-way surfaces).
    pub fn land_on(&mut self, top: i32) {
        self.rect.set_bottom(top);
        self.pos.y = self.rect.y as f32;
        self.vel.y = 0.0;
        self.on_ground = true;
    }

    /// Keep the box inside `[0, width] x [0, height]`.
    /// Velocity pointing out of the world is zeroed; resting on the floor
    /// counts as ground.
    pub fn clamp_to_world(&mut self, width: i32, height: i32) {
        let w = self.rect.w as f32;
        let h = self.rect.h as f32;
        let (width, height) = (width as f32, height as f32);

        if self.pos.x + w > width {
            self.pos.x = width - w;
            self.vel.x = self.vel.x.min(0.0);
        }
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = self.vel.x.max(0.0);
        }
        if self.pos.y + h > height {
            self.pos.y = height - h;
            self.vel.y = 0.0;
            self.on_ground = true;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y = 0.0;
        }
        self.rect.x = self.pos.x.round() as i32;
        self.rect.y = self.pos.y.round() as i32;
    }

    /// Snap the sub-pixel position to the resolved box.
    pub fn settle(&mut self) {
        self.pos = Vec2::new(self.rect.x as f32, self.rect.y as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_tracks_rounded_position() {
        let mut body = KinematicBody::new(Vec2::new(10.0, 20.0), 8, 8);
        body.vel = Vec2::new(30.0, 0.0);
        body.integrate_x(0.05); // +1.5
        assert_eq!(body.rect().x, 12);
        assert!((body.pos().x - 11.5).abs() < 1e-4);
    }

    #[test]
    fn gravity_caps_at_max_fall() {
        let mut body = KinematicBody::new(Vec2::ZERO, 8, 8);
        for _ in 0..100 {
            body.apply_gravity(1800.0, 600.0, 0.016);
        }
        assert_eq!(body.vel.y, 600.0);
    }

    #[test]
    fn block_horizontal_snaps_against_velocity() {
        let wall = Rect::new(100, 0, 32, 32);
        let mut body = KinematicBody::new(Vec2::new(90.0, 0.0), 16, 16);
        body.vel.x = 50.0;
        body.block_horizontal(&wall);
        assert_eq!(body.rect().right(), 100);
        assert_eq!(body.vel.x, 0.0);

        let mut body = KinematicBody::new(Vec2::new(120.0, 0.0), 16, 16);
        body.vel.x = -50.0;
        body.block_horizontal(&wall);
        assert_eq!(body.rect().left(), 132);
    }

    #[test]
    fn block_vertical_reports_landing() {
        let floor = Rect::new(0, 100, 64, 32);
        let mut body = KinematicBody::new(Vec2::new(0.0, 90.0), 16, 16);
        body.vel.y = 200.0;
        assert!(body.block_vertical(&floor));
        assert!(body.on_ground());
        assert_eq!(body.rect().bottom(), 100);

        let mut body = KinematicBody::new(Vec2::new(0.0, 120.0), 16, 16);
        body.vel.y = -200.0;
        assert!(!body.block_vertical(&floor));
        assert_eq!(body.rect().top(), 132);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn world_clamp_contains_box() {
        let mut body = KinematicBody::new(Vec2::new(-40.0, 700.0), 32, 64);
        body.vel = Vec2::new(-100.0, 300.0);
        body.clamp_to_world(640, 480);
        assert!(body.rect().within(640, 480));
        assert!(body.on_ground());
        assert_eq!(body.vel, Vec2::ZERO);
    }
}
