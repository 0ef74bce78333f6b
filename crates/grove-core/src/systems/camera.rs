use glam::Vec2;

use crate::api::config::CameraTuning;
use crate::core::rect::Rect;
use crate::extensions::easing::{ease_vec2, Easing};

/// Screen-by-screen camera for a fixed logical viewport.
///
/// The target is always a whole multiple of the viewport size, clamped so
/// the viewport stays inside the world. Moving to a new screen is an eased
/// transition; no retarget is accepted until it finishes. Horizontally the
/// logical view is letterboxed inside a possibly wider physical screen.
#[derive(Debug, Clone)]
pub struct ScreenCamera {
    world: Vec2,
    /// Logical viewport size.
    view: Vec2,
    physical_width: f32,
    /// Horizontal letterbox offset: `(physical - logical) / 2`, floored.
    x_offset: f32,
    current: Vec2,
    target: Vec2,
    start: Vec2,
    progress: f32,
    moving: bool,
    transition_time: f32,
    deadzone_top: f32,
    pub easing: Easing,
}

impl ScreenCamera {
    pub fn new(world_width: f32, world_height: f32, physical_width: f32, tuning: &CameraTuning) -> Self {
        let mut cam = Self {
            world: Vec2::new(world_width, world_height),
            view: Vec2::new(tuning.logical_width, tuning.logical_height),
            physical_width,
            x_offset: 0.0,
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            start: Vec2::ZERO,
            progress: 1.0,
            moving: false,
            transition_time: tuning.transition_time,
            deadzone_top: tuning.deadzone_top,
            easing: Easing::CubicOut,
        };
        cam.resize(physical_width);
        cam
    }

    /// Update the physical screen width (e.g. on window resize).
    pub fn resize(&mut self, physical_width: f32) {
        self.physical_width = physical_width;
        self.x_offset = ((physical_width - self.view.x) / 2.0).floor();
    }

    pub fn position(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn x_offset(&self) -> f32 {
        self.x_offset
    }

    fn clamp_x(&self, x: f32) -> f32 {
        x.min(self.world.x - self.view.x).max(0.0)
    }

    fn clamp_y(&self, y: f32) -> f32 {
        y.min(self.world.y - self.view.y).max(0.0)
    }

    /// Pick the screen containing `focus` and ease toward it.
    pub fn update(&mut self, focus: &Rect, dt: f32) {
        let cx = focus.center_x() as f32;
        let cy = focus.center_y() as f32;

        let new_x = self.clamp_x((cx / self.view.x).floor() * self.view.x);

        // Vertical retarget only when the focus leaves the band between the
        // deadzone line and the bottom of the view.
        let upper = self.current.y + self.deadzone_top;
        let lower = self.current.y + self.view.y;
        let new_y = if cy < upper || cy > lower {
            (cy / self.view.y).floor() * self.view.y
        } else {
            self.target.y
        };
        let new_target = Vec2::new(new_x, self.clamp_y(new_y));

        if new_target != self.target && !self.moving {
            self.target = new_target;
            self.start = self.current;
            self.moving = true;
            self.progress = 0.0;
        }

        if self.moving {
            self.progress += if self.transition_time <= 0.0 {
                1.0
            } else {
                dt / self.transition_time
            };
            if self.progress >= 1.0 {
                self.progress = 1.0;
                self.moving = false;
            }
            self.current = ease_vec2(self.start, self.target, self.progress, self.easing);
        }
    }

    /// Jump straight to a position (clamped), cancelling any transition.
    pub fn set_position(&mut self, x: f32, y: f32) {
        let pos = Vec2::new(self.clamp_x(x), self.clamp_y(y));
        self.current = pos;
        self.target = pos;
        self.start = pos;
        self.moving = false;
        self.progress = 1.0;
    }

    /// Snap to the screen containing `focus`.
    pub fn snap_to(&mut self, focus: &Rect) {
        let x = (focus.center_x() as f32 / self.view.x).floor() * self.view.x;
        let y = (focus.center_y() as f32 / self.view.y).floor() * self.view.y;
        self.set_position(x, y);
    }

    /// World box to screen box. Horizontal axis carries the letterbox offset.
    pub fn apply(&self, rect: &Rect) -> Rect {
        rect.offset(
            (-self.current.x + self.x_offset).round() as i32,
            (-self.current.y).round() as i32,
        )
    }

    /// Logical viewport in world space.
    pub fn world_rect(&self) -> Rect {
        Rect::from_pos(self.current, self.view.x as i32, self.view.y as i32)
    }

    /// Visibility against the physical screen, which may show more of
    /// the world than the logical view on wide displays.
    pub fn is_in_view(&self, rect: &Rect) -> bool {
        let visible = Rect::from_pos(
            Vec2::new(self.current.x - self.x_offset, self.current.y),
            self.physical_width as i32,
            self.view.y as i32,
        );
        visible.intersects(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(physical_width: f32) -> ScreenCamera {
        ScreenCamera::new(1920.0, 960.0, physical_width, &CameraTuning::default())
    }

    fn settle(cam: &mut ScreenCamera, focus: &Rect) {
        for _ in 0..60 {
            cam.update(focus, 1.0 / 60.0);
        }
    }

    #[test]
    fn target_is_quantized_to_screens() {
        let mut cam = camera(640.0);
        let focus = Rect::new(700, 100, 32, 64);
        cam.update(&focus, 0.0);
        assert_eq!(cam.target(), Vec2::new(640.0, 0.0));
        settle(&mut cam, &focus);
        assert_eq!(cam.position(), Vec2::new(640.0, 0.0));
        assert!(!cam.is_moving());
    }

    #[test]
    fn target_is_clamped_to_world() {
        let mut cam = camera(640.0);
        let focus = Rect::new(1900, 940, 16, 16);
        cam.update(&focus, 0.0);
        assert_eq!(cam.target(), Vec2::new(1280.0, 480.0));
    }

    #[test]
    fn transition_eases_out() {
        let mut cam = camera(640.0);
        let focus = Rect::new(700, 100, 32, 64);
        cam.update(&focus, 0.25);
        // Half way through: 1 - 0.5^3 of the distance.
        assert!((cam.position().x - 560.0).abs() < 1e-3);
    }

    #[test]
    fn no_retarget_while_moving() {
        let mut cam = camera(640.0);
        cam.update(&Rect::new(700, 100, 32, 64), 0.1);
        assert!(cam.is_moving());
        cam.update(&Rect::new(1300, 100, 32, 64), 0.1);
        assert_eq!(cam.target().x, 640.0);
    }

    #[test]
    fn vertical_deadzone_holds_target() {
        let mut cam = camera(640.0);
        cam.set_position(0.0, 480.0);
        // Center at y=620: between 480+120 and 480+480.
        cam.update(&Rect::new(100, 600, 32, 40), 0.1);
        assert_eq!(cam.target().y, 480.0);
        assert!(!cam.is_moving());
        // Center at y=560: above the deadzone line.
        cam.update(&Rect::new(100, 540, 32, 40), 0.1);
        assert_eq!(cam.target().y, 480.0, "still the same screen");
        cam.update(&Rect::new(100, 400, 32, 40), 0.1);
        assert_eq!(cam.target().y, 0.0);
    }

    #[test]
    fn apply_offsets_by_letterbox_horizontally_only() {
        let mut cam = camera(800.0);
        cam.set_position(640.0, 480.0);
        let screen = cam.apply(&Rect::new(700, 500, 32, 32));
        assert_eq!(screen, Rect::new(700 - 640 + 80, 20, 32, 32));
    }

    #[test]
    fn in_view_uses_physical_width() {
        let mut cam = camera(800.0);
        cam.set_position(640.0, 0.0);
        // Just left of the logical view but inside the letterbox margin.
        let edge = Rect::new(600, 100, 32, 32);
        assert!(!cam.world_rect().intersects(&edge));
        assert!(cam.is_in_view(&edge));
        assert!(!cam.is_in_view(&Rect::new(500, 100, 32, 32)));
    }

    #[test]
    fn zero_transition_time_snaps() {
        let tuning = CameraTuning {
            transition_time: 0.0,
            ..CameraTuning::default()
        };
        let mut cam = ScreenCamera::new(1920.0, 960.0, 640.0, &tuning);
        cam.update(&Rect::new(700, 100, 32, 64), 0.016);
        assert_eq!(cam.position(), Vec2::new(640.0, 0.0));
    }
}
