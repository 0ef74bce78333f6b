use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned integer box in world pixels. Y grows downward.
///
/// Boxes with zero width or height never intersect anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of the given size whose top-left corner is the rounded `pos`.
    pub fn from_pos(pos: Vec2, w: i32, h: i32) -> Self {
        Self::new(pos.x.round() as i32, pos.y.round() as i32, w, h)
    }

    /// Box of the given size centered on `(cx, cy)`.
    pub fn centered(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    /// Box of the given size whose bottom edge is centered on `(cx, bottom)`.
    pub fn mid_bottom(cx: i32, bottom: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, bottom - h, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x() as f32, self.center_y() as f32)
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Translated copy.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Strict overlap test: touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Whether `self` lies entirely inside `[0, width] x [0, height]`.
    pub fn within(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= width && self.bottom() <= height
    }

    /// Euclidean distance between the centers of two boxes.
    pub fn center_distance(&self, other: &Rect) -> f32 {
        let dx = (self.center_x() - other.center_x()) as f32;
        let dy = (self.center_y() - other.center_y()) as f32;
        dx.hypot(dy)
    }

    /// +1 when `self` is to the right of `other` (by center), -1 otherwise.
    pub fn side_of(&self, other: &Rect) -> f32 {
        if self.center_x() > other.center_x() {
            1.0
        } else {
            -1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 32, 32);
        let b = Rect::new(32, 0, 32, 32);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&b.offset(-1, 0)));
    }

    #[test]
    fn empty_boxes_never_intersect() {
        let a = Rect::new(0, 0, 32, 0);
        let b = Rect::new(0, 0, 32, 32);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn anchors() {
        let r = Rect::mid_bottom(100, 200, 32, 64);
        assert_eq!(r.center_x(), 100);
        assert_eq!(r.bottom(), 200);

        let c = Rect::centered(50, 50, 10, 10);
        assert_eq!(c, Rect::new(45, 45, 10, 10));
    }

    #[test]
    fn from_pos_rounds() {
        let r = Rect::from_pos(Vec2::new(10.5, 9.49), 4, 4);
        assert_eq!((r.x, r.y), (11, 9));
    }

    #[test]
    fn side_of_uses_centers() {
        let a = Rect::new(100, 0, 10, 10);
        let b = Rect::new(0, 0, 10, 10);
        assert_eq!(a.side_of(&b), 1.0);
        assert_eq!(b.side_of(&a), -1.0);
    }
}
