//! Falling tiles: shake when stood on, drop, vanish, respawn.

use crate::api::config::TileTuning;
use crate::core::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallingState {
    /// Resting at its origin, collidable.
    Idle,
    /// Triggered; jitters in place for `shake_time`.
    Shaking,
    /// Descending at constant speed.
    Falling,
    /// Off-screen and non-collidable until the respawn timer runs out.
    Despawned,
}

/// Jitter applied to the drawn x while shaking.
const SHAKE_CYCLE: [i32; 4] = [-1, -2, 1, 0];

#[derive(Debug, Clone)]
pub struct FallingTile {
    origin: Rect,
    rect: Rect,
    fall_y: f32,
    state: FallingState,
    time_in_state: f32,
    shake_step: usize,
    /// Only tiles with this flag can be stood on (and so triggered).
    pub fall_on_stand: bool,
    pub respawn_time: f32,
}

impl FallingTile {
    pub fn new(rect: Rect, fall_on_stand: bool, respawn_time: f32) -> Self {
        Self {
            origin: rect,
            rect,
            fall_y: rect.y as f32,
            state: FallingState::Idle,
            time_in_state: 0.0,
            shake_step: 0,
            fall_on_stand,
            respawn_time,
        }
    }

    pub fn state(&self) -> FallingState {
        self.state
    }

    /// Collision box. Stays on the origin column while shaking.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn origin(&self) -> Rect {
        self.origin
    }

    pub fn is_visible(&self) -> bool {
        self.state != FallingState::Despawned
    }

    pub fn is_collidable(&self) -> bool {
        self.fall_on_stand && self.is_visible()
    }

    /// Horizontal draw offset for the shake effect.
    pub fn shake_offset(&self) -> i32 {
        if self.state == FallingState::Shaking {
            SHAKE_CYCLE[self.shake_step % SHAKE_CYCLE.len()]
        } else {
            0
        }
    }

    /// Start shaking if resting. Returns true when this call triggered it.
    pub fn trigger(&mut self) -> bool {
        if self.state != FallingState::Idle {
            return false;
        }
        self.enter(FallingState::Shaking);
        true
    }

    fn enter(&mut self, state: FallingState) {
        self.state = state;
        self.time_in_state = 0.0;
    }

    /// Advance the lifecycle. Returns true on the frame the tile respawns.
    pub fn update(&mut self, dt: f32, tuning: &TileTuning) -> bool {
        self.time_in_state += dt;
        match self.state {
            FallingState::Idle => {}
            FallingState::Shaking => {
                self.shake_step = self.shake_step.wrapping_add(1);
                if self.time_in_state >= tuning.shake_time {
                    self.shake_step = 0;
                    self.enter(FallingState::Falling);
                }
            }
            FallingState::Falling => {
                self.fall_y += tuning.fall_speed * dt;
                self.rect.y = self.fall_y.round() as i32;
                if self.rect.top() > self.origin.top() + tuning.drop_distance {
                    self.enter(FallingState::Despawned);
                }
            }
            FallingState::Despawned => {
                if self.time_in_state >= self.respawn_time {
                    self.rect = self.origin;
                    self.fall_y = self.origin.y as f32;
                    self.enter(FallingState::Idle);
                    return true;
                }
            }
        }
        false
    }
}
