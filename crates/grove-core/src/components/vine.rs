//! The player's melee hitbox: a vine that grows out of the ground ahead
//! of the player, holds, then retreats.

use crate::api::config::VineTuning;
use crate::core::rect::Rect;
use crate::core::time::progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VinePhase {
    Growing,
    Active,
    Retreating,
}

#[derive(Debug, Clone)]
pub struct Vine {
    /// Full-height box, anchored at the ground line.
    anchor: Rect,
    phase: VinePhase,
    time_in_phase: f32,
    tuning: VineTuning,
}

impl Vine {
    /// Spawn a vine `reach` px ahead of `owner`'s center, standing on its
    /// bottom edge.
    pub fn spawn(owner: Rect, facing_right: bool, tuning: VineTuning) -> Self {
        let dir = if facing_right { 1 } else { -1 };
        let cx = owner.center_x() + dir * tuning.reach;
        Self {
            anchor: Rect::mid_bottom(cx, owner.bottom(), tuning.width, tuning.height),
            phase: VinePhase::Growing,
            time_in_phase: 0.0,
            tuning,
        }
    }

    pub fn phase(&self) -> VinePhase {
        self.phase
    }

    pub fn damage(&self) -> i32 {
        self.tuning.damage
    }

    /// Visible height fraction.
    pub fn extent(&self) -> f32 {
        match self.phase {
            VinePhase::Growing => progress(self.time_in_phase, self.tuning.grow_time),
            VinePhase::Active => 1.0,
            VinePhase::Retreating => 1.0 - progress(self.time_in_phase, self.tuning.grow_time),
        }
    }

    /// Current hitbox. Grows upward from the ground line.
    pub fn hitbox(&self) -> Rect {
        let h = (self.anchor.h as f32 * self.extent()).round() as i32;
        Rect::mid_bottom(self.anchor.center_x(), self.anchor.bottom(), self.anchor.w, h)
    }

    /// Advance the vine. Returns false once it has fully retreated.
    pub fn update(&mut self, dt: f32) -> bool {
        self.time_in_phase += dt;
        match self.phase {
            VinePhase::Growing if self.time_in_phase >= self.tuning.grow_time => {
                self.phase = VinePhase::Active;
                self.time_in_phase = 0.0;
            }
            VinePhase::Active if self.time_in_phase >= self.tuning.hold_time => {
                self.phase = VinePhase::Retreating;
                self.time_in_phase = 0.0;
            }
            VinePhase::Retreating if self.time_in_phase >= self.tuning.grow_time => {
                return false;
            }
            _ => {}
        }
        true
    }
}
