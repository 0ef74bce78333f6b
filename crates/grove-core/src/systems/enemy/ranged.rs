use glam::Vec2;

use super::{AiAction, Directive, EnemyState, Perception};
use crate::api::config::EnemyStats;
use crate::core::time::Countdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangedState {
    Idle,
    Moving,
    Attacking,
}

/// Closes to firing range, then keeps still and shoots at the player's
/// current position whenever the cooldown allows.
#[derive(Debug, Clone)]
pub struct RangedBrain {
    state: RangedState,
    pose: Countdown,
    pose_time: f32,
}

impl RangedBrain {
    pub fn new(pose_time: f32) -> Self {
        Self {
            state: RangedState::Idle,
            pose: Countdown::idle(),
            pose_time,
        }
    }

    pub fn reset(&mut self) {
        self.state = RangedState::Idle;
        self.pose.clear();
    }

    pub fn state(&self) -> EnemyState {
        match self.state {
            RangedState::Idle => EnemyState::Idle,
            RangedState::Moving => EnemyState::Moving,
            RangedState::Attacking => EnemyState::Attacking,
        }
    }

    pub fn advance(
        &mut self,
        view: &Perception,
        stats: &EnemyStats,
        cooldown: &mut Countdown,
        dt: f32,
    ) -> Directive {
        self.pose.tick(dt);
        let mut out = Directive::hold(Vec2::new(0.0, view.vel.y));
        let distance = view.distance();

        if distance >= stats.aggro_radius {
            self.state = RangedState::Idle;
            return out;
        }

        // Face the target once aggroed.
        let right = view.player_is_right();
        out.facing_right = Some(right);

        if distance > stats.attack_range {
            out.vel.x = if right { stats.speed } else { -stats.speed };
            self.state = RangedState::Moving;
        } else if !cooldown.is_running() {
            cooldown.start(stats.attack_cooldown);
            self.pose.start(self.pose_time);
            self.state = RangedState::Attacking;
            out.action = Some(AiAction::Shoot {
                target: view.player.center(),
            });
        } else if self.pose.is_running() {
            self.state = RangedState::Attacking;
        } else {
            self.state = RangedState::Idle;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::RangedTuning;
    use crate::core::rect::Rect;

    fn view(player_x: i32) -> Perception {
        Perception {
            me: Rect::new(500, 436, 64, 64),
            vel: Vec2::ZERO,
            on_ground: true,
            player: Rect::new(player_x, 436, 32, 64),
        }
    }

    #[test]
    fn approaches_until_in_range() {
        let mut brain = RangedBrain::new(0.6);
        let mut cd = Countdown::idle();
        // 250px away: inside aggro (300), outside range (150).
        let out = brain.advance(&view(766), &RangedTuning::default().stats(), &mut cd, 0.016);
        assert_eq!(out.vel.x, 60.0);
        assert_eq!(brain.state(), EnemyState::Moving);
        assert!(out.action.is_none());
    }

    #[test]
    fn shoots_at_player_center() {
        let stats = RangedTuning::default().stats();
        let mut brain = RangedBrain::new(0.6);
        let mut cd = Countdown::idle();
        let out = brain.advance(&view(400), &stats, &mut cd, 0.016);
        assert_eq!(out.vel.x, 0.0);
        assert_eq!(out.facing_right, Some(false));
        match out.action {
            Some(AiAction::Shoot { target }) => {
                assert!((target.x - 416.0).abs() < 1e-3);
                assert!((target.y - 468.0).abs() < 1e-3);
            }
            other => panic!("expected a shot, got {:?}", other),
        }

        let out = brain.advance(&view(400), &stats, &mut cd, 0.016);
        assert!(out.action.is_none());
        assert_eq!(brain.state(), EnemyState::Attacking);
    }
}
