use glam::Vec2;

use super::{AiAction, Directive, EnemyState, Perception, Strike};
use crate::api::config::EnemyStats;
use crate::core::time::Countdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeleeState {
    Idle,
    Moving,
    Attacking,
}

/// Chases the player inside its aggro radius and swings when in range.
#[derive(Debug, Clone)]
pub struct MeleeBrain {
    state: MeleeState,
    pose: Countdown,
    pose_time: f32,
}

impl MeleeBrain {
    pub fn new(pose_time: f32) -> Self {
        Self {
            state: MeleeState::Idle,
            pose: Countdown::idle(),
            pose_time,
        }
    }

    pub fn reset(&mut self) {
        self.state = MeleeState::Idle;
        self.pose.clear();
    }

    pub fn state(&self) -> EnemyState {
        match self.state {
            MeleeState::Idle => EnemyState::Idle,
            MeleeState::Moving => EnemyState::Moving,
            MeleeState::Attacking => EnemyState::Attacking,
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
            self.state = MeleeState::Idle;
            return out;
        }

        if distance > stats.attack_range {
            let right = view.player_is_right();
            out.vel.x = if right { stats.speed } else { -stats.speed };
            out.facing_right = Some(right);
            self.state = MeleeState::Moving;
        } else if !cooldown.is_running() {
            cooldown.start(stats.attack_cooldown);
            self.pose.start(self.pose_time);
            self.state = MeleeState::Attacking;
            out.action = Some(AiAction::Swing(reach(view, stats)));
        } else if self.pose.is_running() {
            self.state = MeleeState::Attacking;
        } else {
            self.state = MeleeState::Idle;
        }
        out
    }
}

/// The swing connects only when the player is within range horizontally
/// and roughly level with us.
fn reach(view: &Perception, stats: &EnemyStats) -> Option<Strike> {
    let dx = (view.me.center_x() - view.player.center_x()).abs() as f32;
    let dy = (view.me.center_y() - view.player.center_y()).abs() as f32;
    if dx < stats.attack_range && dy < view.me.h as f32 / 2.0 {
        Some(Strike {
            damage: stats.damage,
            direction: view.push_direction(),
            knockback: None,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::MeleeTuning;
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
    fn ignores_player_outside_aggro() {
        let mut brain = MeleeBrain::new(0.4);
        let mut cd = Countdown::idle();
        let out = brain.advance(&view(900), &MeleeTuning::default().stats(), &mut cd, 0.016);
        assert_eq!(out.vel.x, 0.0);
        assert_eq!(brain.state(), EnemyState::Idle);
    }

    #[test]
    fn chases_inside_aggro() {
        let mut brain = MeleeBrain::new(0.4);
        let mut cd = Countdown::idle();
        let out = brain.advance(&view(380), &MeleeTuning::default().stats(), &mut cd, 0.016);
        assert_eq!(out.vel.x, -120.0);
        assert_eq!(out.facing_right, Some(false));
        assert_eq!(brain.state(), EnemyState::Moving);
    }

    #[test]
    fn swings_in_range_on_cooldown() {
        let stats = MeleeTuning::default().stats();
        let mut brain = MeleeBrain::new(0.4);
        let mut cd = Countdown::idle();
        let out = brain.advance(&view(530), &stats, &mut cd, 0.016);
        assert_eq!(out.vel.x, 0.0);
        match out.action {
            Some(AiAction::Swing(Some(strike))) => {
                assert_eq!(strike.damage, 1);
                assert_eq!(strike.direction, 1.0);
            }
            other => panic!("expected a connecting swing, got {:?}", other),
        }
        assert!(cd.is_running());

        let out = brain.advance(&view(530), &stats, &mut cd, 0.016);
        assert!(out.action.is_none(), "cooling down");
        assert_eq!(brain.state(), EnemyState::Attacking);
        for _ in 0..30 {
            brain.advance(&view(530), &stats, &mut cd, 0.016);
        }
        assert_eq!(brain.state(), EnemyState::Idle);
    }
}
