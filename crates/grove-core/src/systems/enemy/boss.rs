use glam::Vec2;

use super::{AiAction, Directive, EnemyState, Perception, Strike};
use crate::api::config::{BossTuning, EnemyStats};
use crate::core::time::Countdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossState {
    Dormant,
    Idle,
    PreparingJump,
    Jumping,
    Falling,
    Landing,
}

/// Jump cycle: idle, crouch, jump toward the player, fall, and a ground
/// shock on landing. A leap preempts idle when the player is close.
#[derive(Debug, Clone)]
pub struct BossBrain {
    state: BossState,
    state_time: f32,
    jump_timer: Countdown,
    tuning: BossTuning,
}

impl BossBrain {
    pub fn new(tuning: BossTuning) -> Self {
        Self {
            state: BossState::Dormant,
            state_time: 0.0,
            jump_timer: Countdown::idle(),
            tuning,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state != BossState::Dormant
    }

    pub fn activate(&mut self) {
        if self.state == BossState::Dormant {
            self.enter(BossState::Idle);
        }
    }

    pub fn reset(&mut self) {
        if self.is_active() {
            self.enter(BossState::Idle);
        }
    }

    pub fn state(&self) -> EnemyState {
        match self.state {
            BossState::Dormant => EnemyState::Dormant,
            BossState::Idle => EnemyState::Idle,
            BossState::PreparingJump => EnemyState::PreparingJump,
            BossState::Jumping => EnemyState::Jumping,
            BossState::Falling => EnemyState::Falling,
            BossState::Landing => EnemyState::Landing,
        }
    }

    fn enter(&mut self, state: BossState) {
        self.state = state;
        self.state_time = 0.0;
    }

    pub fn advance(
        &mut self,
        view: &Perception,
        stats: &EnemyStats,
        cooldown: &mut Countdown,
        dt: f32,
    ) -> Directive {
        let mut out = Directive::hold(view.vel);
        if !self.is_active() {
            return out;
        }
        self.jump_timer.tick(dt);
        self.state_time += dt;
        let t = self.tuning;

        match self.state {
            BossState::Dormant => {}
            BossState::Idle => {
                out.vel.x = 0.0;
                if !self.jump_timer.is_running() && view.on_ground {
                    self.enter(BossState::PreparingJump);
                }
            }
            BossState::PreparingJump => {
                if self.state_time >= t.jump_delay {
                    let right = view.player_is_right();
                    out.vel = Vec2::new(if right { stats.speed } else { -stats.speed }, -t.jump_power);
                    out.facing_right = Some(right);
                    self.enter(BossState::Jumping);
                }
            }
            BossState::Jumping => {
                if view.vel.y >= 0.0 {
                    self.enter(BossState::Falling);
                }
            }
            BossState::Falling => {
                if view.on_ground {
                    out.vel.x = 0.0;
                    self.jump_timer.start(t.jump_cooldown);
                    self.enter(BossState::Landing);
                    out.action = Some(AiAction::GroundShock(self.shock(view)));
                }
            }
            BossState::Landing => {
                if self.state_time >= t.landing_hold {
                    self.enter(BossState::Idle);
                }
            }
        }

        if self.state == BossState::Idle
            && out.action.is_none()
            && view.distance() < stats.attack_range
            && !cooldown.is_running()
        {
            let right = view.player_is_right();
            let vx = stats.speed * t.leap_speed_factor;
            out.vel = Vec2::new(if right { vx } else { -vx }, -t.jump_power * t.leap_power_factor);
            out.facing_right = Some(right);
            cooldown.start(stats.attack_cooldown);
            self.enter(BossState::Jumping);
            out.action = Some(AiAction::Leap);
        }
        out
    }

    fn shock(&self, view: &Perception) -> Option<Strike> {
        if view.distance() < self.tuning.shake_radius {
            Some(Strike {
                damage: self.tuning.shake_damage,
                direction: view.push_direction(),
                knockback: Some(self.tuning.shake_knockback),
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rect::Rect;

    const DT: f32 = 1.0 / 60.0;

    fn view(player_x: i32, vel: Vec2, on_ground: bool) -> Perception {
        Perception {
            me: Rect::new(500, 380, 140, 120),
            vel,
            on_ground,
            player: Rect::new(player_x, 436, 32, 64),
        }
    }

    fn awake() -> (BossBrain, EnemyStats) {
        let tuning = BossTuning::default();
        let mut brain = BossBrain::new(tuning);
        brain.activate();
        (brain, tuning.stats())
    }

    #[test]
    fn dormant_until_activated() {
        let mut brain = BossBrain::new(BossTuning::default());
        let mut cd = Countdown::idle();
        let out = brain.advance(&view(560, Vec2::ZERO, true), &BossTuning::default().stats(), &mut cd, DT);
        assert!(out.action.is_none());
        assert_eq!(brain.state(), EnemyState::Dormant);
        brain.reset();
        assert_eq!(brain.state(), EnemyState::Dormant);
    }

    #[test]
    fn jump_cycle_ends_in_one_shock() {
        let (mut brain, stats) = awake();
        // Far enough that the leap never fires, close enough for the shock.
        let mut cd = Countdown::idle();
        cd.start(100.0);
        let player_x = 690;

        brain.advance(&view(player_x, Vec2::ZERO, true), &stats, &mut cd, DT);
        assert_eq!(brain.state(), EnemyState::PreparingJump);

        let mut out = brain.advance(&view(player_x, Vec2::ZERO, true), &stats, &mut cd, DT);
        let mut frames = 0;
        while brain.state() == EnemyState::PreparingJump && frames < 100 {
            out = brain.advance(&view(player_x, Vec2::ZERO, true), &stats, &mut cd, DT);
            frames += 1;
        }
        assert_eq!(brain.state(), EnemyState::Jumping);
        assert!((out.vel.y + 900.0).abs() < 1e-3);
        assert_eq!(out.vel.x, 180.0);

        brain.advance(&view(player_x, Vec2::new(180.0, 10.0), false), &stats, &mut cd, DT);
        assert_eq!(brain.state(), EnemyState::Falling);

        let out = brain.advance(&view(player_x, Vec2::new(180.0, 0.0), true), &stats, &mut cd, DT);
        assert_eq!(brain.state(), EnemyState::Landing);
        match out.action {
            Some(AiAction::GroundShock(Some(strike))) => {
                assert_eq!(strike.damage, 1);
                assert_eq!(strike.knockback, Some(600.0));
            }
            other => panic!("expected a shock, got {:?}", other),
        }

        let mut shocks = 0;
        for _ in 0..60 {
            let out = brain.advance(&view(player_x, Vec2::ZERO, true), &stats, &mut cd, DT);
            if matches!(out.action, Some(AiAction::GroundShock(_))) {
                shocks += 1;
            }
        }
        assert_eq!(shocks, 0);
        assert_eq!(brain.state(), EnemyState::Idle, "jump cooldown holds idle");
    }

    #[test]
    fn shock_misses_distant_player() {
        let (mut brain, stats) = awake();
        let mut cd = Countdown::idle();
        cd.start(100.0);
        brain.enter(BossState::Falling);
        let out = brain.advance(&view(1200, Vec2::ZERO, true), &stats, &mut cd, DT);
        assert_eq!(out.action, Some(AiAction::GroundShock(None)));
    }

    #[test]
    fn leap_preempts_idle_in_range() {
        let (mut brain, stats) = awake();
        let mut cd = Countdown::idle();
        // Block the regular jump so idle holds.
        brain.jump_timer.start(10.0);
        let out = brain.advance(&view(400, Vec2::ZERO, true), &stats, &mut cd, DT);
        assert_eq!(out.action, Some(AiAction::Leap));
        assert_eq!(brain.state(), EnemyState::Jumping);
        assert_eq!(out.facing_right, Some(false));
        assert!((out.vel.x + 270.0).abs() < 1e-3);
        assert!((out.vel.y + 720.0).abs() < 1e-3);
        assert!(cd.is_running());
    }
}
