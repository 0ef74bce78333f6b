//! Enemies: one shared body and damage model, with per-variant behavior
//! plugged in as a [`Brain`].
//!
//! Every frame an active enemy integrates and resolves its body, then asks
//! its brain for a [`Directive`]: the new velocity, facing, and at most one
//! attack. Attacks are returned to the roster, which applies them to the
//! player and owns any projectiles.

pub mod boss;
pub mod melee;
pub mod ranged;
pub mod roster;

use glam::Vec2;
use log::{debug, info};

use crate::api::config::{EnemyCommon, EnemyStats, PhysicsTuning, SimConfig};
use crate::api::types::{Actor, EntityId, SimEvent};
use crate::assets::world::EnemyKind;
use crate::components::health::Health;
use crate::components::properties::Properties;
use crate::components::world::TileWorld;
use crate::core::body::KinematicBody;
use crate::core::rect::Rect;
use crate::core::time::{clamp_dt, progress, Countdown};
use crate::systems::resolver::{block_all, step_body, StepParams, Surfaces};

use boss::BossBrain;
use melee::MeleeBrain;
use ranged::RangedBrain;

pub use roster::EnemyRoster;

/// What a brain can see this frame.
#[derive(Debug, Clone, Copy)]
pub struct Perception {
    pub me: Rect,
    pub vel: Vec2,
    pub on_ground: bool,
    pub player: Rect,
}

impl Perception {
    pub fn distance(&self) -> f32 {
        self.me.center_distance(&self.player)
    }

    /// True when the player's center is to the right of ours.
    pub fn player_is_right(&self) -> bool {
        self.player.center_x() > self.me.center_x()
    }

    /// Knockback sign pushing the player away from us.
    pub fn push_direction(&self) -> f32 {
        self.player.side_of(&self.me)
    }
}

/// Damage aimed at the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub damage: i32,
    pub direction: f32,
    /// Overrides the player's default horizontal knockback speed.
    pub knockback: Option<f32>,
}

/// An attack decided by a brain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiAction {
    /// Melee swing; `None` when the player was out of reach.
    Swing(Option<Strike>),
    /// Fire a projectile at `target`.
    Shoot { target: Vec2 },
    /// Boss leap toward the player.
    Leap,
    /// Boss landing shock; `None` when the player was outside the radius.
    GroundShock(Option<Strike>),
}

/// A brain's output for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Directive {
    pub vel: Vec2,
    pub facing_right: Option<bool>,
    pub action: Option<AiAction>,
}

impl Directive {
    pub fn hold(vel: Vec2) -> Self {
        Self {
            vel,
            facing_right: None,
            action: None,
        }
    }
}

/// Presentation state tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Dormant,
    Idle,
    Moving,
    Attacking,
    PreparingJump,
    Jumping,
    Falling,
    Landing,
    Hurt,
    Dying,
}

/// Lifecycle shared by every variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Active,
    /// Knockback decaying; the brain is paused.
    Hurt,
    /// Fading out; physics frozen.
    Dying { elapsed: f32 },
}

#[derive(Debug, Clone)]
pub enum Brain {
    Melee(MeleeBrain),
    Ranged(RangedBrain),
    Boss(BossBrain),
}

impl Brain {
    fn advance(
        &mut self,
        view: &Perception,
        stats: &EnemyStats,
        cooldown: &mut Countdown,
        dt: f32,
    ) -> Directive {
        match self {
            Brain::Melee(b) => b.advance(view, stats, cooldown, dt),
            Brain::Ranged(b) => b.advance(view, stats, cooldown, dt),
            Brain::Boss(b) => b.advance(view, stats, cooldown, dt),
        }
    }

    /// Back to neutral after a hurt recovery.
    fn reset(&mut self) {
        match self {
            Brain::Melee(b) => b.reset(),
            Brain::Ranged(b) => b.reset(),
            Brain::Boss(b) => b.reset(),
        }
    }

    fn state(&self) -> EnemyState {
        match self {
            Brain::Melee(b) => b.state(),
            Brain::Ranged(b) => b.state(),
            Brain::Boss(b) => b.state(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    id: EntityId,
    kind: EnemyKind,
    body: KinematicBody,
    health: Health,
    stats: EnemyStats,
    common: EnemyCommon,
    phase: Phase,
    invincible: Countdown,
    attack_cooldown: Countdown,
    brain: Brain,
    finished: bool,
}

impl Enemy {
    /// Build an enemy with stats from `config`, overridden by `props`.
    pub fn new(
        id: EntityId,
        kind: EnemyKind,
        pos: Vec2,
        props: &Properties,
        config: &SimConfig,
    ) -> Self {
        let (stats, brain) = match kind {
            EnemyKind::Melee => (
                config.melee.stats().with_properties(props),
                Brain::Melee(MeleeBrain::new(config.enemy.strike_pose_time)),
            ),
            EnemyKind::Ranged => (
                config.ranged.stats().with_properties(props),
                Brain::Ranged(RangedBrain::new(config.ranged.attack_pose_time)),
            ),
            EnemyKind::Boss => {
                let tuning = config.boss.with_properties(props);
                (
                    tuning.stats().with_properties(props),
                    Brain::Boss(BossBrain::new(tuning)),
                )
            }
        };
        Self {
            id,
            kind,
            body: KinematicBody::new(pos, stats.width, stats.height),
            health: Health::new(stats.health),
            stats,
            common: config.enemy,
            phase: Phase::Active,
            invincible: Countdown::idle(),
            attack_cooldown: Countdown::idle(),
            brain,
            finished: false,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EnemyKind::Boss
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn facing_right(&self) -> bool {
        self.body.facing_right
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn stats(&self) -> &EnemyStats {
        &self.stats
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> EnemyState {
        match self.phase {
            Phase::Active => self.brain.state(),
            Phase::Hurt => EnemyState::Hurt,
            Phase::Dying { .. } => EnemyState::Dying,
        }
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.phase, Phase::Dying { .. })
    }

    /// Alive and able to hurt the player on contact.
    pub fn is_alive(&self) -> bool {
        !self.is_dying() && !self.health.is_dead()
    }

    /// Death animation complete; ready for removal.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_active(&self) -> bool {
        match &self.brain {
            Brain::Boss(b) => b.is_active(),
            _ => true,
        }
    }

    /// Blink window after a hit.
    pub fn is_invincible(&self) -> bool {
        self.invincible.is_running()
    }

    fn death_progress(&self) -> f32 {
        match self.phase {
            Phase::Dying { elapsed } => progress(elapsed, self.common.death_duration),
            _ => 0.0,
        }
    }

    /// Sprite opacity, fading to zero while dying.
    pub fn opacity(&self) -> f32 {
        1.0 - self.death_progress()
    }

    /// Sprite scale, shrinking toward `death_scale` while dying.
    pub fn scale(&self) -> f32 {
        1.0 - self.death_progress() * (1.0 - self.common.death_scale)
    }

    /// Whether a health bar should be drawn. Regular enemies show one once
    /// hurt; the boss shows one for the whole fight.
    pub fn shows_health_bar(&self) -> bool {
        if self.is_dying() {
            return false;
        }
        if self.is_boss() {
            self.is_active() && !self.health.is_dead()
        } else {
            !self.health.is_full()
        }
    }

    /// Take a hit from `direction`. Ignored while invincible or dying.
    pub fn take_damage(&mut self, amount: i32, direction: f32, events: &mut Vec<SimEvent>) -> bool {
        if self.invincible.is_running() || self.is_dying() {
            return false;
        }
        self.health.damage(amount);
        self.invincible.start(self.common.invincible_time);
        self.phase = Phase::Hurt;
        let kb = self.stats.knockback;
        self.body.vel = Vec2::new(direction * kb, -kb / 2.0);
        events.push(SimEvent::DamageTaken {
            target: Actor::Enemy(self.id),
            amount,
            direction,
        });
        debug!("enemy {:?} hurt, {} hp left", self.id, self.health.current());

        if self.health.is_dead() {
            self.phase = Phase::Dying { elapsed: 0.0 };
            self.body.vel = Vec2::ZERO;
            events.push(SimEvent::EntityDied {
                target: Actor::Enemy(self.id),
            });
            debug!("enemy {:?} dying", self.id);
        }
        true
    }

    /// Advance one frame against `player`. Returns the attack the brain
    /// chose, if any.
    pub fn update(
        &mut self,
        world: &mut TileWorld,
        player: &Rect,
        physics: &PhysicsTuning,
        dt: f32,
        events: &mut Vec<SimEvent>,
    ) -> Option<AiAction> {
        let dt = clamp_dt(dt, physics.max_dt);

        if let Phase::Dying { elapsed } = &mut self.phase {
            *elapsed += dt;
            if progress(*elapsed, self.common.death_duration) >= 1.0 {
                self.finished = true;
            }
            return None;
        }

        if let Brain::Boss(boss) = &mut self.brain {
            if !boss.is_active() {
                let me = self.body.rect();
                if me.intersects(player) || me.center_distance(player) < self.stats.aggro_radius {
                    boss.activate();
                    info!("boss {:?} activated", self.id);
                    events.push(SimEvent::BossActivated { id: self.id });
                } else {
                    return None;
                }
            }
        }

        self.invincible.tick(dt);
        self.attack_cooldown.tick(dt);

        let params = StepParams {
            gravity: physics.gravity,
            max_fall: physics.max_fall_speed,
            platform_tolerance: physics.platform_tolerance,
            surfaces: Surfaces::STATIC,
        };
        step_body(&mut self.body, world, &params, dt, block_all);

        if self.phase == Phase::Hurt {
            if self.body.vel.x.abs() < self.common.hurt_recover_speed {
                self.body.vel.x = 0.0;
                self.phase = Phase::Active;
                self.brain.reset();
            } else {
                self.body.vel.x *= self.common.hurt_decay;
            }
            return None;
        }

        let view = Perception {
            me: self.body.rect(),
            vel: self.body.vel,
            on_ground: self.body.on_ground(),
            player: *player,
        };
        let directive = self
            .brain
            .advance(&view, &self.stats, &mut self.attack_cooldown, dt);
        self.body.vel = directive.vel;
        if let Some(facing) = directive.facing_right {
            self.body.facing_right = facing;
        }
        directive.action
    }
}
