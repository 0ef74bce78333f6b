//! Player control: movement, buffered jumps with coyote time, the vine
//! attack, charge-and-dash, and knockback after taking damage.
//!
//! Charging and dashing share one [`PlayerAction`] slot, so they can never
//! both be active. Knockback and invincibility are orthogonal flags
//! driven by their own timers.

use glam::Vec2;
use log::debug;

use crate::api::config::{PhysicsTuning, PlayerTuning, VineTuning};
use crate::api::types::{Actor, AttackKind, SimEvent};
use crate::components::breakable::TileDamage;
use crate::components::health::Health;
use crate::components::vine::Vine;
use crate::components::world::{SolidSource, TileWorld};
use crate::core::body::KinematicBody;
use crate::core::rect::Rect;
use crate::core::time::{clamp_dt, progress, Countdown};
use crate::input::intents::Intents;
use crate::systems::resolver::{step_body, Contact, StepParams, Surfaces};

/// What the player is doing beyond plain running and jumping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    Free,
    /// Building dash power while standing still.
    Charging { power: f32 },
    /// Dash in progress; `remaining` seconds left.
    Dashing { remaining: f32 },
}

#[derive(Debug, Clone)]
pub struct Player {
    body: KinematicBody,
    health: Health,
    tuning: PlayerTuning,
    action: PlayerAction,
    invincible: Countdown,
    hit_stun: Countdown,
    knockback: bool,
    attack_cooldown: Countdown,
    charge_cooldown: Countdown,
    jump_buffer: Countdown,
    /// Set on the press frame so the buffer is not ticked until the next one.
    jump_fresh: bool,
    coyote: Countdown,
    dash_damage: i32,
}

impl Player {
    pub fn new(spawn: Vec2, tuning: PlayerTuning) -> Self {
        Self {
            body: KinematicBody::new(spawn, tuning.width, tuning.height),
            health: Health::new(tuning.max_health),
            tuning,
            action: PlayerAction::Free,
            invincible: Countdown::idle(),
            hit_stun: Countdown::idle(),
            knockback: false,
            attack_cooldown: Countdown::idle(),
            charge_cooldown: Countdown::idle(),
            jump_buffer: Countdown::idle(),
            jump_fresh: false,
            coyote: Countdown::idle(),
            dash_damage: tuning.dash_damage,
        }
    }

    // -- Accessors --

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.vel
    }

    pub fn facing_right(&self) -> bool {
        self.body.facing_right
    }

    pub fn on_ground(&self) -> bool {
        self.body.on_ground()
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn action(&self) -> PlayerAction {
        self.action
    }

    pub fn is_charging(&self) -> bool {
        matches!(self.action, PlayerAction::Charging { .. })
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.action, PlayerAction::Dashing { .. })
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible.is_running()
    }

    pub fn in_knockback(&self) -> bool {
        self.knockback
    }

    pub fn dash_damage(&self) -> i32 {
        self.dash_damage
    }

    /// Coins make the dash hit harder.
    pub fn add_dash_damage(&mut self, amount: i32) {
        self.dash_damage += amount;
    }

    /// Charge bar fill in `[0, 1]`. Zero when not charging.
    pub fn charge_ratio(&self) -> f32 {
        match self.action {
            PlayerAction::Charging { power } => progress(power, self.tuning.max_charge_power),
            _ => 0.0,
        }
    }

    // -- Control --

    /// Apply this frame's intents. Returns a vine if an attack started.
    pub fn control(
        &mut self,
        intents: &Intents,
        vine: &VineTuning,
        events: &mut Vec<SimEvent>,
    ) -> Option<Vine> {
        if intents.jump_pressed {
            self.jump_buffer.start(self.tuning.jump_buffer_time);
            self.jump_fresh = true;
        }

        let mut spawned = None;
        if intents.attack_pressed
            && !self.is_charging()
            && !self.attack_cooldown.is_running()
            && (self.body.on_ground() || self.coyote.is_running())
        {
            spawned = Some(Vine::spawn(self.body.rect(), self.body.facing_right, *vine));
            self.attack_cooldown.start(self.tuning.attack_cooldown);
            events.push(SimEvent::AttackSpawned {
                by: Actor::Player,
                kind: AttackKind::Vine,
            });
        }

        if !self.is_dashing() && !self.knockback {
            if self.is_charging() {
                self.body.vel.x = 0.0;
            } else {
                let dir = intents.direction();
                self.body.vel.x = dir * self.tuning.move_speed;
                if dir > 0.0 {
                    self.body.facing_right = true;
                } else if dir < 0.0 {
                    self.body.facing_right = false;
                }
            }
        }

        if intents.charge_held {
            self.start_charging(events);
        } else if let PlayerAction::Charging { power } = self.action {
            self.start_dash(power, events);
        }

        spawned
    }

    fn start_charging(&mut self, events: &mut Vec<SimEvent>) {
        if self.action != PlayerAction::Free
            || !self.body.on_ground()
            || self.charge_cooldown.is_running()
        {
            return;
        }
        self.action = PlayerAction::Charging { power: 0.0 };
        self.body.vel.x = 0.0;
        events.push(SimEvent::ChargeStarted);
    }

    fn start_dash(&mut self, power: f32, events: &mut Vec<SimEvent>) {
        let t = &self.tuning;
        self.charge_cooldown.start(t.charge_cooldown);
        self.action = PlayerAction::Dashing {
            remaining: t.dash_duration,
        };
        self.invincible.extend_to(t.dash_duration);

        let dir = if self.body.facing_right { 1.0 } else { -1.0 };
        let multiplier = 1.0 + progress(power, t.max_charge_power) * t.dash_speed_multiplier;
        self.body.vel = Vec2::new(dir * t.dash_base_speed * multiplier, t.dash_hop_velocity);
        debug!("dash at {:.0} px/s", self.body.vel.x);
        events.push(SimEvent::AttackSpawned {
            by: Actor::Player,
            kind: AttackKind::Dash,
        });
    }

    // -- Simulation --

    /// Advance timers, integrate, and resolve collisions. A dash breaks
    /// through breakable tiles it destroys.
    pub fn update(
        &mut self,
        world: &mut TileWorld,
        physics: &PhysicsTuning,
        dt: f32,
        events: &mut Vec<SimEvent>,
    ) {
        let dt = clamp_dt(dt, physics.max_dt);

        if !std::mem::take(&mut self.jump_fresh) {
            self.jump_buffer.tick(dt);
        }
        if self.body.on_ground() {
            self.coyote.start(self.tuning.coyote_time);
        } else {
            self.coyote.tick(dt);
        }
        self.invincible.tick(dt);
        if self.hit_stun.tick(dt) {
            self.knockback = false;
        }
        self.attack_cooldown.tick(dt);
        self.charge_cooldown.tick(dt);

        match self.action {
            PlayerAction::Dashing { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.action = PlayerAction::Free;
                    self.body.vel.x *= self.tuning.dash_end_damping;
                } else {
                    self.action = PlayerAction::Dashing { remaining };
                }
            }
            PlayerAction::Charging { power } => {
                let power = (power + self.tuning.charge_rate * dt).min(self.tuning.max_charge_power);
                self.action = PlayerAction::Charging { power };
            }
            PlayerAction::Free => {}
        }

        let params = StepParams {
            gravity: if self.knockback {
                self.tuning.knockback_gravity
            } else {
                physics.gravity
            },
            max_fall: physics.max_fall_speed,
            platform_tolerance: physics.platform_tolerance,
            surfaces: Surfaces::ALL,
        };
        let dashing = self.is_dashing();
        let dash_damage = self.dash_damage;
        let contacts = step_body(&mut self.body, world, &params, dt, |world, hit| {
            if let (true, SolidSource::Breakable(id)) = (dashing, hit.source) {
                if world.damage_breakable(id, dash_damage, events) == TileDamage::Broken {
                    return Contact::Pass;
                }
            }
            Contact::Block
        });

        if contacts.hit_wall && self.is_dashing() {
            self.action = PlayerAction::Free;
        }
        for hazard in &contacts.hazards {
            self.take_damage(hazard.damage, hazard.direction, None, events);
        }
        for id in contacts.triggered {
            events.push(SimEvent::TileShaking { id });
        }

        if self.jump_buffer.is_running() && (self.body.on_ground() || self.coyote.is_running()) {
            self.body.vel.y = self.tuning.jump_velocity;
            self.jump_buffer.clear();
            self.coyote.clear();
            self.body.lift_off();
            events.push(SimEvent::Jumped);
        }
    }

    /// Take a hit from `direction` (+1 pushes right). `knockback` overrides
    /// the horizontal knockback speed. Returns false if the hit was ignored.
    pub fn take_damage(
        &mut self,
        amount: i32,
        direction: f32,
        knockback: Option<f32>,
        events: &mut Vec<SimEvent>,
    ) -> bool {
        if self.invincible.is_running() || self.health.is_dead() {
            return false;
        }
        self.health.damage(amount);
        let speed_x = knockback.unwrap_or(self.tuning.knockback_speed_x);
        self.body.vel = Vec2::new(direction * speed_x, self.tuning.knockback_speed_y);
        self.knockback = true;
        self.invincible.start(self.tuning.invincible_duration);
        self.hit_stun.start(self.tuning.hit_stun_duration);
        events.push(SimEvent::DamageTaken {
            target: Actor::Player,
            amount,
            direction,
        });
        true
    }

    /// Restore health. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.health.heal(amount)
    }

    pub fn heal_full(&mut self) -> i32 {
        self.health.heal_full()
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }
}
