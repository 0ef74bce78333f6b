use serde::{Deserialize, Serialize};

use crate::components::properties::Properties;
use crate::core::time::MAX_DT;

/// Top-level tuning for a simulation session.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub physics: PhysicsTuning,
    pub player: PlayerTuning,
    pub vine: VineTuning,
    pub enemy: EnemyCommon,
    pub melee: MeleeTuning,
    pub ranged: RangedTuning,
    pub boss: BossTuning,
    pub camera: CameraTuning,
    pub tiles: TileTuning,
    /// Spawn debris fragments when breakable tiles shatter.
    pub particles_enabled: bool,
    /// Seed for the presentation-only debris RNG.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsTuning::default(),
            player: PlayerTuning::default(),
            vine: VineTuning::default(),
            enemy: EnemyCommon::default(),
            melee: MeleeTuning::default(),
            ranged: RangedTuning::default(),
            boss: BossTuning::default(),
            camera: CameraTuning::default(),
            tiles: TileTuning::default(),
            particles_enabled: true,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Parse a configuration from a JSON string. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Shared integration constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Downward acceleration in px/s².
    pub gravity: f32,
    /// Terminal downward speed in px/s.
    pub max_fall_speed: f32,
    /// Largest dt a single step integrates.
    pub max_dt: f32,
    /// How far (px) below a one-way platform's top the previous bottom
    /// edge may be and still land on it.
    pub platform_tolerance: i32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: 1800.0,
            max_fall_speed: 600.0,
            max_dt: MAX_DT,
            platform_tolerance: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: i32,
    pub height: i32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub knockback_speed_x: f32,
    pub knockback_speed_y: f32,
    /// Gravity used while in hit-stun knockback.
    pub knockback_gravity: f32,
    pub max_health: i32,
    pub invincible_duration: f32,
    pub hit_stun_duration: f32,
    pub attack_cooldown: f32,
    pub max_charge_power: f32,
    pub charge_rate: f32,
    pub charge_cooldown: f32,
    pub dash_duration: f32,
    pub dash_base_speed: f32,
    /// Extra dash speed at full charge, as a multiple of the base speed.
    pub dash_speed_multiplier: f32,
    /// Vertical hop applied when a dash starts.
    pub dash_hop_velocity: f32,
    /// Horizontal velocity factor applied when a dash runs out.
    pub dash_end_damping: f32,
    pub dash_damage: i32,
    pub jump_buffer_time: f32,
    pub coyote_time: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 32,
            height: 64,
            move_speed: 250.0,
            jump_velocity: -720.0,
            knockback_speed_x: 240.0,
            knockback_speed_y: -360.0,
            knockback_gravity: 2160.0,
            max_health: 5,
            invincible_duration: 1.0,
            hit_stun_duration: 0.5,
            attack_cooldown: 0.5,
            max_charge_power: 100.0,
            charge_rate: 80.0,
            charge_cooldown: 1.5,
            dash_duration: 0.4,
            dash_base_speed: 480.0,
            dash_speed_multiplier: 2.5,
            dash_hop_velocity: -180.0,
            dash_end_damping: 0.7,
            dash_damage: 2,
            jump_buffer_time: 0.15,
            coyote_time: 0.1,
        }
    }
}

/// Player melee hitbox.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct VineTuning {
    pub width: i32,
    pub height: i32,
    /// Horizontal offset from the player's center in the facing direction.
    pub reach: i32,
    pub grow_time: f32,
    pub hold_time: f32,
    pub damage: i32,
}

impl Default for VineTuning {
    fn default() -> Self {
        Self {
            width: 32,
            height: 64,
            reach: 48,
            grow_time: 0.2,
            hold_time: 1.0,
            damage: 1,
        }
    }
}

/// Behavior shared by every enemy variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyCommon {
    pub invincible_time: f32,
    pub death_duration: f32,
    /// Per-frame factor applied to horizontal knockback while hurt.
    pub hurt_decay: f32,
    /// Below this horizontal speed a hurt enemy recovers.
    pub hurt_recover_speed: f32,
    /// How long the "attacking" pose is held after a strike.
    pub strike_pose_time: f32,
    /// Scale reached at the end of the death animation.
    pub death_scale: f32,
}

impl Default for EnemyCommon {
    fn default() -> Self {
        Self {
            invincible_time: 0.5,
            death_duration: 0.5,
            hurt_decay: 0.95,
            hurt_recover_speed: 1.0,
            strike_pose_time: 0.4,
            death_scale: 0.5,
        }
    }
}

/// Per-spawn combat numbers. Built from a variant tuning and then
/// overridden by the spawn record's properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub width: i32,
    pub height: i32,
    pub health: i32,
    pub damage: i32,
    pub knockback: f32,
    pub speed: f32,
    pub aggro_radius: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
}

impl EnemyStats {
    pub fn with_properties(mut self, props: &Properties) -> Self {
        self.health = props.int_or("health", self.health);
        self.damage = props.int_or("damage", self.damage);
        self.knockback = props.float_or("knockback", self.knockback);
        self.speed = props.float_or("speed", self.speed);
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeTuning {
    pub width: i32,
    pub height: i32,
    pub health: i32,
    pub damage: i32,
    pub knockback: f32,
    pub speed: f32,
    pub aggro_radius: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
}

impl Default for MeleeTuning {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            health: 3,
            damage: 1,
            knockback: 480.0,
            speed: 120.0,
            aggro_radius: 200.0,
            attack_range: 40.0,
            attack_cooldown: 1.5,
        }
    }
}

impl MeleeTuning {
    pub fn stats(&self) -> EnemyStats {
        EnemyStats {
            width: self.width,
            height: self.height,
            health: self.health,
            damage: self.damage,
            knockback: self.knockback,
            speed: self.speed,
            aggro_radius: self.aggro_radius,
            attack_range: self.attack_range,
            attack_cooldown: self.attack_cooldown,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RangedTuning {
    pub width: i32,
    pub height: i32,
    pub health: i32,
    pub damage: i32,
    pub knockback: f32,
    pub speed: f32,
    pub aggro_radius: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub projectile_size: i32,
    /// How long the shooting pose lasts before returning to idle.
    pub attack_pose_time: f32,
}

impl Default for RangedTuning {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            health: 3,
            damage: 1,
            knockback: 300.0,
            speed: 60.0,
            aggro_radius: 300.0,
            attack_range: 150.0,
            attack_cooldown: 2.0,
            projectile_speed: 300.0,
            projectile_lifetime: 3.0,
            projectile_size: 10,
            attack_pose_time: 0.6,
        }
    }
}

impl RangedTuning {
    pub fn stats(&self) -> EnemyStats {
        EnemyStats {
            width: self.width,
            height: self.height,
            health: self.health,
            damage: self.damage,
            knockback: self.knockback,
            speed: self.speed,
            aggro_radius: self.aggro_radius,
            attack_range: self.attack_range,
            attack_cooldown: self.attack_cooldown,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub width: i32,
    pub height: i32,
    pub health: i32,
    pub damage: i32,
    pub knockback: f32,
    pub speed: f32,
    /// The boss wakes when the player comes this close (or overlaps it).
    pub activation_radius: f32,
    /// Leap attack range.
    pub attack_range: f32,
    /// Leap attack cooldown.
    pub attack_cooldown: f32,
    pub jump_power: f32,
    pub jump_delay: f32,
    /// Time from landing until the next regular jump may start.
    pub jump_cooldown: f32,
    /// Time spent in the landing state before returning to idle.
    pub landing_hold: f32,
    pub shake_radius: f32,
    pub shake_knockback: f32,
    pub shake_damage: i32,
    pub leap_speed_factor: f32,
    pub leap_power_factor: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            width: 140,
            height: 120,
            health: 25,
            damage: 1,
            knockback: 300.0,
            speed: 180.0,
            activation_radius: 400.0,
            attack_range: 200.0,
            attack_cooldown: 2.0,
            jump_power: 900.0,
            jump_delay: 0.5,
            jump_cooldown: 2.0,
            landing_hold: 0.5,
            shake_radius: 150.0,
            shake_knockback: 600.0,
            shake_damage: 1,
            leap_speed_factor: 1.5,
            leap_power_factor: 0.8,
        }
    }
}

impl BossTuning {
    pub fn stats(&self) -> EnemyStats {
        EnemyStats {
            width: self.width,
            height: self.height,
            health: self.health,
            damage: self.damage,
            knockback: self.knockback,
            speed: self.speed,
            aggro_radius: self.activation_radius,
            attack_range: self.attack_range,
            attack_cooldown: self.attack_cooldown,
        }
    }

    /// Apply boss-specific spawn properties.
    pub fn with_properties(mut self, props: &Properties) -> Self {
        self.jump_power = props.float_or("jump_power", self.jump_power);
        self.shake_radius = props.float_or("shake_radius", self.shake_radius);
        self.shake_knockback = props.float_or("shake_knockback", self.shake_knockback);
        self.shake_damage = props.int_or("shake_damage", self.shake_damage);
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Logical viewport size; scrolling snaps to multiples of it.
    pub logical_width: f32,
    pub logical_height: f32,
    /// Distance below the camera top above which the player retargets upward.
    pub deadzone_top: f32,
    /// Duration of a screen transition.
    pub transition_time: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            logical_width: 640.0,
            logical_height: 480.0,
            deadzone_top: 120.0,
            transition_time: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TileTuning {
    pub shake_time: f32,
    pub fall_speed: f32,
    /// A falling tile vanishes once its top is this far below its origin.
    pub drop_distance: i32,
    pub falling_respawn_time: f32,
    pub healing_respawn_time: f32,
    /// Side length of a debris fragment.
    pub debris_cell: i32,
    pub debris_min_life: f32,
    pub debris_max_life: f32,
    pub debris_gravity: f32,
    /// Fragments start with vx in `[-spread_x, spread_x]`.
    pub debris_spread_x: f32,
    /// Fragments start with vy in `[-lift_y, 0]`.
    pub debris_lift_y: f32,
}

impl Default for TileTuning {
    fn default() -> Self {
        Self {
            shake_time: 0.5,
            fall_speed: 300.0,
            drop_distance: 600,
            falling_respawn_time: 5.0,
            healing_respawn_time: 30.0,
            debris_cell: 8,
            debris_min_life: 0.8,
            debris_max_life: 1.5,
            debris_gravity: 720.0,
            debris_spread_x: 120.0,
            debris_lift_y: 240.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        let cfg = SimConfig::from_json("{}").unwrap();
        assert_eq!(cfg.player.max_health, 5);
        assert!((cfg.physics.gravity - 1800.0).abs() < 1e-3);
        assert!(cfg.particles_enabled);
    }

    #[test]
    fn partial_override_keeps_siblings() {
        let json = r#"{
            "player": { "max_health": 8 },
            "ranged": { "projectile_speed": 450.0 },
            "particles_enabled": false
        }"#;
        let cfg = SimConfig::from_json(json).unwrap();
        assert_eq!(cfg.player.max_health, 8);
        assert!((cfg.player.move_speed - 250.0).abs() < 1e-3);
        assert!((cfg.ranged.projectile_speed - 450.0).abs() < 1e-3);
        assert!((cfg.ranged.attack_range - 150.0).abs() < 1e-3);
        assert!(!cfg.particles_enabled);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SimConfig::from_json("{ \"player\": 3 }").is_err());
    }

    #[test]
    fn spawn_properties_override_stats() {
        let props = Properties::from_json(r#"{ "health": 7, "speed": 99.5 }"#).unwrap();
        let stats = MeleeTuning::default().stats().with_properties(&props);
        assert_eq!(stats.health, 7);
        assert!((stats.speed - 99.5).abs() < 1e-3);
        assert_eq!(stats.damage, 1);
    }

    #[test]
    fn boss_properties_override_shock() {
        let props = Properties::from_json(r#"{ "shake_radius": 220, "shake_damage": 2 }"#).unwrap();
        let boss = BossTuning::default().with_properties(&props);
        assert!((boss.shake_radius - 220.0).abs() < 1e-3);
        assert_eq!(boss.shake_damage, 2);
    }
}
