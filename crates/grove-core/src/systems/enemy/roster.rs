use log::{debug, warn};

use super::{AiAction, Enemy, Strike};
use crate::api::config::SimConfig;
use crate::api::types::{Actor, AttackKind, EntityId, SimEvent};
use crate::assets::world::{EnemyKind, EnemySpawn};
use crate::components::projectile::{Projectile, ProjectileOutcome};
use crate::components::world::TileWorld;
use crate::core::arena::Arena;
use crate::core::time::clamp_dt;
use crate::systems::player::Player;

/// All live enemies plus the projectiles they have fired.
#[derive(Debug, Clone)]
pub struct EnemyRoster {
    enemies: Arena<Enemy>,
    projectiles: Vec<Projectile>,
    boss: Option<EntityId>,
}

impl EnemyRoster {
    pub fn new() -> Self {
        Self {
            enemies: Arena::new(),
            projectiles: Vec::new(),
            boss: None,
        }
    }

    /// Add an enemy from a spawn record. A map holds at most one boss;
    /// extra boss records are skipped.
    pub fn spawn(&mut self, spawn: &EnemySpawn, config: &SimConfig) -> Option<EntityId> {
        if spawn.kind == EnemyKind::Boss && self.boss.is_some() {
            warn!("ignoring second boss spawn at {:?}", spawn.pos);
            return None;
        }
        let id = self
            .enemies
            .insert_with(|id| Enemy::new(id, spawn.kind, spawn.pos, &spawn.properties, config));
        if spawn.kind == EnemyKind::Boss {
            self.boss = Some(id);
        }
        debug!("spawned {:?} enemy {:?}", spawn.kind, id);
        Some(id)
    }

    /// Update every enemy, carry out the attacks they choose, then move the
    /// projectiles.
    pub fn update(
        &mut self,
        world: &mut TileWorld,
        player: &mut Player,
        config: &SimConfig,
        dt: f32,
        events: &mut Vec<SimEvent>,
    ) {
        for (id, enemy) in self.enemies.iter_mut() {
            let target = player.rect();
            let Some(action) = enemy.update(world, &target, &config.physics, dt, events) else {
                continue;
            };
            match action {
                AiAction::Swing(strike) => {
                    events.push(SimEvent::AttackSpawned {
                        by: Actor::Enemy(id),
                        kind: AttackKind::Strike,
                    });
                    if let Some(strike) = strike {
                        hit(player, &strike, events);
                    }
                }
                AiAction::Shoot { target } => {
                    self.projectiles.push(Projectile::aimed(
                        id,
                        enemy.rect(),
                        target,
                        config.ranged.projectile_speed,
                        config.ranged.projectile_size,
                        enemy.stats().damage,
                        config.ranged.projectile_lifetime,
                    ));
                    events.push(SimEvent::AttackSpawned {
                        by: Actor::Enemy(id),
                        kind: AttackKind::Projectile,
                    });
                }
                AiAction::Leap => events.push(SimEvent::AttackSpawned {
                    by: Actor::Enemy(id),
                    kind: AttackKind::Leap,
                }),
                AiAction::GroundShock(strike) => {
                    if let Some(strike) = strike {
                        hit(player, &strike, events);
                    }
                }
            }
        }

        let dt = clamp_dt(dt, config.physics.max_dt);
        let target = player.rect();
        let mut hits = Vec::new();
        self.projectiles.retain_mut(|shot| match shot.update(dt, world, &target) {
            ProjectileOutcome::Flying => true,
            ProjectileOutcome::HitPlayer { damage, direction } => {
                hits.push((damage, direction));
                false
            }
            ProjectileOutcome::Expired | ProjectileOutcome::Blocked => false,
        });
        for (damage, direction) in hits {
            player.take_damage(damage, direction, None, events);
        }
    }

    /// Drop enemies whose death animation has finished.
    /// Returns `(id, was_boss)` for each one removed.
    pub fn remove_finished(&mut self) -> Vec<(EntityId, bool)> {
        let done: Vec<(EntityId, bool)> = self
            .enemies
            .iter()
            .filter(|(_, e)| e.is_finished())
            .map(|(id, e)| (id, e.is_boss()))
            .collect();
        for (id, _) in &done {
            self.enemies.retire(*id);
        }
        self.enemies.compact();
        done
    }

    /// Whether any regular enemy remains. Dying enemies still count until
    /// they are removed.
    pub fn non_boss_alive(&self) -> bool {
        self.enemies.iter().any(|(_, e)| !e.is_boss())
    }

    pub fn boss(&self) -> Option<&Enemy> {
        self.boss.and_then(|id| self.enemies.get(id))
    }

    pub fn get(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Enemy)> {
        self.enemies.iter()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.enemies.ids()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
        self.boss = None;
    }
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self::new()
    }
}

fn hit(player: &mut Player, strike: &Strike, events: &mut Vec<SimEvent>) {
    player.take_damage(strike.damage, strike.direction, strike.knockback, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rect::Rect;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn floor() -> TileWorld {
        let mut world = TileWorld::new(2000, 600);
        world.add_solid(Rect::new(0, 500, 2000, 100), 0);
        world
    }

    #[test]
    fn only_one_boss() {
        let config = SimConfig::default();
        let mut roster = EnemyRoster::new();
        let spawn = EnemySpawn::new(EnemyKind::Boss, Vec2::new(100.0, 100.0));
        assert!(roster.spawn(&spawn, &config).is_some());
        assert!(roster.spawn(&spawn, &config).is_none());
        assert_eq!(roster.len(), 1);
        assert!(roster.boss().is_some());
        assert!(!roster.non_boss_alive());
    }

    #[test]
    fn ranged_shot_hits_player() {
        let config = SimConfig::default();
        let mut world = floor();
        let mut roster = EnemyRoster::new();
        let shooter = roster
            .spawn(&EnemySpawn::new(EnemyKind::Ranged, Vec2::new(600.0, 436.0)), &config)
            .unwrap();
        let mut player = Player::new(Vec2::new(500.0, 436.0), config.player);
        let mut events = Vec::new();

        for _ in 0..60 {
            roster.update(&mut world, &mut player, &config, DT, &mut events);
        }
        assert!(events.contains(&SimEvent::AttackSpawned {
            by: Actor::Enemy(shooter),
            kind: AttackKind::Projectile
        }));
        assert!(player.health().current() < config.player.max_health);
        assert!(roster.projectiles().is_empty());
    }

    #[test]
    fn finished_enemies_are_removed() {
        let config = SimConfig::default();
        let mut world = floor();
        let mut roster = EnemyRoster::new();
        let id = roster
            .spawn(&EnemySpawn::new(EnemyKind::Melee, Vec2::new(1200.0, 436.0)), &config)
            .unwrap();
        let mut player = Player::new(Vec2::new(100.0, 436.0), config.player);
        let mut events = Vec::new();
        roster.get_mut(id).unwrap().take_damage(99, 1.0, &mut events);
        assert!(roster.non_boss_alive(), "dying enemies still gate");

        for _ in 0..40 {
            roster.update(&mut world, &mut player, &config, DT, &mut events);
        }
        assert_eq!(roster.remove_finished(), vec![(id, false)]);
        assert!(roster.is_empty());
        assert!(!roster.non_boss_alive());
    }
}
