use log::{debug, info, warn};

use crate::api::config::SimConfig;
use crate::api::types::{Actor, EntityId, SimEvent};
use crate::assets::world::WorldDesc;
use crate::components::vine::Vine;
use crate::components::world::TileWorld;
use crate::core::arena::Arena;
use crate::core::time::clamp_dt;
use crate::input::intents::Intents;
use crate::systems::camera::ScreenCamera;
use crate::systems::enemy::EnemyRoster;
use crate::systems::player::Player;

/// One play session over a single world.
///
/// Owns every simulated entity and runs them in a fixed order each step:
/// player, enemies (and their projectiles), cross-entity contacts,
/// tile lifecycles, camera. Events produced during a step stay readable
/// until the next step begins.
pub struct Session {
    config: SimConfig,
    desc: WorldDesc,
    world: TileWorld,
    player: Player,
    enemies: EnemyRoster,
    vines: Arena<Vine>,
    camera: ScreenCamera,
    events: Vec<SimEvent>,
    paused: bool,
    game_over: bool,
    boss_defeated: bool,
    coins: u32,
    physical_width: f32,
}

impl Session {
    pub fn new(config: SimConfig, desc: WorldDesc, physical_width: f32) -> Self {
        let world = TileWorld::from_desc(&desc, &config);
        let player = Player::new(desc.player_spawn, config.player);
        let camera = ScreenCamera::new(
            world.width() as f32,
            world.height() as f32,
            physical_width,
            &config.camera,
        );
        let mut session = Self {
            config,
            desc,
            world,
            player,
            enemies: EnemyRoster::new(),
            vines: Arena::new(),
            camera,
            events: Vec::with_capacity(32),
            paused: false,
            game_over: false,
            boss_defeated: false,
            coins: 0,
            physical_width,
        };
        session.populate();
        session
    }

    /// Rebuild the world from its description and respawn everything.
    pub fn reset(&mut self) {
        self.world = TileWorld::from_desc(&self.desc, &self.config);
        self.player = Player::new(self.desc.player_spawn, self.config.player);
        self.camera = ScreenCamera::new(
            self.world.width() as f32,
            self.world.height() as f32,
            self.physical_width,
            &self.config.camera,
        );
        self.enemies.clear();
        self.vines.clear();
        self.events.clear();
        self.paused = false;
        self.game_over = false;
        self.boss_defeated = false;
        self.coins = 0;
        self.populate();
        info!("session reset");
    }

    fn populate(&mut self) {
        for spawn in &self.desc.enemies {
            self.enemies.spawn(spawn, &self.config);
        }
        self.camera.snap_to(&self.player.rect());
        debug!(
            "session ready: {}x{} world, {} enemies",
            self.world.width(),
            self.world.height(),
            self.enemies.len()
        );
    }

    // -- Frame --

    /// Advance the simulation by `dt` seconds with this frame's intents.
    pub fn step(&mut self, dt: f32, intents: &Intents) {
        self.events.clear();
        if self.paused || self.game_over {
            return;
        }
        let max_dt = self.config.physics.max_dt;
        if dt > max_dt {
            warn!("frame delta {:.3}s clamped to {:.3}s", dt, max_dt);
        }
        let dt = clamp_dt(dt, max_dt);

        if let Some(vine) = self.player.control(intents, &self.config.vine, &mut self.events) {
            self.vines.insert(vine);
        }
        self.player
            .update(&mut self.world, &self.config.physics, dt, &mut self.events);

        self.world.set_boss_gates(self.enemies.non_boss_alive());

        self.enemies.update(
            &mut self.world,
            &mut self.player,
            &self.config,
            dt,
            &mut self.events,
        );
        for (id, boss) in self.enemies.remove_finished() {
            debug!("enemy {:?} removed", id);
            self.events.push(SimEvent::EnemyDefeated { id, boss });
            if boss {
                self.boss_defeated = true;
                info!("boss defeated");
            }
        }

        self.resolve_contacts();
        self.collect_tiles();

        self.world.update(dt);
        let expired: Vec<EntityId> = self
            .vines
            .iter_mut()
            .filter_map(|(id, vine)| (!vine.update(dt)).then_some(id))
            .collect();
        for id in expired {
            self.vines.retire(id);
        }
        self.vines.compact();
        self.world.compact();

        self.camera.update(&self.player.rect(), dt);

        if self.player.is_dead() && !self.game_over {
            self.game_over = true;
            self.events.push(SimEvent::EntityDied {
                target: Actor::Player,
            });
            info!("player died");
        }
    }

    /// Player against enemies, and vines against enemies.
    fn resolve_contacts(&mut self) {
        let player_rect = self.player.rect();
        let dashing = self.player.is_dashing();

        for id in self.enemies.ids() {
            let Some(enemy) = self.enemies.get_mut(id) else {
                continue;
            };
            if !enemy.is_alive() || !enemy.is_active() {
                continue;
            }
            let rect = enemy.rect();

            if rect.intersects(&player_rect) {
                if dashing {
                    let damage = self.player.dash_damage();
                    enemy.take_damage(damage, rect.side_of(&player_rect), &mut self.events);
                } else {
                    let damage = enemy.stats().damage;
                    self.player
                        .take_damage(damage, player_rect.side_of(&rect), None, &mut self.events);
                }
            }

            for (_, vine) in self.vines.iter() {
                let hitbox = vine.hitbox();
                if enemy.is_alive() && hitbox.intersects(&rect) {
                    enemy.take_damage(vine.damage(), rect.side_of(&hitbox), &mut self.events);
                }
            }
        }
    }

    /// Pickups and healing tiles under the player.
    fn collect_tiles(&mut self) {
        let player_rect = self.player.rect();

        for id in self.world.pickups_overlapping(&player_rect) {
            if self.world.collect_pickup(id) {
                self.coins += 1;
                self.player.add_dash_damage(1);
                debug!("pickup {:?} collected, dash damage {}", id, self.player.dash_damage());
                self.events.push(SimEvent::PickupCollected {
                    id,
                    total: self.coins,
                });
            }
        }

        for id in self.world.healing_overlapping(&player_rect) {
            if self.world.use_healing(id) {
                let amount = self.player.heal_full();
                debug!("healing tile {:?} restored {}", id, amount);
                self.events.push(SimEvent::HealTriggered { amount });
            }
        }
    }

    // -- Events --

    /// Events produced by the most recent step.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Take the most recent step's events.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Control --

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Update the physical screen width used for letterboxing and culling.
    pub fn resize(&mut self, physical_width: f32) {
        self.physical_width = physical_width;
        self.camera.resize(physical_width);
    }

    // -- Accessors --

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &TileWorld {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &EnemyRoster {
        &self.enemies
    }

    pub fn vines(&self) -> &Arena<Vine> {
        &self.vines
    }

    pub fn camera(&self) -> &ScreenCamera {
        &self.camera
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn boss_defeated(&self) -> bool {
        self.boss_defeated
    }

    /// Whether the boss is inside the physical view (for its health bar).
    pub fn boss_in_view(&self) -> bool {
        self.enemies
            .boss()
            .map(|boss| self.camera.is_in_view(&boss.rect()))
            .unwrap_or(false)
    }
}
