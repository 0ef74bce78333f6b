//! The tile world: static collision sets plus tile entities with their own
//! lifecycles.
//!
//! Static obstacles and platforms live in plain vectors and never change
//! after construction. Tiles that change state (falling, breakable,
//! healing, pickups) live in arenas so removal is a retire mark, compacted
//! at the end of the frame. Overlap queries return owned hit lists, so
//! callers can mutate the world while acting on them.

use log::debug;

use crate::api::config::{SimConfig, TileTuning};
use crate::api::types::{EntityId, SimEvent};
use crate::assets::world::WorldDesc;
use crate::components::breakable::{BreakableTile, TileDamage};
use crate::components::falling::FallingTile;
use crate::core::arena::Arena;
use crate::core::rect::Rect;
use crate::core::rng::Rng;
use crate::core::time::Countdown;

/// Static obstacle. `damage > 0` marks a hazard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solid {
    pub rect: Rect,
    pub damage: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidSource {
    Static(usize),
    Breakable(EntityId),
}

/// A blocking box found by an overlap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidHit {
    pub source: SolidSource,
    pub rect: Rect,
    pub damage: i32,
}

/// Restores the player to full health, then sits out `respawn_time`.
#[derive(Debug, Clone)]
pub struct HealingTile {
    pub rect: Rect,
    pub respawn_time: f32,
    cooldown: Countdown,
}

impl HealingTile {
    pub fn new(rect: Rect, respawn_time: f32) -> Self {
        Self {
            rect,
            respawn_time,
            cooldown: Countdown::idle(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.cooldown.is_running()
    }
}

/// Collectable coin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct TileWorld {
    width: i32,
    height: i32,
    solids: Vec<Solid>,
    platforms: Vec<Rect>,
    falling: Arena<FallingTile>,
    breakables: Arena<BreakableTile>,
    healing: Arena<HealingTile>,
    pickups: Arena<Pickup>,
    tuning: TileTuning,
    rng: Rng,
    particles_enabled: bool,
}

impl TileWorld {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            solids: Vec::new(),
            platforms: Vec::new(),
            falling: Arena::new(),
            breakables: Arena::new(),
            healing: Arena::new(),
            pickups: Arena::new(),
            tuning: TileTuning::default(),
            rng: Rng::new(1),
            particles_enabled: true,
        }
    }

    /// Build the world from loader records, applying tile properties.
    pub fn from_desc(desc: &WorldDesc, config: &SimConfig) -> Self {
        let mut world = Self::new(desc.width, desc.height);
        world.tuning = config.tiles;
        world.rng = Rng::new(config.seed);
        world.particles_enabled = config.particles_enabled;

        for tile in &desc.solids {
            world.add_solid(tile.rect(), tile.properties.int_or("damage", 0));
        }
        for tile in &desc.platforms {
            world.add_platform(tile.rect());
        }
        for tile in &desc.falling {
            let p = &tile.properties;
            world.add_falling(FallingTile::new(
                tile.rect(),
                p.bool_or("fall_on_stand", true),
                p.float_or("respawn_time", config.tiles.falling_respawn_time),
            ));
        }
        for tile in &desc.breakables {
            let p = &tile.properties;
            world.add_breakable(BreakableTile::new(
                tile.rect(),
                p.int_or("health", 1),
                p.bool_or("collidable", true),
                p.bool_or("boss_dependent", false),
            ));
        }
        for tile in &desc.healing {
            let respawn = tile
                .properties
                .float_or("respawn_time", config.tiles.healing_respawn_time);
            world.add_healing(HealingTile::new(tile.rect(), respawn));
        }
        for tile in &desc.pickups {
            world.add_pickup(tile.rect());
        }
        world
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn set_particles_enabled(&mut self, enabled: bool) {
        self.particles_enabled = enabled;
    }

    // -- Construction --

    pub fn add_solid(&mut self, rect: Rect, damage: i32) {
        self.solids.push(Solid { rect, damage });
    }

    pub fn add_platform(&mut self, rect: Rect) {
        self.platforms.push(rect);
    }

    pub fn add_falling(&mut self, tile: FallingTile) -> EntityId {
        self.falling.insert(tile)
    }

    pub fn add_breakable(&mut self, tile: BreakableTile) -> EntityId {
        self.breakables.insert(tile)
    }

    pub fn add_healing(&mut self, tile: HealingTile) -> EntityId {
        self.healing.insert(tile)
    }

    pub fn add_pickup(&mut self, rect: Rect) -> EntityId {
        self.pickups.insert(Pickup { rect })
    }

    // -- Read access --

    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    pub fn falling(&self) -> &Arena<FallingTile> {
        &self.falling
    }

    pub fn breakables(&self) -> &Arena<BreakableTile> {
        &self.breakables
    }

    pub fn healing(&self) -> &Arena<HealingTile> {
        &self.healing
    }

    pub fn pickups(&self) -> &Arena<Pickup> {
        &self.pickups
    }

    // -- Overlap queries --

    /// Static obstacles and collidable breakables overlapping `rect`.
    pub fn solids_overlapping(&self, rect: &Rect) -> Vec<SolidHit> {
        let statics = self
            .solids
            .iter()
            .enumerate()
            .filter(|(_, s)| s.rect.intersects(rect))
            .map(|(i, s)| SolidHit {
                source: SolidSource::Static(i),
                rect: s.rect,
                damage: s.damage,
            });
        let breakables = self
            .breakables
            .iter()
            .filter(|(_, t)| t.is_collidable() && t.rect().intersects(rect))
            .map(|(id, t)| SolidHit {
                source: SolidSource::Breakable(id),
                rect: t.rect(),
                damage: 0,
            });
        statics.chain(breakables).collect()
    }

    /// Whether anything solid overlaps `rect`.
    pub fn is_blocked(&self, rect: &Rect) -> bool {
        self.solids.iter().any(|s| s.rect.intersects(rect))
            || self
                .breakables
                .iter()
                .any(|(_, t)| t.is_collidable() && t.rect().intersects(rect))
    }

    pub fn platforms_overlapping(&self, rect: &Rect) -> Vec<Rect> {
        self.platforms
            .iter()
            .filter(|p| p.intersects(rect))
            .copied()
            .collect()
    }

    /// Collidable falling tiles overlapping `rect`.
    pub fn falling_overlapping(&self, rect: &Rect) -> Vec<(EntityId, Rect)> {
        self.falling
            .iter()
            .filter(|(_, t)| t.is_collidable() && t.rect().intersects(rect))
            .map(|(id, t)| (id, t.rect()))
            .collect()
    }

    pub fn healing_overlapping(&self, rect: &Rect) -> Vec<EntityId> {
        self.healing
            .iter()
            .filter(|(_, t)| t.is_active() && t.rect.intersects(rect))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn pickups_overlapping(&self, rect: &Rect) -> Vec<EntityId> {
        self.pickups
            .iter()
            .filter(|(_, p)| p.rect.intersects(rect))
            .map(|(id, _)| id)
            .collect()
    }

    // -- Mutation --

    /// Start a falling tile's shake. Returns true if it was resting.
    pub fn trigger_falling(&mut self, id: EntityId) -> bool {
        let triggered = self.falling.get_mut(id).is_some_and(|t| t.trigger());
        if triggered {
            debug!("falling tile {:?} shaking", id);
        }
        triggered
    }

    /// Boss-dependent tiles are collidable exactly while a non-boss enemy
    /// is alive. Broken tiles are left alone.
    pub fn set_boss_gates(&mut self, non_boss_alive: bool) {
        for (id, tile) in self.breakables.iter_mut() {
            if tile.boss_dependent && tile.set_collidable(non_boss_alive) {
                debug!("boss gate {:?} collidable={}", id, non_boss_alive);
            }
        }
    }

    /// Damage a breakable tile. Breaking it emits `TileBroken` and, with
    /// particles enabled, scatters debris.
    pub fn damage_breakable(
        &mut self,
        id: EntityId,
        amount: i32,
        events: &mut Vec<SimEvent>,
    ) -> TileDamage {
        let Some(tile) = self.breakables.get_mut(id) else {
            return TileDamage::Ignored;
        };
        let outcome = tile.take_damage(amount);
        if outcome == TileDamage::Broken {
            debug!("breakable tile {:?} broken", id);
            if self.particles_enabled {
                tile.shatter(&mut self.rng, &self.tuning);
            }
            events.push(SimEvent::TileBroken { id });
        }
        outcome
    }

    /// Consume a healing tile. Returns false if it was not active.
    pub fn use_healing(&mut self, id: EntityId) -> bool {
        match self.healing.get_mut(id) {
            Some(tile) if tile.is_active() => {
                tile.cooldown.start(tile.respawn_time);
                true
            }
            _ => false,
        }
    }

    /// Remove a pickup permanently. Returns false if already collected.
    pub fn collect_pickup(&mut self, id: EntityId) -> bool {
        self.pickups.retire(id)
    }

    pub fn tuning(&self) -> &TileTuning {
        &self.tuning
    }

    /// Advance every tile lifecycle. Spent breakables are retired.
    pub fn update(&mut self, dt: f32) {
        let tuning = self.tuning;
        for (id, tile) in self.falling.iter_mut() {
            if tile.update(dt, &tuning) {
                debug!("falling tile {:?} respawned", id);
            }
        }

        let mut spent = Vec::new();
        for (id, tile) in self.breakables.iter_mut() {
            if tile.update(dt, &tuning) {
                spent.push(id);
            }
        }
        for id in spent {
            self.breakables.retire(id);
        }

        for (_, tile) in self.healing.iter_mut() {
            tile.cooldown.tick(dt);
        }
    }

    /// Drop retired entries. Call at the frame boundary.
    pub fn compact(&mut self) {
        self.breakables.compact();
        self.pickups.compact();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gated_world() -> (TileWorld, EntityId) {
        let mut world = TileWorld::new(640, 480);
        let gate = world.add_breakable(BreakableTile::new(Rect::new(300, 400, 32, 32), 1, true, true));
        (world, gate)
    }

    #[test]
    fn boss_gate_follows_non_boss_enemies() {
        let (mut world, gate) = gated_world();
        world.set_boss_gates(false);
        assert!(!world.breakables().get(gate).unwrap().is_collidable());
        world.set_boss_gates(true);
        assert!(world.breakables().get(gate).unwrap().is_collidable());
    }

    #[test]
    fn boss_gate_never_restores_a_broken_tile() {
        let (mut world, gate) = gated_world();
        let mut events = Vec::new();
        assert_eq!(world.damage_breakable(gate, 1, &mut events), TileDamage::Broken);
        assert_eq!(events, vec![SimEvent::TileBroken { id: gate }]);
        world.set_boss_gates(true);
        assert!(world.solids_overlapping(&Rect::new(300, 400, 32, 32)).is_empty());
    }

    #[test]
    fn solids_query_includes_collidable_breakables() {
        let (mut world, gate) = gated_world();
        world.add_solid(Rect::new(0, 400, 320, 32), 0);
        let hits = world.solids_overlapping(&Rect::new(290, 390, 20, 20));
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().any(|h| h.source == SolidSource::Breakable(gate)));
        assert!(world.is_blocked(&Rect::new(310, 410, 4, 4)));
    }

    #[test]
    fn shattered_tile_is_retired_after_debris_fades() {
        let (mut world, gate) = gated_world();
        let mut events = Vec::new();
        world.damage_breakable(gate, 5, &mut events);
        assert!(!world.breakables().get(gate).unwrap().debris().is_empty());
        world.update(2.0);
        world.compact();
        assert!(world.breakables().get(gate).is_none());
    }

    #[test]
    fn healing_tile_sits_out_its_respawn_time() {
        let mut world = TileWorld::new(640, 480);
        let id = world.add_healing(HealingTile::new(Rect::new(0, 0, 32, 32), 30.0));
        let body = Rect::new(8, 8, 16, 16);
        assert_eq!(world.healing_overlapping(&body), vec![id]);
        assert!(world.use_healing(id));
        assert!(world.healing_overlapping(&body).is_empty());
        assert!(!world.use_healing(id));
        world.update(29.0);
        assert!(world.healing_overlapping(&body).is_empty());
        world.update(1.0);
        assert_eq!(world.healing_overlapping(&body), vec![id]);
    }

    #[test]
    fn pickups_are_collected_once() {
        let mut world = TileWorld::new(640, 480);
        let coin = world.add_pickup(Rect::new(100, 100, 16, 16));
        assert!(world.collect_pickup(coin));
        assert!(!world.collect_pickup(coin));
        world.compact();
        assert!(world.pickups().is_empty());
    }

    #[test]
    fn desc_properties_are_applied() {
        use crate::assets::world::TileDesc;
        use crate::components::properties::{Properties, PropValue};

        let mut desc = WorldDesc::default();
        desc.solids.push(
            TileDesc::new(Rect::new(0, 448, 64, 32))
                .with_properties(Properties::new().with("damage", PropValue::Int(2))),
        );
        desc.falling.push(TileDesc::new(Rect::new(64, 300, 32, 32)));
        desc.breakables.push(
            TileDesc::new(Rect::new(128, 300, 32, 32))
                .with_properties(Properties::new().with("health", PropValue::Int(4))),
        );
        let world = TileWorld::from_desc(&desc, &SimConfig::default());
        assert_eq!(world.solids()[0].damage, 2);
        let (_, falling) = world.falling().iter().next().unwrap();
        assert!(falling.is_collidable());
        assert!((falling.respawn_time - 5.0).abs() < 1e-6);
        let (_, breakable) = world.breakables().iter().next().unwrap();
        assert_eq!(breakable.health(), 4);
        assert!(!breakable.boss_dependent);
    }
}
