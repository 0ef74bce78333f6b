//! Flat event records for a shared-buffer host.
//!
//! Each [`SimEvent`] becomes one 4-float record:
//! ```text
//! [kind, a, b, c]
//! ```
//! Actors are encoded as `0` for the player and the entity id otherwise
//! (ids start at 1). Unused payload slots are zero.

use bytemuck::{Pod, Zeroable};

use crate::api::types::{Actor, AttackKind, EntityId, SimEvent};

/// Floats per event record: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = 4;

pub const KIND_DAMAGE_TAKEN: f32 = 1.0;
pub const KIND_ENTITY_DIED: f32 = 2.0;
pub const KIND_ENEMY_DEFEATED: f32 = 3.0;
pub const KIND_PICKUP_COLLECTED: f32 = 4.0;
pub const KIND_HEAL_TRIGGERED: f32 = 5.0;
pub const KIND_ATTACK_SPAWNED: f32 = 6.0;
pub const KIND_JUMPED: f32 = 7.0;
pub const KIND_CHARGE_STARTED: f32 = 8.0;
pub const KIND_TILE_SHAKING: f32 = 9.0;
pub const KIND_TILE_BROKEN: f32 = 10.0;
pub const KIND_BOSS_ACTIVATED: f32 = 11.0;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EventRecord {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl EventRecord {
    pub const FLOATS: usize = EVENT_FLOATS;

    fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

fn actor_code(actor: Actor) -> f32 {
    match actor {
        Actor::Player => 0.0,
        Actor::Enemy(id) => id_code(id),
    }
}

fn id_code(id: EntityId) -> f32 {
    id.0 as f32
}

fn attack_code(kind: AttackKind) -> f32 {
    match kind {
        AttackKind::Vine => 0.0,
        AttackKind::Dash => 1.0,
        AttackKind::Strike => 2.0,
        AttackKind::Projectile => 3.0,
        AttackKind::Leap => 4.0,
    }
}

impl From<&SimEvent> for EventRecord {
    fn from(event: &SimEvent) -> Self {
        match *event {
            SimEvent::DamageTaken { target, amount, direction } => Self::new(
                KIND_DAMAGE_TAKEN,
                actor_code(target),
                amount as f32,
                direction,
            ),
            SimEvent::EntityDied { target } => {
                Self::new(KIND_ENTITY_DIED, actor_code(target), 0.0, 0.0)
            }
            SimEvent::EnemyDefeated { id, boss } => Self::new(
                KIND_ENEMY_DEFEATED,
                id_code(id),
                if boss { 1.0 } else { 0.0 },
                0.0,
            ),
            SimEvent::PickupCollected { id, total } => {
                Self::new(KIND_PICKUP_COLLECTED, id_code(id), total as f32, 0.0)
            }
            SimEvent::HealTriggered { amount } => {
                Self::new(KIND_HEAL_TRIGGERED, amount as f32, 0.0, 0.0)
            }
            SimEvent::AttackSpawned { by, kind } => {
                Self::new(KIND_ATTACK_SPAWNED, actor_code(by), attack_code(kind), 0.0)
            }
            SimEvent::Jumped => Self::new(KIND_JUMPED, 0.0, 0.0, 0.0),
            SimEvent::ChargeStarted => Self::new(KIND_CHARGE_STARTED, 0.0, 0.0, 0.0),
            SimEvent::TileShaking { id } => Self::new(KIND_TILE_SHAKING, id_code(id), 0.0, 0.0),
            SimEvent::TileBroken { id } => Self::new(KIND_TILE_BROKEN, id_code(id), 0.0, 0.0),
            SimEvent::BossActivated { id } => {
                Self::new(KIND_BOSS_ACTIVATED, id_code(id), 0.0, 0.0)
            }
        }
    }
}

/// Encode a frame's events in order.
pub fn encode_events(events: &[SimEvent]) -> Vec<EventRecord> {
    events.iter().map(EventRecord::from).collect()
}

/// View records as a flat float slice.
pub fn as_floats(records: &[EventRecord]) -> &[f32] {
    bytemuck::cast_slice(records)
}
