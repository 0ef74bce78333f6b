use serde::Serialize;

/// Unique identifier for an entity or tile within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub u32);

/// Who an event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Actor {
    Player,
    Enemy(EntityId),
}

/// What kind of attack was spawned, for sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttackKind {
    /// Player melee hitbox.
    Vine,
    /// Player charged dash.
    Dash,
    /// Melee enemy strike.
    Strike,
    /// Ranged enemy shot.
    Projectile,
    /// Boss leap toward the player.
    Leap,
}

/// Discrete gameplay event produced during a simulation step.
/// Rendering, audio and UI collaborators drain these once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SimEvent {
    /// `direction` is the sign of the knockback applied (+1 pushes right).
    DamageTaken { target: Actor, amount: i32, direction: f32 },
    EntityDied { target: Actor },
    /// An enemy finished its death animation and left the active set.
    EnemyDefeated { id: EntityId, boss: bool },
    PickupCollected { id: EntityId, total: u32 },
    HealTriggered { amount: i32 },
    AttackSpawned { by: Actor, kind: AttackKind },
    Jumped,
    ChargeStarted,
    TileShaking { id: EntityId },
    TileBroken { id: EntityId },
    BossActivated { id: EntityId },
}
