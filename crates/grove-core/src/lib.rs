pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::{
    BossTuning, CameraTuning, EnemyCommon, EnemyStats, MeleeTuning, PhysicsTuning,
    PlayerTuning, RangedTuning, SimConfig, TileTuning, VineTuning,
};
pub use api::session::Session;
pub use api::types::{Actor, AttackKind, EntityId, SimEvent};
pub use assets::world::{EnemyKind, EnemySpawn, TileDesc, WorldDesc};
pub use bridge::events::{as_floats, encode_events, EventRecord};
pub use components::breakable::{BreakableTile, Debris, TileDamage};
pub use components::falling::{FallingState, FallingTile};
pub use components::health::Health;
pub use components::projectile::{Projectile, ProjectileOutcome};
pub use components::properties::{PropValue, Properties};
pub use components::vine::{Vine, VinePhase};
pub use components::world::{HealingTile, Pickup, Solid, SolidHit, SolidSource, TileWorld};
pub use core::arena::Arena;
pub use core::body::KinematicBody;
pub use core::rect::Rect;
pub use core::time::{clamp_dt, Countdown, MAX_DT};
pub use input::intents::{Action, IntentEvent, IntentQueue, Intents};
pub use systems::camera::ScreenCamera;
pub use systems::enemy::{AiAction, Enemy, EnemyRoster, EnemyState, Phase};
pub use systems::player::{Player, PlayerAction};
pub use systems::resolver::{step_body, Contacts, StepParams, Surfaces};

// Extensions
pub use extensions::{Easing, lerp, lerp_vec2, ease, ease_vec2};
