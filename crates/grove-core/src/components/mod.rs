pub mod breakable;
pub mod falling;
pub mod health;
pub mod projectile;
pub mod properties;
pub mod vine;
pub mod world;

pub use breakable::{BreakableTile, Debris, TileDamage};
pub use falling::{FallingState, FallingTile};
pub use health::Health;
pub use projectile::{Projectile, ProjectileOutcome};
pub use properties::{PropValue, Properties};
pub use vine::{Vine, VinePhase};
pub use world::{HealingTile, Pickup, Solid, SolidHit, SolidSource, TileWorld};
