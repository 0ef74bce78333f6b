pub mod world;

pub use world::{EnemyKind, EnemySpawn, TileDesc, WorldDesc};
