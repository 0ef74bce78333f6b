pub mod config;
pub mod session;
pub mod types;

pub use config::SimConfig;
pub use session::Session;
pub use types::{Actor, AttackKind, EntityId, SimEvent};
