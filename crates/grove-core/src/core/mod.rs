pub mod arena;
pub mod body;
pub mod rect;
pub mod rng;
pub mod time;

pub use arena::Arena;
pub use body::KinematicBody;
pub use rect::Rect;
pub use rng::Rng;
pub use time::{clamp_dt, Countdown, MAX_DT};
