// extensions/mod.rs
//
// Optional helpers decoupled from the simulation state.

pub mod easing;

pub use easing::{Easing, lerp, lerp_vec2, ease, ease_vec2};
