pub mod events;

pub use events::{as_floats, encode_events, EventRecord};
