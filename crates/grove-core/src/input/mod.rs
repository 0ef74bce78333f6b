pub mod intents;

pub use intents::{Action, IntentEvent, IntentQueue, Intents};
