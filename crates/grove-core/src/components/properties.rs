//! Tile and spawn property maps, as produced by the tile-map loader.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// A single typed property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Named properties attached to a tile or spawn record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(HashMap<String, PropValue>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a property map from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with(mut self, name: impl Into<String>, value: PropValue) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0.get(name)
    }

    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        match self.0.get(name) {
            Some(PropValue::Bool(b)) => *b,
            _ => default,
        }
    }

    pub fn int_or(&self, name: &str, default: i32) -> i32 {
        match self.0.get(name) {
            Some(PropValue::Int(i)) => (*i).clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            Some(PropValue::Float(f)) => *f as i32,
            _ => default,
        }
    }

    pub fn float_or(&self, name: &str, default: f32) -> f32 {
        match self.0.get(name) {
            Some(PropValue::Float(f)) => *f as f32,
            Some(PropValue::Int(i)) => *i as f32,
            _ => default,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_types() {
        let props = Properties::from_json(
            r#"{ "damage": 2, "respawn_time": 7.5, "boss_dependent": true, "type": "MeleeGhost" }"#,
        )
        .unwrap();
        assert_eq!(props.int_or("damage", 0), 2);
        assert!((props.float_or("respawn_time", 0.0) - 7.5).abs() < 1e-6);
        assert!(props.bool_or("boss_dependent", false));
        assert_eq!(props.get("type"), Some(&PropValue::Text("MeleeGhost".into())));
    }

    #[test]
    fn missing_or_mistyped_falls_back() {
        let props = Properties::new().with("health", PropValue::Text("lots".into()));
        assert_eq!(props.int_or("health", 3), 3);
        assert!(!props.bool_or("collidable", false));
        assert!((props.float_or("speed", 60.0) - 60.0).abs() < 1e-6);
    }

    #[test]
    fn ints_widen_to_floats() {
        let props = Properties::new().with("knockback", PropValue::Int(480));
        assert!((props.float_or("knockback", 0.0) - 480.0).abs() < 1e-6);
    }
}
