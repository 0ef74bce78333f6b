use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::properties::Properties;
use crate::core::rect::Rect;

/// Decoded static world handed over by the tile-map loader.
/// Loaded from JSON, or built directly by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldDesc {
    /// World width in pixels.
    pub width: i32,
    /// World height in pixels.
    pub height: i32,
    /// Top-left corner of the player box at session start.
    pub player_spawn: Vec2,
    /// Obstacles that block from every side. A `damage` property makes
    /// the tile a hazard.
    pub solids: Vec<TileDesc>,
    /// One-way platforms, collidable only from above.
    pub platforms: Vec<TileDesc>,
    pub healing: Vec<TileDesc>,
    pub pickups: Vec<TileDesc>,
    /// Tiles that shake and drop when stood on (`fall_on_stand`,
    /// `respawn_time`).
    pub falling: Vec<TileDesc>,
    /// Tiles with hit points (`health`, `collidable`, `boss_dependent`).
    pub breakables: Vec<TileDesc>,
    pub enemies: Vec<EnemySpawn>,
}

impl Default for WorldDesc {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            player_spawn: Vec2::ZERO,
            solids: Vec::new(),
            platforms: Vec::new(),
            healing: Vec::new(),
            pickups: Vec::new(),
            falling: Vec::new(),
            breakables: Vec::new(),
            enemies: Vec::new(),
        }
    }
}

impl WorldDesc {
    /// Parse a world description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One tile record: its box plus loader properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TileDesc {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    #[serde(default)]
    pub properties: Properties,
}

impl TileDesc {
    pub fn new(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            properties: Properties::new(),
        }
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Melee,
    Ranged,
    Boss,
}

/// Enemy placement record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    /// Top-left corner of the enemy box.
    pub pos: Vec2,
    /// Stat overrides (`health`, `damage`, `knockback`, `speed`, and for
    /// the boss `jump_power`, `shake_radius`, `shake_knockback`,
    /// `shake_damage`).
    #[serde(default)]
    pub properties: Properties,
}

impl EnemySpawn {
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            properties: Properties::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_world() {
        let json = r#"{
            "width": 1280,
            "height": 960,
            "player_spawn": [64, 400],
            "solids": [
                { "x": 0, "y": 928, "w": 1280, "h": 32 },
                { "x": 320, "y": 896, "w": 32, "h": 32, "properties": { "damage": 1 } }
            ],
            "enemies": [
                { "kind": "melee", "pos": [500, 864], "properties": { "health": 5 } },
                { "kind": "boss", "pos": [900, 808] }
            ]
        }"#;
        let world = WorldDesc::from_json(json).unwrap();
        assert_eq!(world.width, 1280);
        assert!((world.player_spawn.y - 400.0).abs() < 1e-3);
        assert_eq!(world.solids.len(), 2);
        assert_eq!(world.solids[1].properties.int_or("damage", 0), 1);
        assert_eq!(world.solids[0].rect(), Rect::new(0, 928, 1280, 32));
        assert_eq!(world.enemies[0].kind, EnemyKind::Melee);
        assert_eq!(world.enemies[0].properties.int_or("health", 3), 5);
        assert!(world.enemies[1].properties.is_empty());
        assert!(world.platforms.is_empty());
    }

    #[test]
    fn unknown_enemy_kind_is_an_error() {
        let json = r#"{ "enemies": [ { "kind": "dragon", "pos": [0, 0] } ] }"#;
        assert!(WorldDesc::from_json(json).is_err());
    }
}
