//! Breakable tiles and the debris they shatter into.

use glam::Vec2;

use crate::api::config::TileTuning;
use crate::core::rect::Rect;
use crate::core::rng::Rng;
use crate::core::time::progress;

/// A presentation-only fragment of a shattered tile.
#[derive(Debug, Clone)]
pub struct Debris {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Top-left of the source cell inside the tile image.
    pub cell: (i32, i32),
    pub size: i32,
    pub age: f32,
    pub lifetime: f32,
}

impl Debris {
    /// Advance the fragment. Returns false once it has expired.
    pub fn tick(&mut self, dt: f32, gravity: f32) -> bool {
        self.age += dt;
        self.pos += self.vel * dt;
        self.vel.y += gravity * dt;
        self.age < self.lifetime
    }

    /// Opacity fading from 1 to 0 over the fragment's lifetime.
    pub fn alpha(&self) -> f32 {
        1.0 - progress(self.age, self.lifetime)
    }
}

/// What a damage call did to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileDamage {
    /// Tile was not damageable (already broken, or not collidable).
    Ignored,
    Damaged,
    /// This call took the tile to zero health.
    Broken,
}

#[derive(Debug, Clone)]
pub struct BreakableTile {
    rect: Rect,
    health: i32,
    collidable: bool,
    broken: bool,
    /// Collidability follows whether non-boss enemies are alive.
    pub boss_dependent: bool,
    debris: Vec<Debris>,
}

impl BreakableTile {
    pub fn new(rect: Rect, health: i32, collidable: bool, boss_dependent: bool) -> Self {
        Self {
            rect,
            health,
            collidable,
            broken: false,
            boss_dependent,
            debris: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    pub fn is_collidable(&self) -> bool {
        self.collidable && !self.broken
    }

    pub fn debris(&self) -> &[Debris] {
        &self.debris
    }

    /// Toggle collidability. A broken tile stays non-collidable.
    /// Returns true if the flag changed.
    pub fn set_collidable(&mut self, collidable: bool) -> bool {
        if self.broken || self.collidable == collidable {
            return false;
        }
        self.collidable = collidable;
        true
    }

    /// Apply damage. Only collidable, unbroken tiles take it.
    pub fn take_damage(&mut self, amount: i32) -> TileDamage {
        if self.broken || !self.collidable {
            return TileDamage::Ignored;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.health = 0;
            self.broken = true;
            self.collidable = false;
            TileDamage::Broken
        } else {
            TileDamage::Damaged
        }
    }

    /// Split the tile into `debris_cell`-sized fragments with random scatter.
    pub fn shatter(&mut self, rng: &mut Rng, tuning: &TileTuning) {
        let cell = tuning.debris_cell.max(1);
        for i in (0..self.rect.w).step_by(cell as usize) {
            for j in (0..self.rect.h).step_by(cell as usize) {
                self.debris.push(Debris {
                    pos: Vec2::new((self.rect.x + i) as f32, (self.rect.y + j) as f32),
                    vel: Vec2::new(
                        rng.range(-tuning.debris_spread_x, tuning.debris_spread_x),
                        rng.range(-tuning.debris_lift_y, 0.0),
                    ),
                    cell: (i, j),
                    size: cell,
                    age: 0.0,
                    lifetime: rng.range(tuning.debris_min_life, tuning.debris_max_life),
                });
            }
        }
    }

    /// Advance debris. Returns true once a broken tile has nothing left
    /// to show and can be retired.
    pub fn update(&mut self, dt: f32, tuning: &TileTuning) -> bool {
        if !self.broken {
            return false;
        }
        self.debris.retain_mut(|d| d.tick(dt, tuning.debris_gravity));
        self.debris.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_at_zero_health() {
        let mut tile = BreakableTile::new(Rect::new(0, 0, 32, 32), 2, true, false);
        assert_eq!(tile.take_damage(1), TileDamage::Damaged);
        assert!(tile.is_collidable());
        assert_eq!(tile.take_damage(1), TileDamage::Broken);
        assert!(tile.is_broken());
        assert!(!tile.is_collidable());
        assert_eq!(tile.take_damage(1), TileDamage::Ignored);
    }

    #[test]
    fn non_collidable_tiles_ignore_damage() {
        let mut tile = BreakableTile::new(Rect::new(0, 0, 32, 32), 1, false, true);
        assert_eq!(tile.take_damage(5), TileDamage::Ignored);
        assert_eq!(tile.health(), 1);
    }

    #[test]
    fn broken_tile_cannot_be_reenabled() {
        let mut tile = BreakableTile::new(Rect::new(0, 0, 32, 32), 1, true, true);
        tile.take_damage(1);
        assert!(!tile.set_collidable(true));
        assert!(!tile.is_collidable());
    }

    #[test]
    fn shatter_fills_tile_with_fragments() {
        let tuning = TileTuning::default();
        let mut rng = Rng::new(1);
        let mut tile = BreakableTile::new(Rect::new(64, 64, 32, 32), 1, true, false);
        tile.take_damage(1);
        tile.shatter(&mut rng, &tuning);
        assert_eq!(tile.debris().len(), 16);
        for d in tile.debris() {
            assert!(d.lifetime >= tuning.debris_min_life && d.lifetime < tuning.debris_max_life);
            assert!(d.vel.y <= 0.0);
            assert!((d.alpha() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn spent_once_all_debris_expire() {
        let tuning = TileTuning::default();
        let mut rng = Rng::new(3);
        let mut tile = BreakableTile::new(Rect::new(0, 0, 16, 16), 1, true, false);
        tile.take_damage(1);
        tile.shatter(&mut rng, &tuning);
        assert!(!tile.update(0.5, &tuning));
        assert!(tile.update(1.1, &tuning));
    }

    #[test]
    fn intact_tile_is_never_spent() {
        let tuning = TileTuning::default();
        let mut tile = BreakableTile::new(Rect::new(0, 0, 16, 16), 1, true, false);
        assert!(!tile.update(10.0, &tuning));
    }
}
