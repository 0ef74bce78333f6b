use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::world::TileWorld;
use crate::core::rect::Rect;

/// What happened to a projectile this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileOutcome {
    Flying,
    Expired,
    /// Stopped by an obstacle.
    Blocked,
    /// Struck the player. `direction` is the knockback sign.
    HitPlayer { damage: i32, direction: f32 },
}

/// Straight-line shot fired by a ranged enemy.
#[derive(Debug, Clone)]
pub struct Projectile {
    pos: Vec2,
    rect: Rect,
    vel: Vec2,
    damage: i32,
    age: f32,
    lifetime: f32,
    /// Enemy that fired it. The shot outlives its shooter.
    pub owner: EntityId,
}

impl Projectile {
    /// Fire from the center of `origin` toward `target` at `speed` px/s.
    pub fn aimed(
        owner: EntityId,
        origin: Rect,
        target: Vec2,
        speed: f32,
        size: i32,
        damage: i32,
        lifetime: f32,
    ) -> Self {
        let center = origin.center();
        let offset = target - center;
        let angle = offset.y.atan2(offset.x);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        Self::new(owner, center, vel, size, damage, lifetime)
    }

    /// Shot centered on `center` with a fixed velocity.
    pub fn new(owner: EntityId, center: Vec2, vel: Vec2, size: i32, damage: i32, lifetime: f32) -> Self {
        let pos = center - Vec2::splat(size as f32 / 2.0);
        Self {
            pos,
            rect: Rect::from_pos(pos, size, size),
            vel,
            damage,
            age: 0.0,
            lifetime,
            owner,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    /// Move, then test lifetime, obstacles and the player in that order.
    pub fn update(&mut self, dt: f32, world: &TileWorld, player: &Rect) -> ProjectileOutcome {
        self.pos += self.vel * dt;
        self.rect = Rect::from_pos(self.pos, self.rect.w, self.rect.h);
        self.age += dt;

        if self.age >= self.lifetime {
            return ProjectileOutcome::Expired;
        }
        if world.is_blocked(&self.rect) {
            return ProjectileOutcome::Blocked;
        }
        if self.rect.intersects(player) {
            return ProjectileOutcome::HitPlayer {
                damage: self.damage,
                direction: player.side_of(&self.rect),
            };
        }
        ProjectileOutcome::Flying
    }
}
