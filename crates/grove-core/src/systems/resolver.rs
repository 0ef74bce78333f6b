//! Axis-separated collision resolution against the tile world.
//!
//! One call to [`step_body`] advances a body by one frame:
//!
//! 1. gravity, capped at the terminal fall speed
//! 2. integrate x, resolve against solids
//! 3. integrate y, resolve against solids, one-way platforms and
//!    standable falling tiles
//! 4. clamp to world bounds
//!
//! Horizontal always resolves before vertical. Near internal tile corners
//! this can snag a body on a seam; the ordering is kept as is.
//!
//! The resolver never applies damage. It reports what the body touched
//! and leaves the reaction to the caller.

use crate::api::types::EntityId;
use crate::components::world::{SolidHit, TileWorld};
use crate::core::body::KinematicBody;

/// Which optional surfaces a body collides with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surfaces {
    pub platforms: bool,
    /// Falling tiles can be stood on (and triggered).
    pub falling: bool,
}

impl Surfaces {
    pub const ALL: Self = Self {
        platforms: true,
        falling: true,
    };

    /// Solids and one-way platforms only.
    pub const STATIC: Self = Self {
        platforms: true,
        falling: false,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct StepParams {
    pub gravity: f32,
    pub max_fall: f32,
    /// Slack (px) for the "was above the platform last frame" test.
    pub platform_tolerance: i32,
    pub surfaces: Surfaces,
}

/// Caller's verdict on a horizontal solid contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Block,
    /// Ignore this obstacle (e.g. it was just destroyed).
    Pass,
}

/// A hazard tile touched on the vertical pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardContact {
    pub damage: i32,
    /// Knockback sign: away from the tile's center.
    pub direction: f32,
}

/// Everything the body touched during one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contacts {
    pub hit_wall: bool,
    pub landed: bool,
    pub bumped_head: bool,
    pub hazards: Vec<HazardContact>,
    /// Falling tiles this step started shaking.
    pub triggered: Vec<EntityId>,
}

/// Advance `body` by `dt` against `world`.
///
/// `on_wall` is consulted for every solid overlapped on the horizontal
/// pass before the body is pushed out of it; it may mutate the world.
pub fn step_body<F>(
    body: &mut KinematicBody,
    world: &mut TileWorld,
    params: &StepParams,
    dt: f32,
    mut on_wall: F,
) -> Contacts
where
    F: FnMut(&mut TileWorld, &SolidHit) -> Contact,
{
    let mut contacts = Contacts::default();
    body.apply_gravity(params.gravity, params.max_fall, dt);

    // Horizontal.
    body.integrate_x(dt);
    for hit in world.solids_overlapping(&body.rect()) {
        if !body.rect().intersects(&hit.rect) {
            continue;
        }
        if on_wall(world, &hit) == Contact::Pass {
            continue;
        }
        body.block_horizontal(&hit.rect);
        contacts.hit_wall = true;
    }

    // Vertical.
    let prev_bottom = body.integrate_y(dt);
    for hit in world.solids_overlapping(&body.rect()) {
        if !body.rect().intersects(&hit.rect) {
            continue;
        }
        let moving_up = body.vel.y < 0.0;
        if body.block_vertical(&hit.rect) {
            contacts.landed = true;
        } else if moving_up {
            contacts.bumped_head = true;
        }
        if hit.damage > 0 {
            let direction = if body.rect().center_x() < hit.rect.center_x() {
                -1.0
            } else {
                1.0
            };
            contacts.hazards.push(HazardContact {
                damage: hit.damage,
                direction,
            });
        }
    }

    let tolerance = params.platform_tolerance as f32;
    if params.surfaces.platforms {
        for platform in world.platforms_overlapping(&body.rect()) {
            if body.vel.y > 0.0 && prev_bottom <= platform.top() as f32 + tolerance {
                body.land_on(platform.top());
                contacts.landed = true;
            }
        }
    }

    if params.surfaces.falling {
        for (id, rect) in world.falling_overlapping(&body.rect()) {
            if body.vel.y >= 0.0 && prev_bottom <= rect.top() as f32 + tolerance {
                body.land_on(rect.top());
                contacts.landed = true;
                if world.trigger_falling(id) {
                    contacts.triggered.push(id);
                }
            }
        }
    }

    body.clamp_to_world(world.width(), world.height());
    body.settle();
    contacts
}

/// `on_wall` callback that blocks on every solid.
pub fn block_all(_: &mut TileWorld, _: &SolidHit) -> Contact {
    Contact::Block
}
