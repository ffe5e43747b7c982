//! Per-frame actor advance and world-edge policy
//!
//! Pools are visited in a fixed order. Within each pool an actor runs its
//! bookkeeping, is dropped if expired, and otherwise moves by its velocity.
//! Actors that leave the arena are handled per category:
//! - the player bounces back, damped
//! - enemies, collectables and effects are clamped and reflected
//! - bullets turn into an impact effect, unless the player has bouncing
//!   weapons, in which case player bullets reflect like enemies

use glam::Vec2;

use super::actor::{Actor, ActorPools};
use super::bullet::Bullet;
use super::effect::Effect;
use super::player::Player;
use super::vector::VectorExt;
use super::world::World;
use crate::DEG_PER_RAD;
use crate::consts::*;

/// Clamp a point into `[0, size]` on both axes, reporting which axes crossed
pub fn clamp_to_world(position: &mut Vec2, size: f32) -> (bool, bool) {
    let mut cross_x = false;
    let mut cross_y = false;
    if position.x >= size {
        position.x = size;
        cross_x = true;
    } else if position.x < 0.0 {
        position.x = 0.0;
        cross_x = true;
    }
    if position.y >= size {
        position.y = size;
        cross_y = true;
    } else if position.y < 0.0 {
        position.y = 0.0;
        cross_y = true;
    }
    (cross_x, cross_y)
}

/// Rotate the velocity by twice its angle to `axis`, damp it, and move once
/// more along the new velocity
fn bounce_about<A: Actor>(actor: &mut A, axis: Vec2) {
    let body = actor.body_mut();
    let h = body.vector.theta_to(axis);
    body.vector.rotate_by(h * 2.0).scale_by(ACTOR_BOUNCE_DAMPING);
    body.position += body.vector;
    if let Some(heading) = actor.heading_mut() {
        *heading += h * 2.0 * DEG_PER_RAD;
    }
}

/// Edge rule for non-player actors. Returns true when a bounce happened.
pub fn reflect_at_edges<A: Actor>(actor: &mut A, size: f32) -> bool {
    let (cross_x, cross_y) = clamp_to_world(&mut actor.body_mut().position, size);
    // A vertical edge reflects about the vertical axis, and vice versa
    if cross_x {
        bounce_about(actor, Vec2::Y);
    }
    if cross_y {
        bounce_about(actor, Vec2::X);
    }
    cross_x || cross_y
}

/// Damped bounce for the player: reverse, slow, and step back in
pub fn bounce_player(player: &mut Player, world: &World) {
    let body = &mut player.body;
    if world.is_outside(body.position) {
        body.vector.invert().scale_by(PLAYER_BOUNCE_DAMPING);
        body.position += body.vector;
    }
}

/// Advance one pool. `at_edge` runs for actors that moved out of the arena
/// and returns whether the actor stays in play.
fn advance_pool<A: Actor>(pool: &mut Vec<A>, world: &World, mut at_edge: impl FnMut(&mut A) -> bool) {
    pool.retain_mut(|actor| {
        actor.on_update();
        if actor.expired() {
            return false;
        }
        let body = actor.body_mut();
        body.position += body.vector;
        if world.is_outside(actor.position()) {
            at_edge(actor)
        } else {
            true
        }
    });
}

/// Bullet edge rule: bounce if allowed, otherwise fizzle into an impact
fn bullet_at_edge(bullet: &mut Bullet, bounce: bool, size: f32, impacts: &mut Vec<Effect>) -> bool {
    if bounce {
        reflect_at_edges(bullet, size);
        return true;
    }
    clamp_to_world(&mut bullet.body.position, size);
    impacts.push(Effect::bullet_impact(
        bullet.body.position,
        bullet.body.vector.nscale(0.5),
    ));
    false
}

/// Advance every actor by one frame
///
/// Impact effects created by bullets leaving the arena join the effects pool
/// after it has been advanced, so they first move on the next frame.
pub fn integrate(pools: &mut ActorPools, player: &mut Player, world: &World) {
    let size = world.size;
    let bounce_weapons = player.bounce_weapons;
    let mut impacts = Vec::new();

    advance_pool(&mut pools.enemies, world, |enemy| {
        reflect_at_edges(enemy, size);
        true
    });
    advance_pool(&mut pools.player_bullets, world, |bullet| {
        bullet_at_edge(bullet, bounce_weapons, size, &mut impacts)
    });
    advance_pool(&mut pools.enemy_bullets, world, |bullet| {
        bullet_at_edge(bullet, false, size, &mut impacts)
    });
    advance_pool(&mut pools.effects, world, |effect| {
        reflect_at_edges(effect, size);
        true
    });
    advance_pool(&mut pools.collectables, world, |item| {
        reflect_at_edges(item, size);
        true
    });
    pools.effects.append(&mut impacts);

    if pools.player_in_play {
        if player.expired() {
            pools.player_in_play = false;
        } else {
            player.body.position += player.body.vector;
            bounce_player(player, world);
        }
    }
}
