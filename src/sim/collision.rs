//! Circle collision detection and hit resolution
//!
//! Checks run in a fixed order each frame: the player against enemies, enemy
//! bullets and collectables, then every player bullet against the enemies.
//! Actors are removed from their pool as soon as a hit is resolved, so no
//! actor takes part in two hits in the same frame.

use glam::Vec2;
use rand::Rng;

use super::actor::{Actor, ActorPools};
use super::collectable::Collectable;
use super::effect::Effect;
use super::enemy::EnemyShip;
use super::state::GameState;
use super::vector::VectorExt;
use crate::consts::*;

/// Two circles touch when their centers are no further apart than the sum of
/// their radii
#[inline]
pub fn collide<A: Actor, B: Actor>(a: &A, b: &B) -> bool {
    a.position().distance(b.position()) <= a.radius() + b.radius()
}

/// Points for destroying an enemy of the given score bracket
#[inline]
pub fn kill_score(scoretype: u32, multiplier: u64) -> u64 {
    (u64::from(scoretype) + 1) * 5 * multiplier
}

/// Lose a life and leave an explosion where the player was
fn player_killed(game: &mut GameState, pools: &mut ActorPools) {
    game.lives = game.lives.saturating_sub(1);
    let boom = Effect::player_explosion(
        game.player.body.position,
        game.player.body.vector,
        &mut game.rng,
    );
    pools.effects.push(boom);
    log::info!(
        "Player destroyed at frame {}, {} lives left",
        game.player.killed_on_frame,
        game.lives
    );
}

/// Player against enemies, enemy bullets and collectables
///
/// Skipped while the player is out of play. Resolution stops as soon as the
/// player dies.
pub fn detect_player(game: &mut GameState, pools: &mut ActorPools, frame: u64, invincible: bool) {
    if !pools.player_in_play || !game.player.alive {
        return;
    }

    let mut i = 0;
    while i < pools.enemies.len() {
        if !collide(&game.player, &pools.enemies[i]) {
            i += 1;
            continue;
        }
        let mut enemy = pools.enemies.remove(i);
        let mut died = false;
        if !invincible {
            died = game.player.damage_by(enemy.collision_damage(), frame);
        }
        game.player.body.vector += enemy.body.vector.nscale(ENEMY_IMPACT_TRANSFER);
        enemy.kill();
        let parent = game.player.body.vector;
        destroy_enemy(game, pools, &enemy, parent, false);
        if died {
            player_killed(game, pools);
            return;
        }
    }

    let mut i = 0;
    while i < pools.enemy_bullets.len() {
        if !collide(&game.player, &pools.enemy_bullets[i]) {
            i += 1;
            continue;
        }
        let bullet = pools.enemy_bullets.remove(i);
        let mut died = false;
        if !invincible {
            died = game.player.damage_by(bullet.power(), frame);
        }
        game.player.body.vector += bullet.body.vector.nscale(BULLET_IMPACT_TRANSFER);
        pools.effects.push(Effect::bullet_impact(
            bullet.body.position,
            bullet.body.vector.nscale(0.5),
        ));
        if died {
            player_killed(game, pools);
            return;
        }
    }

    let mut i = 0;
    while i < pools.collectables.len() {
        if collide(&game.player, &pools.collectables[i]) {
            let item = pools.collectables.remove(i);
            item.collected(game, &mut pools.effects);
        } else {
            i += 1;
        }
    }
}

/// Player bullets against enemies. The first enemy in pool order that a
/// bullet touches absorbs it.
pub fn detect_player_bullets(game: &mut GameState, pools: &mut ActorPools) {
    let mut i = 0;
    while i < pools.player_bullets.len() {
        let bullet = &pools.player_bullets[i];
        let Some(n) = pools.enemies.iter().position(|e| collide(bullet, e)) else {
            i += 1;
            continue;
        };
        let bullet = pools.player_bullets.remove(i);
        if pools.enemies[n].damage_by(bullet.power()) {
            let enemy = pools.enemies.remove(n);
            destroy_enemy(game, pools, &enemy, bullet.body.vector, true);
            generate_multiplier(game, pools, &enemy);
        } else {
            let kind = pools.enemies[n].kind;
            let speed = 0.5 + game.rng.random::<f32>() * 0.5;
            let impact = Effect::enemy_impact(
                bullet.body.position,
                bullet.body.vector.nscale(speed),
                kind,
                &mut game.rng,
            );
            pools.effects.push(impact);
        }
    }
}

/// Replace a destroyed enemy with an explosion carrying some of the impact
/// momentum. Player kills score, show the points and run the enemy's
/// destruction hook.
pub fn destroy_enemy(
    game: &mut GameState,
    pools: &mut ActorPools,
    enemy: &EnemyShip,
    parent_vector: Vec2,
    by_player: bool,
) {
    let vector = enemy.body.vector + parent_vector.nscale(MOMENTUM_TRANSFER);
    let boom = Effect::enemy_explosion(enemy.body.position, vector, enemy.kind, &mut game.rng);
    pools.effects.push(boom);

    if by_player {
        let inc = kill_score(enemy.scoretype, game.score_multiplier);
        game.add_score(inc);
        log::debug!("{} destroyed for {} points", enemy.params().name, inc);

        let position = enemy.body.position - Vec2::new(0.0, 16.0);
        let vector = Vec2::new(0.0, -5.0) + enemy.body.vector.nscale(0.5);
        pools
            .effects
            .push(Effect::score_indicator(position, vector, inc));

        let replacements = enemy.on_destroyed(&mut game.rng);
        pools.enemies.extend(replacements);
    }

    pools.enemy_kills += 1;
}

/// Drop multiplier pickups where a flagged enemy died
pub fn generate_multiplier(game: &mut GameState, pools: &mut ActorPools, enemy: &EnemyShip) {
    if !enemy.drops_multiplier {
        return;
    }
    let max = u32::from(enemy.kind).clamp(1, 4);
    let count = game.rng.random_range(1..=max);
    for _ in 0..count {
        let mut vector = enemy.body.vector.nscale(0.2);
        vector.rotate_by(game.rng.random::<f32>() * std::f32::consts::TAU);
        pools
            .collectables
            .push(Collectable::multiplier(enemy.body.position, vector));
    }
}
