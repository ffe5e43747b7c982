//! World-space drawing: background grid, actors and debug collision circles

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::{Color, SpriteCache, Surface, colors, hsl};
use crate::sim::actor::{Actor, ActorPools};
use crate::sim::bullet::{Bullet, BulletKind};
use crate::sim::collectable::Collectable;
use crate::sim::effect::{Effect, EffectKind};
use crate::sim::enemy::EnemyShip;
use crate::sim::player::Player;
use crate::sim::vector::from_angle;
use crate::sim::world::World;

/// Spacing of the background wire grid (logical units)
const GRID_UNIT: f32 = 100.0;

/// Wire grid plus the arena edges that are in view
pub fn render_background(surface: &mut dyn Surface, world: &World) {
    let w = world;
    let scale = w.scale;
    let mut xoff = GRID_UNIT - w.viewx % GRID_UNIT;
    let mut yoff = GRID_UNIT - w.viewy % GRID_UNIT;
    // Visible extent of the arena, prescaled
    let x1 = (if w.viewx >= 0.0 { 0.0 } else { -w.viewx }) * scale;
    let y1 = (if w.viewy >= 0.0 { 0.0 } else { -w.viewy }) * scale;
    let x2 = (if w.viewx < w.size - w.viewsize { w.viewsize } else { w.size - w.viewx }) * scale;
    let y2 = (if w.viewy < w.size - w.viewsize { w.viewsize } else { w.size - w.viewy }) * scale;

    surface.save();
    surface.set_glow(0.0);
    let wires = (w.viewsize / GRID_UNIT) as usize;
    for _ in 0..wires {
        if xoff + w.viewx > 0.0 && xoff + w.viewx < w.size {
            surface.stroke_line(
                Vec2::new(xoff * scale, y1),
                Vec2::new(xoff * scale, y2),
                colors::GRID,
                1.0,
            );
        }
        if yoff + w.viewy > 0.0 && yoff + w.viewy < w.size {
            surface.stroke_line(
                Vec2::new(x1, yoff * scale),
                Vec2::new(x2, yoff * scale),
                colors::GRID,
                1.0,
            );
        }
        xoff += GRID_UNIT;
        yoff += GRID_UNIT;
    }

    let edge_x = if w.viewx <= 0.0 {
        Some(-w.viewx)
    } else if w.viewx >= w.size - w.viewsize {
        Some(w.size - w.viewx)
    } else {
        None
    };
    if let Some(x) = edge_x {
        let x = x * scale;
        surface.stroke_line(Vec2::new(x, y1), Vec2::new(x, y2), colors::WORLD_EDGE, 1.0);
    }
    let edge_y = if w.viewy <= 0.0 {
        Some(-w.viewy)
    } else if w.viewy >= w.size - w.viewsize {
        Some(w.size - w.viewy)
    } else {
        None
    };
    if let Some(y) = edge_y {
        let y = y * scale;
        surface.stroke_line(Vec2::new(x1, y), Vec2::new(x2, y), colors::WORLD_EDGE, 1.0);
    }
    surface.restore();
}

/// Regular polygon around `center`, first vertex at `heading` degrees
fn polygon(center: Vec2, radius: f32, sides: usize, heading: f32) -> Vec<Vec2> {
    let start = heading.to_radians();
    (0..sides)
        .map(|i| center + from_angle(start + i as f32 * TAU / sides as f32) * radius)
        .collect()
}

fn enemy_color(kind: u8) -> Color {
    hsl(f32::from(kind) * 50.0, 0.9, 0.6)
}

fn render_enemy(surface: &mut dyn Surface, world: &World, enemy: &EnemyShip) {
    let Some(pos) = world.world_to_screen(enemy.position(), enemy.radius()) else {
        return;
    };
    let sides = 3 + usize::from(enemy.kind % 5);
    let points = polygon(pos, enemy.radius() * world.scale, sides, enemy.heading);
    surface.stroke_polygon(&points, enemy_color(enemy.kind), 2.0);
}

fn render_player(surface: &mut dyn Surface, world: &World, player: &Player) {
    let Some(pos) = world.world_to_screen(player.position(), player.radius()) else {
        return;
    };
    let r = player.radius() * world.scale;
    let heading = player.heading.to_radians();
    let points = [
        pos + from_angle(heading) * r,
        pos + from_angle(heading + 2.4) * r,
        pos + from_angle(heading + PI) * (r * 0.4),
        pos + from_angle(heading - 2.4) * r,
    ];
    surface.stroke_polygon(&points, colors::PLAYER, 2.0);
}

fn render_bullet(surface: &mut dyn Surface, world: &World, bullet: &Bullet) {
    let Some(pos) = world.world_to_screen(bullet.position(), bullet.radius()) else {
        return;
    };
    let r = bullet.radius() * world.scale;
    match bullet.kind {
        BulletKind::Player => surface.fill_circle(pos, r, colors::PLAYER_BULLET),
        BulletKind::Enemy => surface.fill_circle(pos, r, colors::ENEMY_BULLET),
        BulletKind::Mine => surface.stroke_circle(pos, r, colors::MINE, 2.0),
    }
}

fn render_effect(surface: &mut dyn Surface, world: &World, sprites: &SpriteCache, effect: &Effect) {
    surface.save();
    surface.set_alpha(effect.fade());
    match &effect.kind {
        EffectKind::Text { text, size } => {
            if let Some(pos) = world.world_to_screen(effect.position(), *size) {
                let size = size * world.scale;
                let width = surface.measure_text(text, size);
                surface.fill_text(text, pos - Vec2::new(width * 0.5, 0.0), size, colors::WHITE);
            }
        }
        EffectKind::Score { value } => {
            if let Some(pos) = world.world_to_screen(effect.position(), 16.0) {
                let text = value.to_string();
                let size = 12.0 * world.scale * 2.0;
                let width = surface.measure_text(&text, size);
                surface.fill_text(&text, pos - Vec2::new(width * 0.5, 0.0), size, colors::WHITE);
            }
        }
        _ => {
            let id = effect.sprite_id();
            for (point, size) in effect.particle_positions() {
                let Some(pos) = world.world_to_screen(point, 4.0) else {
                    continue;
                };
                if let Some(sprite) = sprites.frame(id, size) {
                    surface.draw_sprite(sprite, pos);
                }
            }
        }
    }
    surface.restore();
}

fn render_collectable(surface: &mut dyn Surface, world: &World, item: &Collectable) {
    let Some(pos) = world.world_to_screen(item.position(), item.radius()) else {
        return;
    };
    // Blink out over the final quarter of its life
    let remaining = item.lifetime.saturating_sub(item.age);
    if remaining < item.lifetime / 4 && (remaining / 4) % 2 == 0 {
        return;
    }
    let points = polygon(pos, item.radius() * world.scale, 4, item.heading);
    surface.stroke_polygon(&points, colors::MULTIPLIER, 2.0);
}

/// Draw every pool in visiting order, each pool back to front, then the player
pub fn render_actors(
    surface: &mut dyn Surface,
    world: &World,
    sprites: &SpriteCache,
    pools: &ActorPools,
    player: &Player,
) {
    for enemy in pools.enemies.iter().rev() {
        render_enemy(surface, world, enemy);
    }
    for bullet in pools.player_bullets.iter().rev() {
        render_bullet(surface, world, bullet);
    }
    for bullet in pools.enemy_bullets.iter().rev() {
        render_bullet(surface, world, bullet);
    }
    for effect in pools.effects.iter().rev() {
        render_effect(surface, world, sprites, effect);
    }
    for item in pools.collectables.iter().rev() {
        render_collectable(surface, world, item);
    }
    if pools.player_in_play {
        render_player(surface, world, player);
    }
}

fn outline<A: Actor>(surface: &mut dyn Surface, world: &World, actors: &[A]) {
    for actor in actors.iter().rev() {
        if actor.radius() <= 0.0 {
            continue;
        }
        if let Some(pos) = world.world_to_screen(actor.position(), actor.radius()) {
            surface.stroke_circle(pos, actor.radius() * world.scale, colors::COLLISION_RADIUS, 0.5);
        }
    }
}

/// Debug overlay: the collision circle of every actor that has one
pub fn render_collision_radius(
    surface: &mut dyn Surface,
    world: &World,
    pools: &ActorPools,
    player: &Player,
) {
    surface.save();
    outline(surface, world, &pools.enemies);
    outline(surface, world, &pools.player_bullets);
    outline(surface, world, &pools.enemy_bullets);
    outline(surface, world, &pools.collectables);
    if pools.player_in_play {
        outline(surface, world, std::slice::from_ref(player));
    }
    surface.restore();
}
