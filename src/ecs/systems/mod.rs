pub mod shoot;
pub mod stun;
pub mod warp;

use crate::anim::{AnimState, Frames};
use crate::body::Body;
use crate::config::{MONSTER_SIZE, SCENE_HEIGHT, SCENE_WIDTH};
use crate::ecs::components::{AttackKind, AttackState, Monster};
use crate::level::Level;
use crate::player::Player;

/// Run every active monster through one simulation tick:
/// behavior dispatch, velocity integration, the automatic animation
/// ticker (a no-op while a behavior drives frames), and the closing
/// bounds re-clamp.
pub fn tick(world: &mut hecs::World, player: &mut Player, level: &Level, frames: &Frames) {
    for (_, (body, monster, anim, state)) in
        world.query_mut::<(&mut Body, &mut Monster, &mut AnimState, &mut AttackState)>()
    {
        if !monster.active {
            continue;
        }

        match state {
            AttackState::Stun(s) => stun::attack(body, anim, s, player, level, frames),
            AttackState::Warp(s) => warp::attack(body, anim, s, player, level, frames),
            AttackState::Shoot(s) => shoot::attack(body, anim, s, player, level, frames),
        }

        body.apply_velocity();
        anim.auto_advance(frames);
        body.clamp();
    }
}

/// Spawn the stock roster: one monster per archetype, each gated to its
/// pair of levels.
pub fn spawn_default_monsters(world: &mut hecs::World) {
    let roster: [(AttackKind, [usize; 2]); 3] = [
        (AttackKind::Stun, [0, 3]),
        (AttackKind::Warp, [1, 4]),
        (AttackKind::Shoot, [2, 5]),
    ];

    for (kind, levels) in roster {
        let mut monster = Monster::new(kind);
        monster.set_active_levels(&levels);
        let _ = world.spawn((
            Body::new(MONSTER_SIZE, kind.speed(), SCENE_WIDTH, SCENE_HEIGHT),
            monster,
            AnimState::default(),
            AttackState::for_kind(kind),
        ));
    }
}

/// Ready every monster for a level entry: recompute activation from the
/// mask, drop active ones at a random corner with fresh behavior state,
/// and rewind their animation.
pub fn prepare_for_level(
    world: &mut hecs::World,
    level_index: usize,
    rng: &mut fastrand::Rng,
    width: i32,
    height: i32,
) {
    for (_, (body, monster, anim, state)) in
        world.query_mut::<(&mut Body, &mut Monster, &mut AnimState, &mut AttackState)>()
    {
        monster.active = monster.enabled_for(level_index);
        if !monster.active {
            continue;
        }

        body.update_bounds(width, height);
        body.set_velocity(0, 0);
        body.spawn_at_corner(rng);
        state.reset();
        *anim = AnimState::default();
        log::info!(
            "{} monster active on level {} at ({}, {})",
            monster.kind.label(),
            level_index,
            body.x(),
            body.y()
        );
    }
}

/// Number of monsters currently active in the scene.
pub fn active_monsters(world: &mut hecs::World) -> usize {
    world
        .query_mut::<&Monster>()
        .into_iter()
        .filter(|(_, m)| m.active)
        .count()
}
