//! Render interface boundary. Each frame the simulation is flattened into
//! a list of draw primitives in paint order; the frontend maps sheets to
//! textures and strokes rings however it likes. No pixels here.

use crate::anim::{AnimState, Clip, Frames};
use crate::body::Body;
use crate::config::{DOOR_SIZE, PROJECTILE_SIZE};
use crate::ecs::components::{AttackState, Monster};
use crate::ecs::systems::{stun, warp};
use crate::level::Level;
use crate::player::{Player, PlayerState};

/// Which sprite sheet a draw call samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    PlayerIdle,
    PlayerRun,
    PlayerDeath,
    MonsterIdle,
    MonsterSkill,
    MonsterSummon,
    MonsterVanish,
    Orb,
    Door,
}

impl Sheet {
    fn for_clip(clip: Clip) -> Self {
        match clip {
            Clip::Idle => Sheet::MonsterIdle,
            Clip::Skill => Sheet::MonsterSkill,
            Clip::Summon => Sheet::MonsterSummon,
            Clip::Orb => Sheet::Orb,
            Clip::Vanish => Sheet::MonsterVanish,
        }
    }

    fn for_player(state: PlayerState) -> Self {
        match state {
            PlayerState::Idle => Sheet::PlayerIdle,
            PlayerState::Run => Sheet::PlayerRun,
            PlayerState::Death => Sheet::PlayerDeath,
        }
    }
}

/// An annular effect cue (stun pulse, warp warning).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub cx: i32,
    pub cy: i32,
    pub radius: i32,
    pub thickness: i32,
    pub alpha: f32,
}

/// One draw call, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum Draw {
    Sprite {
        sheet: Sheet,
        frame: usize,
        x: i32,
        y: i32,
        size: i32,
        flip: bool,
    },
    Orb {
        x: i32,
        y: i32,
        frame: usize,
        size: i32,
    },
    Ring(Ring),
}

/// Reusable frame buffer of draw calls. Cleared and refilled after every
/// tick; the allocation survives.
#[derive(Default)]
pub struct DrawList {
    items: Vec<Draw>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn push(&mut self, draw: Draw) {
        self.items.push(draw);
    }

    pub fn items(&self) -> &[Draw] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Flatten the scene: doors, player, monsters with their orbs, effect
/// rings on top.
pub fn collect(
    world: &hecs::World,
    player: &Player,
    level: &Level,
    frames: &Frames,
    out: &mut DrawList,
) {
    out.clear();

    for door in level.doors() {
        out.push(Draw::Sprite {
            sheet: Sheet::Door,
            frame: door.frame(),
            x: door.x(level.width()),
            y: door.y(level.height()),
            size: DOOR_SIZE,
            flip: false,
        });
    }

    out.push(Draw::Sprite {
        sheet: Sheet::for_player(player.state()),
        frame: player.frame(),
        x: player.body().x(),
        y: player.body().y(),
        size: player.size(),
        flip: player.facing_left(),
    });

    for (_, (body, monster, anim, state)) in world
        .query::<(&Body, &Monster, &AnimState, &AttackState)>()
        .iter()
    {
        if !monster.active {
            continue;
        }

        let total = frames.count(anim.clip);
        out.push(Draw::Sprite {
            sheet: Sheet::for_clip(anim.clip),
            frame: anim.frame.min(total.saturating_sub(1)),
            x: body.x(),
            y: body.y(),
            size: body.size(),
            flip: false,
        });

        if let AttackState::Shoot(s) = state {
            for orb in &s.projectiles {
                let pos = orb.pos();
                out.push(Draw::Orb {
                    x: pos.x.round() as i32 - PROJECTILE_SIZE / 2,
                    y: pos.y.round() as i32 - PROJECTILE_SIZE / 2,
                    frame: orb.frame(),
                    size: PROJECTILE_SIZE,
                });
            }
        }
    }

    // Effect cues paint over everything else.
    for (_, (body, monster, state)) in world.query::<(&Body, &Monster, &AttackState)>().iter() {
        if !monster.active {
            continue;
        }
        let ring = match state {
            AttackState::Stun(s) => stun::ring(body, s),
            AttackState::Warp(s) => warp::ring(body, s, frames),
            AttackState::Shoot(_) => None,
        };
        if let Some(ring) = ring {
            out.push(Draw::Ring(ring));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DOORS_PER_LEVEL;
    use crate::ecs::systems::{prepare_for_level, spawn_default_monsters, tick};

    #[test]
    fn frame_lists_doors_player_and_active_monster() {
        let mut world = hecs::World::new();
        spawn_default_monsters(&mut world);
        let mut rng = fastrand::Rng::with_seed(21);
        prepare_for_level(&mut world, 0, &mut rng, 800, 600);

        let player = Player::new(800, 600);
        let level = Level::generate(&mut rng, 800, 600);
        let frames = Frames::default();

        let mut list = DrawList::default();
        collect(&world, &player, &level, &frames, &mut list);

        // Six doors, the player, one active monster. No rings at rest.
        assert_eq!(list.len(), DOORS_PER_LEVEL + 2);
        let sprites = list
            .items()
            .iter()
            .filter(|d| matches!(d, Draw::Sprite { .. }))
            .count();
        assert_eq!(sprites, list.len());
    }

    #[test]
    fn pulsing_stun_monster_adds_a_ring() {
        let mut world = hecs::World::new();
        spawn_default_monsters(&mut world);
        let mut rng = fastrand::Rng::with_seed(22);
        prepare_for_level(&mut world, 0, &mut rng, 800, 600);

        let mut player = Player::new(800, 600);
        let level = Level::generate(&mut rng, 800, 600);
        let frames = Frames::default();

        // Run until the stun archetype reaches its pulse.
        let mut list = DrawList::default();
        let mut saw_ring = false;
        for _ in 0..600 {
            tick(&mut world, &mut player, &level, &frames);
            collect(&world, &player, &level, &frames, &mut list);
            if list.items().iter().any(|d| matches!(d, Draw::Ring(_))) {
                saw_ring = true;
                break;
            }
        }
        assert!(saw_ring, "stun pulse never showed its ring");
    }

    #[test]
    fn orbs_are_drawn_centered() {
        let mut world = hecs::World::new();
        spawn_default_monsters(&mut world);
        let mut rng = fastrand::Rng::with_seed(23);
        prepare_for_level(&mut world, 2, &mut rng, 800, 600);

        let mut player = Player::new(800, 600);
        let level = Level::generate(&mut rng, 800, 600);
        let frames = Frames::default();

        let mut list = DrawList::default();
        let mut orb_draws = 0;
        for _ in 0..600 {
            tick(&mut world, &mut player, &level, &frames);
            collect(&world, &player, &level, &frames, &mut list);
            orb_draws = list
                .items()
                .iter()
                .filter(|d| matches!(d, Draw::Orb { .. }))
                .count();
            if orb_draws > 0 {
                break;
            }
        }
        assert_eq!(orb_draws, 3, "a full volley draws three orbs");
    }
}
