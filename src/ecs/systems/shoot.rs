//! Shoot archetype: chase, stop to summon, release a three-orb volley at
//! the player, keep simulating orbs already in flight whatever else the
//! monster is doing.
//!
//! `IDLE -> SUMMONING -> IDLE`

use glam::Vec2;

use crate::anim::{AnimState, Clip, Frames};
use crate::body::Body;
use crate::config::{SHOOT_COOLDOWN, SHOOT_FRAME_DELAY, SHOOT_RANGE, VOLLEY_SPREAD_DEG};
use crate::ecs::components::{ShootStage, ShootState};
use crate::level::Level;
use crate::player::Player;
use crate::projectile::Projectile;

pub fn attack(
    body: &mut Body,
    anim: &mut AnimState,
    state: &mut ShootState,
    player: &mut Player,
    _level: &Level,
    frames: &Frames,
) {
    // Orbs fly on their own schedule; a monster deep in cooldown still
    // has live shots to advance and prune.
    update_projectiles(body, state, player, frames);

    match state.stage {
        ShootStage::Idle => {
            anim.release();
            anim.set_clip(Clip::Idle);
            body.follow(player.body().x(), player.body().y());

            if state.cooldown > 0 {
                state.cooldown -= 1;
                return;
            }

            let dist_sq = body.distance_squared_to(player.center_x(), player.center_y());
            if dist_sq > SHOOT_RANGE * SHOOT_RANGE {
                return;
            }

            log::debug!("shoot monster starts summoning");
            state.stage = ShootStage::Summoning;
            state.fired = false;
            state.clock.rewind();
            body.set_velocity(0, 0);
            anim.drive(Clip::Summon, 0);
        }
        ShootStage::Summoning => {
            body.set_velocity(0, 0);
            let total = frames.count(Clip::Summon);

            // The volley leaves on the last cast frame, exactly once.
            if !state.fired && state.clock.frame >= total.saturating_sub(1) {
                fire_volley(body, state, player);
                state.fired = true;
            }

            if state.clock.advance(total, SHOOT_FRAME_DELAY) {
                state.stage = ShootStage::Idle;
                state.cooldown = SHOOT_COOLDOWN;
                anim.release();
                anim.set_clip(Clip::Idle);
            } else {
                anim.drive(Clip::Summon, state.clock.frame);
            }
        }
    }
}

fn update_projectiles(body: &Body, state: &mut ShootState, player: &mut Player, frames: &Frames) {
    let orb_frames = frames.count(Clip::Orb);
    for orb in &mut state.projectiles {
        orb.update(player, body.bound_w(), body.bound_h(), orb_frames);
    }
    state.projectiles.retain(Projectile::is_active);
}

/// Three orbs from the monster's center, fanned around the line to the
/// player's center.
fn fire_volley(body: &Body, state: &mut ShootState, player: &Player) {
    let origin = Vec2::new(body.center_x() as f32, body.center_y() as f32);
    let base = (player.center_y() as f32 - origin.y).atan2(player.center_x() as f32 - origin.x);

    for offset in [-VOLLEY_SPREAD_DEG, 0.0, VOLLEY_SPREAD_DEG] {
        let angle = base + offset.to_radians();
        state
            .projectiles
            .push(Projectile::new(origin, Vec2::from_angle(angle)));
    }
    log::debug!("volley fired from ({}, {})", body.center_x(), body.center_y());
}
