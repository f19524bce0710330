//! Warp archetype: chase, vanish in place, reappear just past the player,
//! then play the vanish clip backward to return.
//!
//! `IDLE -> CHARGE -> WAIT -> RECOVER -> IDLE`

use glam::Vec2;

use crate::anim::{AnimState, Clip, Frames};
use crate::body::Body;
use crate::config::{SAFE_OFFSET, WARP_COOLDOWN, WARP_FRAME_DELAY, WARP_RANGE, WARP_WAIT_TICKS};
use crate::ecs::components::{WarpStage, WarpState};
use crate::level::Level;
use crate::overlay::Ring;
use crate::player::Player;

pub fn attack(
    body: &mut Body,
    anim: &mut AnimState,
    state: &mut WarpState,
    player: &mut Player,
    _level: &Level,
    frames: &Frames,
) {
    match state.stage {
        WarpStage::Idle => {
            anim.release();
            anim.set_clip(Clip::Idle);
            body.follow(player.body().x(), player.body().y());

            if state.cooldown > 0 {
                state.cooldown -= 1;
                return;
            }

            let dist_sq = body.distance_squared_to(player.center_x(), player.center_y());
            if dist_sq > WARP_RANGE * WARP_RANGE {
                return;
            }

            log::debug!("warp monster charges a teleport");
            state.stage = WarpStage::Charge;
            state.clock.rewind();
            state.target = Some(teleport_target(body, player));
            body.set_velocity(0, 0);
            anim.drive(Clip::Vanish, 0);
        }
        WarpStage::Charge => {
            body.set_velocity(0, 0);
            // The player keeps moving while the charge plays out, so the
            // destination tracks them until the final frame commits it.
            state.target = Some(teleport_target(body, player));

            let total = frames.count(Clip::Vanish);
            if state.clock.advance(total, WARP_FRAME_DELAY) {
                let (tx, ty) = state.target.take().unwrap_or((body.x(), body.y()));
                body.set_position(tx, ty);
                log::debug!("warp monster reappears at ({tx}, {ty})");

                state.stage = WarpStage::Wait;
                state.wait_left = WARP_WAIT_TICKS;
                state.clock.seat(total.saturating_sub(1));
                anim.drive(Clip::Vanish, state.clock.frame);
            } else {
                anim.drive(Clip::Vanish, state.clock.frame);
            }
        }
        WarpStage::Wait => {
            body.set_velocity(0, 0);
            if state.wait_left > 0 {
                state.wait_left -= 1;
                return;
            }
            state.stage = WarpStage::Recover;
        }
        WarpStage::Recover => {
            body.set_velocity(0, 0);
            if state.clock.advance_reverse(WARP_FRAME_DELAY) {
                state.stage = WarpStage::Idle;
                state.cooldown = WARP_COOLDOWN;
                anim.release();
                anim.set_clip(Clip::Idle);
            } else {
                anim.drive(Clip::Vanish, state.clock.frame);
            }
        }
    }
}

/// Destination top-left: past the player along the monster-to-player line,
/// clear of both hitboxes plus `SAFE_OFFSET`, clamped to the scene.
pub fn teleport_target(body: &Body, player: &Player) -> (i32, i32) {
    let to_player = Vec2::new(
        (player.center_x() - body.center_x()) as f32,
        (player.center_y() - body.center_y()) as f32,
    );
    let dir = to_player.try_normalize().unwrap_or(Vec2::X);

    let clearance = (player.size() + body.size() + SAFE_OFFSET) as f32;
    let cx = player.center_x() as f32 + dir.x * clearance;
    let cy = player.center_y() as f32 + dir.y * clearance;

    let half = body.size() / 2;
    let x = (cx.round() as i32 - half).clamp(0, body.bound_w() - body.size());
    let y = (cy.round() as i32 - half).clamp(0, body.bound_h() - body.size());
    (x, y)
}

/// Warning cue while charging: a ring swelling over the destination.
pub fn ring(body: &Body, state: &WarpState, frames: &Frames) -> Option<Ring> {
    if state.stage != WarpStage::Charge {
        return None;
    }
    let (tx, ty) = state.target?;
    let progress = state
        .clock
        .progress(frames.count(Clip::Vanish), WARP_FRAME_DELAY);
    let base = body.size() + 2 * SAFE_OFFSET;
    Some(Ring {
        cx: tx + body.size() / 2,
        cy: ty + body.size() / 2,
        radius: (base as f32 * (0.6 + 0.4 * progress)) as i32,
        thickness: 6,
        alpha: 0.65,
    })
}
