//! Stun archetype: chase, stop to cast, then emit an expanding ring that
//! freezes the player caught inside its band.
//!
//! `IDLE -> CASTING -> PULSING -> IDLE`

use crate::anim::{AnimState, Clip, Frames};
use crate::body::Body;
use crate::config::{
    STUN_CAST_DELAY, STUN_COOLDOWN, STUN_DURATION, STUN_RING_RADIUS, STUN_RING_THICKNESS,
};
use crate::ecs::components::{StunStage, StunState};
use crate::level::Level;
use crate::overlay::Ring;
use crate::player::Player;

pub fn attack(
    body: &mut Body,
    anim: &mut AnimState,
    state: &mut StunState,
    player: &mut Player,
    _level: &Level,
    frames: &Frames,
) {
    match state.stage {
        StunStage::Idle => {
            anim.release();
            anim.set_clip(Clip::Idle);

            if state.cooldown > 0 {
                state.cooldown -= 1;
                body.follow(player.body().x(), player.body().y());
                return;
            }

            log::debug!("stun monster starts casting");
            state.stage = StunStage::Casting;
            state.clock.rewind();
            body.set_velocity(0, 0);
            anim.drive(Clip::Skill, 0);
        }
        StunStage::Casting => {
            body.set_velocity(0, 0);
            let total = frames.count(Clip::Skill);
            if state.clock.advance(total, STUN_CAST_DELAY) {
                state.stage = StunStage::Pulsing;
                state.pulse_left = STUN_DURATION;
                anim.release();
                anim.set_clip(Clip::Idle);
            } else {
                anim.drive(Clip::Skill, state.clock.frame);
            }
        }
        StunStage::Pulsing => {
            body.set_velocity(0, 0);
            state.pulse_left -= 1;
            try_stun(body, state, player);

            if state.pulse_left == 0 {
                state.stage = StunStage::Idle;
                state.cooldown = STUN_COOLDOWN;
            }
        }
    }
}

/// Stun the player if their center sits inside the ring band this tick.
/// A player already stunned is left alone, so one pulse lands once.
fn try_stun(body: &Body, state: &StunState, player: &mut Player) {
    if player.is_stunned() {
        return;
    }
    let radius = current_radius(body.size(), state.pulse_left);
    let inner = (radius - STUN_RING_THICKNESS).max(0);
    let outer = radius + STUN_RING_THICKNESS;
    let dist_sq = body.distance_squared_to(player.center_x(), player.center_y());
    if dist_sq < inner * inner || dist_sq > outer * outer {
        return;
    }
    player.apply_stun(STUN_DURATION);
}

/// Ring radius for the given remaining pulse ticks: starts just past the
/// monster's edge and expands linearly to `STUN_RING_RADIUS`.
pub fn current_radius(monster_size: i32, pulse_left: u32) -> i32 {
    let progress = pulse_progress(pulse_left);
    let base = monster_size / 2 + 6;
    base + ((STUN_RING_RADIUS - base) as f32 * progress) as i32
}

fn pulse_progress(pulse_left: u32) -> f32 {
    1.0 - pulse_left as f32 / STUN_DURATION as f32
}

/// The pulse overlay, while one is running. Alpha fades out as the ring
/// expands.
pub fn ring(body: &Body, state: &StunState) -> Option<Ring> {
    if state.pulse_left == 0 {
        return None;
    }
    let progress = pulse_progress(state.pulse_left);
    Some(Ring {
        cx: body.center_x(),
        cy: body.center_y(),
        radius: current_radius(body.size(), state.pulse_left),
        thickness: STUN_RING_THICKNESS,
        alpha: (0.6 * (1.0 - progress)).clamp(0.0, 0.6),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{INITIAL_ATTACK_DELAY, MONSTER_SIZE};
    use crate::ecs::components::{AttackKind, AttackState};

    fn fixtures() -> (Body, AnimState, StunState, Player, Level, Frames) {
        let body = Body::new(MONSTER_SIZE, AttackKind::Stun.speed(), 800, 600);
        let state = match AttackState::for_kind(AttackKind::Stun) {
            AttackState::Stun(s) => s,
            _ => unreachable!(),
        };
        let mut rng = fastrand::Rng::with_seed(3);
        (
            body,
            AnimState::default(),
            state,
            Player::new(800, 600),
            Level::generate(&mut rng, 800, 600),
            Frames::default(),
        )
    }

    fn step(
        body: &mut Body,
        anim: &mut AnimState,
        state: &mut StunState,
        player: &mut Player,
        level: &Level,
        frames: &Frames,
    ) {
        attack(body, anim, state, player, level, frames);
        body.apply_velocity();
        body.clamp();
    }

    #[test]
    fn follows_until_cooldown_elapses() {
        let (mut body, mut anim, mut state, mut player, level, frames) = fixtures();
        body.set_position(0, 0);
        player.body_mut().set_position(400, 300);

        step(&mut body, &mut anim, &mut state, &mut player, &level, &frames);
        assert_eq!(state.stage, StunStage::Idle);
        assert_eq!((body.x(), body.y()), (2, 2));
    }

    #[test]
    fn cast_runs_full_clip_before_pulsing() {
        let (mut body, mut anim, mut state, mut player, level, frames) = fixtures();
        state.cooldown = 0;

        step(&mut body, &mut anim, &mut state, &mut player, &level, &frames);
        assert_eq!(state.stage, StunStage::Casting);
        assert!(anim.is_driven());
        assert_eq!(anim.clip, Clip::Skill);

        // 10 cast frames at STUN_CAST_DELAY ticks each.
        for _ in 0..(10 * STUN_CAST_DELAY) {
            step(&mut body, &mut anim, &mut state, &mut player, &level, &frames);
        }
        assert_eq!(state.stage, StunStage::Pulsing);
        assert!(!anim.is_driven());
    }

    #[test]
    fn radius_matches_the_midpoint_scenario() {
        // Monster size 32: base = 22; halfway through a 60-tick pulse the
        // ring sits at 22 + (480 - 22) * 0.5 = 251.
        assert_eq!(current_radius(32, STUN_DURATION / 2), 251);
        assert_eq!(current_radius(32, STUN_DURATION), 22);
        assert_eq!(current_radius(32, 0), STUN_RING_RADIUS);
    }

    #[test]
    fn pulse_stuns_only_inside_the_band() {
        let (mut body, mut anim, mut state, mut player, level, frames) = fixtures();
        body.set_position(0, 0);
        state.stage = StunStage::Pulsing;
        state.pulse_left = STUN_DURATION;

        // After one pulsing tick pulse_left = 59, radius = 29. Park the
        // player's center just inside the outer edge of the band.
        let radius = current_radius(MONSTER_SIZE, STUN_DURATION - 1);
        let player_size = player.size();
        player
            .body_mut()
            .set_position(body.center_x() + radius - player_size / 2, 0);
        let expected_in_band = {
            let d = body.distance_squared_to(
                body.center_x() + radius,
                player.center_y(),
            );
            let inner = radius - STUN_RING_THICKNESS;
            let outer = radius + STUN_RING_THICKNESS;
            d >= inner * inner && d <= outer * outer
        };

        step(&mut body, &mut anim, &mut state, &mut player, &level, &frames);
        assert_eq!(player.is_stunned(), expected_in_band);
        assert!(player.is_stunned());
    }

    #[test]
    fn pulse_never_stuns_twice() {
        let (mut body, mut anim, mut state, mut player, level, frames) = fixtures();
        body.set_position(0, 0);
        state.stage = StunStage::Pulsing;
        state.pulse_left = STUN_DURATION;

        // Park the player's center 100px out: the band sweeps across it
        // mid-pulse, and the stun outlasts the rest of the pulse.
        let player_size = player.size();
        player.body_mut().set_position(
            body.center_x() + 100 - player_size / 2,
            body.center_y() - player_size / 2,
        );

        let mut stun_applications = 0;
        let mut was_stunned = false;
        while state.stage == StunStage::Pulsing {
            step(&mut body, &mut anim, &mut state, &mut player, &level, &frames);
            if player.is_stunned() && !was_stunned {
                stun_applications += 1;
            }
            was_stunned = player.is_stunned();
        }
        assert_eq!(stun_applications, 1);
    }

    #[test]
    fn pulse_end_rearms_full_cooldown() {
        let (mut body, mut anim, mut state, mut player, level, frames) = fixtures();
        state.stage = StunStage::Pulsing;
        state.pulse_left = 1;
        player.body_mut().set_position(700, 500);

        step(&mut body, &mut anim, &mut state, &mut player, &level, &frames);
        assert_eq!(state.stage, StunStage::Idle);
        assert_eq!(state.cooldown, STUN_COOLDOWN);
        assert!(state.cooldown > INITIAL_ATTACK_DELAY);
    }

    #[test]
    fn ring_overlay_fades_with_progress() {
        let (body, _, mut state, _, _, _) = fixtures();
        state.pulse_left = 0;
        assert!(ring(&body, &state).is_none());

        state.pulse_left = STUN_DURATION; // progress 0
        let fresh = ring(&body, &state).unwrap();
        assert!((fresh.alpha - 0.6).abs() < 1e-6);

        state.pulse_left = 1; // nearly done
        let faded = ring(&body, &state).unwrap();
        assert!(faded.alpha < fresh.alpha);
        assert!(faded.radius > fresh.radius);
    }
}
