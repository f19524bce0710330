//! The player: held-direction movement, stun freeze, death playback.
//! Keyboard wiring lives in the frontend; it only flips the input flags.

use crate::body::Body;
use crate::config::{PLAYER_FRAME_DELAY, PLAYER_SIZE, PLAYER_SPEED};

/// What the player sprite is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Run,
    Death,
}

impl PlayerState {
    /// Frames in each clip of the player sheet.
    fn frame_count(self) -> usize {
        match self {
            PlayerState::Idle => 4,
            PlayerState::Run | PlayerState::Death => 8,
        }
    }
}

/// Held-direction flags, set by the embedder's input layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

pub struct Player {
    body: Body,
    state: PlayerState,
    keys: HeldKeys,
    facing_left: bool,
    stun_ticks: u32,
    frame: usize,
    frame_timer: u32,
    death_finished: bool,
}

impl Player {
    pub fn new(bound_w: i32, bound_h: i32) -> Self {
        let mut player = Self {
            body: Body::new(PLAYER_SIZE, PLAYER_SPEED, bound_w, bound_h),
            state: PlayerState::Idle,
            keys: HeldKeys::default(),
            facing_left: false,
            stun_ticks: 0,
            frame: 0,
            frame_timer: 0,
            death_finished: false,
        };
        player.spawn();
        player
    }

    /// Reset to the scene center with cleared input and status.
    pub fn spawn(&mut self) {
        self.body.center_on_bounds();
        self.keys = HeldKeys::default();
        self.facing_left = false;
        self.stun_ticks = 0;
        self.change_state(PlayerState::Idle);
    }

    pub fn update_bounds(&mut self, bound_w: i32, bound_h: i32) {
        self.body.update_bounds(bound_w, bound_h);
    }

    pub fn set_held_keys(&mut self, keys: HeldKeys) {
        if self.state == PlayerState::Death {
            return;
        }
        if keys.left && !keys.right {
            self.facing_left = true;
        } else if keys.right && !keys.left {
            self.facing_left = false;
        }
        self.keys = keys;
    }

    /// Drop all held input; used when a door interaction freezes the scene.
    pub fn stop_immediately(&mut self) {
        self.keys = HeldKeys::default();
        if self.state != PlayerState::Death {
            self.change_state(PlayerState::Idle);
        }
    }

    pub fn update(&mut self) {
        if self.state == PlayerState::Death {
            self.advance_animation();
            return;
        }

        if self.stun_ticks > 0 {
            self.stun_ticks -= 1;
            return;
        }

        let speed = self.body.speed();
        let mut vx = 0;
        let mut vy = 0;
        if self.keys.left && !self.keys.right {
            vx = -speed;
        } else if self.keys.right && !self.keys.left {
            vx = speed;
        }
        if self.keys.up && !self.keys.down {
            vy = -speed;
        } else if self.keys.down && !self.keys.up {
            vy = speed;
        }

        self.body.move_by(vx, vy);

        if vx != 0 || vy != 0 {
            self.change_state(PlayerState::Run);
        } else {
            self.change_state(PlayerState::Idle);
        }
        self.advance_animation();
    }

    /// Freeze the player for `ticks`. Caller is expected to gate on
    /// `is_stunned`; the pulse only stuns once.
    pub fn apply_stun(&mut self, ticks: u32) {
        log::debug!("player stunned for {ticks} ticks");
        self.stun_ticks = ticks;
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_ticks > 0
    }

    pub fn die(&mut self) {
        if self.state == PlayerState::Death {
            return;
        }
        log::info!("player died at ({}, {})", self.body.x(), self.body.y());
        self.change_state(PlayerState::Death);
        self.keys = HeldKeys::default();
    }

    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Death
    }

    pub fn is_death_animation_finished(&self) -> bool {
        self.death_finished
    }

    fn change_state(&mut self, state: PlayerState) {
        if self.state != state {
            self.state = state;
            self.frame = 0;
            self.frame_timer = 0;
            if state != PlayerState::Death {
                self.death_finished = false;
            }
        }
    }

    fn advance_animation(&mut self) {
        let total = self.state.frame_count();
        if total == 0 {
            return;
        }
        self.frame_timer += 1;
        if self.frame_timer < PLAYER_FRAME_DELAY {
            return;
        }
        self.frame_timer = 0;

        if self.state == PlayerState::Death {
            // Death holds its last frame instead of looping.
            if self.frame < total - 1 {
                self.frame += 1;
            } else {
                self.death_finished = true;
            }
        } else {
            self.frame = (self.frame + 1) % total;
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn facing_left(&self) -> bool {
        self.facing_left
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn center_x(&self) -> i32 {
        self.body.center_x()
    }

    pub fn center_y(&self) -> i32 {
        self.body.center_y()
    }

    pub fn size(&self) -> i32 {
        self.body.size()
    }
}
