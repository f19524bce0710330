use glam::Vec2;

use crate::config::{
    PROJECTILE_FRAME_DELAY, PROJECTILE_RANGE, PROJECTILE_SIZE, PROJECTILE_SPEED,
};
use crate::player::Player;

/// One energy orb in flight. Continuous position, fixed heading, culled on
/// range, scene exit, or player contact. Animates on its own clock,
/// independent of whatever the monster that cast it is doing.
#[derive(Debug, Clone)]
pub struct Projectile {
    pos: Vec2,
    dir: Vec2,
    traveled: f32,
    active: bool,
    frame: usize,
    frame_timer: u32,
}

impl Projectile {
    /// Spawn at a point heading along `dir`. A degenerate direction (caster
    /// and target at the same spot) falls back to due east.
    pub fn new(pos: Vec2, dir: Vec2) -> Self {
        let dir = if dir.length_squared() < 1e-8 {
            Vec2::X
        } else {
            dir.normalize()
        };
        Self {
            pos,
            dir,
            traveled: 0.0,
            active: true,
            frame: 0,
            frame_timer: 0,
        }
    }

    /// Advance one tick. `orb_frames` sizes the looping orb clip.
    pub fn update(&mut self, player: &mut Player, bound_w: i32, bound_h: i32, orb_frames: usize) {
        if !self.active {
            return;
        }

        self.pos += self.dir * PROJECTILE_SPEED;
        self.traveled += PROJECTILE_SPEED;

        if self.traveled >= PROJECTILE_RANGE {
            self.active = false;
            return;
        }

        let margin = PROJECTILE_SIZE as f32;
        if self.pos.x < -margin
            || self.pos.y < -margin
            || self.pos.x > bound_w as f32 + margin
            || self.pos.y > bound_h as f32 + margin
        {
            self.active = false;
            return;
        }

        if !player.is_dead() && self.hits(player) {
            player.die();
            self.active = false;
            return;
        }

        self.frame_timer += 1;
        if self.frame_timer >= PROJECTILE_FRAME_DELAY {
            self.frame_timer = 0;
            self.frame = (self.frame + 1) % orb_frames.max(1);
        }
    }

    /// AABB test: the `PROJECTILE_SIZE` square around the orb center
    /// against the player hitbox.
    fn hits(&self, player: &Player) -> bool {
        let half = PROJECTILE_SIZE as f32 / 2.0;
        let px = player.body().x() as f32;
        let py = player.body().y() as f32;
        let size = player.size() as f32;
        self.pos.x + half > px
            && self.pos.x - half < px + size
            && self.pos.y + half > py
            && self.pos.y - half < py + size
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}
