//! Monster animation plumbing.
//!
//! Two drivers share the same display state: an automatic ticker that loops
//! the current clip, and the attack behaviors, which seize the state
//! (`drive`) to pin specific frames to world events: a teleport lands on
//! the vanish clip's last frame, a volley leaves on the summon clip's last
//! frame. `CastClock` is the behaviors' manual stepper.

use crate::config::MONSTER_FRAME_DELAY;

/// Monster sprite clips, sliced from the shared sheet by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    /// Looping idle/walk cycle.
    Idle,
    /// Stun cast windup.
    Skill,
    /// Shoot cast windup.
    Summon,
    /// Projectile orb loop.
    Orb,
    /// Warp disappearance; played forward to vanish, in reverse to return.
    Vanish,
}

/// Frame counts per clip: the lookup behaviors use to size their
/// manually-driven playback. Counts mirror the shipped sheets; a clip the
/// loader failed to slice reports zero frames and finishes instantly.
#[derive(Debug, Clone)]
pub struct Frames {
    idle: usize,
    skill: usize,
    summon: usize,
    orb: usize,
    vanish: usize,
}

impl Default for Frames {
    fn default() -> Self {
        Self {
            idle: 4,
            skill: 10,
            summon: 10,
            orb: 4,
            vanish: 10,
        }
    }
}

impl Frames {
    pub fn count(&self, clip: Clip) -> usize {
        match clip {
            Clip::Idle => self.idle,
            Clip::Skill => self.skill,
            Clip::Summon => self.summon,
            Clip::Orb => self.orb,
            Clip::Vanish => self.vanish,
        }
    }

    /// Override one clip's frame count (asset-load fallback, tests).
    pub fn set_count(&mut self, clip: Clip, count: usize) {
        match clip {
            Clip::Idle => self.idle = count,
            Clip::Skill => self.skill = count,
            Clip::Summon => self.summon = count,
            Clip::Orb => self.orb = count,
            Clip::Vanish => self.vanish = count,
        }
    }
}

/// Who is advancing the displayed frame this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drive {
    /// The generic ticker loops the clip.
    Auto,
    /// A behavior owns the frame; the ticker keeps its hands off.
    Driven,
}

/// Displayed animation state of one monster.
#[derive(Debug, Clone)]
pub struct AnimState {
    pub clip: Clip,
    pub frame: usize,
    timer: u32,
    mode: Drive,
}

impl Default for AnimState {
    fn default() -> Self {
        Self {
            clip: Clip::Idle,
            frame: 0,
            timer: 0,
            mode: Drive::Auto,
        }
    }
}

impl AnimState {
    /// Switch clips, rewinding playback. No-op when already showing `clip`.
    pub fn set_clip(&mut self, clip: Clip) {
        if self.clip == clip {
            return;
        }
        self.clip = clip;
        self.frame = 0;
        self.timer = 0;
    }

    /// Behavior takeover: show exactly `frame` of `clip` this tick.
    pub fn drive(&mut self, clip: Clip, frame: usize) {
        self.set_clip(clip);
        self.frame = frame;
        self.mode = Drive::Driven;
    }

    /// Hand the clip back to the automatic ticker.
    pub fn release(&mut self) {
        self.mode = Drive::Auto;
    }

    pub fn is_driven(&self) -> bool {
        self.mode == Drive::Driven
    }

    /// Looping advance at the generic frame delay. Skipped while driven.
    pub fn auto_advance(&mut self, frames: &Frames) {
        if self.mode == Drive::Driven {
            return;
        }
        let total = frames.count(self.clip);
        if total == 0 {
            return;
        }
        self.timer += 1;
        if self.timer >= MONSTER_FRAME_DELAY {
            self.timer = 0;
            self.frame = (self.frame + 1) % total;
        }
    }
}

/// Manual frame stepper for behavior-driven clips. One per attack state;
/// the behavior copies `frame` into the monster's `AnimState` each tick.
#[derive(Debug, Clone, Default)]
pub struct CastClock {
    pub frame: usize,
    timer: u32,
    finished: bool,
}

impl CastClock {
    pub fn rewind(&mut self) {
        self.frame = 0;
        self.timer = 0;
        self.finished = false;
    }

    /// Park the clock on a specific frame (reverse playback starts at the
    /// clip's tail).
    pub fn seat(&mut self, frame: usize) {
        self.frame = frame;
        self.timer = 0;
        self.finished = false;
    }

    /// Step forward every `delay` ticks, holding the last frame. Returns
    /// true once the clip is done. A zero-frame clip is done immediately.
    pub fn advance(&mut self, total_frames: usize, delay: u32) -> bool {
        if total_frames == 0 || self.finished {
            self.finished = true;
            return true;
        }
        self.timer += 1;
        if self.timer < delay {
            return false;
        }
        self.timer = 0;
        self.frame += 1;
        if self.frame < total_frames {
            return false;
        }
        self.frame = total_frames - 1;
        self.finished = true;
        true
    }

    /// Step backward every `delay` ticks until frame 0.
    pub fn advance_reverse(&mut self, delay: u32) -> bool {
        if self.finished {
            return true;
        }
        self.timer += 1;
        if self.timer < delay {
            return false;
        }
        self.timer = 0;
        if self.frame == 0 {
            self.finished = true;
            return true;
        }
        self.frame -= 1;
        if self.frame == 0 {
            self.finished = true;
        }
        self.finished
    }

    /// Fractional playback position in `[0, 1]`, smooth across the
    /// inter-frame delay. Drives the warp warning ring.
    pub fn progress(&self, total_frames: usize, delay: u32) -> f32 {
        if total_frames == 0 {
            return 1.0;
        }
        let p = (self.frame as f32 + self.timer as f32 / delay.max(1) as f32)
            / total_frames as f32;
        p.clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_advance_loops_at_frame_delay() {
        let frames = Frames::default();
        let mut anim = AnimState::default();
        for _ in 0..MONSTER_FRAME_DELAY {
            anim.auto_advance(&frames);
        }
        assert_eq!(anim.frame, 1);

        // 4-frame idle clip wraps back to 0.
        for _ in 0..MONSTER_FRAME_DELAY * 3 {
            anim.auto_advance(&frames);
        }
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn driven_state_freezes_the_ticker() {
        let frames = Frames::default();
        let mut anim = AnimState::default();
        anim.drive(Clip::Skill, 3);
        for _ in 0..100 {
            anim.auto_advance(&frames);
        }
        assert_eq!(anim.frame, 3);
        assert_eq!(anim.clip, Clip::Skill);

        anim.release();
        for _ in 0..MONSTER_FRAME_DELAY {
            anim.auto_advance(&frames);
        }
        assert_eq!(anim.frame, 4);
    }

    #[test]
    fn set_clip_is_idempotent_mid_playback() {
        let mut anim = AnimState::default();
        anim.drive(Clip::Summon, 5);
        anim.set_clip(Clip::Summon);
        assert_eq!(anim.frame, 5);

        anim.set_clip(Clip::Idle);
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn cast_clock_finishes_after_total_times_delay_ticks() {
        let mut clock = CastClock::default();
        let mut ticks = 0;
        while !clock.advance(10, 6) {
            ticks += 1;
            assert!(ticks < 1000, "clock never finished");
        }
        // 10 frames at 6 ticks each; the finishing tick is the 60th.
        assert_eq!(ticks + 1, 60);
        assert_eq!(clock.frame, 9);
    }

    #[test]
    fn zero_frame_clip_is_instantly_finished() {
        let mut clock = CastClock::default();
        assert!(clock.advance(0, 6));
        assert!(clock.is_finished());
    }

    #[test]
    fn reverse_playback_walks_back_to_zero() {
        let mut clock = CastClock::default();
        clock.seat(9);
        let mut ticks = 0;
        while !clock.advance_reverse(8) {
            ticks += 1;
            assert!(ticks < 1000, "reverse never finished");
        }
        assert_eq!(clock.frame, 0);
    }

    #[test]
    fn progress_spans_zero_to_one() {
        let mut clock = CastClock::default();
        assert_eq!(clock.progress(10, 8), 0.0);
        clock.seat(5);
        let mid = clock.progress(10, 8);
        assert!((mid - 0.5).abs() < 1e-6);
        clock.seat(10);
        assert_eq!(clock.progress(10, 8), 1.0);
    }
}
