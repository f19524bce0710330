//! Monster components. The hecs world is the side table: every scrap of
//! per-monster behavior state is a component on the monster's entity, so
//! the attack systems themselves stay stateless and the state dies with
//! the entity.

use crate::anim::CastClock;
use crate::config::{
    INITIAL_ATTACK_DELAY, LEVEL_COUNT, MONSTER_SPEED, SHOOT_COOLDOWN, WARP_COOLDOWN,
};
use crate::projectile::Projectile;

/// Monster archetype; decides which attack system runs the entity.
/// Fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AttackKind {
    Stun = 0,
    Warp = 1,
    Shoot = 2,
}

impl AttackKind {
    pub fn speed(self) -> i32 {
        MONSTER_SPEED[self as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            AttackKind::Stun => "stun",
            AttackKind::Warp => "warp",
            AttackKind::Shoot => "shoot",
        }
    }
}

/// Identity and level gating for one monster.
#[derive(Debug, Clone)]
pub struct Monster {
    pub kind: AttackKind,
    active_levels: [bool; LEVEL_COUNT],
    /// Recomputed from the mask on every level entry.
    pub active: bool,
}

impl Monster {
    pub fn new(kind: AttackKind) -> Self {
        Self {
            kind,
            active_levels: [false; LEVEL_COUNT],
            active: false,
        }
    }

    /// Mark the levels this monster appears in. Out-of-range indices are
    /// dropped silently.
    pub fn set_active_levels(&mut self, levels: &[usize]) {
        for &level in levels {
            if level < LEVEL_COUNT {
                self.active_levels[level] = true;
            }
        }
    }

    pub fn enabled_for(&self, level: usize) -> bool {
        level < LEVEL_COUNT && self.active_levels[level]
    }
}

/// Stun archetype stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StunStage {
    Idle,
    Casting,
    Pulsing,
}

#[derive(Debug, Clone)]
pub struct StunState {
    pub stage: StunStage,
    /// Ticks until the next cast may start.
    pub cooldown: u32,
    /// Ticks left in the running pulse.
    pub pulse_left: u32,
    pub clock: CastClock,
}

impl StunState {
    fn new() -> Self {
        Self {
            stage: StunStage::Idle,
            cooldown: INITIAL_ATTACK_DELAY,
            pulse_left: 0,
            clock: CastClock::default(),
        }
    }

    fn reset(&mut self) {
        self.stage = StunStage::Idle;
        // Short re-arm: the stun archetype opens with a cast soon after
        // the level starts, but never on the very first ticks.
        self.cooldown = INITIAL_ATTACK_DELAY;
        self.pulse_left = 0;
        self.clock.rewind();
    }
}

/// Warp archetype stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarpStage {
    Idle,
    Charge,
    Wait,
    Recover,
}

#[derive(Debug, Clone)]
pub struct WarpState {
    pub stage: WarpStage,
    pub cooldown: u32,
    pub clock: CastClock,
    /// Ticks left holding position between vanish and reappear.
    pub wait_left: u32,
    /// Destination top-left, recomputed every charge tick.
    pub target: Option<(i32, i32)>,
}

impl WarpState {
    fn new() -> Self {
        Self {
            stage: WarpStage::Idle,
            cooldown: WARP_COOLDOWN,
            clock: CastClock::default(),
            wait_left: 0,
            target: None,
        }
    }

    fn reset(&mut self) {
        self.stage = WarpStage::Idle;
        self.cooldown = WARP_COOLDOWN;
        self.clock.rewind();
        self.wait_left = 0;
        self.target = None;
    }
}

/// Shoot archetype stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShootStage {
    Idle,
    Summoning,
}

#[derive(Debug, Clone)]
pub struct ShootState {
    pub stage: ShootStage,
    pub cooldown: u32,
    pub clock: CastClock,
    /// Guards the volley so one cast never fires twice.
    pub fired: bool,
    /// Live orbs cast by this monster. Nobody else touches this list.
    pub projectiles: Vec<Projectile>,
}

impl ShootState {
    fn new() -> Self {
        Self {
            stage: ShootStage::Idle,
            cooldown: SHOOT_COOLDOWN,
            clock: CastClock::default(),
            fired: false,
            projectiles: Vec::new(),
        }
    }

    fn reset(&mut self) {
        self.stage = ShootStage::Idle;
        self.cooldown = SHOOT_COOLDOWN;
        self.clock.rewind();
        self.fired = false;
        self.projectiles.clear();
    }
}

/// Per-monster behavior state, one variant matching the monster's kind.
#[derive(Debug, Clone)]
pub enum AttackState {
    Stun(StunState),
    Warp(WarpState),
    Shoot(ShootState),
}

impl AttackState {
    pub fn for_kind(kind: AttackKind) -> Self {
        match kind {
            AttackKind::Stun => AttackState::Stun(StunState::new()),
            AttackKind::Warp => AttackState::Warp(WarpState::new()),
            AttackKind::Shoot => AttackState::Shoot(ShootState::new()),
        }
    }

    /// Back to the initial stage with the cooldown re-armed; called on
    /// every level entry, whatever stage the machine was left in.
    pub fn reset(&mut self) {
        match self {
            AttackState::Stun(s) => s.reset(),
            AttackState::Warp(s) => s.reset(),
            AttackState::Shoot(s) => s.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STUN_DURATION;

    #[test]
    fn level_mask_ignores_out_of_range() {
        let mut m = Monster::new(AttackKind::Stun);
        m.set_active_levels(&[0, 3, 99]);
        assert!(m.enabled_for(0));
        assert!(m.enabled_for(3));
        assert!(!m.enabled_for(1));
        assert!(!m.enabled_for(99));
    }

    #[test]
    fn reset_rearms_from_any_stage() {
        let mut state = AttackState::for_kind(AttackKind::Stun);
        if let AttackState::Stun(s) = &mut state {
            s.stage = StunStage::Pulsing;
            s.pulse_left = STUN_DURATION / 2;
            s.cooldown = 0;
        }
        state.reset();
        let AttackState::Stun(s) = &state else {
            panic!("kind changed under reset");
        };
        assert_eq!(s.stage, StunStage::Idle);
        assert_eq!(s.pulse_left, 0);
        assert!(s.cooldown > 0, "a fresh spawn must not attack instantly");
    }

    #[test]
    fn shoot_reset_clears_the_volley() {
        let mut state = AttackState::for_kind(AttackKind::Shoot);
        if let AttackState::Shoot(s) = &mut state {
            s.fired = true;
            s.projectiles.push(Projectile::new(
                glam::Vec2::new(1.0, 1.0),
                glam::Vec2::X,
            ));
        }
        state.reset();
        let AttackState::Shoot(s) = &state else {
            panic!("kind changed under reset");
        };
        assert!(!s.fired);
        assert!(s.projectiles.is_empty());
        assert_eq!(s.cooldown, SHOOT_COOLDOWN);
    }
}
