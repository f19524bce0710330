//! Level context: the six doors, their randomized layout, and the puzzle
//! password. Passed into the attack dispatch as the opaque scene context.

use crate::body::{Body, Rect};
use crate::config::{
    DOORS_PER_LEVEL, DOOR_FRAMES, DOOR_FRAME_DELAY, DOOR_SIZE, DOOR_SPACING, PASSWORD_DIGITS,
    PUZZLE_POOL,
};

/// What stepping into a door does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorKind {
    /// Next level.
    Advance,
    /// Previous level.
    Back,
    /// Shows one digit of the level password.
    Puzzle,
}

/// A door slot. Position is stored as a ratio of the available span so a
/// scene resize keeps the layout instead of re-rolling it.
#[derive(Debug, Clone)]
pub struct Door {
    kind: DoorKind,
    x_ratio: f64,
    y_ratio: f64,
    puzzle_digit: Option<u32>,
    tick: u32,
    frame: usize,
}

impl Door {
    fn new(kind: DoorKind, x: i32, y: i32, scene_w: i32, scene_h: i32) -> Self {
        let span_x = (scene_w - DOOR_SIZE).max(1) as f64;
        let span_y = (scene_h - DOOR_SIZE).max(1) as f64;
        Self {
            kind,
            x_ratio: (x as f64 / span_x).clamp(0.0, 1.0),
            y_ratio: (y as f64 / span_y).clamp(0.0, 1.0),
            puzzle_digit: None,
            tick: 0,
            frame: 0,
        }
    }

    pub fn kind(&self) -> DoorKind {
        self.kind
    }

    pub fn puzzle_digit(&self) -> Option<u32> {
        self.puzzle_digit
    }

    pub fn x(&self, scene_w: i32) -> i32 {
        let span = (scene_w - DOOR_SIZE).max(0) as f64;
        (self.x_ratio * span).round() as i32
    }

    pub fn y(&self, scene_h: i32) -> i32 {
        let span = (scene_h - DOOR_SIZE).max(0) as f64;
        (self.y_ratio * span).round() as i32
    }

    pub fn rect(&self, scene_w: i32, scene_h: i32) -> Rect {
        Rect::square(self.x(scene_w), self.y(scene_h), DOOR_SIZE)
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    fn update_animation(&mut self) {
        self.tick += 1;
        if self.tick >= DOOR_FRAME_DELAY {
            self.tick = 0;
            self.frame = (self.frame + 1) % DOOR_FRAMES;
        }
    }
}

/// Result of the player touching a door.
#[derive(Debug, Clone, Copy)]
pub struct DoorHit {
    pub index: usize,
    pub kind: DoorKind,
    pub puzzle_digit: Option<u32>,
}

pub struct Level {
    doors: Vec<Door>,
    password: u32,
    width: i32,
    height: i32,
}

impl Level {
    /// Roll a fresh door layout and password for the given scene size.
    pub fn generate(rng: &mut fastrand::Rng, width: i32, height: i32) -> Self {
        // Deal four distinct digits; their sum is the level password.
        let mut pool = PUZZLE_POOL.to_vec();
        rng.shuffle(&mut pool);
        let mut dealt: Vec<u32> = pool[..PASSWORD_DIGITS.min(pool.len())].to_vec();
        let password = dealt.iter().sum();
        rng.shuffle(&mut dealt);

        // One advance, one back, puzzles in the remaining slots.
        let mut kinds = vec![DoorKind::Advance, DoorKind::Back];
        while kinds.len() < DOORS_PER_LEVEL {
            kinds.push(DoorKind::Puzzle);
        }
        rng.shuffle(&mut kinds);

        let spots = place_doors(rng, width, height);
        let mut digits = dealt.into_iter();
        let doors = kinds
            .into_iter()
            .zip(spots)
            .map(|(kind, (x, y))| {
                let mut door = Door::new(kind, x, y, width, height);
                if kind == DoorKind::Puzzle {
                    door.puzzle_digit = digits.next();
                }
                door
            })
            .collect();

        log::debug!("level generated: {width}x{height}, password {password:02}");
        Self {
            doors,
            password,
            width,
            height,
        }
    }

    /// Adopt a new scene size; door ratios keep their relative layout.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn password(&self) -> u32 {
        self.password
    }

    pub fn update_animations(&mut self) {
        for door in &mut self.doors {
            door.update_animation();
        }
    }

    /// First door the body overlaps, if any.
    pub fn door_hit(&self, body: &Body) -> Option<DoorHit> {
        self.doors
            .iter()
            .enumerate()
            .find(|(_, door)| body.intersects(door.rect(self.width, self.height)))
            .map(|(index, door)| DoorHit {
                index,
                kind: door.kind,
                puzzle_digit: door.puzzle_digit,
            })
    }

    /// Accepts the zero-padded two-digit form or the bare number.
    pub fn validate_password(&self, input: &str) -> bool {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return false;
        }
        if trimmed == format!("{:02}", self.password) {
            return true;
        }
        trimmed.parse::<u32>() == Ok(self.password)
    }

    /// Shove a body out of the given door after an interaction, so it does
    /// not immediately re-trigger.
    pub fn push_away(&self, body: &mut Body, index: usize) {
        if let Some(door) = self.doors.get(index) {
            body.push_outside(door.rect(self.width, self.height));
        }
    }
}

/// Rejection-sample door positions with a minimum separation, keeping the
/// top HUD band and scene edges clear. Bounded attempts; the deterministic
/// diagonal fallback only fires on absurdly small scenes.
fn place_doors(rng: &mut fastrand::Rng, width: i32, height: i32) -> Vec<(i32, i32)> {
    let mut spots: Vec<(i32, i32)> = Vec::with_capacity(DOORS_PER_LEVEL);
    let min_sep_sq = DOOR_SPACING * DOOR_SPACING;
    let span_x = (width - 100 - DOOR_SIZE).max(1);
    let span_y = (height - 150 - DOOR_SIZE).max(1);

    let mut attempts = 0;
    while spots.len() < DOORS_PER_LEVEL && attempts < 5000 {
        attempts += 1;
        let px = 50 + rng.i32(0..span_x);
        let py = 80 + rng.i32(0..span_y);
        let clear = spots.iter().all(|&(sx, sy)| {
            let dx = px - sx;
            let dy = py - sy;
            dx * dx + dy * dy >= min_sep_sq
        });
        if clear {
            spots.push((px, py));
        }
    }

    while spots.len() < DOORS_PER_LEVEL {
        let i = spots.len() as i32;
        let fx = (60 * i).clamp(0, (width - DOOR_SIZE).max(0));
        let fy = (100 + 40 * i).clamp(0, (height - DOOR_SIZE).max(0));
        spots.push((fx, fy));
    }

    spots
}
