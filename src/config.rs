//! Every gameplay tuning constant in one place, so balance passes touch a
//! single file. All durations are simulation ticks (60 ticks ≈ 1 second).

/// Default scene width in pixels.
pub const SCENE_WIDTH: i32 = 800;
/// Default scene height in pixels.
pub const SCENE_HEIGHT: i32 = 600;

/// Number of looping levels.
pub const LEVEL_COUNT: usize = 6;
/// Doors generated per level.
pub const DOORS_PER_LEVEL: usize = 6;
/// Door hitbox size.
pub const DOOR_SIZE: i32 = 48;
/// Minimum center-to-center slack between generated doors.
pub const DOOR_SPACING: i32 = DOOR_SIZE + 10;
/// Ticks between door animation frames.
pub const DOOR_FRAME_DELAY: u32 = 6;
/// Frames in the door clip.
pub const DOOR_FRAMES: usize = 8;

/// Player hitbox size.
pub const PLAYER_SIZE: i32 = 24;
/// Player movement speed per tick.
pub const PLAYER_SPEED: i32 = 8;
/// Ticks between player animation frames.
pub const PLAYER_FRAME_DELAY: u32 = 8;

/// Monster hitbox size (all archetypes).
pub const MONSTER_SIZE: i32 = 32;
/// Per-archetype speed, indexed by `AttackKind` (stun, warp, shoot).
pub const MONSTER_SPEED: [i32; 3] = [2, 3, 2];
/// Ticks between frames of the automatic monster animation ticker.
pub const MONSTER_FRAME_DELAY: u32 = 8;
/// Corner spawn inset from the scene edges.
pub const CORNER_INSET: i32 = 16;
/// Ticks a freshly prepared monster waits before its first special.
pub const INITIAL_ATTACK_DELAY: u32 = 30;
/// Re-entry gap left when a body wraps to the opposite edge.
pub const WRAP_MARGIN: i32 = 8;

// Stun archetype.
/// Ticks the pulse lasts and the player stays stunned.
pub const STUN_DURATION: u32 = 60;
/// Cooldown between pulses.
pub const STUN_COOLDOWN: u32 = 180;
/// Ring radius at full expansion.
pub const STUN_RING_RADIUS: i32 = 480;
/// Half-width of the annulus that actually stuns.
pub const STUN_RING_THICKNESS: i32 = 10;
/// Ticks per frame of the cast clip.
pub const STUN_CAST_DELAY: u32 = 6;

// Warp archetype.
/// Cooldown between teleports.
pub const WARP_COOLDOWN: u32 = 300;
/// Squared-distance gate: the player must be this close to trigger a warp.
pub const WARP_RANGE: i32 = 320;
/// Clearance past the player at the teleport destination.
pub const SAFE_OFFSET: i32 = 12;
/// Ticks per frame of the vanish clip.
pub const WARP_FRAME_DELAY: u32 = 8;
/// Ticks spent invisible between vanish and reappear.
pub const WARP_WAIT_TICKS: u32 = 80;

// Shoot archetype.
/// Cooldown between volleys.
pub const SHOOT_COOLDOWN: u32 = 120;
/// Squared-distance gate for opening a volley.
pub const SHOOT_RANGE: i32 = 360;
/// Ticks per frame of the summon clip.
pub const SHOOT_FRAME_DELAY: u32 = 6;
/// Aim spread of the volley, degrees either side of the player vector.
pub const VOLLEY_SPREAD_DEG: f32 = 15.0;

// Projectiles.
/// Distance covered per tick.
pub const PROJECTILE_SPEED: f32 = 6.0;
/// Total distance before an orb burns out.
pub const PROJECTILE_RANGE: f32 = 640.0;
/// Draw size; also the square hit area around the orb center and the
/// off-bounds culling margin.
pub const PROJECTILE_SIZE: i32 = 26;
/// Ticks between orb animation frames.
pub const PROJECTILE_FRAME_DELAY: u32 = 5;

/// Digits dealt into each level's puzzle doors.
pub const PUZZLE_POOL: [u32; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
/// How many pool digits sum into the level password.
pub const PASSWORD_DIGITS: usize = 4;
