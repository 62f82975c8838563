//! Simulation constants and tuning defaults.
//!
//! Distances are meters, times are seconds, angles are radians unless noted.
//! Every value here is the default for the matching field of
//! [`GameTuning`](crate::tuning::GameTuning).

// --- Frame timing ---

/// Upper bound on a single frame delta. Longer stalls are integrated as this.
pub const MAX_FRAME_DT: f64 = 0.1;

// --- Arena ---

/// Half-extent of the square play area on both horizontal axes.
pub const ARENA_SIZE: f64 = 50.0;

/// Cave ceiling height. Only used for renderer placement hints.
pub const CAVE_HEIGHT: f64 = 20.0;

// --- Player ---

/// Eye height of the player camera above the ground plane.
pub const PLAYER_HEIGHT: f64 = 1.7;

/// Collision radius used for arena clamping.
pub const PLAYER_RADIUS: f64 = 0.4;

pub const WALK_SPEED: f64 = 5.0;
pub const SPRINT_SPEED: f64 = 9.0;

pub const PLAYER_MAX_HEALTH: f64 = 100.0;

/// Seconds without damage before health starts regenerating.
pub const PLAYER_HEALTH_REGEN_DELAY: f64 = 5.0;

/// Health regenerated per second once regen is active.
pub const PLAYER_HEALTH_REGEN_RATE: f64 = 10.0;

/// Radians of look rotation per input pixel.
pub const MOUSE_SENSITIVITY: f64 = 0.002;

/// Horizontal velocity multiplier applied per tick with no movement intent.
/// Frame-dependent on purpose.
pub const VELOCITY_DAMPING: f64 = 0.85;

/// Hip-fire field of view (degrees).
pub const DEFAULT_FOV: f64 = 75.0;

/// Aim-down-sights field of view (degrees).
pub const ADS_FOV: f64 = 45.0;

pub const FOV_LERP_SPEED: f64 = 12.0;

// --- Weapon ---

/// Minimum seconds between two shots.
pub const FIRE_RATE: f64 = 0.1;

/// Damage dealt by one hit-scan hit.
pub const DAMAGE: f64 = 25.0;

/// Magazine capacity.
pub const MAX_AMMO: u32 = 30;

/// Reserve rounds at spawn. Also the reserve ceiling.
pub const RESERVE_AMMO: u32 = 90;

pub const RELOAD_TIME: f64 = 2.0;

/// Hit-scan ray length.
pub const WEAPON_RANGE: f64 = 100.0;

/// Seconds an impact marker stays visible.
pub const HIT_MARKER_DURATION: f64 = 0.08;

// --- Grenades ---

pub const GRENADE_COUNT: u32 = 4;
pub const GRENADE_THROW_FORCE: f64 = 18.0;

/// Extra vertical speed added on top of the throw direction.
pub const GRENADE_UPWARD_BOOST: f64 = 5.0;

/// Distance ahead of the view origin where a thrown grenade appears.
pub const GRENADE_SPAWN_OFFSET: f64 = 0.5;

pub const GRENADE_ARC_GRAVITY: f64 = 15.0;
pub const GRENADE_FUSE_TIME: f64 = 3.0;
pub const GRENADE_THROW_COOLDOWN: f64 = 0.5;

/// Resting height of a grenade on the ground plane.
pub const GRENADE_GROUND_HEIGHT: f64 = 0.1;

/// Vertical velocity multiplier on ground contact (sign flips).
pub const GRENADE_GROUND_RESTITUTION: f64 = 0.4;

/// Horizontal velocity multiplier on ground contact.
pub const GRENADE_GROUND_FRICTION: f64 = 0.7;

/// Velocity multiplier when reflecting off the arena bounds (sign flips).
pub const GRENADE_WALL_RESTITUTION: f64 = 0.5;

pub const GRENADE_EXPLOSION_RADIUS: f64 = 6.0;

/// Damage at the centre of a blast. Falls off linearly to zero at the radius.
pub const GRENADE_DAMAGE: f64 = 100.0;

/// Fraction of blast damage the player takes from their own grenades.
pub const GRENADE_PLAYER_DAMAGE_SCALE: f64 = 0.5;

// --- Explosions ---

pub const EXPLOSION_LIFETIME: f64 = 0.5;
pub const EXPLOSION_START_OPACITY: f64 = 0.9;
pub const EXPLOSION_LIGHT_INTENSITY: f64 = 8.0;

// --- Enemies ---

pub const ENEMY_COUNT: usize = 8;
pub const ENEMY_SPEED: f64 = 2.5;
pub const ENEMY_HEALTH: f64 = 100.0;

/// Melee damage per attack.
pub const ENEMY_DAMAGE: f64 = 20.0;

pub const ENEMY_ATTACK_COOLDOWN: f64 = 1.0;

/// 3D distance from body centre to player eye within which melee lands.
pub const ENEMY_ATTACK_RANGE: f64 = 1.5;

/// Minimum spawn distance from the arena centre.
pub const ENEMY_SPAWN_DISTANCE: f64 = 25.0;

/// Random extra distance added on top of [`ENEMY_SPAWN_DISTANCE`].
pub const ENEMY_SPAWN_JITTER: f64 = 10.0;

/// Spawn positions stay this far inside the arena bounds.
pub const ENEMY_SPAWN_MARGIN: f64 = 2.0;

pub const ENEMY_RESPAWN_DELAY: f64 = 3.0;

/// Seconds the red damage flash stays on after a hit.
pub const ENEMY_FLASH_DURATION: f64 = 0.1;

/// Height of the enemy body centre above the ground plane.
pub const ENEMY_BODY_HEIGHT: f64 = 1.0;

/// Body capsule radius.
pub const ENEMY_BODY_RADIUS: f64 = 0.35;

/// Half length of the capsule's straight section.
pub const ENEMY_BODY_HALF_LENGTH: f64 = 0.5;

/// Head sphere offset above the body centre.
pub const ENEMY_HEAD_OFFSET: f64 = 0.95;
pub const ENEMY_HEAD_RADIUS: f64 = 0.25;

/// Angular rate of the idle-walk oscillation (radians per second).
pub const ENEMY_WALK_CYCLE_RATE: f64 = 8.0;

/// Resting arm pitch for the shambling pose.
pub const ENEMY_ARM_REST_PITCH: f64 = -1.1;
