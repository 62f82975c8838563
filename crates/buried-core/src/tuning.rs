//! Runtime-tunable gameplay parameters.
//!
//! Defaults come from [`crate::constants`]. A JSON file may override any
//! subset of fields; missing fields keep their defaults.
//!
//! ```json
//! {
//!   "weapon": { "max_ammo": 45, "reload_time": 1.5 },
//!   "enemy": { "count": 12 }
//! }
//! ```

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Errors raised while loading a tuning file.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// All gameplay parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub weapon: WeaponTuning,
    pub grenade: GrenadeTuning,
    pub enemy: EnemyTuning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub size: f64,
    pub max_frame_dt: f64,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            size: ARENA_SIZE,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub height: f64,
    pub radius: f64,
    pub walk_speed: f64,
    pub sprint_speed: f64,
    pub max_health: f64,
    pub regen_delay: f64,
    pub regen_rate: f64,
    pub mouse_sensitivity: f64,
    pub velocity_damping: f64,
    pub default_fov: f64,
    pub ads_fov: f64,
    pub fov_lerp_speed: f64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            height: PLAYER_HEIGHT,
            radius: PLAYER_RADIUS,
            walk_speed: WALK_SPEED,
            sprint_speed: SPRINT_SPEED,
            max_health: PLAYER_MAX_HEALTH,
            regen_delay: PLAYER_HEALTH_REGEN_DELAY,
            regen_rate: PLAYER_HEALTH_REGEN_RATE,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            velocity_damping: VELOCITY_DAMPING,
            default_fov: DEFAULT_FOV,
            ads_fov: ADS_FOV,
            fov_lerp_speed: FOV_LERP_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub fire_rate: f64,
    pub damage: f64,
    pub max_ammo: u32,
    pub reserve_ammo: u32,
    pub reload_time: f64,
    pub range: f64,
    pub hit_marker_duration: f64,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            fire_rate: FIRE_RATE,
            damage: DAMAGE,
            max_ammo: MAX_AMMO,
            reserve_ammo: RESERVE_AMMO,
            reload_time: RELOAD_TIME,
            range: WEAPON_RANGE,
            hit_marker_duration: HIT_MARKER_DURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrenadeTuning {
    pub count: u32,
    pub throw_force: f64,
    pub upward_boost: f64,
    pub spawn_offset: f64,
    pub gravity: f64,
    pub fuse_time: f64,
    pub throw_cooldown: f64,
    pub explosion_radius: f64,
    pub damage: f64,
    pub player_damage_scale: f64,
    pub explosion_lifetime: f64,
}

impl Default for GrenadeTuning {
    fn default() -> Self {
        Self {
            count: GRENADE_COUNT,
            throw_force: GRENADE_THROW_FORCE,
            upward_boost: GRENADE_UPWARD_BOOST,
            spawn_offset: GRENADE_SPAWN_OFFSET,
            gravity: GRENADE_ARC_GRAVITY,
            fuse_time: GRENADE_FUSE_TIME,
            throw_cooldown: GRENADE_THROW_COOLDOWN,
            explosion_radius: GRENADE_EXPLOSION_RADIUS,
            damage: GRENADE_DAMAGE,
            player_damage_scale: GRENADE_PLAYER_DAMAGE_SCALE,
            explosion_lifetime: EXPLOSION_LIFETIME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub count: usize,
    pub speed: f64,
    pub health: f64,
    pub damage: f64,
    pub attack_cooldown: f64,
    pub attack_range: f64,
    pub spawn_distance: f64,
    pub spawn_jitter: f64,
    pub spawn_margin: f64,
    pub respawn_delay: f64,
    pub flash_duration: f64,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            count: ENEMY_COUNT,
            speed: ENEMY_SPEED,
            health: ENEMY_HEALTH,
            damage: ENEMY_DAMAGE,
            attack_cooldown: ENEMY_ATTACK_COOLDOWN,
            attack_range: ENEMY_ATTACK_RANGE,
            spawn_distance: ENEMY_SPAWN_DISTANCE,
            spawn_jitter: ENEMY_SPAWN_JITTER,
            spawn_margin: ENEMY_SPAWN_MARGIN,
            respawn_delay: ENEMY_RESPAWN_DELAY,
            flash_duration: ENEMY_FLASH_DURATION,
        }
    }
}

impl GameTuning {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: GameTuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json_str(&text)
            .inspect_err(|e| warn!("Rejected tuning file {}: {e}", path.display()))?;
        info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(value: f64, field: &'static str) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }
        fn non_negative(value: f64, field: &'static str) -> Result<(), TuningError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be zero or positive",
                })
            }
        }

        positive(self.arena.size, "arena.size")?;
        positive(self.arena.max_frame_dt, "arena.max_frame_dt")?;
        positive(self.player.max_health, "player.max_health")?;
        non_negative(self.player.radius, "player.radius")?;
        if self.player.radius >= self.arena.size {
            return Err(TuningError::Invalid {
                field: "player.radius",
                reason: "must be smaller than arena.size",
            });
        }
        non_negative(self.player.walk_speed, "player.walk_speed")?;
        non_negative(self.player.sprint_speed, "player.sprint_speed")?;
        non_negative(self.player.regen_rate, "player.regen_rate")?;
        if !(0.0..=1.0).contains(&self.player.velocity_damping) {
            return Err(TuningError::Invalid {
                field: "player.velocity_damping",
                reason: "must be within [0, 1]",
            });
        }
        if self.weapon.max_ammo == 0 {
            return Err(TuningError::Invalid {
                field: "weapon.max_ammo",
                reason: "must be at least 1",
            });
        }
        non_negative(self.weapon.fire_rate, "weapon.fire_rate")?;
        non_negative(self.weapon.damage, "weapon.damage")?;
        non_negative(self.weapon.reload_time, "weapon.reload_time")?;
        positive(self.weapon.range, "weapon.range")?;
        positive(self.grenade.explosion_radius, "grenade.explosion_radius")?;
        positive(self.grenade.explosion_lifetime, "grenade.explosion_lifetime")?;
        non_negative(self.grenade.fuse_time, "grenade.fuse_time")?;
        non_negative(self.grenade.damage, "grenade.damage")?;
        positive(self.enemy.health, "enemy.health")?;
        non_negative(self.enemy.speed, "enemy.speed")?;
        non_negative(self.enemy.respawn_delay, "enemy.respawn_delay")?;
        if self.enemy.spawn_margin >= self.arena.size {
            return Err(TuningError::Invalid {
                field: "enemy.spawn_margin",
                reason: "must be smaller than arena.size",
            });
        }
        Ok(())
    }
}
