//! Spatial queries against live enemies: hit-scan rays and blast radii.
//!
//! An enemy's hit volume is a vertical capsule around its body centre plus a
//! sphere for the head. Only `EnemyState::Alive` enemies are considered.

use glam::DVec3;
use hecs::{Entity, World};

use buried_core::components::{Enemy, Position};
use buried_core::constants::{
    ENEMY_BODY_HALF_LENGTH, ENEMY_BODY_RADIUS, ENEMY_HEAD_OFFSET, ENEMY_HEAD_RADIUS,
};
use buried_core::enums::EnemyState;

const PARALLEL_EPSILON: f64 = 1e-12;

/// One ray intersection with an enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub slot: usize,
    /// Distance along the ray.
    pub distance: f64,
    pub point: DVec3,
}

/// Entry distance of a ray into a sphere. `dir` must be unit length.
pub fn ray_sphere(origin: DVec3, dir: DVec3, center: DVec3, radius: f64) -> Option<f64> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let h = b * b - c;
    if h < 0.0 {
        return None;
    }
    Some(-b - h.sqrt())
}

/// Entry distance of a ray into the capsule spanning `a`..`b` with `radius`.
/// `dir` must be unit length.
pub fn ray_capsule(origin: DVec3, dir: DVec3, a: DVec3, b: DVec3, radius: f64) -> Option<f64> {
    let ba = b - a;
    let oa = origin - a;
    let baba = ba.dot(ba);
    let bard = ba.dot(dir);
    let baoa = ba.dot(oa);
    let rdoa = dir.dot(oa);
    let oaoa = oa.dot(oa);

    let qa = baba - bard * bard;
    if qa.abs() < PARALLEL_EPSILON {
        // Ray runs along the axis: only the end caps can be hit first.
        return match (
            ray_sphere(origin, dir, a, radius),
            ray_sphere(origin, dir, b, radius),
        ) {
            (Some(ta), Some(tb)) => Some(ta.min(tb)),
            (ta, tb) => ta.or(tb),
        };
    }

    let qb = baba * rdoa - baoa * bard;
    let qc = baba * oaoa - baoa * baoa - radius * radius * baba;
    let h = qb * qb - qa * qc;
    if h < 0.0 {
        return None;
    }

    let t = (-qb - h.sqrt()) / qa;
    let y = baoa + t * bard;
    if y > 0.0 && y < baba {
        return Some(t);
    }

    // Cylinder missed inside the segment: try the cap on that side.
    let cap = if y <= 0.0 { a } else { b };
    ray_sphere(origin, dir, cap, radius)
}

/// Nearest entry distance into an enemy's body or head, given the body centre.
pub fn enemy_ray_distance(origin: DVec3, dir: DVec3, body_center: DVec3) -> Option<f64> {
    let half = DVec3::Y * ENEMY_BODY_HALF_LENGTH;
    let body = ray_capsule(
        origin,
        dir,
        body_center - half,
        body_center + half,
        ENEMY_BODY_RADIUS,
    );
    let head = ray_sphere(
        origin,
        dir,
        body_center + DVec3::Y * ENEMY_HEAD_OFFSET,
        ENEMY_HEAD_RADIUS,
    );
    [body, head]
        .into_iter()
        .flatten()
        .filter(|t| *t >= 0.0)
        .min_by(|a, b| a.total_cmp(b))
}

/// All living enemies hit by a ray of length `range`, nearest first.
pub fn raycast_enemies(world: &World, origin: DVec3, dir: DVec3, range: f64) -> Vec<RayHit> {
    let dir = dir.normalize_or_zero();
    if dir == DVec3::ZERO {
        return Vec::new();
    }

    let mut hits: Vec<RayHit> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (enemy, _))| enemy.state == EnemyState::Alive)
        .filter_map(|(entity, (enemy, pos))| {
            let distance = enemy_ray_distance(origin, dir, pos.0)?;
            (distance <= range).then(|| RayHit {
                entity,
                slot: enemy.slot,
                distance,
                point: origin + dir * distance,
            })
        })
        .collect();

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Living enemies whose body centre lies strictly within `radius` of
/// `center`, with their distance, nearest first.
pub fn enemies_within(world: &World, center: DVec3, radius: f64) -> Vec<(Entity, f64)> {
    let mut found: Vec<(Entity, f64)> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (enemy, _))| enemy.state == EnemyState::Alive)
        .map(|(entity, (_, pos))| (entity, pos.0.distance(center)))
        .filter(|(_, d)| *d < radius)
        .collect();

    found.sort_by(|a, b| a.1.total_cmp(&b.1));
    found
}
