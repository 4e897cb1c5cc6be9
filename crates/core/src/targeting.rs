//! Closest-enemy selection for the turn policy.
//! This module owns the distance metric and the nearest-target scan with first-wins ties.
//! It does not decide what to do with the selected enemy.

use crate::types::{Enemy, Pos};

pub fn euclidean(a: Pos, b: Pos) -> f64 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    dx.hypot(dy)
}

/// Nearest enemy to `own` by Euclidean distance, together with that distance.
pub fn closest_enemy(own: Pos, enemies: &[Enemy]) -> Option<(&Enemy, f64)> {
    closest_enemy_by(own, enemies, euclidean)
}

/// Nearest enemy under an arbitrary metric.
///
/// Ties keep the enemy seen first: a later candidate must be strictly closer
/// to replace the running best. Returns `None` for an empty slice.
pub fn closest_enemy_by<F>(own: Pos, enemies: &[Enemy], metric: F) -> Option<(&Enemy, f64)>
where
    F: Fn(Pos, Pos) -> f64,
{
    let mut best: Option<(&Enemy, f64)> = None;
    for enemy in enemies {
        let distance = metric(own, enemy.pos);
        let is_better = match best {
            None => true,
            Some((_, best_distance)) => distance < best_distance,
        };
        if is_better {
            best = Some((enemy, distance));
        }
    }
    if let Some((enemy, distance)) = best {
        tracing::trace!(enemy = ?enemy.id, distance, candidates = enemies.len(), "closest enemy");
    }
    best
}
