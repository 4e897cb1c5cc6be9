//! Per-turn decision rules.
//! This module turns one status snapshot into exactly one action by walking an ordered
//! rule chain, then records the turn's readings in the caller's attack memory.
//! It does not own target selection math or boundary geometry.

use crate::battlefield::{BattlefieldBounds, is_clear_of_edges};
use crate::config::PolicyConfig;
use crate::memory::AttackMemory;
use crate::targeting::closest_enemy;
use crate::types::*;

/// Chooses this turn's action and updates `memory`.
pub fn evaluate(
    status: &AgentStatus,
    enemies: &[Enemy],
    bounds: &(impl BattlefieldBounds + ?Sized),
    memory: &mut AttackMemory,
    config: &PolicyConfig,
) -> Action {
    decide(status, enemies, bounds, memory, config).action
}

/// Like [`evaluate`], but also reports which rule fired.
pub fn decide(
    status: &AgentStatus,
    enemies: &[Enemy],
    bounds: &(impl BattlefieldBounds + ?Sized),
    memory: &mut AttackMemory,
    config: &PolicyConfig,
) -> Decision {
    let decision = choose(status, enemies, bounds, memory, config);
    memory.update(status);
    decision
}

fn choose(
    status: &AgentStatus,
    enemies: &[Enemy],
    bounds: &(impl BattlefieldBounds + ?Sized),
    memory: &AttackMemory,
    config: &PolicyConfig,
) -> Decision {
    let Some((closest, distance)) = closest_enemy(status.pos, enemies) else {
        tracing::debug!("no visible enemies, idling");
        return Decision { action: Action::Idle, reason: DecisionReason::NoEnemies };
    };
    let closest = *closest;
    let under_attack = memory.is_under_attack(status);
    let health = status.health;
    let shield = status.shield;
    let energy = status.energy;

    let (action, reason) = if energy.percent < config.battery_low && !under_attack {
        (Action::RechargeBattery, DecisionReason::BatteryCritical)
    } else if distance > config.safe_distance && shield.percent < config.shield_top_up {
        (Action::RechargeShield(shield.missing()), DecisionReason::SafeShieldTopUp)
    } else if distance > config.safe_distance && energy.percent < config.battery_top_up {
        (Action::RechargeBattery, DecisionReason::SafeBatteryTopUp)
    } else if shield.percent < config.shield_damaged {
        let points_to_full = shield.missing();
        let energy_left = i64::from(energy.actual) - i64::from(points_to_full);
        if energy_left > i64::from(config.battery_low) {
            (Action::RechargeShield(points_to_full), DecisionReason::ShieldCriticalRecharge)
        } else {
            (Action::RechargeBattery, DecisionReason::ShieldCriticalBattery)
        }
    } else if under_attack
        && is_clear_of_edges(status.pos, bounds)
        && (health.percent < config.serious_injury || shield.percent < config.shield_serious)
    {
        (Action::MoveAwayFrom(closest.pos), DecisionReason::Retreat)
    } else if distance <= config.attack_range {
        (Action::Attack(closest), DecisionReason::Engage)
    } else {
        (Action::MoveTowards(closest.pos), DecisionReason::Approach)
    };

    tracing::debug!(
        ?reason,
        ?action,
        enemy = ?closest.id,
        distance,
        under_attack,
        health = health.percent,
        shield = shield.percent,
        energy = energy.percent,
        "turn decided"
    );
    Decision { action, reason }
}
