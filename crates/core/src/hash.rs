//! Stable hashing of decision traces for deterministic verification.
//! This module keeps hashing concerns out of the policy and replay code.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::types::{Action, Decision, DecisionReason};

pub fn decision_trace_hash<'a>(decisions: impl IntoIterator<Item = (u64, &'a Decision)>) -> u64 {
    let mut hasher = Xxh3::new();
    for (turn, decision) in decisions {
        hasher.write_u64(turn);
        hasher.write_u8(reason_tag(decision.reason));
        match decision.action {
            Action::Idle => hasher.write_u8(0),
            Action::MoveTowards(pos) => {
                hasher.write_u8(1);
                hasher.write_i32(pos.x);
                hasher.write_i32(pos.y);
            }
            Action::MoveAwayFrom(pos) => {
                hasher.write_u8(2);
                hasher.write_i32(pos.x);
                hasher.write_i32(pos.y);
            }
            Action::Attack(enemy) => {
                hasher.write_u8(3);
                hasher.write_u32(enemy.id.0);
                hasher.write_i32(enemy.pos.x);
                hasher.write_i32(enemy.pos.y);
            }
            Action::RechargeBattery => hasher.write_u8(4),
            Action::RechargeShield(amount) => {
                hasher.write_u8(5);
                hasher.write_u32(amount);
            }
        }
    }
    hasher.finish()
}

fn reason_tag(reason: DecisionReason) -> u8 {
    match reason {
        DecisionReason::NoEnemies => 0,
        DecisionReason::BatteryCritical => 1,
        DecisionReason::SafeShieldTopUp => 2,
        DecisionReason::SafeBatteryTopUp => 3,
        DecisionReason::ShieldCriticalRecharge => 4,
        DecisionReason::ShieldCriticalBattery => 5,
        DecisionReason::Retreat => 6,
        DecisionReason::Engage => 7,
        DecisionReason::Approach => 8,
    }
}
