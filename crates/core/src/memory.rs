//! Turn-to-turn damage memory.
//! This module remembers the health and shield percentages seen at the end of the previous
//! turn so the policy can tell whether the bot was hit since then.

use serde::{Deserialize, Serialize};

use crate::types::AgentStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackMemory {
    pub last_health_percent: u8,
    pub last_shield_percent: u8,
}

impl Default for AttackMemory {
    fn default() -> Self {
        Self { last_health_percent: 100, last_shield_percent: 100 }
    }
}

impl AttackMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if health or shield dropped below the values recorded last turn.
    pub fn is_under_attack(&self, status: &AgentStatus) -> bool {
        status.health.percent < self.last_health_percent
            || status.shield.percent < self.last_shield_percent
    }

    /// Records this turn's readings. Call once per turn, after the action is chosen.
    pub fn update(&mut self, status: &AgentStatus) {
        self.last_health_percent = status.health.percent;
        self.last_shield_percent = status.shield.percent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Pos, Vital};

    fn status(health: u8, shield: u8) -> AgentStatus {
        AgentStatus {
            health: Vital::from_parts(health, u32::from(health), 100),
            shield: Vital::from_parts(shield, u32::from(shield), 100),
            energy: Vital::full(100),
            pos: Pos::default(),
        }
    }

    #[test]
    fn fresh_memory_assumes_full_health_and_shield() {
        let memory = AttackMemory::new();
        assert!(!memory.is_under_attack(&status(100, 100)));
        assert!(memory.is_under_attack(&status(99, 100)));
        assert!(memory.is_under_attack(&status(100, 99)));
    }

    #[test]
    fn recovery_is_not_an_attack() {
        let mut memory = AttackMemory::new();
        memory.update(&status(40, 20));
        assert!(!memory.is_under_attack(&status(40, 20)));
        assert!(!memory.is_under_attack(&status(45, 60)));
        assert!(memory.is_under_attack(&status(45, 19)));
    }

    #[test]
    fn update_overwrites_both_values() {
        let mut memory = AttackMemory::new();
        memory.update(&status(70, 5));
        assert_eq!(memory, AttackMemory { last_health_percent: 70, last_shield_percent: 5 });
        memory.update(&status(90, 80));
        assert_eq!(memory, AttackMemory { last_health_percent: 90, last_shield_percent: 80 });
    }
}
