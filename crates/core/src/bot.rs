//! Agent instances as seen by the arena engine.
//! Each bot owns its thresholds and its own attack memory; nothing is shared between bots.

use crate::battlefield::BattlefieldBounds;
use crate::config::PolicyConfig;
use crate::memory::AttackMemory;
use crate::policy::decide;
use crate::types::{Action, AgentStatus, Decision, Enemy};

pub const DEFAULT_BOT_NAME: &str = "Miso";
pub const DEFAULT_BOT_MODEL: &str = "Rust";

pub trait BotAi: Send {
    fn name(&self) -> &str;
    /// Chassis model the arena registers the bot under.
    fn model(&self) -> &str {
        DEFAULT_BOT_MODEL
    }
    fn turn_action(
        &mut self,
        status: &AgentStatus,
        enemies: &[Enemy],
        bounds: &dyn BattlefieldBounds,
    ) -> Action;
}

#[derive(Clone, Debug)]
pub struct ArenaBot {
    name: String,
    config: PolicyConfig,
    memory: AttackMemory,
}

impl Default for ArenaBot {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}

impl ArenaBot {
    pub fn new(config: PolicyConfig) -> Self {
        Self::named(DEFAULT_BOT_NAME, config)
    }

    pub fn named(name: impl Into<String>, config: PolicyConfig) -> Self {
        Self { name: name.into(), config, memory: AttackMemory::new() }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn memory(&self) -> AttackMemory {
        self.memory
    }

    pub fn decide(
        &mut self,
        status: &AgentStatus,
        enemies: &[Enemy],
        bounds: &dyn BattlefieldBounds,
    ) -> Decision {
        decide(status, enemies, bounds, &mut self.memory, &self.config)
    }
}

impl BotAi for ArenaBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn turn_action(
        &mut self,
        status: &AgentStatus,
        enemies: &[Enemy],
        bounds: &dyn BattlefieldBounds,
    ) -> Action {
        self.decide(status, enemies, bounds).action
    }
}
