use serde::{Deserialize, Serialize};

use crate::battlefield::Battlefield;
use crate::types::{AgentStatus, Enemy};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Inputs the bot saw over a match, in turn order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnJournal {
    pub format_version: u16,
    pub bot_name: String,
    pub battlefield: Battlefield,
    pub turns: Vec<TurnRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u64,
    pub status: AgentStatus,
    pub enemies: Vec<Enemy>,
}

impl TurnJournal {
    pub fn new(bot_name: impl Into<String>, battlefield: Battlefield) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            bot_name: bot_name.into(),
            battlefield,
            turns: Vec::new(),
        }
    }

    /// Records one turn's inputs and returns its turn number.
    pub fn append_turn(&mut self, status: AgentStatus, enemies: &[Enemy]) -> u64 {
        let turn = self.turns.len() as u64;
        self.turns.push(TurnRecord { turn, status, enemies: enemies.to_vec() });
        turn
    }
}
