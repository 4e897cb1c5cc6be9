use crate::{
    config::PolicyConfig,
    hash::decision_trace_hash,
    journal::{JOURNAL_FORMAT_VERSION, TurnJournal},
    memory::AttackMemory,
    policy::decide,
    types::Decision,
};

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    UnknownFormatVersion(u16),
    TurnOutOfOrder { expected: u64, found: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplayedTurn {
    pub turn: u64,
    pub decision: Decision,
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub turns: Vec<ReplayedTurn>,
    pub final_memory: AttackMemory,
    pub trace_hash: u64,
}

/// Feeds every recorded turn through the policy with a fresh attack memory.
pub fn replay_journal(
    journal: &TurnJournal,
    config: &PolicyConfig,
) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnknownFormatVersion(journal.format_version));
    }

    let mut memory = AttackMemory::new();
    let mut turns = Vec::with_capacity(journal.turns.len());
    for (expected, record) in journal.turns.iter().enumerate() {
        let expected = expected as u64;
        if record.turn != expected {
            return Err(ReplayError::TurnOutOfOrder { expected, found: record.turn });
        }
        let decision =
            decide(&record.status, &record.enemies, &journal.battlefield, &mut memory, config);
        turns.push(ReplayedTurn { turn: record.turn, decision });
    }

    let trace_hash = decision_trace_hash(turns.iter().map(|t| (t.turn, &t.decision)));
    tracing::info!(
        bot = %journal.bot_name,
        turns = turns.len(),
        trace_hash = format_args!("{trace_hash:016x}"),
        "journal replayed"
    );
    Ok(ReplayResult { turns, final_memory: memory, trace_hash })
}
