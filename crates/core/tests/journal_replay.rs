use std::fs;

use bot_core::{
    AgentStatus, ArenaBot, Battlefield, BotAi, Decision, DecisionReason, Enemy, EnemyId,
    JournalLoadError, JournalWriter, PolicyConfig, Pos, TurnJournal, Vital, load_journal_from_file,
    replay_journal,
};

const FIELD: Battlefield = Battlefield { width: 10, height: 10 };

fn status(health: u32, shield: u32, energy: u32, pos: Pos) -> AgentStatus {
    AgentStatus {
        health: Vital::new(health, 100),
        shield: Vital::new(shield, 100),
        energy: Vital::new(energy * 10, 1000),
        pos,
    }
}

/// A short scripted skirmish touching most rules in order.
fn script() -> Vec<(AgentStatus, Vec<Enemy>)> {
    let far = Enemy { id: EnemyId(1), pos: Pos { x: 9, y: 9 } };
    let near = Enemy { id: EnemyId(1), pos: Pos { x: 4, y: 6 } };
    let center = Pos { x: 4, y: 4 };
    vec![
        (status(100, 100, 10, center), vec![far]),
        (status(100, 40, 95, center), vec![far]),
        (status(100, 100, 50, center), vec![far]),
        (status(100, 100, 95, center), vec![far]),
        (status(100, 100, 95, center), vec![near]),
        (status(25, 80, 95, center), vec![near]),
        (status(25, 5, 95, center), vec![near]),
        (status(25, 5, 95, center), vec![]),
    ]
}

/// Play the script recording to a JSONL file, then load the file and replay it.
/// The replayed decisions and trace hash must match the live run.
#[test]
fn test_file_journal_replay_equivalence() {
    let dir = tempfile::tempdir().unwrap();
    let journal_path = dir.path().join("skirmish.jsonl");

    let mut bot = ArenaBot::default();
    let mut writer = JournalWriter::create(&journal_path, bot.name(), FIELD).unwrap();
    let mut in_memory = TurnJournal::new(bot.name(), FIELD);
    let mut live: Vec<Decision> = Vec::new();

    for (status, enemies) in script() {
        writer.append(&status, &enemies).unwrap();
        in_memory.append_turn(status, &enemies);
        live.push(bot.decide(&status, &enemies, &FIELD));
    }
    drop(writer);

    let reasons: Vec<_> = live.iter().map(|d| d.reason).collect();
    assert_eq!(
        reasons,
        vec![
            DecisionReason::BatteryCritical,
            DecisionReason::SafeShieldTopUp,
            DecisionReason::SafeBatteryTopUp,
            DecisionReason::Approach,
            DecisionReason::Engage,
            DecisionReason::Retreat,
            DecisionReason::ShieldCriticalRecharge,
            DecisionReason::NoEnemies,
        ]
    );

    let loaded = load_journal_from_file(&journal_path).unwrap();
    assert_eq!(loaded.journal, in_memory);

    let from_file = replay_journal(&loaded.journal, bot.config()).unwrap();
    let from_memory = replay_journal(&in_memory, bot.config()).unwrap();
    let replayed: Vec<Decision> = from_file.turns.iter().map(|t| t.decision).collect();
    assert_eq!(replayed, live);
    assert_eq!(from_file.trace_hash, from_memory.trace_hash);
    assert_eq!(from_file.final_memory, bot.memory());
}

#[test]
fn tuned_config_changes_replay_but_not_the_journal() {
    let dir = tempfile::tempdir().unwrap();
    let journal_path = dir.path().join("tuned.jsonl");
    let mut journal = TurnJournal::new("Miso", FIELD);
    for (status, enemies) in script() {
        journal.append_turn(status, &enemies);
    }
    bot_core::journal_file::write_journal_to_file(&journal_path, &journal).unwrap();
    let before = fs::read_to_string(&journal_path).unwrap();

    let loaded = load_journal_from_file(&journal_path).unwrap();
    let aggressive = PolicyConfig { serious_injury: 10, ..PolicyConfig::default() };
    let default = replay_journal(&loaded.journal, &PolicyConfig::default()).unwrap();
    let tuned = replay_journal(&loaded.journal, &aggressive).unwrap();

    assert_eq!(default.turns[5].decision.reason, DecisionReason::Retreat);
    assert_eq!(tuned.turns[5].decision.reason, DecisionReason::Engage);
    assert_ne!(default.trace_hash, tuned.trace_hash);
    assert_eq!(fs::read_to_string(&journal_path).unwrap(), before);
}

#[test]
fn truncated_file_is_rejected_before_replay() {
    let dir = tempfile::tempdir().unwrap();
    let journal_path = dir.path().join("truncated.jsonl");
    let mut writer = JournalWriter::create(&journal_path, "Miso", FIELD).unwrap();
    for (status, enemies) in script() {
        writer.append(&status, &enemies).unwrap();
    }
    drop(writer);

    let content = fs::read_to_string(&journal_path).unwrap();
    fs::write(&journal_path, &content[..content.len() - 10]).unwrap();

    assert!(matches!(
        load_journal_from_file(&journal_path),
        Err(JournalLoadError::IncompleteLine { .. })
    ));
}
