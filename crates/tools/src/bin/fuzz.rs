use std::collections::BTreeMap;
use std::env;
use std::io;

use anyhow::{Result, ensure};
use bot_core::{
    Action, AgentStatus, ArenaBot, Battlefield, BotAi, DecisionReason, Enemy, EnemyId,
    PolicyConfig, Pos, Vital,
};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,
    #[arg(long, default_value_t = 24)]
    width: u32,
    #[arg(long, default_value_t = 24)]
    height: u32,
}

fn roll(rng: &mut ChaCha8Rng, below: u64) -> u64 {
    rng.next_u64() % below.max(1)
}

fn random_vital(rng: &mut ChaCha8Rng) -> Vital {
    let maximum = 1 + roll(rng, 2000);
    Vital::new(roll(rng, maximum + 1) as u32, maximum as u32)
}

fn random_pos(rng: &mut ChaCha8Rng, field: Battlefield) -> Pos {
    Pos {
        x: roll(rng, u64::from(field.width)) as i32,
        y: roll(rng, u64::from(field.height)) as i32,
    }
}

fn main() -> Result<()> {
    let filter = env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    ensure!(args.width > 0 && args.height > 0, "battlefield must not be empty");
    let field = Battlefield::new(args.width, args.height);

    println!("Starting fuzz harness on seed {} for {} turns...", args.seed, args.turns);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut bot = ArenaBot::new(PolicyConfig::default());
    let mut reasons: BTreeMap<String, u32> = BTreeMap::new();

    for turn in 0..args.turns {
        let status = AgentStatus {
            health: random_vital(&mut rng),
            shield: random_vital(&mut rng),
            energy: random_vital(&mut rng),
            pos: random_pos(&mut rng, field),
        };
        let enemies: Vec<Enemy> = (0..roll(&mut rng, 5))
            .map(|id| Enemy { id: EnemyId(id as u32), pos: random_pos(&mut rng, field) })
            .collect();

        let decision = bot.decide(&status, &enemies, &field);
        *reasons.entry(format!("{:?}", decision.reason)).or_default() += 1;

        // Targets must be visible enemies and shield top-ups must fit the deficit.
        match decision.action {
            Action::Idle => {
                assert!(enemies.is_empty(), "turn {turn}: idled with enemies in sight");
            }
            Action::Attack(target) => {
                assert!(enemies.contains(&target), "turn {turn}: attacked an unseen enemy");
            }
            Action::MoveTowards(pos) | Action::MoveAwayFrom(pos) => {
                assert!(
                    enemies.iter().any(|e| e.pos == pos),
                    "turn {turn}: moved relative to an empty cell"
                );
            }
            Action::RechargeShield(points) => {
                assert!(
                    points <= status.shield.missing(),
                    "turn {turn}: recharged {points} with only {} missing",
                    status.shield.missing()
                );
            }
            Action::RechargeBattery => {}
        }
        if decision.reason == DecisionReason::Retreat {
            assert!(field.in_bounds(status.pos), "turn {turn}: retreat from outside the field");
        }
        let memory = bot.memory();
        assert_eq!(memory.last_health_percent, status.health.percent, "turn {turn}");
        assert_eq!(memory.last_shield_percent, status.shield.percent, "turn {turn}");
    }

    for (reason, count) in &reasons {
        println!("{reason:<24} {count}");
    }
    println!("Fuzzing of {} completed successfully.", bot.name());
    Ok(())
}
