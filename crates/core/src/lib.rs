pub mod battlefield;
pub mod bot;
pub mod config;
pub mod hash;
pub mod journal;
pub mod journal_file;
pub mod memory;
pub mod policy;
pub mod replay;
pub mod targeting;
pub mod types;

pub use battlefield::{Battlefield, BattlefieldBounds, is_clear_of_edges};
pub use bot::{ArenaBot, BotAi, DEFAULT_BOT_MODEL, DEFAULT_BOT_NAME};
pub use config::{ConfigError, PolicyConfig};
pub use journal::{TurnJournal, TurnRecord};
pub use journal_file::{JournalLoadError, JournalWriter, LoadedJournal, load_journal_from_file};
pub use memory::AttackMemory;
pub use policy::{decide, evaluate};
pub use replay::*;
pub use targeting::{closest_enemy, euclidean};
pub use types::*;
