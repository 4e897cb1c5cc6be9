//! File-backed JSONL turn journal with a SHA-256 hash chain.
//!
//! The file format is line-delimited JSON (`.jsonl`):
//! - Line 1: header with `format_version`, `bot_name`, `battlefield`.
//! - Lines 2+: one record per turn, each carrying `prev_sha256_hex` and `sha256_hex`
//!   so a truncated, edited or reordered file is detected on load.
//!
//! Every record is flushed as soon as it is appended, so a crashed match still
//! leaves a loadable prefix behind.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::battlefield::Battlefield;
use crate::journal::{JOURNAL_FORMAT_VERSION, TurnJournal, TurnRecord};
use crate::types::{AgentStatus, Enemy};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct FileHeader {
    format_version: u16,
    bot_name: String,
    battlefield: Battlefield,
}

/// Canonical hash input for one record, concatenated with the previous hash.
#[derive(Serialize)]
struct RecordBody<'a> {
    seq: u64,
    status: &'a AgentStatus,
    enemies: &'a [Enemy],
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    status: AgentStatus,
    enemies: Vec<Enemy>,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// Previous-hash value used by the first record in a chain.
pub const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn compute_record_sha256(body_json: &str, prev_sha256_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    format!("{:064x}", hasher.finalize())
}

fn body_json(seq: u64, status: &AgentStatus, enemies: &[Enemy]) -> serde_json::Result<String> {
    serde_json::to_string(&RecordBody { seq, status, enemies })
}

pub struct JournalWriter {
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_seq: u64,
}

impl JournalWriter {
    /// Creates (or truncates) a journal file and writes its header line.
    pub fn create(path: &Path, bot_name: &str, battlefield: Battlefield) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);

        let header = FileHeader {
            format_version: JOURNAL_FORMAT_VERSION,
            bot_name: bot_name.to_string(),
            battlefield,
        };
        let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
        writeln!(writer, "{header_json}")?;
        writer.flush()?;

        Ok(Self { writer, last_sha256_hex: INITIAL_HASH.to_string(), next_seq: 0 })
    }

    /// Continues an existing journal using the chain state from [`LoadedJournal`].
    pub fn resume(path: &Path, last_sha256_hex: String, next_seq: u64) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self { writer: BufWriter::new(file), last_sha256_hex, next_seq })
    }

    /// Appends one turn, flushes it, and returns its sequence number.
    pub fn append(&mut self, status: &AgentStatus, enemies: &[Enemy]) -> io::Result<u64> {
        let seq = self.next_seq;
        let body = body_json(seq, status, enemies).map_err(io::Error::other)?;
        let sha256_hex = compute_record_sha256(&body, &self.last_sha256_hex);

        let record = FileRecord {
            seq,
            status: *status,
            enemies: enemies.to_vec(),
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };
        let record_json = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(self.writer, "{record_json}")?;
        self.writer.flush()?;

        self.last_sha256_hex = sha256_hex;
        self.next_seq += 1;
        Ok(seq)
    }
}

#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: TurnJournal,
    /// Hash of the last valid record, or [`INITIAL_HASH`] when there are none.
    pub last_sha256_hex: String,
    pub next_seq: u64,
}

#[derive(Debug, Error)]
pub enum JournalLoadError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("journal file is empty")]
    EmptyFile,
    #[error("invalid journal header at line {line}: {message}")]
    InvalidHeader { line: usize, message: String },
    #[error("invalid journal record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
    #[error("incomplete journal line at line {line}")]
    IncompleteLine { line: usize },
    #[error("SHA-256 hash chain broken at line {line}")]
    HashChainBroken { line: usize },
}

/// Loads a JSONL journal, validating every record's sequence and hash link.
///
/// Stops at the first bad line and reports it; nothing after it is trusted.
pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(JournalLoadError::EmptyFile);
    }
    if !content.ends_with('\n') {
        return Err(JournalLoadError::IncompleteLine { line: lines.len() });
    }

    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })?;
    let mut journal = TurnJournal {
        format_version: header.format_version,
        bot_name: header.bot_name,
        battlefield: header.battlefield,
        turns: Vec::new(),
    };

    let mut prev_sha256_hex = INITIAL_HASH.to_string();
    let mut next_seq = 0u64;

    for (index, line) in lines.iter().enumerate().skip(1) {
        let line_number = index + 1;
        let invalid =
            |message: String| JournalLoadError::InvalidRecord { line: line_number, message };

        if line.is_empty() {
            return Err(invalid("empty line".to_string()));
        }
        let record: FileRecord = serde_json::from_str(line).map_err(|e| invalid(e.to_string()))?;
        if record.seq != next_seq {
            return Err(invalid(format!("expected seq {next_seq}, found {}", record.seq)));
        }
        if record.prev_sha256_hex != prev_sha256_hex {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }
        let body = body_json(record.seq, &record.status, &record.enemies)
            .map_err(|e| invalid(e.to_string()))?;
        if record.sha256_hex != compute_record_sha256(&body, &prev_sha256_hex) {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        journal.turns.push(TurnRecord {
            turn: record.seq,
            status: record.status,
            enemies: record.enemies,
        });
        prev_sha256_hex = record.sha256_hex;
        next_seq += 1;
    }

    Ok(LoadedJournal { journal, last_sha256_hex: prev_sha256_hex, next_seq })
}

/// Writes a whole in-memory journal to `path`.
pub fn write_journal_to_file(path: &Path, journal: &TurnJournal) -> io::Result<()> {
    let mut writer = JournalWriter::create(path, &journal.bot_name, journal.battlefield)?;
    for record in &journal.turns {
        writer.append(&record.status, &record.enemies)?;
    }
    Ok(())
}
