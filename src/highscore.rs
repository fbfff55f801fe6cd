//! Top-10 leaderboard and its persistence.
//!
//! The on-disk format is one `"<initials> <score>"` record per line, best
//! score first. Every save rewrites the whole file.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub const TABLE_CAPACITY: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub initials: String,
    pub score: u32,
}

impl HighScoreEntry {
    pub fn new(initials: impl Into<String>, score: u32) -> Self {
        Self { initials: initials.into(), score }
    }
}

/// Sorted best-first, at most [`TABLE_CAPACITY`] entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from entries in any order. Equal scores keep their
    /// relative order.
    pub fn from_entries(entries: Vec<HighScoreEntry>) -> Self {
        let mut table = Self { entries };
        table.normalize();
        table
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    /// A score gets in while there is room, or when it strictly beats the
    /// current lowest entry.
    pub fn is_qualifying(&self, score: u32) -> bool {
        if self.entries.len() < TABLE_CAPACITY {
            return true;
        }
        self.entries.last().is_none_or(|lowest| score > lowest.score)
    }

    /// Appends, re-sorts and trims. Returns the rank (0-based) of the new
    /// entry if it survived the trim.
    pub fn record(&mut self, initials: &str, score: u32) -> Option<usize> {
        self.entries.push(HighScoreEntry::new(initials, score));

        // Stable sort keeps an appended tie behind the older entries, so the
        // new entry is the last one carrying its score.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        let rank = self.entries.iter().rposition(|e| e.score == score && e.initials == initials);
        self.entries.truncate(TABLE_CAPACITY);

        debug!(initials, score, ?rank, "Recorded high score");
        rank.filter(|r| *r < TABLE_CAPACITY)
    }

    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(out, "{} {}", entry.initials, entry.score);
        }
        out
    }

    /// Parses the file format, skipping lines without an initials token and a
    /// non-negative integer.
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        for (number, line) in text.lines().enumerate() {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next().map(str::parse::<u32>)) {
                (Some(initials), Some(Ok(score))) => entries.push(HighScoreEntry::new(initials, score)),
                (None, _) => {}
                _ => warn!(line = number + 1, content = line, "Skipping malformed high score line"),
            }
        }
        Self::from_entries(entries)
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(TABLE_CAPACITY);
    }
}

/// Where the leaderboard lives between runs.
pub trait HighScoreStore {
    /// Never fails: missing or unreadable data is an empty table.
    fn load(&self) -> HighScoreTable;

    fn save(&self, table: &HighScoreTable) -> Result<()>;
}

pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> HighScoreTable {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let table = HighScoreTable::parse(&text);
                info!(path = %self.path.display(), entries = table.len(), "Loaded high scores");
                table
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No high score file yet");
                HighScoreTable::new()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable high score file, starting empty");
                HighScoreTable::new()
            }
        }
    }

    fn save(&self, table: &HighScoreTable) -> Result<()> {
        fs::write(&self.path, table.to_lines()).map_err(|e| Error::io(&self.path, e))?;
        info!(path = %self.path.display(), entries = table.len(), "Saved high scores");
        Ok(())
    }
}

/// Keeps the serialized table in memory; useful headless and in tests.
#[derive(Default)]
pub struct MemoryHighScoreStore {
    contents: RefCell<Option<String>>,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(text: impl Into<String>) -> Self {
        Self { contents: RefCell::new(Some(text.into())) }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> HighScoreTable {
        self.contents.borrow().as_deref().map(HighScoreTable::parse).unwrap_or_default()
    }

    fn save(&self, table: &HighScoreTable) -> Result<()> {
        *self.contents.borrow_mut() = Some(table.to_lines());
        Ok(())
    }
}
