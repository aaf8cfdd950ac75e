//! High-score persistence.
//!
//! Scores live in a plain text file, one tab-separated record per line:
//!
//! ```text
//!     380	    95	    4	alice
//! ```
//!
//! The columns are final score, points, level and player name. Recording a score keeps the
//! best [`HIGH_SCORE_LIMIT`] entries sorted by score, highest first. The file is rewritten
//! through a temporary sibling and a rename so a crash never leaves it half written.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use micro_tetris_types as types;

use crate::types::{ANONYMOUS_PLAYER, HIGH_SCORE_LIMIT};

/// Header line of the printed score table.
pub const TABLE_HEADER: &str = "  Score\tPoints\tLevel\tName";

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub score: u64,
    pub points: u32,
    pub level: u32,
    pub name: String,
}

impl ScoreRecord {
    /// Record for a finished game; the score is points times level.
    pub fn new(points: u32, level: u32, name: &str) -> Self {
        Self {
            score: u64::from(points) * u64::from(level),
            points,
            level,
            name: sanitize_name(name),
        }
    }

    /// Serialize as one line of the score file (without the newline).
    ///
    /// # Examples
    ///
    /// ```
    /// use micro_tetris_scores::ScoreRecord;
    ///
    /// let record = ScoreRecord::new(95, 4, "alice");
    /// assert_eq!(record.to_line(), "    380\t    95\t    4\talice");
    /// ```
    pub fn to_line(&self) -> String {
        format!(
            "{:7}\t {:5}\t  {:3}\t{}",
            self.score, self.points, self.level, self.name
        )
    }

    /// Parse one line of the score file. Returns `None` for malformed lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.splitn(4, '\t');
        let score = fields.next()?.trim().parse().ok()?;
        let points = fields.next()?.trim().parse().ok()?;
        let level = fields.next()?.trim().parse().ok()?;
        let name = fields.next()?.trim_end_matches(['\r', '\n']).to_string();
        Some(Self {
            score,
            points,
            level,
            name,
        })
    }
}

/// The high-score file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreFile {
    path: PathBuf,
    limit: usize,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limit: HIGH_SCORE_LIMIT,
        }
    }

    /// Keep at most `limit` records instead of the default ten.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// All parseable records in file order. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<ScoreRecord>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read {}", self.path.display()))
            }
        };

        let mut records = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match ScoreRecord::parse_line(line) {
                Some(record) => records.push(record),
                None => tracing::debug!(line = lineno + 1, "skipping malformed score line"),
            }
        }
        Ok(records)
    }

    /// The best `n` records, highest score first.
    pub fn top(&self, n: usize) -> Result<Vec<ScoreRecord>> {
        let mut records = self.read_all()?;
        rank(&mut records);
        records.truncate(n);
        Ok(records)
    }

    /// Add `record` and keep only the best entries. Returns the resulting table.
    pub fn record(&self, record: &ScoreRecord) -> Result<Vec<ScoreRecord>> {
        let mut records = self.read_all()?;
        records.push(record.clone());
        rank(&mut records);
        records.truncate(self.limit);

        let mut text = String::new();
        for r in &records {
            let _ = writeln!(text, "{}", r.to_line());
        }

        let tmp = self.temp_path();
        fs::write(&tmp, text).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path).with_context(|| {
            format!("failed to move {} to {}", tmp.display(), self.path.display())
        })?;

        tracing::info!(
            score = record.score,
            path = %self.path.display(),
            kept = records.len(),
            "score recorded"
        );
        Ok(records)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "scores".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Sort by score, highest first. Equal scores keep their file order.
fn rank(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Player name from `LOGNAME`, or `"anonymous"`.
pub fn player_name() -> String {
    player_name_from(env::var("LOGNAME").ok())
}

/// Player name from an optional raw value, falling back to `"anonymous"`.
pub fn player_name_from(name: Option<String>) -> String {
    match name.map(|n| sanitize_name(&n)) {
        Some(n) if !n.is_empty() => n,
        _ => ANONYMOUS_PLAYER.to_string(),
    }
}

/// Tabs and line breaks would split a record, so they become spaces.
fn sanitize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Render records as the printed score table, header included.
pub fn format_table(records: &[ScoreRecord]) -> String {
    let mut out = String::from(TABLE_HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&record.to_line());
        out.push('\n');
    }
    out
}
