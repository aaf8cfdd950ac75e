//! Runtime configuration from environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `MICRO_TETRIS_KEYS` | left, rotate, right, drop, pause, quit | `jkl pq` |
//! | `MICRO_TETRIS_SCORE_FILE` | high-score file, `off` disables | `./tetris.scores` |
//! | `MICRO_TETRIS_CLEAR_DELAY_MS` | line-clear presentation delay | `180` |
//! | `MICRO_TETRIS_PREVIEW` | `0`/`false`/`off` hides the next piece | shown |
//! | `MICRO_TETRIS_SEED` | piece sequence seed | system clock |
//! | `MICRO_TETRIS_LOG_PATH` | log file; logging is off without it | none |
//! | `MICRO_TETRIS_LOG` | log filter directives | `info` |
//! | `LOGNAME` | player name for the score table | `anonymous` |

use std::env;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::input::KeyMap;
use crate::scores::player_name_from;
use crate::types::LINE_CLEAR_PAUSE_MS;

pub const DEFAULT_SCORE_FILE: &str = "./tetris.scores";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub keys: KeyMap,
    /// `None` disables score persistence.
    pub score_file: Option<PathBuf>,
    pub clear_delay: Duration,
    pub show_preview: bool,
    pub seed: Option<u32>,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
    pub player: String,
    /// Problems found while reading the environment, reported once logging is up.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys: KeyMap::default(),
            score_file: Some(PathBuf::from(DEFAULT_SCORE_FILE)),
            clear_delay: Duration::from_millis(u64::from(LINE_CLEAR_PAUSE_MS)),
            show_preview: true,
            seed: None,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            player: player_name_from(None),
            warnings: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any variable lookup. Invalid values keep their default and add a
    /// warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        if let Some(raw) = lookup("MICRO_TETRIS_KEYS") {
            match KeyMap::parse(&raw) {
                Ok(keys) => config.keys = keys,
                Err(err) => config
                    .warnings
                    .push(format!("MICRO_TETRIS_KEYS ignored: {}", err)),
            }
        }

        if let Some(path) = var("MICRO_TETRIS_SCORE_FILE") {
            config.score_file = if path.eq_ignore_ascii_case("off") {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        if let Some(raw) = var("MICRO_TETRIS_CLEAR_DELAY_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => config.clear_delay = Duration::from_millis(ms),
                Err(_) => config
                    .warnings
                    .push(format!("MICRO_TETRIS_CLEAR_DELAY_MS ignored: {:?}", raw)),
            }
        }

        if let Some(raw) = var("MICRO_TETRIS_PREVIEW") {
            config.show_preview = !matches!(
                raw.to_ascii_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            );
        }

        if let Some(raw) = var("MICRO_TETRIS_SEED") {
            match raw.parse::<u32>() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => config
                    .warnings
                    .push(format!("MICRO_TETRIS_SEED ignored: {:?}", raw)),
            }
        }

        config.log_path = var("MICRO_TETRIS_LOG_PATH").map(PathBuf::from);
        if let Some(filter) = var("MICRO_TETRIS_LOG") {
            config.log_filter = filter;
        }
        config.player = player_name_from(lookup("LOGNAME"));

        config
    }

    /// The configured seed, or one taken from the system clock.
    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
