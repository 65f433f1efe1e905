//! Batch run configuration loaded from environment variables.
//!
//! All settings have defaults matching the historical fixed pacing (one
//! call per 2s, one day per 3s). Override at process startup:
//!
//! | Variable                     | Default          | Description                          |
//! |------------------------------|------------------|--------------------------------------|
//! | `VERDURE_START_DAY`          | `1`              | First day of the batch range         |
//! | `VERDURE_END_DAY`            | `45`             | Last day of the batch range          |
//! | `VERDURE_OP_BURST`           | `1`              | Operation token-bucket capacity      |
//! | `VERDURE_OP_INTERVAL_MS`     | `2000`           | Operation token refill interval      |
//! | `VERDURE_DAY_INTERVAL_MS`    | `3000`           | Day token refill interval            |
//! | `VERDURE_JOURNAL_PATH`       | `plants.json`    | Journal document path                |
//! | `VERDURE_UPLOADS_DIR`        | `public/uploads` | Content store root                   |
//! | `VERDURE_BACKFILL_OFFSET`    | `0`              | Day-number shift for weather backfill|

use std::time::Duration;

use crate::pacer::Pacer;

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Closed day range driven by the batch run.
    pub start_day: u32,
    pub end_day: u32,

    /// Operation bucket: capacity and refill interval.
    pub op_burst: u32,
    pub op_interval_ms: u64,

    /// Day bucket refill interval (capacity 1).
    pub day_interval_ms: u64,

    /// Journal document path for a file-backed run.
    pub journal_path: String,

    /// Content store root for a filesystem-backed run.
    pub uploads_dir: String,

    /// Shift applied when mapping backfill records to day numbers. The
    /// start-date-vs-day-1 ambiguity is configured, not guessed.
    pub backfill_offset: i64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            start_day:       1,
            end_day:         45,
            op_burst:        1,
            op_interval_ms:  2000,
            day_interval_ms: 3000,
            journal_path:    "plants.json".to_string(),
            uploads_dir:     "public/uploads".to_string(),
            backfill_offset: 0,
        }
    }
}

impl BatchConfig {
    /// Load configuration from environment variables, applying defaults
    /// where a variable is absent or unparseable.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            start_day:       env_parse("VERDURE_START_DAY", d.start_day),
            end_day:         env_parse("VERDURE_END_DAY", d.end_day),
            op_burst:        env_parse("VERDURE_OP_BURST", d.op_burst),
            op_interval_ms:  env_parse("VERDURE_OP_INTERVAL_MS", d.op_interval_ms),
            day_interval_ms: env_parse("VERDURE_DAY_INTERVAL_MS", d.day_interval_ms),
            journal_path:    env_str("VERDURE_JOURNAL_PATH", &d.journal_path),
            uploads_dir:     env_str("VERDURE_UPLOADS_DIR", &d.uploads_dir),
            backfill_offset: env_parse("VERDURE_BACKFILL_OFFSET", d.backfill_offset),
        }
    }

    pub fn op_pacer(&self) -> Pacer {
        Pacer::new(self.op_burst, Duration::from_millis(self.op_interval_ms))
    }

    pub fn day_pacer(&self) -> Pacer {
        Pacer::new(1, Duration::from_millis(self.day_interval_ms))
    }
}

fn env_str(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
