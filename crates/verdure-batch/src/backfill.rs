//! Historical weather backfill.
//!
//! Takes a run of consecutive daily records (fetched by the embedding
//! application from whatever archive it likes) and writes the canonical
//! one-line summaries over consecutive day numbers. The mapping from the
//! first record to a day number is ambiguous in the source data
//! (start date vs. "day 1"), so it is a configured offset, not a guess:
//! record `i` lands on day `i + 1 + offset`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use verdure_journal::{DayPatch, JournalStore};

use crate::error::BatchError;

/// One day of archived weather, pre-formatted times included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDay {
    pub high_f: f64,
    pub low_f: f64,
    /// Daily average relative humidity; archives sometimes lack it.
    pub humidity_pct: Option<u32>,
    /// Local time string, e.g. `7:15 AM`.
    pub sunrise: String,
    pub sunset: String,
    pub daylight_secs: u64,
}

impl WeatherDay {
    /// The canonical one-line summary the journal stores.
    pub fn summary(&self) -> String {
        let humidity = match self.humidity_pct {
            Some(h) => h.to_string(),
            None => "?".to_string(),
        };
        let hours = self.daylight_secs / 3600;
        let minutes = (self.daylight_secs % 3600) / 60;
        format!(
            "High {}°F, Low {}°F, Humidity {}%, Sunrise {}, Sunset {}, Daylight {} hours {} minutes",
            self.high_f.round(),
            self.low_f.round(),
            humidity,
            self.sunrise,
            self.sunset,
            hours,
            minutes,
        )
    }
}

/// Write `records` over consecutive day numbers starting at `1 + offset`.
/// Records that would land before day 1 are skipped. Returns the number of
/// days written. Requires an initialized journal.
pub fn backfill_weather(
    store: &dyn JournalStore,
    records: &[WeatherDay],
    offset: i64,
) -> Result<usize, BatchError> {
    if store
        .plant()
        .map_err(|e| BatchError::Control(e.to_string()))?
        .is_none()
    {
        return Err(BatchError::Control("no journal initialized".to_string()));
    }

    let mut written = 0;
    for (i, record) in records.iter().enumerate() {
        let day = i as i64 + 1 + offset;
        if day < 1 {
            debug!(index = i, day, "record maps before day 1, skipping");
            continue;
        }
        let day = day as u32;
        let patch = DayPatch { weather: Some(record.summary()), ..Default::default() };
        store
            .upsert_day(day, &patch)
            .map_err(|e| BatchError::Control(e.to_string()))?;
        written += 1;
    }
    info!(written, offset, "weather backfill complete");
    Ok(written)
}
