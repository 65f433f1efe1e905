//! The persisted journal document: one [`Plant`] with a day-indexed map of
//! [`DayRecord`]s.
//!
//! The on-disk layout matches the historical document shape: camelCase
//! field names and `"day<N>"` string keys in the `days` mapping, e.g.
//!
//! ```json
//! {
//!   "name": "Basil",
//!   "city": "San Francisco",
//!   "indoorLocation": "kitchen window",
//!   "about": null,
//!   "currentDay": 20,
//!   "days": { "day20": { "weather": "High 61°F, ..." } }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Singleton journal root for the tracked plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub name: String,
    pub city: String,
    pub indoor_location: String,
    /// Free-text care description, absent until enhanced.
    pub about: Option<String>,
    /// Pointer to the day the orchestrator operates on. Always resolves to
    /// an existing or lazily-creatable record.
    pub current_day: u32,
    /// Day number → record. Sparse; keys beyond any pre-populated range are
    /// created on demand.
    #[serde(with = "day_keys")]
    pub days: BTreeMap<u32, DayRecord>,
}

/// Per-day bag of raw and derived fields, all optional until written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Reference to a stored real photo of the plant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// One-line formatted weather summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    /// Hex color string, e.g. `#4A7C3B`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant_color: Option<String>,
    /// Numeric-as-string; a non-numeric fallback is kept as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infections: Option<String>,
    /// Open enumeration, not strictly validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_stage: Option<String>,
    /// Next-day image generated from this day's real photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_image: Option<String>,
    /// Back-reference: the predicted image a prior day generated for this
    /// day. Same artifact as that day's `predicted_image`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_from_previous: Option<String>,
}

/// Identity fields carried by every set-current-day call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantIdentity {
    pub name: String,
    pub city: String,
    pub indoor_location: String,
}

impl Plant {
    /// Create a fresh journal positioned at `day`, with empty records
    /// pre-populated over `1..=max(prepopulate, day)` so forward writes
    /// into adjacent days land on existing keys.
    pub fn bootstrap(identity: &PlantIdentity, day: u32, prepopulate: u32) -> Self {
        let mut days = BTreeMap::new();
        for n in 1..=prepopulate.max(day) {
            days.insert(n, DayRecord::default());
        }
        Plant {
            name: identity.name.clone(),
            city: identity.city.clone(),
            indoor_location: identity.indoor_location.clone(),
            about: None,
            current_day: day,
            days,
        }
    }

    pub fn identity(&self) -> PlantIdentity {
        PlantIdentity {
            name: self.name.clone(),
            city: self.city.clone(),
            indoor_location: self.indoor_location.clone(),
        }
    }

    /// The record under the pointer, if it exists yet.
    pub fn current_record(&self) -> Option<&DayRecord> {
        self.days.get(&self.current_day)
    }

    pub fn day(&self, day: u32) -> Option<&DayRecord> {
        self.days.get(&day)
    }
}

/// Serialize `BTreeMap<u32, DayRecord>` with `"day<N>"` string keys.
mod day_keys {
    use std::collections::BTreeMap;

    use serde::de::Error as DeError;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DayRecord;

    pub fn serialize<S: Serializer>(
        days: &BTreeMap<u32, DayRecord>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(days.len()))?;
        for (n, record) in days {
            map.serialize_entry(&format!("day{n}"), record)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<BTreeMap<u32, DayRecord>, D::Error> {
        let raw: BTreeMap<String, DayRecord> = BTreeMap::deserialize(de)?;
        let mut days = BTreeMap::new();
        for (key, record) in raw {
            let n: u32 = key
                .strip_prefix("day")
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| D::Error::custom(format!("invalid day key '{key}'")))?;
            if n == 0 {
                return Err(D::Error::custom("day numbers start at 1"));
            }
            days.insert(n, record);
        }
        Ok(days)
    }
}
