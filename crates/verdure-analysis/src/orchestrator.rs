//! One operation per analysis kind, sequenced over the journal.
//!
//! Every operation requires a journal (`NoPlant` otherwise) and operates on
//! the record under `current_day`. Image-dependent operations fail fast
//! before any upstream call, so a day without a photo never costs a remote
//! round trip. Writes that touch day N+1 (tomorrow's weather line, the
//! predicted-image back-reference) go through explicit propagation edges on
//! the journal patch; no other operation touches a day it is not pointed
//! at.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use verdure_content::{photo_key, predicted_key, ContentStore};
use verdure_journal::{
    DayPatch, DayRecord, JournalPatch, JournalStore, Plant, PlantIdentity, PropagationKind,
};

use crate::analyzer::Analyzer;
use crate::error::AnalysisError;
use crate::extract::{self, Extraction, SpeciesSuggestion};
use crate::prompts;

/// Outcome of a weather fetch: today's line always lands on the current
/// day; tomorrow's, when present, was forward-written into day N+1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub day: u32,
    pub today: String,
    pub tomorrow: Option<String>,
}

/// Outcome of a successful image prediction. The same artifact reference
/// is recorded on both ends of the derivation edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub day: u32,
    pub artifact: String,
}

/// Outcome of species identification. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    pub suggestions: Vec<SpeciesSuggestion>,
    /// Raw upstream text, kept when the response shape was not understood.
    pub raw: Option<String>,
}

pub struct AnalysisOrchestrator {
    journal: Arc<dyn JournalStore>,
    content: Arc<ContentStore>,
    analyzer: Arc<dyn Analyzer>,
}

impl AnalysisOrchestrator {
    pub fn new(
        journal: Arc<dyn JournalStore>,
        content: Arc<ContentStore>,
        analyzer: Arc<dyn Analyzer>,
    ) -> Self {
        Self { journal, content, analyzer }
    }

    pub fn journal(&self) -> &Arc<dyn JournalStore> {
        &self.journal
    }

    // ── Journal writes ────────────────────────────────────────────────

    /// Move the pointer to `day`, creating the journal if absent, and
    /// record the day's feedback plus an optional uploaded photo.
    pub async fn record_entry(
        &self,
        day: u32,
        identity: &PlantIdentity,
        feedback: &str,
        photo: Option<&[u8]>,
    ) -> Result<(), AnalysisError> {
        self.journal.set_current_day(day, identity)?;

        let mut patch = DayPatch { feedback: Some(feedback.to_string()), ..Default::default() };
        if let Some(bytes) = photo {
            let key = photo_key(&identity.name, day);
            self.content.put(&key, bytes).await?;
            patch.image = Some(key);
        }
        self.journal.upsert_day(day, &patch)?;
        info!(day, has_photo = photo.is_some(), "journal entry recorded");
        Ok(())
    }

    /// Discard the entire journal document.
    pub fn reset(&self) -> Result<(), AnalysisError> {
        self.journal.reset()?;
        Ok(())
    }

    // ── Analyses ──────────────────────────────────────────────────────

    /// Fetch a care description for the plant and store it journal-wide.
    pub async fn enhance_about(&self) -> Result<String, AnalysisError> {
        let plant = self.require_plant()?;
        info!(name = %plant.name, "enhancing plant description");
        let about = self.analyzer.describe(&plant.name).await?;
        self.journal.set_about(&about)?;
        Ok(about)
    }

    /// Fetch today's and tomorrow's weather for the plant's city. Line 1
    /// lands on the current day; a second line unconditionally overwrites
    /// day N+1's entry (latest fetch wins).
    pub async fn weather(&self) -> Result<WeatherReport, AnalysisError> {
        let plant = self.require_plant()?;
        let day = plant.current_day;
        info!(city = %plant.city, day, "fetching weather");

        let raw = self.analyzer.weather(&plant.city).await?;
        let (today, tomorrow) = extract::weather_lines(&raw);

        let mut patch = JournalPatch::new(
            day,
            DayPatch { weather: Some(today.clone()), ..Default::default() },
        );
        if let Some(line) = &tomorrow {
            patch = patch.propagate(
                PropagationKind::WeatherForecast,
                day + 1,
                DayPatch { weather: Some(line.clone()), ..Default::default() },
            );
        } else {
            debug!(day, "single-line weather response, day {} untouched", day + 1);
        }
        self.journal.apply(&patch)?;
        Ok(WeatherReport { day, today, tomorrow })
    }

    /// Average plant color from the day's photo.
    pub async fn color(&self) -> Result<Extraction<String>, AnalysisError> {
        let (_, day, image) = self.require_image()?;
        let bytes = self.content.get(&image).await?;
        let raw = self.analyzer.color(&bytes).await?;
        let color = extract::hex_color(&raw);
        if !color.is_parsed() {
            warn!(day, raw = %raw.trim(), "color response carried no hex code");
        }
        self.upsert(day, DayPatch {
            plant_color: Some(color.value().to_string()),
            ..Default::default()
        })?;
        Ok(color)
    }

    /// Visible leaf count from the day's photo. Stored as-is; the field is
    /// tolerant of a non-numeric fallback.
    pub async fn leaf_count(&self) -> Result<String, AnalysisError> {
        let (_, day, image) = self.require_image()?;
        let bytes = self.content.get(&image).await?;
        let count = self.analyzer.leaf_count(&bytes).await?.trim().to_string();
        self.upsert(day, DayPatch { leaf_count: Some(count.clone()), ..Default::default() })?;
        Ok(count)
    }

    /// Health assessment from the day's photo, informed by the plant's
    /// care description.
    pub async fn infections(&self) -> Result<String, AnalysisError> {
        let (plant, day, image) = self.require_image()?;
        let about = plant.about.as_deref().unwrap_or("No plant info available");
        let bytes = self.content.get(&image).await?;
        let report = self
            .analyzer
            .infection_check(&bytes, &plant.name, about)
            .await?
            .trim()
            .to_string();
        self.upsert(day, DayPatch { infections: Some(report.clone()), ..Default::default() })?;
        Ok(report)
    }

    /// Growth-stage classification from the day's photo plus the leaf
    /// count and color already recorded. A response that doesn't parse as
    /// `{"stage"}` degrades to the raw text; either way a value is stored.
    pub async fn growth_stage(&self) -> Result<Extraction<String>, AnalysisError> {
        let (plant, day, image) = self.require_image()?;
        let record = plant.day(day).cloned().unwrap_or_default();
        let leaf_count = record.leaf_count.as_deref().unwrap_or("unknown");
        let plant_color = record.plant_color.as_deref().unwrap_or("unknown");

        let bytes = self.content.get(&image).await?;
        let raw = self
            .analyzer
            .growth_stage(&bytes, &plant.name, day, leaf_count, plant_color)
            .await?;
        let stage = extract::stage_json(&raw);
        if !stage.is_parsed() {
            warn!(day, "growth-stage response was not valid JSON, keeping raw text");
        }
        self.upsert(day, DayPatch {
            growth_stage: Some(stage.value().to_string()),
            ..Default::default()
        })?;
        Ok(stage)
    }

    /// Generate tomorrow's predicted frame from today's photo. The stored
    /// artifact is referenced from both ends of the derivation edge: this
    /// day's `predicted_image` and day N+1's `predicted_from_previous`.
    /// On any failure neither field is written.
    pub async fn predict_image(&self) -> Result<Prediction, AnalysisError> {
        let (plant, day, image) = self.require_image()?;
        info!(day, next_day = day + 1, "generating predicted frame");

        let bytes = self.content.get(&image).await?;
        let generated = self.analyzer.predict_next(&bytes, &plant.name, day).await?;
        if generated.is_empty() {
            return Err(AnalysisError::NoImageInResponse);
        }

        let artifact = predicted_key(&plant.name, day + 1);
        self.content.put(&artifact, &generated).await?;

        let patch = JournalPatch::new(
            day,
            DayPatch { predicted_image: Some(artifact.clone()), ..Default::default() },
        )
        .propagate(
            PropagationKind::PredictedFrame,
            day + 1,
            DayPatch { predicted_from_previous: Some(artifact.clone()), ..Default::default() },
        );
        self.journal.apply(&patch)?;
        Ok(Prediction { day, artifact })
    }

    /// Species identification from the day's photo. Top 5 suggestions,
    /// reduced; a malformed response yields an empty list plus the raw
    /// text. Never persisted.
    pub async fn identify(&self) -> Result<Identification, AnalysisError> {
        let (_, day, image) = self.require_image()?;
        debug!(day, "identifying species");
        let bytes = self.content.get(&image).await?;
        let raw = self.analyzer.identify(&bytes).await?;
        let (suggestions, raw) = extract::species_suggestions(&raw);
        Ok(Identification { suggestions, raw })
    }

    /// Short bulleted care recommendations built from the current and
    /// previous day's fields. Never persisted.
    pub async fn insights(&self) -> Result<String, AnalysisError> {
        let plant = self.require_plant()?;
        let context = insight_context(&plant);
        let text = self.analyzer.generate(&prompts::insights(&plant.name, &context)).await?;
        Ok(text)
    }

    // ── Helpers ───────────────────────────────────────────────────────

    fn require_plant(&self) -> Result<Plant, AnalysisError> {
        self.journal.plant()?.ok_or(AnalysisError::NoPlant)
    }

    /// Preconditions for image-dependent operations, checked before any
    /// upstream call: a journal exists and the current day has a photo.
    fn require_image(&self) -> Result<(Plant, u32, String), AnalysisError> {
        let plant = self.require_plant()?;
        let day = plant.current_day;
        let image = plant
            .day(day)
            .and_then(|r| r.image.clone())
            .ok_or(AnalysisError::MissingImage { day })?;
        Ok((plant, day, image))
    }

    fn upsert(&self, day: u32, patch: DayPatch) -> Result<(), AnalysisError> {
        self.journal.upsert_day(day, &patch)?;
        Ok(())
    }
}

/// Text context for the insights prompt: the current day's readings plus
/// the previous day's, when it exists.
fn insight_context(plant: &Plant) -> String {
    let day = plant.current_day;
    let mut ctx = String::new();
    push_day_context(&mut ctx, day, plant.day(day));
    if day > 1 {
        push_day_context(&mut ctx, day - 1, plant.day(day - 1));
    }
    ctx
}

fn push_day_context(ctx: &mut String, day: u32, record: Option<&DayRecord>) {
    let record = record.cloned().unwrap_or_default();
    let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "unknown".to_string());
    ctx.push_str(&format!(
        "Day {day}:\n\
         - Weather: {}\n\
         - Leaf count: {}\n\
         - Plant color: {}\n\
         - Growth stage: {}\n\
         - Infections: {}\n",
        field(&record.weather),
        field(&record.leaf_count),
        field(&record.plant_color),
        field(&record.growth_stage),
        field(&record.infections),
    ));
}
