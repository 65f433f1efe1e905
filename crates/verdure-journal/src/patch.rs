//! Partial-record patches and sanctioned cross-day propagation edges.
//!
//! Every journal write goes through a [`DayPatch`]: unspecified fields are
//! preserved, so applying the same patch twice is a no-op and patches with
//! disjoint fields compose. Writes that touch a day other than the current
//! one are not ad hoc side effects; they ride along a [`JournalPatch`] as
//! explicit [`Propagation`] edges, so the propagation rule is data the
//! store applies, not control flow buried in an operation.

use serde::{Deserialize, Serialize};

use crate::model::DayRecord;

/// Partial [`DayRecord`]; `None` fields are left untouched on merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPatch {
    pub image: Option<String>,
    pub feedback: Option<String>,
    pub weather: Option<String>,
    pub plant_color: Option<String>,
    pub leaf_count: Option<String>,
    pub infections: Option<String>,
    pub growth_stage: Option<String>,
    pub predicted_image: Option<String>,
    pub predicted_from_previous: Option<String>,
}

impl DayPatch {
    /// Merge the non-empty fields into `record`. Never clears a field the
    /// patch does not carry.
    pub fn merge_into(&self, record: &mut DayRecord) {
        merge(&mut record.image, &self.image);
        merge(&mut record.feedback, &self.feedback);
        merge(&mut record.weather, &self.weather);
        merge(&mut record.plant_color, &self.plant_color);
        merge(&mut record.leaf_count, &self.leaf_count);
        merge(&mut record.infections, &self.infections);
        merge(&mut record.growth_stage, &self.growth_stage);
        merge(&mut record.predicted_image, &self.predicted_image);
        merge(&mut record.predicted_from_previous, &self.predicted_from_previous);
    }

    pub fn is_empty(&self) -> bool {
        *self == DayPatch::default()
    }
}

fn merge(slot: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value {
        *slot = Some(v.clone());
    }
}

/// The two sanctioned kinds of write into a day adjacent to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropagationKind {
    /// Day-N weather fetch writing tomorrow's line into day N+1.
    WeatherForecast,
    /// Day-N image prediction writing its back-reference into day N+1.
    PredictedFrame,
}

/// A directed derivation edge from the patch's primary day into `target_day`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Propagation {
    pub kind: PropagationKind,
    pub target_day: u32,
    pub patch: DayPatch,
}

/// A primary-day patch plus its propagation edges, applied by the store in
/// a single read-modify-write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalPatch {
    pub day: u32,
    pub patch: DayPatch,
    pub propagations: Vec<Propagation>,
}

impl JournalPatch {
    pub fn new(day: u32, patch: DayPatch) -> Self {
        JournalPatch { day, patch, propagations: Vec::new() }
    }

    pub fn propagate(mut self, kind: PropagationKind, target_day: u32, patch: DayPatch) -> Self {
        self.propagations.push(Propagation { kind, target_day, patch });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_idempotent() {
        let patch = DayPatch { weather: Some("sunny".into()), ..Default::default() };
        let mut record = DayRecord::default();
        patch.merge_into(&mut record);
        let once = record.clone();
        patch.merge_into(&mut record);
        assert_eq!(record, once);
    }

    #[test]
    fn merge_preserves_disjoint_fields() {
        let mut record = DayRecord::default();
        let a = DayPatch { weather: Some("sunny".into()), ..Default::default() };
        let b = DayPatch { leaf_count: Some("7".into()), ..Default::default() };
        a.merge_into(&mut record);
        b.merge_into(&mut record);
        assert_eq!(record.weather.as_deref(), Some("sunny"));
        assert_eq!(record.leaf_count.as_deref(), Some("7"));
    }

    #[test]
    fn merge_never_clears() {
        let mut record = DayRecord { feedback: Some("looking good".into()), ..Default::default() };
        DayPatch::default().merge_into(&mut record);
        assert_eq!(record.feedback.as_deref(), Some("looking good"));
    }

    #[test]
    fn merge_overwrites_present_fields() {
        let mut record = DayRecord { weather: Some("old".into()), ..Default::default() };
        let patch = DayPatch { weather: Some("new".into()), ..Default::default() };
        patch.merge_into(&mut record);
        assert_eq!(record.weather.as_deref(), Some("new"));
    }

    #[test]
    fn journal_patch_collects_edges() {
        let jp = JournalPatch::new(4, DayPatch { weather: Some("today".into()), ..Default::default() })
            .propagate(
                PropagationKind::WeatherForecast,
                5,
                DayPatch { weather: Some("tomorrow".into()), ..Default::default() },
            );
        assert_eq!(jp.propagations.len(), 1);
        assert_eq!(jp.propagations[0].target_day, 5);
        assert_eq!(jp.propagations[0].kind, PropagationKind::WeatherForecast);
    }
}
