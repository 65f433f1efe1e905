//! Integration tests for the batch driver.
//!
//! These exercise the full pipeline: an in-memory journal and content
//! store, the real orchestrator behind the in-process control surface, and
//! a recording analyzer that scripts responses and injectable failures.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use verdure_analysis::{Analyzer, AnalyzerError, AnalysisOrchestrator};
use verdure_batch::{AnalysisOp, BatchDriver, JournalControl, LocalControl, Pacer};
use verdure_content::{photo_key, ContentStore};
use verdure_journal::{DayPatch, JournalStore, MemoryJournalStore, PlantIdentity};

// ─────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────

/// Canned analyzer that records call order and fails on request.
#[derive(Default)]
struct RecordingAnalyzer {
    fail: HashSet<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl RecordingAnalyzer {
    fn failing(ops: &[&'static str]) -> Self {
        RecordingAnalyzer { fail: ops.iter().copied().collect(), calls: Mutex::new(Vec::new()) }
    }

    fn respond(&self, name: &'static str, value: &str) -> Result<String, AnalyzerError> {
        self.calls.lock().unwrap().push(name.to_string());
        if self.fail.contains(name) {
            Err(AnalyzerError::Upstream(format!("{name} exploded")))
        } else {
            Ok(value.to_string())
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Analyzer for RecordingAnalyzer {
    async fn describe(&self, _name: &str) -> Result<String, AnalyzerError> {
        self.respond("describe", "A fragrant culinary herb.")
    }
    async fn weather(&self, _city: &str) -> Result<String, AnalyzerError> {
        self.respond("weather", "High 61°F, Low 52°F\nHigh 63°F, Low 50°F")
    }
    async fn color(&self, _image: &[u8]) -> Result<String, AnalyzerError> {
        self.respond("color", "#4A7C3B")
    }
    async fn leaf_count(&self, _image: &[u8]) -> Result<String, AnalyzerError> {
        self.respond("leaf_count", "7")
    }
    async fn infection_check(
        &self,
        _image: &[u8],
        _name: &str,
        _about: &str,
    ) -> Result<String, AnalyzerError> {
        self.respond("infection_check", "Healthy - No infections detected")
    }
    async fn growth_stage(
        &self,
        _image: &[u8],
        _name: &str,
        _day: u32,
        _leaf_count: &str,
        _plant_color: &str,
    ) -> Result<String, AnalyzerError> {
        self.respond("growth_stage", "{\"stage\": \"Vegetative\"}")
    }
    async fn predict_next(
        &self,
        _image: &[u8],
        _name: &str,
        _day: u32,
    ) -> Result<Vec<u8>, AnalyzerError> {
        self.respond("predict_next", "png").map(|s| s.into_bytes())
    }
    async fn identify(&self, _image: &[u8]) -> Result<String, AnalyzerError> {
        self.respond("identify", "{}")
    }
    async fn generate(&self, _prompt: &str) -> Result<String, AnalyzerError> {
        self.respond("generate", "- Water lightly")
    }
}

fn identity() -> PlantIdentity {
    PlantIdentity {
        name: "Basil".into(),
        city: "San Francisco".into(),
        indoor_location: "kitchen window".into(),
    }
}

struct Fixture {
    journal: Arc<MemoryJournalStore>,
    analyzer: Arc<RecordingAnalyzer>,
    driver: BatchDriver<LocalControl>,
}

/// Seed a journal, give the listed days a stored photo, and wire the
/// driver over the in-process control surface with no pacing.
async fn fixture(analyzer: RecordingAnalyzer, image_days: &[u32]) -> Fixture {
    let journal = Arc::new(MemoryJournalStore::new());
    let content = Arc::new(ContentStore::new_memory().unwrap());
    journal.set_current_day(1, &identity()).unwrap();
    for &day in image_days {
        let key = photo_key("Basil", day);
        content.put(&key, b"real photo").await.unwrap();
        journal
            .upsert_day(day, &DayPatch { image: Some(key), ..Default::default() })
            .unwrap();
    }
    let analyzer = Arc::new(analyzer);
    let orchestrator =
        Arc::new(AnalysisOrchestrator::new(journal.clone(), content, analyzer.clone()));
    let control = LocalControl::new(orchestrator);
    let driver = BatchDriver::new(control, Pacer::unthrottled(), Pacer::unthrottled());
    Fixture { journal, analyzer, driver }
}

fn op_names(ops: &[verdure_batch::OpOutcome]) -> Vec<AnalysisOp> {
    ops.iter().map(|o| o.op).collect()
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[tokio::test]
async fn imageless_day_runs_weather_only() {
    let f = fixture(RecordingAnalyzer::default(), &[]).await;
    let report = f.driver.run(20, 20).await;

    assert_eq!(report.days.len(), 1);
    assert!(report.days[0].skipped.is_none());
    assert_eq!(op_names(&report.days[0].operations), vec![AnalysisOp::Weather]);
    assert_eq!(f.analyzer.calls(), vec!["weather"]);
    assert_eq!(report.failure_count(), 0);
}

#[tokio::test]
async fn image_day_runs_five_ops_in_order() {
    let f = fixture(RecordingAnalyzer::default(), &[21]).await;
    let report = f.driver.run(21, 21).await;

    assert_eq!(
        op_names(&report.days[0].operations),
        vec![
            AnalysisOp::Weather,
            AnalysisOp::Color,
            AnalysisOp::LeafCount,
            AnalysisOp::GrowthStage,
            AnalysisOp::Infections,
        ]
    );
    assert_eq!(
        f.analyzer.calls(),
        vec!["weather", "color", "leaf_count", "growth_stage", "infection_check"]
    );
}

#[tokio::test]
async fn mixed_range_drives_each_day_by_its_shape() {
    // Day 20 has no image, day 21 does: exactly one weather call for the
    // former, five calls for the latter.
    let f = fixture(RecordingAnalyzer::default(), &[21]).await;
    let report = f.driver.run(20, 21).await;

    assert_eq!(report.days[0].operations.len(), 1);
    assert_eq!(report.days[1].operations.len(), 5);
    assert_eq!(
        f.analyzer.calls(),
        vec!["weather", "weather", "color", "leaf_count", "growth_stage", "infection_check"]
    );

    // The driver moved the pointer day by day; it ends on the last day.
    let plant = f.journal.plant().unwrap().unwrap();
    assert_eq!(plant.current_day, 21);
    assert_eq!(plant.days[&21].plant_color.as_deref(), Some("#4A7C3B"));
    assert_eq!(plant.days[&21].growth_stage.as_deref(), Some("Vegetative"));
}

#[tokio::test]
async fn failed_operation_does_not_stop_the_day_or_run() {
    let f = fixture(RecordingAnalyzer::failing(&["color"]), &[21, 22]).await;
    let report = f.driver.run(21, 22).await;

    // Color failed on both days but everything after it still ran.
    for day in &report.days {
        assert!(day.skipped.is_none());
        let errors: Vec<_> =
            day.operations.iter().filter(|o| o.error.is_some()).map(|o| o.op).collect();
        assert_eq!(errors, vec![AnalysisOp::Color]);
        assert_eq!(day.operations.len(), 5);
    }
    assert_eq!(report.failure_count(), 2);

    let color_err = report.days[0].operations[1].error.as_deref().unwrap();
    assert!(color_err.contains("color exploded"));

    // leaf_count ran right after the failing color, both days.
    let calls = f.analyzer.calls();
    assert_eq!(calls.iter().filter(|c| *c == "leaf_count").count(), 2);
}

#[tokio::test]
async fn missing_journal_skips_days_without_aborting() {
    let journal = Arc::new(MemoryJournalStore::new());
    let content = Arc::new(ContentStore::new_memory().unwrap());
    let analyzer = Arc::new(RecordingAnalyzer::default());
    let orchestrator =
        Arc::new(AnalysisOrchestrator::new(journal, content, analyzer.clone()));
    let driver =
        BatchDriver::new(LocalControl::new(orchestrator), Pacer::unthrottled(), Pacer::unthrottled());

    let report = driver.run(1, 3).await;
    assert_eq!(report.days.len(), 3);
    for day in &report.days {
        assert_eq!(day.skipped.as_deref(), Some("no journal initialized"));
        assert!(day.operations.is_empty());
    }
    assert!(analyzer.calls().is_empty());
}

#[tokio::test]
async fn pointer_move_carries_stored_feedback_forward() {
    let f = fixture(RecordingAnalyzer::default(), &[]).await;
    f.journal
        .upsert_day(20, &DayPatch { feedback: Some("drooping a bit".into()), ..Default::default() })
        .unwrap();

    f.driver.run(20, 20).await;

    let plant = f.journal.plant().unwrap().unwrap();
    assert_eq!(plant.days[&20].feedback.as_deref(), Some("drooping a bit"));
}

#[tokio::test]
async fn weather_forward_write_lands_during_batch() {
    let f = fixture(RecordingAnalyzer::default(), &[]).await;
    f.driver.run(20, 20).await;

    let plant = f.journal.plant().unwrap().unwrap();
    assert_eq!(plant.days[&20].weather.as_deref(), Some("High 61°F, Low 52°F"));
    assert_eq!(plant.days[&21].weather.as_deref(), Some("High 63°F, Low 50°F"));
}

#[tokio::test]
async fn control_surface_reports_current_journal() {
    let f = fixture(RecordingAnalyzer::default(), &[]).await;

    // LocalControl::journal surfaces the same document the store holds.
    let content = Arc::new(ContentStore::new_memory().unwrap());
    let orchestrator = Arc::new(AnalysisOrchestrator::new(
        f.journal.clone(),
        content,
        f.analyzer.clone(),
    ));
    let control = LocalControl::new(orchestrator);
    let plant = control.journal().await.unwrap().unwrap();
    assert_eq!(plant.name, "Basil");
    control.set_current_day(7, &plant.identity(), "").await.unwrap();
    assert_eq!(control.journal().await.unwrap().unwrap().current_day, 7);
}
