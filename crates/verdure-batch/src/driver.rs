//! Day-range driver: a pure sequencing shell over the control surface.
//!
//! Strictly sequential: each operation is awaited before the next is
//! issued, each day before the next day. Any failure is recorded in the
//! run report and the sequence continues; nothing aborts the run.

use serde::Serialize;
use tracing::{info, warn};

use crate::control::{AnalysisOp, JournalControl};
use crate::pacer::Pacer;

#[derive(Debug, Clone, Serialize)]
pub struct OpOutcome {
    pub op: AnalysisOp,
    /// Failure message, `None` on success.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayOutcome {
    pub day: u32,
    /// Set when the whole day was skipped (no journal, pointer move
    /// failed) before any analysis ran.
    pub skipped: Option<String>,
    pub operations: Vec<OpOutcome>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub start_day: u32,
    pub end_day: u32,
    pub days: Vec<DayOutcome>,
}

impl BatchReport {
    pub fn failure_count(&self) -> usize {
        self.days
            .iter()
            .map(|d| {
                d.skipped.iter().count()
                    + d.operations.iter().filter(|o| o.error.is_some()).count()
            })
            .sum()
    }
}

pub struct BatchDriver<C> {
    control: C,
    op_pacer: Pacer,
    day_pacer: Pacer,
}

impl<C: JournalControl> BatchDriver<C> {
    pub fn new(control: C, op_pacer: Pacer, day_pacer: Pacer) -> Self {
        Self { control, op_pacer, day_pacer }
    }

    /// Drive every day of the closed range `[start, end]` in order.
    pub async fn run(&self, start: u32, end: u32) -> BatchReport {
        let mut days = Vec::new();
        for day in start..=end {
            self.day_pacer.acquire().await;
            info!(day, "analyzing day");
            let outcome = self.run_day(day).await;
            if let Some(reason) = &outcome.skipped {
                warn!(day, reason = %reason, "day skipped");
            }
            days.push(outcome);
        }
        let report = BatchReport { start_day: start, end_day: end, days };
        info!(
            start,
            end,
            failures = report.failure_count(),
            "batch analysis complete"
        );
        report
    }

    async fn run_day(&self, day: u32) -> DayOutcome {
        let skipped = |reason: String| DayOutcome { day, skipped: Some(reason), operations: vec![] };

        // Pointer move carries the day's stored feedback forward.
        let plant = match self.control.journal().await {
            Ok(Some(plant)) => plant,
            Ok(None) => return skipped("no journal initialized".to_string()),
            Err(e) => return skipped(e.to_string()),
        };
        let feedback = plant
            .day(day)
            .and_then(|r| r.feedback.clone())
            .unwrap_or_default();
        if let Err(e) = self.control.set_current_day(day, &plant.identity(), &feedback).await {
            return skipped(e.to_string());
        }

        // Re-read: only a day with a photo gets the image-based analyses.
        let has_image = match self.control.journal().await {
            Ok(Some(plant)) => plant.day(day).map_or(false, |r| r.image.is_some()),
            Ok(None) => false,
            Err(e) => return skipped(e.to_string()),
        };
        let ops: &[AnalysisOp] = if has_image {
            &AnalysisOp::WITH_IMAGE
        } else {
            info!(day, "no image, running weather only");
            &AnalysisOp::WEATHER_ONLY
        };

        let mut operations = Vec::with_capacity(ops.len());
        for &op in ops {
            self.op_pacer.acquire().await;
            let error = match self.control.run(op).await {
                Ok(()) => {
                    info!(day, op = %op, "ok");
                    None
                }
                Err(e) => {
                    warn!(day, op = %op, error = %e, "operation failed, continuing");
                    Some(e.to_string())
                }
            };
            operations.push(OpOutcome { op, error });
        }
        DayOutcome { day, skipped: None, operations }
    }
}
