//! The control surface the batch driver sequences over.
//!
//! [`JournalControl`] is transport-agnostic: the driver only needs "read
//! the journal", "move the pointer" and "run operation X". [`LocalControl`]
//! implements it in-process over the orchestrator; a remote transport would
//! implement the same trait without the driver changing.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use verdure_analysis::AnalysisOrchestrator;
use verdure_journal::{Plant, PlantIdentity};

use crate::error::BatchError;

/// The analyses the batch driver runs per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisOp {
    Weather,
    Color,
    LeafCount,
    GrowthStage,
    Infections,
}

impl AnalysisOp {
    /// Fixed order for a day that has a photo.
    pub const WITH_IMAGE: [AnalysisOp; 5] = [
        AnalysisOp::Weather,
        AnalysisOp::Color,
        AnalysisOp::LeafCount,
        AnalysisOp::GrowthStage,
        AnalysisOp::Infections,
    ];

    /// The only analysis that runs without a photo.
    pub const WEATHER_ONLY: [AnalysisOp; 1] = [AnalysisOp::Weather];

    pub fn name(&self) -> &'static str {
        match self {
            AnalysisOp::Weather => "weather",
            AnalysisOp::Color => "color",
            AnalysisOp::LeafCount => "leaf_count",
            AnalysisOp::GrowthStage => "growth_stage",
            AnalysisOp::Infections => "infections",
        }
    }
}

impl std::fmt::Display for AnalysisOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[async_trait]
pub trait JournalControl: Send + Sync {
    /// Current journal document, if one exists.
    async fn journal(&self) -> Result<Option<Plant>, BatchError>;

    /// Move the pointer to `day`, carrying the day's feedback along.
    async fn set_current_day(
        &self,
        day: u32,
        identity: &PlantIdentity,
        feedback: &str,
    ) -> Result<(), BatchError>;

    /// Run one analysis against the current day.
    async fn run(&self, op: AnalysisOp) -> Result<(), BatchError>;
}

/// In-process control surface over the orchestrator.
pub struct LocalControl {
    orchestrator: Arc<AnalysisOrchestrator>,
}

impl LocalControl {
    pub fn new(orchestrator: Arc<AnalysisOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl JournalControl for LocalControl {
    async fn journal(&self) -> Result<Option<Plant>, BatchError> {
        self.orchestrator
            .journal()
            .plant()
            .map_err(|e| BatchError::Control(e.to_string()))
    }

    async fn set_current_day(
        &self,
        day: u32,
        identity: &PlantIdentity,
        feedback: &str,
    ) -> Result<(), BatchError> {
        self.orchestrator
            .record_entry(day, identity, feedback, None)
            .await
            .map_err(|e| BatchError::Control(e.to_string()))
    }

    async fn run(&self, op: AnalysisOp) -> Result<(), BatchError> {
        let result = match op {
            AnalysisOp::Weather => self.orchestrator.weather().await.map(|_| ()),
            AnalysisOp::Color => self.orchestrator.color().await.map(|_| ()),
            AnalysisOp::LeafCount => self.orchestrator.leaf_count().await.map(|_| ()),
            AnalysisOp::GrowthStage => self.orchestrator.growth_stage().await.map(|_| ()),
            AnalysisOp::Infections => self.orchestrator.infections().await.map(|_| ()),
        };
        result.map_err(|e| BatchError::Operation(e.to_string()))
    }
}
