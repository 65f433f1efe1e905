//! The Analyzer capability boundary.
//!
//! The orchestrator consumes this trait and never talks to a concrete AI
//! vendor itself. Every text-producing call returns the raw upstream text:
//! the service behind it is a free-text generator with no enforced schema,
//! so extraction happens on our side (see [`crate::extract`]). Vendor
//! implementations live in the embedding application; prompt text they
//! should send is provided by [`crate::prompts`].

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The upstream call failed or returned a non-success status.
    #[error("{0}")]
    Upstream(String),
}

#[async_trait]
pub trait Analyzer: Send + Sync {
    /// 1-2 paragraph care description for the named plant.
    async fn describe(&self, name: &str) -> Result<String, AnalyzerError>;

    /// Weather for today and tomorrow, expected as two formatted lines.
    async fn weather(&self, city: &str) -> Result<String, AnalyzerError>;

    /// Average plant color, expected as a `#RRGGBB` hex string.
    async fn color(&self, image: &[u8]) -> Result<String, AnalyzerError>;

    /// Visible leaf count, expected as a bare number.
    async fn leaf_count(&self, image: &[u8]) -> Result<String, AnalyzerError>;

    /// Free-text health assessment; a healthy plant yields the sentinel
    /// phrase from [`crate::prompts::HEALTHY_SENTINEL`].
    async fn infection_check(
        &self,
        image: &[u8],
        name: &str,
        about: &str,
    ) -> Result<String, AnalyzerError>;

    /// Growth stage, expected as `{"stage": "..."}` possibly embedded in
    /// surrounding prose.
    async fn growth_stage(
        &self,
        image: &[u8],
        name: &str,
        day: u32,
        leaf_count: &str,
        plant_color: &str,
    ) -> Result<String, AnalyzerError>;

    /// Generated next-day image bytes. May legitimately come back empty
    /// when the generation call succeeds without an image payload.
    async fn predict_next(
        &self,
        image: &[u8],
        name: &str,
        day: u32,
    ) -> Result<Vec<u8>, AnalyzerError>;

    /// Species identification, expected as JSON text with ranked
    /// suggestions under `result.classification.suggestions`.
    async fn identify(&self, image: &[u8]) -> Result<String, AnalyzerError>;

    /// Free-form text generation over an arbitrary prompt.
    async fn generate(&self, prompt: &str) -> Result<String, AnalyzerError>;
}
