//! # verdure-analysis
//!
//! Analysis orchestration for the growth journal: the [`Analyzer`]
//! capability trait, prompt construction, defensive extraction of
//! structured values from untrusted upstream text, and the
//! [`AnalysisOrchestrator`] that sequences one operation per analysis kind
//! and merges results back into the journal.
//!
//! Image-dependent operations fail fast before any upstream call; parse
//! failures for structured responses degrade to usable fallbacks instead
//! of aborting.

pub mod analyzer;
pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod prompts;

pub use analyzer::{Analyzer, AnalyzerError};
pub use error::AnalysisError;
pub use extract::{Extraction, SpeciesSuggestion};
pub use orchestrator::{AnalysisOrchestrator, Identification, Prediction, WeatherReport};
