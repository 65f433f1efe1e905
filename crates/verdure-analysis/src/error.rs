use thiserror::Error;

use crate::analyzer::AnalyzerError;
use verdure_content::ContentError;
use verdure_journal::JournalError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No journal has been initialized yet.
    #[error("no plant saved")]
    NoPlant,

    /// An image-dependent operation was invoked on a day with no photo.
    /// Raised before any upstream call is made.
    #[error("no image for day {day}")]
    MissingImage { day: u32 },

    /// The Analyzer call failed or returned a non-success status.
    #[error("upstream failure: {0}")]
    Upstream(#[from] AnalyzerError),

    /// Image generation succeeded but returned no usable payload.
    #[error("no image generated in response")]
    NoImageInResponse,

    #[error("journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("content error: {0}")]
    Content(#[from] ContentError),
}
