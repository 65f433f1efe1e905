//! # verdure-batch
//!
//! Sequencing shell over the analysis orchestrator: the transport-agnostic
//! [`JournalControl`] control surface with an in-process implementation,
//! the token-bucket [`Pacer`], the day-range [`BatchDriver`] with
//! per-operation failure isolation, and historical weather backfill.

pub mod backfill;
pub mod config;
pub mod control;
pub mod driver;
pub mod error;
pub mod pacer;

pub use backfill::{backfill_weather, WeatherDay};
pub use config::BatchConfig;
pub use control::{AnalysisOp, JournalControl, LocalControl};
pub use driver::{BatchDriver, BatchReport, DayOutcome, OpOutcome};
pub use error::BatchError;
pub use pacer::Pacer;
