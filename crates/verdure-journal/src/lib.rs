//! # verdure-journal
//!
//! Day-indexed growth journal for a single tracked plant: the persisted
//! [`Plant`]/[`DayRecord`] document, partial-record patches with explicit
//! cross-day propagation edges, and the injectable [`JournalStore`] trait
//! with durable (file) and in-memory implementations.

pub mod error;
pub mod model;
pub mod patch;
pub mod store;

pub use error::JournalError;
pub use model::{DayRecord, Plant, PlantIdentity};
pub use patch::{DayPatch, JournalPatch, Propagation, PropagationKind};
pub use store::{
    FileJournalStore, JournalStore, MemoryJournalStore, DEFAULT_PREPOPULATE_DAYS,
};
