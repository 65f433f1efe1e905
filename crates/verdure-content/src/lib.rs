//! # verdure-content
//!
//! Opaque content store for plant photo blobs, keyed by path-like
//! references, using Apache OpenDAL for backend-agnostic storage
//! (local filesystem in production, memory in tests).

pub mod error;
pub mod key;
pub mod store;

pub use error::ContentError;
pub use key::{photo_key, predicted_key, sanitize_name};
pub use store::ContentStore;
