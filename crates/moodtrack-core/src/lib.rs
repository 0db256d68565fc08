//! MoodTrack Core
//!
//! Core types and utilities shared across MoodTrack components.
//!
//! This crate provides:
//! - The sentiment label type and the corpus label codes that map onto it
//! - Labeled training examples
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{LabeledExample, Sentiment};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{LabeledExample, Sentiment};
}
