//! MoodTrack Journal
//!
//! Stores classified journal entries and derives the mood trend across them.
//!
//! Provides:
//! - A JSON file of `(entry, sentiment)` records, one per distinct entry text
//! - A trend series of sentiment scores by entry number
//! - Deleting all entries

pub mod journal;

pub use journal::{Journal, JournalEntry, TrendPoint, MIN_TREND_ENTRIES};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::journal::{Journal, JournalEntry, TrendPoint};
}
