//! Knobs that bound how hard dealing and shuffling try before falling back.

use serde::{Deserialize, Serialize};

/// Retry budgets and presentation switches for dealing and shuffling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationTuning {
    /// Reverse-construction runs tried before a new deal falls back to an
    /// unconstrained assignment.
    pub generation_attempts: u32,
    /// Reverse-construction runs tried before a shuffle falls back to a plain
    /// permutation.
    pub shuffle_attempts: u32,
    /// Whether dealt boards are post-processed to avoid repeated faces in a
    /// row.
    pub refine_same_rows: bool,
}

impl GenerationTuning {
    /// Tuning with both retry budgets set to zero, forcing the fallback path.
    #[must_use]
    pub const fn without_retries() -> Self {
        Self {
            generation_attempts: 0,
            shuffle_attempts: 0,
            refine_same_rows: false,
        }
    }
}

impl Default for GenerationTuning {
    fn default() -> Self {
        Self {
            generation_attempts: 50,
            shuffle_attempts: 20,
            refine_same_rows: true,
        }
    }
}
