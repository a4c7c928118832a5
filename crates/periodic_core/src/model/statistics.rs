//! Aggregate statistics over the element dataset.

use serde::{Deserialize, Serialize};

/// Derived dataset summary. Recomputed on every request.
///
/// `Default` is the all-zero summary returned when the store cannot answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub total_elements: u64,
    pub s_block_count: u64,
    pub p_block_count: u64,
    pub avg_atomic_mass: f64,
}

impl StatisticsSummary {
    /// Returns whether every field is zero.
    pub fn is_zeroed(&self) -> bool {
        *self == Self::default()
    }
}
