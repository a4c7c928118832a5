//! Domain model for the periodic-table reference dataset.
//!
//! # Responsibility
//! - Define the stable record shapes consumed by every front end.
//! - Keep storage types (`rusqlite::types::Value`) out of the model.
//!
//! # Invariants
//! - `Element` values are read-only snapshots of persisted rows.
//! - `StatisticsSummary` is derived on demand and never persisted.

pub mod element;
pub mod statistics;
