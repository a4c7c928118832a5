//! Repository layer over the element store.
//!
//! # Responsibility
//! - Translate typed lookups into named store operations.
//! - Own row normalization; no other layer sees raw rows.
//!
//! # Invariants
//! - "Not found" is a value (`None`/empty), transport failures are errors.
//! - Statistics failures degrade to a zero summary instead of erroring.

pub mod element_repo;
pub mod normalize;
