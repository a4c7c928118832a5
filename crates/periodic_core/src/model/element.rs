//! Element domain model.
//!
//! # Responsibility
//! - Define the canonical periodic-table entry shared by console and GUI views.
//! - Validate record-level invariants once, at construction from storage.
//!
//! # Invariants
//! - `atomic_number` and `period` are >= 1.
//! - `atomic_mass` is finite and > 0.
//! - `group_number` is `None` when the element has no standard group.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Atomic number; the dataset's unique key.
pub type AtomicNumber = i64;

/// Electron block an element belongs to.
///
/// The reference dataset only carries s- and p-block elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    S,
    P,
}

impl Block {
    pub const ALL: [Block; 2] = [Block::S, Block::P];

    /// Storage/display code, `s` or `p`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::S => "s",
            Self::P => "p",
        }
    }

    /// Parses an exact stored block code. Does not trim or fold case.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "s" => Some(Self::S),
            "p" => Some(Self::P),
            _ => None,
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One periodic-table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub atomic_number: AtomicNumber,
    /// Case-sensitive as stored, e.g. `He`.
    pub symbol: String,
    pub name: String,
    pub atomic_mass: f64,
    pub block: Block,
    pub group_number: Option<i64>,
    pub period: i64,
    /// Free-form notation, e.g. `[He] 2s2 2p1`.
    pub electron_configuration: String,
}

impl Element {
    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ElementValidationError> {
        if self.atomic_number < 1 {
            return Err(ElementValidationError::AtomicNumberOutOfRange(
                self.atomic_number,
            ));
        }
        if self.symbol.trim().is_empty() {
            return Err(ElementValidationError::EmptySymbol);
        }
        if !self.atomic_mass.is_finite() || self.atomic_mass <= 0.0 {
            return Err(ElementValidationError::NonPositiveMass(self.atomic_mass));
        }
        if self.period < 1 {
            return Err(ElementValidationError::PeriodOutOfRange(self.period));
        }
        Ok(())
    }
}

/// Record-level invariant violation.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValidationError {
    AtomicNumberOutOfRange(i64),
    EmptySymbol,
    NonPositiveMass(f64),
    PeriodOutOfRange(i64),
}

impl Display for ElementValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AtomicNumberOutOfRange(value) => {
                write!(f, "atomic_number must be >= 1, got {value}")
            }
            Self::EmptySymbol => write!(f, "symbol cannot be empty"),
            Self::NonPositiveMass(value) => {
                write!(f, "atomic_mass must be a finite value > 0, got {value}")
            }
            Self::PeriodOutOfRange(value) => write!(f, "period must be >= 1, got {value}"),
        }
    }
}

impl Error for ElementValidationError {}
