//! Raw row to `Element` normalization.
//!
//! # Responsibility
//! - Turn one positional store row into a validated `Element`.
//! - Re-serialize an `Element` into the same positional shape.
//!
//! # Invariants
//! - Rows have exactly eight columns; anything else is malformed.
//! - Mass is coerced to `f64` explicitly; a non-numeric mass is malformed,
//!   never defaulted.

use crate::model::element::{Block, Element, ElementValidationError};
use rusqlite::types::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const ELEMENT_ROW_WIDTH: usize = 8;

/// The store returned a row inconsistent with the element row contract.
#[derive(Debug, Clone, PartialEq)]
pub enum MalformedRowError {
    ColumnCount {
        expected: usize,
        actual: usize,
    },
    InvalidColumn {
        column: &'static str,
        message: String,
    },
    NonNumericMass(String),
    InvalidRecord(ElementValidationError),
}

impl Display for MalformedRowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ColumnCount { expected, actual } => {
                write!(f, "expected {expected} column(s), got {actual}")
            }
            Self::InvalidColumn { column, message } => {
                write!(f, "invalid value in column `{column}`: {message}")
            }
            Self::NonNumericMass(value) => write!(f, "atomic_mass `{value}` is not numeric"),
            Self::InvalidRecord(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MalformedRowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRecord(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ElementValidationError> for MalformedRowError {
    fn from(value: ElementValidationError) -> Self {
        Self::InvalidRecord(value)
    }
}

/// Maps one raw row onto an `Element`.
pub fn normalize_row(row: &[Value]) -> Result<Element, MalformedRowError> {
    let [atomic_number, symbol, name, atomic_mass, block, group_number, period, electron_configuration] =
        row
    else {
        return Err(MalformedRowError::ColumnCount {
            expected: ELEMENT_ROW_WIDTH,
            actual: row.len(),
        });
    };

    let block_code = text_column("block", block)?;
    let block = Block::parse(&block_code).ok_or_else(|| MalformedRowError::InvalidColumn {
        column: "block",
        message: format!("unknown block `{block_code}`"),
    })?;

    let element = Element {
        atomic_number: integer_column("atomic_number", atomic_number)?,
        symbol: text_column("symbol", symbol)?,
        name: text_column("name", name)?,
        atomic_mass: coerce_mass(atomic_mass)?,
        block,
        group_number: optional_integer_column("group_number", group_number)?,
        period: integer_column("period", period)?,
        electron_configuration: text_column("electron_configuration", electron_configuration)?,
    };
    element.validate()?;
    Ok(element)
}

/// Inverse of `normalize_row`; mass is always emitted as REAL.
pub fn element_to_row(element: &Element) -> Vec<Value> {
    vec![
        Value::Integer(element.atomic_number),
        Value::Text(element.symbol.clone()),
        Value::Text(element.name.clone()),
        Value::Real(element.atomic_mass),
        Value::Text(element.block.as_str().to_string()),
        element.group_number.map_or(Value::Null, Value::Integer),
        Value::Integer(element.period),
        Value::Text(element.electron_configuration.clone()),
    ]
}

/// Coerces a stored numeric-ish value (REAL, INTEGER or numeric TEXT) to `f64`.
pub(crate) fn coerce_mass(value: &Value) -> Result<f64, MalformedRowError> {
    match value {
        Value::Real(mass) => Ok(*mass),
        Value::Integer(mass) => Ok(*mass as f64),
        Value::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| MalformedRowError::NonNumericMass(text.clone())),
        other => Err(MalformedRowError::NonNumericMass(describe(other))),
    }
}

fn integer_column(column: &'static str, value: &Value) -> Result<i64, MalformedRowError> {
    match value {
        Value::Integer(number) => Ok(*number),
        other => Err(MalformedRowError::InvalidColumn {
            column,
            message: format!("expected integer, got {}", describe(other)),
        }),
    }
}

fn optional_integer_column(
    column: &'static str,
    value: &Value,
) -> Result<Option<i64>, MalformedRowError> {
    match value {
        Value::Null => Ok(None),
        other => integer_column(column, other).map(Some),
    }
}

fn text_column(column: &'static str, value: &Value) -> Result<String, MalformedRowError> {
    match value {
        Value::Text(text) => Ok(text.clone()),
        other => Err(MalformedRowError::InvalidColumn {
            column,
            message: format!("expected text, got {}", describe(other)),
        }),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(number) => format!("integer {number}"),
        Value::Real(number) => format!("real {number}"),
        Value::Text(text) => format!("text `{text}`"),
        Value::Blob(bytes) => format!("blob of {} byte(s)", bytes.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::{element_to_row, normalize_row, MalformedRowError, ELEMENT_ROW_WIDTH};
    use crate::model::element::{Block, ElementValidationError};
    use rusqlite::types::Value;

    fn boron_row() -> Vec<Value> {
        vec![
            Value::Integer(5),
            Value::Text("B".to_string()),
            Value::Text("Boron".to_string()),
            Value::Real(10.81),
            Value::Text("p".to_string()),
            Value::Integer(13),
            Value::Integer(2),
            Value::Text("[He] 2s2 2p1".to_string()),
        ]
    }

    #[test]
    fn maps_columns_positionally() {
        let element = normalize_row(&boron_row()).unwrap();
        assert_eq!(element.atomic_number, 5);
        assert_eq!(element.symbol, "B");
        assert_eq!(element.name, "Boron");
        assert_eq!(element.atomic_mass, 10.81);
        assert_eq!(element.block, Block::P);
        assert_eq!(element.group_number, Some(13));
        assert_eq!(element.period, 2);
        assert_eq!(element.electron_configuration, "[He] 2s2 2p1");
    }

    #[test]
    fn reserializing_reproduces_the_row() {
        let row = boron_row();
        let element = normalize_row(&row).unwrap();
        assert_eq!(element_to_row(&element), row);
    }

    #[test]
    fn coerces_text_and_integer_mass() {
        let mut row = boron_row();
        row[3] = Value::Text(" 10.8100 ".to_string());
        assert_eq!(normalize_row(&row).unwrap().atomic_mass, 10.81);

        row[3] = Value::Integer(11);
        assert_eq!(normalize_row(&row).unwrap().atomic_mass, 11.0);
    }

    #[test]
    fn null_group_is_unset_not_zero() {
        let mut row = boron_row();
        row[5] = Value::Null;
        assert_eq!(normalize_row(&row).unwrap().group_number, None);
    }

    #[test]
    fn short_and_long_rows_are_malformed() {
        let mut row = boron_row();
        row.pop();
        assert_eq!(
            normalize_row(&row).unwrap_err(),
            MalformedRowError::ColumnCount {
                expected: ELEMENT_ROW_WIDTH,
                actual: 7
            }
        );

        let mut row = boron_row();
        row.push(Value::Null);
        assert!(matches!(
            normalize_row(&row),
            Err(MalformedRowError::ColumnCount { actual: 9, .. })
        ));
    }

    #[test]
    fn non_numeric_mass_is_malformed() {
        let mut row = boron_row();
        row[3] = Value::Text("unknown".to_string());
        assert_eq!(
            normalize_row(&row).unwrap_err(),
            MalformedRowError::NonNumericMass("unknown".to_string())
        );

        row[3] = Value::Null;
        assert!(matches!(
            normalize_row(&row),
            Err(MalformedRowError::NonNumericMass(_))
        ));
    }

    #[test]
    fn unknown_block_and_wrong_types_are_malformed() {
        let mut row = boron_row();
        row[4] = Value::Text("d".to_string());
        assert!(matches!(
            normalize_row(&row),
            Err(MalformedRowError::InvalidColumn { column: "block", .. })
        ));

        let mut row = boron_row();
        row[0] = Value::Text("5".to_string());
        assert!(matches!(
            normalize_row(&row),
            Err(MalformedRowError::InvalidColumn {
                column: "atomic_number",
                ..
            })
        ));
    }

    #[test]
    fn record_invariants_are_enforced() {
        let mut row = boron_row();
        row[3] = Value::Real(-1.0);
        assert!(matches!(
            normalize_row(&row),
            Err(MalformedRowError::InvalidRecord(
                ElementValidationError::NonPositiveMass(_)
            ))
        ));
    }
}
