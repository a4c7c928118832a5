//! Element store connection management.
//!
//! # Responsibility
//! - Own the single process-wide connection to the element store.
//! - Expose one execution primitive (`StoreExecutor::execute`) that runs a
//!   named operation and returns positional raw rows.
//!
//! # Invariants
//! - Rows of element operations carry exactly eight columns in the order
//!   atomic_number, symbol, name, atomic_mass, block, group_number, period,
//!   electron_configuration.
//! - At most one statement is in flight on the connection at a time.
//! - No write, migration or retry is ever issued.

use rusqlite::types::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod operations;
mod store;

pub use operations::StoreOperation;
pub use store::{ElementStore, ELEMENTS_TABLE, ELEMENT_COLUMNS};

/// One result row as positional storage values.
pub type RawRow = Vec<Value>;

pub type ConnectionResult<T> = Result<T, ConnectionError>;
pub type QueryResult<T> = Result<T, QueryError>;

/// Store could not be opened. Fatal for the calling process.
#[derive(Debug)]
pub enum ConnectionError {
    Unreachable { host: String },
    CredentialRejected { mode: &'static str },
    Sqlite(rusqlite::Error),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreachable { host } => write!(f, "element store host `{host}` is unreachable"),
            Self::CredentialRejected { mode } => {
                write!(f, "element store rejected credential mode `{mode}`")
            }
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "element store is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(
                    f,
                    "element store table `{table}` is missing required column `{column}`"
                )
            }
        }
    }
}

impl Error for ConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for ConnectionError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// A single operation failed against the store.
#[derive(Debug)]
pub enum QueryError {
    /// The connection was already released by `close()`.
    Closed,
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },
    ParameterCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
    Sqlite {
        operation: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "element store connection is closed"),
            Self::Timeout {
                operation,
                timeout_ms,
            } => write!(f, "`{operation}` exceeded the {timeout_ms} ms query timeout"),
            Self::ParameterCount {
                operation,
                expected,
                actual,
            } => write!(
                f,
                "`{operation}` expects {expected} parameter(s), got {actual}"
            ),
            Self::Sqlite { operation, source } => write!(f, "`{operation}` failed: {source}"),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Execution seam between the repository and a concrete store.
///
/// Test doubles implement this to hand canned rows to the repository.
pub trait StoreExecutor {
    fn execute(&self, operation: StoreOperation, params: &[Value]) -> QueryResult<Vec<RawRow>>;
}

impl<T: StoreExecutor + ?Sized> StoreExecutor for &T {
    fn execute(&self, operation: StoreOperation, params: &[Value]) -> QueryResult<Vec<RawRow>> {
        (**self).execute(operation, params)
    }
}
