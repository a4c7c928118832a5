//! Element repository over a `StoreExecutor`.
//!
//! # Responsibility
//! - Provide the typed, read-only query surface used by every front end.
//! - Normalize every raw row through `normalize_row`.
//!
//! # Invariants
//! - A missing match is `Ok(None)` / an empty `Vec`, never an error.
//! - `get_by_*` and `get_all` propagate store failures as `RepoError`.
//! - `get_statistics` absorbs any failure into the all-zero summary.

use super::normalize::{coerce_mass, normalize_row, MalformedRowError};
use crate::db::{QueryError, RawRow, StoreExecutor, StoreOperation};
use crate::model::element::{AtomicNumber, Block, Element};
use crate::model::statistics::StatisticsSummary;
use log::warn;
use rusqlite::types::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for element lookups.
#[derive(Debug)]
pub enum RepoError {
    Query(QueryError),
    MalformedRow(MalformedRowError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(err) => write!(f, "{err}"),
            Self::MalformedRow(err) => write!(f, "malformed element row: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) => Some(err),
            Self::MalformedRow(err) => Some(err),
        }
    }
}

impl From<QueryError> for RepoError {
    fn from(value: QueryError) -> Self {
        Self::Query(value)
    }
}

impl From<MalformedRowError> for RepoError {
    fn from(value: MalformedRowError) -> Self {
        Self::MalformedRow(value)
    }
}

/// Typed element queries built on an injected store.
pub struct ElementRepository<S: StoreExecutor> {
    store: S,
}

impl<S: StoreExecutor> ElementRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Finds the element with `atomic_number`.
    pub fn get_by_number(&self, atomic_number: AtomicNumber) -> RepoResult<Option<Element>> {
        self.fetch_one(
            StoreOperation::GetElementByNumber,
            &[Value::Integer(atomic_number)],
        )
    }

    /// Finds the element whose symbol matches exactly (case-sensitive).
    ///
    /// Callers trim user input; the value is passed through unchanged.
    pub fn get_by_symbol(&self, symbol: &str) -> RepoResult<Option<Element>> {
        self.fetch_one(
            StoreOperation::GetElementBySymbol,
            &[Value::Text(symbol.to_string())],
        )
    }

    /// Lists a block's elements in the store's natural order.
    pub fn get_by_block(&self, block: Block) -> RepoResult<Vec<Element>> {
        self.fetch_all(StoreOperation::GetElementsByBlock, &[block_param(block)])
    }

    /// Lists a period's elements ordered by atomic number.
    pub fn get_by_period(&self, period: i64) -> RepoResult<Vec<Element>> {
        self.fetch_all(StoreOperation::GetElementsByPeriod, &[Value::Integer(period)])
    }

    /// Lists every element ordered by atomic number.
    pub fn get_all(&self) -> RepoResult<Vec<Element>> {
        self.fetch_all(StoreOperation::SelectAllElements, &[])
    }

    /// Computes dataset statistics.
    ///
    /// Never fails: any store or shape failure yields
    /// `StatisticsSummary::default()` and a `statistics_degraded` warning.
    pub fn get_statistics(&self) -> StatisticsSummary {
        match self.compute_statistics() {
            Ok(summary) => summary,
            Err(err) => {
                warn!("event=statistics_degraded module=repo status=error error={err}");
                StatisticsSummary::default()
            }
        }
    }

    fn compute_statistics(&self) -> RepoResult<StatisticsSummary> {
        let total_elements = self.count(StoreOperation::CountElements, &[])?;
        let s_block_count = self.count(
            StoreOperation::CountElementsByBlock,
            &[block_param(Block::S)],
        )?;
        let p_block_count = self.count(
            StoreOperation::CountElementsByBlock,
            &[block_param(Block::P)],
        )?;
        let avg_atomic_mass = match self.scalar(StoreOperation::AverageAtomicMass, &[])? {
            // AVG over an empty table.
            Value::Null => 0.0,
            value => coerce_mass(&value)?,
        };

        Ok(StatisticsSummary {
            total_elements,
            s_block_count,
            p_block_count,
            avg_atomic_mass,
        })
    }

    fn fetch_one(
        &self,
        operation: StoreOperation,
        params: &[Value],
    ) -> RepoResult<Option<Element>> {
        let rows = self.store.execute(operation, params)?;
        match rows.first() {
            Some(row) => Ok(Some(normalize_row(row)?)),
            None => Ok(None),
        }
    }

    fn fetch_all(&self, operation: StoreOperation, params: &[Value]) -> RepoResult<Vec<Element>> {
        let rows = self.store.execute(operation, params)?;
        rows.iter()
            .map(|row| normalize_row(row).map_err(RepoError::from))
            .collect()
    }

    fn count(&self, operation: StoreOperation, params: &[Value]) -> RepoResult<u64> {
        match self.scalar(operation, params)? {
            Value::Integer(count) if count >= 0 => Ok(count as u64),
            other => Err(MalformedRowError::InvalidColumn {
                column: "count",
                message: format!("expected non-negative integer, got {other:?}"),
            }
            .into()),
        }
    }

    fn scalar(&self, operation: StoreOperation, params: &[Value]) -> RepoResult<Value> {
        let rows: Vec<RawRow> = self.store.execute(operation, params)?;
        let Some(row) = rows.into_iter().next() else {
            return Err(MalformedRowError::ColumnCount {
                expected: 1,
                actual: 0,
            }
            .into());
        };
        if row.len() != 1 {
            return Err(MalformedRowError::ColumnCount {
                expected: 1,
                actual: row.len(),
            }
            .into());
        }
        Ok(row.into_iter().next().unwrap_or(Value::Null))
    }
}

fn block_param(block: Block) -> Value {
    Value::Text(block.as_str().to_string())
}
