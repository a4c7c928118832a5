//! SQLite-backed element store.
//!
//! # Responsibility
//! - Open the single store connection from `StoreConfig`.
//! - Run registered operations under a per-call deadline.
//! - Release the connection exactly once.
//!
//! # Invariants
//! - File databases are opened read-only; a missing file never gets created.
//! - The schema probe passes before a store is handed out.
//! - `close()` is idempotent and never fails.

use super::{
    ConnectionError, ConnectionResult, QueryError, QueryResult, RawRow, StoreExecutor,
    StoreOperation,
};
use crate::config::{AuthMode, StoreConfig};
use log::{debug, error, info, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, ErrorCode, OpenFlags};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

pub const ELEMENTS_TABLE: &str = "Elements";

/// Storage column names, in the positional order every element row uses.
pub const ELEMENT_COLUMNS: [&str; 8] = [
    "AtomicNumber",
    "Symbol",
    "Name",
    "AtomicMass",
    "Block",
    "GroupNumber",
    "Period",
    "ElectronConfiguration",
];

// VM instructions between deadline checks.
const PROGRESS_CHECK_INTERVAL: i32 = 1_000;

/// Owner of the one live store connection.
pub struct ElementStore {
    conn: Mutex<Option<Connection>>,
    query_timeout: Duration,
}

impl ElementStore {
    /// Opens the store described by `config`.
    ///
    /// # Errors
    /// - `Unreachable` when `host` is not this machine.
    /// - `CredentialRejected` for any mode other than trusted.
    /// - `Sqlite` when the database cannot be opened.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` on schema mismatch.
    ///
    /// # Side effects
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(config: &StoreConfig) -> ConnectionResult<Self> {
        let started_at = Instant::now();
        let mode = if config.is_in_memory() { "memory" } else { "file" };
        info!(
            "event=store_open module=db status=start mode={} auth={}",
            mode,
            config.auth.label()
        );

        match open_connection(config).and_then(|conn| Self::from_connection(conn, config)) {
            Ok(store) => {
                info!(
                    "event=store_open module=db status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(store)
            }
            Err(err) => {
                error!(
                    "event=store_open module=db status=error mode={} duration_ms={} error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Wraps an already open connection, e.g. one seeded by a test.
    ///
    /// Applies the timeout from `config` and runs the schema probe; host and
    /// auth settings are not consulted.
    pub fn from_connection(conn: Connection, config: &StoreConfig) -> ConnectionResult<Self> {
        conn.busy_timeout(config.query_timeout())?;
        probe_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(Some(conn)),
            query_timeout: config.query_timeout(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Releases the connection. Safe to call any number of times.
    pub fn close(&self) {
        let Some(conn) = self.lock().take() else {
            return;
        };
        match conn.close() {
            Ok(()) => info!("event=store_close module=db status=ok"),
            Err((_conn, err)) => {
                // The connection is dropped here regardless.
                warn!("event=store_close module=db status=error error={err}");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StoreExecutor for ElementStore {
    fn execute(&self, operation: StoreOperation, params: &[Value]) -> QueryResult<Vec<RawRow>> {
        if params.len() != operation.param_count() {
            return Err(QueryError::ParameterCount {
                operation: operation.name(),
                expected: operation.param_count(),
                actual: params.len(),
            });
        }

        let guard = self.lock();
        let conn = guard.as_ref().ok_or(QueryError::Closed)?;

        let started_at = Instant::now();
        let deadline = started_at + self.query_timeout;
        conn.progress_handler(
            PROGRESS_CHECK_INTERVAL,
            Some(move || Instant::now() >= deadline),
        );
        let result = run_operation(conn, operation, params);
        conn.progress_handler(PROGRESS_CHECK_INTERVAL, None::<fn() -> bool>);

        let duration_ms = started_at.elapsed().as_millis();
        match result {
            Ok(rows) => {
                debug!(
                    "event=store_execute module=db status=ok operation={} rows={} duration_ms={}",
                    operation.name(),
                    rows.len(),
                    duration_ms
                );
                Ok(rows)
            }
            Err(err) => {
                let err = if is_interrupt(&err) {
                    QueryError::Timeout {
                        operation: operation.name(),
                        timeout_ms: self.query_timeout.as_millis() as u64,
                    }
                } else {
                    QueryError::Sqlite {
                        operation: operation.name(),
                        source: err,
                    }
                };
                warn!(
                    "event=store_execute module=db status=error operation={} duration_ms={} error={}",
                    operation.name(),
                    duration_ms,
                    err
                );
                Err(err)
            }
        }
    }
}

fn open_connection(config: &StoreConfig) -> ConnectionResult<Connection> {
    if !config.is_local_host() {
        return Err(ConnectionError::Unreachable {
            host: config.host.clone(),
        });
    }
    if let AuthMode::Password { .. } = config.auth {
        return Err(ConnectionError::CredentialRejected {
            mode: config.auth.label(),
        });
    }

    let conn = if config.is_in_memory() {
        Connection::open_in_memory()?
    } else {
        Connection::open_with_flags(
            config.database.trim(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?
    };
    Ok(conn)
}

fn probe_schema(conn: &Connection) -> ConnectionResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([ELEMENTS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(ConnectionError::MissingRequiredTable(ELEMENTS_TABLE));
    }
    for column in ELEMENT_COLUMNS {
        if !columns.iter().any(|name| name.eq_ignore_ascii_case(column)) {
            return Err(ConnectionError::MissingRequiredColumn {
                table: ELEMENTS_TABLE,
                column,
            });
        }
    }
    Ok(())
}

fn run_operation(
    conn: &Connection,
    operation: StoreOperation,
    params: &[Value],
) -> rusqlite::Result<Vec<RawRow>> {
    let mut stmt = conn.prepare_cached(operation.sql())?;
    let column_count = stmt.column_count();
    let mut rows = stmt.query(params_from_iter(params.iter()))?;
    let mut raw_rows = Vec::new();

    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for index in 0..column_count {
            values.push(row.get::<_, Value>(index)?);
        }
        raw_rows.push(values);
    }

    Ok(raw_rows)
}

fn is_interrupt(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _) if inner.code == ErrorCode::OperationInterrupted
    )
}
