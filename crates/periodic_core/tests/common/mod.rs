#![allow(dead_code)]

use periodic_core::{ElementRepository, ElementStore, StoreConfig};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub const SCHEMA_SQL: &str = include_str!("../fixtures/schema.sql");
pub const ELEMENTS_SQL: &str = include_str!("../fixtures/elements.sql");

pub fn seeded_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    conn.execute_batch(ELEMENTS_SQL).unwrap();
    conn
}

pub fn memory_config() -> StoreConfig {
    StoreConfig::for_database(":memory:")
}

pub fn seeded_store() -> ElementStore {
    ElementStore::from_connection(seeded_connection(), &memory_config()).unwrap()
}

pub fn seeded_repository() -> ElementRepository<ElementStore> {
    ElementRepository::new(seeded_store())
}

/// Repository over the schema plus caller-provided rows only.
pub fn repository_with_rows(insert_sql: &str) -> ElementRepository<ElementStore> {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    conn.execute_batch(insert_sql).unwrap();
    ElementRepository::new(ElementStore::from_connection(conn, &memory_config()).unwrap())
}

/// Writes a seeded database file under `dir` and returns its path.
pub fn write_seeded_db_file(dir: &Path) -> PathBuf {
    let path = dir.join("PeriodicTableDB.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    conn.execute_batch(ELEMENTS_SQL).unwrap();
    path
}
