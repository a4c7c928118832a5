//! Element data access layer for the periodic table reference dataset.
//! Front ends (console, GUI) consume `ElementRepository` and nothing below it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{AuthMode, ConfigError, StoreConfig};
pub use db::{ConnectionError, ElementStore, QueryError, RawRow, StoreExecutor, StoreOperation};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::element::{AtomicNumber, Block, Element, ElementValidationError};
pub use model::statistics::StatisticsSummary;
pub use repo::element_repo::{ElementRepository, RepoError, RepoResult};
pub use repo::normalize::{element_to_row, normalize_row, MalformedRowError};

/// Opens the store from `config` and wraps it in a repository.
pub fn open_repository(
    config: &StoreConfig,
) -> Result<ElementRepository<ElementStore>, ConnectionError> {
    ElementStore::open(config).map(ElementRepository::new)
}
