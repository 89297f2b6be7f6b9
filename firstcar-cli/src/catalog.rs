//! Catalog selection by file extension.

use camino::Utf8Path;
use firstcar_core::{CatalogFilter, CatalogStore, MemoryCatalog, Vehicle};
#[cfg(feature = "store-sqlite")]
use firstcar_core::{SqliteCatalogError, SqliteCatalogStore};
use thiserror::Error;

use crate::{CliError, input::read_input};

/// Catalog opened from the `--catalog` path.
#[derive(Debug)]
pub(crate) enum CatalogSource {
    /// JSON export held in memory.
    Memory(MemoryCatalog),
    /// Read-only SQLite database.
    #[cfg(feature = "store-sqlite")]
    Sqlite(SqliteCatalogStore),
}

/// Read failures from whichever backend is open.
#[derive(Debug, Error)]
pub(crate) enum CatalogReadError {
    #[cfg(feature = "store-sqlite")]
    #[error(transparent)]
    Sqlite(#[from] SqliteCatalogError),
}

impl CatalogSource {
    /// Open `path` as a JSON catalog when it ends in `.json`, otherwise as
    /// an SQLite database.
    pub(crate) fn open(path: &Utf8Path) -> Result<Self, CliError> {
        if is_json(path) {
            let text = read_input(path)?;
            let catalog =
                MemoryCatalog::from_json_reader(text.as_bytes()).map_err(|source| {
                    CliError::LoadCatalog {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
            log::debug!("loaded {} vehicles from {path}", catalog.len());
            return Ok(Self::Memory(catalog));
        }
        Self::open_sqlite(path)
    }

    #[cfg(feature = "store-sqlite")]
    fn open_sqlite(path: &Utf8Path) -> Result<Self, CliError> {
        let store = SqliteCatalogStore::open(path.as_std_path())?;
        log::debug!("opened SQLite catalog {path}");
        Ok(Self::Sqlite(store))
    }

    #[cfg(not(feature = "store-sqlite"))]
    fn open_sqlite(_path: &Utf8Path) -> Result<Self, CliError> {
        Err(CliError::MissingFeature {
            feature: "store-sqlite",
            action: "reading a non-JSON catalog",
        })
    }
}

impl CatalogStore for CatalogSource {
    type Error = CatalogReadError;

    fn fetch_vehicles(&self, filter: &CatalogFilter) -> Result<Vec<Vehicle>, Self::Error> {
        match self {
            Self::Memory(catalog) => catalog.fetch_vehicles(filter).map_err(|never| match never {}),
            #[cfg(feature = "store-sqlite")]
            Self::Sqlite(store) => Ok(store.fetch_vehicles(filter)?),
        }
    }
}

fn is_json(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
