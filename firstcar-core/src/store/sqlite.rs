//! SQLite-backed catalog store.
//!
//! List-valued columns (`years`, `safety_notable_features`, `fit_tags`,
//! `extras_tags`) and the descriptive `details` column hold JSON text.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Mutex,
};

use rusqlite::{Connection, OpenFlags, Row};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{Vehicle, VehicleError};

use super::{CatalogFilter, CatalogStore};

/// Name of the table holding catalog rows.
pub const VEHICLES_TABLE: &str = "vehicles";

const SELECT_VEHICLES_SQL: &str = "SELECT id, make, model, trim, years, msrp_min, msrp_max, \
     body_style, drivetrain, safety_iihs_top_safety_pick, safety_nhtsa_overall, \
     safety_notable_features, fit_tags, extras_tags, details \
     FROM vehicles ORDER BY id";

/// Error raised when reading catalog rows from SQLite.
#[derive(Debug, Error)]
pub enum SqliteCatalogError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite catalog at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A JSON-encoded column could not be decoded.
    #[error("failed to decode column {column} for vehicle {id}: {source}")]
    InvalidColumn {
        /// Identifier of the affected row.
        id: String,
        /// Column name.
        column: &'static str,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A decoded row broke a catalog invariant.
    #[error(transparent)]
    InvalidVehicle(#[from] VehicleError),
    /// Another thread panicked while holding the connection.
    #[error("catalog connection lock was poisoned")]
    LockPoisoned,
    /// Generic SQLite error when reading rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only catalog backed by a SQLite database.
///
/// Every [`CatalogStore::fetch_vehicles`] call re-reads the table, so the
/// snapshot reflects the database at call time. Rows are returned ordered by
/// `id`.
pub struct SqliteCatalogStore {
    connection: Mutex<Connection>,
    path: PathBuf,
}

impl fmt::Debug for SqliteCatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalogStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteCatalogStore {
    /// Open the database at `path` read-only.
    ///
    /// # Errors
    /// Returns [`SqliteCatalogError::OpenDatabase`] when the file cannot be
    /// opened and [`SqliteCatalogError::Database`] when the `vehicles` table
    /// is not queryable.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteCatalogError> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteCatalogError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        connection.prepare_cached(SELECT_VEHICLES_SQL)?;
        Ok(Self {
            connection: Mutex::new(connection),
            path: path.to_path_buf(),
        })
    }

    /// Location of the backing database.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for SqliteCatalogStore {
    type Error = SqliteCatalogError;

    fn fetch_vehicles(&self, filter: &CatalogFilter) -> Result<Vec<Vehicle>, Self::Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| SqliteCatalogError::LockPoisoned)?;
        let mut statement = connection.prepare_cached(SELECT_VEHICLES_SQL)?;
        let mut rows = statement.query([])?;
        let mut vehicles = Vec::new();
        while let Some(row) = rows.next()? {
            let vehicle = read_vehicle(row)?;
            if filter.matches(&vehicle) {
                vehicles.push(vehicle);
            }
        }
        log::debug!(
            "read {} vehicles from {}",
            vehicles.len(),
            self.path.display()
        );
        Ok(vehicles)
    }
}

fn read_vehicle(row: &Row<'_>) -> Result<Vehicle, SqliteCatalogError> {
    let id: String = row.get(0)?;
    let body_style: String = row.get(7)?;
    let drivetrain: String = row.get(8)?;
    let vehicle = Vehicle {
        make: row.get(1)?,
        model: row.get(2)?,
        trim: row.get(3)?,
        years: json_column(&id, "years", &row.get::<_, String>(4)?)?,
        msrp_min: row.get(5)?,
        msrp_max: row.get(6)?,
        body_style: enum_column(&id, "body_style", body_style)?,
        drivetrain: enum_column(&id, "drivetrain", drivetrain)?,
        safety_iihs_top_safety_pick: row.get(9)?,
        safety_nhtsa_overall: row.get(10)?,
        safety_notable_features: json_column(&id, "safety_notable_features", &row.get::<_, String>(11)?)?,
        fit_tags: json_column(&id, "fit_tags", &row.get::<_, String>(12)?)?,
        extras_tags: json_column(&id, "extras_tags", &row.get::<_, String>(13)?)?,
        details: json_column(&id, "details", &row.get::<_, String>(14)?)?,
        id,
    };
    vehicle.validate()?;
    Ok(vehicle)
}

fn json_column<T: DeserializeOwned>(
    id: &str,
    column: &'static str,
    raw: &str,
) -> Result<T, SqliteCatalogError> {
    serde_json::from_str(raw).map_err(|source| SqliteCatalogError::InvalidColumn {
        id: id.to_owned(),
        column,
        source,
    })
}

fn enum_column<T: DeserializeOwned>(
    id: &str,
    column: &'static str,
    raw: String,
) -> Result<T, SqliteCatalogError> {
    serde_json::from_value(serde_json::Value::String(raw)).map_err(|source| {
        SqliteCatalogError::InvalidColumn {
            id: id.to_owned(),
            column,
            source,
        }
    })
}
