//! Directory-of-JSON-files source.
//!
//! Each table lives in `<dir>/<table_name>.json` as a JSON array of
//! records, the body a record store returns for `select *`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::source::traits::DataSource;
use crate::table::Table;

/// Reads tables from JSON record files in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    /// Reads tables from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory tables are read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a table name maps to.
    ///
    /// # Errors
    /// Returns `InvalidTableName` for empty names or names that could escape
    /// the directory.
    pub fn table_path(&self, table_name: &str) -> Result<PathBuf, SourceError> {
        let invalid = table_name.trim().is_empty()
            || table_name.contains(['/', '\\'])
            || table_name.contains("..");
        if invalid {
            return Err(SourceError::InvalidTableName(table_name.to_string()));
        }
        Ok(self.dir.join(format!("{table_name}.json")))
    }
}

impl DataSource for JsonFileSource {
    fn fetch(&self, table_name: &str) -> Result<Table, SourceError> {
        let path = self.table_path(table_name)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(SourceError::TableNotFound(table_name.to_string()));
            }
            Err(source) => return Err(SourceError::Io { path, source }),
        };

        let records: Vec<serde_json::Value> =
            serde_json::from_slice(&bytes).map_err(|source| SourceError::Decode {
                table: table_name.to_string(),
                source,
            })?;

        Table::from_records(&records).map_err(|source| SourceError::Schema {
            table: table_name.to_string(),
            source,
        })
    }
}
