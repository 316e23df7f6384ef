//! Abstract source trait and the empty-on-error contract.

use crate::entity::EntityTable;
use crate::error::SourceError;
use crate::reference::ReferenceTable;
use crate::table::Table;

/// A store that can produce tables by name.
pub trait DataSource: Send + Sync {
    /// Fetches the full contents of `table_name`.
    ///
    /// # Errors
    /// - `TableNotFound`: no such table
    /// - `InvalidTableName`: the name is not acceptable to this source
    /// - `Io` / `Decode` / `Schema`: the table exists but could not be read
    fn fetch(&self, table_name: &str) -> Result<Table, SourceError>;
}

impl<S: DataSource + ?Sized> DataSource for &S {
    fn fetch(&self, table_name: &str) -> Result<Table, SourceError> {
        (**self).fetch(table_name)
    }
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn fetch(&self, table_name: &str) -> Result<Table, SourceError> {
        (**self).fetch(table_name)
    }
}

/// Fetches a table, logging and returning an empty table on any failure.
pub fn fetch_or_empty<S: DataSource + ?Sized>(source: &S, table_name: &str) -> Table {
    match source.fetch(table_name) {
        Ok(table) => {
            let (rows, columns) = table.shape();
            tracing::info!(
                table = table_name,
                rows,
                columns,
                fields = ?table.columns(),
                "fetched table"
            );
            table
        }
        Err(err) => {
            tracing::error!(table = table_name, error = %err, "error fetching table");
            Table::empty()
        }
    }
}

/// Fetches the reference and entity tables with [`fetch_or_empty`].
pub fn load_inputs<S: DataSource + ?Sized>(
    source: &S,
    reference_table: &str,
    entity_table: &str,
) -> (ReferenceTable, EntityTable) {
    let entities = fetch_or_empty(source, entity_table);
    let reference = fetch_or_empty(source, reference_table);
    (reference.into(), entities.into())
}
