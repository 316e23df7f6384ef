//! In-memory source.
//!
//! Intended for embedded usage and tests.

use std::collections::HashMap;

use crate::error::SourceError;
use crate::source::traits::DataSource;
use crate::table::Table;

/// Named tables held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: HashMap<String, Table>,
}

impl InMemorySource {
    /// An empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a table.
    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>, table: Table) -> Self {
        self.tables.insert(name.into(), table);
        self
    }

    /// Adds a table, returning any table it replaced.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) -> Option<Table> {
        self.tables.insert(name.into(), table)
    }

    /// Number of tables held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when no tables are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl DataSource for InMemorySource {
    fn fetch(&self, table_name: &str) -> Result<Table, SourceError> {
        self.tables
            .get(table_name)
            .cloned()
            .ok_or_else(|| SourceError::TableNotFound(table_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_known_and_unknown() {
        let mut source = InMemorySource::new();
        assert!(source.is_empty());
        source.insert("PokemonData", Table::new(["#", "Name"]).unwrap());
        assert_eq!(source.len(), 1);

        let table = source.fetch("PokemonData").unwrap();
        assert_eq!(table.columns(), &["#", "Name"]);

        let err = source.fetch("Moves").unwrap_err();
        assert!(matches!(err, SourceError::TableNotFound(name) if name == "Moves"));
    }

    #[test]
    fn test_with_table_replaces() {
        let source = InMemorySource::new()
            .with_table("t", Table::new(["a"]).unwrap())
            .with_table("t", Table::new(["b"]).unwrap());
        assert_eq!(source.fetch("t").unwrap().columns(), &["b"]);
    }
}
