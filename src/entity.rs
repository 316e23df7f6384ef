//! Entity tables and key lookup.
//!
//! An [`EntityTable`] is a [`Table`] whose rows are entities addressed by a
//! key column. [`EntityIndex`] maps keys to row positions and guarantees at
//! most one match per key: keys that occur more than once are treated as
//! not found, so enrichment can never fan out.

use std::collections::{HashMap, HashSet};

use crate::error::SchemaError;
use crate::table::{Row, Table};
use crate::value::EntityKey;

/// Entity attribute rows keyed by a unique identifier column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityTable {
    table: Table,
}

impl EntityTable {
    /// Wraps a table of entity rows.
    #[must_use]
    pub const fn new(table: Table) -> Self {
        Self { table }
    }

    /// The underlying table.
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Unwraps the underlying table.
    #[must_use]
    pub fn into_table(self) -> Table {
        self.table
    }

    /// True when there are no entity rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of entity rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.row_count()
    }

    /// Position of the key column.
    ///
    /// # Errors
    /// Returns `MissingColumn` if the table has no such column.
    pub fn key_position(&self, key_column: &str) -> Result<usize, SchemaError> {
        self.table
            .column_index(key_column)
            .ok_or_else(|| SchemaError::MissingColumn {
                table: "entities",
                column: key_column.to_string(),
            })
    }

    /// Builds a lookup index over `key_column`.
    ///
    /// # Errors
    /// Returns `MissingColumn` if the key column is absent.
    pub fn index(&self, key_column: &str) -> Result<EntityIndex<'_>, SchemaError> {
        let key_pos = self.key_position(key_column)?;
        Ok(EntityIndex::build(&self.table, key_pos))
    }
}

impl From<Table> for EntityTable {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}

/// Key → row lookup over an [`EntityTable`].
#[derive(Debug)]
pub struct EntityIndex<'a> {
    table: &'a Table,
    by_key: HashMap<EntityKey, usize>,
    ambiguous: HashSet<EntityKey>,
}

impl<'a> EntityIndex<'a> {
    fn build(table: &'a Table, key_pos: usize) -> Self {
        let mut by_key = HashMap::with_capacity(table.row_count());
        let mut ambiguous = HashSet::new();
        let mut skipped = 0usize;

        for (pos, row) in table.rows().iter().enumerate() {
            let Some(key) = row[key_pos].as_key() else {
                skipped += 1;
                continue;
            };
            if ambiguous.contains(&key) {
                continue;
            }
            if by_key.insert(key.clone(), pos).is_some() {
                by_key.remove(&key);
                ambiguous.insert(key);
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "entity rows without a usable key were not indexed");
        }
        if !ambiguous.is_empty() {
            tracing::warn!(
                count = ambiguous.len(),
                "duplicate entity keys found; lookups for them resolve to no match"
            );
        }

        Self {
            table,
            by_key,
            ambiguous,
        }
    }

    /// Row of the entity with this key, if exactly one exists.
    #[must_use]
    pub fn lookup(&self, key: &EntityKey) -> Option<&'a Row> {
        let table = self.table;
        self.by_key.get(key).and_then(|&pos| table.row(pos))
    }

    /// True if the key occurred on more than one entity row.
    #[must_use]
    pub fn is_ambiguous(&self, key: &EntityKey) -> bool {
        self.ambiguous.contains(key)
    }

    /// Number of keys that resolve to a row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// True when no key resolves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
