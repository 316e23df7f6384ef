//! Reference tables: records naming entities by role.

use crate::config::{EnrichConfig, Role};
use crate::error::SchemaError;
use crate::table::Table;

/// Ordered contest records, each referencing entities in up to three roles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    table: Table,
}

impl ReferenceTable {
    /// Wraps a table of reference records.
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

    /// True when there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.row_count()
    }

    /// Column positions of each role's identifier field, in [`Role::ALL`] order.
    ///
    /// # Errors
    /// Returns `MissingColumn` for the first role field the table lacks.
    pub fn role_positions(&self, config: &EnrichConfig) -> Result<[(Role, usize); 3], SchemaError> {
        let position = |role: Role| -> Result<(Role, usize), SchemaError> {
            let field = &config.binding(role).field;
            self.table
                .column_index(field)
                .map(|pos| (role, pos))
                .ok_or_else(|| SchemaError::MissingColumn {
                    table: "reference",
                    column: field.clone(),
                })
        };
        Ok([position(Role::A)?, position(Role::B)?, position(Role::Outcome)?])
    }
}

impl From<Table> for ReferenceTable {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}
