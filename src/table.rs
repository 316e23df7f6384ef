//! Row-major in-memory tables.
//!
//! A [`Table`] is an ordered list of uniquely named columns plus rows of
//! [`Value`] cells. It is the common currency between sources, the
//! enrichment engine and query facades.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::value::Value;

/// A single table row; one cell per column.
pub type Row = Vec<Value>;

/// An immutable-by-convention tabular snapshot.
///
/// # Examples
///
/// ```
/// use rolejoin::{Table, Value};
///
/// let mut table = Table::new(["#", "Name"]).unwrap();
/// table.push_row(vec![Value::Int(1), Value::from("Bulbasaur")]).unwrap();
/// assert_eq!(table.shape(), (1, 2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

/// Unchecked wire form of a [`Table`].
#[derive(Deserialize)]
struct RawTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl TryFrom<RawTable> for Table {
    type Error = SchemaError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let mut table = Self::new(raw.columns)?;
        table.rows.reserve(raw.rows.len());
        for row in raw.rows {
            table.push_row(row)?;
        }
        Ok(table)
    }
}

impl Table {
    /// Creates an empty table with the given columns.
    ///
    /// # Errors
    /// Returns `DuplicateColumn` if a column name repeats.
    pub fn new<I, S>(columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashMap::with_capacity(columns.len());
        for (pos, name) in columns.iter().enumerate() {
            if seen.insert(name.as_str(), pos).is_some() {
                return Err(SchemaError::DuplicateColumn {
                    column: name.clone(),
                });
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// A table with no columns and no rows.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Builds a table from JSON records, the shape a record store returns
    /// for `select *`.
    ///
    /// Columns are the union of record keys in first-seen order; keys a
    /// record lacks become null cells.
    ///
    /// # Errors
    /// Returns `NotARecord` if an element is not a JSON object.
    pub fn from_records(records: &[serde_json::Value]) -> Result<Self, SchemaError> {
        let mut columns: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (index, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or(SchemaError::NotARecord { index })?;
            for key in object.keys() {
                if !positions.contains_key(key) {
                    positions.insert(key.clone(), columns.len());
                    columns.push(key.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let mut row = vec![Value::Null; columns.len()];
            if let Some(object) = record.as_object() {
                for (key, cell) in object {
                    if let Some(&pos) = positions.get(key) {
                        row[pos] = Value::from(cell.clone());
                    }
                }
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// Renders every row as a JSON object in column order.
    #[must_use]
    pub fn to_records(&self) -> Vec<serde_json::Value> {
        self.rows
            .iter()
            .map(|row| {
                let object: serde_json::Map<String, serde_json::Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(name, cell)| (name.clone(), cell.to_json()))
                    .collect();
                serde_json::Value::Object(object)
            })
            .collect()
    }

    /// Appends a row.
    ///
    /// # Errors
    /// Returns `RowWidth` if the row does not have one cell per column.
    pub fn push_row(&mut self, row: Row) -> Result<(), SchemaError> {
        if row.len() != self.columns.len() {
            return Err(SchemaError::RowWidth {
                actual: row.len(),
                expected: self.columns.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names, in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, in order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row at `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// True when the table has no rows, regardless of its columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if a column is named `name`.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of the column named `name`.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Looks up a cell by row position and column name.
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Iterates over the cells of one column.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[col]))
    }

    /// Stable hex digest of the ordered column names.
    ///
    /// Two tables share a digest exactly when they share a schema, which lets
    /// consumers recognise which output shape they were handed.
    #[must_use]
    pub fn schema_digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for name in &self.columns {
            hasher.update(&(name.len() as u64).to_le_bytes());
            hasher.update(name.as_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }

    pub(crate) fn from_parts(columns: Vec<String>, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }
}
