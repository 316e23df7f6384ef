//! Error types for rolejoin.
//!
//! All errors in rolejoin are strongly typed using thiserror.
//! Missing matches are never errors; they become null cells. Only
//! structural contract violations by the caller surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Structural problems with a table or a planned output schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A required identifier column is absent.
    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn {
        /// Which input table: `reference` or `entities`.
        table: &'static str,
        /// Column name.
        column: String,
    },

    /// Two columns share a name.
    #[error("Column '{column}' appears more than once")]
    DuplicateColumn {
        /// Column name.
        column: String,
    },

    /// A row does not have one cell per column.
    #[error("Row has {actual} cells, expected {expected}")]
    RowWidth {
        /// Cells the row has.
        actual: usize,
        /// Cells the table expects.
        expected: usize,
    },

    /// Planned output names are not unique.
    #[error("Output column '{column}' would be produced twice; choose distinct role suffixes")]
    ColumnCollision {
        /// Column name.
        column: String,
    },

    /// A record-array element is not an object.
    #[error("Record at position {index} is not a JSON object")]
    NotARecord {
        /// Position in the record array.
        index: usize,
    },
}

/// Invalid enrichment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required config string is blank.
    #[error("Configuration field '{field}' cannot be empty")]
    EmptyField {
        /// Offending config field.
        field: String,
    },

    /// Two roles read the same reference column.
    #[error("Reference field '{field}' is bound to more than one role")]
    DuplicateRoleField {
        /// Offending config field.
        field: String,
    },

    /// Two roles share an attribute suffix.
    #[error("Suffix '{suffix}' is used by more than one role")]
    DuplicateSuffix {
        /// Repeated suffix.
        suffix: String,
    },

    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The config is not valid JSON for this shape.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures of an upstream table source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source has no table by that name.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// The table name is not acceptable to the source.
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    /// Reading the table failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The table body is not a JSON record array.
    #[error("Failed to decode table '{table}': {source}")]
    Decode {
        /// Requested table.
        table: String,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// The records do not form a valid table.
    #[error("Table '{table}' is malformed: {source}")]
    Schema {
        /// Requested table.
        table: String,
        /// Underlying schema failure.
        #[source]
        source: SchemaError,
    },
}

/// Failures raised while answering a question over an enriched table.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The question was blank.
    #[error("Question cannot be empty")]
    EmptyQuestion,

    /// The facade could not answer.
    #[error("Query facade failed: {message}")]
    Facade {
        /// What the facade reported.
        message: String,
    },
}

/// Top-level error type for rolejoin.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// Structural contract violation.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Invalid configuration.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Upstream table source failure.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Query facade failure.
    #[error("Query error: {0}")]
    Query(#[from] QueryError),
}

impl EnrichError {
    /// Returns true if this is a structural schema violation.
    #[must_use]
    pub const fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this error is retryable.
    ///
    /// Only source IO can change on retry; contract violations never do.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Source(SourceError::Io { .. }))
    }
}

/// Result type alias for rolejoin operations.
pub type EnrichResult<T> = Result<T, EnrichError>;
