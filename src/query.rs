//! Query facade seam.
//!
//! Free-text question answering is delegated to a [`QueryFacade`]. The
//! [`AnalysisSession`] owns the enriched table for the life of the process
//! and lends it, read-only, to every question.

use std::path::PathBuf;

use crate::engine::EnrichedTable;
use crate::error::QueryError;
use crate::table::Table;

/// What a facade produced for a question.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// A textual answer.
    Text(String),
    /// A derived table.
    Table(Table),
    /// A file the facade wrote, such as a rendered chart.
    Artifact { path: PathBuf },
}

/// Answers free-text questions over an enriched table.
pub trait QueryFacade: Send + Sync {
    /// # Errors
    /// Returns `Facade` when the question could not be answered.
    fn ask(&self, table: &EnrichedTable, question: &str) -> Result<Answer, QueryError>;
}

/// An enriched table paired with the facade that answers questions about it.
#[derive(Debug)]
pub struct AnalysisSession<F> {
    table: EnrichedTable,
    facade: F,
}

impl<F: QueryFacade> AnalysisSession<F> {
    /// Starts a session over an already enriched table.
    #[must_use]
    pub const fn new(table: EnrichedTable, facade: F) -> Self {
        Self { table, facade }
    }

    /// The table every question is answered against.
    #[must_use]
    pub const fn table(&self) -> &EnrichedTable {
        &self.table
    }

    /// The facade answering questions.
    #[must_use]
    pub const fn facade(&self) -> &F {
        &self.facade
    }

    /// Asks one question.
    ///
    /// # Errors
    /// Returns `EmptyQuestion` for blank input, otherwise whatever the
    /// facade returns.
    pub fn ask(&self, question: &str) -> Result<Answer, QueryError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(QueryError::EmptyQuestion);
        }
        tracing::debug!(question, kind = ?self.table.kind(), "dispatching question");
        self.facade.ask(&self.table, question)
    }
}
