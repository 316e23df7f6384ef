//! # rolejoin - role-based entity enrichment
//!
//! rolejoin denormalizes contest records for ad-hoc analysis. Each
//! reference record names up to three entities by identifier, one per
//! role; the engine attaches every matching entity's attributes to the
//! record with deterministic, role-suffixed column names.
//!
//! ## Core Concepts
//!
//! - **EntityTable**: attribute rows keyed by a unique identifier column
//! - **ReferenceTable**: records naming entities in roles A, B and outcome
//! - **EnrichmentEngine**: three left-outer lookup passes, one per role
//! - **EnrichedTable**: tagged result telling consumers which schema they got
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rolejoin::{load_inputs, AnalysisSession, EnrichConfig, EnrichmentEngine, JsonFileSource};
//!
//! let source = JsonFileSource::new("./data");
//! let (battles, pokemon) = load_inputs(&source, "Pokemon_BattleTable", "PokemonData");
//!
//! let engine = EnrichmentEngine::new(EnrichConfig::default())?;
//! let enriched = engine.enrich(&battles, &pokemon)?;
//!
//! let session = AnalysisSession::new(enriched, my_facade);
//! let answer = session.ask("Which type has the highest average attack?")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Key column and role bindings.
pub mod config;
/// Enrichment engine and its tagged output.
pub mod engine;
/// Entity tables and key lookup.
pub mod entity;
/// Error types.
pub mod error;
/// Query facade seam.
pub mod query;
/// Reference tables.
pub mod reference;
/// Upstream table sources.
pub mod source;
/// In-memory tables.
pub mod table;
/// Cell values and entity keys.
pub mod value;

// Re-export primary types at crate root for convenience
pub use config::{EnrichConfig, Role, RoleBinding};
pub use engine::{enrich, ColumnOrigin, EnrichedTable, EnrichmentEngine, OutputKind};
pub use entity::{EntityIndex, EntityTable};
pub use error::{
    ConfigError, EnrichError, EnrichResult, QueryError, SchemaError, SourceError,
};
pub use query::{AnalysisSession, Answer, QueryFacade};
pub use reference::ReferenceTable;
pub use source::{fetch_or_empty, load_inputs, DataSource, InMemorySource, JsonFileSource};
pub use table::{Row, Table};
pub use value::{EntityKey, Value};
