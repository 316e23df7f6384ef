//! Upstream table sources.
//!
//! Sources hand complete, immutable tables to the engine. Fetch failures
//! are absorbed by [`fetch_or_empty`], which returns an empty table
//! instead; the engine's empty-input fallback relies on that.

mod json_file;
mod memory;
mod traits;

pub use json_file::JsonFileSource;
pub use memory::InMemorySource;
pub use traits::{fetch_or_empty, load_inputs, DataSource};
