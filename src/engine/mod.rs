//! Enrichment engine.
//!
//! [`EnrichmentEngine::enrich`] attaches entity attributes to every
//! reference record, once per role, as three left-outer lookup passes
//! composed in the order A, B, outcome. It is a pure transform over its
//! two inputs: no IO, no shared state.

mod pass;
mod plan;

pub use plan::ColumnOrigin;

use crate::config::{EnrichConfig, Role};
use crate::entity::EntityTable;
use crate::error::{ConfigError, EnrichResult, SchemaError};
use crate::reference::ReferenceTable;
use crate::table::Table;

static EMPTY_TABLE: Table = Table::empty();

/// Which schema an [`EnrichedTable`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// Reference fields followed by per-role entity attributes.
    Enriched,
    /// The entity table, unchanged, because there were no reference records.
    EntitiesOnly,
    /// The reference table, unchanged, because there was no entity data.
    ReferenceOnly,
    /// Nothing to show.
    Empty,
}

/// Result of enrichment.
///
/// The variant tells consumers which schema they received; they never have
/// to infer it from column names.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichedTable {
    /// One row per reference record.
    Enriched {
        /// Reference fields followed by the attributes of each role.
        table: Table,
        /// One entry per column of `table`.
        origins: Vec<ColumnOrigin>,
    },
    /// No reference records were supplied; the entities stand in.
    EntitiesOnly(Table),
    /// No entity data was supplied; records are kept without attributes.
    ReferenceOnly(Table),
    /// No data at all.
    Empty,
}

impl EnrichedTable {
    /// Schema tag of this output.
    #[must_use]
    pub const fn kind(&self) -> OutputKind {
        match self {
            Self::Enriched { .. } => OutputKind::Enriched,
            Self::EntitiesOnly(_) => OutputKind::EntitiesOnly,
            Self::ReferenceOnly(_) => OutputKind::ReferenceOnly,
            Self::Empty => OutputKind::Empty,
        }
    }

    /// True for [`Self::Enriched`].
    #[must_use]
    pub const fn is_enriched(&self) -> bool {
        matches!(self, Self::Enriched { .. })
    }

    /// The underlying table; a column-less empty table for [`Self::Empty`].
    #[must_use]
    pub fn table(&self) -> &Table {
        match self {
            Self::Enriched { table, .. }
            | Self::EntitiesOnly(table)
            | Self::ReferenceOnly(table) => table,
            Self::Empty => &EMPTY_TABLE,
        }
    }

    /// Unwraps the underlying table.
    #[must_use]
    pub fn into_table(self) -> Table {
        match self {
            Self::Enriched { table, .. }
            | Self::EntitiesOnly(table)
            | Self::ReferenceOnly(table) => table,
            Self::Empty => Table::empty(),
        }
    }

    /// Number of rows in the underlying table.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.table().row_count()
    }

    /// Column names of the underlying table.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        self.table().columns()
    }

    /// Column provenance, present only for enriched output.
    #[must_use]
    pub fn origins(&self) -> Option<&[ColumnOrigin]> {
        match self {
            Self::Enriched { origins, .. } => Some(origins),
            _ => None,
        }
    }

    /// Output names of the columns attached for `role`, in order.
    #[must_use]
    pub fn role_columns(&self, role: Role) -> Vec<&str> {
        let Self::Enriched { table, origins } = self else {
            return Vec::new();
        };
        table
            .columns()
            .iter()
            .zip(origins)
            .filter(|(_, origin)| origin.role() == Some(role))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Schema digest of the underlying table.
    #[must_use]
    pub fn schema_digest(&self) -> String {
        self.table().schema_digest()
    }
}

/// Stateless enrichment driven by a validated [`EnrichConfig`].
///
/// # Examples
///
/// ```
/// use rolejoin::{EnrichConfig, EnrichmentEngine, RoleBinding, Table};
/// use serde_json::json;
///
/// let config = EnrichConfig::new(
///     "#",
///     RoleBinding::new("RoleA"),
///     RoleBinding::new("RoleB"),
///     RoleBinding::new("RoleOutcome"),
/// );
/// let engine = EnrichmentEngine::new(config).unwrap();
///
/// let entities = Table::from_records(&[
///     json!({"#": 1, "Name": "A"}),
///     json!({"#": 2, "Name": "B"}),
/// ]).unwrap();
/// let battles = Table::from_records(&[
///     json!({"RoleA": 1, "RoleB": 2, "RoleOutcome": 1}),
/// ]).unwrap();
///
/// let out = engine.enrich(&battles.into(), &entities.into()).unwrap();
/// assert_eq!(out.table().get(0, "Name_RoleB").and_then(|v| v.as_string()), Some("B"));
/// ```
#[derive(Debug, Clone)]
pub struct EnrichmentEngine {
    config: EnrichConfig,
}

impl EnrichmentEngine {
    /// Creates an engine, validating the config.
    ///
    /// # Errors
    /// Returns any [`EnrichConfig::validate`] error.
    pub fn new(config: EnrichConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated config.
    #[must_use]
    pub const fn config(&self) -> &EnrichConfig {
        &self.config
    }

    /// Enriches `reference` with `entities`.
    ///
    /// Empty inputs skip the join:
    /// - no reference records, some entities: [`EnrichedTable::EntitiesOnly`]
    /// - some reference records, no entities: [`EnrichedTable::ReferenceOnly`]
    /// - neither: [`EnrichedTable::Empty`]
    ///
    /// Unmatched identifiers become null attributes; the row always stays.
    ///
    /// # Errors
    /// - `MissingColumn`: a non-empty reference lacks a role field, or non-empty
    ///   entities lack the key column
    /// - `ColumnCollision`: the role suffixes would produce a duplicate column
    pub fn enrich(
        &self,
        reference: &ReferenceTable,
        entities: &EntityTable,
    ) -> Result<EnrichedTable, SchemaError> {
        let _span = tracing::info_span!(
            "enrich",
            reference_rows = reference.len(),
            entity_rows = entities.len()
        )
        .entered();

        let role_positions = if reference.is_empty() {
            None
        } else {
            Some(reference.role_positions(&self.config)?)
        };
        let key_pos = if entities.is_empty() {
            None
        } else {
            Some(entities.key_position(&self.config.key_column)?)
        };

        let (Some(role_positions), Some(key_pos)) = (role_positions, key_pos) else {
            return Ok(Self::fallback(reference, entities));
        };

        let plan = plan::plan(
            reference.table(),
            entities.table(),
            key_pos,
            &role_positions,
            &self.config,
        )?;
        let index = entities.index(&self.config.key_column)?;

        let mut rows = reference.table().rows().to_vec();
        for role_plan in &plan.passes {
            let (next, stats) = pass::apply(role_plan, &index, rows);
            tracing::debug!(
                role = %role_plan.role,
                matched = stats.matched,
                missed = stats.missed,
                "lookup pass complete"
            );
            rows = next;
        }

        let table = Table::from_parts(plan.columns, rows);
        tracing::info!(
            rows = table.row_count(),
            columns = table.column_count(),
            "merged reference and entity data"
        );
        Ok(EnrichedTable::Enriched {
            table,
            origins: plan.origins,
        })
    }

    fn fallback(reference: &ReferenceTable, entities: &EntityTable) -> EnrichedTable {
        if entities.is_empty() {
            if reference.is_empty() {
                return EnrichedTable::Empty;
            }
            tracing::warn!(
                reference_rows = reference.len(),
                "no entity data; keeping reference records without attributes"
            );
            return EnrichedTable::ReferenceOnly(reference.table().clone());
        }

        tracing::info!(
            entity_rows = entities.len(),
            "no reference records; using entity data only"
        );
        EnrichedTable::EntitiesOnly(entities.table().clone())
    }
}

/// One-shot enrichment with a config that has not been validated yet.
///
/// # Errors
/// Returns config validation errors or [`EnrichmentEngine::enrich`] errors.
pub fn enrich(
    reference: &ReferenceTable,
    entities: &EntityTable,
    config: EnrichConfig,
) -> EnrichResult<EnrichedTable> {
    let engine = EnrichmentEngine::new(config)?;
    Ok(engine.enrich(reference, entities)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoleBinding;
    use crate::value::Value;
    use serde_json::json;

    fn engine() -> EnrichmentEngine {
        EnrichmentEngine::new(EnrichConfig::new(
            "#",
            RoleBinding::new("RoleA"),
            RoleBinding::new("RoleB"),
            RoleBinding::new("RoleOutcome"),
        ))
        .unwrap()
    }

    fn entities() -> EntityTable {
        Table::from_records(&[
            json!({"#": 1, "Name": "A", "Attack": 10}),
            json!({"#": 2, "Name": "B", "Attack": 20}),
        ])
        .unwrap()
        .into()
    }

    fn battles(rows: &[serde_json::Value]) -> ReferenceTable {
        Table::from_records(rows).unwrap().into()
    }

    #[test]
    fn test_enrich_concrete_scenario() {
        let reference = battles(&[json!({"RoleA": 1, "RoleB": 2, "RoleOutcome": 1})]);
        let out = engine().enrich(&reference, &entities()).unwrap();
        let table = out.table();

        assert_eq!(out.kind(), OutputKind::Enriched);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.get(0, "Name"), Some(&Value::from("A")));
        assert_eq!(table.get(0, "Attack"), Some(&Value::Int(10)));
        assert_eq!(table.get(0, "Name_RoleB"), Some(&Value::from("B")));
        assert_eq!(table.get(0, "Attack_RoleB"), Some(&Value::Int(20)));
        assert_eq!(table.get(0, "Name_RoleOutcome"), Some(&Value::from("A")));
        assert_eq!(table.get(0, "Attack_RoleOutcome"), Some(&Value::Int(10)));
        assert_eq!(
            table.columns().iter().filter(|c| c.starts_with('#')).count(),
            1
        );
        assert_eq!(table.get(0, "#"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_enrich_unmatched_role_is_null() {
        let reference = battles(&[json!({"RoleA": 1, "RoleB": 99, "RoleOutcome": 1})]);
        let out = engine().enrich(&reference, &entities()).unwrap();
        let table = out.table();

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.get(0, "Name_RoleB"), Some(&Value::Null));
        assert_eq!(table.get(0, "Attack_RoleB"), Some(&Value::Null));
        assert_eq!(table.get(0, "RoleB"), Some(&Value::Int(99)));
        assert_eq!(table.get(0, "Name_RoleOutcome"), Some(&Value::from("A")));
    }

    #[test]
    fn test_enrich_fallback_to_entities() {
        let out = engine().enrich(&ReferenceTable::default(), &entities()).unwrap();
        assert_eq!(out.kind(), OutputKind::EntitiesOnly);
        assert_eq!(out.table(), entities().table());
        assert!(out.origins().is_none());
    }

    #[test]
    fn test_enrich_both_empty() {
        let out = engine()
            .enrich(&ReferenceTable::default(), &EntityTable::default())
            .unwrap();
        assert_eq!(out, EnrichedTable::Empty);
        assert_eq!(out.row_count(), 0);
        assert!(out.columns().is_empty());
    }

    #[test]
    fn test_enrich_without_entities_keeps_reference_rows() {
        let reference = battles(&[
            json!({"RoleA": 1, "RoleB": 2, "RoleOutcome": 1}),
            json!({"RoleA": 2, "RoleB": 1, "RoleOutcome": 2}),
        ]);
        let out = engine().enrich(&reference, &EntityTable::default()).unwrap();
        assert_eq!(out.kind(), OutputKind::ReferenceOnly);
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.table(), reference.table());
        assert!(out.origins().is_none());
        assert!(out.role_columns(Role::A).is_empty());
    }

    #[test]
    fn test_enrich_without_entities_still_checks_role_fields() {
        let reference = battles(&[json!({"RoleA": 1, "RoleB": 2})]);
        let err = engine().enrich(&reference, &EntityTable::default()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn { table: "reference", .. }));
    }

    #[test]
    fn test_enrich_rejects_reference_without_role_field() {
        let reference = battles(&[json!({"RoleA": 1, "RoleB": 2})]);
        let err = engine().enrich(&reference, &entities()).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::MissingColumn { table: "reference", column } if column == "RoleOutcome"
        ));
    }

    #[test]
    fn test_enrich_rejects_entities_without_key() {
        let reference = battles(&[json!({"RoleA": 1, "RoleB": 2, "RoleOutcome": 1})]);
        let entities: EntityTable = Table::from_records(&[json!({"id": 1, "Name": "A"})])
            .unwrap()
            .into();
        let err = engine().enrich(&reference, &entities).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn { table: "entities", .. }));

        // The entity-only fallback still needs a key column.
        let err = engine()
            .enrich(&ReferenceTable::default(), &entities)
            .unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn { table: "entities", .. }));
    }

    #[test]
    fn test_role_columns() {
        let reference = battles(&[json!({"RoleA": 1, "RoleB": 2, "RoleOutcome": 2})]);
        let out = engine().enrich(&reference, &entities()).unwrap();
        assert_eq!(out.role_columns(Role::A), vec!["#", "Name", "Attack"]);
        assert_eq!(out.role_columns(Role::B), vec!["Name_RoleB", "Attack_RoleB"]);
        assert_eq!(
            out.role_columns(Role::Outcome),
            vec!["Name_RoleOutcome", "Attack_RoleOutcome"]
        );
        assert!(EnrichedTable::Empty.role_columns(Role::A).is_empty());
    }

    #[test]
    fn test_free_function_validates_config() {
        let mut config = EnrichConfig::default();
        config.role_b.suffix = config.role_a.suffix.clone();
        let err = enrich(&ReferenceTable::default(), &entities(), config).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_deserialized_reference_is_width_checked() {
        let ragged = json!({"columns": ["RoleA", "RoleB", "RoleOutcome"], "rows": [[1]]});
        assert!(serde_json::from_value::<Table>(ragged).is_err());

        let whole = json!({"columns": ["RoleA", "RoleB", "RoleOutcome"], "rows": [[1, 2, 2]]});
        let reference: ReferenceTable = serde_json::from_value::<Table>(whole).unwrap().into();
        let out = engine().enrich(&reference, &entities()).unwrap();
        assert_eq!(out.table().get(0, "Name_RoleOutcome"), Some(&Value::from("B")));
    }

    #[test]
    fn test_schema_digest_distinguishes_output_kinds() {
        let reference = battles(&[json!({"RoleA": 1, "RoleB": 2, "RoleOutcome": 1})]);
        let enriched = engine().enrich(&reference, &entities()).unwrap();
        let fallback = engine().enrich(&ReferenceTable::default(), &entities()).unwrap();
        assert_ne!(enriched.schema_digest(), fallback.schema_digest());
    }
}
