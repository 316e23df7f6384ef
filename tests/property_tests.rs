//! Property-based tests for enrichment.
//!
//! 1. Row count always equals the reference row count
//! 2. Duplicate entity keys never fan rows out
//! 3. Every role's attributes match the entity its identifier names
//! 4. Enrichment is deterministic

use std::collections::HashMap;

use proptest::prelude::*;
use rolejoin::{
    EnrichConfig, EnrichmentEngine, EntityTable, OutputKind, ReferenceTable, Role, RoleBinding,
    Table, Value,
};

// ============================================================================
// Strategies
// ============================================================================

fn engine() -> EnrichmentEngine {
    EnrichmentEngine::new(EnrichConfig::new(
        "#",
        RoleBinding::new("RoleA"),
        RoleBinding::new("RoleB"),
        RoleBinding::new("RoleOutcome"),
    ))
    .unwrap()
}

/// Identifier cells: mostly small ints so matches are common, plus nulls.
fn id_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        8 => (0i64..12).prop_map(Value::Int),
        1 => Just(Value::Null),
        1 => "[a-c]{1,2}".prop_map(Value::String),
    ]
}

/// Entities keyed by ids drawn from a small range, so duplicates occur.
fn entity_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..10, -100i64..100), 0..12)
}

fn reference_strategy() -> impl Strategy<Value = Vec<[Value; 3]>> {
    prop::collection::vec([id_strategy(), id_strategy(), id_strategy()], 0..24)
}

fn build_entities(rows: &[(i64, i64)]) -> EntityTable {
    let mut table = Table::new(["#", "power"]).unwrap();
    for &(id, power) in rows {
        table.push_row(vec![Value::Int(id), Value::Int(power)]).unwrap();
    }
    table.into()
}

fn build_reference(rows: &[[Value; 3]]) -> ReferenceTable {
    let mut table = Table::new(["RoleA", "RoleB", "RoleOutcome"]).unwrap();
    for row in rows {
        table.push_row(row.to_vec()).unwrap();
    }
    table.into()
}

/// Expected `power` for an identifier: only keys that occur exactly once match.
fn expected_power(entities: &[(i64, i64)], id: &Value) -> Value {
    let mut counts: HashMap<i64, (usize, i64)> = HashMap::new();
    for &(key, power) in entities {
        let entry = counts.entry(key).or_insert((0, power));
        entry.0 += 1;
    }
    match id {
        Value::Int(key) => match counts.get(key) {
            Some(&(1, power)) => Value::Int(power),
            _ => Value::Null,
        },
        _ => Value::Null,
    }
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_row_count_invariant(entities in entity_strategy(), reference in reference_strategy()) {
        let entity_table = build_entities(&entities);
        let reference_table = build_reference(&reference);
        let out = engine().enrich(&reference_table, &entity_table).unwrap();

        if reference.is_empty() {
            prop_assert_eq!(out.row_count(), entities.len());
        } else if entities.is_empty() {
            prop_assert_eq!(out.kind(), OutputKind::ReferenceOnly);
            prop_assert_eq!(out.row_count(), reference.len());
        } else {
            prop_assert!(out.is_enriched());
            prop_assert_eq!(out.row_count(), reference.len());
        }
    }

    #[test]
    fn prop_role_attributes_match_their_entity(
        entities in entity_strategy(),
        reference in reference_strategy(),
    ) {
        prop_assume!(!entities.is_empty() && !reference.is_empty());
        let out = engine()
            .enrich(&build_reference(&reference), &build_entities(&entities))
            .unwrap();
        let table = out.table();

        for (i, ids) in reference.iter().enumerate() {
            for (role, id) in Role::ALL.iter().zip(ids) {
                let column = match role {
                    Role::A => "power",
                    Role::B => "power_RoleB",
                    Role::Outcome => "power_RoleOutcome",
                };
                prop_assert_eq!(table.get(i, column), Some(&expected_power(&entities, id)));
            }
        }
    }

    #[test]
    fn prop_single_key_column(entities in entity_strategy(), reference in reference_strategy()) {
        prop_assume!(!entities.is_empty() && !reference.is_empty());
        let out = engine()
            .enrich(&build_reference(&reference), &build_entities(&entities))
            .unwrap();
        let keys = out.columns().iter().filter(|c| c.starts_with('#')).count();
        prop_assert_eq!(keys, 1);
        prop_assert_eq!(out.columns().len(), 3 + 2 + 1 + 1);
    }

    #[test]
    fn prop_enrichment_is_deterministic(
        entities in entity_strategy(),
        reference in reference_strategy(),
    ) {
        let entity_table = build_entities(&entities);
        let reference_table = build_reference(&reference);
        let first = engine().enrich(&reference_table, &entity_table).unwrap();
        let second = engine().enrich(&reference_table, &entity_table).unwrap();
        prop_assert_eq!(first.schema_digest(), second.schema_digest());
        prop_assert_eq!(first, second);
    }
}
