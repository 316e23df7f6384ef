//! Single-role lookup pass.

use crate::entity::EntityIndex;
use crate::table::Row;
use crate::value::Value;

use super::plan::RolePlan;

/// Match counts for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PassStats {
    pub matched: usize,
    pub missed: usize,
}

/// Left-outer lookup for one role: appends the matched entity's planned
/// attributes to every row, or nulls when the identifier matches nothing.
///
/// Rows are neither dropped nor duplicated.
pub(crate) fn apply(
    plan: &RolePlan,
    index: &EntityIndex<'_>,
    rows: Vec<Row>,
) -> (Vec<Row>, PassStats) {
    let mut stats = PassStats::default();
    let width = plan.attributes.len();

    let rows = rows
        .into_iter()
        .map(|mut row| {
            let matched = row[plan.reference_pos]
                .as_key()
                .and_then(|key| index.lookup(&key));
            row.reserve(width);
            match matched {
                Some(entity) => {
                    stats.matched += 1;
                    row.extend(plan.attributes.iter().map(|&pos| entity[pos].clone()));
                }
                None => {
                    stats.missed += 1;
                    row.resize(row.len() + width, Value::Null);
                }
            }
            row
        })
        .collect();

    (rows, stats)
}
