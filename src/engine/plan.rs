//! Output schema planning.
//!
//! The enriched schema is decided once, up front, from the two input
//! schemas and the config. Lookup passes then only copy cells into
//! positions this plan already named.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::{EnrichConfig, Role};
use crate::error::SchemaError;
use crate::table::Table;

/// Where an enriched column came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnOrigin {
    /// A field of the reference record, copied as-is.
    Reference,
    /// An entity attribute attached for `role`.
    Role {
        /// Role the attribute was attached for.
        role: Role,
        /// Entity column the value was copied from.
        attribute: String,
    },
}

impl ColumnOrigin {
    /// Role this column was attached for, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Reference => None,
            Self::Role { role, .. } => Some(*role),
        }
    }
}

/// Columns one lookup pass appends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RolePlan {
    pub role: Role,
    /// Reference column holding this role's identifier.
    pub reference_pos: usize,
    /// Entity columns copied by this pass, in output order.
    pub attributes: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutputPlan {
    pub columns: Vec<String>,
    pub origins: Vec<ColumnOrigin>,
    pub passes: Vec<RolePlan>,
}

/// Plans the enriched schema.
///
/// Naming rules:
/// - role A attributes keep their names, unless the name is already a
///   reference field, in which case role A's suffix is appended
/// - role B and outcome attributes always carry their role's suffix
/// - the key column is emitted once, by role A only
pub(crate) fn plan(
    reference: &Table,
    entities: &Table,
    key_pos: usize,
    role_positions: &[(Role, usize)],
    config: &EnrichConfig,
) -> Result<OutputPlan, SchemaError> {
    let mut columns: Vec<String> = reference.columns().to_vec();
    let mut origins = vec![ColumnOrigin::Reference; columns.len()];
    let mut passes = Vec::with_capacity(role_positions.len());

    let reference_fields: HashSet<&str> = reference.columns().iter().map(String::as_str).collect();

    for &(role, reference_pos) in role_positions {
        let binding = config.binding(role);
        let mut attributes = Vec::with_capacity(entities.column_count());

        for (pos, attribute) in entities.columns().iter().enumerate() {
            let name = if role.is_base() {
                if reference_fields.contains(attribute.as_str()) {
                    binding.suffixed(attribute)
                } else {
                    attribute.clone()
                }
            } else if pos == key_pos {
                continue;
            } else {
                binding.suffixed(attribute)
            };

            attributes.push(pos);
            columns.push(name);
            origins.push(ColumnOrigin::Role {
                role,
                attribute: attribute.clone(),
            });
        }

        passes.push(RolePlan {
            role,
            reference_pos,
            attributes,
        });
    }

    let mut seen = HashSet::with_capacity(columns.len());
    for name in &columns {
        if !seen.insert(name.as_str()) {
            return Err(SchemaError::ColumnCollision {
                column: name.clone(),
            });
        }
    }

    Ok(OutputPlan {
        columns,
        origins,
        passes,
    })
}
