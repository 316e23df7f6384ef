//! Enrichment configuration.
//!
//! Names the entity key column and binds each [`Role`] to the reference
//! column that carries its identifier. Loaded from JSON; every field is
//! optional and falls back to [`EnrichConfig::default`].

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named position in a reference record that points at an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// First participant.
    A,
    /// Second participant.
    B,
    /// Outcome of the contest, e.g. the winner.
    Outcome,
}

impl Role {
    /// All roles, in enrichment pass order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::Outcome];

    /// True for the role whose attributes keep their plain names.
    #[must_use]
    pub const fn is_base(self) -> bool {
        matches!(self, Self::A)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "role_a"),
            Self::B => write!(f, "role_b"),
            Self::Outcome => write!(f, "role_outcome"),
        }
    }
}

/// Binds a role to a reference column and an attribute suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBinding {
    /// Reference column holding this role's entity identifier.
    pub field: String,
    /// Suffix appended to this role's attribute column names.
    pub suffix: String,
}

impl RoleBinding {
    /// Binds `field`, deriving the suffix `_<field>`.
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        let suffix = format!("_{field}");
        Self { field, suffix }
    }

    /// Binds `field` with an explicit suffix.
    #[must_use]
    pub fn with_suffix(field: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            suffix: suffix.into(),
        }
    }

    /// Output name for an attribute of this role.
    #[must_use]
    pub fn suffixed(&self, attribute: &str) -> String {
        format!("{attribute}{}", self.suffix)
    }
}

/// Configuration for [`EnrichmentEngine`](crate::EnrichmentEngine).
///
/// The default reproduces the battle dataset this crate was first used
/// with: entities keyed by `#`, battles naming `First_pokemon`,
/// `Second_pokemon` and `Winner`.
///
/// # Examples
///
/// ```
/// use rolejoin::{EnrichConfig, Role};
///
/// let config = EnrichConfig::from_json_str(r#"{"key_column": "id"}"#).unwrap();
/// assert_eq!(config.key_column, "id");
/// assert_eq!(config.binding(Role::Outcome).field, "Winner");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    /// Entity column holding the unique identifier.
    pub key_column: String,
    /// First participant; its attributes keep plain names.
    pub role_a: RoleBinding,
    /// Second participant.
    pub role_b: RoleBinding,
    /// Outcome, e.g. the winner.
    pub role_outcome: RoleBinding,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            key_column: "#".to_string(),
            role_a: RoleBinding::with_suffix("First_pokemon", "_Pokemon1"),
            role_b: RoleBinding::with_suffix("Second_pokemon", "_Pokemon2"),
            role_outcome: RoleBinding::with_suffix("Winner", "_Winner"),
        }
    }
}

impl EnrichConfig {
    /// Builds a config from a key column and three role bindings.
    #[must_use]
    pub fn new(
        key_column: impl Into<String>,
        role_a: RoleBinding,
        role_b: RoleBinding,
        role_outcome: RoleBinding,
    ) -> Self {
        Self {
            key_column: key_column.into(),
            role_a,
            role_b,
            role_outcome,
        }
    }

    /// Parses a JSON config document.
    ///
    /// # Errors
    /// Returns `Parse` on malformed JSON. The result is not validated.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and validates a JSON config file.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read, `Parse` on malformed JSON,
    /// or any [`validate`](Self::validate) error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            key_column = %config.key_column,
            "loaded enrich config"
        );
        Ok(config)
    }

    /// Binding for `role`.
    #[must_use]
    pub const fn binding(&self, role: Role) -> &RoleBinding {
        match role {
            Role::A => &self.role_a,
            Role::B => &self.role_b,
            Role::Outcome => &self.role_outcome,
        }
    }

    /// Checks that the config can produce an unambiguous schema.
    ///
    /// # Errors
    /// - `EmptyField`: blank key column, role field or suffix
    /// - `DuplicateRoleField`: two roles read the same reference column
    /// - `DuplicateSuffix`: two roles would suffix attributes identically
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_column.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "key_column".to_string(),
            });
        }

        let mut fields = HashSet::new();
        let mut suffixes = HashSet::new();
        for role in Role::ALL {
            let binding = self.binding(role);
            if binding.field.trim().is_empty() {
                return Err(ConfigError::EmptyField {
                    field: format!("{role}.field"),
                });
            }
            if binding.suffix.is_empty() {
                return Err(ConfigError::EmptyField {
                    field: format!("{role}.suffix"),
                });
            }
            if !fields.insert(binding.field.as_str()) {
                return Err(ConfigError::DuplicateRoleField {
                    field: binding.field.clone(),
                });
            }
            if !suffixes.insert(binding.suffix.as_str()) {
                return Err(ConfigError::DuplicateSuffix {
                    suffix: binding.suffix.clone(),
                });
            }
        }
        Ok(())
    }
}
