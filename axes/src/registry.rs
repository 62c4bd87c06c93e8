//! Axis registry.
//!
//! The registry is a declarative JSON list of `{id, label, enabled}`
//! records. A built-in copy is compiled into the crate; a file on disk can
//! replace it. A missing or malformed file degrades to an empty registry so
//! that the caller reports "no axes enabled" instead of aborting.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::axis::Axis;
use crate::error::{AxisError, Result};

const BUILTIN_REGISTRY: &str = include_str!("../registry.json");

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisDefinition {
    /// Unique identifier, resolved onto an [`Axis`].
    pub id: String,

    /// Human-readable label.
    pub label: String,

    /// Whether the axis participates in a run.
    #[serde(default)]
    pub enabled: bool,
}

impl AxisDefinition {
    /// Create an enabled definition.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: true,
        }
    }

    /// Disable the axis.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Declarative list of available axes.
#[derive(Debug, Clone, Default)]
pub struct AxisRegistry {
    definitions: Vec<AxisDefinition>,
}

impl AxisRegistry {
    /// Create a registry from explicit definitions.
    pub fn new(definitions: Vec<AxisDefinition>) -> Self {
        Self { definitions }
    }

    /// The registry compiled into the crate.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_REGISTRY).unwrap_or_else(|err| {
            warn!("Built-in axis registry is invalid: {err}");
            Self::default()
        })
    }

    /// Parse a registry from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<AxisDefinition> = serde_json::from_str(json)?;
        Ok(Self::new(definitions))
    }

    /// Read a registry file, failing on a missing or malformed file.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| {
            AxisError::Registry(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_json(&content)
            .map_err(|err| AxisError::Registry(format!("invalid {}: {err}", path.display())))
    }

    /// Read a registry file. A missing or malformed file yields an empty
    /// registry.
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(path) {
            Ok(registry) => registry,
            Err(err) => {
                warn!("{err}");
                Self::default()
            }
        }
    }

    /// All entries in declared order.
    pub fn definitions(&self) -> &[AxisDefinition] {
        &self.definitions
    }

    /// Enabled entries in declared order. Repeated identifiers keep only
    /// their first entry.
    pub fn enabled(&self) -> Vec<AxisDefinition> {
        let mut seen = HashSet::new();
        self.definitions
            .iter()
            .filter(|definition| definition.enabled)
            .filter(|definition| {
                let first = seen.insert(definition.id.as_str());
                if !first {
                    warn!("Duplicate axis id in registry: {}", definition.id);
                }
                first
            })
            .cloned()
            .collect()
    }

    /// Resolve a definition onto its strategy.
    pub fn resolve(definition: &AxisDefinition) -> Result<Axis> {
        let axis = Axis::from_str(&definition.id)
            .map_err(|_| AxisError::UnknownAxis(definition.id.clone()))?;
        debug!("Resolved axis {} -> {axis:?}", definition.id);
        Ok(axis)
    }
}
