//! Host configuration.

use std::path::Path;

use anchorflex::{Priority, Size};
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Settings for a [`SolverHost`](crate::SolverHost).
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Size of the host rectangle the root is pinned to.
    pub bounds: Size,
    /// Priority at which views are held to their intrinsic size.
    pub intrinsic_priority: f32,
    /// Residual below which an equation counts as satisfied.
    pub tolerance: f32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bounds: Size::new(375.0, 667.0),
            intrinsic_priority: Priority::HIGH.0,
            tolerance: 1e-3,
        }
    }
}

impl HostConfig {
    pub fn with_bounds(mut self, bounds: impl Into<Size>) -> Self {
        self.bounds = bounds.into();
        self
    }

    pub fn from_json(json: &str) -> Result<Self, HarnessError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| HarnessError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn intrinsic_priority(&self) -> Priority {
        Priority(self.intrinsic_priority)
    }
}
