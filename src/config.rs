//! Console configuration.
//!
//! Deployment details live here: where the remote authority is reached,
//! which paths its endpoints hang off, and how long alerts stay on
//! screen. `Default` describes the stock deployment; a YAML document
//! can override any subset of fields.

use serde::Deserialize;

use crate::alerts::CyclePolicy;
use crate::error::Result;

/// Runtime configuration for a console instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL of the remote authority, no trailing slash.
    pub base_url: String,
    /// Session status endpoint (GET).
    pub session_path: String,
    /// Full topology endpoint (GET).
    pub topology_path: String,
    /// Action file list endpoint (GET).
    pub actions_path: String,
    /// Single mutation endpoint (POST).
    pub mutation_path: String,
    /// API key appended to authority requests as a query parameter,
    /// when the deployment requires one.
    pub api_key: Option<String>,
    /// Alert display timing.
    pub alerts: CyclePolicy,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            session_path: "/app/session".to_string(),
            topology_path: "/api/topo".to_string(),
            actions_path: "/api/actions".to_string(),
            mutation_path: "/api/update".to_string(),
            api_key: None,
            alerts: CyclePolicy::default(),
        }
    }
}

impl ConsoleConfig {
    /// Parse a YAML document, falling back to defaults for any field
    /// the document omits.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }
}
