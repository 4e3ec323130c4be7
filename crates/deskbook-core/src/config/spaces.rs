//! Declarative inventory configuration.

use serde::{Deserialize, Serialize};

/// Where the declarative area/room/desk tree comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpacesConfig {
    /// Path to the YAML or TOML declaration.
    #[serde(default)]
    pub declaration_file: Option<String>,
    /// Whether to seed missing nodes from the declaration on every boot.
    #[serde(default = "default_sync_on_boot")]
    pub sync_on_boot: bool,
}

impl Default for SpacesConfig {
    fn default() -> Self {
        Self {
            declaration_file: None,
            sync_on_boot: default_sync_on_boot(),
        }
    }
}

fn default_sync_on_boot() -> bool {
    true
}
