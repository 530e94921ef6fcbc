//! Configuration for the nmcli client

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{NmcliError, NmcliResult};

/// Client settings, applied to every invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NmcliConfig {
    /// Executable name or path
    #[serde(default = "default_program")]
    pub program: String,
    /// Default `--wait` timeout in seconds; nmcli's own default when unset
    #[serde(default)]
    pub wait: Option<u32>,
    /// Pass `--show-secrets`
    #[serde(default)]
    pub show_secrets: bool,
}

fn default_program() -> String {
    "nmcli".to_string()
}

impl Default for NmcliConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            wait: None,
            show_secrets: false,
        }
    }
}

impl NmcliConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> NmcliResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| NmcliError::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| NmcliError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> NmcliResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| NmcliError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| NmcliError::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_wait(mut self, seconds: u32) -> Self {
        self.wait = Some(seconds);
        self
    }

    pub fn with_show_secrets(mut self, show: bool) -> Self {
        self.show_secrets = show;
        self
    }
}
