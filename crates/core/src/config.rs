use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Host-side settings for the SAGA provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Settings {
    /// Directory containing the `saga_cmd` binary; resolved from PATH
    /// when unset.
    pub saga_folder: Option<PathBuf>,

    /// Mirror every executed command line into the host log.
    pub log_commands: bool,

    /// Mirror the engine's console output into the host log.
    pub log_console_output: bool,

    /// Where exported layers land; the system temp dir when unset.
    pub shared_temp_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            saga_folder: None,
            log_commands: true,
            log_console_output: true,
            shared_temp_dir: None,
        }
    }
}

impl Settings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)
            .map_err(|e| Error::Other(format!("Failed to parse settings: {e}")))?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Other(format!("Failed to serialize settings: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
