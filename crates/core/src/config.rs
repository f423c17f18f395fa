use crate::model::{DEFAULT_EXCLUDE_FOLDERS, ExcludeSet};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration section name the editor stores the settings under.
pub const SETTINGS_SECTION: &str = "quokka";

pub const DEFAULT_VISUAL_STUDIO_VERSION: &str = "VisualStudio.DTE.17.0";

/// User-overridable settings, read once per command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub exclude_folders: Vec<String>,
    /// Automation target identifier, passed to the bridge unmodified.
    pub visual_studio_version: String,
    pub follow_symlinks: bool,
    pub bridge: BridgeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exclude_folders: DEFAULT_EXCLUDE_FOLDERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            visual_studio_version: DEFAULT_VISUAL_STUDIO_VERSION.to_string(),
            follow_symlinks: false,
            bridge: BridgeSettings::default(),
        }
    }
}

impl Settings {
    /// Builds settings from a configuration value. `null` and missing keys
    /// fall back to the defaults.
    pub fn from_value(value: serde_json::Value) -> crate::Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Accepts either the bare settings object or one nested under the
    /// `quokka` key, as clients send in `initializationOptions`.
    pub fn from_init_options(value: Option<serde_json::Value>) -> crate::Result<Self> {
        match value {
            Some(serde_json::Value::Object(mut map)) => match map.remove(SETTINGS_SECTION) {
                Some(section) => Self::from_value(section),
                None => Self::from_value(serde_json::Value::Object(map)),
            },
            Some(other) => Self::from_value(other),
            None => Ok(Self::default()),
        }
    }

    pub fn exclude_set(&self) -> ExcludeSet {
        ExcludeSet::new(self.exclude_folders.iter().cloned())
    }
}

/// How the automation bridge process is launched.
///
/// The command line is `program args... [script] file line column target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeSettings {
    pub program: String,
    pub args: Vec<String>,
    /// Script handed to `program` after `args`. When unset the bundled
    /// `scripts/open-in-vs.ps1` next to the running executable is used.
    pub script: Option<PathBuf>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            program: "powershell".to_string(),
            args: vec![
                "-NoProfile".to_string(),
                "-ExecutionPolicy".to_string(),
                "Bypass".to_string(),
                "-File".to_string(),
            ],
            script: None,
        }
    }
}

impl BridgeSettings {
    pub fn script_path(&self) -> Option<PathBuf> {
        if let Some(script) = &self.script {
            return Some(script.clone());
        }
        let exe = std::env::current_exe().ok()?;
        Some(exe.parent()?.join("scripts").join("open-in-vs.ps1"))
    }
}
