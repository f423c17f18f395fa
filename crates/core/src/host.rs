//! What the commands need from the editor they run in.

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The document the user invoked a command from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveDocument {
    pub path: PathBuf,
    /// 0-based cursor line.
    pub line: u32,
    /// 0-based cursor column, in the editor's own units.
    pub character: u32,
}

impl ActiveDocument {
    pub fn new(path: impl Into<PathBuf>, line: u32, character: u32) -> Self {
        Self {
            path: path.into(),
            line,
            character,
        }
    }

    /// File name with extension, without directories.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Fire-and-forget user notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, severity: Severity, message: String);
}

#[async_trait]
pub trait DocumentNavigator: Send + Sync {
    /// Opens `path` and brings it to the front.
    async fn show_document(&self, path: &Path) -> Result<()>;
}

#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

pub trait WorkspaceLocator: Send + Sync {
    fn workspace_root(&self, file: &Path) -> Option<PathBuf>;
}

/// Everything an editor integration has to provide to host the commands.
pub trait EditorHost: Notifier + DocumentNavigator + ClipboardWriter + WorkspaceLocator {}
