//! The three editor commands.
//!
//! Entry points take the active document, the settings read for this
//! invocation and only the collaborators they use, and return either an
//! outcome or a [`CommandError`]. [`dispatch`] routes a command identifier to
//! its entry point and turns the result into a user notification.

use crate::bridge::{AutomationBridge, BridgeOutcome, JumpRequest};
use crate::config::Settings;
use crate::host::{
    ActiveDocument, ClipboardWriter, DocumentNavigator, EditorHost, Notifier, Severity,
    WorkspaceLocator,
};
use crate::project::{CounterpartQuery, CounterpartResolver};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub const JUMP_TO_VISUAL_STUDIO: &str = "quokka.jumpToVS";
pub const SWITCH_HEADER_SOURCE: &str = "quokka.switchHeaderSource";
pub const COPY_FILE_NAME: &str = "quokka.copyFileName";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    JumpToVisualStudio,
    SwitchHeaderSource,
    CopyFileName,
}

impl CommandKind {
    pub const ALL: [CommandKind; 3] = [
        CommandKind::JumpToVisualStudio,
        CommandKind::SwitchHeaderSource,
        CommandKind::CopyFileName,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CommandKind::JumpToVisualStudio => JUMP_TO_VISUAL_STUDIO,
            CommandKind::SwitchHeaderSource => SWITCH_HEADER_SOURCE,
            CommandKind::CopyFileName => COPY_FILE_NAME,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

/// User-facing command failures. `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("No active editor found")]
    NoActiveEditor,
    #[error("Current file is not a C/C++ header or source file")]
    UnsupportedFileType,
    #[error("No workspace folder found")]
    NoWorkspaceFolder,
    #[error("No corresponding file found for {0}")]
    CounterpartNotFound(String),
    #[error("No running Visual Studio instance found. Please open Visual Studio first.")]
    VisualStudioNotRunning,
    #[error("Failed to open in Visual Studio: {0}")]
    AutomationFailed(String),
    #[error("Failed to copy file name: {0}")]
    Clipboard(String),
    #[error("Failed to open {0}: {1}")]
    OpenDocument(String, String),
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommandError {
    pub fn severity(&self) -> Severity {
        match self {
            CommandError::UnsupportedFileType | CommandError::CounterpartNotFound(_) => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CommandOutcome {
    #[serde(rename_all = "camelCase")]
    OpenedInVisualStudio { file_name: String, line: u32 },
    #[serde(rename_all = "camelCase")]
    SwitchedTo { path: PathBuf },
    #[serde(rename_all = "camelCase")]
    Copied { file_name: String },
}

impl CommandOutcome {
    /// Info message for the user, if the outcome deserves one.
    pub fn message(&self) -> Option<String> {
        match self {
            CommandOutcome::OpenedInVisualStudio { file_name, line } => {
                Some(format!("Opened in Visual Studio: {}:{}", file_name, line))
            }
            CommandOutcome::SwitchedTo { .. } => None,
            CommandOutcome::Copied { file_name } => Some(format!("Copied: {}", file_name)),
        }
    }
}

pub type CommandResult = std::result::Result<CommandOutcome, CommandError>;

pub async fn jump_to_visual_studio(
    document: Option<&ActiveDocument>,
    settings: &Settings,
    bridge: &dyn AutomationBridge,
) -> CommandResult {
    let document = document.ok_or(CommandError::NoActiveEditor)?;
    let request = JumpRequest {
        file: document.path.clone(),
        line: document.line.saturating_add(1),
        column: document.character.saturating_add(1),
        target: settings.visual_studio_version.clone(),
    };

    match bridge.open(&request).await {
        BridgeOutcome::Opened => Ok(CommandOutcome::OpenedInVisualStudio {
            file_name: document.file_name(),
            line: request.line,
        }),
        BridgeOutcome::NotRunning => Err(CommandError::VisualStudioNotRunning),
        BridgeOutcome::Failed(detail) => Err(CommandError::AutomationFailed(detail)),
    }
}

pub async fn switch_header_source<H>(
    document: Option<&ActiveDocument>,
    settings: &Settings,
    host: &H,
) -> CommandResult
where
    H: WorkspaceLocator + DocumentNavigator + ?Sized,
{
    let document = document.ok_or(CommandError::NoActiveEditor)?;
    let query =
        CounterpartQuery::for_file(&document.path).ok_or(CommandError::UnsupportedFileType)?;
    let root = host
        .workspace_root(&document.path)
        .ok_or(CommandError::NoWorkspaceFolder)?;

    let resolver = CounterpartResolver::from_settings(settings);
    let found = tokio::task::spawn_blocking(move || resolver.resolve(&root, &query))
        .await
        .map_err(|e| CommandError::Internal(e.to_string()))?;

    let Some(path) = found else {
        return Err(CommandError::CounterpartNotFound(document.file_name()));
    };

    host.show_document(&path)
        .await
        .map_err(|e| CommandError::OpenDocument(path.display().to_string(), e.to_string()))?;
    Ok(CommandOutcome::SwitchedTo { path })
}

pub async fn copy_file_name<C>(document: Option<&ActiveDocument>, clipboard: &C) -> CommandResult
where
    C: ClipboardWriter + ?Sized,
{
    let document = document.ok_or(CommandError::NoActiveEditor)?;
    let file_name = document.file_name();
    clipboard
        .write_text(&file_name)
        .await
        .map_err(|e| CommandError::Clipboard(e.to_string()))?;
    Ok(CommandOutcome::Copied { file_name })
}

/// One command invocation: the document it was issued from and the settings
/// read for it.
pub struct Invocation {
    pub document: Option<ActiveDocument>,
    pub settings: Settings,
}

/// Runs the command named `command` and reports the result to the user.
/// Errors are never retried.
pub async fn dispatch<H>(
    command: &str,
    invocation: &Invocation,
    bridge: &dyn AutomationBridge,
    host: &H,
) -> CommandResult
where
    H: EditorHost + ?Sized,
{
    let document = invocation.document.as_ref();
    let result = match CommandKind::from_id(command) {
        Some(CommandKind::JumpToVisualStudio) => {
            jump_to_visual_studio(document, &invocation.settings, bridge).await
        }
        Some(CommandKind::SwitchHeaderSource) => {
            switch_header_source(document, &invocation.settings, host).await
        }
        Some(CommandKind::CopyFileName) => copy_file_name(document, host).await,
        None => Err(CommandError::UnknownCommand(command.to_string())),
    };

    match &result {
        Ok(outcome) => {
            tracing::info!(command, ?outcome, "Command succeeded");
            if let Some(message) = outcome.message() {
                host.notify(Severity::Info, message).await;
            }
        }
        Err(e) => {
            tracing::warn!(command, "Command failed: {}", e);
            host.notify(e.severity(), e.to_string()).await;
        }
    }
    result
}
