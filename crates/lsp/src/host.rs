use async_trait::async_trait;
use quokka_core::clipboard::SystemClipboard;
use quokka_core::host::{
    ClipboardWriter, DocumentNavigator, EditorHost, Notifier, Severity, WorkspaceLocator,
};
use quokka_core::{QuokkaError, workspace_root_for};
use std::path::{Path, PathBuf};
use tower_lsp::Client;
use tower_lsp::lsp_types::{MessageType, ShowDocumentParams, Url};

/// The editor as seen through the LSP client, for one command invocation.
///
/// `folders` is a snapshot of the workspace folders at invocation time.
pub struct LspHost {
    client: Client,
    folders: Vec<PathBuf>,
    clipboard: SystemClipboard,
}

impl LspHost {
    pub fn new(client: Client, folders: Vec<PathBuf>) -> Self {
        Self {
            client,
            folders,
            clipboard: SystemClipboard,
        }
    }
}

fn message_type(severity: Severity) -> MessageType {
    match severity {
        Severity::Info => MessageType::INFO,
        Severity::Warning => MessageType::WARNING,
        Severity::Error => MessageType::ERROR,
    }
}

#[async_trait]
impl Notifier for LspHost {
    async fn notify(&self, severity: Severity, message: String) {
        self.client
            .show_message(message_type(severity), message)
            .await;
    }
}

#[async_trait]
impl DocumentNavigator for LspHost {
    async fn show_document(&self, path: &Path) -> quokka_core::Result<()> {
        let uri = Url::from_file_path(path)
            .map_err(|_| QuokkaError::Host(format!("not an absolute path: {}", path.display())))?;
        let shown = self
            .client
            .show_document(ShowDocumentParams {
                uri,
                external: Some(false),
                take_focus: Some(true),
                selection: None,
            })
            .await
            .map_err(|e| QuokkaError::Host(e.to_string()))?;
        if shown {
            Ok(())
        } else {
            Err(QuokkaError::Host("client refused to show the document".to_string()))
        }
    }
}

#[async_trait]
impl ClipboardWriter for LspHost {
    async fn write_text(&self, text: &str) -> quokka_core::Result<()> {
        self.clipboard.write_text(text).await
    }
}

impl WorkspaceLocator for LspHost {
    fn workspace_root(&self, file: &Path) -> Option<PathBuf> {
        workspace_root_for(&self.folders, file)
    }
}

impl EditorHost for LspHost {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_map_to_message_types() {
        assert_eq!(message_type(Severity::Info), MessageType::INFO);
        assert_eq!(message_type(Severity::Warning), MessageType::WARNING);
        assert_eq!(message_type(Severity::Error), MessageType::ERROR);
    }
}
