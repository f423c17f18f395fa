pub mod capabilities;
pub mod host;
pub mod util;

use crate::host::LspHost;
use quokka_core::Settings;
use quokka_core::bridge::ProcessBridge;
use quokka_core::commands::{self, Invocation};
use quokka_core::config::SETTINGS_SECTION;
use quokka_core::host::ActiveDocument;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

pub struct LspServer {
    client: Client,
    folders: RwLock<Vec<PathBuf>>,
    /// Settings from `initializationOptions` or the last
    /// `didChangeConfiguration`, used when the client cannot be asked.
    fallback_settings: RwLock<Settings>,
    supports_configuration: AtomicBool,
}

impl LspServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            folders: RwLock::new(Vec::new()),
            fallback_settings: RwLock::new(Settings::default()),
            supports_configuration: AtomicBool::new(false),
        }
    }

    /// Settings are read fresh for every command, never cached.
    async fn settings_for(&self, document: Option<&ActiveDocument>) -> Settings {
        if self.supports_configuration.load(Ordering::Relaxed) {
            let item = ConfigurationItem {
                scope_uri: document.and_then(util::document_uri),
                section: Some(SETTINGS_SECTION.to_string()),
            };
            match self.client.configuration(vec![item]).await {
                Ok(mut values) if !values.is_empty() => {
                    match Settings::from_value(values.swap_remove(0)) {
                        Ok(settings) => return settings,
                        Err(e) => {
                            self.client
                                .log_message(
                                    MessageType::WARNING,
                                    format!("Invalid quokka settings, using defaults: {}", e),
                                )
                                .await;
                            return Settings::default();
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("workspace/configuration failed: {}", e),
            }
        }
        self.fallback_settings.read().await.clone()
    }

    async fn set_fallback_settings(&self, value: Option<Value>) {
        match Settings::from_init_options(value) {
            Ok(settings) => *self.fallback_settings.write().await = settings,
            Err(e) => {
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Ignoring invalid quokka settings: {}", e),
                    )
                    .await
            }
        }
    }
}

fn folder_paths(folders: &[WorkspaceFolder]) -> Vec<PathBuf> {
    folders
        .iter()
        .filter_map(|folder| util::uri_to_path(&folder.uri))
        .collect()
}

/// `rootUri` from clients that predate workspace folders.
#[allow(deprecated)]
fn legacy_root(params: &InitializeParams) -> Option<PathBuf> {
    params.root_uri.as_ref().and_then(util::uri_to_path)
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let mut folders = params
            .workspace_folders
            .as_deref()
            .map(folder_paths)
            .unwrap_or_default();
        if folders.is_empty() {
            folders.extend(legacy_root(&params));
        }
        tracing::info!("Quokka initialized with workspace folders {:?}", folders);
        *self.folders.write().await = folders;

        let supports_configuration = params
            .capabilities
            .workspace
            .as_ref()
            .and_then(|w| w.configuration)
            .unwrap_or(false);
        self.supports_configuration
            .store(supports_configuration, Ordering::Relaxed);

        self.set_fallback_settings(params.initialization_options)
            .await;

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "Quokka".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Quokka is now active")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("Quokka shutting down");
        Ok(())
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        let removed = folder_paths(&params.event.removed);
        let added = folder_paths(&params.event.added);
        let mut folders = self.folders.write().await;
        folders.retain(|f| !removed.contains(f));
        for folder in added {
            if !folders.contains(&folder) {
                folders.push(folder);
            }
        }
        tracing::info!("Workspace folders now {:?}", *folders);
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        self.set_fallback_settings(Some(params.settings)).await;
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        let command = params.command;
        let document = util::active_document(&params.arguments);
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: workspace/executeCommand command={} document={:?}",
                    command,
                    document.as_ref().map(|d| d.path.display().to_string())
                ),
            )
            .await;

        let settings = self.settings_for(document.as_ref()).await;
        let bridge = ProcessBridge::from_settings(&settings.bridge);
        let host = LspHost::new(self.client.clone(), self.folders.read().await.clone());
        let invocation = Invocation { document, settings };

        let result = commands::dispatch(&command, &invocation, &bridge, &host).await;
        match result {
            Ok(outcome) => {
                self.client
                    .log_message(
                        MessageType::LOG,
                        format!("LSP Response: {} -> {:?}", command, outcome),
                    )
                    .await;
                Ok(serde_json::to_value(outcome).ok())
            }
            Err(e) => {
                // Already shown to the user; the request itself succeeded.
                self.client
                    .log_message(
                        MessageType::LOG,
                        format!("LSP Response: {} failed: {}", command, e),
                    )
                    .await;
                Ok(None)
            }
        }
    }
}

pub async fn run_server() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = tower_lsp::LspService::new(LspServer::new);
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}
