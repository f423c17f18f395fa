//! The external automation bridge that drives a running Visual Studio.
//!
//! The bridge is a separate process taking four positional parameters:
//! file path, 1-based line, 1-based column and the automation target
//! identifier. Its exit status and stderr text decide the outcome.

use crate::config::BridgeSettings;
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use tokio::process::Command;

/// Substring the bridge writes to stderr when Visual Studio is not running.
pub const NOT_RUNNING_MARKER: &str = "No running Visual Studio instance found";

pub const SCRIPT_NOT_FOUND: &str = "bridge script not found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpRequest {
    pub file: PathBuf,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub column: u32,
    /// Passed through unmodified.
    pub target: String,
}

impl JumpRequest {
    pub fn positional_args(&self) -> Vec<String> {
        vec![
            self.file.to_string_lossy().into_owned(),
            self.line.to_string(),
            self.column.to_string(),
            self.target.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeOutcome {
    Opened,
    NotRunning,
    /// Raw diagnostic text from the bridge.
    Failed(String),
}

impl BridgeOutcome {
    pub fn classify(exit_ok: bool, exit_description: &str, stderr: &str) -> Self {
        if stderr.contains(NOT_RUNNING_MARKER) {
            return BridgeOutcome::NotRunning;
        }
        if exit_ok {
            return BridgeOutcome::Opened;
        }
        let stderr = stderr.trim();
        if stderr.is_empty() {
            BridgeOutcome::Failed(exit_description.to_string())
        } else {
            BridgeOutcome::Failed(stderr.to_string())
        }
    }
}

#[async_trait]
pub trait AutomationBridge: Send + Sync {
    async fn open(&self, request: &JumpRequest) -> BridgeOutcome;
}

/// Runs the bridge as a child process. Arguments go through argv, never a
/// shell, so paths with spaces or quotes need no escaping.
pub struct ProcessBridge {
    program: String,
    leading_args: Vec<String>,
    /// Set when the bridge cannot be launched at all.
    unavailable: Option<String>,
}

impl ProcessBridge {
    pub fn new(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
            unavailable: None,
        }
    }

    pub fn from_settings(settings: &BridgeSettings) -> Self {
        Self::with_script(settings, settings.script_path())
    }

    /// Without a script the program would treat the source file as the
    /// script to run, so the bridge is marked unavailable instead.
    fn with_script(settings: &BridgeSettings, script: Option<PathBuf>) -> Self {
        let mut bridge = Self::new(settings.program.clone(), settings.args.clone());
        match script {
            Some(script) => bridge
                .leading_args
                .push(script.to_string_lossy().into_owned()),
            None => bridge.unavailable = Some(SCRIPT_NOT_FOUND.to_string()),
        }
        bridge
    }
}

#[async_trait]
impl AutomationBridge for ProcessBridge {
    async fn open(&self, request: &JumpRequest) -> BridgeOutcome {
        if let Some(reason) = &self.unavailable {
            tracing::error!("Automation bridge unavailable: {}", reason);
            return BridgeOutcome::Failed(reason.clone());
        }

        tracing::info!(
            program = %self.program,
            file = %request.file.display(),
            line = request.line,
            column = request.column,
            target = %request.target,
            "Invoking automation bridge"
        );

        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args(request.positional_args())
            .kill_on_drop(true)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                tracing::error!("Failed to launch automation bridge: {}", e);
                return BridgeOutcome::Failed(e.to_string());
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            tracing::debug!("Bridge output: {}", stdout.trim());
        }

        let outcome = BridgeOutcome::classify(
            output.status.success(),
            &output.status.to_string(),
            &stderr,
        );
        if outcome != BridgeOutcome::Opened {
            tracing::error!(status = %output.status, stderr = %stderr.trim(), "Automation bridge failed");
        }
        outcome
    }
}
