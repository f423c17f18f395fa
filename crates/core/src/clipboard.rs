use crate::error::{QuokkaError, Result};
use crate::host::ClipboardWriter;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Writes to the system clipboard through the platform's command-line tool.
#[derive(Debug, Clone, Default)]
pub struct SystemClipboard;

struct ClipboardTool {
    program: &'static str,
    args: &'static [&'static str],
}

#[cfg(windows)]
const TOOLS: &[ClipboardTool] = &[ClipboardTool {
    program: "clip",
    args: &[],
}];

#[cfg(target_os = "macos")]
const TOOLS: &[ClipboardTool] = &[ClipboardTool {
    program: "pbcopy",
    args: &[],
}];

#[cfg(not(any(windows, target_os = "macos")))]
const TOOLS: &[ClipboardTool] = &[
    ClipboardTool {
        program: "wl-copy",
        args: &[],
    },
    ClipboardTool {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
];

impl SystemClipboard {
    async fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<()> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            // Dropping stdin closes the pipe so the tool sees EOF.
        }

        let status = child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(QuokkaError::Host(format!("{} exited with {}", program, status)))
        }
    }
}

#[async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut last_error = None;
        for tool in TOOLS {
            match Self::pipe_into(tool.program, tool.args, text).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::debug!("Clipboard tool {} failed: {}", tool.program, e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error
            .unwrap_or_else(|| QuokkaError::Host("no clipboard tool available".to_string())))
    }
}
