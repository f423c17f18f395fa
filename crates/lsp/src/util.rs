use quokka_core::host::ActiveDocument;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use tower_lsp::lsp_types::{Position, TextDocumentIdentifier, Url};

pub fn uri_to_path(uri: &Url) -> Option<PathBuf> {
    uri.to_file_path().ok()
}

/// First argument of a `workspace/executeCommand` request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommandArguments {
    text_document: TextDocumentIdentifier,
    #[serde(default)]
    position: Option<Position>,
}

/// Reads the active document from command arguments. Accepts either
/// `{ "textDocument": { "uri" }, "position"? }` or a bare URI string.
pub fn active_document(arguments: &[Value]) -> Option<ActiveDocument> {
    let first = arguments.first()?;
    let (uri, position) = match first {
        Value::String(raw) => (Url::parse(raw).ok()?, None),
        other => {
            let args = CommandArguments::deserialize(other).ok()?;
            (args.text_document.uri, args.position)
        }
    };
    let path = uri_to_path(&uri)?;
    let position = position.unwrap_or_default();
    Some(ActiveDocument::new(path, position.line, position.character))
}

pub fn document_uri(document: &ActiveDocument) -> Option<Url> {
    Url::from_file_path(&document.path).ok()
}
