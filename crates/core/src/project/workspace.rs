use std::path::{Path, PathBuf};

/// Finds the workspace folder that owns `file`. With nested folders open,
/// the deepest one containing the file wins.
pub fn workspace_root_for(folders: &[PathBuf], file: &Path) -> Option<PathBuf> {
    folders
        .iter()
        .filter(|folder| file.starts_with(folder))
        .max_by_key(|folder| folder.components().count())
        .cloned()
}
