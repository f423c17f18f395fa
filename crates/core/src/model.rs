use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub const HEADER_EXTENSIONS: &[&str] = &[".h", ".hpp"];
pub const SOURCE_EXTENSIONS: &[&str] = &[".cpp", ".c", ".cc"];

/// Directory names skipped by default when searching for a counterpart.
pub const DEFAULT_EXCLUDE_FOLDERS: &[&str] = &[
    "build",
    "out",
    "dist",
    "node_modules",
    ".git",
    "bin",
    "obj",
    "Debug",
    "Release",
    "x64",
    "x86",
];

/// Lower-cases an extension and gives it a leading dot, so `"CPP"`,
/// `".Cpp"` and `".cpp"` all compare equal.
pub fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}

/// The two halves of the C/C++ extension bipartition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtensionClass {
    Header,
    Source,
}

impl ExtensionClass {
    /// Classifies an extension case-insensitively. Unrecognised extensions
    /// belong to neither class.
    pub fn of(ext: &str) -> Option<Self> {
        let ext = normalize_extension(ext);
        if HEADER_EXTENSIONS.contains(&ext.as_str()) {
            Some(ExtensionClass::Header)
        } else if SOURCE_EXTENSIONS.contains(&ext.as_str()) {
            Some(ExtensionClass::Source)
        } else {
            None
        }
    }

    pub fn counterpart(self) -> Self {
        match self {
            ExtensionClass::Header => ExtensionClass::Source,
            ExtensionClass::Source => ExtensionClass::Header,
        }
    }

    /// Extensions of this class, highest priority first.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ExtensionClass::Header => HEADER_EXTENSIONS,
            ExtensionClass::Source => SOURCE_EXTENSIONS,
        }
    }
}

/// Base name and extension of a file, split the way the counterpart search
/// compares them: the extension is normalized (lower case, leading dot), the
/// base name is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentity {
    pub base_name: String,
    pub extension: String,
}

impl FileIdentity {
    /// Splits a file name at its last extension. Names without an extension
    /// (including dot-files such as `.h`) yield an empty extension.
    pub fn from_file_name(name: &OsStr) -> Option<Self> {
        let path = Path::new(name);
        let base_name = path.file_stem()?.to_str()?.to_string();
        let extension = match path.extension() {
            Some(ext) => normalize_extension(ext.to_str()?),
            None => String::new(),
        };
        Some(Self {
            base_name,
            extension,
        })
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_file_name(path.file_name()?)
    }

    pub fn class(&self) -> Option<ExtensionClass> {
        if self.extension.is_empty() {
            return None;
        }
        ExtensionClass::of(&self.extension)
    }
}

/// Directory names that are never descended into, at any depth.
///
/// Matching is exact and case-sensitive against the entry's own name; these
/// are not paths or globs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    names: HashSet<String>,
}

impl ExcludeSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn defaults() -> Self {
        Self::new(DEFAULT_EXCLUDE_FOLDERS.iter().copied())
    }

    pub fn contains(&self, name: &OsStr) -> bool {
        name.to_str()
            .map(|n| self.names.contains(n))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A file found during the walk whose base name matches the query and whose
/// extension is one of the targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    pub path: PathBuf,
    /// The normalized target extension this file matched.
    pub extension: String,
}
