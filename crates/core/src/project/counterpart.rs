//! Header/source counterpart lookup.
//!
//! The search walks the whole project tree, collects every file whose base
//! name matches and whose extension is one of the targets, and only then
//! picks a winner by extension priority. A stray `foo.c` seen early in the
//! walk must not beat a `foo.cpp` seen later.
//!
//! Within one extension the first file in directory-listing order wins. That
//! order comes from the filesystem and is not sorted, so it can differ between
//! platforms when the same name exists in several directories.

use crate::config::Settings;
use crate::model::{ExcludeSet, ExtensionClass, FileIdentity, MatchCandidate, normalize_extension};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What to look for: a base name and the counterpart extensions in priority
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterpartQuery {
    pub base_name: String,
    pub target_extensions: Vec<String>,
}

impl CounterpartQuery {
    pub fn new<I, S>(base_name: impl Into<String>, target_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            base_name: base_name.into(),
            target_extensions: target_extensions
                .into_iter()
                .map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
        }
    }

    /// Query for the counterpart of `file`, or `None` when its extension is
    /// neither a header nor a source extension.
    pub fn for_file(file: &Path) -> Option<Self> {
        let identity = FileIdentity::from_path(file)?;
        let class = identity.class()?;
        Some(Self::new(
            identity.base_name,
            class.counterpart().extensions().iter().copied(),
        ))
    }

    pub fn target_class(&self) -> Option<ExtensionClass> {
        self.target_extensions
            .first()
            .and_then(|ext| ExtensionClass::of(ext))
    }
}

pub struct CounterpartResolver {
    exclude: ExcludeSet,
    follow_symlinks: bool,
}

impl CounterpartResolver {
    pub fn new(exclude: ExcludeSet) -> Self {
        Self {
            exclude,
            follow_symlinks: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.exclude_set()).follow_symlinks(settings.follow_symlinks)
    }

    /// Symlinks are skipped unless enabled. When following them, walkdir's
    /// loop detection reports cycles as errors, which the walk skips.
    pub fn follow_symlinks(mut self, yes: bool) -> Self {
        self.follow_symlinks = yes;
        self
    }

    /// Returns the best counterpart under `root`, or `None` when the project
    /// has none. Unreadable directories count as empty.
    pub fn resolve(&self, root: &Path, query: &CounterpartQuery) -> Option<PathBuf> {
        let candidates = self.collect_candidates(root, query);
        let winner = select_by_priority(&candidates, &query.target_extensions);
        tracing::debug!(
            root = %root.display(),
            base_name = %query.base_name,
            candidates = candidates.len(),
            found = winner.is_some(),
            "Counterpart search finished"
        );
        winner
    }

    /// Every matching file under `root`, in discovery order.
    pub fn collect_candidates(&self, root: &Path, query: &CounterpartQuery) -> Vec<MatchCandidate> {
        let mut candidates = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(self.follow_symlinks)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !(entry.file_type().is_dir() && self.exclude.contains(entry.file_name()))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(identity) = FileIdentity::from_file_name(entry.file_name()) else {
                continue;
            };
            if identity.base_name != query.base_name {
                continue;
            }
            if query.target_extensions.contains(&identity.extension) {
                candidates.push(MatchCandidate {
                    path: entry.into_path(),
                    extension: identity.extension,
                });
            }
        }

        candidates
    }
}

fn select_by_priority(candidates: &[MatchCandidate], priority: &[String]) -> Option<PathBuf> {
    priority.iter().find_map(|ext| {
        candidates
            .iter()
            .find(|c| &c.extension == ext)
            .map(|c| c.path.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(path: &str, ext: &str) -> MatchCandidate {
        MatchCandidate {
            path: PathBuf::from(path),
            extension: ext.to_string(),
        }
    }

    #[test]
    fn selection_follows_priority_not_discovery() {
        let found = vec![
            candidate("a/foo.cc", ".cc"),
            candidate("b/foo.c", ".c"),
            candidate("c/foo.cpp", ".cpp"),
            candidate("d/foo.cpp", ".cpp"),
        ];
        let priority = vec![".cpp".to_string(), ".c".to_string(), ".cc".to_string()];
        assert_eq!(
            select_by_priority(&found, &priority),
            Some(PathBuf::from("c/foo.cpp"))
        );
    }

    #[test]
    fn selection_of_nothing_is_none() {
        assert_eq!(select_by_priority(&[], &[".h".to_string()]), None);
    }

    #[test]
    fn query_for_header_targets_sources() {
        let query = CounterpartQuery::for_file(Path::new("include/module.H")).unwrap();
        assert_eq!(query.base_name, "module");
        assert_eq!(query.target_extensions, vec![".cpp", ".c", ".cc"]);
        assert_eq!(query.target_class(), Some(ExtensionClass::Source));
    }

    #[test]
    fn query_for_source_targets_headers() {
        let query = CounterpartQuery::for_file(Path::new("src/module.cc")).unwrap();
        assert_eq!(query.target_extensions, vec![".h", ".hpp"]);
    }

    #[test]
    fn query_rejects_other_files() {
        assert!(CounterpartQuery::for_file(Path::new("README.md")).is_none());
        assert!(CounterpartQuery::for_file(Path::new("Makefile")).is_none());
    }

    #[test]
    fn query_normalizes_extensions() {
        let query = CounterpartQuery::new("foo", ["CPP", ".Hpp"]);
        assert_eq!(query.target_extensions, vec![".cpp", ".hpp"]);
    }
}
