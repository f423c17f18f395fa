use quokka_core::model::SOURCE_EXTENSIONS;
use quokka_core::{CounterpartQuery, CounterpartResolver, ExcludeSet, Settings};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn project(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"// test\n").unwrap();
    }
    dir
}

fn sources_for(base_name: &str) -> CounterpartQuery {
    CounterpartQuery::new(base_name, SOURCE_EXTENSIONS.iter().copied())
}

fn no_excludes() -> CounterpartResolver {
    CounterpartResolver::new(ExcludeSet::default())
}

#[test]
fn test_excluded_directory_is_never_searched() {
    let dir = project(&["build/foo.cpp", "src/foo.cpp", "include/foo.h"]);
    let resolver = CounterpartResolver::new(ExcludeSet::new(["build"]));

    let found = resolver.resolve(dir.path(), &sources_for("foo"));
    assert_eq!(found, Some(dir.path().join("src/foo.cpp")));

    let all = resolver.collect_candidates(dir.path(), &sources_for("foo"));
    assert_eq!(all.len(), 1);
}

#[test]
fn test_exclusion_applies_at_any_depth() {
    let dir = project(&["a/b/build/deep.cpp", "a/b/c/deep.cc"]);
    let resolver = CounterpartResolver::new(ExcludeSet::new(["build"]));

    let found = resolver.resolve(dir.path(), &sources_for("deep"));
    assert_eq!(found, Some(dir.path().join("a/b/c/deep.cc")));
}

#[test]
fn test_exclusion_is_exact_name() {
    let dir = project(&["builds/foo.cpp", "Build/foo.c"]);
    let resolver = CounterpartResolver::new(ExcludeSet::new(["build"]));

    let found = resolver.resolve(dir.path(), &sources_for("foo"));
    assert_eq!(found, Some(dir.path().join("builds/foo.cpp")));
}

#[test]
fn test_root_is_walked_even_if_its_name_is_excluded() {
    let dir = project(&["build/src/foo.cpp"]);
    let root = dir.path().join("build");
    let resolver = CounterpartResolver::new(ExcludeSet::new(["build"]));

    let found = resolver.resolve(&root, &sources_for("foo"));
    assert_eq!(found, Some(root.join("src/foo.cpp")));
}

#[test]
fn test_priority_beats_discovery_order() {
    let dir = project(&["src/foo.c", "lib/foo.cpp", "aaa/foo.cc"]);

    let found = no_excludes().resolve(dir.path(), &sources_for("foo"));
    assert_eq!(found, Some(dir.path().join("lib/foo.cpp")));
}

#[test]
fn test_lower_priority_used_when_higher_missing() {
    let dir = project(&["src/foo.cc", "src/foo.c"]);

    let found = no_excludes().resolve(dir.path(), &sources_for("foo"));
    assert_eq!(found, Some(dir.path().join("src/foo.c")));
}

#[test]
fn test_extension_match_ignores_case() {
    let dir = project(&["src/Foo.CPP"]);

    let found = no_excludes().resolve(dir.path(), &sources_for("Foo"));
    assert_eq!(found, Some(dir.path().join("src/Foo.CPP")));
}

#[test]
fn test_base_name_match_respects_case() {
    let dir = project(&["src/foo.cpp"]);

    let found = no_excludes().resolve(dir.path(), &sources_for("Foo"));
    assert_eq!(found, None);
}

#[test]
fn test_not_found_is_a_plain_none() {
    let dir = project(&["src/bar.cpp", "include/bar.h", "notes.txt"]);

    let found = no_excludes().resolve(dir.path(), &sources_for("foo"));
    assert!(found.is_none());
}

#[test]
fn test_missing_root_is_not_found() {
    let dir = TempDir::new().unwrap();
    let found = no_excludes().resolve(&dir.path().join("gone"), &sources_for("foo"));
    assert!(found.is_none());
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_does_not_stop_the_walk() {
    use std::os::unix::fs::PermissionsExt;

    let dir = project(&["locked/inner/foo.cpp", "open/foo.cpp"]);
    let locked = dir.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let still_readable = fs::read_dir(&locked).is_ok();
    let found = no_excludes().resolve(dir.path(), &sources_for("foo"));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if still_readable {
        eprintln!("skipping: permissions are not enforced for this user");
        return;
    }
    assert_eq!(found, Some(dir.path().join("open/foo.cpp")));
}

#[cfg(unix)]
#[test]
fn test_dangling_link_does_not_stop_the_walk() {
    let dir = project(&["b/foo.cpp"]);
    std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("a")).unwrap();

    let resolver = no_excludes().follow_symlinks(true);
    assert_eq!(
        resolver.resolve(dir.path(), &sources_for("foo")),
        Some(dir.path().join("b/foo.cpp"))
    );
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_does_not_hide_other_matches() {
    let dir = project(&["src/nested/loop.h", "lib/loop.cpp"]);
    std::os::unix::fs::symlink(dir.path().join("src"), dir.path().join("src/nested/up")).unwrap();

    let resolver = no_excludes().follow_symlinks(true);
    assert_eq!(
        resolver.resolve(dir.path(), &sources_for("loop")),
        Some(dir.path().join("lib/loop.cpp"))
    );
}

#[test]
fn test_header_to_source_end_to_end() {
    let dir = project(&["include/module.h", "src/module.cpp", "test/module_test.cpp"]);
    let header = dir.path().join("include/module.h");

    let query = CounterpartQuery::for_file(&header).unwrap();
    let found = no_excludes().resolve(dir.path(), &query);
    assert_eq!(found, Some(dir.path().join("src/module.cpp")));
}

#[test]
fn test_source_to_header_prefers_h() {
    let dir = project(&["src/widget.cpp", "include/widget.hpp", "legacy/widget.h"]);
    let source = dir.path().join("src/widget.cpp");

    let query = CounterpartQuery::for_file(&source).unwrap();
    let found = no_excludes().resolve(dir.path(), &query);
    assert_eq!(found, Some(dir.path().join("legacy/widget.h")));
}

#[test]
fn test_default_settings_skip_build_output() {
    let dir = project(&["Debug/app.cpp", "node_modules/x/app.cpp", "src/app.c"]);
    let resolver = CounterpartResolver::from_settings(&Settings::default());

    let found = resolver.resolve(dir.path(), &sources_for("app"));
    assert_eq!(found, Some(dir.path().join("src/app.c")));
}

#[test]
fn test_same_class_file_is_not_its_own_counterpart() {
    let dir = project(&["include/solo.h"]);
    let header = dir.path().join("include/solo.h");

    let query = CounterpartQuery::for_file(&header).unwrap();
    assert!(no_excludes().resolve(dir.path(), &query).is_none());
}

#[test]
fn test_resolver_leaves_tree_untouched() {
    let dir = project(&["src/foo.cpp", "include/foo.h"]);
    let before = listing(dir.path());

    no_excludes().resolve(dir.path(), &sources_for("foo"));

    assert_eq!(listing(dir.path()), before);
}

fn listing(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .collect();
    paths.sort();
    paths
}

#[cfg(unix)]
#[test]
fn test_symlinks_followed_only_when_enabled() {
    let dir = project(&["real/linked.cpp"]);
    let outside = TempDir::new().unwrap();
    fs::write(outside.path().join("linked.cpp"), b"").unwrap();
    std::os::unix::fs::symlink(outside.path(), dir.path().join("alias")).unwrap();
    fs::remove_file(dir.path().join("real/linked.cpp")).unwrap();

    assert!(no_excludes().resolve(dir.path(), &sources_for("linked")).is_none());

    let following = no_excludes().follow_symlinks(true);
    assert_eq!(
        following.resolve(dir.path(), &sources_for("linked")),
        Some(dir.path().join("alias/linked.cpp"))
    );
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_terminates() {
    let dir = project(&["src/loop.h"]);
    std::os::unix::fs::symlink(dir.path(), dir.path().join("src/back")).unwrap();

    let resolver = no_excludes().follow_symlinks(true);
    assert!(resolver.resolve(dir.path(), &sources_for("loop")).is_none());
}
