use super::*;
use filters::ExcludeSet;
use std::fs;
use std::path::{Path, PathBuf};

fn collect_relative_paths(walker: FileWalker) -> Vec<PathBuf> {
    walker
        .map(|entry| entry.expect("walker entry").relative_path().to_path_buf())
        .collect()
}

fn paths(list: &[&str]) -> Vec<PathBuf> {
    list.iter().map(PathBuf::from).collect()
}

#[test]
fn walk_errors_when_root_missing() {
    let builder = WalkBuilder::new("/nonexistent/path/for/walker");
    let error = match builder.build() {
        Ok(_) => panic!("missing root should fail"),
        Err(error) => error,
    };
    assert_eq!(error.kind(), WalkErrorKind::Root);
    assert_eq!(error.path(), Path::new("/nonexistent/path/for/walker"));
}

#[test]
fn walk_errors_when_root_is_a_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("file.txt");
    fs::write(&file, b"contents").expect("write");

    let error = match WalkBuilder::new(&file).build() {
        Ok(_) => panic!("file root should fail"),
        Err(error) => error,
    };
    assert_eq!(error.kind(), WalkErrorKind::Root);
    assert_eq!(error.path(), file.as_path());
}

#[test]
fn walk_empty_root_yields_nothing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let walker = WalkBuilder::new(temp.path()).build().expect("build walker");
    assert!(collect_relative_paths(walker).is_empty());
}

#[test]
fn walk_yields_files_before_subdirectories() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::create_dir_all(root.join("a/deep")).expect("dir a");
    fs::create_dir(root.join("b")).expect("dir b");
    fs::write(root.join("a/inner.txt"), b"data").expect("write inner");
    fs::write(root.join("a/deep/leaf.txt"), b"data").expect("write leaf");
    fs::write(root.join("a/zz.txt"), b"data").expect("write zz");
    fs::write(root.join("b/other.txt"), b"data").expect("write other");
    fs::write(root.join("c.txt"), b"data").expect("write c");
    fs::write(root.join("z.txt"), b"data").expect("write z");

    let walker = WalkBuilder::new(root).build().expect("build walker");
    assert_eq!(
        collect_relative_paths(walker),
        paths(&[
            "c.txt",
            "z.txt",
            "a/inner.txt",
            "a/zz.txt",
            "a/deep/leaf.txt",
            "b/other.txt",
        ])
    );
}

#[test]
fn walk_sorts_names_by_bytes() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    for name in ["b.txt", "C.txt", "a.txt", "_x", "10", "9"] {
        fs::write(root.join(name), b"").expect("write");
    }

    let walker = WalkBuilder::new(root).build().expect("build walker");
    assert_eq!(
        collect_relative_paths(walker),
        paths(&["10", "9", "C.txt", "_x", "a.txt", "b.txt"])
    );
}

#[test]
fn walk_non_recursive_reports_root_files_only() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::create_dir(root.join("sub")).expect("sub");
    fs::write(root.join("sub/hidden.txt"), b"data").expect("write nested");
    fs::write(root.join("top.txt"), b"data").expect("write top");

    let walker = WalkBuilder::new(root)
        .recursive(false)
        .build()
        .expect("build walker");
    assert_eq!(collect_relative_paths(walker), paths(&["top.txt"]));
}

#[test]
fn walk_prunes_excluded_directories_and_files() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::create_dir_all(root.join(".git/objects")).expect("git dir");
    fs::create_dir_all(root.join("src/.cache")).expect("cache dir");
    fs::write(root.join(".git/HEAD"), b"ref").expect("write head");
    fs::write(root.join(".git/objects/ab"), b"obj").expect("write obj");
    fs::write(root.join("src/.cache/blob"), b"blob").expect("write blob");
    fs::write(root.join("src/main.rs"), b"fn main() {}").expect("write main");
    fs::write(root.join("src/main.rs.tmp"), b"").expect("write tmp");
    fs::write(root.join(".env"), b"").expect("write env");

    let excludes = ExcludeSet::new([".*", "*.tmp"]).expect("excludes");
    let walker = WalkBuilder::new(root)
        .excludes(excludes)
        .build()
        .expect("build walker");
    assert_eq!(collect_relative_paths(walker), paths(&["src/main.rs"]));
}

#[test]
fn walk_entry_reports_size_and_paths() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::create_dir(root.join("nested")).expect("nested");
    fs::write(root.join("nested/file.txt"), b"hello").expect("write");

    let mut walker = WalkBuilder::new(root).build().expect("build walker");
    let entry = walker.next().expect("entry").expect("entry ok");
    assert_eq!(entry.relative_path(), Path::new("nested/file.txt"));
    assert_eq!(entry.full_path(), walker.root().join("nested/file.txt"));
    assert_eq!(entry.file_name(), Some(std::ffi::OsStr::new("file.txt")));
    assert_eq!(entry.size(), 5);
    assert!(entry.modified() > std::time::UNIX_EPOCH);
    assert!(walker.next().is_none());
}

#[test]
fn walk_relative_root_is_absolutized() {
    let walker = WalkBuilder::new(".").recursive(false).build().expect("build walker");
    assert!(walker.root().is_absolute());
}

#[cfg(unix)]
#[test]
fn walk_reports_file_links_but_not_linked_directories_by_default() {
    use std::os::unix::fs::symlink;

    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("root");
    let target = temp.path().join("target");
    fs::create_dir(&root).expect("create root");
    fs::create_dir(&target).expect("create target");
    fs::write(target.join("inner.txt"), b"data").expect("write inner");
    fs::write(root.join("real.txt"), b"data").expect("write real");
    symlink(&target, root.join("dirlink")).expect("dir symlink");
    symlink(root.join("real.txt"), root.join("filelink")).expect("file symlink");

    let walker = WalkBuilder::new(&root).build().expect("build walker");
    let entries: Vec<FileEntry> = walker.map(|entry| entry.expect("entry")).collect();
    let relative: Vec<PathBuf> = entries
        .iter()
        .map(|entry| entry.relative_path().to_path_buf())
        .collect();
    assert_eq!(relative, paths(&["filelink", "real.txt"]));
    assert_eq!(entries[0].size(), 4);
    assert_eq!(entries[0].full_path(), root.join("filelink"));
}

#[cfg(unix)]
#[test]
fn walk_reports_dangling_link_without_following() {
    use std::os::unix::fs::symlink;

    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::write(root.join("a.txt"), b"a").expect("write a");
    symlink(root.join("missing"), root.join("b.lnk")).expect("dangling symlink");

    let items: Vec<_> = WalkBuilder::new(root).build().expect("build walker").collect();
    assert_eq!(items.len(), 2);
    assert_eq!(
        items[0].as_ref().expect("a ok").relative_path(),
        Path::new("a.txt")
    );
    let error = items[1].as_ref().expect_err("dangling link fails");
    assert_eq!(error.kind(), WalkErrorKind::Stat);
    assert!(error.path().ends_with("b.lnk"));
}

#[cfg(unix)]
#[test]
fn walk_follows_symlinks_when_enabled() {
    use std::os::unix::fs::symlink;

    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("root");
    let target = temp.path().join("target");
    fs::create_dir(&root).expect("create root");
    fs::create_dir(&target).expect("create target");
    fs::write(target.join("inner.txt"), b"data").expect("write inner");
    fs::write(temp.path().join("outside.txt"), b"outside").expect("write outside");
    symlink(&target, root.join("dirlink")).expect("dir symlink");
    symlink(temp.path().join("outside.txt"), root.join("filelink")).expect("file symlink");

    let walker = WalkBuilder::new(&root)
        .follow_symlinks(true)
        .build()
        .expect("build walker");
    let entries: Vec<FileEntry> = walker.map(|entry| entry.expect("entry")).collect();
    let relative: Vec<PathBuf> = entries
        .iter()
        .map(|entry| entry.relative_path().to_path_buf())
        .collect();
    assert_eq!(relative, paths(&["filelink", "dirlink/inner.txt"]));
    assert_eq!(entries[0].size(), 7);
    assert_eq!(entries[1].full_path(), root.join("dirlink/inner.txt"));
}

#[cfg(unix)]
#[test]
fn walk_detects_symlink_cycles() {
    use std::os::unix::fs::symlink;

    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("root");
    fs::create_dir_all(root.join("sub")).expect("create root");
    fs::write(root.join("sub/file.txt"), b"data").expect("write");
    symlink(&root, root.join("sub/back")).expect("cycle symlink");

    let walker = WalkBuilder::new(&root)
        .follow_symlinks(true)
        .build()
        .expect("build walker");
    assert_eq!(collect_relative_paths(walker), paths(&["sub/file.txt"]));
}

#[cfg(unix)]
#[test]
fn walk_reports_dangling_symlink_in_order_and_continues() {
    use std::os::unix::fs::symlink;

    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::write(root.join("a.txt"), b"a").expect("write a");
    fs::write(root.join("c.txt"), b"c").expect("write c");
    symlink(root.join("missing"), root.join("b.txt")).expect("dangling symlink");

    let mut walker = WalkBuilder::new(root)
        .follow_symlinks(true)
        .build()
        .expect("build walker");

    let first = walker.next().expect("first").expect("a ok");
    assert_eq!(first.relative_path(), Path::new("a.txt"));

    let error = walker.next().expect("second").expect_err("dangling link fails");
    assert_eq!(error.kind(), WalkErrorKind::Stat);
    assert!(error.path().ends_with("b.txt"));

    let third = walker.next().expect("third").expect("c ok");
    assert_eq!(third.relative_path(), Path::new("c.txt"));
    assert!(walker.next().is_none());
}

#[cfg(unix)]
#[test]
fn walk_stop_on_error_fuses_after_first_error() {
    use std::os::unix::fs::symlink;

    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    symlink(root.join("missing"), root.join("a.txt")).expect("dangling symlink");
    fs::write(root.join("b.txt"), b"b").expect("write b");

    let mut walker = WalkBuilder::new(root)
        .follow_symlinks(true)
        .stop_on_error(true)
        .build()
        .expect("build walker");
    assert!(walker.next().expect("error item").is_err());
    assert!(walker.next().is_none());
}

#[cfg(unix)]
#[test]
fn walk_unreadable_directory_is_reported_and_siblings_continue() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::create_dir(root.join("a_locked")).expect("locked dir");
    fs::write(root.join("a_locked/secret.txt"), b"s").expect("write secret");
    fs::create_dir(root.join("b_open")).expect("open dir");
    fs::write(root.join("b_open/visible.txt"), b"v").expect("write visible");

    let locked = root.join("a_locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");
    if fs::read_dir(&locked).is_ok() {
        // Privileged users bypass directory permissions.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");
        return;
    }

    let items: Vec<_> = WalkBuilder::new(root).build().expect("build walker").collect();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");

    assert_eq!(items.len(), 2);
    let error = items[0].as_ref().expect_err("locked dir fails");
    assert_eq!(error.kind(), WalkErrorKind::Listing);
    assert_eq!(error.path(), locked.as_path());
    let entry = items[1].as_ref().expect("visible ok");
    assert_eq!(entry.relative_path(), Path::new("b_open/visible.txt"));
}

#[cfg(unix)]
#[test]
fn walk_ignores_fifos() {
    use std::process::Command;

    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::write(root.join("regular"), b"r").expect("write");
    let status = Command::new("mkfifo").arg(root.join("pipe")).status();
    if !matches!(status, Ok(status) if status.success()) {
        return;
    }

    let walker = WalkBuilder::new(root).build().expect("build walker");
    assert_eq!(collect_relative_paths(walker), paths(&["regular"]));
}

#[test]
fn walk_skip_file_leaves_out_only_that_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::create_dir_all(root.join("out")).expect("out dir");
    fs::create_dir_all(root.join("other")).expect("other dir");
    fs::write(root.join("out/files.json"), b"[").expect("write output");
    fs::write(root.join("other/files.json"), b"[]").expect("write twin");
    fs::write(root.join("keep.txt"), b"k").expect("write keep");

    // A different spelling of the same location still matches.
    let spelled = root.join("other/../out/files.json");
    let walker = WalkBuilder::new(root)
        .skip_file(spelled)
        .build()
        .expect("build walker");
    assert_eq!(
        collect_relative_paths(walker),
        paths(&["keep.txt", "other/files.json"])
    );
}

#[test]
fn walk_skip_file_that_does_not_exist_is_ignored() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("a.txt"), b"a").expect("write");

    let walker = WalkBuilder::new(temp.path())
        .skip_file(temp.path().join("absent.json"))
        .build()
        .expect("build walker");
    assert_eq!(collect_relative_paths(walker), paths(&["a.txt"]));
}
