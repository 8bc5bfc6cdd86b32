use crate::builder::WalkBuilder;
use crate::entry::FileEntry;
use crate::error::WalkError;
use filters::ExcludeSet;
use logging::trace_walk;
use std::collections::HashSet;
use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Lazy iterator over the files below a root, in files-then-subdirectories
/// order.
///
/// The walker keeps one [`DirectoryState`] per open directory on an explicit
/// stack. The top of the stack first yields its sorted files, then hands out
/// its sorted subdirectories one at a time; each handed-out subdirectory is
/// listed and pushed, so its subtree is exhausted before the next sibling.
pub struct FileWalker {
    root: PathBuf,
    recursive: bool,
    follow_symlinks: bool,
    stop_on_error: bool,
    excludes: ExcludeSet,
    skipped_file: Option<SkippedFile>,
    root_pending: bool,
    stack: Vec<DirectoryState>,
    visited: HashSet<PathBuf>,
    finished: bool,
}

impl FileWalker {
    pub(crate) fn new(builder: WalkBuilder) -> Result<Self, WalkError> {
        let WalkBuilder {
            root,
            recursive,
            follow_symlinks,
            stop_on_error,
            excludes,
            skip_file,
        } = builder;

        let root = absolutize(root)?;
        let metadata = fs::metadata(&root).map_err(|error| WalkError::root(root.clone(), error))?;
        if !metadata.is_dir() {
            return Err(WalkError::root(
                root,
                io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        trace_walk!(root = %root.display(), recursive, follow_symlinks, "starting traversal");

        Ok(Self {
            root,
            recursive,
            follow_symlinks,
            stop_on_error,
            excludes,
            skipped_file: skip_file.and_then(SkippedFile::resolve),
            root_pending: true,
            stack: Vec::new(),
            visited: HashSet::new(),
            finished: false,
        })
    }

    /// Returns the absolute traversal root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists `fs_path` and pushes it onto the stack.
    ///
    /// Returns `Ok(())` without pushing when symlink following is enabled and
    /// the directory was already entered through another path.
    fn enter_directory(
        &mut self,
        fs_path: PathBuf,
        relative_prefix: PathBuf,
    ) -> Result<(), WalkError> {
        if self.follow_symlinks {
            let canonical = fs::canonicalize(&fs_path)
                .map_err(|error| WalkError::listing(fs_path.clone(), error))?;
            if !self.visited.insert(canonical) {
                trace_walk!(path = %fs_path.display(), "skipping already visited directory");
                return Ok(());
            }
        }

        trace_walk!(path = %fs_path.display(), "entering directory");
        let state = DirectoryState::list(
            fs_path,
            relative_prefix,
            &self.excludes,
            self.skipped_file.as_ref(),
            self.follow_symlinks,
            self.recursive,
        )?;
        self.stack.push(state);
        Ok(())
    }

    fn stat_file(&self, full_path: PathBuf, relative_path: PathBuf) -> Result<FileEntry, WalkError> {
        // Links in the file list are reported with their target's metadata.
        let metadata =
            fs::metadata(&full_path).map_err(|error| WalkError::stat(full_path.clone(), error))?;
        let modified = metadata
            .modified()
            .map_err(|error| WalkError::stat(full_path.clone(), error))?;

        Ok(FileEntry {
            full_path,
            relative_path,
            size: metadata.len(),
            modified,
        })
    }

    fn fail(&mut self, error: WalkError) -> Option<Result<FileEntry, WalkError>> {
        if self.stop_on_error {
            self.finished = true;
        }
        Some(Err(error))
    }
}

impl Iterator for FileWalker {
    type Item = Result<FileEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.root_pending {
            self.root_pending = false;
            if let Err(error) = self.enter_directory(self.root.clone(), PathBuf::new()) {
                return self.fail(error);
            }
        }

        loop {
            let state = self.stack.last_mut()?;

            if let Some(error) = state.errors.pop() {
                return self.fail(error);
            }

            if let Some(name) = state.next_file() {
                let full_path = state.fs_path.join(&name);
                let relative_path = state.relative_prefix.join(&name);
                return match self.stat_file(full_path, relative_path) {
                    Ok(entry) => Some(Ok(entry)),
                    Err(error) => self.fail(error),
                };
            }

            if let Some(name) = state.next_subdir() {
                let fs_path = state.fs_path.join(&name);
                let relative_prefix = state.relative_prefix.join(&name);
                if let Err(error) = self.enter_directory(fs_path, relative_prefix) {
                    return self.fail(error);
                }
                continue;
            }

            self.stack.pop();
        }
    }
}

/// One listed directory: its sorted files, sorted subdirectories, and any
/// per-entry failures met while listing it.
#[derive(Debug)]
struct DirectoryState {
    fs_path: PathBuf,
    relative_prefix: PathBuf,
    files: Vec<OsString>,
    file_index: usize,
    subdirs: Vec<OsString>,
    subdir_index: usize,
    /// Stored in reverse so `pop` yields them in discovery order.
    errors: Vec<WalkError>,
}

impl DirectoryState {
    fn list(
        fs_path: PathBuf,
        relative_prefix: PathBuf,
        excludes: &ExcludeSet,
        skipped_file: Option<&SkippedFile>,
        follow_symlinks: bool,
        recursive: bool,
    ) -> Result<Self, WalkError> {
        let read_dir =
            fs::read_dir(&fs_path).map_err(|error| WalkError::listing(fs_path.clone(), error))?;

        let mut files = Vec::new();
        let mut subdirs = Vec::new();
        let mut errors = Vec::new();

        for entry in read_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    errors.push(WalkError::listing(fs_path.clone(), error));
                    continue;
                }
            };
            let name = entry.file_name();
            if let Some(pattern) = excludes.first_match(&name) {
                trace_walk!(path = %entry.path().display(), pattern, "excluded");
                continue;
            }
            if skipped_file.is_some_and(|skipped| skipped.matches(&fs_path, &name)) {
                trace_walk!(path = %entry.path().display(), "skipping scan output");
                continue;
            }

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(error) => {
                    errors.push(WalkError::stat(entry.path(), error));
                    continue;
                }
            };

            if file_type.is_file() {
                files.push(name);
            } else if file_type.is_dir() {
                if recursive {
                    subdirs.push(name);
                }
            } else if file_type.is_symlink() {
                match fs::metadata(entry.path()) {
                    Ok(target) if target.is_dir() => {
                        if !follow_symlinks {
                            trace_walk!(
                                path = %entry.path().display(),
                                "not entering linked directory"
                            );
                        } else if recursive {
                            subdirs.push(name);
                        }
                    }
                    Ok(target) if target.is_file() => files.push(name),
                    Ok(_) => {
                        trace_walk!(path = %entry.path().display(), "ignoring special file");
                    }
                    // Dangling: report it when the file slot is reached so
                    // the error keeps its place in traversal order.
                    Err(_) => files.push(name),
                }
            } else {
                trace_walk!(path = %entry.path().display(), "ignoring special file");
            }
        }

        files.sort();
        subdirs.sort();
        errors.reverse();

        trace_walk!(
            path = %fs_path.display(),
            files = files.len(),
            subdirs = subdirs.len(),
            "listed directory"
        );

        Ok(Self {
            fs_path,
            relative_prefix,
            files,
            file_index: 0,
            subdirs,
            subdir_index: 0,
            errors,
        })
    }

    fn next_file(&mut self) -> Option<OsString> {
        let name = self.files.get(self.file_index)?.clone();
        self.file_index += 1;
        Some(name)
    }

    fn next_subdir(&mut self) -> Option<OsString> {
        let name = self.subdirs.get(self.subdir_index)?.clone();
        self.subdir_index += 1;
        Some(name)
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf, WalkError> {
    if path.is_absolute() {
        Ok(path)
    } else {
        let cwd = env::current_dir().map_err(|error| WalkError::root(path.clone(), error))?;
        Ok(cwd.join(path))
    }
}

/// A single file left out of the walk, identified by its canonical parent
/// directory and its name.
#[derive(Debug)]
struct SkippedFile {
    parent: PathBuf,
    name: OsString,
}

impl SkippedFile {
    fn resolve(path: PathBuf) -> Option<Self> {
        let canonical = fs::canonicalize(path).ok()?;
        Some(Self {
            parent: canonical.parent()?.to_path_buf(),
            name: canonical.file_name()?.to_os_string(),
        })
    }

    /// Canonicalizes `dir` only when the name already matches.
    fn matches(&self, dir: &Path, name: &OsStr) -> bool {
        name == self.name.as_os_str() && fs::canonicalize(dir).is_ok_and(|dir| dir == self.parent)
    }
}
