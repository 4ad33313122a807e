//! A filesystem backed store of daily notes
//!
//! The [`NoteStore`] trait is the seam between the repository and the place
//! note files live. [`FsNoteStore`] implements it on top of a vault
//! directory.

use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

/// Reads and writes note files.
///
/// All paths are absolute, i.e. already joined onto [`NoteStore::root`].
pub trait NoteStore {
    /// The root directory of the vault.
    fn root(&self) -> &Path;

    /// Reads the full text of the note at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`io::ErrorKind::NotFound`] if there is no
    /// note at `path`, or any other I/O error raised while reading.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Replaces the note at `path` with `text`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while writing.
    fn write(&self, path: &Path, text: &str) -> io::Result<()>;

    /// Lists every markdown file below `dir`, in a stable order.
    ///
    /// Hidden directories such as `.git` or `.obsidian` are not entered. A
    /// missing `dir` has no files.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while walking the directory tree.
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// A [`NoteStore`] backed by a directory on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsNoteStore {
    root: PathBuf,
}

impl FsNoteStore {
    /// Creates a store rooted at `root`.
    ///
    /// The directory does not need to exist yet; it is created on the first
    /// write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl NoteStore for FsNoteStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, text: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, text)?;
        tracing::info!("Wrote {}", path.display());
        Ok(())
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            // The starting directory itself may be hidden (e.g. a temp dir)
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

        let mut paths = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new("md")) {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    }
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|name| name.starts_with('.'))
}
