use crate::config::SourceConfig;
use crate::scanner::file_filter::FileFilter;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// A matched source file, as discovered during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as produced by the walk, i.e. prefixed by the source root.
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub filename: String,
    /// Filename without its final extension.
    pub base_name: String,
    /// Final extension including the leading dot, or empty.
    pub extension: String,
}

impl SourceFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf) -> Self {
        let filename = source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let base_name = source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let extension = source_path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Self {
            source_path,
            relative_path,
            filename,
            base_name,
            extension,
        }
    }

    pub fn display_path(&self) -> String {
        self.source_path.display().to_string()
    }
}

pub struct SourceScanner {
    filter: FileFilter,
}

impl SourceScanner {
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
        }
    }

    /// Lazily walk `root` top-down, yielding matched files as they are found.
    ///
    /// Unreadable or vanished directories are reported through `tracing` and
    /// skipped; they never end the walk.
    pub fn scan<'a>(&'a self, root: &'a Path) -> impl Iterator<Item = SourceFile> + 'a {
        WalkDir::new(root)
            .follow_links(false)
            .sort_by(directory_order)
            .into_iter()
            .filter_entry(move |entry| self.should_traverse(entry))
            .filter_map(move |entry| match entry {
                Ok(entry) => self.process_entry(&entry, root),
                Err(err) => {
                    if err
                        .io_error()
                        .is_some_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied)
                    {
                        warn!("Permission denied while scanning: {}", err);
                    } else {
                        warn!("Scan error: {}", err);
                    }
                    None
                }
            })
    }

    pub fn scan_all(&self, root: &Path) -> Vec<SourceFile> {
        self.scan(root).collect()
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        // The root is always walked, even if it is itself called deps.
        if entry.depth() == 0 {
            return true;
        }

        if entry.file_type().is_dir() {
            let keep = self.filter.should_traverse_directory(entry.path());
            if !keep {
                debug!("Skipping directory {}", entry.path().display());
            }
            return keep;
        }

        true
    }

    fn process_entry(&self, entry: &DirEntry, root: &Path) -> Option<SourceFile> {
        if entry.depth() == 0 || entry.file_type().is_dir() {
            return None;
        }

        // Symlinks are not followed, but a link to a directory is still a
        // directory entry and never a candidate file.
        if entry.file_type().is_symlink() && entry.path().is_dir() {
            return None;
        }

        let path = entry.path();
        if !self.filter.is_source_file(path) {
            return None;
        }

        let relative_path = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(entry.file_name()));

        Some(SourceFile::new(path.to_path_buf(), relative_path))
    }
}

/// Files before subdirectories, each group by name, so every directory's own
/// files are handled before anything nested below it.
fn directory_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}
