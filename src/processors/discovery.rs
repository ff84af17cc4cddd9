// resyze/src/processors/discovery.rs
use crate::utils::is_supported_format;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A candidate image found under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    /// Path below the input root, file name included.
    pub relative_path: PathBuf,
}

/// Walks an input tree and yields candidate images by extension.
#[derive(Debug, Clone)]
pub struct Discoverer {
    root: PathBuf,
    recursive: bool,
    excluded: Option<PathBuf>,
}

impl Discoverer {
    pub fn new(root: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            root: root.into(),
            recursive,
            excluded: None,
        }
    }

    /// Never descend into `dir`. Used when the output root lives inside the input tree.
    pub fn excluding(mut self, dir: &Path) -> Self {
        self.excluded = dir.canonicalize().ok();
        self
    }

    /// Each call starts a fresh traversal.
    pub fn iter(&self) -> impl Iterator<Item = DiscoveredFile> + '_ {
        let walker = if self.recursive {
            WalkDir::new(&self.root)
        } else {
            WalkDir::new(&self.root).max_depth(1)
        };

        walker
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !self.is_excluded(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| is_candidate(entry))
            .filter_map(move |entry| self.to_discovered(entry))
    }

    /// Compares names first; only a directory named like the excluded one is canonicalized.
    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let excluded = match &self.excluded {
            Some(excluded) if entry.depth() > 0 && entry.file_type().is_dir() => excluded,
            _ => return false,
        };

        if excluded.file_name() != Some(entry.file_name()) {
            return false;
        }

        entry
            .path()
            .canonicalize()
            .map(|path| &path == excluded)
            .unwrap_or(false)
    }

    fn to_discovered(&self, entry: DirEntry) -> Option<DiscoveredFile> {
        let relative_path = entry.path().strip_prefix(&self.root).ok()?.to_path_buf();
        Some(DiscoveredFile {
            path: entry.into_path(),
            relative_path,
        })
    }
}

/// Regular files and symlinks to regular files, filtered by extension.
fn is_candidate(entry: &DirEntry) -> bool {
    let is_file = entry.file_type().is_file()
        || (entry.path_is_symlink() && entry.path().is_file());
    is_file && is_supported_format(entry.path())
}
