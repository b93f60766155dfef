//! Directory listing source.
//!
//! The registry is populated from an ordered listing of `(path, extension)`
//! entries supplied by a collaborator. `DirectoryScanner` is the filesystem
//! implementation; `StaticListing` serves fixed entries for tests and
//! previews.

use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::error::ScanError;

/// One entry produced by a listing source.
///
/// `location` and `time_of_day` are optional hints; the registry applies its
/// configured defaults when they are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub path: PathBuf,
    /// Lowercased file extension.
    pub extension: String,
    pub location: Option<String>,
    pub time_of_day: Option<String>,
}

/// An ordered source of catalog entries.
pub trait ListingSource {
    /// List all entries, in a fixed, reproducible order.
    fn list_entries(&self) -> Result<Vec<ListingEntry>, ScanError>;
}

/// Recursively scans a root directory for video files.
///
/// Entries are yielded sorted by file name at every level, so discovery
/// order is reproducible across runs on the same tree. Layout conventions:
/// a parent directory literally named `day` or `night` (any case) classifies
/// its files, with the directory above it naming the location; any other
/// parent directory names the location directly. Files sitting in the root
/// itself carry no hints.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    root: PathBuf,
}

impl DirectoryScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Derive (location, time_of_day) hints from an entry's parent directories.
    fn classify(&self, path: &Path) -> (Option<String>, Option<String>) {
        let Some(parent) = path.parent().filter(|p| *p != self.root) else {
            return (None, None);
        };
        let name = match parent.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => return (None, None),
        };

        if name.eq_ignore_ascii_case("day") || name.eq_ignore_ascii_case("night") {
            let location = parent
                .parent()
                .filter(|p| *p != self.root)
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string());
            (location, Some(name.to_lowercase()))
        } else {
            (Some(name), None)
        }
    }
}

impl ListingSource for DirectoryScanner {
    fn list_entries(&self) -> Result<Vec<ListingEntry>, ScanError> {
        // Probe the root up front so an unreadable root is an error rather
        // than an empty listing.
        std::fs::read_dir(&self.root).map_err(|source| ScanError::Unreadable {
            path: self.root.clone(),
            source,
        })?;

        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(extension) = path.extension() else {
                continue;
            };
            let extension = extension.to_string_lossy().to_lowercase();
            let (location, time_of_day) = self.classify(path);

            entries.push(ListingEntry {
                path: path.to_path_buf(),
                extension,
                location,
                time_of_day,
            });
        }

        debug!(
            "scanned {}: {} entries",
            self.root.display(),
            entries.len()
        );
        Ok(entries)
    }
}

/// A fixed, in-memory listing. Never fails.
#[derive(Debug, Clone, Default)]
pub struct StaticListing {
    entries: Vec<ListingEntry>,
}

impl StaticListing {
    pub fn new(entries: Vec<ListingEntry>) -> Self {
        Self { entries }
    }
}

impl ListingSource for StaticListing {
    fn list_entries(&self) -> Result<Vec<ListingEntry>, ScanError> {
        Ok(self.entries.clone())
    }
}
