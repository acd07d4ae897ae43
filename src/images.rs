//! Image-ID mapping loaded from the upload manifest CSV.
//!
//! Steam guide images are uploaded separately from the text; the uploader
//! records each file's opaque image ID in a `*_steam_guide_images.csv`
//! manifest with `title` and `id` columns. The converter resolves `<img>`
//! sources and bare table-cell filenames against this map.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Filename suffix the uploader gives its manifest.
pub const MANIFEST_SUFFIX: &str = "_steam_guide_images.csv";

#[derive(Debug, Deserialize)]
struct ManifestRow {
    title: String,
    id: String,
}

/// Read-only mapping from image filename to uploaded image ID.
///
/// Built once per run, before any document conversion begins. A lookup miss
/// is an expected outcome: the converter falls back to a raw `[img]` embed
/// and the post-processor leaves unmatched cell text unchanged.
#[derive(Debug, Clone, Default)]
pub struct ImageMap {
    entries: HashMap<String, String>,
}

impl ImageMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a filename → image-ID entry.
    pub fn insert(&mut self, title: impl Into<String>, id: impl Into<String>) {
        self.entries.insert(title.into(), id.into());
    }

    /// Look up the image ID for a filename.
    ///
    /// Keys are raw filenames; callers percent-decode before looking up.
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.entries.get(filename).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a manifest CSV with `title` and `id` columns.
    ///
    /// Rows with an empty title are skipped; a repeated title keeps the
    /// last row's ID.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(File::open(path)?);

        let headers = reader.headers()?.clone();
        for required in ["title", "id"] {
            if !headers.iter().any(|h| h == required) {
                return Err(Error::InvalidManifest(format!(
                    "{} is missing a '{required}' column",
                    path.display()
                )));
            }
        }

        let mut map = Self::new();
        for row in reader.deserialize() {
            let row: ManifestRow = row?;
            if row.title.is_empty() {
                continue;
            }
            map.entries.insert(row.title, row.id);
        }
        Ok(map)
    }

    /// Find and load the first manifest in `dir`.
    ///
    /// Returns `Ok(None)` when no `*_steam_guide_images.csv` file exists;
    /// conversion then proceeds with an empty map and every lookup falls
    /// back. Candidates are sorted so discovery is deterministic.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.ends_with(MANIFEST_SUFFIX))
            })
            .collect();
        candidates.sort();

        match candidates.first() {
            Some(path) => Ok(Some(Self::from_csv_path(path)?)),
            None => Ok(None),
        }
    }
}
