//! The flat set of known video assets.
//!
//! The registry is populated once per catalog load from a listing source and
//! is read-only afterwards. Its iteration order — the order entries were
//! discovered — is the order every downstream consumer sees: the grouping
//! index appends buckets in it and the flat projection displays rows in it.

use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};

use crate::catalog::video::{AerialVideo, TimeOfDay};
use crate::error::CatalogError;
use crate::scanner::ListingSource;

/// Scan-time configuration.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Accepted content types, lowercased extensions. Entries with any other
    /// extension are silently excluded.
    pub accepted_extensions: Vec<String>,
    /// Classification applied when the listing source supplies none.
    pub default_time_of_day: TimeOfDay,
    /// Location name applied when the listing source supplies none.
    pub default_location: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            accepted_extensions: vec!["mov".to_string()],
            default_time_of_day: TimeOfDay::Day,
            default_location: "Unknown".to_string(),
        }
    }
}

/// The flat, ordered set of assets known to the current catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetRegistry {
    videos: Vec<AerialVideo>,
}

impl AssetRegistry {
    /// Load the registry from a listing source.
    ///
    /// Entries are filtered to the accepted extensions, the display name is
    /// the file stem, and the identity is the normalized source path. An
    /// identity collision rejects the later entry with
    /// [`CatalogError::DuplicateAsset`]; a listing failure surfaces as a
    /// [`ScanError`](crate::error::ScanError) and leaves no partial registry.
    pub fn load(source: &dyn ListingSource, config: &ScanConfig) -> Result<Self, CatalogError> {
        let entries = source.list_entries()?;
        let total = entries.len();

        let mut videos: Vec<AerialVideo> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for entry in entries {
            if !config
                .accepted_extensions
                .iter()
                .any(|ext| *ext == entry.extension)
            {
                continue;
            }

            let id = normalize_path(&entry.path);
            let name = display_name(&entry.path);

            if let Some(&existing) = seen.get(&id) {
                warn!("duplicate asset identity {id:?}, rejecting {name:?}");
                return Err(CatalogError::DuplicateAsset {
                    id,
                    existing: videos[existing].name.clone(),
                    rejected: name,
                });
            }

            let time_of_day = entry
                .time_of_day
                .as_deref()
                .map(TimeOfDay::parse)
                .unwrap_or(config.default_time_of_day);
            let location = entry
                .location
                .clone()
                .unwrap_or_else(|| config.default_location.clone());

            seen.insert(id.clone(), videos.len());
            videos.push(AerialVideo {
                id,
                name,
                kind: entry.extension,
                time_of_day,
                location,
                url: entry.path.to_string_lossy().to_string(),
            });
        }

        info!("registry loaded: {} of {} entries accepted", videos.len(), total);
        Ok(Self { videos })
    }

    /// All assets, in discovery order.
    pub fn videos(&self) -> &[AerialVideo] {
        &self.videos
    }

    pub fn get(&self, index: usize) -> Option<&AerialVideo> {
        self.videos.get(index)
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

/// Stable identity for an asset: its path with separators normalized to `/`.
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Display name: file name with path and extension stripped.
fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{ListingEntry, StaticListing};
    use std::path::PathBuf;

    fn entry(path: &str, extension: &str) -> ListingEntry {
        ListingEntry {
            path: PathBuf::from(path),
            extension: extension.to_string(),
            location: None,
            time_of_day: None,
        }
    }

    #[test]
    fn filters_to_accepted_extensions() {
        let listing = StaticListing::new(vec![
            entry("/clips/sunrise.mov", "mov"),
            entry("/clips/readme.txt", "txt"),
            entry("/clips/harbor.mov", "mov"),
        ]);

        let registry = AssetRegistry::load(&listing, &ScanConfig::default()).unwrap();
        let names: Vec<_> = registry.videos().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["sunrise", "harbor"]);
    }

    #[test]
    fn derives_identity_name_and_defaults() {
        let listing = StaticListing::new(vec![entry("/clips/golden_gate.mov", "mov")]);

        let registry = AssetRegistry::load(&listing, &ScanConfig::default()).unwrap();
        let video = &registry.videos()[0];
        assert_eq!(video.id, "/clips/golden_gate.mov");
        assert_eq!(video.name, "golden_gate");
        assert_eq!(video.kind, "mov");
        assert_eq!(video.time_of_day, TimeOfDay::Day);
        assert_eq!(video.location, "Unknown");
        assert_eq!(video.url, "/clips/golden_gate.mov");
    }

    #[test]
    fn listing_hints_override_defaults() {
        let mut e = entry("/clips/NY/night/skyline.mov", "mov");
        e.location = Some("NY".to_string());
        e.time_of_day = Some("NIGHT".to_string());
        let listing = StaticListing::new(vec![e]);

        let registry = AssetRegistry::load(&listing, &ScanConfig::default()).unwrap();
        let video = &registry.videos()[0];
        assert_eq!(video.location, "NY");
        assert_eq!(video.time_of_day, TimeOfDay::Night);
    }

    #[test]
    fn duplicate_identity_is_rejected() {
        let listing = StaticListing::new(vec![
            entry("/clips/dup.mov", "mov"),
            entry("/clips/dup.mov", "mov"),
        ]);

        let err = AssetRegistry::load(&listing, &ScanConfig::default()).unwrap_err();
        match err {
            CatalogError::DuplicateAsset { id, .. } => assert_eq!(id, "/clips/dup.mov"),
            other => panic!("expected DuplicateAsset, got {other:?}"),
        }
    }

    #[test]
    fn discovery_order_is_preserved() {
        let listing = StaticListing::new(vec![
            entry("/z/last.mov", "mov"),
            entry("/a/first.mov", "mov"),
            entry("/m/middle.mov", "mov"),
        ]);

        let registry = AssetRegistry::load(&listing, &ScanConfig::default()).unwrap();
        let names: Vec<_> = registry.videos().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["last", "first", "middle"]);
    }
}
