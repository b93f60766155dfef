//! Catalog assembly and publication.
//!
//! A `Catalog` is one immutable load: the registry plus the grouping index
//! built from it. `CatalogHandle` holds the currently published catalog and
//! swaps it atomically after a successful reload, so the presentation layer
//! only ever observes complete snapshots — never a partially built index.

pub mod grouping;
pub mod registry;
pub mod video;

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::info;

use crate::catalog::grouping::GroupingIndex;
use crate::catalog::registry::{AssetRegistry, ScanConfig};
use crate::error::CatalogError;
use crate::notify::{Refresh, RefreshSink};
use crate::scanner::ListingSource;

/// One complete, immutable catalog load.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    registry: AssetRegistry,
    grouping: GroupingIndex,
}

impl Catalog {
    /// Load the registry from a source and build the grouping index.
    ///
    /// All-or-nothing: any failure leaves no partial catalog behind.
    pub fn load(source: &dyn ListingSource, config: &ScanConfig) -> Result<Self, CatalogError> {
        let registry = AssetRegistry::load(source, config)?;
        let grouping = GroupingIndex::build(&registry);
        info!(
            "catalog loaded: {} videos across {} locations",
            registry.len(),
            grouping.cities().len()
        );
        Ok(Self { registry, grouping })
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    pub fn grouping(&self) -> &GroupingIndex {
        &self.grouping
    }
}

/// Holder of the currently published catalog snapshot.
///
/// Reload builds the new catalog to the side and publishes it with a single
/// reference swap; a failed reload returns the error and leaves the previous
/// snapshot published, so consumers keep showing the last good catalog.
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently published snapshot, if any load has succeeded yet.
    pub fn current(&self) -> Option<Arc<Catalog>> {
        self.read().clone()
    }

    /// Load from the source and publish on success, signalling a full
    /// refresh. On failure the previously published snapshot stays current.
    pub fn reload(
        &self,
        source: &dyn ListingSource,
        config: &ScanConfig,
        sink: &dyn RefreshSink,
    ) -> Result<Arc<Catalog>, CatalogError> {
        let catalog = Arc::new(Catalog::load(source, config)?);
        *self.write() = Some(Arc::clone(&catalog));
        sink.refresh(Refresh::Full);
        Ok(catalog)
    }

    // Lock poisoning would only mean a reader panicked while holding the
    // guard; the stored Arc is still intact, so recover it.
    fn read(&self) -> RwLockReadGuard<'_, Option<Arc<Catalog>>> {
        self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Arc<Catalog>>> {
        self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::notify::test_support::RecordingSink;
    use crate::notify::NullSink;
    use crate::scanner::{ListingEntry, StaticListing};
    use std::path::PathBuf;

    struct FailingListing;

    impl ListingSource for FailingListing {
        fn list_entries(&self) -> Result<Vec<ListingEntry>, ScanError> {
            Err(ScanError::Unreadable {
                path: PathBuf::from("/gone"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "unplugged"),
            })
        }
    }

    fn listing() -> StaticListing {
        StaticListing::new(vec![
            ListingEntry {
                path: PathBuf::from("/ny/day/bridge.mov"),
                extension: "mov".to_string(),
                location: Some("NY".to_string()),
                time_of_day: Some("day".to_string()),
            },
            ListingEntry {
                path: PathBuf::from("/ny/night/skyline.mov"),
                extension: "mov".to_string(),
                location: Some("NY".to_string()),
                time_of_day: Some("night".to_string()),
            },
        ])
    }

    #[test]
    fn load_builds_registry_and_grouping_together() {
        let catalog = Catalog::load(&listing(), &ScanConfig::default()).unwrap();
        assert_eq!(catalog.registry().len(), 2);
        assert_eq!(catalog.grouping().total_len(), 2);
        assert!(catalog.grouping().city("NY").is_some());
    }

    #[test]
    fn reload_publishes_and_signals_full_refresh() {
        let handle = CatalogHandle::new();
        let sink = RecordingSink::new();
        assert!(handle.current().is_none());

        let published = handle
            .reload(&listing(), &ScanConfig::default(), &sink)
            .unwrap();

        assert_eq!(sink.received(), vec![Refresh::Full]);
        let current = handle.current().unwrap();
        assert_eq!(current.registry().len(), published.registry().len());
    }

    #[test]
    fn failed_reload_keeps_the_previous_catalog() {
        let handle = CatalogHandle::new();
        handle
            .reload(&listing(), &ScanConfig::default(), &NullSink)
            .unwrap();

        let sink = RecordingSink::new();
        let result = handle.reload(&FailingListing, &ScanConfig::default(), &sink);

        assert!(matches!(result, Err(CatalogError::Scan(_))));
        // No refresh signal, and the last good snapshot is still current.
        assert!(sink.received().is_empty());
        assert_eq!(handle.current().unwrap().registry().len(), 2);
    }

    #[test]
    fn failed_first_load_publishes_nothing() {
        let handle = CatalogHandle::new();
        let result = handle.reload(&FailingListing, &ScanConfig::default(), &NullSink);
        assert!(result.is_err());
        assert!(handle.current().is_none());
    }
}
