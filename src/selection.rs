//! Bulk and single-row rotation changes.
//!
//! The controller sits between the presentation layer's "Check All" /
//! "Uncheck All" menu (and per-row checkboxes) and the rotation store. It
//! batches bulk writes into a single flush and signals the consumer
//! afterwards so visible checkmarks can refresh. It never alters catalog
//! membership or order.

use crate::catalog::registry::AssetRegistry;
use crate::error::CatalogError;
use crate::notify::{Refresh, RefreshSink};
use crate::rotation::{PersistenceBackend, RotationStore};

pub struct SelectionController<S: RefreshSink> {
    sink: S,
}

impl<S: RefreshSink> SelectionController<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Set the rotation flag on every asset known to the registry.
    ///
    /// Covers the whole registry, not just the rows currently visible.
    /// All writes go through one batched flush; on success the consumer
    /// gets a full refresh.
    pub fn set_all_videos<B: PersistenceBackend>(
        &self,
        registry: &AssetRegistry,
        rotation: &RotationStore<B>,
        in_rotation: bool,
    ) -> Result<(), CatalogError> {
        rotation.set_all(
            registry.videos().iter().map(|video| video.id.clone()),
            in_rotation,
        )?;
        self.sink.refresh(Refresh::Full);
        Ok(())
    }

    /// Toggle one asset, durably, and refresh just its row.
    pub fn set_video<B: PersistenceBackend>(
        &self,
        rotation: &RotationStore<B>,
        video_id: &str,
        in_rotation: bool,
    ) -> Result<(), CatalogError> {
        rotation.set(video_id, in_rotation, true)?;
        self.sink.refresh(Refresh::Row {
            video_id: video_id.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::registry::ScanConfig;
    use crate::notify::test_support::RecordingSink;
    use crate::rotation::MemoryBackend;
    use crate::scanner::{ListingEntry, StaticListing};
    use std::path::PathBuf;

    fn registry(count: usize) -> AssetRegistry {
        let entries = (0..count)
            .map(|i| ListingEntry {
                path: PathBuf::from(format!("/clips/clip_{i:03}.mov")),
                extension: "mov".to_string(),
                location: None,
                time_of_day: None,
            })
            .collect();
        AssetRegistry::load(&StaticListing::new(entries), &ScanConfig::default()).unwrap()
    }

    #[test]
    fn check_all_sets_every_flag_with_one_flush() {
        let registry = registry(100);
        let backend = MemoryBackend::new();
        let rotation = RotationStore::new(backend.clone(), false);
        let controller = SelectionController::new(RecordingSink::new());

        controller
            .set_all_videos(&registry, &rotation, true)
            .unwrap();

        for video in registry.videos() {
            assert!(rotation.get(&video.id).unwrap());
        }
        assert_eq!(backend.flush_count(), 1);
    }

    #[test]
    fn uncheck_all_covers_the_whole_registry() {
        let registry = registry(5);
        let rotation = RotationStore::new(MemoryBackend::new(), true);
        let controller = SelectionController::new(RecordingSink::new());

        controller
            .set_all_videos(&registry, &rotation, false)
            .unwrap();

        for video in registry.videos() {
            assert!(!rotation.get(&video.id).unwrap());
        }
    }

    #[test]
    fn bulk_change_signals_a_full_refresh() {
        let registry = registry(3);
        let rotation = RotationStore::new(MemoryBackend::new(), true);
        let controller = SelectionController::new(RecordingSink::new());

        controller
            .set_all_videos(&registry, &rotation, false)
            .unwrap();

        assert_eq!(controller.sink.received(), vec![Refresh::Full]);
    }

    #[test]
    fn single_toggle_is_durable_and_signals_its_row() {
        let registry = registry(3);
        let backend = MemoryBackend::new();
        let rotation = RotationStore::new(backend.clone(), true);
        let controller = SelectionController::new(RecordingSink::new());

        let id = registry.videos()[1].id.clone();
        controller.set_video(&rotation, &id, false).unwrap();

        assert_eq!(backend.durable(&id), Some(false));
        assert_eq!(
            controller.sink.received(),
            vec![Refresh::Row {
                video_id: id.clone()
            }]
        );
    }

    #[test]
    fn failed_flush_surfaces_and_preserves_staged_intent() {
        let registry = registry(4);
        let backend = MemoryBackend::new();
        let rotation = RotationStore::new(backend.clone(), true);
        let controller = SelectionController::new(RecordingSink::new());

        backend.fail_next_flush();
        let err = controller.set_all_videos(&registry, &rotation, false);
        assert!(err.is_err());

        // The attempted values still read back, ready for a retry.
        for video in registry.videos() {
            assert!(!rotation.get(&video.id).unwrap());
        }
        rotation.flush().unwrap();
        assert_eq!(backend.durable(&registry.videos()[0].id), Some(false));
    }
}
