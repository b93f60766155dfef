//! Catalog and rotation model for collections of aerial screensaver clips.
//!
//! The crate organizes scanned video assets into a browsable catalog grouped
//! by location and time of day, tracks a persistent per-asset "in rotation"
//! flag, and projects the catalog as an ordered tree for a hierarchical list
//! view with live single-selection preview. Playback, UI wiring, and asset
//! fetching belong to collaborators reached through the narrow seams here:
//! [`ListingSource`], [`PersistenceBackend`], [`RefreshSink`], and the
//! opaque URL carried on [`PreviewRequest`].

pub mod catalog;
pub mod error;
pub mod notify;
pub mod projection;
pub mod rotation;
pub mod scanner;
pub mod selection;

pub use catalog::grouping::{BucketEntry, City, GroupingIndex, TimeOfDayBucket};
pub use catalog::registry::{AssetRegistry, ScanConfig};
pub use catalog::video::{AerialVideo, TimeOfDay};
pub use catalog::{Catalog, CatalogHandle};
pub use error::{CatalogError, PersistenceError, ScanError};
pub use notify::{NullSink, Refresh, RefreshSink};
pub use projection::{FlatProjection, GroupedProjection, Node, PreviewRequest, ROW_HEIGHT};
pub use rotation::{
    JsonFileBackend, MemoryBackend, PersistenceBackend, RotationStore, SqliteBackend,
};
pub use scanner::{DirectoryScanner, ListingEntry, ListingSource, StaticListing};
pub use selection::SelectionController;
