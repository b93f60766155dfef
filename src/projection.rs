//! Tree projections: the presentation-ready views of the catalog.
//!
//! Two projections are derived on demand from the same data. The flat
//! projection is what the list view consumes: every asset as a root-level
//! row in discovery order, no group headers. The grouped projection is the
//! richer Location → bucket → asset tree kept available for future
//! consumers. Both resolve each leaf's display label and rotation flag at
//! query time, so a rotation change never requires rebuilding the catalog.

use crate::catalog::grouping::GroupingIndex;
use crate::catalog::registry::AssetRegistry;
use crate::catalog::video::{AerialVideo, TimeOfDay};
use crate::error::PersistenceError;
use crate::rotation::{PersistenceBackend, RotationStore};

/// Fixed height of every row, in points. No row is taller or expandable in
/// the flat view.
pub const ROW_HEIGHT: f32 = 18.0;

/// A presentable tree node.
///
/// Every consumer matches exhaustively, so adding a node kind forces every
/// projection, selection, and rendering path to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A leaf row for one asset, with its label and rotation flag resolved.
    Video {
        /// Index into the registry, stable for the lifetime of a published
        /// catalog snapshot.
        index: usize,
        id: String,
        label: String,
        in_rotation: bool,
    },
    /// A non-leaf header: a city, or one of its day/night buckets.
    Group {
        city: String,
        /// `None` for the city header itself, `Some` for a bucket header.
        time_of_day: Option<TimeOfDay>,
        label: String,
    },
}

/// What the player should start previewing after a row selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub video_id: String,
    /// Opaque reference for the asset resolver.
    pub url: String,
}

/// The flat projection: all assets as root children, discovery order.
pub struct FlatProjection<'a, B: PersistenceBackend> {
    registry: &'a AssetRegistry,
    rotation: &'a RotationStore<B>,
    active: Option<String>,
}

impl<'a, B: PersistenceBackend> FlatProjection<'a, B> {
    pub fn new(registry: &'a AssetRegistry, rotation: &'a RotationStore<B>) -> Self {
        Self {
            registry,
            rotation,
            active: None,
        }
    }

    /// Children of a node; `None` is the root.
    ///
    /// The root's children are exactly the registry's assets in discovery
    /// order. Leaves have no children, and the flat view has no groups.
    pub fn children(&self, parent: Option<&Node>) -> Result<Vec<Node>, PersistenceError> {
        match parent {
            None => self
                .registry
                .videos()
                .iter()
                .enumerate()
                .map(|(index, video)| self.leaf(index, video))
                .collect(),
            Some(Node::Video { .. }) | Some(Node::Group { .. }) => Ok(Vec::new()),
        }
    }

    pub fn is_expandable(&self, node: &Node) -> bool {
        match node {
            Node::Video { .. } => false,
            // The flat view never produces groups, but a node handed back
            // from the grouped view is still not expandable here.
            Node::Group { .. } => false,
        }
    }

    pub fn row_height(&self, _node: &Node) -> f32 {
        ROW_HEIGHT
    }

    /// Mark a leaf as active for preview and report what to play.
    ///
    /// Re-selecting the already-active leaf re-issues the same request.
    /// Selection never touches rotation state; groups are not selectable.
    pub fn select(&mut self, node: &Node) -> Option<PreviewRequest> {
        match node {
            Node::Video { index, .. } => {
                let video = self.registry.get(*index)?;
                self.active = Some(video.id.clone());
                Some(PreviewRequest {
                    video_id: video.id.clone(),
                    url: video.url.clone(),
                })
            }
            Node::Group { .. } => None,
        }
    }

    /// Identity of the asset currently active for preview, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn leaf(&self, index: usize, video: &AerialVideo) -> Result<Node, PersistenceError> {
        Ok(Node::Video {
            index,
            id: video.id.clone(),
            label: video.name.clone(),
            in_rotation: self.rotation.get(&video.id)?,
        })
    }
}

/// The grouped projection: Location → bucket → asset.
///
/// Root children are city headers in first-seen order; a city's children are
/// its day and night bucket headers (both always present); a bucket's
/// children are its assets in position order.
pub struct GroupedProjection<'a, B: PersistenceBackend> {
    registry: &'a AssetRegistry,
    grouping: &'a GroupingIndex,
    rotation: &'a RotationStore<B>,
}

impl<'a, B: PersistenceBackend> GroupedProjection<'a, B> {
    pub fn new(
        registry: &'a AssetRegistry,
        grouping: &'a GroupingIndex,
        rotation: &'a RotationStore<B>,
    ) -> Self {
        Self {
            registry,
            grouping,
            rotation,
        }
    }

    pub fn children(&self, parent: Option<&Node>) -> Result<Vec<Node>, PersistenceError> {
        match parent {
            None => Ok(self
                .grouping
                .cities()
                .iter()
                .map(|city| Node::Group {
                    city: city.name().to_string(),
                    time_of_day: None,
                    label: city.name().to_string(),
                })
                .collect()),
            Some(Node::Group {
                city,
                time_of_day: None,
                ..
            }) => Ok([TimeOfDay::Day, TimeOfDay::Night]
                .into_iter()
                .map(|tod| Node::Group {
                    city: city.clone(),
                    time_of_day: Some(tod),
                    label: tod.label().to_string(),
                })
                .collect()),
            Some(Node::Group {
                city,
                time_of_day: Some(tod),
                ..
            }) => {
                let Some(city) = self.grouping.city(city) else {
                    return Ok(Vec::new());
                };
                city.bucket(*tod)
                    .entries()
                    .iter()
                    .filter_map(|entry| {
                        self.registry
                            .get(entry.video)
                            .map(|video| (entry.video, video))
                    })
                    .map(|(index, video)| {
                        Ok(Node::Video {
                            index,
                            id: video.id.clone(),
                            label: video.name.clone(),
                            in_rotation: self.rotation.get(&video.id)?,
                        })
                    })
                    .collect()
            }
            Some(Node::Video { .. }) => Ok(Vec::new()),
        }
    }

    pub fn is_expandable(&self, node: &Node) -> bool {
        match node {
            Node::Group { .. } => true,
            Node::Video { .. } => false,
        }
    }
}
