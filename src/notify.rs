//! Presentation refresh signal.
//!
//! One-way "re-render" notification from the model to the presentation
//! layer. The payload is only an optimization hint: a full reload after a
//! catalog publish or a bulk toggle, a single-row update after one checkbox
//! change.

/// What changed, as a re-render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// Catalog contents or many rotation flags changed; reload everything.
    Full,
    /// One asset's rotation flag changed; refreshing that row is enough.
    Row { video_id: String },
}

/// Receiver of refresh signals, implemented by the presentation layer.
pub trait RefreshSink {
    fn refresh(&self, refresh: Refresh);
}

/// Discards every signal. For headless use and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RefreshSink for NullSink {
    fn refresh(&self, _refresh: Refresh) {}
}
