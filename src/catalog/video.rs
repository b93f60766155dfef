//! Core data model for a single aerial clip.

use serde::{Deserialize, Serialize};

/// Time-of-day classification of a clip.
///
/// The catalog recognizes exactly two buckets. Classification strings are
/// matched case-insensitively against the literal `"night"`; everything
/// else, including missing or malformed values, falls back to `Day`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    /// Parse a classification string from a listing source.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("night") {
            TimeOfDay::Night
        } else {
            TimeOfDay::Day
        }
    }

    /// Lowercase label as shown in group headers ("day" / "night").
    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
        }
    }
}

/// A single video asset known to the catalog.
///
/// The identity is derived from the normalized source path at scan time and
/// is stable across catalog rebuilds; it keys the persisted rotation state.
/// The playable `url` is an opaque reference handed to the asset resolver —
/// the catalog never opens it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AerialVideo {
    /// Stable, globally unique identity (normalized source path).
    pub id: String,
    /// Display name: file name with path and extension stripped.
    pub name: String,
    /// Content-type tag, the lowercased file extension (e.g. "mov").
    pub kind: String,
    /// Day/night classification used by the grouping index.
    pub time_of_day: TimeOfDay,
    /// Location (city) name this clip is grouped under.
    pub location: String,
    /// Opaque playable source reference for the asset resolver.
    pub url: String,
}
