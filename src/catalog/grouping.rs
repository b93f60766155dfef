//! Grouping of registry assets into cities and day/night buckets.
//!
//! The index holds back-pointers (registry indices) rather than asset data:
//! the registry owns the videos, the index only arranges them. It is rebuilt
//! from scratch after every registry load — never merged incrementally — so
//! building is a pure function of the registry and its discovery order.

use crate::catalog::registry::AssetRegistry;
use crate::catalog::video::{AerialVideo, TimeOfDay};

/// A bucket slot: which registry asset sits at which position.
///
/// Positions are dense and zero-based within a bucket, assigned as the
/// bucket's size at append time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketEntry {
    /// Index into the registry's video list.
    pub video: usize,
    /// Zero-based position within this bucket.
    pub position: usize,
}

/// An ordered day or night bucket within a city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOfDayBucket {
    time_of_day: TimeOfDay,
    entries: Vec<BucketEntry>,
}

impl TimeOfDayBucket {
    fn new(time_of_day: TimeOfDay) -> Self {
        Self {
            time_of_day,
            entries: Vec::new(),
        }
    }

    fn append(&mut self, video: usize) {
        let position = self.entries.len();
        self.entries.push(BucketEntry { video, position });
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    /// Entries in display order (position order).
    pub fn entries(&self) -> &[BucketEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A named location owning exactly one day and one night bucket.
///
/// Both buckets always exist, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    name: String,
    day: TimeOfDayBucket,
    night: TimeOfDayBucket,
}

impl City {
    fn new(name: String) -> Self {
        Self {
            name,
            day: TimeOfDayBucket::new(TimeOfDay::Day),
            night: TimeOfDayBucket::new(TimeOfDay::Night),
        }
    }

    fn add_video(&mut self, time_of_day: TimeOfDay, video: usize) {
        match time_of_day {
            TimeOfDay::Day => self.day.append(video),
            TimeOfDay::Night => self.night.append(video),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bucket(&self, time_of_day: TimeOfDay) -> &TimeOfDayBucket {
        match time_of_day {
            TimeOfDay::Day => &self.day,
            TimeOfDay::Night => &self.night,
        }
    }
}

/// The full grouping of the registry: cities in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingIndex {
    cities: Vec<City>,
}

impl GroupingIndex {
    /// Build the index from a registry.
    ///
    /// Deterministic given the registry's discovery order: cities appear in
    /// the order their first asset was discovered, bucket entries in the
    /// order assets were discovered within the city.
    pub fn build(registry: &AssetRegistry) -> Self {
        let mut cities: Vec<City> = Vec::new();

        for (index, video) in registry.videos().iter().enumerate() {
            let slot = match cities.iter().position(|c| c.name == video.location) {
                Some(slot) => slot,
                None => {
                    cities.push(City::new(video.location.clone()));
                    cities.len() - 1
                }
            };
            cities[slot].add_video(video.time_of_day, index);
        }

        Self { cities }
    }

    /// Cities in first-seen order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.name == name)
    }

    /// Total number of grouped assets across all buckets.
    pub fn total_len(&self) -> usize {
        self.cities
            .iter()
            .map(|c| c.day.len() + c.night.len())
            .sum()
    }

    /// Videos of one bucket, resolved against the registry in position order.
    pub fn bucket_videos<'a>(
        &'a self,
        registry: &'a AssetRegistry,
        city: &str,
        time_of_day: TimeOfDay,
    ) -> Vec<&'a AerialVideo> {
        let Some(city) = self.city(city) else {
            return Vec::new();
        };
        city.bucket(time_of_day)
            .entries()
            .iter()
            .filter_map(|entry| registry.get(entry.video))
            .collect()
    }
}
