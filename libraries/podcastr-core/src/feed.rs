//! Episode feed
//!
//! The content API is a read-only collaborator. `EpisodeSource` abstracts it so
//! the player never performs network calls itself; `JsonFileSource` serves a
//! JSON array of records from disk.

use crate::episode::{Episode, EpisodeListing, EpisodeRecord};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Query parameters for fetching episodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    /// Maximum number of records to return (default: 12)
    pub limit: usize,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self { limit: 12 }
    }
}

/// Source of raw episode records
///
/// Implementations return records newest first, truncated to `query.limit`.
pub trait EpisodeSource {
    /// Fetch raw records
    fn fetch(&self, query: &FeedQuery) -> Result<Vec<EpisodeRecord>>;
}

/// Episode source backed by a JSON file containing an array of records
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EpisodeSource for JsonFileSource {
    fn fetch(&self, query: &FeedQuery) -> Result<Vec<EpisodeRecord>> {
        let raw = std::fs::read_to_string(&self.path)?;
        let mut records: Vec<EpisodeRecord> = serde_json::from_str(&raw)?;

        // Newest first; records with unparseable dates sort last
        records.sort_by_cached_key(|record| std::cmp::Reverse(record.published_at().ok()));
        records.truncate(query.limit);

        debug!(
            "Fetched {} episode records from {:?}",
            records.len(),
            self.path
        );
        Ok(records)
    }
}

/// Episodes ready for display and playback
///
/// Splits the feed into the latest releases and the rest, in the same order
/// the combined playlist uses. A listing's position in `listings()` is its
/// index for `PlaybackStore::play_list`.
#[derive(Debug, Clone, Default)]
pub struct EpisodeFeed {
    listings: Vec<EpisodeListing>,
    latest_count: usize,
}

impl EpisodeFeed {
    /// Number of episodes shown as latest releases by default
    pub const DEFAULT_LATEST_COUNT: usize = 2;

    /// Build a feed from raw records
    ///
    /// Records that cannot be mapped (bad URLs, unparseable dates) are skipped.
    pub fn from_records(records: Vec<EpisodeRecord>, latest_count: usize) -> Self {
        let listings: Vec<EpisodeListing> = records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                EpisodeListing::try_from(record)
                    .map_err(|e| warn!("Skipping episode {}: {}", id, e))
                    .ok()
            })
            .collect();

        let latest_count = latest_count.min(listings.len());
        Self {
            listings,
            latest_count,
        }
    }

    /// Fetch from a source and build the feed
    pub fn load(source: &dyn EpisodeSource, query: &FeedQuery, latest_count: usize) -> Result<Self> {
        let records = source.fetch(query)?;
        Ok(Self::from_records(records, latest_count))
    }

    /// All listings, latest first
    pub fn listings(&self) -> &[EpisodeListing] {
        &self.listings
    }

    /// The latest releases
    pub fn latest(&self) -> &[EpisodeListing] {
        &self.listings[..self.latest_count]
    }

    /// Everything after the latest releases
    pub fn rest(&self) -> &[EpisodeListing] {
        &self.listings[self.latest_count..]
    }

    /// Playlist index of the `n`th entry in `rest()`
    pub fn rest_index(&self, n: usize) -> usize {
        self.latest_count + n
    }

    /// The combined playlist (latest followed by rest)
    pub fn playlist(&self) -> Vec<Episode> {
        self.listings
            .iter()
            .map(|listing| listing.episode.clone())
            .collect()
    }

    /// Number of episodes
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Check if the feed is empty
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
