//! Core types for playback state

use podcastr_core::Episode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Snapshot of the player state
///
/// Owned by `PlaybackStore`; subscribers and renderers receive clones. The
/// playlist is shared, so cloning a snapshot never copies episodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackState {
    pub(crate) playlist: Arc<[Episode]>,
    pub(crate) current_index: usize,
    pub(crate) is_playing: bool,
    pub(crate) is_looping: bool,
    pub(crate) is_shuffling: bool,

    /// Bumped on every load and navigation
    #[serde(skip)]
    pub(crate) selection: u64,
}

impl PlaybackState {
    pub(crate) fn new(config: &PlaybackConfig) -> Self {
        Self {
            playlist: Arc::from(Vec::<Episode>::new()),
            current_index: 0,
            is_playing: false,
            is_looping: config.looping,
            is_shuffling: config.shuffling,
            selection: 0,
        }
    }

    /// Episodes in the current playlist
    pub fn playlist(&self) -> &[Episode] {
        &self.playlist
    }

    /// Index of the active episode (0 when the playlist is empty)
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Whether playback is (or should be) running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether the backend should loop the active episode
    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    /// Whether "next" falls back to a random pick at the end of the list
    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    /// The active episode, if any
    pub fn current_episode(&self) -> Option<&Episode> {
        self.playlist.get(self.current_index)
    }

    /// Check if there is a previous episode
    pub fn has_prev(&self) -> bool {
        self.current_index > 0
    }

    /// Check if there is a next episode
    ///
    /// While shuffling there is always a next pick, even at the last index.
    pub fn has_next(&self) -> bool {
        self.is_shuffling || self.current_index + 1 < self.playlist.len()
    }

    /// Identity of the active selection
    ///
    /// Changes whenever a new episode is selected, including a shuffle pick
    /// that lands on the same index again.
    pub fn active_key(&self) -> Option<EpisodeKey> {
        if self.playlist.is_empty() {
            None
        } else {
            Some(EpisodeKey {
                selection: self.selection,
                index: self.current_index,
            })
        }
    }
}

/// Identity of one episode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EpisodeKey {
    /// Selection counter at the time the episode became active
    pub selection: u64,

    /// Index into the playlist
    pub index: usize,
}

/// Phase of the player surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfacePhase {
    /// No episode selected
    Idle,

    /// Episode loaded, backend paused
    Paused,

    /// Episode loaded, backend playing
    Playing,
}

/// Progress shown by the player surface
///
/// Local to the surface and reset whenever the active episode changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Whole seconds elapsed in the active episode
    pub elapsed_secs: u64,
}

/// Initial player settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Start with looping enabled (default: false)
    pub looping: bool,

    /// Start with shuffling enabled (default: false)
    pub shuffling: bool,
}
