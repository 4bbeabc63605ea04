//! Playback state store
//!
//! Owns the session's `PlaybackState` and publishes a `StoreChange` to every
//! subscriber after each transition.

use crate::events::{StoreChange, StoreSubscription};
use crate::types::{PlaybackConfig, PlaybackState};
use crossbeam_channel::{unbounded, Sender};
use podcastr_core::Episode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, warn};

/// Session-scoped player state
///
/// Every operation is infallible. Operations that change the state notify each
/// live subscriber exactly once; operations that change nothing stay silent.
///
/// # Example
///
/// ```rust
/// use podcastr_core::Episode;
/// use podcastr_playback::{PlaybackConfig, PlaybackStore};
/// use url::Url;
///
/// let episode = Episode::new(
///     "Faladev #30",
///     "Diego e Richard",
///     Url::parse("https://example.com/thumb.jpg").unwrap(),
///     3981,
///     Url::parse("https://example.com/audio.m4a").unwrap(),
/// );
///
/// let mut store = PlaybackStore::new(PlaybackConfig::default());
/// let changes = store.subscribe();
///
/// store.play(episode);
/// assert!(store.state().is_playing());
/// assert_eq!(changes.drain().len(), 1);
/// ```
pub struct PlaybackStore {
    state: PlaybackState,
    revision: u64,
    subscribers: Vec<Sender<StoreChange>>,
    rng: StdRng,
}

impl PlaybackStore {
    /// Create a store seeded from system entropy
    pub fn new(config: PlaybackConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a store with a fixed shuffle seed
    pub fn with_seed(config: PlaybackConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PlaybackConfig, rng: StdRng) -> Self {
        Self {
            state: PlaybackState::new(&config),
            revision: 0,
            subscribers: Vec::new(),
            rng,
        }
    }

    // ===== Subscriptions =====

    /// Subscribe to state changes
    ///
    /// The subscription only sees transitions that happen after this call.
    pub fn subscribe(&mut self) -> StoreSubscription {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        StoreSubscription::new(rx)
    }

    /// Number of live subscribers
    ///
    /// Dropped subscriptions are pruned on the next notification.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Number of transitions so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    // ===== Loading =====

    /// Play a single episode, replacing the playlist
    pub fn play(&mut self, episode: Episode) {
        debug!("Playing single episode: {}", episode.title);
        self.state.playlist = Arc::from(vec![episode]);
        self.state.current_index = 0;
        self.state.is_playing = true;
        self.select();
    }

    /// Play `list` starting at `index`, replacing the playlist
    ///
    /// `index` must be a valid index into `list`. An out-of-range index is
    /// clamped to the last episode; an empty list empties the player.
    pub fn play_list(&mut self, list: impl Into<Arc<[Episode]>>, index: usize) {
        let list = list.into();

        if list.is_empty() {
            warn!("play_list called with an empty list, clearing player");
            self.state.playlist = list;
            self.state.current_index = 0;
            self.state.is_playing = false;
            self.select();
            return;
        }

        let index = if index < list.len() {
            index
        } else {
            warn!(
                "play_list index {} out of range for {} episodes, clamping",
                index,
                list.len()
            );
            list.len() - 1
        };

        debug!("Playing list of {} episodes at index {}", list.len(), index);
        self.state.playlist = list;
        self.state.current_index = index;
        self.state.is_playing = true;
        self.select();
    }

    // ===== Play/Pause =====

    /// Flip between playing and paused
    ///
    /// Ignored while the playlist is empty.
    pub fn toggle_play(&mut self) {
        if self.state.playlist.is_empty() {
            debug!("toggle_play ignored: nothing loaded");
            return;
        }

        self.state.is_playing = !self.state.is_playing;
        self.notify();
    }

    /// Mirror the backend's observed play state
    ///
    /// A `true` while the playlist is empty is ignored.
    pub fn set_playing_state(&mut self, playing: bool) {
        if self.state.is_playing == playing {
            return;
        }
        if playing && self.state.playlist.is_empty() {
            debug!("set_playing_state(true) ignored: nothing loaded");
            return;
        }

        self.state.is_playing = playing;
        self.notify();
    }

    // ===== Loop & Shuffle =====

    /// Flip looping
    pub fn toggle_looping(&mut self) {
        self.state.is_looping = !self.state.is_looping;
        debug!("Looping {}", on_off(self.state.is_looping));
        self.notify();
    }

    /// Flip shuffling
    pub fn toggle_shuffling(&mut self) {
        self.state.is_shuffling = !self.state.is_shuffling;
        debug!("Shuffling {}", on_off(self.state.is_shuffling));
        self.notify();
    }

    // ===== Navigation =====

    /// Check if there is a previous episode
    pub fn has_prev(&self) -> bool {
        self.state.has_prev()
    }

    /// Check if there is a next episode
    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    /// Advance to the next episode
    ///
    /// The sequential next wins even while shuffling, so shuffle only kicks
    /// in at the end of the list. There it picks uniformly over the whole
    /// playlist, which may land on the current episode again.
    pub fn play_next(&mut self) {
        let len = self.state.playlist.len();
        if len == 0 {
            return;
        }

        let next = self.state.current_index + 1;
        if next < len {
            self.state.current_index = next;
        } else if self.state.is_shuffling {
            self.state.current_index = self.rng.gen_range(0..len);
            debug!("Shuffle picked index {}", self.state.current_index);
        } else {
            return;
        }

        self.select();
    }

    /// Go back to the previous episode, if any
    pub fn play_prev(&mut self) {
        if !self.state.has_prev() {
            return;
        }

        self.state.current_index -= 1;
        self.select();
    }

    /// Empty the playlist
    ///
    /// Loop and shuffle settings survive; playback stops since nothing is loaded.
    pub fn clear_player_state(&mut self) {
        if self.state.playlist.is_empty()
            && self.state.current_index == 0
            && !self.state.is_playing
        {
            return;
        }

        debug!("Clearing player state");
        self.state.playlist = Arc::from(Vec::<Episode>::new());
        self.state.current_index = 0;
        self.state.is_playing = false;
        self.notify();
    }

    // ===== Internal =====

    /// Mark a new episode selection and publish it
    fn select(&mut self) {
        self.state.selection += 1;
        self.notify();
    }

    fn notify(&mut self) {
        self.revision += 1;
        let change = StoreChange {
            revision: self.revision,
            state: self.state.clone(),
        };

        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
