//! Player surface - binds one audio backend to the store
//!
//! Phases and what moves between them:
//!
//! ```text
//! any     --episode selected, load ok-------->  Playing (autoplay)
//! any     --episode selected, load failed---->  Idle
//! Paused  --store playing / backend Played--->  Playing
//! Playing --store paused / backend Paused---->  Paused
//! any     --playlist cleared----------------->  Idle
//! ```
//!
//! Store changes drive commands (load/seek/play/pause/loop); backend events
//! drive progress and end-of-episode policy. A freshly selected episode
//! always starts playing; the backend's `Played` event brings the store's
//! `is_playing` back in line.

use crate::backend::AudioBackend;
use crate::error::Result;
use crate::events::{BackendEvent, StoreSubscription};
use crate::store::PlaybackStore;
use crate::types::{EpisodeKey, PlaybackState, ProgressState, SurfacePhase};
use tracing::{debug, trace};

/// Audio surface driven by a `PlaybackStore`
pub struct PlayerSurface<B: AudioBackend> {
    backend: B,
    changes: StoreSubscription,

    phase: SurfacePhase,
    active: Option<EpisodeKey>,
    active_duration: u64,
    looping: bool,
    // Store play flag as of the last applied snapshot
    store_playing: bool,

    progress: ProgressState,
    // Ticks only count once metadata has reset the position
    listening: bool,
}

impl<B: AudioBackend> PlayerSurface<B> {
    /// Subscribe to `store` and bring `backend` in line with its current state
    pub fn new(mut backend: B, store: &mut PlaybackStore) -> Result<Self> {
        let changes = store.subscribe();
        let looping = store.state().is_looping();
        backend.set_looping(looping);

        let mut surface = Self {
            backend,
            changes,
            phase: SurfacePhase::Idle,
            active: None,
            active_duration: 0,
            looping,
            store_playing: store.state().is_playing(),
            progress: ProgressState::default(),
            listening: false,
        };
        surface.apply(store.state())?;

        Ok(surface)
    }

    /// Apply every pending store change, oldest first
    pub fn pump(&mut self) -> Result<()> {
        while let Some(change) = self.changes.try_next() {
            trace!("Applying store revision {}", change.revision);
            self.apply(&change.state)?;
        }
        Ok(())
    }

    /// React to an event reported by the backend
    ///
    /// Store changes already queued are applied first so the event lands on
    /// an up-to-date surface.
    pub fn handle_event(&mut self, event: BackendEvent, store: &mut PlaybackStore) -> Result<()> {
        self.pump()?;

        match event {
            BackendEvent::MetadataReady => {
                if self.phase == SurfacePhase::Idle {
                    return Ok(());
                }
                self.backend.set_position(0)?;
                self.progress = ProgressState::default();
                self.listening = true;
            }
            BackendEvent::TimeUpdate { position_secs } => {
                if self.listening {
                    self.progress.elapsed_secs = position_secs.max(0.0).floor() as u64;
                    trace!("Progress {}s", self.progress.elapsed_secs);
                }
            }
            BackendEvent::Ended => {
                if store.has_next() {
                    debug!("Episode ended, advancing");
                    store.play_next();
                } else {
                    debug!("Episode ended, nothing next; clearing");
                    store.clear_player_state();
                }
            }
            BackendEvent::Played => {
                // Already playing; the store change below must not echo a command
                if self.phase != SurfacePhase::Idle {
                    self.phase = SurfacePhase::Playing;
                }
                store.set_playing_state(true);
            }
            BackendEvent::Paused => {
                if self.phase != SurfacePhase::Idle {
                    self.phase = SurfacePhase::Paused;
                }
                store.set_playing_state(false);
            }
        }

        self.pump()
    }

    /// Seek the active episode to `seconds`
    ///
    /// Clamped to the episode's duration. Progress updates immediately rather
    /// than waiting for the next tick. Does nothing while idle.
    pub fn seek(&mut self, seconds: u64) -> Result<()> {
        if self.phase == SurfacePhase::Idle {
            return Ok(());
        }

        let target = if self.active_duration > 0 {
            seconds.min(self.active_duration)
        } else {
            seconds
        };

        self.backend.set_position(target)?;
        self.progress.elapsed_secs = target;
        Ok(())
    }

    // ===== State Queries =====

    /// Current phase
    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    /// Displayed progress
    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    /// Selection currently loaded into the backend
    pub fn active_key(&self) -> Option<EpisodeKey> {
        self.active
    }

    /// The audio backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The audio backend (mutable)
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // ===== Internal =====

    fn apply(&mut self, state: &PlaybackState) -> Result<()> {
        if state.is_looping() != self.looping {
            self.looping = state.is_looping();
            self.backend.set_looping(self.looping);
        }

        let key = state.active_key();
        if key != self.active {
            return self.select(key, state);
        }

        if self.phase == SurfacePhase::Idle || state.is_playing() == self.store_playing {
            return Ok(());
        }
        self.store_playing = state.is_playing();

        let wanted = if state.is_playing() {
            SurfacePhase::Playing
        } else {
            SurfacePhase::Paused
        };
        if wanted != self.phase {
            self.backend.set_playing(state.is_playing())?;
            self.phase = wanted;
        }

        Ok(())
    }

    /// Switch the backend to a new selection
    ///
    /// Nothing is committed until every backend command succeeded, so a
    /// failed load leaves the surface idle and the next change retries it.
    fn select(&mut self, key: Option<EpisodeKey>, state: &PlaybackState) -> Result<()> {
        self.progress = ProgressState::default();
        self.listening = false;
        self.store_playing = state.is_playing();
        self.active = None;
        self.active_duration = 0;
        self.phase = SurfacePhase::Idle;

        let Some(episode) = state.current_episode() else {
            debug!("No episode selected, unloading");
            self.backend.unload();
            return Ok(());
        };

        debug!("Loading {} ({})", episode.title, episode.url);
        self.backend.load(&episode.url)?;
        self.backend.set_position(0)?;
        self.backend.set_playing(true)?;

        self.active = key;
        self.active_duration = episode.duration;
        self.phase = SurfacePhase::Playing;
        Ok(())
    }
}
