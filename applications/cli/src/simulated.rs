//! Simulated audio backend
//!
//! Plays nothing. Advances a virtual clock one second per `tick` and reports
//! the same events a streaming audio element would.

use podcastr_playback::{AudioBackend, BackendEvent, PlaybackError, Result};
use std::collections::{HashMap, VecDeque};
use tracing::trace;
use url::Url;

#[derive(Debug, Clone)]
struct LoadedSource {
    url: Url,
    duration: u64,
}

/// Backend driven by a virtual clock
#[derive(Debug, Default)]
pub struct SimulatedBackend {
    durations: HashMap<Url, u64>,
    source: Option<LoadedSource>,
    position: u64,
    playing: bool,
    looping: bool,
    events: VecDeque<BackendEvent>,
}

impl SimulatedBackend {
    /// Create a backend that knows the length of each source it may load
    pub fn new(durations: HashMap<Url, u64>) -> Self {
        Self {
            durations,
            ..Default::default()
        }
    }

    /// Advance the clock by one second
    ///
    /// Queues a `TimeUpdate`, or `Paused` then `Ended` when the source plays
    /// out, the order a media element reports them in. A looping source wraps
    /// to the start instead of ending.
    pub fn tick(&mut self) {
        let Some(source) = &self.source else {
            return;
        };
        if !self.playing {
            return;
        }

        self.position += 1;
        if self.position < source.duration {
            self.events.push_back(BackendEvent::TimeUpdate {
                position_secs: self.position as f64,
            });
            return;
        }

        if self.looping {
            trace!("Looping {}", source.url);
            self.position = 0;
            self.events
                .push_back(BackendEvent::TimeUpdate { position_secs: 0.0 });
        } else {
            self.position = source.duration;
            self.playing = false;
            self.events.push_back(BackendEvent::Paused);
            self.events.push_back(BackendEvent::Ended);
        }
    }

    /// Simulate the user pressing a hardware/OS pause or play key
    pub fn press_media_key(&mut self) {
        if self.source.is_none() {
            return;
        }
        self.playing = !self.playing;
        self.events.push_back(if self.playing {
            BackendEvent::Played
        } else {
            BackendEvent::Paused
        });
    }

    /// Take the queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<BackendEvent> {
        self.events.drain(..).collect()
    }

    /// Current clock position in seconds
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Whether the clock is running
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// URL of the loaded source
    pub fn source_url(&self) -> Option<&Url> {
        self.source.as_ref().map(|source| &source.url)
    }
}

impl AudioBackend for SimulatedBackend {
    fn load(&mut self, url: &Url) -> Result<()> {
        let duration = self
            .durations
            .get(url)
            .copied()
            .ok_or_else(|| PlaybackError::load(url.as_str(), "unknown source"))?;

        self.source = Some(LoadedSource {
            url: url.clone(),
            duration,
        });
        self.position = 0;
        self.events.push_back(BackendEvent::MetadataReady);
        Ok(())
    }

    fn unload(&mut self) {
        self.source = None;
        self.position = 0;
        self.playing = false;
    }

    fn set_position(&mut self, seconds: u64) -> Result<()> {
        let Some(source) = &self.source else {
            return Err(PlaybackError::backend("no source loaded"));
        };
        self.position = seconds.min(source.duration);
        Ok(())
    }

    fn set_playing(&mut self, playing: bool) -> Result<()> {
        if self.source.is_none() {
            return Err(PlaybackError::backend("no source loaded"));
        }
        if self.playing != playing {
            self.playing = playing;
            self.events.push_back(if playing {
                BackendEvent::Played
            } else {
                BackendEvent::Paused
            });
        }
        Ok(())
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
}
