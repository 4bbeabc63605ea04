//! Listening session - runs a store and surface against the simulated backend

use crate::simulated::SimulatedBackend;
use anyhow::{Context, Result};
use podcastr_core::{format_duration, Episode};
use podcastr_playback::{
    EpisodeKey, PlaybackConfig, PlaybackStore, PlayerSurface, SurfacePhase,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Seconds between progress log lines
const PROGRESS_INTERVAL_SECS: u64 = 60;

/// How a session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The playlist ran out and the player cleared itself
    Cleared,
    /// The tick budget was used up first
    TickBudget,
}

/// Summary of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub end: SessionEnd,
    pub ticks: u64,
    /// Titles in the order they started playing
    pub played: Vec<String>,
}

/// Store + surface + simulated backend
pub struct Session {
    store: PlaybackStore,
    surface: PlayerSurface<SimulatedBackend>,
    last_key: Option<EpisodeKey>,
    played: Vec<String>,
}

impl Session {
    /// Create a session whose backend knows every episode in `playlist`
    pub fn new(config: PlaybackConfig, playlist: &[Episode]) -> Result<Self> {
        let durations: HashMap<_, _> = playlist
            .iter()
            .map(|episode| (episode.url.clone(), episode.duration))
            .collect();

        let mut store = PlaybackStore::new(config);
        let surface = PlayerSurface::new(SimulatedBackend::new(durations), &mut store)
            .context("Failed to attach player surface")?;

        Ok(Self {
            store,
            surface,
            last_key: None,
            played: Vec::new(),
        })
    }

    /// The store
    pub fn store(&self) -> &PlaybackStore {
        &self.store
    }

    /// The surface
    pub fn surface(&self) -> &PlayerSurface<SimulatedBackend> {
        &self.surface
    }

    /// Load `playlist` at `index` and start playing
    pub fn start(&mut self, playlist: Vec<Episode>, index: usize) -> Result<()> {
        self.store.play_list(playlist, index);
        self.settle()
    }

    /// Run until the player clears or `max_ticks` seconds have been simulated
    pub fn run(&mut self, max_ticks: u64) -> Result<SessionSummary> {
        let mut ticks = 0;

        let end = loop {
            self.settle()?;

            if self.surface.phase() == SurfacePhase::Idle {
                break SessionEnd::Cleared;
            }
            if ticks >= max_ticks {
                break SessionEnd::TickBudget;
            }

            let elapsed = self.surface.progress().elapsed_secs;
            let playing = self.surface.backend().is_playing();
            if playing && elapsed > 0 && elapsed % PROGRESS_INTERVAL_SECS == 0 {
                if let Some(episode) = self.store.state().current_episode() {
                    info!(
                        "{} / {}",
                        format_duration(elapsed),
                        format_duration(episode.duration)
                    );
                }
            }

            self.surface.backend_mut().tick();
            ticks += 1;
        };

        info!("Session finished after {} ticks ({:?})", ticks, end);
        Ok(SessionSummary {
            end,
            ticks,
            played: self.played.clone(),
        })
    }

    /// Feed backend events to the surface until both sides are quiet
    fn settle(&mut self) -> Result<()> {
        self.surface.pump()?;
        self.note_track_change();

        loop {
            let events = self.surface.backend_mut().drain_events();
            if events.is_empty() {
                return Ok(());
            }
            for event in events {
                debug!("Backend event {:?}", event);
                self.surface.handle_event(event, &mut self.store)?;
                self.note_track_change();
            }
        }
    }

    fn note_track_change(&mut self) {
        let key = self.surface.active_key();
        if key == self.last_key {
            return;
        }
        self.last_key = key;

        let state = self.store.state();
        if let Some(episode) = state.current_episode() {
            info!(
                "Now playing [{}/{}] {} ({})",
                state.current_index() + 1,
                state.playlist().len(),
                episode.title,
                format_duration(episode.duration)
            );
            self.played.push(episode.title.clone());
        } else {
            info!("Playlist finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn create_test_episode(n: usize, duration: u64) -> Episode {
        Episode::new(
            format!("Episode {}", n),
            "Diego e Richard",
            Url::parse("https://cdn.example.com/thumb.jpg").unwrap(),
            duration,
            Url::parse(&format!("https://cdn.example.com/{}.m4a", n)).unwrap(),
        )
    }

    fn playlist() -> Vec<Episode> {
        (0..3).map(|n| create_test_episode(n, 5)).collect()
    }

    #[test]
    fn plays_through_and_clears() {
        let playlist = playlist();
        let mut session = Session::new(PlaybackConfig::default(), &playlist).unwrap();
        session.start(playlist, 0).unwrap();

        let summary = session.run(1_000).unwrap();

        assert_eq!(summary.end, SessionEnd::Cleared);
        assert_eq!(summary.ticks, 15);
        assert_eq!(summary.played, vec!["Episode 0", "Episode 1", "Episode 2"]);
        assert!(session.store().state().playlist().is_empty());
    }

    #[test]
    fn keeps_playing_across_episode_boundary() {
        let playlist = playlist();
        let mut session = Session::new(PlaybackConfig::default(), &playlist).unwrap();
        session.start(playlist, 0).unwrap();

        // The backend reports Paused then Ended at tick 5
        let summary = session.run(6).unwrap();

        assert_eq!(summary.end, SessionEnd::TickBudget);
        assert_eq!(session.store().state().current_index(), 1);
        assert!(session.store().state().is_playing());
        assert_eq!(session.surface().phase(), SurfacePhase::Playing);
        assert_eq!(session.surface().progress().elapsed_secs, 1);
    }

    #[test]
    fn starting_mid_playlist_skips_earlier_episodes() {
        let playlist = playlist();
        let mut session = Session::new(PlaybackConfig::default(), &playlist).unwrap();
        session.start(playlist, 2).unwrap();

        let summary = session.run(1_000).unwrap();

        assert_eq!(summary.played, vec!["Episode 2"]);
        assert_eq!(summary.ticks, 5);
    }

    #[test]
    fn looping_runs_until_budget() {
        let playlist = playlist();
        let config = PlaybackConfig {
            looping: true,
            shuffling: false,
        };
        let mut session = Session::new(config, &playlist).unwrap();
        session.start(playlist, 0).unwrap();

        let summary = session.run(40).unwrap();

        assert_eq!(summary.end, SessionEnd::TickBudget);
        assert_eq!(summary.played, vec!["Episode 0"]);
        assert_eq!(session.store().state().current_index(), 0);
    }

    #[test]
    fn media_key_pause_stops_the_clock() {
        let playlist = playlist();
        let mut session = Session::new(PlaybackConfig::default(), &playlist).unwrap();
        session.start(playlist, 0).unwrap();

        session.surface.backend_mut().press_media_key();
        let summary = session.run(10).unwrap();

        assert_eq!(summary.end, SessionEnd::TickBudget);
        assert!(!session.store().state().is_playing());
        assert_eq!(session.surface().phase(), SurfacePhase::Paused);
        assert_eq!(session.surface().progress().elapsed_secs, 0);
    }

    #[test]
    fn empty_playlist_finishes_immediately() {
        let mut session = Session::new(PlaybackConfig::default(), &[]).unwrap();
        session.start(Vec::new(), 0).unwrap();

        let summary = session.run(10).unwrap();

        assert_eq!(summary.end, SessionEnd::Cleared);
        assert_eq!(summary.ticks, 0);
        assert!(summary.played.is_empty());
    }
}
