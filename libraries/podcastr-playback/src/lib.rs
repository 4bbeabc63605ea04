//! Podcastr - Playback Management
//!
//! Platform-agnostic player state for Podcastr.
//!
//! This crate provides:
//! - `PlaybackStore`: the session's playlist, active index and play/loop/shuffle flags
//! - `PlayerSurface`: a small state machine binding one audio backend to the store
//! - Change notification via per-subscriber channels (no ambient global state)
//!
//! # Architecture
//!
//! `podcastr-playback` performs no I/O and spawns no threads:
//! - UI code calls store operations
//! - The store publishes a `StoreChange` after every transition
//! - The surface drains those changes and issues backend commands
//! - The backend reports `BackendEvent`s, which the surface turns into
//!   progress updates or store transitions
//!
//! Platform-specific audio output is provided via the `AudioBackend` trait.
//!
//! # Example
//!
//! ```rust
//! use podcastr_core::Episode;
//! use podcastr_playback::{
//!     AudioBackend, BackendEvent, PlaybackConfig, PlaybackStore, PlayerSurface, Result,
//!     SurfacePhase,
//! };
//! use url::Url;
//!
//! // Implement AudioBackend for your platform
//! struct NullBackend;
//!
//! impl AudioBackend for NullBackend {
//!     fn load(&mut self, _url: &Url) -> Result<()> { Ok(()) }
//!     fn unload(&mut self) {}
//!     fn set_position(&mut self, _seconds: u64) -> Result<()> { Ok(()) }
//!     fn set_playing(&mut self, _playing: bool) -> Result<()> { Ok(()) }
//!     fn set_looping(&mut self, _looping: bool) {}
//! }
//!
//! let episode = |n: u32| Episode::new(
//!     format!("Episode {}", n),
//!     "Diego e Richard",
//!     Url::parse("https://example.com/thumb.jpg").unwrap(),
//!     1800,
//!     Url::parse(&format!("https://example.com/{}.m4a", n)).unwrap(),
//! );
//!
//! let mut store = PlaybackStore::new(PlaybackConfig::default());
//! let mut surface = PlayerSurface::new(NullBackend, &mut store)?;
//!
//! store.play_list(vec![episode(1), episode(2)], 0);
//! surface.pump()?;
//! assert_eq!(surface.phase(), SurfacePhase::Playing);
//!
//! // The backend reports the end of the first episode
//! surface.handle_event(BackendEvent::Ended, &mut store)?;
//! assert_eq!(store.state().current_index(), 1);
//! # Ok::<(), podcastr_playback::PlaybackError>(())
//! ```

mod backend;
mod error;
mod events;
mod store;
mod surface;
pub mod types;

// Public exports
pub use backend::AudioBackend;
pub use error::{PlaybackError, Result};
pub use events::{BackendEvent, StoreChange, StoreSubscription};
pub use store::PlaybackStore;
pub use surface::PlayerSurface;
pub use types::{EpisodeKey, PlaybackConfig, PlaybackState, ProgressState, SurfacePhase};
