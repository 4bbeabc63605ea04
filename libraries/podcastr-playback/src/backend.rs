//! Platform-agnostic audio backend trait
//!
//! Abstracts the streaming audio element the player surface drives.

use crate::error::Result;
use url::Url;

/// Platform-agnostic audio backend
///
/// The surface sends commands through this trait; the backend reports what
/// actually happens as [`BackendEvent`]s, which the platform glue forwards to
/// `PlayerSurface::handle_event`.
///
/// Event contract for implementors:
/// - `MetadataReady` once per `load`, before any `TimeUpdate` for that source
/// - `TimeUpdate` at the backend's native granularity while playing
/// - `Ended` when a source plays out (never while looping is on); a `Paused`
///   just before it is fine
/// - `Played` / `Paused` whenever playback starts or stops, whoever caused it
///
/// [`BackendEvent`]: crate::BackendEvent
pub trait AudioBackend {
    /// Open a new source, replacing the current one
    fn load(&mut self, url: &Url) -> Result<()>;

    /// Drop the current source
    fn unload(&mut self);

    /// Move the playback cursor
    fn set_position(&mut self, seconds: u64) -> Result<()>;

    /// Start or pause playback
    fn set_playing(&mut self, playing: bool) -> Result<()>;

    /// Loop the current source at its end
    fn set_looping(&mut self, looping: bool);
}

/// Command recorded by `RecordingBackend`
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    Load(String),
    Unload,
    SetPosition(u64),
    SetPlaying(bool),
    SetLooping(bool),
}

/// Backend that records every command, for testing
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub commands: Vec<BackendCommand>,
    pub fail_load: bool,
}

#[cfg(test)]
impl RecordingBackend {
    /// Take recorded commands, leaving the log empty
    pub fn take(&mut self) -> Vec<BackendCommand> {
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
impl AudioBackend for RecordingBackend {
    fn load(&mut self, url: &Url) -> Result<()> {
        if self.fail_load {
            return Err(crate::error::PlaybackError::load(url.as_str(), "unreachable"));
        }
        self.commands.push(BackendCommand::Load(url.to_string()));
        Ok(())
    }

    fn unload(&mut self) {
        self.commands.push(BackendCommand::Unload);
    }

    fn set_position(&mut self, seconds: u64) -> Result<()> {
        self.commands.push(BackendCommand::SetPosition(seconds));
        Ok(())
    }

    fn set_playing(&mut self, playing: bool) -> Result<()> {
        self.commands.push(BackendCommand::SetPlaying(playing));
        Ok(())
    }

    fn set_looping(&mut self, looping: bool) {
        self.commands.push(BackendCommand::SetLooping(looping));
    }
}
