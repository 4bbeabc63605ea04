//! Error types for playback

use thiserror::Error;

/// Playback errors
///
/// Store operations never fail; errors only come from the audio backend.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The audio backend rejected a command
    #[error("Audio backend error: {0}")]
    Backend(String),

    /// The audio backend could not open a source
    #[error("Failed to load {url}: {reason}")]
    Load { url: String, reason: String },
}

impl PlaybackError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a load error
    pub fn load(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Load {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
