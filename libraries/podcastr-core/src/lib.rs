//! Podcastr Core
//!
//! Platform-agnostic episode types, feed records and display helpers for Podcastr.
//!
//! This crate provides the data that flows into the player:
//! - **Domain Types**: `Episode` (what the player plays) and `EpisodeListing` (what a list shows)
//! - **Feed Records**: the raw `EpisodeRecord` shape served by the content API
//! - **Feed Source**: the `EpisodeSource` trait and a JSON file implementation
//! - **Formatting**: `HH:MM:SS` durations and short publish dates
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use podcastr_core::{format_duration, Episode};
//! use url::Url;
//!
//! let episode = Episode::new(
//!     "Faladev #30",
//!     "Diego e Richard",
//!     Url::parse("https://example.com/thumb.jpg").unwrap(),
//!     3981,
//!     Url::parse("https://example.com/audio.m4a").unwrap(),
//! );
//!
//! assert_eq!(format_duration(episode.duration), "01:06:21");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod episode;
pub mod error;
pub mod feed;
pub mod format;

// Re-export commonly used types
pub use episode::{Episode, EpisodeFile, EpisodeListing, EpisodeRecord};
pub use error::{CoreError, Result};
pub use feed::{EpisodeFeed, EpisodeSource, FeedQuery, JsonFileSource};
pub use format::{format_duration, format_published_at};
