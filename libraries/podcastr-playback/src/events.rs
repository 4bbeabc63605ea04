//! Playback Events
//!
//! Two event streams meet at the player surface:
//! - `StoreChange`: published by `PlaybackStore` after every state transition
//! - `BackendEvent`: reported by the audio backend (metadata, ticks, end, play/pause)

use crate::types::PlaybackState;
use crossbeam_channel::{Receiver, TryRecvError};
use serde::{Deserialize, Serialize};

/// A state transition published by the store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreChange {
    /// Store revision after the transition (starts at 1, increases by 1)
    pub revision: u64,

    /// State after the transition
    pub state: PlaybackState,
}

/// Events emitted by the audio backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BackendEvent {
    /// Source metadata (duration etc.) is available
    MetadataReady,

    /// Periodic position report, at whatever granularity the backend uses
    TimeUpdate {
        /// Current playback position in seconds
        position_secs: f64,
    },

    /// The source played to its end (never fires while looping)
    Ended,

    /// The backend started playing, whoever asked for it
    Played,

    /// The backend paused, whoever asked for it
    Paused,
}

/// Receiving end of a store subscription
///
/// Changes queue up until drained; dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct StoreSubscription {
    receiver: Receiver<StoreChange>,
}

impl StoreSubscription {
    pub(crate) fn new(receiver: Receiver<StoreChange>) -> Self {
        Self { receiver }
    }

    /// Take the oldest pending change, if any
    pub fn try_next(&self) -> Option<StoreChange> {
        match self.receiver.try_recv() {
            Ok(change) => Some(change),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Take every pending change, oldest first
    pub fn drain(&self) -> Vec<StoreChange> {
        self.receiver.try_iter().collect()
    }

    /// Number of pending changes
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}
