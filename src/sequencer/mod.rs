//! Slide sequencing over a resolved [`AssetSet`].
//!
//! [`Sequencer`] is the pure state machine. [`SequencerActor`] owns one and
//! drives it from a fixed-period timer; [`SequencerHandle`] is what the
//! presentation layer holds.
//!
//! ```text
//!            start()           pause()
//! Stopped ───────────► Running ───────► Paused
//!                        ▲  │  ◄───────
//!                        └──┘ resume()
//!                      advance() on every tick, position = (position + 1) % len
//! ```

mod actor;
mod messages;

use std::sync::Arc;

use crate::asset::{Asset, AssetSet};

pub use actor::{DEFAULT_INTERVAL, SequencerActor, SequencerClosed, SequencerHandle};
pub use messages::PositionChanged;

/// Lifecycle state of the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Stopped,
    Running,
    Paused,
}

/// Position bookkeeping for the slideshow.
///
/// Only its own operations mutate it. Transitions that do not apply to the
/// current state are silent no-ops reported through the `bool` return.
#[derive(Debug)]
pub struct Sequencer {
    assets: Arc<AssetSet>,
    position: usize,
    playback: Playback,
}

impl Sequencer {
    pub fn new(assets: Arc<AssetSet>) -> Self {
        Self {
            assets,
            position: 0,
            playback: Playback::Stopped,
        }
    }

    /// Stopped → Running. One-shot: returns `false` once started.
    pub fn start(&mut self) -> bool {
        if self.playback != Playback::Stopped {
            return false;
        }
        self.playback = Playback::Running;
        true
    }

    /// Running → Paused.
    pub fn pause(&mut self) -> bool {
        if self.playback != Playback::Running {
            return false;
        }
        self.playback = Playback::Paused;
        true
    }

    /// Paused → Running.
    pub fn resume(&mut self) -> bool {
        if self.playback != Playback::Paused {
            return false;
        }
        self.playback = Playback::Running;
        true
    }

    /// Move to the next slide, wrapping after the wish slide.
    pub fn advance(&mut self) -> PositionChanged {
        self.position = (self.position + 1) % self.assets.len();
        self.current()
    }

    /// Notification describing the slide at the current position.
    pub fn current(&self) -> PositionChanged {
        let asset = self
            .assets
            .get(self.position)
            .cloned()
            .unwrap_or(Asset::Wish);
        PositionChanged {
            index: self.position,
            len: self.assets.len(),
            asset,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }
}
