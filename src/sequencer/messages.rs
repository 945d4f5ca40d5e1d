//! Sequencer message definitions.
//!
//! ```text
//! Presenter --SequencerMsg--> SequencerActor --PositionChanged--> Presenter
//!     ^                             |
//!     +---------[Playback]----------+  (reply to each control)
//! ```

use tokio::sync::oneshot;

use super::Playback;
use crate::asset::Asset;

/// Playback controls issued by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Begin periodic advancing (one-shot)
    Start,
    Pause,
    Resume,
}

/// Messages to the sequencer actor.
#[derive(Debug)]
pub enum SequencerMsg {
    /// Apply a control and reply with the resulting playback state
    Control {
        control: Control,
        reply: oneshot::Sender<Playback>,
    },
    Shutdown,
}

/// Emitted after every advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionChanged {
    /// New position in the asset set
    pub index: usize,
    /// Length of the asset set
    pub len: usize,
    /// Slide at `index`
    pub asset: Asset,
}

impl PositionChanged {
    pub fn is_wish(&self) -> bool {
        self.asset.is_wish()
    }
}
