//! Presentation session state.
//!
//! One [`Session`] per greeting shown. It owns the resolved slides, the
//! one-shot play button, the music flag and the cake.
//!
//! ```text
//! Session
//! ├── assets     Arc<AssetSet>      (read-only)
//! ├── sequencer  SequencerHandle    (play / pause / resume)
//! ├── music      MusicState         (playing flag, presenter plays audio)
//! └── cake       Cake               (candles → celebration)
//! ```

mod cake;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::asset::AssetSet;
use crate::sequencer::{Playback, PositionChanged, SequencerActor, SequencerClosed, SequencerHandle};

pub use cake::{BlowOutcome, Cake, DEFAULT_CANDLES};

/// Result of pressing the play button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    AlreadyPlaying,
}

/// Background music flag. Audio itself belongs to the presenter.
#[derive(Debug, Clone, Default)]
pub struct MusicState {
    track: Option<PathBuf>,
    playing: bool,
}

impl MusicState {
    /// Music with a track to play.
    pub fn with_track(track: impl Into<PathBuf>) -> Self {
        Self {
            track: Some(track.into()),
            playing: false,
        }
    }

    /// No music for this session.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn track(&self) -> Option<&PathBuf> {
        self.track.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn set_playing(&mut self, playing: bool) -> bool {
        self.playing = playing && self.track.is_some();
        self.playing
    }
}

/// State of one greeting presentation.
pub struct Session {
    assets: Arc<AssetSet>,
    sequencer: SequencerHandle,
    music: MusicState,
    cake: Cake,
    /// Last playback state reported by the sequencer
    playback: Playback,
}

impl Session {
    pub fn new(
        assets: Arc<AssetSet>,
        sequencer: SequencerHandle,
        music: MusicState,
        cake: Cake,
    ) -> Self {
        Self {
            assets,
            sequencer,
            music,
            cake,
            playback: Playback::Stopped,
        }
    }

    /// Spawn a sequencer for `assets` and build a session around it.
    ///
    /// Returns the session, the position-changed stream for the presenter
    /// and the sequencer task.
    pub fn open(
        assets: Arc<AssetSet>,
        period: Duration,
        music: MusicState,
        cake: Cake,
    ) -> (Self, mpsc::Receiver<PositionChanged>, JoinHandle<()>) {
        let (handle, events, task) = SequencerActor::spawn(Arc::clone(&assets), period);
        (Self::new(assets, handle, music, cake), events, task)
    }

    /// The play button: starts the slideshow and the music, once.
    pub async fn play(&mut self) -> Result<PlayOutcome, SequencerClosed> {
        if self.has_started() {
            return Ok(PlayOutcome::AlreadyPlaying);
        }
        self.playback = self.sequencer.start().await?;
        self.music.set_playing(true);
        crate::debug!("session"; "play: {} slides", self.assets.len());
        Ok(PlayOutcome::Started)
    }

    /// The pause/resume button. `None` before play has been pressed.
    pub async fn toggle_pause(&mut self) -> Result<Option<Playback>, SequencerClosed> {
        self.playback = match self.playback {
            Playback::Stopped => return Ok(None),
            Playback::Running => self.sequencer.pause().await?,
            Playback::Paused => self.sequencer.resume().await?,
        };
        Ok(Some(self.playback))
    }

    /// The music button. Returns whether music is now playing.
    ///
    /// Music only starts from the play button, so this is a no-op before it.
    pub fn toggle_music(&mut self) -> bool {
        if !self.has_started() {
            return false;
        }
        let playing = !self.music.is_playing();
        self.music.set_playing(playing)
    }

    fn has_started(&self) -> bool {
        self.playback != Playback::Stopped
    }

    pub fn blow_candle(&mut self, index: usize) -> BlowOutcome {
        self.cake.blow(index)
    }

    /// Stop the sequencer actor.
    pub async fn close(self) {
        self.sequencer.shutdown().await;
    }

    pub fn music(&self) -> &MusicState {
        &self.music
    }

    pub fn cake(&self) -> &Cake {
        &self.cake
    }
}
