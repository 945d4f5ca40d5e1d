//! Sequencer Actor - timer-driven slide advancing
//!
//! The actor owns the [`Sequencer`] outright; nothing else can touch the
//! position. Controls and ticks are interleaved by a single `select!` loop,
//! so a tick never overlaps another tick or a control.
//!
//! ```text
//! SequencerHandle --[Control]--> SequencerActor --[PositionChanged]--> Presenter
//!                                     ^
//!                              interval (Running only)
//! ```

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use super::messages::{Control, PositionChanged, SequencerMsg};
use super::{Playback, Sequencer};
use crate::asset::AssetSet;

/// Default slide period.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

const CHANNEL_BUFFER: usize = 32;

/// The sequencer actor is gone (shut down or its presenter hung up).
#[derive(Debug, Error)]
#[error("sequencer has stopped")]
pub struct SequencerClosed;

/// Sequencer Actor - owns slide position and the periodic trigger
pub struct SequencerActor {
    /// Channel to receive controls
    rx: mpsc::Receiver<SequencerMsg>,
    /// Position-changed notifications to the presenter
    events: mpsc::Sender<PositionChanged>,
    sequencer: Sequencer,
    period: Duration,
}

impl SequencerActor {
    pub fn new(
        rx: mpsc::Receiver<SequencerMsg>,
        events: mpsc::Sender<PositionChanged>,
        assets: Arc<AssetSet>,
        period: Duration,
    ) -> Self {
        Self {
            rx,
            events,
            sequencer: Sequencer::new(assets),
            period,
        }
    }

    /// Wire up channels and spawn the actor on the current runtime.
    pub fn spawn(
        assets: Arc<AssetSet>,
        period: Duration,
    ) -> (
        SequencerHandle,
        mpsc::Receiver<PositionChanged>,
        JoinHandle<()>,
    ) {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER);
        let (events_tx, events_rx) = mpsc::channel(CHANNEL_BUFFER);

        let actor = Self::new(rx, events_tx, assets, period);
        let task = tokio::spawn(actor.run());

        (SequencerHandle::new(tx), events_rx, task)
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        let mut ticker = self.ticker();

        loop {
            let running = self.sequencer.playback() == Playback::Running;

            tokio::select! {
                msg = self.rx.recv() => match msg {
                    Some(SequencerMsg::Control { control, reply }) => {
                        self.apply(control, &mut ticker);
                        let _ = reply.send(self.sequencer.playback());
                    }
                    Some(SequencerMsg::Shutdown) | None => break,
                },

                _ = ticker.tick(), if running => {
                    let changed = self.sequencer.advance();
                    crate::debug!("sequencer"; "advance to {}/{}", changed.index + 1, changed.len);
                    if self.events.send(changed).await.is_err() {
                        crate::debug!("sequencer"; "presenter gone, stopping");
                        break;
                    }
                }
            }
        }

        crate::debug!("sequencer"; "stopped at {}", self.sequencer.position());
    }

    /// First tick lands one full period from now, like `setInterval`.
    fn ticker(&self) -> Interval {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    fn apply(&mut self, control: Control, ticker: &mut Interval) {
        let changed = match control {
            Control::Start => self.sequencer.start(),
            Control::Pause => self.sequencer.pause(),
            Control::Resume => self.sequencer.resume(),
        };

        // Entering Running re-arms the trigger with a full period
        if changed && self.sequencer.playback() == Playback::Running {
            ticker.reset();
        }
    }
}

/// Cloneable façade used by the presentation layer.
#[derive(Debug, Clone)]
pub struct SequencerHandle {
    tx: mpsc::Sender<SequencerMsg>,
}

impl SequencerHandle {
    pub fn new(tx: mpsc::Sender<SequencerMsg>) -> Self {
        Self { tx }
    }

    pub async fn start(&self) -> Result<Playback, SequencerClosed> {
        self.control(Control::Start).await
    }

    pub async fn pause(&self) -> Result<Playback, SequencerClosed> {
        self.control(Control::Pause).await
    }

    pub async fn resume(&self) -> Result<Playback, SequencerClosed> {
        self.control(Control::Resume).await
    }

    pub async fn shutdown(&self) {
        let _ = self.tx.send(SequencerMsg::Shutdown).await;
    }

    async fn control(&self, control: Control) -> Result<Playback, SequencerClosed> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SequencerMsg::Control { control, reply })
            .await
            .map_err(|_| SequencerClosed)?;
        rx.await.map_err(|_| SequencerClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const PERIOD: Duration = Duration::from_secs(3);

    fn set_of(photos: usize) -> Arc<AssetSet> {
        Arc::new(AssetSet::from_confirmed(
            (0..photos)
                .map(|i| (i, PathBuf::from(format!("{}.jpg", i + 1))))
                .collect(),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_before_start() {
        let (_handle, mut events, _task) = SequencerActor::spawn(set_of(3), PERIOD);

        let waited = tokio::time::timeout(PERIOD * 5, events.recv()).await;
        assert!(waited.is_err(), "stopped sequencer must not tick");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_every_period_after_start() {
        let (handle, mut events, _task) = SequencerActor::spawn(set_of(3), PERIOD);

        let started = Instant::now();
        assert_eq!(handle.start().await.unwrap(), Playback::Running);

        let mut positions = Vec::new();
        for n in 1..=4u32 {
            let changed = events.recv().await.unwrap();
            assert_eq!(started.elapsed(), PERIOD * n);
            positions.push(changed.index);
        }
        assert_eq!(positions, vec![1, 2, 3, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_one_shot() {
        let (handle, mut events, _task) = SequencerActor::spawn(set_of(2), PERIOD);

        handle.start().await.unwrap();
        assert_eq!(events.recv().await.unwrap().index, 1);

        // A second start neither restarts nor resets the position
        assert_eq!(handle.start().await.unwrap(), Playback::Running);
        assert_eq!(events.recv().await.unwrap().index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_resume_keeps_position() {
        let (handle, mut events, _task) = SequencerActor::spawn(set_of(4), PERIOD);

        handle.start().await.unwrap();
        assert_eq!(events.recv().await.unwrap().index, 1);
        assert_eq!(events.recv().await.unwrap().index, 2);

        assert_eq!(handle.pause().await.unwrap(), Playback::Paused);
        let waited = tokio::time::timeout(PERIOD * 4, events.recv()).await;
        assert!(waited.is_err(), "paused sequencer must not tick");

        let resumed = Instant::now();
        assert_eq!(handle.resume().await.unwrap(), Playback::Running);
        let changed = events.recv().await.unwrap();
        assert_eq!(changed.index, 3, "no skipped or repeated position");
        assert_eq!(resumed.elapsed(), PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn test_controls_reply_with_playback() {
        let (handle, _events, _task) = SequencerActor::spawn(set_of(1), PERIOD);

        // Out-of-state controls are no-ops
        assert_eq!(handle.pause().await.unwrap(), Playback::Stopped);
        assert_eq!(handle.resume().await.unwrap(), Playback::Stopped);
        handle.start().await.unwrap();
        assert_eq!(handle.resume().await.unwrap(), Playback::Running);
        assert_eq!(handle.pause().await.unwrap(), Playback::Paused);
        assert_eq!(handle.pause().await.unwrap(), Playback::Paused);
        assert_eq!(handle.resume().await.unwrap(), Playback::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wish_only_repeats_slide() {
        let (handle, mut events, _task) =
            SequencerActor::spawn(Arc::new(AssetSet::wish_only()), PERIOD);

        handle.start().await.unwrap();
        for _ in 0..3 {
            let changed = events.recv().await.unwrap();
            assert_eq!(changed.index, 0);
            assert!(changed.is_wish());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_closes_handle() {
        let (handle, mut events, task) = SequencerActor::spawn(set_of(2), PERIOD);

        handle.shutdown().await;
        task.await.unwrap();

        assert!(handle.start().await.is_err());
        assert!(events.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_presenter_drop_stops_actor() {
        let (handle, events, task) = SequencerActor::spawn(set_of(2), PERIOD);

        handle.start().await.unwrap();
        drop(events);
        task.await.unwrap();
        assert!(handle.pause().await.is_err());
    }
}
