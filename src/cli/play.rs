//! `reel play`: the terminal presenter.
//!
//! Resolves the slides, opens a [`Session`] and renders every position
//! change on a single overwriting status line. Buttons are typed on stdin:
//!
//! ```text
//! <Enter> | play   press play (one-shot)
//! p                pause / resume
//! m                music on / off
//! 1..9             blow out a candle
//! q                quit
//! ```

use std::io::BufRead;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use crate::asset::AssetSet;
use crate::config::ReelConfig;
use crate::core::{is_shutdown, register_shutdown};
use crate::logger::{status_paused, status_slide, status_wish};
use crate::sequencer::{Playback, PositionChanged};
use crate::session::{BlowOutcome, Cake, PlayOutcome, Session};
use crate::{debug, log};

use super::common::{build_runtime, configured_resolver};

const WISH_MESSAGE: &str = "Happy Birthday! May all your dreams come true!";

/// How often the presenter checks for Ctrl+C.
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// A button pressed on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    TogglePause,
    ToggleMusic,
    Blow(usize),
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" | "play" => Some(Self::Play),
            "p" | "pause" => Some(Self::TogglePause),
            "m" | "music" => Some(Self::ToggleMusic),
            "q" | "quit" => Some(Self::Quit),
            other => match other.parse::<usize>() {
                Ok(n @ 1..=9) => Some(Self::Blow(n - 1)),
                _ => None,
            },
        }
    }
}

/// Options for one presenter run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayOptions {
    pub autoplay: bool,
    pub ticks: Option<usize>,
}

pub fn run_play(config: &ReelConfig, options: PlayOptions) -> Result<()> {
    let rt = build_runtime()?;
    let shutdown_rx = register_shutdown();
    rt.block_on(present(config, options, shutdown_rx))
}

/// Channels the presenter loop listens on.
struct Inputs {
    events: mpsc::Receiver<PositionChanged>,
    commands: mpsc::Receiver<Command>,
    shutdown_rx: Option<Receiver<()>>,
}

/// Why the presenter loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Ticks,
    Quit,
    Shutdown,
    SequencerGone,
}

async fn present(
    config: &ReelConfig,
    options: PlayOptions,
    shutdown_rx: Option<Receiver<()>>,
) -> Result<()> {
    let assets = configured_resolver(config)?.resolve().await;
    log!("play"; "{} photos ready", assets.photo_count());
    if assets.is_empty_of_photos() {
        log!("play"; "no photos found, add 1.jpg, 2.jpg, ... to {}",
            config.slideshow.dir.display());
    }

    let music = config.music.state();
    if config.music.enable && !config.music.track_exists(config.get_root()) {
        debug!("music"; "track {} not found", config.music.track.display());
    }

    let (mut session, events, task) = Session::open(
        Arc::clone(&assets),
        config.slideshow.interval(),
        music,
        config.celebration.cake(),
    );

    if options.autoplay {
        press_play(&mut session, &assets).await?;
    } else {
        log!("play"; "press Enter to start (p pause, m music, 1-{} candles, q quit)",
            session.cake().total());
    }

    let mut inputs = Inputs {
        events,
        commands: spawn_stdin_reader(),
        shutdown_rx,
    };
    let exit = drive(&mut session, &assets, &mut inputs, options.ticks).await?;
    debug!("play"; "stopping: {:?}", exit);

    session.close().await;
    let _ = tokio::time::timeout(Duration::from_millis(500), task).await;
    Ok(())
}

/// Render slides and dispatch buttons until something ends the show.
async fn drive(
    session: &mut Session,
    assets: &AssetSet,
    inputs: &mut Inputs,
    ticks: Option<usize>,
) -> Result<Exit> {
    let mut stdin_open = true;
    let mut current = 0;
    let mut shown = 0;
    let mut poll = tokio::time::interval(SHUTDOWN_POLL);

    loop {
        tokio::select! {
            changed = inputs.events.recv() => {
                let Some(changed) = changed else {
                    return Ok(Exit::SequencerGone);
                };
                current = changed.index;
                render(&changed, assets);
                shown += 1;
                if ticks.is_some_and(|n| shown >= n) {
                    return Ok(Exit::Ticks);
                }
            }
            cmd = inputs.commands.recv(), if stdin_open => match cmd {
                Some(Command::Quit) => return Ok(Exit::Quit),
                Some(cmd) => handle(cmd, session, assets, current).await?,
                None => stdin_open = false,
            },
            _ = poll.tick() => {
                let signalled = inputs
                    .shutdown_rx
                    .as_ref()
                    .is_some_and(|rx| rx.try_recv().is_ok());
                if signalled || is_shutdown() {
                    return Ok(Exit::Shutdown);
                }
            }
        }
    }
}

/// Forward stdin lines as commands. Ends when stdin closes.
fn spawn_stdin_reader() -> mpsc::Receiver<Command> {
    let (tx, rx) = mpsc::channel(8);
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match Command::parse(&line) {
                Some(cmd) => {
                    if tx.blocking_send(cmd).is_err() {
                        break;
                    }
                }
                None => log!("play"; "unknown command `{}`", line.trim()),
            }
        }
    });
    rx
}

async fn press_play(session: &mut Session, assets: &AssetSet) -> Result<()> {
    match session.play().await? {
        PlayOutcome::Started => {
            if let Some(track) = session.music().track().filter(|_| session.music().is_playing()) {
                log!("music"; "playing {}", track.display());
            }
            render_index(0, assets);
        }
        PlayOutcome::AlreadyPlaying => debug!("play"; "already playing"),
    }
    Ok(())
}

async fn handle(
    cmd: Command,
    session: &mut Session,
    assets: &AssetSet,
    current: usize,
) -> Result<()> {
    match cmd {
        Command::Play => press_play(session, assets).await?,
        Command::TogglePause => match session.toggle_pause().await? {
            Some(Playback::Paused) => status_paused(&slide_label(current, assets.len())),
            Some(_) => render_index(current, assets),
            None => log!("play"; "press Enter to start first"),
        },
        Command::ToggleMusic => {
            let state = if session.toggle_music() { "on" } else { "off" };
            log!("music"; "{}", state);
        }
        Command::Blow(index) => {
            let outcome = session.blow_candle(index);
            let cake = session.cake();
            match outcome {
                BlowOutcome::Blown { remaining } => {
                    log!("cake"; "{}  candle {} out, {} to go", candle_row(cake), index + 1, remaining);
                }
                BlowOutcome::Celebrate => {
                    log!("cake"; "{}  all {} candles out! make a wish 🎉", candle_row(cake), cake.blown());
                }
                BlowOutcome::AlreadyOut => log!("cake"; "candle {} is already out", index + 1),
                BlowOutcome::NoSuchCandle => {
                    log!("cake"; "there are only {} candles", cake.total());
                }
            }
        }
        Command::Quit => {}
    }
    Ok(())
}

/// One glyph per candle: lit or blown out.
fn candle_row(cake: &Cake) -> String {
    (0..cake.total())
        .map(|i| if cake.is_lit(i) { "🕯" } else { "·" })
        .collect::<Vec<_>>()
        .join(" ")
}

fn slide_label(index: usize, len: usize) -> String {
    format!("slide {}/{}", index + 1, len)
}

fn render(changed: &PositionChanged, assets: &AssetSet) {
    let label = slide_label(changed.index, changed.len);
    if changed.is_wish() {
        status_wish(&label, WISH_MESSAGE);
        return;
    }
    let caption = assets.caption(changed.index).unwrap_or_default();
    let path = changed
        .asset
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    status_slide(&label, &format!("{caption}  {path}"));
}

fn render_index(index: usize, assets: &AssetSet) {
    if let Some(asset) = assets.get(index) {
        let changed = PositionChanged {
            index,
            len: assets.len(),
            asset: asset.clone(),
        };
        render(&changed, assets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MusicState;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(""), Some(Command::Play));
        assert_eq!(Command::parse("play\n"), Some(Command::Play));
        assert_eq!(Command::parse(" p "), Some(Command::TogglePause));
        assert_eq!(Command::parse("m"), Some(Command::ToggleMusic));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("1"), Some(Command::Blow(0)));
        assert_eq!(Command::parse("9"), Some(Command::Blow(8)));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Command::parse("0"), None);
        assert_eq!(Command::parse("10"), None);
        assert_eq!(Command::parse("dance"), None);
    }

    #[test]
    fn test_slide_label() {
        assert_eq!(slide_label(0, 4), "slide 1/4");
        assert_eq!(slide_label(3, 4), "slide 4/4");
    }

    #[test]
    fn test_candle_row() {
        let mut cake = Cake::new(3);
        assert_eq!(candle_row(&cake), "🕯 🕯 🕯");
        cake.blow(1);
        assert_eq!(candle_row(&cake), "🕯 · 🕯");
    }

    const PERIOD: Duration = Duration::from_secs(3);

    fn assets() -> Arc<AssetSet> {
        Arc::new(AssetSet::from_confirmed(vec![
            (0, "slideshow/1.jpg".into()),
            (1, "slideshow/2.jpg".into()),
        ]))
    }

    fn open_session() -> (Session, mpsc::Receiver<PositionChanged>) {
        let (session, events, _task) = Session::open(
            assets(),
            PERIOD,
            MusicState::disabled(),
            Cake::default(),
        );
        (session, events)
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_stops_when_sequencer_and_stdin_are_gone() {
        let (mut session, _events) = open_session();
        let (events_tx, events) = mpsc::channel(1);
        let (commands_tx, commands) = mpsc::channel(1);
        drop(events_tx);
        drop(commands_tx);
        let mut inputs = Inputs {
            events,
            commands,
            shutdown_rx: None,
        };

        let exit = tokio::time::timeout(
            Duration::from_secs(60),
            drive(&mut session, &assets(), &mut inputs, None),
        )
        .await
        .expect("loop kept running with nothing left to do");
        assert_eq!(exit.unwrap(), Exit::SequencerGone);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_stops_after_ticks() {
        let (mut session, events) = open_session();
        let (_commands_tx, commands) = mpsc::channel(1);
        let mut inputs = Inputs {
            events,
            commands,
            shutdown_rx: None,
        };
        session.play().await.unwrap();

        let started = tokio::time::Instant::now();
        let exit = drive(&mut session, &assets(), &mut inputs, Some(2)).await;
        assert_eq!(exit.unwrap(), Exit::Ticks);
        assert_eq!(started.elapsed(), PERIOD * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_quit_and_shutdown_signal() {
        let (mut session, events) = open_session();
        let (commands_tx, commands) = mpsc::channel(1);
        let mut inputs = Inputs {
            events,
            commands,
            shutdown_rx: None,
        };
        commands_tx.send(Command::Quit).await.unwrap();
        let exit = drive(&mut session, &assets(), &mut inputs, None).await;
        assert_eq!(exit.unwrap(), Exit::Quit);

        let (tx, rx) = crossbeam::channel::bounded(1);
        inputs.shutdown_rx = Some(rx);
        tx.send(()).unwrap();
        let exit = drive(&mut session, &assets(), &mut inputs, None).await;
        assert_eq!(exit.unwrap(), Exit::Shutdown);
    }
}
