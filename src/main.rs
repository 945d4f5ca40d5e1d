//! Reel - a birthday greeting slideshow for the terminal.

mod asset;
mod cli;
mod config;
mod core;
mod logger;
mod probe;
mod resolver;
mod sequencer;
mod session;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, play::PlayOptions};
use config::ReelConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = ReelConfig::load(&cli)?;

    match &cli.command {
        Commands::Init { name, dry } => cli::init::new_project(&config, name.is_some(), *dry),
        Commands::Resolve { json, .. } => cli::resolve::run_resolve(&config, *json),
        Commands::Play {
            autoplay, ticks, ..
        } => cli::play::run_play(
            &config,
            PlayOptions {
                autoplay: *autoplay,
                ticks: *ticks,
            },
        ),
    }
}
