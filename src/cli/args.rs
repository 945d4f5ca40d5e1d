//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Reel greeting slideshow CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: reel.toml)
    #[arg(short = 'C', long, global = true, default_value = "reel.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create reel.toml and the slideshow directory
    #[command(visible_alias = "i")]
    Init {
        /// Project directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the config template instead of writing files
        #[arg(long)]
        dry: bool,
    },

    /// Discover slideshow photos and print the slide order
    #[command(visible_alias = "r")]
    Resolve {
        #[command(flatten)]
        discover: DiscoverArgs,

        /// Print the slide list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the slideshow in the terminal
    #[command(visible_alias = "p")]
    Play {
        #[command(flatten)]
        discover: DiscoverArgs,

        /// Slide period in milliseconds
        #[arg(short, long = "interval-ms")]
        interval_ms: Option<u64>,

        /// Press play immediately instead of waiting on the start screen
        #[arg(short, long)]
        autoplay: bool,

        /// Exit after this many slide changes
        #[arg(short = 'n', long)]
        ticks: Option<usize>,

        /// Disable background music
        #[arg(long)]
        no_music: bool,
    },
}

/// Candidate source selectable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// Numbered names 1.jpg, 2.jpg, ...
    Builtin,
    /// Every image in the slideshow directory
    Directory,
}

/// Shared discovery arguments for Resolve and Play commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DiscoverArgs {
    /// Candidate source
    #[arg(long, value_enum)]
    pub catalog: Option<CatalogKind>,

    /// Read candidate names from a TOML manifest
    #[arg(short, long, conflicts_with = "catalog", value_hint = clap::ValueHint::FilePath)]
    pub manifest: Option<PathBuf>,

    /// Slideshow directory (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// Per-photo probe timeout in milliseconds
    #[arg(short, long = "timeout-ms")]
    pub timeout_ms: Option<u64>,
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_play() {
        let cli = Cli::parse_from(["reel", "play", "--autoplay", "-n", "5", "--interval-ms", "1000"]);
        match cli.command {
            Commands::Play {
                autoplay,
                ticks,
                interval_ms,
                no_music,
                ..
            } => {
                assert!(autoplay);
                assert_eq!(ticks, Some(5));
                assert_eq!(interval_ms, Some(1000));
                assert!(!no_music);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_resolve_with_manifest() {
        let cli = Cli::parse_from(["reel", "-v", "resolve", "--manifest", "photos.toml", "--json"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Resolve { discover, json } => {
                assert!(json);
                assert_eq!(discover.manifest, Some(PathBuf::from("photos.toml")));
                assert_eq!(discover.catalog, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_manifest_conflicts_with_catalog() {
        let result = Cli::try_parse_from([
            "reel",
            "resolve",
            "--catalog",
            "directory",
            "--manifest",
            "photos.toml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_init() {
        let cli = Cli::parse_from(["reel", "init", "party"]);
        assert!(cli.is_init());
    }
}
