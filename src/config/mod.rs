//! Project configuration management for `reel.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [slideshow], [music], [celebration]
//! ├── error          # ConfigError, ConfigDiagnostics
//! ├── util           # config discovery, path normalization
//! └── mod.rs         # ReelConfig (this file)
//! ```
//!
//! A missing config file is not an error: every section has defaults, so
//! a bare `slideshow/` folder is enough to run `reel play`.

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError, FieldPath};
pub use section::{CatalogSource, CelebrationConfig, MusicConfig, SlideshowConfig};

use util::{find_config_file, normalize_path};

use crate::{
    cli::{CatalogKind, Cli, Commands, DiscoverArgs},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing reel.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReelConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Slideshow discovery and timing
    #[serde(default)]
    pub slideshow: SlideshowConfig,

    /// Background music
    #[serde(default)]
    pub music: MusicConfig,

    /// Cake candles
    #[serde(default)]
    pub celebration: CelebrationConfig,
}

impl ReelConfig {
    /// Load configuration from CLI arguments.
    ///
    /// For non-Init commands, searches upward from cwd to find config file.
    /// The project root is the config file's parent directory, or cwd when
    /// no config file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        crate::logger::set_verbose(cli.verbose);

        let (config_path, exists) = Self::resolve_config_path(cli)?;

        let mut config = if exists && !cli.is_init() {
            Self::from_path(&config_path)?
        } else {
            if !cli.is_init() {
                debug!("config"; "{} not found, using defaults", cli.config.display());
            }
            Self::default()
        };

        config.config_path = config_path;
        config.finalize(cli, exists)?;

        if !cli.is_init() {
            config.validate()?;
        }

        Ok(config)
    }

    /// Resolve config file path based on command.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        match &cli.command {
            Commands::Init { name: Some(name), .. } => {
                let path = cwd.join(name).join(&cli.config);
                let exists = path.exists();
                Ok((path, exists))
            }
            Commands::Init { name: None, .. } => {
                let path = cwd.join(&cli.config);
                let exists = path.exists();
                Ok((path, exists))
            }
            _ => match find_config_file(&cli.config) {
                Some(path) => Ok((path, true)),
                None => Ok((cwd.join(&cli.config), false)),
            },
        }
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli, exists: bool) -> Result<()> {
        let root = match &cli.command {
            Commands::Init { name: Some(name), .. } => {
                std::env::current_dir().context("Failed to get current working directory")?.join(name)
            }
            _ if exists => self
                .config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            _ => std::env::current_dir().context("Failed to get current working directory")?,
        };

        self.root = normalize_path(&root);
        self.config_path = normalize_path(&self.config_path);
        self.apply_command_options(cli);
        Ok(())
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Init { .. } => {}
            Commands::Resolve { discover, .. } => self.apply_discover_args(discover),
            Commands::Play {
                discover,
                interval_ms,
                no_music,
                ..
            } => {
                self.apply_discover_args(discover);
                Self::update_option(&mut self.slideshow.interval_ms, interval_ms.as_ref());
                if *no_music {
                    self.music.enable = false;
                }
            }
        }
    }

    /// Apply discovery arguments from CLI.
    fn apply_discover_args(&mut self, args: &DiscoverArgs) {
        Self::update_option(&mut self.slideshow.dir, args.dir.as_ref());
        Self::update_option(&mut self.slideshow.probe_timeout_ms, args.timeout_ms.as_ref());

        if let Some(kind) = args.catalog {
            self.slideshow.catalog = match kind {
                CatalogKind::Builtin => CatalogSource::Builtin,
                CatalogKind::Directory => CatalogSource::Directory,
            };
        }
        if let Some(manifest) = &args.manifest {
            self.slideshow.catalog = CatalogSource::Manifest(manifest.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.slideshow.validate(&self.root, &mut diag);
        self.music.validate(&mut diag);
        self.celebration.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ReelConfig {
    let (parsed, ignored) = ReelConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_validate() {
        let config = test_parse_config("");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (_, ignored) =
            ReelConfig::parse_with_ignored("[slideshow]\nintervall_ms = 10\n[party]\nhats = 3")
                .unwrap();
        assert_eq!(ignored.len(), 2);
        assert!(ignored.iter().any(|f| f == "slideshow.intervall_ms"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(ReelConfig::parse_with_ignored("[slideshow\n").is_err());
        assert!(ReelConfig::parse_with_ignored("[slideshow]\ninterval_ms = \"fast\"").is_err());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = test_parse_config(
            "[slideshow]\ninterval_ms = 0\nprobe_timeout_ms = 0\n[celebration]\ncandles = 0",
        );
        let err = config.validate().unwrap_err();
        let ConfigError::Diagnostics(diag) = err.downcast::<ConfigError>().unwrap() else {
            panic!("expected diagnostics");
        };
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_play_args_override() {
        let cli = Cli::parse_from([
            "reel",
            "play",
            "--interval-ms",
            "500",
            "--timeout-ms",
            "100",
            "--catalog",
            "directory",
            "--dir",
            "photos",
            "--no-music",
        ]);
        let mut config = ReelConfig::default();
        config.apply_command_options(&cli);

        assert_eq!(config.slideshow.interval_ms, 500);
        assert_eq!(config.slideshow.probe_timeout_ms, 100);
        assert_eq!(config.slideshow.catalog, CatalogSource::Directory);
        assert_eq!(config.slideshow.dir, PathBuf::from("photos"));
        assert!(!config.music.enable);
    }

    #[test]
    fn test_resolve_manifest_override() {
        let cli = Cli::parse_from(["reel", "resolve", "--manifest", "photos.toml"]);
        let mut config = test_parse_config("[slideshow]\ninterval_ms = 4000");
        config.apply_command_options(&cli);

        assert_eq!(
            config.slideshow.catalog,
            CatalogSource::Manifest(PathBuf::from("photos.toml"))
        );
        // Resolve never touches timing
        assert_eq!(config.slideshow.interval_ms, 4000);
    }
}
