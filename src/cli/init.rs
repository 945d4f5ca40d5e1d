//! Project initialization.
//!
//! Writes a commented `reel.toml` and the directories it points at.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

use crate::{config::ReelConfig, log};

/// Directories created next to `reel.toml`.
const PROJECT_DIRS: &[&str] = &["slideshow", "music"];

/// Initialization mode determines validation rules.
#[derive(Debug, Clone, Copy)]
pub enum InitMode {
    /// `reel init` - initialize in current directory (must not hold a config)
    CurrentDir,
    /// `reel init <name>` - create new subdirectory (must not exist)
    NewDir,
}

/// Create a new greeting project.
///
/// If `dry_run` is true, only prints the config template to stdout
pub fn new_project(config: &ReelConfig, has_name: bool, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", generate_config_template());
        return Ok(());
    }

    let root = config.get_root();
    let mode = if has_name {
        InitMode::NewDir
    } else {
        InitMode::CurrentDir
    };

    validate_target(root, &config.config_path, mode)?;
    create_structure(root)?;

    fs::write(&config.config_path, generate_config_template())
        .with_context(|| format!("Failed to write '{}'", config.config_path.display()))?;

    log!("init"; "created {}", config.config_path.display());
    log!("init"; "drop photos named 1.jpg, 2.jpg, ... into slideshow/ and run `reel play`");
    Ok(())
}

/// Generate reel.toml content with comments
pub fn generate_config_template() -> String {
    format!(
        r##"# Reel configuration file (v{version})

[slideshow]
dir = "slideshow"              # Photo directory (relative to this file)
interval_ms = 3000             # Time each slide stays on screen
probe_timeout_ms = 2000        # Per-photo discovery deadline
catalog = "builtin"            # "builtin" | "directory" | {{ manifest = "photos.toml" }}

[music]
enable = true
track = "music/birthday.mp3"

[celebration]
candles = 3                    # 1-9, blown out with keys 1..9 during `reel play`
"##,
        version = env!("CARGO_PKG_VERSION")
    )
}

/// Validate target directory for initialization.
fn validate_target(root: &Path, config_path: &Path, mode: InitMode) -> Result<()> {
    match mode {
        InitMode::CurrentDir => {
            if config_path.exists() {
                bail!(
                    "'{}' already exists.\n\
                     Use `reel init <name>` to create in a new subdirectory.",
                    config_path.display()
                );
            }
        }
        InitMode::NewDir => {
            if root.exists() {
                bail!(
                    "Directory '{}' already exists.\n\
                     Choose a different name or remove the existing directory.",
                    root.display()
                );
            }
        }
    }
    Ok(())
}

/// Create project directory structure at the given root.
fn create_structure(root: &Path) -> Result<()> {
    for dir in PROJECT_DIRS {
        let path = root.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))?;
    }
    Ok(())
}
