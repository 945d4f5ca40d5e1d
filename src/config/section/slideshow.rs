//! `[slideshow]` section configuration.
//!
//! Controls photo discovery and slide timing.
//!
//! # Example
//!
//! ```toml
//! [slideshow]
//! dir = "slideshow"              # Photo directory (relative to project root)
//! interval_ms = 3000             # Time each slide stays on screen
//! probe_timeout_ms = 2000        # Per-photo discovery deadline
//! catalog = "builtin"            # "builtin" | "directory" | { manifest = "photos.toml" }
//! ```
//!
//! The builtin catalog probes `1.jpg` … `20.jpg`, the same for `.jpeg`
//! and `.png`, then `1.gif` … `10.gif` and `1.webp` … `10.webp`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::asset::{Catalog, CatalogError};
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::resolver::DEFAULT_PROBE_TIMEOUT;
use crate::sequencer::DEFAULT_INTERVAL;

/// Where the candidate list comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Compiled-in numbered names
    #[default]
    Builtin,
    /// Every image file in `dir`
    Directory,
    /// Names listed in a TOML manifest (relative to project root)
    Manifest(PathBuf),
}

/// Slideshow settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    /// Photo directory, relative to project root.
    pub dir: PathBuf,

    /// Slide period in milliseconds.
    pub interval_ms: u64,

    /// Per-candidate probe deadline in milliseconds.
    pub probe_timeout_ms: u64,

    /// Candidate source.
    pub catalog: CatalogSource,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("slideshow"),
            interval_ms: millis(DEFAULT_INTERVAL),
            probe_timeout_ms: millis(DEFAULT_PROBE_TIMEOUT),
            catalog: CatalogSource::Builtin,
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn millis(d: Duration) -> u64 {
    d.as_millis() as u64
}

impl SlideshowConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Materialise the configured catalog.
    pub fn load_catalog(&self, root: &Path) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            CatalogSource::Builtin => Ok(Catalog::builtin(&self.dir)),
            CatalogSource::Directory => Ok(Catalog::from_directory(root, &self.dir)),
            CatalogSource::Manifest(manifest) => {
                Catalog::from_manifest(&root.join(manifest), &self.dir)
            }
        }
    }

    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if self.interval_ms == 0 {
            diag.error(
                FieldPath::new("slideshow.interval_ms"),
                "slide interval must be greater than 0",
            );
        }

        if self.probe_timeout_ms == 0 {
            diag.error_with_hint(
                FieldPath::new("slideshow.probe_timeout_ms"),
                "probe timeout must be greater than 0",
                "the default is 2000 (2 seconds)",
            );
        }

        if self.dir.is_absolute() {
            diag.error_with_hint(
                FieldPath::new("slideshow.dir"),
                format!("`{}` must be relative to the project root", self.dir.display()),
                "move the photos next to reel.toml, e.g. dir = \"slideshow\"",
            );
        }

        if let CatalogSource::Manifest(manifest) = &self.catalog
            && !root.join(manifest).is_file()
        {
            diag.error_with_hint(
                FieldPath::new("slideshow.catalog"),
                format!("manifest `{}` not found", manifest.display()),
                "create it with: images = [\"1.jpg\", \"2.jpg\"]",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_slideshow_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.slideshow.dir, PathBuf::from("slideshow"));
        assert_eq!(config.slideshow.interval(), Duration::from_secs(3));
        assert_eq!(config.slideshow.probe_timeout(), Duration::from_secs(2));
        assert_eq!(config.slideshow.catalog, CatalogSource::Builtin);
    }

    #[test]
    fn test_catalog_variants() {
        let config = test_parse_config("[slideshow]\ncatalog = \"directory\"");
        assert_eq!(config.slideshow.catalog, CatalogSource::Directory);

        let config = test_parse_config("[slideshow]\ncatalog = { manifest = \"photos.toml\" }");
        assert_eq!(
            config.slideshow.catalog,
            CatalogSource::Manifest(PathBuf::from("photos.toml"))
        );
    }

    #[test]
    fn test_partial_override() {
        let config = test_parse_config("[slideshow]\ninterval_ms = 5000");
        assert_eq!(config.slideshow.interval_ms, 5000);
        assert_eq!(config.slideshow.probe_timeout_ms, 2000);
    }

    #[test]
    fn test_validate_zero_durations() {
        let section = SlideshowConfig {
            interval_ms: 0,
            probe_timeout_ms: 0,
            ..SlideshowConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        section.validate(Path::new("."), &mut diag);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_validate_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let section = SlideshowConfig {
            catalog: CatalogSource::Manifest(PathBuf::from("photos.toml")),
            ..SlideshowConfig::default()
        };

        let mut diag = ConfigDiagnostics::new();
        section.validate(dir.path(), &mut diag);
        assert_eq!(diag.len(), 1);

        fs::write(dir.path().join("photos.toml"), "images = []").unwrap();
        let mut diag = ConfigDiagnostics::new();
        section.validate(dir.path(), &mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_load_catalog_builtin() {
        let catalog = SlideshowConfig::default()
            .load_catalog(Path::new("."))
            .unwrap();
        assert_eq!(catalog.len(), 80);
    }
}
