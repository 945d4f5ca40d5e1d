//! `[music]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [music]
//! enable = true                       # Start music when play is pressed
//! track = "music/birthday.mp3"        # Relative to project root
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::session::MusicState;

/// Background music settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    pub enable: bool,
    pub track: PathBuf,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            enable: true,
            track: PathBuf::from("music/birthday.mp3"),
        }
    }
}

impl MusicConfig {
    /// Initial music state for a session.
    pub fn state(&self) -> MusicState {
        if self.enable {
            MusicState::with_track(&self.track)
        } else {
            MusicState::disabled()
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.enable && self.track.as_os_str().is_empty() {
            diag.error_with_hint(
                FieldPath::new("music.track"),
                "music is enabled but no track is set",
                "set `track` or `enable = false`",
            );
        }
    }

    /// Whether the configured track exists under `root`.
    pub fn track_exists(&self, root: &Path) -> bool {
        root.join(&self.track).is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_music_defaults() {
        let config = test_parse_config("");
        assert!(config.music.enable);
        assert_eq!(config.music.track, PathBuf::from("music/birthday.mp3"));
        assert!(config.music.state().track().is_some());
    }

    #[test]
    fn test_music_disabled() {
        let config = test_parse_config("[music]\nenable = false");
        assert!(config.music.state().track().is_none());
    }

    #[test]
    fn test_validate_empty_track() {
        let config = test_parse_config("[music]\ntrack = \"\"");
        let mut diag = ConfigDiagnostics::new();
        config.music.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
