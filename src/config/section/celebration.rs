//! `[celebration]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [celebration]
//! candles = 3        # Candles on the cake (1-9)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::session::{Cake, DEFAULT_CANDLES};

/// Most candles the terminal presenter can address (keys 1-9).
pub const MAX_CANDLES: usize = 9;

/// Cake settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    pub candles: usize,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            candles: DEFAULT_CANDLES,
        }
    }
}

impl CelebrationConfig {
    pub fn cake(&self) -> Cake {
        Cake::new(self.candles)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(1..=MAX_CANDLES).contains(&self.candles) {
            diag.error_with_hint(
                FieldPath::new("celebration.candles"),
                format!("{} candles is out of range", self.candles),
                format!("use between 1 and {MAX_CANDLES}"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_celebration_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.celebration.candles, 3);
        assert_eq!(config.celebration.cake().total(), 3);
    }

    #[test]
    fn test_validate_range() {
        for (candles, ok) in [(0, false), (1, true), (9, true), (10, false)] {
            let mut diag = ConfigDiagnostics::new();
            CelebrationConfig { candles }.validate(&mut diag);
            assert_eq!(diag.is_empty(), ok, "candles = {candles}");
        }
    }
}
