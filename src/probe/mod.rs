//! Existence probes for slideshow candidates.
//!
//! A [`Probe`] answers one question: can this path be shown as an image?
//! The resolver treats it as opaque I/O and wraps every call in a deadline.
//!
//! ```text
//! probe(path) ──► Ok(true)   ──► Exists
//!             ──► Ok(false)  ──► Missing
//!             ──► Err(_)     ──► Inconclusive ┐
//!   (deadline) ─────────────────► Inconclusive ┴─► treated as missing
//! ```

mod fs;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

pub use fs::FsProbe;

/// Existence check supplied by the hosting environment.
pub trait Probe: Send + Sync + 'static {
    /// Resolve to `Ok(true)` if `path` is a retrievable image.
    fn probe(&self, path: &Path) -> impl Future<Output = Result<bool, ProbeError>> + Send;
}

/// A probe that could not give a definitive answer.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("IO error when probing `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("probe of `{path}` timed out after {after:?}")]
    Timeout { path: PathBuf, after: Duration },

    #[error("probe task for `{path}` did not complete")]
    Aborted { path: PathBuf },
}

impl ProbeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn timeout(path: impl Into<PathBuf>, after: Duration) -> Self {
        Self::Timeout {
            path: path.into(),
            after,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Settled result of one probe.
#[derive(Debug)]
pub enum ProbeOutcome {
    Exists,
    Missing,
    /// Timeout or failure. Never retried, counted as missing.
    Inconclusive(ProbeError),
}

impl From<Result<bool, ProbeError>> for ProbeOutcome {
    fn from(result: Result<bool, ProbeError>) -> Self {
        match result {
            Ok(true) => Self::Exists,
            Ok(false) => Self::Missing,
            Err(e) => Self::Inconclusive(e),
        }
    }
}
