//! Filesystem probe.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;

use super::{Probe, ProbeError};
use crate::asset::{ImageFormat, SNIFF_LEN};

/// Probes candidates on local disk, relative to `root`.
///
/// A candidate exists only if it is a regular file whose header sniffs as
/// a supported image. Extension alone is not trusted.
#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
}

impl FsProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Probe for FsProbe {
    async fn probe(&self, path: &Path) -> Result<bool, ProbeError> {
        let full = self.root.join(path);

        let meta = match tokio::fs::metadata(&full).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(ProbeError::io(path, e)),
        };
        if !meta.is_file() {
            return Ok(false);
        }

        let file = tokio::fs::File::open(&full)
            .await
            .map_err(|e| ProbeError::io(path, e))?;

        let mut header = Vec::with_capacity(SNIFF_LEN);
        file.take(SNIFF_LEN as u64)
            .read_to_end(&mut header)
            .await
            .map_err(|e| ProbeError::io(path, e))?;

        Ok(ImageFormat::sniff(&header).is_some())
    }
}
