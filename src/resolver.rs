//! Asset resolution: probe every catalog candidate, keep what exists.
//!
//! All probes are spawned before any is awaited, each under its own
//! deadline, then joined in full. The result order comes from the catalog,
//! never from completion order.
//!
//! ```text
//! catalog ──spawn──► [probe 0] [probe 1] ... [probe n]   (each ≤ timeout)
//!                         └────────── join all ─────────┘
//!                                      │
//!                     filter Exists, sort by order, + Wish
//!                                      ▼
//!                                  AssetSet
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::asset::{AssetSet, Catalog};
use crate::debug;
use crate::probe::{Probe, ProbeError, ProbeOutcome};

/// Default per-candidate probe deadline.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Counters for one resolution run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub probed: usize,
    pub found: usize,
    pub missing: usize,
    pub inconclusive: usize,
    /// Subset of `inconclusive` that hit the deadline
    pub timed_out: usize,
    pub elapsed: Duration,
}

/// Outcome of a resolution run.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub assets: Arc<AssetSet>,
    pub stats: ResolveStats,
}

/// Probe every candidate concurrently and build the asset set.
///
/// Never fails: timeouts and probe errors count as missing. Spawned probe
/// tasks are detached, so dropping this future leaves them running until
/// they settle or hit their deadline.
pub async fn resolve<P: Probe>(
    catalog: &Catalog,
    probe: Arc<P>,
    timeout_per_candidate: Duration,
) -> Resolution {
    let started = Instant::now();

    let handles: Vec<(usize, PathBuf, JoinHandle<ProbeOutcome>)> = catalog
        .iter()
        .map(|(order, path)| {
            let path = path.to_path_buf();
            let handle = spawn_probe(Arc::clone(&probe), path.clone(), timeout_per_candidate);
            (order, path, handle)
        })
        .collect();

    let mut stats = ResolveStats {
        probed: handles.len(),
        ..ResolveStats::default()
    };
    let mut confirmed = Vec::new();

    for (order, path, handle) in handles {
        let outcome = handle.await.unwrap_or_else(|e| {
            debug!("probe"; "task for {} failed: {}", path.display(), e);
            ProbeOutcome::Inconclusive(ProbeError::Aborted { path: path.clone() })
        });

        match outcome {
            ProbeOutcome::Exists => {
                stats.found += 1;
                confirmed.push((order, path));
            }
            ProbeOutcome::Missing => stats.missing += 1,
            ProbeOutcome::Inconclusive(e) => {
                if e.is_timeout() {
                    stats.timed_out += 1;
                }
                debug!("probe"; "inconclusive, treating as missing: {}", e);
                stats.inconclusive += 1;
            }
        }
    }

    stats.elapsed = started.elapsed();
    debug!("resolve"; "probed {} candidates in {:?}", stats.probed, stats.elapsed);

    Resolution {
        assets: Arc::new(AssetSet::from_confirmed(confirmed)),
        stats,
    }
}

/// Spawn a single probe bounded by `timeout`.
fn spawn_probe<P: Probe>(
    probe: Arc<P>,
    path: PathBuf,
    timeout: Duration,
) -> JoinHandle<ProbeOutcome> {
    tokio::spawn(async move {
        match tokio::time::timeout(timeout, probe.probe(&path)).await {
            Ok(result) => ProbeOutcome::from(result),
            Err(_) => ProbeOutcome::Inconclusive(ProbeError::timeout(path, timeout)),
        }
    })
}

/// Resolves a catalog once and caches the result for the session.
///
/// Concurrent callers share the single in-flight run. Later calls return
/// the cached set without probing again.
pub struct AssetResolver<P: Probe> {
    catalog: Catalog,
    probe: Arc<P>,
    timeout: Duration,
    resolved: OnceCell<Resolution>,
}

impl<P: Probe> AssetResolver<P> {
    pub fn new(catalog: Catalog, probe: P) -> Self {
        Self {
            catalog,
            probe: Arc::new(probe),
            timeout: DEFAULT_PROBE_TIMEOUT,
            resolved: OnceCell::new(),
        }
    }

    /// Override the per-candidate deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve on first call, return the cached set afterwards.
    pub async fn resolve(&self) -> Arc<AssetSet> {
        Arc::clone(&self.resolution().await.assets)
    }

    /// Like [`Self::resolve`], also exposing the stats of the single run.
    pub async fn resolution(&self) -> &Resolution {
        self.resolved
            .get_or_init(|| resolve(&self.catalog, Arc::clone(&self.probe), self.timeout))
            .await
    }
}
