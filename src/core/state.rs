//! Process-wide run state.
//!
//! Only one thing lives here: whether shutdown has been requested. A
//! registered channel lets a running `reel play` loop wind down the
//! sequencer instead of dying mid-frame.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Shutdown signal sender for a running presenter
static SHUTDOWN_TX: OnceLock<crossbeam::channel::Sender<()>> = OnceLock::new();

// =============================================================================
// SHUTDOWN state
// =============================================================================

/// Setup the global Ctrl+C handler. Call once at program start
///
/// - Before `register_shutdown()`: exit immediately, nothing to clean up
/// - After `register_shutdown()`: set the flag and notify the presenter
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        match SHUTDOWN_TX.get() {
            Some(tx) => {
                let _ = tx.try_send(());
            }
            None => std::process::exit(0),
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register a presenter for graceful shutdown.
///
/// Returns the receiving end. Only the first registration wins; later calls
/// get `None`.
pub fn register_shutdown() -> Option<crossbeam::channel::Receiver<()>> {
    let (tx, rx) = crossbeam::channel::bounded(1);
    SHUTDOWN_TX.set(tx).ok().map(|_| rx)
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

// =============================================================================
// Tests
// =============================================================================
