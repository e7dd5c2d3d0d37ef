//! Bounded connection opening
//!
//! A driver's open call may block indefinitely (unreachable host, black-hole
//! firewall) or fail outright. [`open_bounded`] runs the attempt on its own
//! task and polls for completion against a deadline, so the caller waits at
//! most the effective timeout.
//!
//! Every failure mode collapses into [`DbQuickError::ConnectTimeout`]: a
//! driver error, a panicked attempt, and a genuinely slow open are
//! indistinguishable to the caller. The underlying cause is logged at the
//! attempt layer. An attempt still pending at the deadline is aborted, so
//! no open attempt outlives its window.

use crate::error::{DbQuickError, Result};
use crate::timeout::ConnectTimeout;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Interval between completion checks while waiting for the attempt.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Run `attempt` with an upper bound on wait time.
///
/// The attempt resolves to `Some(handle)` on success and `None` when the
/// underlying open failed; it must absorb driver errors itself. It is
/// spawned as an independent task, then polled at 1ms intervals until it
/// finishes or the deadline passes, whichever is first.
///
/// # Errors
///
/// Returns [`DbQuickError::ConnectTimeout`] when the attempt does not
/// report success within `timeout` — whether it is still pending, failed,
/// or panicked.
pub async fn open_bounded<T, F>(attempt: F, timeout: ConnectTimeout) -> Result<T>
where
    F: Future<Output = Option<T>> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::spawn(attempt);
    let started = Instant::now();

    // Wait for the attempt, never past the deadline. A finished attempt
    // breaks the loop early, including one that finished with a failure.
    while !handle.is_finished() && started.elapsed() < timeout.as_duration() {
        sleep(POLL_INTERVAL).await;
    }

    if handle.is_finished() {
        match handle.await {
            Ok(Some(opened)) => {
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                debug!(elapsed_ms, "connection opened");
                return Ok(opened);
            }
            Ok(None) => debug!("open attempt failed before the deadline"),
            Err(err) => warn!("open attempt task failed: {err}"),
        }
    } else {
        handle.abort();
        debug!(timeout_ms = timeout.millis(), "open attempt still pending at deadline, aborted");
    }

    Err(DbQuickError::ConnectTimeout {
        effective_ms: timeout.millis(),
    })
}
