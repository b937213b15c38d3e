//! Bounded, cancellable external calls.

use std::future::Future;
use std::time::Duration;

use muq_core::{CuratorError, Result};
use tokio_util::sync::CancellationToken;

/// Runs `fut` until it finishes, `timeout` elapses, or `cancel` fires, whichever comes first.
/// The latter two yield [`CuratorError::Cancelled`] naming `what`.
pub async fn bounded<T, F>(
    what: &str,
    timeout: Duration,
    cancel: &CancellationToken,
    fut: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(CuratorError::Cancelled(format!("{} cancelled", what))),
        res = tokio::time::timeout(timeout, fut) => match res {
            Ok(inner) => inner,
            Err(_) => Err(CuratorError::Cancelled(format!(
                "{} exceeded {}s",
                what,
                timeout.as_secs_f32()
            ))),
        },
    }
}
