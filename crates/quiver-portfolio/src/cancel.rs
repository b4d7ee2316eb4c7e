//! Run control for sampling routines: cancellation and deadlines.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{PortfolioError, PortfolioResult};

/// Cooperative cancellation flag shared between a caller and a running
/// optimization.
///
/// Cloning shares the flag. Sampling routines check it between batches, so
/// a cancelled run stops after the batch in flight.
///
/// # Example
///
/// ```rust
/// use quiver_portfolio::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates an un-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Limits applied to one sampling run.
#[derive(Debug, Clone, Default)]
pub(crate) struct RunControl {
    token: Option<CancellationToken>,
    deadline: Option<(Instant, u64)>,
}

impl RunControl {
    /// Starts the clock for a run limited by `timeout_ms`.
    pub(crate) fn start(token: Option<CancellationToken>, timeout_ms: Option<u64>) -> Self {
        Self {
            token,
            deadline: timeout_ms
                .map(|ms| (Instant::now() + Duration::from_millis(ms), ms)),
        }
    }

    /// Fails if the run was cancelled or has passed its deadline.
    pub(crate) fn check(&self) -> PortfolioResult<()> {
        if self.token.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(PortfolioError::Cancelled);
        }
        if let Some((deadline, timeout_ms)) = self.deadline {
            if Instant::now() >= deadline {
                return Err(PortfolioError::TimedOut { timeout_ms });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_shared() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_run_control() {
        assert!(RunControl::default().check().is_ok());

        let token = CancellationToken::new();
        let control = RunControl::start(Some(token.clone()), None);
        assert!(control.check().is_ok());
        token.cancel();
        assert!(matches!(control.check(), Err(PortfolioError::Cancelled)));
    }

    #[test]
    fn test_expired_deadline() {
        let control = RunControl::start(None, Some(1));
        std::thread::sleep(Duration::from_millis(5));
        assert!(matches!(
            control.check(),
            Err(PortfolioError::TimedOut { timeout_ms: 1 })
        ));
    }
}
