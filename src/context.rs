//! Cancellation and deadlines for dial operations.

use std::{future::Future, io, time::Duration};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Reason a [`Context`] stopped an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Interrupted {
    /// The context's cancellation token fired.
    #[error("context canceled")]
    Canceled,
    /// The context's deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

impl From<Interrupted> for io::Error {
    fn from(reason: Interrupted) -> Self {
        let kind = match reason {
            Interrupted::Canceled => io::ErrorKind::Interrupted,
            Interrupted::DeadlineExceeded => io::ErrorKind::TimedOut,
        };
        io::Error::new(kind, reason)
    }
}

/// Carries a cancellation signal and an optional deadline through a dial.
///
/// Cloning is cheap and clones share the same cancellation token, so
/// cancelling any clone aborts every operation running under it.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Replaces the context's cancellation token.
    pub fn with_cancellation(self, token: CancellationToken) -> Self {
        Self {
            cancel: token,
            ..self
        }
    }

    /// Sets a deadline, keeping the existing one if it is earlier.
    pub fn with_deadline(self, at: Instant) -> Self {
        let deadline = match self.deadline {
            Some(existing) if existing <= at => existing,
            _ => at,
        };
        Self {
            deadline: Some(deadline),
            ..self
        }
    }

    /// Sets a deadline `timeout` from now, keeping the existing one if it is earlier.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Cancels this context and every clone of it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Gets the context's deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Reports why the context is done, or `None` while it is still live.
    pub fn err(&self) -> Option<Interrupted> {
        if self.cancel.is_cancelled() {
            Some(Interrupted::Canceled)
        } else if self.deadline.is_some_and(|d| d <= Instant::now()) {
            Some(Interrupted::DeadlineExceeded)
        } else {
            None
        }
    }

    /// Drives `fut` until it completes, the context is cancelled, or the
    /// deadline passes, whichever happens first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Interrupted> {
        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Interrupted::Canceled),
            _ = deadline => Err(Interrupted::DeadlineExceeded),
            out = fut => Ok(out),
        }
    }
}
