use crate::{connector::NetworkDialer, context::Context};
use async_trait::async_trait;
use tokio::runtime::{Handle, RuntimeFlavor};

/// Produced when a [`LegacyDialer`] is given a current-thread runtime, whose
/// IO and timer drivers can't be driven through a [`Handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("legacy dialing requires a multi-threaded runtime")]
pub struct CurrentThreadRuntime;

/// Blocking front for a [`NetworkDialer`], for callers without an async
/// context of their own.
///
/// Every [`dial`](LegacyDialer::dial) runs under the [`Context`] captured at
/// construction, on the given runtime. The runtime must be multi-threaded so
/// that its worker threads drive sockets and deadlines while the caller
/// blocks. Like [`Handle::block_on`], calling `dial` from within an
/// asynchronous execution context panics.
#[derive(Debug, Clone)]
pub struct LegacyDialer<Dialer> {
    ctx: Context,
    runtime: Handle,
    dialer: Dialer,
}

impl<Dialer: NetworkDialer> LegacyDialer<Dialer> {
    /// Wraps `dialer`, binding it to `ctx` and `runtime`.
    ///
    /// Fails if `runtime` belongs to a current-thread runtime.
    pub fn new(ctx: Context, runtime: Handle, dialer: Dialer) -> Result<Self, CurrentThreadRuntime> {
        if runtime.runtime_flavor() == RuntimeFlavor::CurrentThread {
            return Err(CurrentThreadRuntime);
        }
        Ok(Self {
            ctx,
            runtime,
            dialer,
        })
    }

    /// Connects to `address` on `network`, blocking until done.
    pub fn dial(&self, network: &str, address: &str) -> Result<Dialer::Connection, Dialer::Error> {
        self.runtime
            .block_on(self.dialer.dial_context(&self.ctx, network, address))
    }
}

#[async_trait]
impl<Dialer: NetworkDialer> NetworkDialer for LegacyDialer<Dialer> {
    type Connection = Dialer::Connection;
    type Error = Dialer::Error;

    async fn dial_context(
        &self,
        ctx: &Context,
        network: &str,
        address: &str,
    ) -> Result<Self::Connection, Self::Error> {
        self.dialer.dial_context(ctx, network, address).await
    }
}
