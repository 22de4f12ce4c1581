//! Network connectors.

use crate::context::Context;
use async_trait::async_trait;
use std::fmt::Debug;

mod tcp;
pub use tcp::TcpDialer;

/// Represents the ability to open connections to `network` addresses.
#[async_trait]
pub trait NetworkDialer: Send + Sync {
    /// Connection produced by a successful dial.
    type Connection: Send;

    /// Errors encountered while dialing.
    type Error: std::error::Error + Debug + Send + Sync + 'static;

    /// Connects to `address` on `network` (e.g. `tcp`), stopping when `ctx`
    /// is cancelled or its deadline passes.
    async fn dial_context(
        &self,
        ctx: &Context,
        network: &str,
        address: &str,
    ) -> Result<Self::Connection, Self::Error>;
}

#[async_trait]
impl<T: NetworkDialer + ?Sized> NetworkDialer for std::sync::Arc<T> {
    type Connection = T::Connection;
    type Error = T::Error;

    async fn dial_context(
        &self,
        ctx: &Context,
        network: &str,
        address: &str,
    ) -> Result<Self::Connection, Self::Error> {
        (**self).dial_context(ctx, network, address).await
    }
}
