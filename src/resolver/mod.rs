//! SRV resolvers.

use crate::{context::Context, SrvRecord};
use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(feature = "hickory")]
mod hickory;
#[cfg(feature = "hickory")]
pub use hickory::{system_resolver, LookupError};

/// Represents the ability to act as a SRV resolver.
#[async_trait]
pub trait SrvResolver: Send + Sync {
    /// SRV record representation produced by the resolver.
    type Record: SrvRecord + Send;

    /// Errors encountered during SRV resolution.
    type Error: std::error::Error + Debug + Send + Sync + 'static;

    /// Looks up the SRV records for `_service._proto.name`, or for `name`
    /// itself when both `service` and `proto` are empty.
    ///
    /// Returns the canonical name that was queried along with the records,
    /// which must already be ordered per RFC 2782. Implementations should stop
    /// when `ctx` is cancelled or its deadline passes.
    async fn lookup_srv(
        &self,
        ctx: &Context,
        service: &str,
        proto: &str,
        name: &str,
    ) -> Result<(String, Vec<Self::Record>), Self::Error>;
}

/// Builds the name queried for a service, protocol and domain.
pub fn srv_query_name(service: &str, proto: &str, name: &str) -> String {
    if service.is_empty() && proto.is_empty() {
        name.to_string()
    } else {
        format!("_{service}._{proto}.{name}")
    }
}
