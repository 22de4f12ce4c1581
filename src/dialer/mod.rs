//! Dialing services located by SRV records.

use crate::{
    connector::NetworkDialer,
    context::Context,
    matcher::{strip_port, SuffixMatcher},
    resolver::SrvResolver,
    SrvRecord,
};
use async_trait::async_trait;

mod builder;
pub use builder::{Builder, ConsulBuilder, DEFAULT_PORTS};

mod legacy;
pub use legacy::{CurrentThreadRuntime, LegacyDialer};

/// Errors encountered by a [`SrvDialer`].
#[derive(Debug, thiserror::Error)]
pub enum Error<Dial: std::error::Error + 'static, Lookup: std::error::Error + 'static> {
    /// SRV lookup errors
    #[error("SRV lookup error: {0}")]
    Lookup(#[source] Lookup),
    /// Produced when a lookup succeeds without returning any records
    #[error("lookup {name}: no such host")]
    NoRecords {
        /// Address the lookup was made for.
        name: String,
    },
    /// Errors from the wrapped dialer
    #[error(transparent)]
    Dial(Dial),
}

impl<Dial: std::error::Error + 'static, Lookup: std::error::Error + 'static> Error<Dial, Lookup> {
    /// Whether the error means the service name doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoRecords { .. })
    }
}

/// Dialer that resolves service names through SRV records and hands every
/// other address to the dialer it wraps.
///
/// # Usage
///
/// Created by [`Builder`] (any domain) or [`ConsulBuilder`] (Consul's
/// `.consul` domain). An address is intercepted when it contains
/// `.service.` and ends with one of the configured domains, optionally
/// followed by one of the configured ports. Intercepted addresses are looked
/// up with the [`SrvResolver`], the first record is turned into an address
/// with [`SrvRecord::dial_address`] and that address is dialed instead.
///
/// There is no caching, retrying or fall-through to later records: a failed
/// lookup or a failed dial fails the call.
#[derive(Debug)]
pub struct SrvDialer<Dialer, Resolver> {
    dialer: Dialer,
    resolver: Resolver,
    matcher: SuffixMatcher,
}

impl<Dialer, Resolver> SrvDialer<Dialer, Resolver> {
    /// Gets the matcher deciding which addresses are intercepted.
    pub fn matcher(&self) -> &SuffixMatcher {
        &self.matcher
    }

    /// Gets the wrapped dialer.
    pub fn dialer(&self) -> &Dialer {
        &self.dialer
    }

    /// Gets the SRV resolver.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }
}

impl<Dialer: NetworkDialer, Resolver: SrvResolver> SrvDialer<Dialer, Resolver> {
    /// Resolves an intercepted address into the address to dial.
    async fn resolve(
        &self,
        ctx: &Context,
        address: &str,
    ) -> Result<String, Error<Dialer::Error, Resolver::Error>> {
        let name = strip_port(address);
        let (_, records) = self
            .resolver
            .lookup_srv(ctx, "", "", name)
            .await
            .map_err(Error::Lookup)?;

        // Records arrive ordered per RFC 2782; only the top one is used.
        let selected = records.first().ok_or_else(|| Error::NoRecords {
            name: address.to_string(),
        })?;
        Ok(selected.dial_address())
    }
}

#[async_trait]
impl<Dialer: NetworkDialer, Resolver: SrvResolver> NetworkDialer for SrvDialer<Dialer, Resolver> {
    type Connection = Dialer::Connection;
    type Error = Error<Dialer::Error, Resolver::Error>;

    async fn dial_context(
        &self,
        ctx: &Context,
        network: &str,
        address: &str,
    ) -> Result<Self::Connection, Self::Error> {
        if !self.matcher.matches(address) {
            #[cfg(feature = "log")]
            tracing::trace!(address, "Dialing address directly");
            return self
                .dialer
                .dial_context(ctx, network, address)
                .await
                .map_err(Error::Dial);
        }

        let target = match self.resolve(ctx, address).await {
            Ok(target) => target,
            Err(e) => {
                #[cfg(feature = "log")]
                tracing::debug!(address, error = %e, "SRV resolution failed");
                return Err(e);
            }
        };

        #[cfg(feature = "log")]
        tracing::debug!(address, %target, "Dialing SRV target");
        self.dialer
            .dial_context(ctx, network, &target)
            .await
            .map_err(Error::Dial)
    }
}
