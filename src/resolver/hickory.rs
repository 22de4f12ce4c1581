//! SRV resolver backed by [`hickory_resolver`].

use super::{srv_query_name, SrvResolver};
use crate::{
    context::{Context, Interrupted},
    SrvRecord,
};
use async_trait::async_trait;
use hickory_resolver::{
    config::ResolverConfig,
    name_server::{ConnectionProvider, TokioConnectionProvider},
    proto::rr::rdata::SRV,
    Name, ResolveError, Resolver, TokioResolver,
};

/// Errors produced by the hickory-backed [`SrvResolver`].
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The DNS query failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// The lookup was abandoned because its context finished.
    #[error(transparent)]
    Interrupted(#[from] Interrupted),
}

/// Creates a resolver from the host's resolver configuration, falling back to
/// hickory's default upstreams if that configuration can't be read.
pub fn system_resolver() -> TokioResolver {
    match TokioResolver::builder_tokio() {
        Ok(builder) => builder.build(),
        Err(e) => {
            #[cfg(feature = "log")]
            tracing::warn!(%e, "Failed to read system resolver configuration, using defaults");
            TokioResolver::builder_with_config(
                ResolverConfig::default(),
                TokioConnectionProvider::default(),
            )
            .build()
        }
    }
}

#[async_trait]
impl<P> SrvResolver for Resolver<P>
where
    P: ConnectionProvider,
{
    type Record = SRV;
    type Error = LookupError;

    async fn lookup_srv(
        &self,
        ctx: &Context,
        service: &str,
        proto: &str,
        name: &str,
    ) -> Result<(String, Vec<Self::Record>), Self::Error> {
        let query = srv_query_name(service, proto, name);
        let lookup = match ctx.run(self.srv_lookup(query.as_str())).await? {
            Ok(lookup) => lookup,
            // An answer without records is a successful, empty lookup.
            Err(e) if e.is_no_records_found() => {
                #[cfg(feature = "log")]
                tracing::trace!(%query, %e, "No SRV records found");
                return Ok((query, Vec::new()));
            }
            Err(e) => return Err(e.into()),
        };
        let cname = lookup.as_lookup().query().name().to_string();

        let mut records: Vec<SRV> = lookup.into_iter().collect();
        let mut rng = rand::rng();
        records.sort_by_cached_key(|record| record.sort_key(&mut rng));

        #[cfg(feature = "log")]
        tracing::trace!(%cname, count = records.len(), "Resolved SRV records");

        Ok((cname, records))
    }
}

impl SrvRecord for SRV {
    type Target = Name;

    fn target(&self) -> &Self::Target {
        self.target()
    }

    fn port(&self) -> u16 {
        self.port()
    }

    fn priority(&self) -> u16 {
        self.priority()
    }

    fn weight(&self) -> u16 {
        self.weight()
    }
}
