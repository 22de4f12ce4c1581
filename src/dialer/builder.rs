use super::SrvDialer;
use crate::matcher::SuffixMatcher;

#[cfg(feature = "hickory")]
use crate::{connector::TcpDialer, resolver::system_resolver};
#[cfg(feature = "hickory")]
use hickory_resolver::TokioResolver;

/// Ports whose `domain:port` forms are intercepted unless configured otherwise.
pub const DEFAULT_PORTS: [u16; 2] = [80, 443];

/// Consul's service discovery domain.
const CONSUL_DOMAIN: &str = "consul";

/// Configures a [`SrvDialer`] for arbitrary service domains.
///
/// Setters apply in call order. [`domains`] and [`ports`] append to their
/// lists, except that calling them with no items clears the list, so
/// `.domains([]).domains(["internal"])` intercepts
/// `internal` alone. No domains are intercepted until some are added.
///
/// [`domains`]: Builder::domains
/// [`ports`]: Builder::ports
#[derive(Debug, Clone)]
pub struct Builder<Dialer, Resolver> {
    dialer: Dialer,
    resolver: Resolver,
    domains: Vec<String>,
    ports: Vec<u16>,
}

#[cfg(feature = "hickory")]
impl Builder<TcpDialer, TokioResolver> {
    /// Creates a builder using a [`TcpDialer`] and the system resolver.
    pub fn new() -> Self {
        Self::with_parts(TcpDialer::default(), system_resolver())
    }
}

#[cfg(feature = "hickory")]
impl Default for Builder<TcpDialer, TokioResolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Dialer, Resolver> Builder<Dialer, Resolver> {
    /// Creates a builder around the given dialer and resolver.
    pub fn with_parts(dialer: Dialer, resolver: Resolver) -> Self {
        Self {
            dialer,
            resolver,
            domains: Vec::new(),
            ports: DEFAULT_PORTS.to_vec(),
        }
    }

    /// Sets the dialer used for every connection.
    pub fn dialer<D>(self, dialer: D) -> Builder<D, Resolver> {
        Builder {
            dialer,
            resolver: self.resolver,
            domains: self.domains,
            ports: self.ports,
        }
    }

    /// Sets the resolver used for SRV lookups.
    pub fn resolver<R>(self, resolver: R) -> Builder<Dialer, R> {
        Builder {
            resolver,
            dialer: self.dialer,
            domains: self.domains,
            ports: self.ports,
        }
    }

    /// Adds intercepted domains, or clears them when given none.
    pub fn domains<'a>(mut self, domains: impl IntoIterator<Item = &'a str>) -> Self {
        let before = self.domains.len();
        self.domains.extend(domains.into_iter().map(String::from));
        if self.domains.len() == before {
            self.domains.clear();
        }
        self
    }

    /// Adds intercepted ports, or clears them when given none.
    pub fn ports(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        let before = self.ports.len();
        self.ports.extend(ports);
        if self.ports.len() == before {
            self.ports.clear();
        }
        self
    }

    /// Gets the domains configured so far.
    pub fn configured_domains(&self) -> &[String] {
        &self.domains
    }

    /// Gets the ports configured so far.
    pub fn configured_ports(&self) -> &[u16] {
        &self.ports
    }

    /// Derives the allowed suffixes and creates the dialer.
    pub fn build(self) -> SrvDialer<Dialer, Resolver> {
        SrvDialer {
            matcher: SuffixMatcher::new(self.domains.as_slice(), self.ports.as_slice()),
            dialer: self.dialer,
            resolver: self.resolver,
        }
    }
}

/// Configures a [`SrvDialer`] for Consul, intercepting `*.service.*.consul`
/// names on the [default ports](DEFAULT_PORTS).
///
/// Only the dialer and resolver can be changed.
#[derive(Debug, Clone)]
pub struct ConsulBuilder<Dialer, Resolver> {
    inner: Builder<Dialer, Resolver>,
}

#[cfg(feature = "hickory")]
impl ConsulBuilder<TcpDialer, TokioResolver> {
    /// Creates a builder using a [`TcpDialer`] and the system resolver.
    pub fn new() -> Self {
        Self::with_parts(TcpDialer::default(), system_resolver())
    }
}

#[cfg(feature = "hickory")]
impl Default for ConsulBuilder<TcpDialer, TokioResolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Dialer, Resolver> ConsulBuilder<Dialer, Resolver> {
    /// Creates a builder around the given dialer and resolver.
    pub fn with_parts(dialer: Dialer, resolver: Resolver) -> Self {
        Self {
            inner: Builder::with_parts(dialer, resolver).domains([CONSUL_DOMAIN]),
        }
    }

    /// Sets the dialer used for every connection.
    pub fn dialer<D>(self, dialer: D) -> ConsulBuilder<D, Resolver> {
        ConsulBuilder {
            inner: self.inner.dialer(dialer),
        }
    }

    /// Sets the resolver used for SRV lookups.
    pub fn resolver<R>(self, resolver: R) -> ConsulBuilder<Dialer, R> {
        ConsulBuilder {
            inner: self.inner.resolver(resolver),
        }
    }

    /// Creates the dialer.
    pub fn build(self) -> SrvDialer<Dialer, Resolver> {
        self.inner.build()
    }
}
