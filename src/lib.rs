#![deny(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

/*!
Connection decorator that dials services located by DNS SRV records.

# Introduction

Service catalogs such as Consul publish SRV records for the services they
know about:

```text
web.service.consul. 0 IN SRV 1 1 8080 c0000201.addr.dc1.consul.
web.service.consul. 0 IN SRV 1 1 8080 c0000202.addr.dc1.consul.
```

[`SrvDialer`] wraps any [`NetworkDialer`]. Addresses that look like service
names (they contain `.service.` and end with a configured domain, optionally
followed by a configured port) are looked up as SRV records and the first
record's target is dialed instead. Everything else is handed to the wrapped
dialer untouched, so a [`SrvDialer`] can stand in wherever a
[`NetworkDialer`] is expected.

Targets of the form `<hex>.addr.<rest>` carry an IPv4 address encoded as hex
(`c0000201` is `192.0.2.1`); [`decode_target`] recovers it without a second
DNS round trip.

# Building a dialer

[`ConsulBuilder`] intercepts `.consul` names on ports 80 and 443.
[`Builder`] starts with no domains and lets both domains and ports be set.
Both default to a [`TcpDialer`] and the system resolver, and either can be
replaced with [`Builder::dialer`] and [`Builder::resolver`].

[`LegacyDialer`] exposes a blocking `dial` bound to a fixed [`Context`], for
synchronous callers.

# Resolvers

SRV lookups go through the [`SrvResolver`] trait. The resolver backend
provided by this crate is enabled by the following feature:

- `hickory` (via [`hickory_resolver::Resolver`])

[`SrvResolver`]: resolver::SrvResolver
[`NetworkDialer`]: connector::NetworkDialer
[`TcpDialer`]: connector::TcpDialer
[`Context`]: context::Context
*/

pub mod connector;
pub mod context;

mod dialer;
pub use dialer::{
    Builder, ConsulBuilder, CurrentThreadRuntime, Error, LegacyDialer, SrvDialer, DEFAULT_PORTS,
};

mod matcher;
pub use matcher::{SuffixMatcher, SERVICE_MARKER};

mod record;
pub use record::{Srv, SrvRecord};

pub mod resolver;

mod target;
pub use target::{decode_target, ADDR_MARKER};
