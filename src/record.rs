//! SRV records.

use std::{cmp::Reverse, fmt::Display};

use rand::Rng;

use crate::target::decode_target;

/// Representation of types that contain the fields of a SRV record.
pub trait SrvRecord {
    /// Type representing the SRV record's target. Must implement `Display` so
    /// it can be turned into a dialable address.
    type Target: Display + ?Sized;

    /// Gets a SRV record's target.
    fn target(&self) -> &Self::Target;

    /// Gets a SRV record's port.
    fn port(&self) -> u16;

    /// Gets a SRV record's priority.
    fn priority(&self) -> u16;

    /// Gets a SRV record's weight.
    fn weight(&self) -> u16;

    /// Builds the address a connection to this record's target should dial,
    /// decoding `.addr.` encoded IPv4 targets (see [`decode_target`]).
    fn dial_address(&self) -> String {
        decode_target(&self.target().to_string(), self.port())
    }

    /// Generates a key to sort a SRV record by priority and weight per RFC 2782.
    fn sort_key(&self, rng: impl Rng) -> (u16, Reverse<u32>) {
        sort_key(self.priority(), self.weight(), rng)
    }
}

/// Generates a key to sort a SRV record by priority and weight per RFC 2782.
pub(crate) fn sort_key(priority: u16, weight: u16, mut rng: impl Rng) -> (u16, Reverse<u32>) {
    // Sort ascending by priority, then descending (hence `Reverse`) by randomized weight
    let rand = rng.random::<u16>() as u32;
    (priority, Reverse(weight as u32 * rand))
}

/// An owned SRV record, for resolvers that don't bring their own record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Srv {
    /// Host name (or `.addr.` encoded address) of the target.
    pub target: String,
    /// Port the service listens on.
    pub port: u16,
    /// Lower values are preferred.
    pub priority: u16,
    /// Relative weight among records of equal priority.
    pub weight: u16,
}

impl Srv {
    /// Creates a record with the given target and port and zero priority and weight.
    pub fn new(target: impl Into<String>, port: u16) -> Self {
        Self {
            target: target.into(),
            port,
            priority: 0,
            weight: 0,
        }
    }
}

impl SrvRecord for Srv {
    type Target = str;

    fn target(&self) -> &Self::Target {
        &self.target
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn priority(&self) -> u16 {
        self.priority
    }

    fn weight(&self) -> u16 {
        self.weight
    }
}
