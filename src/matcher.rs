//! Deciding which addresses are dialed through SRV lookups.

/// Segment an address must contain to be treated as a service name, so that
/// ordinary hosts under an intercepted domain are left alone.
pub const SERVICE_MARKER: &str = ".service.";

/// Matches addresses against a precomputed set of allowed suffixes.
///
/// For every domain `d` the set holds `.d` and, for every port `p`, `.d:p`.
/// An address carrying a port outside the port list therefore never matches:
/// the port list only adds matchable forms on top of the bare domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuffixMatcher {
    suffixes: Vec<String>,
}

impl SuffixMatcher {
    /// Derives the allowed suffixes from `domains` and `ports`.
    ///
    /// Leading and trailing dots on domains are ignored and empty domains are
    /// skipped.
    pub fn new<S: AsRef<str>>(domains: &[S], ports: &[u16]) -> Self {
        let mut suffixes: Vec<String> = Vec::with_capacity(domains.len() * (ports.len() + 1));
        let mut push = |suffix: String| {
            if !suffixes.contains(&suffix) {
                suffixes.push(suffix);
            }
        };
        for domain in domains {
            let domain = domain.as_ref().trim_matches('.');
            if domain.is_empty() {
                continue;
            }
            push(format!(".{domain}"));
            for port in ports {
                push(format!(".{domain}:{port}"));
            }
        }
        Self { suffixes }
    }

    /// Checks whether `address` should be resolved through SRV records.
    pub fn matches(&self, address: &str) -> bool {
        address.contains(SERVICE_MARKER) && self.suffixes.iter().any(|s| address.ends_with(s))
    }

    /// Gets the allowed suffixes, in derivation order.
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

/// Strips a trailing `:port` from `address`, if there is one.
pub(crate) fn strip_port(address: &str) -> &str {
    match address.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => host,
        _ => address,
    }
}
