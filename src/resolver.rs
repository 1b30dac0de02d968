use tracing::{debug, trace};

use crate::config::AccessConfig;
use crate::error::GuardError;
use crate::ip::{RangeSet, parse_lenient};

/// Decides which address an inbound request really came from and whether
/// that address may perform admin operations.
///
/// Both range sets are fixed at construction, so one instance can be shared
/// across any number of request-handling threads without synchronization.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    trusted_proxies: RangeSet,
    admin_ranges: RangeSet,
}

impl AccessGuard {
    #[must_use]
    pub const fn new(trusted_proxies: RangeSet, admin_ranges: RangeSet) -> Self {
        Self {
            trusted_proxies,
            admin_ranges,
        }
    }

    /// Builds a guard from raw configuration, failing on any unparseable
    /// range token.
    pub fn from_config(config: &AccessConfig) -> Result<Self, GuardError> {
        let trusted_proxies = RangeSet::parse(config.trusted_proxies.as_deref().unwrap_or(""))?;
        let admin_ranges = RangeSet::parse(config.admin_ranges.as_deref().unwrap_or(""))?;
        Ok(Self::new(trusted_proxies, admin_ranges))
    }

    #[must_use]
    pub fn trusted_proxies(&self) -> &RangeSet {
        &self.trusted_proxies
    }

    #[must_use]
    pub fn admin_ranges(&self) -> &RangeSet {
        &self.admin_ranges
    }

    /// Resolves the originating client address from the transport peer and
    /// an optional `X-Forwarded-For` value (`client, proxy1, proxy2, ...`).
    ///
    /// The header is only believed when the peer itself is a trusted proxy;
    /// otherwise any client could spoof it. The entries are then walked from
    /// the end (the hop closest to us) toward the front, and the first one
    /// that is not a trusted proxy is the client. If every hop is trusted,
    /// the leftmost entry is.
    #[must_use]
    pub fn resolve_client_addr(&self, peer: &str, forwarded_for: Option<&str>) -> String {
        trace!(peer = %peer, forwarded_for = ?forwarded_for, "Resolving client address");

        let Some(header) = forwarded_for.filter(|value| !value.is_empty()) else {
            return peer.to_string();
        };
        if !self.trusted_proxies.contains(parse_lenient(peer)) {
            debug!(peer = %peer, "Peer is not a trusted proxy, ignoring forwarded-for header");
            return peer.to_string();
        }

        let hops: Vec<&str> = header.split(',').collect();
        for hop in hops.iter().skip(1).rev() {
            let hop = hop.trim();
            if !self.trusted_proxies.contains(parse_lenient(hop)) {
                debug!(hop = %hop, "Untrusted hop in forwarded-for chain");
                return hop.to_string();
            }
        }
        hops[0].trim().to_string()
    }

    /// Whether `addr` is covered by the admin allowlist.
    ///
    /// An empty allowlist denies everyone.
    #[must_use]
    pub fn is_authorized(&self, addr: &str) -> bool {
        self.admin_ranges.contains(parse_lenient(addr))
    }
}
