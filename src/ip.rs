use ipnet::Ipv4Net;
use std::fmt;
use std::net::Ipv4Addr;

use crate::error::GuardError;

/// Sentinel value for text that is not a dotted quad.
///
/// Historically a placeholder for IPv6 peers: anything unparseable maps to
/// the maximum address, which matches nothing unless an all-encompassing
/// range is configured.
pub const IPV4_MAX: u32 = 0xFFFF_FFFF;

/// Parses a dotted-quad IPv4 address into its 32-bit value.
pub fn parse_strict(text: &str) -> Result<u32, GuardError> {
    let mut value = 0u32;
    let mut octets = 0usize;
    for segment in text.split('.') {
        let octet: u8 = segment
            .parse()
            .map_err(|_| GuardError::InvalidAddress(text.to_string()))?;
        value = (value << 8) | u32::from(octet);
        octets += 1;
    }
    if octets == 4 {
        Ok(value)
    } else {
        Err(GuardError::InvalidAddress(text.to_string()))
    }
}

/// Parses an address, mapping anything unparseable to [`IPV4_MAX`].
///
/// Used for request-time peer and header text, where failing hard on a
/// malformed address would let a bad header break request handling.
#[must_use]
pub fn parse_lenient(text: &str) -> u32 {
    parse_strict(text).unwrap_or(IPV4_MAX)
}

/// An inclusive IPv4 address range.
///
/// Endpoints are kept in caller order; an inverted pair is a valid range
/// that never matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpRange {
    min: u32,
    max: u32,
}

impl IpRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Parses a single range token: `A-B`, `A/n`, or a lone address.
    ///
    /// A token containing both `-` and `/` is read as a dash range; dash
    /// takes precedence over slash.
    pub fn parse(token: &str) -> Result<Self, GuardError> {
        if let Some((low, high)) = token.split_once('-') {
            Ok(Self::new(parse_strict(low)?, parse_strict(high)?))
        } else if let Some((addr, prefix)) = token.split_once('/') {
            let prefix_len: u8 = prefix
                .parse()
                .map_err(|_| GuardError::InvalidCidr(prefix.to_string()))?;
            let net = Ipv4Net::new(Ipv4Addr::from(parse_strict(addr)?), prefix_len)
                .map_err(|_| GuardError::InvalidCidr(prefix.to_string()))?;
            Ok(Self::new(net.network().into(), net.broadcast().into()))
        } else {
            let addr = parse_strict(token)?;
            Ok(Self::new(addr, addr))
        }
    }

    #[must_use]
    pub const fn contains(&self, ip: u32) -> bool {
        self.min <= ip && ip <= self.max
    }
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:08x}-{:08x})", self.min, self.max)
    }
}

/// An ordered collection of ranges parsed from a comma-separated list.
///
/// The empty set matches nothing; for an allowlist that means deny, never
/// allow all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: Vec<IpRange>,
}

impl RangeSet {
    /// Parses a comma-separated list of range tokens.
    ///
    /// Tokens are trimmed and blank ones dropped, so a blank or empty list
    /// yields the empty set. Any unparseable token fails the whole list.
    pub fn parse(list: &str) -> Result<Self, GuardError> {
        let mut ranges = Vec::new();
        for token in list.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let range =
                IpRange::parse(token).map_err(|source| GuardError::InvalidRangeSyntax {
                    token: token.to_string(),
                    source: Box::new(source),
                })?;
            ranges.push(range);
        }
        Ok(Self { ranges })
    }

    #[must_use]
    pub fn contains(&self, ip: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(ip))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for range in &self.ranges {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{range}")?;
            first = false;
        }
        Ok(())
    }
}
