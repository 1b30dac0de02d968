use thiserror::Error;

/// Errors raised while parsing range configuration.
///
/// These only occur at startup when the allowlists are built. Request-time
/// address text never errors; it degrades to the sentinel instead (see
/// `ip::parse_lenient`).
#[derive(Debug, Error)]
pub enum GuardError {
    /// Not a dotted quad of exactly four 0-255 octets.
    #[error("invalid IPv4 address '{0}'")]
    InvalidAddress(String),

    /// CIDR prefix length missing, non-numeric, or outside 0-32.
    #[error("invalid CIDR prefix length '{0}', expected 0-32")]
    InvalidCidr(String),

    /// A list entry that failed to parse, with the failing token attached.
    #[error("invalid range token '{token}'")]
    InvalidRangeSyntax {
        token: String,
        #[source]
        source: Box<GuardError>,
    },
}
