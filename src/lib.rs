//! Access Guard
//!
//! Resolves the originating client IP of a request that may have passed
//! through a chain of trusted reverse proxies, and checks the result against
//! an admin allowlist. Range sets are built once from configuration and are
//! immutable afterwards. IPv4 only: request-time text that is not a dotted
//! quad is treated as the maximum address rather than an error.

pub mod config;
pub mod error;
pub mod ip;
pub mod resolver;

// Re-export commonly used types and functions
pub use config::{AccessConfig, Config, load_config};
pub use error::GuardError;
pub use ip::{IPV4_MAX, IpRange, RangeSet, parse_lenient, parse_strict};
pub use resolver::AccessGuard;
