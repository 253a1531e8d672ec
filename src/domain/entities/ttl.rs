//! Enumerated link lifetimes.

use chrono::Duration;
use std::fmt;

/// Whitelisted time-to-live values a link may be created with.
///
/// The wire format is the total number of hours (`"1h"`, `"24h"`, ...);
/// anything outside the whitelist is rejected at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ttl {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Ttl {
    pub const ALL: [Ttl; 5] = [Ttl::Hour, Ttl::Day, Ttl::Week, Ttl::Month, Ttl::Year];

    /// Parses the wire representation. Returns `None` for anything outside
    /// the whitelist.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1h" => Some(Self::Hour),
            "24h" => Some(Self::Day),
            "168h" => Some(Self::Week),
            "720h" => Some(Self::Month),
            "8760h" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "1h",
            Self::Day => "24h",
            Self::Week => "168h",
            Self::Month => "720h",
            Self::Year => "8760h",
        }
    }

    /// The fixed lifespan this value maps to.
    pub fn duration(self) -> Duration {
        match self {
            Self::Hour => Duration::hours(1),
            Self::Day => Duration::days(1),
            Self::Week => Duration::weeks(1),
            Self::Month => Duration::days(30),
            Self::Year => Duration::days(365),
        }
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
