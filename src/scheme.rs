//! Connection URI schemes.

use std::fmt;
use std::str::FromStr;

use crate::constants::{AMQPS_PORT, AMQPS_SCHEME, AMQP_PORT, AMQP_SCHEME};

/// A supported connection URI scheme.
///
/// The scheme decides both the transport security of a connection and the
/// port used when the URI does not name one.
///
/// # Examples
///
/// ```
/// use amqp_settings::Scheme;
///
/// let scheme: Scheme = "amqps".parse().unwrap();
/// assert!(scheme.is_secure());
/// assert_eq!(scheme.default_port(), 5671);
///
/// assert!("http".parse::<Scheme>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Scheme {
    /// Plain TCP
    #[default]
    Amqp,
    /// TLS over TCP
    Amqps,
}

impl Scheme {
    /// Returns the scheme as it appears in a URI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amqp => AMQP_SCHEME,
            Self::Amqps => AMQPS_SCHEME,
        }
    }

    /// Returns the port a URI with this scheme connects to when it names none.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Amqp => AMQP_PORT,
            Self::Amqps => AMQPS_PORT,
        }
    }

    /// Returns true if this scheme requires transport-layer encryption.
    #[must_use]
    pub const fn is_secure(self) -> bool {
        matches!(self, Self::Amqps)
    }

    /// Returns the scheme matching a transport security flag.
    #[must_use]
    pub const fn from_ssl(ssl: bool) -> Self {
        if ssl { Self::Amqps } else { Self::Amqp }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AMQP_SCHEME => Ok(Self::Amqp),
            AMQPS_SCHEME => Ok(Self::Amqps),
            _ => Err("scheme must be 'amqp' or 'amqps'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_schemes() {
        assert_eq!("amqp".parse::<Scheme>(), Ok(Scheme::Amqp));
        assert_eq!("amqps".parse::<Scheme>(), Ok(Scheme::Amqps));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("AMQP".parse::<Scheme>().is_err());
        assert!("Amqps".parse::<Scheme>().is_err());
    }

    #[test]
    fn default_ports() {
        assert_eq!(Scheme::Amqp.default_port(), 5672);
        assert_eq!(Scheme::Amqps.default_port(), 5671);
    }

    #[test]
    fn only_amqps_is_secure() {
        assert!(!Scheme::Amqp.is_secure());
        assert!(Scheme::Amqps.is_secure());
    }

    #[test]
    fn from_ssl_roundtrip() {
        for scheme in [Scheme::Amqp, Scheme::Amqps] {
            assert_eq!(Scheme::from_ssl(scheme.is_secure()), scheme);
        }
    }

    #[test]
    fn display() {
        assert_eq!(Scheme::Amqps.to_string(), "amqps");
    }
}
