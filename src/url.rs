//! Connection URI parsing.
//!
//! # Grammar
//!
//! ```text
//! amqp-uri  = ( "amqp" / "amqps" ) "://" [ userinfo "@" ] host [ ":" port ]
//!             [ "/" vhost ] [ "?" query ] [ "#" fragment ]
//! userinfo  = user [ ":" password ]
//! vhost     = segment          ; no unescaped "/", write "%2F" instead
//! ```
//!
//! Parsing runs in two passes. The first splits the input into generic
//! RFC 3986 components and rejects anything that is not a URI at all. The
//! second interprets those components as connection settings.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ParseError, ParseErrorKind};
use crate::query::QueryParams;
use crate::scheme::Scheme;

/// Connection settings decoded from a URI, before defaults are applied.
///
/// Fields the URI does not mention stay unset so the caller can fall back to
/// its own defaults. `port` and `ssl` are always known because the scheme
/// decides them.
///
/// # Examples
///
/// ```
/// use amqp_settings::parse_amqp_url;
///
/// let parts = parse_amqp_url("amqp://dev.rabbitmq.com").unwrap();
/// assert_eq!(parts.host(), Some("dev.rabbitmq.com"));
/// assert_eq!(parts.port(), 5672);
/// assert_eq!(parts.vhost(), None);
///
/// let parts = parse_amqp_url("amqp://dev.rabbitmq.com/").unwrap();
/// assert_eq!(parts.vhost(), Some(""));
///
/// let parts = parse_amqp_url("amqp://dev.rabbitmq.com/%2Fvault").unwrap();
/// assert_eq!(parts.vhost(), Some("/vault"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartialSettings {
    scheme: Scheme,
    user: Option<String>,
    pass: Option<String>,
    host: Option<String>,
    port: u16,
    vhost: Option<String>,
    frame_max: Option<u32>,
    #[cfg_attr(feature = "serde", serde(with = "crate::settings::timeout_secs"))]
    timeout: Option<Duration>,
}

/// Parses a connection URI without merging defaults.
///
/// # Errors
///
/// Returns `ParseError` with kind:
/// - `InvalidUri` if the input is not syntactically a URI
/// - `UnsupportedScheme` if the scheme is not `amqp` or `amqps`
/// - `MultiSegmentPath` if the path holds an unescaped `/` after the first
/// - `InvalidQueryParam` if `frame_max` or `connection_timeout` is unusable
pub fn parse_amqp_url(input: &str) -> Result<PartialSettings, ParseError> {
    PartialSettings::parse(input)
}

impl PartialSettings {
    /// Parses a connection URI. See [`parse_amqp_url`].
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the URI is malformed or not an AMQP URI.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_inner(input).map_err(|kind| ParseError::new(input, kind))
    }

    /// Returns the URI scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the percent-decoded username, if the URI had userinfo.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Returns the percent-decoded password, if the userinfo had a `:`.
    #[must_use]
    pub fn pass(&self) -> Option<&str> {
        self.pass.as_deref()
    }

    /// Returns the host exactly as written, if non-empty.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the explicit port, or the scheme's default port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns true if the scheme is `amqps`.
    #[must_use]
    pub const fn ssl(&self) -> bool {
        self.scheme.is_secure()
    }

    /// Returns the percent-decoded virtual host.
    ///
    /// `None` means the URI had no path; `Some("")` means the path was `/`.
    #[must_use]
    pub fn vhost(&self) -> Option<&str> {
        self.vhost.as_deref()
    }

    /// Returns the `frame_max` query parameter, if present.
    #[must_use]
    pub const fn frame_max(&self) -> Option<u32> {
        self.frame_max
    }

    /// Returns the `connection_timeout` query parameter, if present.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn into_parts(self) -> Parts {
        Parts {
            user: self.user,
            pass: self.pass,
            host: self.host,
            port: self.port,
            ssl: self.scheme.is_secure(),
            vhost: self.vhost,
            frame_max: self.frame_max,
            timeout: self.timeout,
        }
    }

    fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        let raw = RawUri::split(input)?;

        let scheme = match raw.scheme {
            None => return Err(ParseErrorKind::UnsupportedScheme { found: None }),
            Some(s) => s
                .parse::<Scheme>()
                .map_err(|_| ParseErrorKind::UnsupportedScheme {
                    found: Some(s.to_string()),
                })?,
        };

        let authority = raw.authority.ok_or(ParseErrorKind::InvalidUri {
            reason: "expected '//' and an authority after the scheme",
        })?;

        let (user, pass) = match authority.userinfo {
            None => (None, None),
            Some(info) => match info.split_once(':') {
                Some((user, pass)) => (Some(decode(user)?), Some(decode(pass)?)),
                None => (Some(decode(info)?), None),
            },
        };

        let host = (!authority.host.is_empty()).then(|| authority.host.to_string());
        let port = authority.port.unwrap_or_else(|| scheme.default_port());
        let vhost = Self::parse_vhost(raw.path)?;

        let query = raw.query.map(QueryParams::parse).transpose()?.unwrap_or_default();
        let frame_max = query.frame_max()?;
        let timeout = query.connection_timeout()?;

        Ok(Self {
            scheme,
            user,
            pass,
            host,
            port,
            vhost,
            frame_max,
            timeout,
        })
    }

    fn parse_vhost(path: &str) -> Result<Option<String>, ParseErrorKind> {
        if path.is_empty() {
            return Ok(None);
        }

        // The authority split guarantees a non-empty path starts with '/'.
        let segment = &path[1..];
        if segment.contains('/') {
            return Err(ParseErrorKind::MultiSegmentPath {
                path: path.to_string(),
            });
        }

        decode(segment).map(Some)
    }
}

impl fmt::Display for PartialSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://", self.scheme)?;
        if let Some(user) = &self.user {
            write!(f, "{}", urlencoding::encode(user))?;
            if let Some(pass) = &self.pass {
                write!(f, ":{}", urlencoding::encode(pass))?;
            }
            write!(f, "@")?;
        }
        write!(f, "{}:{}", self.host.as_deref().unwrap_or_default(), self.port)?;
        if let Some(vhost) = &self.vhost {
            write!(f, "/{}", urlencoding::encode(vhost))?;
        }
        Ok(())
    }
}

impl FromStr for PartialSettings {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PartialSettings {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

/// Owned fields of a [`PartialSettings`], for merging.
pub(crate) struct Parts {
    pub user: Option<String>,
    pub pass: Option<String>,
    pub host: Option<String>,
    pub port: u16,
    pub ssl: bool,
    pub vhost: Option<String>,
    pub frame_max: Option<u32>,
    pub timeout: Option<Duration>,
}

/// Percent-decodes one URI component.
///
/// Escapes are already known to be well formed; only the UTF-8 check of the
/// decoded bytes can fail here. `+` stays a literal plus.
pub(crate) fn decode(raw: &str) -> Result<String, ParseErrorKind> {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .map_err(|_| invalid("percent escapes do not decode to UTF-8"))
}

/// Checks that `host` reads back unchanged when written into an authority.
pub(crate) fn check_host(host: &str) -> Result<(), &'static str> {
    if host.is_empty() {
        return Err("an empty host cannot be written in a URI");
    }
    if host.contains(['/', '?', '#']) || RawUri::validate_chars(host).is_err() {
        return Err("contains a character not allowed in a URI host");
    }
    match Authority::parse(host) {
        Ok(a) if a.userinfo.is_none() && a.port.is_none() && a.host == host => Ok(()),
        _ => Err("does not read back as a single host"),
    }
}

/// Generic RFC 3986 components of a URI, still percent-encoded.
#[derive(Debug, PartialEq, Eq)]
struct RawUri<'a> {
    scheme: Option<&'a str>,
    authority: Option<Authority<'a>>,
    path: &'a str,
    query: Option<&'a str>,
}

#[derive(Debug, PartialEq, Eq)]
struct Authority<'a> {
    userinfo: Option<&'a str>,
    host: &'a str,
    port: Option<u16>,
}

impl<'a> RawUri<'a> {
    fn split(input: &'a str) -> Result<Self, ParseErrorKind> {
        if input.is_empty() {
            return Err(invalid("input is empty"));
        }
        Self::validate_chars(input)?;

        // Fragment is not part of the settings
        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (input, None),
        };
        if fragment.is_some_and(|f| f.contains('#')) {
            return Err(invalid("more than one '#'"));
        }

        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (rest, None),
        };

        let (scheme, rest) = Self::split_scheme(rest)?;

        let (authority, path) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find('/').unwrap_or(after.len());
                (Some(Authority::parse(&after[..end])?), &after[end..])
            }
            None => (None, rest),
        };

        if path.contains(['[', ']']) {
            return Err(invalid("'[' and ']' are only allowed around an IPv6 host"));
        }

        Ok(Self {
            scheme,
            authority,
            path,
            query,
        })
    }

    fn validate_chars(input: &str) -> Result<(), ParseErrorKind> {
        let bytes = input.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if !b.is_ascii_graphic() || b"\"<>\\^`{|}".contains(&b) {
                return Err(invalid("contains a character not allowed in URIs"));
            }
            if b == b'%'
                && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                    && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
            {
                return Err(invalid("malformed percent escape"));
            }
        }
        Ok(())
    }

    /// A ':' before any '/' marks a scheme; otherwise the input is a
    /// relative reference with no scheme.
    fn split_scheme(input: &'a str) -> Result<(Option<&'a str>, &'a str), ParseErrorKind> {
        let Some(colon) = input.find(':') else {
            return Ok((None, input));
        };
        if input[..colon].contains('/') {
            return Ok((None, input));
        }

        let scheme = &input[..colon];
        let mut chars = scheme.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
        if !valid {
            return Err(invalid("malformed scheme"));
        }

        Ok((Some(scheme), &input[colon + 1..]))
    }
}

impl<'a> Authority<'a> {
    fn parse(input: &'a str) -> Result<Self, ParseErrorKind> {
        let (userinfo, host_port) = match input.rsplit_once('@') {
            Some((info, rest)) => (Some(info), rest),
            None => (None, input),
        };

        if userinfo.is_some_and(|info| info.contains(['@', '[', ']'])) {
            return Err(invalid("'@', '[' and ']' in userinfo must be percent-encoded"));
        }

        let (host, port) = if host_port.starts_with('[') {
            Self::split_ip_literal(host_port)?
        } else {
            if host_port.contains(['[', ']']) {
                return Err(invalid("'[' and ']' are only allowed around an IPv6 host"));
            }
            match host_port.split_once(':') {
                Some((host, port)) => (host, port),
                None => (host_port, ""),
            }
        };

        Ok(Self {
            userinfo,
            host,
            port: Self::parse_port(port)?,
        })
    }

    /// Splits `[v6-address]:port`, keeping the brackets on the host.
    fn split_ip_literal(input: &'a str) -> Result<(&'a str, &'a str), ParseErrorKind> {
        let close = input
            .find(']')
            .ok_or(invalid("missing closing bracket for IPv6 literal"))?;
        let (host, rest) = input.split_at(close + 1);

        if host[1..host.len() - 1].contains('[') {
            return Err(invalid("nested '[' in IPv6 literal"));
        }

        match rest.strip_prefix(':') {
            Some(port) => Ok((host, port)),
            None if rest.is_empty() => Ok((host, "")),
            None => Err(invalid("expected ':' after IPv6 closing bracket")),
        }
    }

    fn parse_port(port: &str) -> Result<Option<u16>, ParseErrorKind> {
        if port.is_empty() {
            return Ok(None);
        }
        if !port.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("port must be numeric"));
        }
        port.parse::<u16>()
            .map(Some)
            .map_err(|_| invalid("port must be 0-65535"))
    }
}

const fn invalid(reason: &'static str) -> ParseErrorKind {
    ParseErrorKind::InvalidUri { reason }
}
