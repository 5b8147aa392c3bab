//! Caller-supplied overrides for the default connection settings.

use std::time::Duration;

use crate::settings::ConnectionSettings;

/// A set of explicit connection options, each optional.
///
/// Options that are set replace the corresponding default when the set is
/// passed to [`configure`](crate::configure); options left unset keep the
/// default. `username` and `password` are aliases for `user` and `pass`: an
/// alias only applies when the primary key is unset.
///
/// With the `serde` feature the set deserializes from any map. Unknown keys
/// are ignored and `timeout` is given in seconds.
///
/// # Examples
///
/// ```
/// use amqp_settings::{configure, OptionOverrides};
///
/// let settings = configure(
///     OptionOverrides::new()
///         .with_host("broker.internal")
///         .with_username("bob"),
/// )
/// .unwrap();
///
/// assert_eq!(settings.host(), "broker.internal");
/// assert_eq!(settings.user(), "bob");
/// assert_eq!(settings.pass(), "guest");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptionOverrides {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) host: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) port: Option<u16>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) user: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) pass: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) username: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) password: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) vhost: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", with = "crate::settings::timeout_secs")
    )]
    pub(crate) timeout: Option<Duration>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) logging: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) ssl: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) broker: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub(crate) frame_max: Option<u32>,
}

impl OptionOverrides {
    /// Creates an empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the broker host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the broker port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the username.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn with_pass(mut self, pass: impl Into<String>) -> Self {
        self.pass = Some(pass.into());
        self
    }

    /// Sets the username through its alias; ignored if `user` is also set.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password through its alias; ignored if `pass` is also set.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the virtual host.
    #[must_use]
    pub fn with_vhost(mut self, vhost: impl Into<String>) -> Self {
        self.vhost = Some(vhost.into());
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the diagnostic logging flag.
    #[must_use]
    pub const fn with_logging(mut self, logging: bool) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Sets the transport security flag.
    #[must_use]
    pub const fn with_ssl(mut self, ssl: bool) -> Self {
        self.ssl = Some(ssl);
        self
    }

    /// Sets the broker extension identifier.
    #[must_use]
    pub fn with_broker(mut self, broker: impl Into<String>) -> Self {
        self.broker = Some(broker.into());
        self
    }

    /// Sets the maximum frame size.
    #[must_use]
    pub const fn with_frame_max(mut self, frame_max: u32) -> Self {
        self.frame_max = Some(frame_max);
        self
    }

    /// Folds the `username`/`password` aliases into `user`/`pass`.
    ///
    /// An alias is copied only when its primary key is unset. Both aliases
    /// are cleared in the result either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use amqp_settings::OptionOverrides;
    ///
    /// let folded = OptionOverrides::new()
    ///     .with_user("alice")
    ///     .with_username("bob")
    ///     .with_password("pw")
    ///     .normalized();
    ///
    /// assert_eq!(folded, OptionOverrides::new().with_user("alice").with_pass("pw"));
    /// ```
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            user: self.user.or(self.username),
            pass: self.pass.or(self.password),
            username: None,
            password: None,
            ..self
        }
    }

    /// Returns true if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Every field of the record, set explicitly.
impl From<&ConnectionSettings> for OptionOverrides {
    fn from(settings: &ConnectionSettings) -> Self {
        Self {
            host: Some(settings.host.clone()),
            port: Some(settings.port),
            user: Some(settings.user.clone()),
            pass: Some(settings.pass.clone()),
            username: None,
            password: None,
            vhost: Some(settings.vhost.clone()),
            timeout: settings.timeout,
            logging: Some(settings.logging),
            ssl: Some(settings.ssl),
            broker: settings.broker.clone(),
            frame_max: Some(settings.frame_max),
        }
    }
}
