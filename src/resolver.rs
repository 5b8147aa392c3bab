//! Resolution of caller input into a complete settings record.

use crate::defaults::defaults;
use crate::error::ParseError;
use crate::overrides::OptionOverrides;
use crate::settings::ConnectionSettings;
use crate::url::PartialSettings;

/// The forms of input [`configure`] accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SettingsInput {
    /// Use the defaults unchanged
    #[default]
    NoSettings,
    /// Replace individual defaults
    OptionOverrides(OptionOverrides),
    /// Decode settings from a connection URI
    ConnectionUri(String),
}

impl From<()> for SettingsInput {
    fn from((): ()) -> Self {
        Self::NoSettings
    }
}

impl From<OptionOverrides> for SettingsInput {
    fn from(overrides: OptionOverrides) -> Self {
        Self::OptionOverrides(overrides)
    }
}

impl From<&str> for SettingsInput {
    fn from(uri: &str) -> Self {
        Self::ConnectionUri(uri.to_string())
    }
}

impl From<String> for SettingsInput {
    fn from(uri: String) -> Self {
        Self::ConnectionUri(uri)
    }
}

impl<T: Into<SettingsInput>> From<Option<T>> for SettingsInput {
    fn from(input: Option<T>) -> Self {
        input.map_or(Self::NoSettings, Into::into)
    }
}

/// Resolves caller input into a complete, freshly allocated settings record.
///
/// Whatever the input sets wins; everything else comes from
/// [`defaults`](crate::defaults).
///
/// # Errors
///
/// Returns `ParseError` if the input is a connection URI that does not
/// parse. Other inputs always succeed.
///
/// # Examples
///
/// ```
/// use amqp_settings::{configure, defaults, OptionOverrides};
///
/// assert_eq!(&configure(()).unwrap(), defaults());
///
/// let settings = configure("amqps://bob@dev.rabbitmq.com/").unwrap();
/// assert_eq!(settings.port(), 5671);
/// assert_eq!(settings.user(), "bob");
/// assert_eq!(settings.pass(), "guest");
/// assert_eq!(settings.vhost(), "");
///
/// let settings = configure(OptionOverrides::new().with_frame_max(4096)).unwrap();
/// assert_eq!(settings.frame_max(), 4096);
/// ```
pub fn configure(input: impl Into<SettingsInput>) -> Result<ConnectionSettings, ParseError> {
    match input.into() {
        SettingsInput::NoSettings => Ok(defaults().clone()),
        SettingsInput::OptionOverrides(overrides) if overrides.is_empty() => Ok(defaults().clone()),
        SettingsInput::OptionOverrides(overrides) => Ok(merge_overrides(overrides, defaults())),
        SettingsInput::ConnectionUri(uri) => {
            PartialSettings::parse(&uri).map(|parts| merge_uri(parts, defaults()))
        }
    }
}

fn merge_overrides(overrides: OptionOverrides, base: &ConnectionSettings) -> ConnectionSettings {
    let o = overrides.normalized();
    ConnectionSettings {
        host: o.host.unwrap_or_else(|| base.host.clone()),
        port: o.port.unwrap_or(base.port),
        user: o.user.unwrap_or_else(|| base.user.clone()),
        pass: o.pass.unwrap_or_else(|| base.pass.clone()),
        vhost: o.vhost.unwrap_or_else(|| base.vhost.clone()),
        timeout: o.timeout.or(base.timeout),
        logging: o.logging.unwrap_or(base.logging),
        ssl: o.ssl.unwrap_or(base.ssl),
        broker: o.broker.or_else(|| base.broker.clone()),
        frame_max: o.frame_max.unwrap_or(base.frame_max),
    }
}

fn merge_uri(parts: PartialSettings, base: &ConnectionSettings) -> ConnectionSettings {
    let p = parts.into_parts();
    ConnectionSettings {
        host: p.host.unwrap_or_else(|| base.host.clone()),
        port: p.port,
        user: p.user.unwrap_or_else(|| base.user.clone()),
        pass: p.pass.unwrap_or_else(|| base.pass.clone()),
        vhost: p.vhost.unwrap_or_else(|| base.vhost.clone()),
        timeout: p.timeout.or(base.timeout),
        logging: base.logging,
        ssl: p.ssl,
        broker: base.broker.clone(),
        frame_max: p.frame_max.unwrap_or(base.frame_max),
    }
}
