//! Process-wide default connection settings.

use std::sync::LazyLock;

use crate::constants::{
    AMQP_PORT, DEFAULT_FRAME_MAX, DEFAULT_HOST, DEFAULT_PASS, DEFAULT_USER, DEFAULT_VHOST,
};
use crate::settings::ConnectionSettings;

static DEFAULTS: LazyLock<ConnectionSettings> = LazyLock::new(|| ConnectionSettings {
    host: DEFAULT_HOST.to_string(),
    port: AMQP_PORT,
    user: DEFAULT_USER.to_string(),
    pass: DEFAULT_PASS.to_string(),
    vhost: DEFAULT_VHOST.to_string(),
    timeout: None,
    logging: false,
    ssl: false,
    broker: None,
    frame_max: DEFAULT_FRAME_MAX,
});

/// Returns the default connection settings.
///
/// The record is built on first use and shared for the rest of the process.
///
/// # Examples
///
/// ```
/// use amqp_settings::defaults;
///
/// let d = defaults();
/// assert_eq!(d.host(), "127.0.0.1");
/// assert_eq!(d.port(), 5672);
/// assert_eq!(d.user(), "guest");
/// assert_eq!(d.vhost(), "/");
/// assert_eq!(d.frame_max(), 131_072);
/// assert!(!d.ssl());
/// ```
#[must_use]
pub fn defaults() -> &'static ConnectionSettings {
    &DEFAULTS
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn default_values() {
        let d = defaults();
        assert_eq!(d.host(), "127.0.0.1");
        assert_eq!(d.port(), 5672);
        assert_eq!(d.user(), "guest");
        assert_eq!(d.pass(), "guest");
        assert_eq!(d.vhost(), "/");
        assert_eq!(d.timeout(), None::<Duration>);
        assert!(!d.logging());
        assert!(!d.ssl());
        assert_eq!(d.broker(), None);
        assert_eq!(d.frame_max(), 131_072);
    }

    #[test]
    fn same_instance_every_call() {
        assert!(std::ptr::eq(defaults(), defaults()));
    }

    #[test]
    fn concurrent_access_sees_one_instance() {
        let addrs: Vec<usize> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| std::ptr::from_ref(defaults()) as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }
}
