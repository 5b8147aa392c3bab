//! Constants for AMQP connection settings.

/// Default broker host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// IANA assigned port for plain AMQP over TCP.
pub const AMQP_PORT: u16 = 5672;

/// IANA assigned port for AMQP over TLS.
pub const AMQPS_PORT: u16 = 5671;

/// Default username.
pub const DEFAULT_USER: &str = "guest";

/// Default password.
pub const DEFAULT_PASS: &str = "guest";

/// Default virtual host.
pub const DEFAULT_VHOST: &str = "/";

/// Default maximum frame size in bytes (128 KiB).
pub const DEFAULT_FRAME_MAX: u32 = 131_072;

/// The plain URI scheme.
pub const AMQP_SCHEME: &str = "amqp";

/// The TLS URI scheme.
pub const AMQPS_SCHEME: &str = "amqps";

/// Query parameter carrying the maximum frame size.
pub const FRAME_MAX_PARAM: &str = "frame_max";

/// Query parameter carrying the connection timeout in milliseconds.
pub const CONNECTION_TIMEOUT_PARAM: &str = "connection_timeout";
