//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use amqp_settings::prelude::*;
//!
//! let settings: ConnectionSettings = configure("amqp://dev.rabbitmq.com").unwrap();
//! assert_eq!(settings.port(), AMQP_PORT);
//! ```

pub use crate::{
    // Entry points
    configure, defaults, parse_amqp_url,
    // Core types
    ConnectionSettings, OptionOverrides, PartialSettings, Scheme, SettingsInput,
    // Errors
    ParseError, ParseErrorKind, RenderError,
    // Constants
    AMQPS_PORT, AMQP_PORT, DEFAULT_FRAME_MAX, DEFAULT_VHOST,
};
