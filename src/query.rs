//! Query parameters of a connection URI.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::constants::{CONNECTION_TIMEOUT_PARAM, FRAME_MAX_PARAM};
use crate::error::ParseErrorKind;
use crate::url::decode;

const RECOGNIZED: [&str; 2] = [FRAME_MAX_PARAM, CONNECTION_TIMEOUT_PARAM];

/// The recognized `key=value` pairs from the query string of a connection
/// URI, decoded. Other keys are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    /// Parses query parameters from a query string (without leading '?').
    pub(crate) fn parse(input: &str) -> Result<Self, ParseErrorKind> {
        let mut params = BTreeMap::new();

        for pair in input.split('&') {
            if pair.is_empty() {
                continue;
            }

            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let name = decode(name)?;
            if !RECOGNIZED.contains(&name.as_str()) {
                continue;
            }
            let value = decode(value)?;

            if params.contains_key(&name) {
                return Err(ParseErrorKind::InvalidQueryParam {
                    name,
                    value,
                    reason: "parameter given more than once",
                });
            }

            params.insert(name, value);
        }

        Ok(Self { params })
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns the `frame_max` parameter, if present.
    pub(crate) fn frame_max(&self) -> Result<Option<u32>, ParseErrorKind> {
        self.get(FRAME_MAX_PARAM)
            .map(|v| {
                v.parse::<u32>()
                    .map_err(|_| Self::invalid(FRAME_MAX_PARAM, v, "expected a frame size in bytes"))
            })
            .transpose()
    }

    /// Returns the `connection_timeout` parameter (milliseconds), if present.
    pub(crate) fn connection_timeout(&self) -> Result<Option<Duration>, ParseErrorKind> {
        self.get(CONNECTION_TIMEOUT_PARAM)
            .map(|v| {
                v.parse::<u64>().map(Duration::from_millis).map_err(|_| {
                    Self::invalid(CONNECTION_TIMEOUT_PARAM, v, "expected milliseconds")
                })
            })
            .transpose()
    }

    fn invalid(name: &str, value: &str, reason: &'static str) -> ParseErrorKind {
        ParseErrorKind::InvalidQueryParam {
            name: name.to_string(),
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty() {
        let params = QueryParams::parse("").unwrap();
        assert_eq!(params, QueryParams::default());
    }

    #[test]
    fn parse_recognized_params() {
        let params = QueryParams::parse("frame_max=4096&connection_timeout=2500").unwrap();
        assert_eq!(params.frame_max().unwrap(), Some(4096));
        assert_eq!(
            params.connection_timeout().unwrap(),
            Some(Duration::from_millis(2500))
        );
    }

    #[test]
    fn missing_params_are_none() {
        let params = QueryParams::parse("heartbeat=30").unwrap();
        assert_eq!(params.frame_max().unwrap(), None);
        assert_eq!(params.connection_timeout().unwrap(), None);
    }

    #[test]
    fn unrecognized_keys_are_not_stored() {
        let params = QueryParams::parse("heartbeat=30&flag&x=1&x=2").unwrap();
        assert_eq!(params, QueryParams::default());
    }

    #[test]
    fn parse_percent_encoded() {
        let params = QueryParams::parse("frame%5Fmax=%34%30%39%36").unwrap();
        assert_eq!(params.frame_max().unwrap(), Some(4096));
    }

    #[test]
    fn skips_empty_pairs() {
        let params = QueryParams::parse("&&frame_max=1&").unwrap();
        assert_eq!(params.frame_max().unwrap(), Some(1));
    }

    #[test]
    fn recognized_key_without_value_fails() {
        let params = QueryParams::parse("frame_max").unwrap();
        assert!(params.frame_max().is_err());
    }

    #[test]
    fn recognized_duplicate_fails() {
        let result = QueryParams::parse("frame_max=1&frame_max=2");
        assert!(matches!(result, Err(ParseErrorKind::InvalidQueryParam { .. })));
    }

    #[test]
    fn non_numeric_frame_max_fails() {
        let params = QueryParams::parse("frame_max=big").unwrap();
        assert!(matches!(
            params.frame_max(),
            Err(ParseErrorKind::InvalidQueryParam { reason: "expected a frame size in bytes", .. })
        ));
    }

    #[test]
    fn negative_timeout_fails() {
        let params = QueryParams::parse("connection_timeout=-5").unwrap();
        assert!(params.connection_timeout().is_err());
    }

    #[test]
    fn timeout_beyond_u64_millis_fails() {
        let params = QueryParams::parse("connection_timeout=18446744073709551616").unwrap();
        assert!(params.connection_timeout().is_err());
    }

    #[test]
    fn invalid_utf8_value_fails() {
        let result = QueryParams::parse("frame_max=%FF");
        assert!(matches!(result, Err(ParseErrorKind::InvalidUri { .. })));
    }
}
