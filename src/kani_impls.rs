//! Kani Arbitrary implementations and proof harnesses for property verification.
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::{Scheme, parse_amqp_url};

/// Characters that need no escaping in a vhost segment
const VHOST_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-._~";

/// Generate an unreserved character
fn arbitrary_vhost_char() -> char {
    let idx: usize = kani::any();
    let idx = idx % VHOST_CHARS.len();
    VHOST_CHARS[idx] as char
}

/// Generate any byte-sized ASCII character, reserved or not
fn arbitrary_ascii_char() -> char {
    let b: u8 = kani::any();
    kani::assume(b.is_ascii());
    b as char
}

impl kani::Arbitrary for Scheme {
    fn any() -> Self {
        if kani::any() { Scheme::Amqps } else { Scheme::Amqp }
    }
}

// ============================================================================
// Kani Proof Harnesses
// ============================================================================

/// Proof: ssl is set exactly when the default port is the TLS port
#[kani::proof]
fn proof_scheme_port_matches_security() {
    let scheme: Scheme = kani::any();
    assert_eq!(scheme.is_secure(), scheme.default_port() == crate::AMQPS_PORT);
    assert_eq!(Scheme::from_ssl(scheme.is_secure()), scheme);
}

/// Proof: an encoded ASCII vhost always comes back from the parser intact
#[kani::proof]
#[kani::unwind(6)]
fn proof_encoded_vhost_roundtrip() {
    let len: usize = kani::any();
    let len = len % 4;
    let vhost: String = (0..len).map(|_| arbitrary_ascii_char()).collect();

    let uri = format!("amqp://h/{}", urlencoding::encode(&vhost));
    let parts = parse_amqp_url(&uri).expect("encoded vhost parses");
    assert_eq!(parts.vhost(), Some(vhost.as_str()));
}

/// Proof: a single unreserved segment always becomes the vhost verbatim
#[kani::proof]
#[kani::unwind(6)]
fn proof_single_segment_vhost() {
    let len: usize = kani::any();
    let len = len % 4;
    let vhost: String = (0..len).map(|_| arbitrary_vhost_char()).collect();

    let parts = parse_amqp_url(&format!("amqp://h/{vhost}")).expect("single segment parses");
    assert_eq!(parts.vhost(), Some(vhost.as_str()));
}
