//! Shared fixtures for `btcprobe-core` unit tests.
//!
//! One well-known key and every value derived from it, so modules testing
//! different steps of the derivation agree on a single source of truth.

use bitcoin::hex::FromHex;

use crate::keys::{EllipticCurveProvider, PrivateKey, PublicKey, Secp256k1Provider};

// ==============================================================================
// Known Key
// ==============================================================================

pub const KNOWN_SECRET_HEX: &str =
    "6b15482c2d6cd81d914925343ff2bed1f8f6a1f52bc7414881ecf7640aadcc75";
pub const KNOWN_COMPRESSED_HEX: &str =
    "03b56c0e311edbe942d403a3af81bbef183d7de3e2510ca9b8b35a2071c5ef683d";
pub const KNOWN_UNCOMPRESSED_HEX: &str = "04b56c0e311edbe942d403a3af81bbef183d7de3e2510ca9b8b35a2071c5ef683d255ce556f514e7d09198006c386e68bfc850c36187b67b338879e4b12ceb7757";
pub const KNOWN_PUBKEY_HASH_HEX: &str = "3fadfc4a298551bd4163b160a21d51578014bc9b";
pub const KNOWN_P2PKH_SCRIPT_HEX: &str = "76a9143fadfc4a298551bd4163b160a21d51578014bc9b88ac";

// ==============================================================================
// Known Addresses
// ==============================================================================

pub const KNOWN_P2PKH_MAINNET: &str = "16ohzozfnV4m5hBHhqMwp6vDfwpdqRzwr8";
pub const KNOWN_P2PKH_TESTNET: &str = "mmKfHs5ebWW1roeuRQLKe28YXwRLkhhSy2";
pub const KNOWN_P2SH_MAINNET: &str = "3CDGSLniAwswsXgC6sTpJ1cZQYpTUsNqfe";
pub const KNOWN_P2SH_TESTNET: &str = "2N3mUW5ijnQPJ5KJjn15guxbpcu2dBW15a1";
pub const KNOWN_P2WPKH_MAINNET: &str = "bc1q87klcj3fs4gm6strk9s2y82327qpf0ymrtjxj7";
pub const KNOWN_P2WPKH_TESTNET: &str = "tb1q87klcj3fs4gm6strk9s2y82327qpf0ymfdf4fd";
pub const KNOWN_P2WSH_MAINNET: &str =
    "bc1q6fvhzwzn47h0nar9du3npwue5zdtk4jf09rqdh9apmgmzerhclpsk3h5aq";
pub const KNOWN_P2WSH_TESTNET: &str =
    "tb1q6fvhzwzn47h0nar9du3npwue5zdtk4jf09rqdh9apmgmzerhclpspepm80";
pub const KNOWN_P2WSH_REGTEST: &str =
    "bcrt1q6fvhzwzn47h0nar9du3npwue5zdtk4jf09rqdh9apmgmzerhclpsvqtaj4";
/// Witness v1 program set to the key's x coordinate.
pub const KNOWN_V1_MAINNET: &str =
    "bc1pk4kquvg7m05594qr5whcrwl0rq7hmclz2yx2nw9ntgs8r300dq7sr4qztf";

// ==============================================================================
// Helpers
// ==============================================================================

pub fn hex_bytes(s: &str) -> Vec<u8> {
    Vec::<u8>::from_hex(s).expect("fixture hex must decode")
}

pub fn known_private_key() -> PrivateKey {
    PrivateKey::from_hex(KNOWN_SECRET_HEX).expect("fixture key must parse")
}

pub fn known_public_key() -> PublicKey {
    Secp256k1Provider::new().derive_public_key(&known_private_key())
}
