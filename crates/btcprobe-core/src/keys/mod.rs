//! secp256k1 key types and the curve backend abstraction.
//!
//! [`PrivateKey`] and [`PublicKey`] wrap the `secp256k1` types re-exported by
//! the `bitcoin` crate. The curve operations that produce them sit behind
//! [`EllipticCurveProvider`] so an alternative backend can be swapped in
//! without touching callers.

mod secp;

pub use secp::Secp256k1Provider;

use std::fmt;
use std::str::FromStr;

use bitcoin::hex::{DisplayHex, FromHex};
use bitcoin::secp256k1;

use crate::address::encoding::base58check_encode;
use crate::error::DeriveError;
use crate::network::NetworkParams;

// ==============================================================================
// Capability Trait
// ==============================================================================

/// Elliptic-curve operations needed to go from randomness to a public key.
pub trait EllipticCurveProvider: Send + Sync {
    /// Draw a fresh private key uniformly from `[1, n-1]`.
    fn generate_private_key(&self) -> Result<PrivateKey, DeriveError>;

    /// Multiply the curve base point by the private scalar.
    fn derive_public_key(&self, key: &PrivateKey) -> PublicKey;
}

// ==============================================================================
// Private Key
// ==============================================================================

/// A secp256k1 secret scalar, guaranteed to be in `[1, n-1]`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PrivateKey(secp256k1::SecretKey);

impl PrivateKey {
    pub const LEN: usize = 32;

    /// Interpret 32 big-endian bytes as a secret scalar.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DeriveError> {
        if bytes.len() != Self::LEN {
            return Err(DeriveError::InvalidKey(format!(
                "expected {} bytes, got {}",
                Self::LEN,
                bytes.len()
            )));
        }
        secp256k1::SecretKey::from_slice(bytes)
            .map(Self)
            .map_err(|_| DeriveError::InvalidKey("scalar is zero or not below the curve order".into()))
    }

    pub fn from_hex(s: &str) -> Result<Self, DeriveError> {
        let bytes = <[u8; 32]>::from_hex(s.trim())
            .map_err(|e| DeriveError::InvalidKey(format!("invalid hex: {e}")))?;
        Self::from_slice(&bytes)
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.secret_bytes()
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_bytes().as_slice().to_lower_hex_string()
    }

    /// Wallet import format for a compressed-key wallet.
    pub fn to_wif(&self, params: &NetworkParams) -> Result<String, DeriveError> {
        params.validate()?;
        let mut payload = Vec::with_capacity(Self::LEN + 1);
        payload.extend_from_slice(&self.to_bytes());
        payload.push(0x01);
        Ok(base58check_encode(params.wif_version, &payload))
    }

    pub(crate) fn as_inner(&self) -> &secp256k1::SecretKey {
        &self.0
    }
}

impl From<secp256k1::SecretKey> for PrivateKey {
    fn from(key: secp256k1::SecretKey) -> Self {
        Self(key)
    }
}

impl FromStr for PrivateKey {
    type Err = DeriveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Never print the scalar through `{:?}`.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

// ==============================================================================
// Public Key
// ==============================================================================

/// A secp256k1 curve point.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(secp256k1::PublicKey);

impl PublicKey {
    pub const COMPRESSED_LEN: usize = 33;
    pub const UNCOMPRESSED_LEN: usize = 65;

    /// Parse either the 33-byte compressed or the 65-byte uncompressed form.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DeriveError> {
        secp256k1::PublicKey::from_slice(bytes)
            .map(Self)
            .map_err(|e| DeriveError::InvalidKey(format!("invalid public key: {e}")))
    }

    /// `0x02`/`0x03` parity prefix followed by the x coordinate.
    #[must_use]
    pub fn serialize_compressed(&self) -> [u8; 33] {
        self.0.serialize()
    }

    /// `0x04` followed by the x and y coordinates.
    #[must_use]
    pub fn serialize_uncompressed(&self) -> [u8; 65] {
        self.0.serialize_uncompressed()
    }
}

impl From<secp256k1::PublicKey> for PublicKey {
    fn from(key: secp256k1::PublicKey) -> Self {
        Self(key)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize_compressed().as_slice().to_lower_hex_string())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}
