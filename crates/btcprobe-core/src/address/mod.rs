//! Address types, the encoder abstraction, and the key-to-address deriver.
//!
//! [`KeyAddressDeriver`] is the entry point most callers want: it combines an
//! [`EllipticCurveProvider`] with an [`AddressEncoder`] and renders one key
//! into every address type the library knows about.

pub mod encoding;
pub mod script;

use std::fmt;

use serde::Serialize;

use crate::error::DeriveError;
use crate::keys::{EllipticCurveProvider, PrivateKey, PublicKey, Secp256k1Provider};
use crate::network::{Network, NetworkParams};

pub use encoding::ChecksumEncoder;
pub use script::p2pkh_script;

// ==============================================================================
// Address
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    P2pkh,
    P2sh,
    P2wpkh,
    P2wsh,
    P2tr,
    /// Any other witness version/length combination.
    Witness { version: u8 },
}

impl AddressKind {
    #[must_use]
    pub fn for_witness(version: u8, program_len: usize) -> Self {
        match (version, program_len) {
            (0, 20) => Self::P2wpkh,
            (0, 32) => Self::P2wsh,
            (1, 32) => Self::P2tr,
            (version, _) => Self::Witness { version },
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::P2pkh => write!(f, "p2pkh"),
            Self::P2sh => write!(f, "p2sh"),
            Self::P2wpkh => write!(f, "p2wpkh"),
            Self::P2wsh => write!(f, "p2wsh"),
            Self::P2tr => write!(f, "p2tr"),
            Self::Witness { version } => write!(f, "witness_v{version}"),
        }
    }
}

/// An encoded address together with what it encodes and for which network.
///
/// Only the encoders in this crate produce addresses:
///
/// ```compile_fail
/// use btcprobe_core::{Address, AddressKind, Network};
///
/// let _ = Address::new(AddressKind::P2pkh, Network::Mainnet, "1anything".to_owned());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address {
    kind: AddressKind,
    network: Network,
    encoded: String,
}

impl Address {
    #[must_use]
    pub(crate) fn new(kind: AddressKind, network: Network, encoded: String) -> Self {
        Self {
            kind,
            network,
            encoded,
        }
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

// ==============================================================================
// Capability Trait
// ==============================================================================

/// Renders hashes of keys and scripts into address strings.
///
/// Implementations must reject params that are not one of the built-in
/// network tables with [`DeriveError::UnsupportedNetwork`].
pub trait AddressEncoder: Send + Sync {
    /// Base58Check P2PKH address of the compressed key.
    fn encode_pubkey_hash(
        &self,
        key: &PublicKey,
        params: &NetworkParams,
    ) -> Result<Address, DeriveError>;

    /// Base58Check P2SH address of `script`.
    fn encode_script_hash(
        &self,
        script: &[u8],
        params: &NetworkParams,
    ) -> Result<Address, DeriveError>;

    /// Bech32/Bech32m address of a witness program.
    fn encode_witness(
        &self,
        program: &[u8],
        params: &NetworkParams,
        witness_version: u8,
    ) -> Result<Address, DeriveError>;
}

// ==============================================================================
// Deriver
// ==============================================================================

/// Every address derived from one key.
///
/// The script-hash variants wrap the key's own P2PKH locking script.
#[derive(Debug, Clone, Serialize)]
pub struct AddressSet {
    pub public_key: String,
    pub p2pkh: Address,
    pub p2sh: Address,
    pub p2wpkh: Address,
    pub p2wsh: Address,
}

pub struct KeyAddressDeriver<C = Secp256k1Provider, E = ChecksumEncoder> {
    curve: C,
    encoder: E,
}

impl KeyAddressDeriver {
    /// libsecp256k1 with the built-in checksum encoder.
    pub fn new() -> Self {
        Self::with_backends(Secp256k1Provider::new(), ChecksumEncoder)
    }
}

impl Default for KeyAddressDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, E> KeyAddressDeriver<C, E>
where
    C: EllipticCurveProvider,
    E: AddressEncoder,
{
    pub fn with_backends(curve: C, encoder: E) -> Self {
        Self { curve, encoder }
    }

    pub fn generate(&self) -> Result<PrivateKey, DeriveError> {
        self.curve.generate_private_key()
    }

    pub fn public_key(&self, key: &PrivateKey) -> PublicKey {
        self.curve.derive_public_key(key)
    }

    pub fn p2pkh(&self, key: &PublicKey, params: &NetworkParams) -> Result<Address, DeriveError> {
        self.encoder.encode_pubkey_hash(key, params)
    }

    pub fn p2sh(&self, script: &[u8], params: &NetworkParams) -> Result<Address, DeriveError> {
        self.encoder.encode_script_hash(script, params)
    }

    pub fn p2wpkh(&self, key: &PublicKey, params: &NetworkParams) -> Result<Address, DeriveError> {
        let hash = encoding::hash160(&key.serialize_compressed());
        self.encoder.encode_witness(&hash, params, 0)
    }

    pub fn p2wsh(&self, script: &[u8], params: &NetworkParams) -> Result<Address, DeriveError> {
        let program = encoding::sha256(script);
        self.encoder.encode_witness(&program, params, 0)
    }

    pub fn derive_all(
        &self,
        key: &PrivateKey,
        params: &NetworkParams,
    ) -> Result<AddressSet, DeriveError> {
        let public = self.public_key(key);
        let script = p2pkh_script(&encoding::hash160(&public.serialize_compressed()));
        Ok(AddressSet {
            public_key: public.to_string(),
            p2pkh: self.p2pkh(&public, params)?,
            p2sh: self.p2sh(&script, params)?,
            p2wpkh: self.p2wpkh(&public, params)?,
            p2wsh: self.p2wsh(&script, params)?,
        })
    }
}
