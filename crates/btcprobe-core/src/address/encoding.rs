//! The hash → version prefix → checksum → text pipeline behind every
//! address this crate renders.
//!
//! Each step is a free function so it can be checked in isolation;
//! [`ChecksumEncoder`] strings them together behind [`AddressEncoder`].

use bitcoin::base58;
use bitcoin::bech32::{self, Fe32, Hrp};
use bitcoin::hashes::{hash160, sha256, sha256d, Hash};

use crate::error::DeriveError;
use crate::keys::PublicKey;
use crate::network::NetworkParams;

use super::{Address, AddressEncoder, AddressKind};

pub const CHECKSUM_LEN: usize = 4;

// ==============================================================================
// Hashing
// ==============================================================================

/// RIPEMD160(SHA256(data)).
#[must_use]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    hash160::Hash::hash(data).to_byte_array()
}

/// SHA256(data), the witness program of a P2WSH output.
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    sha256::Hash::hash(data).to_byte_array()
}

/// First four bytes of SHA256(SHA256(data)).
#[must_use]
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256d::Hash::hash(data).to_byte_array();
    [digest[0], digest[1], digest[2], digest[3]]
}

// ==============================================================================
// Base58Check
// ==============================================================================

/// `version ‖ payload ‖ checksum(version ‖ payload)` in the Base58 alphabet.
#[must_use]
pub fn base58check_encode(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    data.push(version);
    data.extend_from_slice(payload);
    let check = checksum(&data);
    data.extend_from_slice(&check);
    base58::encode(&data)
}

// ==============================================================================
// Segwit (Bech32 / Bech32m)
// ==============================================================================

pub const MAX_WITNESS_VERSION: u8 = 16;

/// Program length rules: v0 is either a key hash or a script hash, v1 is a
/// 32-byte taproot output key, later versions only have the generic 2..=40
/// bound.
pub fn validate_witness_program(version: u8, program: &[u8]) -> Result<(), DeriveError> {
    let length = program.len();
    let ok = match version {
        0 => length == 20 || length == 32,
        1 => length == 32,
        2..=MAX_WITNESS_VERSION => (2..=40).contains(&length),
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(DeriveError::InvalidWitnessProgram { version, length })
    }
}

/// Encode a witness program under `hrp`. Bech32 for v0, Bech32m above.
pub fn segwit_encode(hrp: &str, version: u8, program: &[u8]) -> Result<String, DeriveError> {
    validate_witness_program(version, program)?;
    let hrp = Hrp::parse(hrp)
        .map_err(|e| DeriveError::UnsupportedNetwork(format!("invalid bech32 prefix `{hrp}`: {e}")))?;
    let invalid = || DeriveError::InvalidWitnessProgram {
        version,
        length: program.len(),
    };
    let fe = Fe32::try_from(version).map_err(|_| invalid())?;
    bech32::segwit::encode(hrp, fe, program).map_err(|_| invalid())
}

// ==============================================================================
// Default Encoder
// ==============================================================================

/// Address encoder built from the functions above.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChecksumEncoder;

impl AddressEncoder for ChecksumEncoder {
    fn encode_pubkey_hash(
        &self,
        key: &PublicKey,
        params: &NetworkParams,
    ) -> Result<Address, DeriveError> {
        let network = params.validate()?;
        let hash = hash160(&key.serialize_compressed());
        Ok(Address::new(
            AddressKind::P2pkh,
            network,
            base58check_encode(params.pubkey_hash_version, &hash),
        ))
    }

    fn encode_script_hash(
        &self,
        script: &[u8],
        params: &NetworkParams,
    ) -> Result<Address, DeriveError> {
        let network = params.validate()?;
        let hash = hash160(script);
        Ok(Address::new(
            AddressKind::P2sh,
            network,
            base58check_encode(params.script_hash_version, &hash),
        ))
    }

    fn encode_witness(
        &self,
        program: &[u8],
        params: &NetworkParams,
        witness_version: u8,
    ) -> Result<Address, DeriveError> {
        let network = params.validate()?;
        let encoded = segwit_encode(params.bech32_hrp, witness_version, program)?;
        Ok(Address::new(
            AddressKind::for_witness(witness_version, program.len()),
            network,
            encoded,
        ))
    }
}
