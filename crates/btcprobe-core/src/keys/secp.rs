use std::sync::Mutex;

use bitcoin::secp256k1::{All, Secp256k1, SecretKey};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

use crate::error::DeriveError;

use super::{EllipticCurveProvider, PrivateKey, PublicKey};

/// Candidates at or above the curve order are redrawn. The chance of even one
/// rejection is about 2^-128, so hitting this bound means the RNG is broken.
const MAX_KEYGEN_ATTEMPTS: usize = 16;

/// libsecp256k1 backend. Randomness comes from the operating system unless
/// another source is supplied with [`Secp256k1Provider::with_rng`].
pub struct Secp256k1Provider<R = OsRng> {
    secp: Secp256k1<All>,
    rng: Mutex<R>,
}

impl Secp256k1Provider {
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for Secp256k1Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Secp256k1Provider<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            secp: Secp256k1::new(),
            rng: Mutex::new(rng),
        }
    }
}

impl<R: RngCore + Send> EllipticCurveProvider for Secp256k1Provider<R> {
    fn generate_private_key(&self) -> Result<PrivateKey, DeriveError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| DeriveError::Entropy("random source lock poisoned".into()))?;
        let mut candidate = [0u8; 32];
        for attempt in 1..=MAX_KEYGEN_ATTEMPTS {
            rng.try_fill_bytes(&mut candidate)
                .map_err(|e| DeriveError::Entropy(e.to_string()))?;
            if let Ok(secret) = SecretKey::from_slice(&candidate) {
                debug!(attempt, "generated private key");
                return Ok(PrivateKey::from(secret));
            }
        }
        Err(DeriveError::Entropy(format!(
            "no valid scalar after {MAX_KEYGEN_ATTEMPTS} draws"
        )))
    }

    fn derive_public_key(&self, key: &PrivateKey) -> PublicKey {
        PublicKey::from(key.as_inner().public_key(&self.secp))
    }
}
