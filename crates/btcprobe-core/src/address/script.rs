use bitcoin::opcodes::all::{OP_CHECKSIG, OP_DUP, OP_EQUALVERIFY, OP_HASH160, OP_PUSHBYTES_20};

/// Standard pay-to-pubkey-hash locking script:
/// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`.
#[must_use]
pub fn p2pkh_script(pubkey_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(25);
    script.push(OP_DUP.to_u8());
    script.push(OP_HASH160.to_u8());
    script.push(OP_PUSHBYTES_20.to_u8());
    script.extend_from_slice(pubkey_hash);
    script.push(OP_EQUALVERIFY.to_u8());
    script.push(OP_CHECKSIG.to_u8());
    script
}
