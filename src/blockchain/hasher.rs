use sha2::{Digest, Sha256};

use super::Block;

/// Compute the SHA-256 commitment of a block (the `hash` field itself is
/// not part of the preimage).
///
/// The preimage is the plain concatenation of index, timestamp, payload,
/// previous hash, nonce and difficulty. Integers are written in decimal.
pub fn commit(block: &Block) -> String {
    let preimage = format!(
        "{}{}{}{}{}{}",
        block.index, block.timestamp, block.payload, block.prev_hash, block.nonce, block.difficulty
    );
    let mut hasher = Sha256::new();
    hasher.update(preimage.as_bytes());
    hex::encode(hasher.finalize())
}

/// Proof-of-Work predicate: `hash` starts with `difficulty` hex zeros.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    let wanted = difficulty as usize;
    hash.len() >= wanted && hash.bytes().take(wanted).all(|c| c == b'0')
}
