use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{LedgerError, hasher};

/// A single block in the ledger holding one BPM reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: String, // RFC 3339 (UTC)
    pub payload: i64,      // BPM reading
    pub prev_hash: String,
    pub difficulty: u32,
    pub nonce: String, // Proof-of-Work nonce (decimal)
    pub hash: String,  // Cached hash of the block
}

impl Block {
    /// Create the genesis block (first block in the chain). Not mined.
    pub fn genesis(difficulty: u32) -> Self {
        let mut block = Self {
            index: 0,
            timestamp: now(),
            payload: 0,
            prev_hash: String::new(),
            difficulty,
            nonce: String::new(),
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Create the successor of `prev` (not mined yet).
    pub fn successor(prev: &Block, payload: i64, difficulty: u32) -> Result<Self, LedgerError> {
        let index = prev
            .index
            .checked_add(1)
            .ok_or(LedgerError::IndexOverflow { index: prev.index })?;
        let mut block = Self {
            index,
            timestamp: now(),
            payload,
            prev_hash: prev.hash.clone(),
            difficulty,
            nonce: String::new(),
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        Ok(block)
    }

    pub fn compute_hash(&self) -> String {
        hasher::commit(self)
    }

    /// Whether the cached hash satisfies this block's own difficulty.
    pub fn meets_difficulty(&self) -> bool {
        hasher::meets_difficulty(&self.hash, self.difficulty)
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}
