use log::{info, warn};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Block, LedgerError, hasher};

/// How `Blockchain::replace` judges a candidate chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacePolicy {
    /// Longer chain wins; links are not checked.
    #[default]
    LongestWins,
    /// Longer chain wins only if it passes full validation.
    LongestValid,
}

/// `curr` extends `prev`: index follows, link matches and the cached hash
/// matches the block's fields. Proof-of-Work is not checked here.
pub fn validate(curr: &Block, prev: &Block) -> bool {
    prev.index.checked_add(1) == Some(curr.index)
        && curr.prev_hash == prev.hash
        && hasher::commit(curr) == curr.hash
}

/// Validate a whole block sequence: genesis shape, linkage, hashes and PoW.
pub fn validate_blocks(blocks: &[Block]) -> bool {
    let Some(genesis) = blocks.first() else {
        return false;
    };
    if genesis.index != 0 || !genesis.prev_hash.is_empty() || genesis.hash != genesis.compute_hash()
    {
        return false;
    }

    blocks
        .windows(2)
        .all(|pair| validate(&pair[1], &pair[0]) && pair[1].meets_difficulty())
}

/// In-memory blockchain with Proof-of-Work, safe to share between workers.
#[derive(Debug)]
pub struct Blockchain {
    chain: RwLock<Vec<Block>>,
    difficulty: u32,
    replace_policy: ReplacePolicy,
}

impl Blockchain {
    /// Initialize a new blockchain with a genesis block.
    pub fn new(difficulty: u32, replace_policy: ReplacePolicy) -> Self {
        let genesis = Block::genesis(difficulty);
        info!("genesis block created (hash={})", genesis.hash);
        Self {
            chain: RwLock::new(vec![genesis]),
            difficulty,
            replace_policy,
        }
    }

    // A panic while holding the lock cannot leave the Vec half-updated.
    fn blocks(&self) -> RwLockReadGuard<'_, Vec<Block>> {
        self.chain.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn blocks_mut(&self) -> RwLockWriteGuard<'_, Vec<Block>> {
        self.chain.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the full chain, oldest first.
    pub fn read(&self) -> Vec<Block> {
        self.blocks().clone()
    }

    /// Return a copy of the last block in the chain.
    pub fn tip(&self) -> Block {
        self.blocks()
            .last()
            .expect("Blockchain should always have at least the genesis block")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.blocks().len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Append `candidate` if it extends the tip observed under the write lock.
    pub fn append(&self, candidate: Block) -> Result<(), LedgerError> {
        let mut chain = self.blocks_mut();
        let tip = chain
            .last()
            .expect("Blockchain should always have at least the genesis block");
        if !validate(&candidate, tip) {
            warn!(
                "rejected block #{} (prev_hash={}, tip=#{} {})",
                candidate.index, candidate.prev_hash, tip.index, tip.hash
            );
            return Err(LedgerError::InvalidLink {
                index: candidate.index,
            });
        }
        info!("appended block #{} hash={}", candidate.index, candidate.hash);
        chain.push(candidate);
        Ok(())
    }

    /// Swap in `candidates` if it is longer than the current chain.
    pub fn replace(&self, candidates: Vec<Block>) -> bool {
        self.replace_reporting_len(candidates).0
    }

    /// Like `replace`, also returning the chain length seen under the same
    /// write lock.
    pub fn replace_reporting_len(&self, candidates: Vec<Block>) -> (bool, usize) {
        if self.replace_policy == ReplacePolicy::LongestValid && !validate_blocks(&candidates) {
            warn!("replacement of {} blocks refused: invalid chain", candidates.len());
            return (false, self.len());
        }
        let mut chain = self.blocks_mut();
        if candidates.len() <= chain.len() {
            return (false, chain.len());
        }
        info!("chain replaced: {} -> {} blocks", chain.len(), candidates.len());
        *chain = candidates;
        (true, chain.len())
    }

    /// Validate the entire chain: linkage, hashes and PoW.
    pub fn is_valid_chain(&self) -> bool {
        validate_blocks(&self.blocks())
    }
}
