use log::warn;

use super::{Block, Blockchain, LedgerError, Miner};

/// Ties the chain to a miner. Mining always happens outside the chain lock;
/// only validate+push runs under it.
#[derive(Debug)]
pub struct Ledger {
    chain: Blockchain,
    miner: Miner,
    max_stale_retries: u32,
}

impl Ledger {
    pub fn new(chain: Blockchain, miner: Miner, max_stale_retries: u32) -> Self {
        Self {
            chain,
            miner,
            max_stale_retries,
        }
    }

    pub fn chain(&self) -> &Blockchain {
        &self.chain
    }

    /// Mine a block carrying `payload` on top of the current tip and append it.
    ///
    /// If another submission moved the tip while we were mining, the block is
    /// re-mined against the new tip, up to `max_stale_retries` times. A block
    /// rejected against an unchanged tip is never retried.
    pub fn submit(&self, payload: i64) -> Result<Block, LedgerError> {
        let mut retries = 0;
        loop {
            let tip = self.chain.tip();
            let block = self.miner.mine(&tip, payload, self.chain.difficulty())?;
            match self.chain.append(block.clone()) {
                Ok(()) => return Ok(block),
                Err(err) => {
                    let moved = self.chain.tip().hash != tip.hash;
                    if !moved || retries >= self.max_stale_retries {
                        return Err(err);
                    }
                    retries += 1;
                    warn!(
                        "tip moved past #{} while mining, re-mining (retry {}/{})",
                        tip.index, retries, self.max_stale_retries
                    );
                }
            }
        }
    }

    /// Append an externally mined block. Single attempt.
    pub fn append_block(&self, block: Block) -> Result<Block, LedgerError> {
        self.chain.append(block.clone())?;
        Ok(block)
    }
}
