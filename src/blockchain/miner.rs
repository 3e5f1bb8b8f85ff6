use log::{debug, info};
use std::thread;
use std::time::{Duration, Instant};

use super::{Block, LedgerError};

/// Mining configuration
#[derive(Debug, Clone)]
pub struct MiningConfig {
    /// Give up after this many attempts (None = search forever)
    pub max_attempts: Option<u64>,
    /// Sleep after every failed attempt (demo slowdown)
    pub throttle: Option<Duration>,
    /// Log the candidate every N failed attempts (0 = never)
    pub progress_interval: u64,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            max_attempts: None,
            throttle: None,
            progress_interval: 100,
        }
    }
}

/// Proof-of-Work miner searching decimal nonces 0, 1, 2, ...
#[derive(Debug, Clone, Default)]
pub struct Miner {
    config: MiningConfig,
}

impl Miner {
    pub fn new(config: MiningConfig) -> Self {
        Self { config }
    }

    /// Build the successor of `prev` carrying `payload` and search for a
    /// nonce whose hash has `difficulty` leading zeros.
    ///
    /// The returned block is internally consistent (`hash` matches its
    /// fields). Fails when `prev` has no successor index or when
    /// `max_attempts` is configured and exhausted.
    pub fn mine(&self, prev: &Block, payload: i64, difficulty: u32) -> Result<Block, LedgerError> {
        let start = Instant::now();
        let mut block = Block::successor(prev, payload, difficulty)?;
        let mut attempt: u64 = 0;

        loop {
            if let Some(max) = self.config.max_attempts {
                if attempt >= max {
                    return Err(LedgerError::MiningTimeout {
                        difficulty,
                        attempts: attempt,
                    });
                }
            }

            block.nonce = attempt.to_string();
            block.hash = block.compute_hash();
            attempt += 1;

            if block.meets_difficulty() {
                info!(
                    "MINER - mined block #{} (nonce={}, attempts={}, elapsed={:?})",
                    block.index,
                    block.nonce,
                    attempt,
                    start.elapsed()
                );
                return Ok(block);
            }

            if self.config.progress_interval > 0 && attempt % self.config.progress_interval == 0 {
                debug!("MINER - attempt {} failed: {:?}", attempt, block);
            }
            if let Some(pause) = self.config.throttle {
                thread::sleep(pause);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Miner, MiningConfig};
    use crate::blockchain::{Block, LedgerError, model::validate};
    use std::time::{Duration, Instant};

    #[test]
    fn difficulty_zero_succeeds_first_try() {
        let g = Block::genesis(0);
        let b = Miner::default().mine(&g, 60, 0).unwrap();
        assert_eq!(b.nonce, "0");
        assert!(validate(&b, &g));
    }

    #[test]
    fn mining_produces_leading_zeros() {
        let g = Block::genesis(2);
        let b = Miner::default().mine(&g, 60, 2).unwrap();
        assert!(b.hash.starts_with("00"));
        assert_eq!(b.hash, b.compute_hash());
        assert_eq!(b.index, 1);
        assert_eq!(b.prev_hash, g.hash);
        assert!(validate(&b, &g));
    }

    #[test]
    fn mined_chain_links() {
        let miner = Miner::default();
        let mut tip = Block::genesis(1);
        for bpm in [55, 70, 90] {
            let next = miner.mine(&tip, bpm, 1).unwrap();
            assert!(validate(&next, &tip));
            tip = next;
        }
        assert_eq!(tip.index, 3);
    }

    #[test]
    fn attempt_cap_times_out() {
        let miner = Miner::new(MiningConfig {
            max_attempts: Some(3),
            ..MiningConfig::default()
        });
        let g = Block::genesis(64);
        let err = miner.mine(&g, 60, 64).unwrap_err();
        assert_eq!(
            err,
            LedgerError::MiningTimeout {
                difficulty: 64,
                attempts: 3
            }
        );
    }

    #[test]
    fn throttle_sleeps_after_each_failed_attempt() {
        let miner = Miner::new(MiningConfig {
            max_attempts: Some(4),
            throttle: Some(Duration::from_millis(5)),
            progress_interval: 1,
        });
        let g = Block::genesis(64);
        let start = Instant::now();
        let err = miner.mine(&g, 60, 64).unwrap_err();
        assert_eq!(
            err,
            LedgerError::MiningTimeout {
                difficulty: 64,
                attempts: 4
            }
        );
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn successor_overflow_is_reported() {
        let mut last = Block::genesis(0);
        last.index = u64::MAX;
        assert_eq!(
            Miner::default().mine(&last, 60, 0),
            Err(LedgerError::IndexOverflow { index: u64::MAX })
        );
    }

    #[test]
    fn zero_attempt_cap_never_hashes() {
        let miner = Miner::new(MiningConfig {
            max_attempts: Some(0),
            ..MiningConfig::default()
        });
        let g = Block::genesis(0);
        assert!(miner.mine(&g, 60, 0).is_err());
    }
}
