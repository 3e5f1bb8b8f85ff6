pub mod block;
pub mod error;
pub mod hasher;
pub mod ledger;
pub mod miner;
pub mod model;

pub use block::Block;
pub use error::LedgerError;
pub use ledger::Ledger;
pub use miner::{Miner, MiningConfig};
pub use model::{Blockchain, ReplacePolicy};

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 2;

/// Difficulty ceiling (keep low in dev to avoid long waits)
pub const DIFF_MAX: u32 = 6;

/// Default number of re-mines when a submission loses the race for the tip.
pub const DEFAULT_STALE_RETRIES: u32 = 3;
