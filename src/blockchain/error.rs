use thiserror::Error;

/// Errors raised by the ledger core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Candidate does not extend the current tip (index, link or hash mismatch).
    #[error("block #{index} does not extend the current chain tip")]
    InvalidLink { index: u64 },

    /// The tip already carries the largest representable index.
    #[error("block #{index} has no successor: index space exhausted")]
    IndexOverflow { index: u64 },

    /// The miner hit its attempt cap.
    #[error("no nonce met difficulty {difficulty} within {attempts} attempts")]
    MiningTimeout { difficulty: u32, attempts: u64 },
}
