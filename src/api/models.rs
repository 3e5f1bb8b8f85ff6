use crate::blockchain::{Block, Blockchain, Ledger, Miner};
use crate::config::Config;
use serde::{Deserialize, Serialize};

/// Shared application state: the ledger, owned once and handed to every worker.
#[derive(Debug)]
pub struct AppState {
    pub ledger: Ledger,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let chain = Blockchain::new(config.difficulty, config.replace_policy);
        let miner = Miner::new(config.mining.clone());
        Self {
            ledger: Ledger::new(chain, miner, config.max_stale_retries),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/* ---------- Write API Models ---------- */

#[derive(Debug, Deserialize)]
pub struct WriteRequest {
    #[serde(alias = "bpm", alias = "BPM")]
    pub payload: i64,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse {
    pub length: usize,
    pub difficulty: u32,
    pub chain: Vec<Block>,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: u32,
}

#[derive(Serialize)]
pub struct ReplaceResponse {
    pub replaced: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
