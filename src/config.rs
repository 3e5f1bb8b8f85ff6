use log::warn;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::blockchain::{
    DEFAULT_DIFFICULTY, DEFAULT_STALE_RETRIES, DIFF_MAX, MiningConfig, ReplacePolicy,
};

/// Runtime settings, read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub difficulty: u32,
    pub mining: MiningConfig,
    pub max_stale_retries: u32,
    pub replace_policy: ReplacePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            difficulty: DEFAULT_DIFFICULTY,
            mining: MiningConfig::default(),
            max_stale_retries: DEFAULT_STALE_RETRIES,
            replace_policy: ReplacePolicy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Bad values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        // ADDR is the legacy name for the listening port.
        let port = match lookup("PORT").or_else(|| lookup("ADDR")) {
            Some(raw) => parse_or("PORT", &raw, defaults.port),
            None => defaults.port,
        };

        let mut difficulty = parsed(&lookup, "DIFFICULTY", defaults.difficulty);
        if difficulty > DIFF_MAX {
            warn!("DIFFICULTY {difficulty} too high for dev mode, clamped to {DIFF_MAX}");
            difficulty = DIFF_MAX;
        }

        let max_attempts = lookup("MINING_MAX_ATTEMPTS").and_then(|raw| {
            raw.parse::<u64>()
                .map_err(|_| warn!("ignoring invalid MINING_MAX_ATTEMPTS={raw:?}"))
                .ok()
        });
        let throttle_ms: u64 = parsed(&lookup, "MINING_THROTTLE_MS", 0);
        let mining = MiningConfig {
            max_attempts,
            throttle: (throttle_ms > 0).then(|| Duration::from_millis(throttle_ms)),
            progress_interval: parsed(
                &lookup,
                "MINING_PROGRESS_INTERVAL",
                defaults.mining.progress_interval,
            ),
        };

        let replace_policy = match lookup("REPLACE_POLICY").as_deref() {
            None | Some("longest") => ReplacePolicy::LongestWins,
            Some("longest-valid") => ReplacePolicy::LongestValid,
            Some(other) => {
                warn!("unknown REPLACE_POLICY {other:?}, using \"longest\"");
                ReplacePolicy::LongestWins
            }
        };

        Self {
            host,
            port,
            difficulty,
            mining,
            max_stale_retries: parsed(&lookup, "MAX_STALE_RETRIES", defaults.max_stale_retries),
            replace_policy,
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => parse_or(key, &raw, default),
        None => default,
    }
}

fn parse_or<T: FromStr>(key: &str, raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!("ignoring invalid {key}={raw:?}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::blockchain::{DEFAULT_DIFFICULTY, DIFF_MAX, ReplacePolicy};
    use std::collections::HashMap;
    use std::time::Duration;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let c = config(&[]);
        assert_eq!(c.host, "127.0.0.1");
        assert_eq!(c.port, 8080);
        assert_eq!(c.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(c.mining.max_attempts, None);
        assert_eq!(c.mining.throttle, None);
        assert_eq!(c.replace_policy, ReplacePolicy::LongestWins);
    }

    #[test]
    fn reads_values() {
        let c = config(&[
            ("HOST", "0.0.0.0"),
            ("ADDR", "9000"),
            ("DIFFICULTY", "3"),
            ("MINING_MAX_ATTEMPTS", "500"),
            ("MINING_THROTTLE_MS", "25"),
            ("MAX_STALE_RETRIES", "1"),
            ("REPLACE_POLICY", "longest-valid"),
        ]);
        assert_eq!(c.host, "0.0.0.0");
        assert_eq!(c.port, 9000);
        assert_eq!(c.difficulty, 3);
        assert_eq!(c.mining.max_attempts, Some(500));
        assert_eq!(c.mining.throttle, Some(Duration::from_millis(25)));
        assert_eq!(c.max_stale_retries, 1);
        assert_eq!(c.replace_policy, ReplacePolicy::LongestValid);
    }

    #[test]
    fn port_wins_over_addr() {
        let c = config(&[("PORT", "7000"), ("ADDR", "9000")]);
        assert_eq!(c.port, 7000);
    }

    #[test]
    fn bad_values_fall_back() {
        let c = config(&[
            ("PORT", "http"),
            ("DIFFICULTY", "99"),
            ("MINING_MAX_ATTEMPTS", "lots"),
            ("REPLACE_POLICY", "random"),
        ]);
        assert_eq!(c.port, 8080);
        assert_eq!(c.difficulty, DIFF_MAX);
        assert_eq!(c.mining.max_attempts, None);
        assert_eq!(c.replace_policy, ReplacePolicy::LongestWins);
    }
}
