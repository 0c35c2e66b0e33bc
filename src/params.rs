// src/params.rs

//! Hyper-parameters consumed by the batch loader.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::DataError;

pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const DEFAULT_SEED: u64 = 493;

/// Batching options, usually read from a `params.json` next to the data.
///
/// Keys missing from the JSON fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub batch_size: usize,
    /// Seed for the shuffled batch order.
    pub seed: u64,
}

impl Default for Params {
    fn default() -> Self {
        Params { batch_size: DEFAULT_BATCH_SIZE, seed: DEFAULT_SEED }
    }
}

impl Params {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let params: Params = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if self.batch_size == 0 {
            return Err(DataError::InvalidParams("batch_size must be > 0".into()));
        }
        Ok(())
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_loader_contract() {
        let params = Params::default();
        assert_eq!(params.batch_size, 100);
        assert_eq!(params.seed, 493);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let params = Params::from_json_str(r#"{"batch_size": 32}"#).unwrap();
        assert_eq!(params, Params::default().with_batch_size(32));

        let params = Params::from_json_str("{}").unwrap();
        assert_eq!(params, Params::default());
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = Params::from_json_str(r#"{"batch_size": 0}"#).unwrap_err();
        assert!(matches!(err, DataError::InvalidParams(_)));
    }

    #[test]
    fn reads_params_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, r#"{"batch_size": 8, "seed": 7}"#).unwrap();

        let params = Params::from_json_file(&path).unwrap();
        assert_eq!(params, Params { batch_size: 8, seed: 7 });
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(matches!(Params::from_json_str("{batch_size"), Err(DataError::Json(_))));
    }
}
