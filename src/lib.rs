// src/lib.rs

//! Dataset preparation for spam/ham style text classification.
//!
//! [`dataset`] turns a delimited source file into `train`, `dev` and `test`
//! directories of line-aligned `sentences.txt` / `labels.txt` files, and
//! [`loader`] reads those directories back and hands out batches.

use std::fmt;
use std::str::FromStr;

pub mod dataset;
pub mod error;
pub mod loader;
pub mod params;
pub mod timer;

pub use dataset::{build_dataset, load_dataset, partition, save_dataset, try_load_dataset};
pub use error::DataError;
pub use loader::{data_iterator, load_data, Batch, Batches, DataLoader, LoadedSplit};
pub use params::Params;
pub use timer::Timer;

/// File holding one text per line inside a split directory.
pub const SENTENCES_FILE: &str = "sentences.txt";
/// File holding one label per line, paired line-for-line with [`SENTENCES_FILE`].
pub const LABELS_FILE: &str = "labels.txt";

// --- Foundational Structs ---

/// One labelled example from the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub text: String,
    pub label: String,
}

impl Record {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Record { text: text.into(), label: label.into() }
    }
}

/// The three named partitions, in the order they are cut from a dataset.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Split {
    Train,
    Dev,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Dev, Split::Test];

    /// Directory name used on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Dev => "dev",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Split::Train),
            "dev" => Ok(Split::Dev),
            "test" => Ok(Split::Test),
            other => Err(DataError::InvalidParams(format!(
                "unknown split '{}', expected one of train, dev, test",
                other
            ))),
        }
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_names_round_trip() {
        for split in Split::ALL {
            assert_eq!(split.as_str().parse::<Split>().unwrap(), split);
            assert_eq!(split.to_string(), split.as_str());
        }
    }

    #[test]
    fn unknown_split_name_is_rejected() {
        assert!("validation".parse::<Split>().is_err());
    }

    #[test]
    fn splits_order_train_dev_test() {
        let mut splits = vec![Split::Test, Split::Train, Split::Dev];
        splits.sort();
        assert_eq!(splits, Split::ALL.to_vec());
    }
}
