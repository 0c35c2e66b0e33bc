// src/loader.rs

//! Reads split directories back into memory and walks them in batches.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::fs;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use crate::{DataError, Params, Record, Split, LABELS_FILE, SENTENCES_FILE};

// --- Loaded splits ---

/// One split held in memory. `text[i]` is labelled `labels[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSplit {
    text: Vec<String>,
    labels: Vec<String>,
    size: usize,
}

impl LoadedSplit {
    /// Pairs the two line sequences read for `split`, refusing to build a
    /// split whose files disagree on length.
    pub fn from_lines(split: Split, text: Vec<String>, labels: Vec<String>) -> Result<Self, DataError> {
        if text.len() != labels.len() {
            return Err(DataError::PairedFileMismatch {
                split,
                sentences: text.len(),
                labels: labels.len(),
            });
        }
        let size = text.len();
        Ok(LoadedSplit { text, labels, size })
    }

    pub fn from_records(records: &[Record]) -> Self {
        let (text, labels) = records.iter().map(|r| (r.text.clone(), r.label.clone())).unzip();
        LoadedSplit { text, labels, size: records.len() }
    }

    pub fn text(&self) -> &[String] {
        &self.text
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>, DataError> {
    let raw = fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    Ok(raw.lines().map(str::to_string).collect())
}

/// Loads every requested split from `data_dir/<split>/`.
///
/// A split whose sentence and label files differ in length aborts the whole
/// load, as does a missing file.
pub fn load_data<P: AsRef<Path>>(splits: &[Split], data_dir: P) -> Result<BTreeMap<Split, LoadedSplit>, DataError> {
    let data_dir = data_dir.as_ref();
    let mut data = BTreeMap::new();

    for &split in splits {
        if data.contains_key(&split) {
            continue;
        }
        let split_dir = data_dir.join(split.as_str());
        let text = read_lines(&split_dir.join(SENTENCES_FILE))?;
        let labels = read_lines(&split_dir.join(LABELS_FILE))?;

        let loaded = LoadedSplit::from_lines(split, text, labels)?;
        tracing::debug!("Loaded {} examples for {} from {}", loaded.size(), split, split_dir.display());
        data.insert(split, loaded);
    }

    Ok(data)
}

// --- Batching ---

/// Aligned slices of text and labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<'a> {
    pub text: Vec<&'a str>,
    pub labels: Vec<&'a str>,
}

impl Batch<'_> {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Single pass over a [`LoadedSplit`] in batches of at most `batch_size`.
///
/// Yields `ceil(size / batch_size)` batches; only the last may be short.
/// Once exhausted it stays exhausted; build a new one with
/// [`data_iterator`] for the next epoch.
#[derive(Debug)]
pub struct Batches<'a> {
    split: &'a LoadedSplit,
    order: Vec<usize>,
    batch_size: usize,
    cursor: usize,
}

impl<'a> Batches<'a> {
    fn new(split: &'a LoadedSplit, order: Vec<usize>, batch_size: usize) -> Self {
        Batches { split, order, batch_size, cursor: 0 }
    }

    /// Index order this pass walks, after any shuffling.
    pub fn order(&self) -> &[usize] {
        &self.order
    }
}

impl<'a> Iterator for Batches<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.order.len() {
            return None;
        }
        let end = (self.cursor + self.batch_size).min(self.order.len());
        let indices = &self.order[self.cursor..end];
        self.cursor = end;

        let split: &'a LoadedSplit = self.split;
        Some(Batch {
            text: indices.iter().map(|&i| split.text[i].as_str()).collect(),
            labels: indices.iter().map(|&i| split.labels[i].as_str()).collect(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.order.len() - self.cursor).div_ceil(self.batch_size);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Batches<'_> {}

impl FusedIterator for Batches<'_> {}

/// Starts a pass over `split` with `params.batch_size`.
///
/// With `shuffle` the visiting order is permuted by an RNG seeded from
/// `params.seed`, so two passes with the same params see the same batches.
/// The split itself is left untouched.
pub fn data_iterator<'a>(split: &'a LoadedSplit, params: &Params, shuffle: bool) -> Result<Batches<'a>, DataError> {
    params.validate()?;

    let mut order: Vec<usize> = (0..split.size()).collect();
    if shuffle {
        let mut rng = StdRng::seed_from_u64(params.seed);
        order.shuffle(&mut rng);
    }

    Ok(Batches::new(split, order, params.batch_size))
}

// --- Loader ---

/// Holds the batching params and, optionally, the directory splits live in.
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    params: Params,
    data_dir: Option<PathBuf>,
}

impl DataLoader {
    pub fn new(params: Params) -> Self {
        DataLoader { params, data_dir: None }
    }

    pub fn set_dir<P: Into<PathBuf>>(mut self, data_dir: P) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn load_data<P: AsRef<Path>>(&self, splits: &[Split], data_dir: P) -> Result<BTreeMap<Split, LoadedSplit>, DataError> {
        load_data(splits, data_dir)
    }

    /// Like [`DataLoader::load_data`], reading from the directory given to
    /// [`DataLoader::set_dir`].
    pub fn load_splits(&self, splits: &[Split]) -> Result<BTreeMap<Split, LoadedSplit>, DataError> {
        let dir = self
            .data_dir
            .as_deref()
            .ok_or_else(|| DataError::InvalidParams("data directory is not set".into()))?;
        load_data(splits, dir)
    }

    pub fn data_iterator<'a>(&self, split: &'a LoadedSplit, shuffle: bool) -> Result<Batches<'a>, DataError> {
        data_iterator(split, &self.params, shuffle)
    }
}
