// src/dataset.rs

//! Builds the on-disk train/dev/test splits from a delimited source file.
//!
//! The source has a header row followed by `text,label` rows. Records keep
//! their file order all the way to disk: the split is positional, never
//! shuffled.

use csv::ReaderBuilder;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{DataError, Record, Split, Timer, LABELS_FILE, SENTENCES_FILE};

// --- Loading ---

/// Splits one physical line into its comma-delimited fields.
///
/// Double-quoted fields may hold the delimiter and `""` escapes a quote.
/// A blank line has no fields.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Parses the full text of a source file into records.
///
/// The first line is a header and is dropped, as is any line with fewer than
/// two fields or an empty text field. Fields past the second are ignored.
pub fn parse_records(raw: &str) -> Vec<Record> {
    raw.split('\n')
        .skip(1)
        .filter_map(|line| {
            let mut fields = split_fields(line).into_iter();
            let (text, label) = (fields.next()?, fields.next()?);
            (!text.is_empty()).then(|| Record { text, label })
        })
        .collect()
}

/// Loads a source file, reporting a missing file as
/// [`DataError::MissingSourceFile`] so it can be told apart from an empty one.
pub fn try_load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, DataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataError::MissingSourceFile(path.to_path_buf()),
        _ => DataError::io(path, e),
    })?;
    Ok(parse_records(&raw))
}

/// Loads a source file into memory.
///
/// A missing file is not an error here: it is reported with a warning and
/// yields an empty dataset. Any other read failure is returned.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, DataError> {
    match try_load_dataset(path) {
        Err(DataError::MissingSourceFile(path)) => {
            tracing::warn!("Sorry, no such file or directory: {}", path.display());
            Ok(Vec::new())
        }
        other => other,
    }
}

// --- Partitioning ---

/// Consecutive train/dev/test views over one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition<'a> {
    pub train: &'a [Record],
    pub dev: &'a [Record],
    pub test: &'a [Record],
}

impl<'a> Partition<'a> {
    pub fn get(&self, split: Split) -> &'a [Record] {
        match split {
            Split::Train => self.train,
            Split::Dev => self.dev,
            Split::Test => self.test,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Split, &'a [Record])> + '_ {
        Split::ALL.into_iter().map(move |split| (split, self.get(split)))
    }

    pub fn sizes(&self) -> SplitSizes {
        SplitSizes { train: self.train.len(), dev: self.dev.len(), test: self.test.len() }
    }
}

/// Record counts per split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitSizes {
    pub train: usize,
    pub dev: usize,
    pub test: usize,
}

impl SplitSizes {
    pub fn total(&self) -> usize {
        self.train + self.dev + self.test
    }
}

/// Cuts `dataset` at `floor(0.70 * N)` and `floor(0.85 * N)`.
///
/// The bounds use integer arithmetic so they are exact floors. Scaling by the
/// float `0.7` instead lands one short for some sizes (90 records give a train
/// split of 62 rather than 63).
pub fn partition(dataset: &[Record]) -> Partition<'_> {
    let n = dataset.len();
    let train_end = n * 70 / 100;
    let dev_end = n * 85 / 100;
    Partition {
        train: &dataset[..train_end],
        dev: &dataset[train_end..dev_end],
        test: &dataset[dev_end..],
    }
}

// --- Saving ---

/// Writes `sentences.txt` and `labels.txt` into `save_dir`, one record per
/// line in both, creating the directory if needed.
///
/// Text or labels containing a line break would desynchronise the two files,
/// so such records are rejected before anything is written. Both files are
/// staged as `*.tmp` siblings and only renamed into place once both writes
/// succeeded, so a failed save leaves the previous pair intact.
pub fn save_dataset<P: AsRef<Path>>(records: &[Record], save_dir: P) -> Result<(), DataError> {
    let dir = save_dir.as_ref();
    tracing::info!("Saving data in {}...", dir.display());

    if let Some(index) = records.iter().position(|r| has_line_break(&r.text) || has_line_break(&r.label)) {
        return Err(DataError::EmbeddedLineBreak { index });
    }

    fs::create_dir_all(dir).map_err(|e| DataError::io(dir, e))?;

    let mut sentences = String::new();
    let mut labels = String::new();
    for record in records {
        sentences.push_str(&record.text);
        sentences.push('\n');
        labels.push_str(&record.label);
        labels.push('\n');
    }

    let sentences_tmp = stage(dir, SENTENCES_FILE, &sentences)?;
    let labels_tmp = match stage(dir, LABELS_FILE, &labels) {
        Ok(path) => path,
        Err(e) => {
            let _ = fs::remove_file(&sentences_tmp);
            return Err(e);
        }
    };

    for (tmp, name) in [(sentences_tmp, SENTENCES_FILE), (labels_tmp, LABELS_FILE)] {
        let path = dir.join(name);
        fs::rename(&tmp, &path).map_err(|e| DataError::io(&path, e))?;
    }

    tracing::info!("- done.");
    Ok(())
}

/// Writes `contents` next to its final location as `<name>.tmp`.
fn stage(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, DataError> {
    let tmp = dir.join(format!("{}.tmp", name));
    fs::write(&tmp, contents).map_err(|e| DataError::io(&tmp, e))?;
    Ok(tmp)
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

/// Loads `source`, partitions it and saves every split under
/// `out_dir/<split>`.
pub fn build_dataset<P, Q>(source: P, out_dir: Q) -> Result<SplitSizes, DataError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let dataset = {
        let _timer = Timer::new("load").msg("Loading dataset into memory...");
        load_dataset(source)?
    };
    tracing::info!("> Loaded {} records.", dataset.len());

    let splits = partition(&dataset);
    for (split, records) in splits.iter() {
        tracing::debug!("{} split holds {} records", split, records.len());
        save_dataset(records, out_dir.as_ref().join(split.as_str()))?;
    }

    Ok(splits.sizes())
}
