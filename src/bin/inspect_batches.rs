// src/bin/inspect_batches.rs

use anyhow::{Context, Result};
use clap::Parser;
use spamsplit::{DataLoader, Params, Split, Timer};
use std::path::PathBuf;

/// Loads saved splits and walks them once in batches, the way a training
/// loop would.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the train/dev/test split directories
    #[arg(long, default_value = "data/MMD")]
    data_dir: PathBuf,
    /// Optional params.json with batch_size and seed
    #[arg(long)]
    params: Option<PathBuf>,
    /// Splits to load; all three when omitted
    #[arg(long = "split")]
    splits: Vec<Split>,
    /// Visit examples in the seeded shuffled order
    #[arg(long)]
    shuffle: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("spamsplit=info,inspect_batches=info")),
        )
        .init();

    let args = Args::parse();
    let params = match &args.params {
        Some(path) => Params::from_json_file(path)
            .with_context(|| format!("Failed to read params from {}", path.display()))?,
        None => Params::default(),
    };
    let splits = if args.splits.is_empty() { Split::ALL.to_vec() } else { args.splits.clone() };

    println!("--- Batch Inspection ---");
    println!("> batch_size: {}, seed: {}, shuffle: {}", params.batch_size, params.seed, args.shuffle);

    let loader = DataLoader::new(params).set_dir(&args.data_dir);
    let data = {
        let _timer = Timer::new("load").msg("Loading splits into memory...");
        loader
            .load_splits(&splits)
            .with_context(|| format!("Failed to load splits from {}", args.data_dir.display()))?
    };

    for (split, loaded) in &data {
        let mut batches = 0;
        let mut last_len = 0;
        for batch in loader.data_iterator(loaded, args.shuffle)? {
            batches += 1;
            last_len = batch.len();
        }
        println!(
            "> {}: {} examples in {} batches (last batch {})",
            split,
            loaded.size(),
            batches,
            last_len
        );
    }

    Ok(())
}
