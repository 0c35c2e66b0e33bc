// src/bin/build_dataset.rs

use anyhow::{Context, Result};
use clap::Parser;
use spamsplit::build_dataset;
use std::path::PathBuf;

/// Splits a `text,label` CSV into train/dev/test directories of paired
/// sentences.txt / labels.txt files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory the splits are written into
    #[arg(long, default_value = "data/MMD")]
    data_dir: PathBuf,
    /// Source CSV, relative to the data directory unless absolute
    #[arg(long, default_value = "MMD_DS_test.csv")]
    source: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("spamsplit=info,build_dataset=info")),
        )
        .init();

    let args = Args::parse();
    let source = args.data_dir.join(&args.source);

    println!("--- Dataset Builder ---");
    let sizes = build_dataset(&source, &args.data_dir)
        .with_context(|| format!("Failed to build splits from {}", source.display()))?;

    println!(
        "> train: {}, dev: {}, test: {} ({} records) in {}",
        sizes.train,
        sizes.dev,
        sizes.test,
        sizes.total(),
        args.data_dir.display()
    );
    Ok(())
}
