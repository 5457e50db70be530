use anyhow::{Context, Result};
use clap::Parser;
use mimalloc::MiMalloc;
use sam2psl::cli::Args;
use sam2psl::pipeline;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();

    // Records go to stdout, so diagnostics go to stderr.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            if args.quiet {
                EnvFilter::new("warn")
            } else {
                EnvFilter::new("info")
            }
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = args.conversion_config();
    let reader = open_input(&args.input)?;
    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let stats = pipeline::run(reader, &mut writer, &config)?;
    tracing::info!(
        minimap2 = args.minimap2,
        clamp = ?config.clamp,
        total_lines = stats.total_lines,
        header_lines = stats.header_lines,
        reference_sequences = stats.reference_sequences,
        records_written = stats.records_written,
        unmapped_records = stats.unmapped_records,
        unknown_reference_records = stats.unknown_reference_records,
        elapsed = ?start.elapsed(),
        "sam2psl: conversion complete"
    );
    Ok(())
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin().lock())));
    }
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}
