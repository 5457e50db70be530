use crate::psl::{ConversionConfig, MismatchClamp, MismatchMode};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sam2psl",
    about = "Convert SAM alignments into PSL-style alignment summaries",
    version
)]
pub struct Args {
    /// Input SAM file ('-' for standard input)
    #[arg(short = 'i', long = "input", value_name = "SAM", value_parser = non_empty_path)]
    pub input: PathBuf,

    /// SAM comes from minimap2: derive mismatches and strand from NM/nn/ts tags
    #[arg(short = 'm', long)]
    pub minimap2: bool,

    /// With --minimap2, report negative mismatch counts instead of flooring them at 0
    #[arg(long, requires = "minimap2")]
    pub no_clamp: bool,

    /// Output path (defaults to standard output)
    #[arg(short = 'o', long = "out", value_name = "PSL")]
    pub output: Option<PathBuf>,

    /// Set logging level to WARN (also hides the run summary)
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Args {
    pub fn conversion_config(&self) -> ConversionConfig {
        ConversionConfig {
            mode: if self.minimap2 { MismatchMode::Minimap2 } else { MismatchMode::Cigar },
            clamp: if self.no_clamp { MismatchClamp::Raw } else { MismatchClamp::Floor },
        }
    }
}

fn non_empty_path(value: &str) -> Result<PathBuf, String> {
    if value.is_empty() {
        Err("please specify an input file".to_string())
    } else {
        Ok(PathBuf::from(value))
    }
}
