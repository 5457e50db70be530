//! sam2psl: summarise SAM alignments as PSL-style records.
//!
//! Each mapped alignment line becomes one 21-column record: match and
//! mismatch counts, gap counts, strand, query and target spans, and the
//! aligned blocks recovered from the CIGAR. Reference lengths come from
//! the `@SQ` header lines.

pub mod alignment;
pub mod cigar;
pub mod cli;
pub mod error;
pub mod header;
pub mod pipeline;
pub mod psl;
pub mod types;

mod api;

pub use alignment::SamLine;
pub use api::convert_str;
pub use cigar::{CigarOp, format_cigar, parse_cigar};
pub use error::{LineError, RecordError};
pub use header::ReferenceLengths;
pub use pipeline::Stats;
pub use psl::{AlignmentSummary, ConversionConfig, MismatchClamp, MismatchMode, Strand, summarize};
